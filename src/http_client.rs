use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, Proxy, Response, StatusCode};

pub const USER_AGENT: &str = "ParamHunter/0.8";

/// Statuses that trigger an automatic retry.
pub const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Upper bound for a single backoff or Retry-After sleep.
pub const BACKOFF_MAX: Duration = Duration::from_secs(120);

/// Anything that can issue one logical request and report the final status.
///
/// The probe worker only talks to this trait, the real implementation is
/// [`HttpClient`]. Implementations must be shareable across tasks.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, method: &Method, url: &str, body: Option<&str>, timeout: Duration) -> anyhow::Result<u16>;
}

/// Retry settings shared by every request made through an [`HttpClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub backoff_factor: f64,
}

impl RetryPolicy {
    pub fn new(retries: u32, backoff_factor: f64) -> Self {
        Self { retries, backoff_factor }
    }

    /// Sleep before retry number `retry` (1-based): `factor * 2^(retry-1)`, capped.
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry == 0 || self.backoff_factor.is_nan() || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }
        let exp = (retry - 1).min(31) as i32;
        let secs = self.backoff_factor * 2f64.powi(exp);
        if !secs.is_finite() || secs >= BACKOFF_MAX.as_secs_f64() {
            return BACKOFF_MAX;
        }
        Duration::from_secs_f64(secs)
    }

    pub fn is_retryable_status(status: u16) -> bool {
        RETRY_STATUSES.contains(&status)
    }

    pub fn allows_method(method: &Method) -> bool {
        matches!(
            *method,
            Method::GET | Method::POST | Method::PUT | Method::DELETE | Method::HEAD | Method::OPTIONS
        )
    }
}

/// Reusable client: reqwest connection pool plus the retry policy.
///
/// Configuration is fixed at construction; probes only ever borrow it.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    policy: RetryPolicy,
}

/// Build the shared client used for a whole run.
pub fn build_client(timeout: Duration, retries: u32, backoff_factor: f64, proxy: Option<&str>) -> anyhow::Result<HttpClient> {
    let mut builder = ClientBuilder::new()
        // Connection pooling
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_nodelay(true)

        // Timeouts
        .timeout(timeout)
        .connect_timeout(timeout)

        // Compression
        .gzip(true)
        .brotli(true)

        .use_rustls_tls()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT);

    // only an explicit proxy is honoured, environment proxies are ignored
    builder = match proxy {
        Some(p) => builder.proxy(Proxy::all(p).with_context(|| format!("invalid proxy url: {}", p))?),
        None => builder.no_proxy(),
    };

    let client = builder.build().context("failed to build HTTP client")?;
    Ok(HttpClient {
        client,
        policy: RetryPolicy::new(retries, backoff_factor),
    })
}

impl HttpClient {
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn fetch(&self, method: &Method, url: &str, body: Option<&str>, timeout: Duration) -> anyhow::Result<u16> {
        let may_retry = RetryPolicy::allows_method(method);
        let mut retry = 0u32;
        loop {
            let mut req = self.client.request(method.clone(), url).timeout(timeout);
            if let Some(b) = body {
                req = req.body(b.to_string());
            }

            match req.send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if !may_retry || !RetryPolicy::is_retryable_status(status) {
                        // drain so the elapsed time covers the whole response
                        resp.bytes().await.context("failed reading response body")?;
                        return Ok(status);
                    }
                    if retry >= self.policy.retries {
                        tracing::warn!(url, status, retries = retry, "retries exhausted");
                        anyhow::bail!("max retries exceeded with url: {} (too many {} error responses)", url, status);
                    }
                    retry += 1;
                    let wait = retry_after(&resp).unwrap_or_else(|| self.policy.backoff(retry));
                    tracing::debug!(url, status, retry, wait_ms = wait.as_millis() as u64, "retrying after status");
                    drop(resp);
                    tokio::time::sleep(wait).await;
                }
                Err(e) => {
                    let transient = e.is_connect() || e.is_timeout();
                    if !may_retry || !transient || retry >= self.policy.retries {
                        if retry > 0 {
                            return Err(anyhow::Error::new(e).context(format!("max retries exceeded with url: {}", url)));
                        }
                        return Err(e.into());
                    }
                    retry += 1;
                    let wait = self.policy.backoff(retry);
                    tracing::debug!(url, error = %e, retry, wait_ms = wait.as_millis() as u64, "retrying after error");
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}

// numeric Retry-After on 429/503 only
fn retry_after(resp: &Response) -> Option<Duration> {
    if resp.status() != StatusCode::TOO_MANY_REQUESTS && resp.status() != StatusCode::SERVICE_UNAVAILABLE {
        return None;
    }
    let secs: u64 = resp
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())?;
    Some(Duration::from_secs(secs).min(BACKOFF_MAX))
}
