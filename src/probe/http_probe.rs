use std::time::{Duration, Instant};

use crate::enrich::params::extract_params;
use crate::http_client::Fetch;
use crate::probe::result::{ProbeMethod, ProbeResult};

/// Probe a single target. Never fails: every error ends up in the result.
///
/// GET ignores `body`. The measured time includes any retries done by the
/// client.
pub async fn probe_url<F>(client: &F, url: &str, method: ProbeMethod, body: Option<&str>, timeout: Duration) -> ProbeResult
where
    F: Fetch + ?Sized,
{
    let body = match method {
        ProbeMethod::Get => None,
        ProbeMethod::Post => body,
    };

    let start = Instant::now();
    let res = client.fetch(&method.as_method(), url, body, timeout).await;
    let elapsed = start.elapsed().as_millis() as u64;

    match res {
        Ok(status) => {
            tracing::debug!(url, status, elapsed_ms = elapsed, "probe ok");
            ProbeResult::success(url, status, extract_params(url), elapsed)
        }
        Err(e) => {
            tracing::debug!(url, error = %e, elapsed_ms = elapsed, "probe failed");
            ProbeResult::failure(url, format!("{:#}", e), elapsed)
        }
    }
}
