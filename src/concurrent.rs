use tokio::sync::Semaphore;
use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::ProgressBar;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::http_client::Fetch;
use crate::probe::http_probe::probe_url;
use crate::probe::result::{ProbeMethod, ProbeResult};

/// Request settings applied to every target of a batch.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub method: ProbeMethod,
    pub body: Option<String>,
    pub timeout: Duration,
}

/// Bounded probe executor: at most `concurrency` probes in flight.
pub struct ConcurrentProbe {
    semaphore: Arc<Semaphore>,
    completed: Arc<AtomicUsize>,
    errors: Arc<AtomicUsize>,
    progress: ProgressBar,
}

impl ConcurrentProbe {
    pub fn new(concurrency: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(concurrency.max(1))),
            completed: Arc::new(AtomicUsize::new(0)),
            errors: Arc::new(AtomicUsize::new(0)),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Probe every target and return one result per target, in completion order.
    ///
    /// Targets beyond the pool size wait for a free permit. A task that panics
    /// still produces an error result for its URL.
    pub async fn run(&self, client: Arc<dyn Fetch>, targets: Vec<String>, request: &ProbeRequest) -> Vec<ProbeResult> {
        let total = targets.len();
        let request = Arc::new(request.clone());
        let mut futures = FuturesUnordered::new();

        for url in targets {
            let permit = self.semaphore.clone().acquire_owned().await.expect("probe semaphore closed");
            let client = client.clone();
            let request = request.clone();
            let progress = self.progress.clone();
            let task_url = url.clone();

            let handle = tokio::spawn(async move {
                let result = probe_url(
                    client.as_ref(),
                    &task_url,
                    request.method,
                    request.body.as_deref(),
                    request.timeout,
                )
                .await;
                drop(permit); // Release semaphore
                progress.inc(1);
                result
            });
            futures.push(async move { (url, handle.await) });
        }

        let mut results = Vec::with_capacity(total);
        while let Some((url, joined)) = futures.next().await {
            let result = match joined {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "probe task failed");
                    self.progress.inc(1);
                    ProbeResult::failure(&url, format!("probe task failed: {}", e), 0)
                }
            };
            self.completed.fetch_add(1, Ordering::Relaxed);
            if result.is_error() {
                self.errors.fetch_add(1, Ordering::Relaxed);
            }
            results.push(result);
        }

        self.progress.finish_and_clear();
        results
    }

    pub fn get_stats(&self) -> (usize, usize) {
        (
            self.completed.load(Ordering::Relaxed),
            self.errors.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::Method;

    /// Tracks how many fetches overlap.
    struct Gauge {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl Fetch for Gauge {
        async fn fetch(&self, _method: &Method, url: &str, _body: Option<&str>, _timeout: Duration) -> anyhow::Result<u16> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            if url.contains("boom") {
                panic!("fetch blew up");
            }
            if url.contains("bad") {
                anyhow::bail!("connection refused");
            }
            Ok(200)
        }
    }

    fn request() -> ProbeRequest {
        ProbeRequest { method: ProbeMethod::Get, body: None, timeout: Duration::from_secs(1) }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_pool_is_bounded() {
        let gauge = Arc::new(Gauge { active: AtomicUsize::new(0), peak: AtomicUsize::new(0) });
        let targets: Vec<String> = (0..12).map(|i| format!("https://e.com/?id={}", i)).collect();

        let pool = ConcurrentProbe::new(3);
        let results = pool.run(gauge.clone(), targets, &request()).await;

        assert_eq!(results.len(), 12);
        assert!(gauge.peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(pool.get_stats(), (12, 0));
    }

    #[tokio::test]
    async fn test_one_result_per_target_even_on_panic() {
        let gauge = Arc::new(Gauge { active: AtomicUsize::new(0), peak: AtomicUsize::new(0) });
        let targets = vec![
            "https://e.com/?a=1".to_string(),
            "https://bad.example/".to_string(),
            "https://boom.example/".to_string(),
        ];

        let pool = ConcurrentProbe::new(2);
        let mut results = pool.run(gauge, targets, &request()).await;
        results.sort_by(|a, b| a.url.cmp(&b.url));

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].url, "https://bad.example/");
        assert_eq!(results[0].error.as_deref(), Some("connection refused"));
        assert_eq!(results[1].url, "https://boom.example/");
        assert!(results[1].error.as_deref().unwrap().starts_with("probe task failed"));
        assert_eq!(results[2].status, Some(200));
        assert_eq!(pool.get_stats(), (3, 2));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let gauge = Arc::new(Gauge { active: AtomicUsize::new(0), peak: AtomicUsize::new(0) });
        let results = ConcurrentProbe::new(4).run(gauge, Vec::new(), &request()).await;
        assert!(results.is_empty());
    }
}
