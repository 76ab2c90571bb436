use std::time::Duration;

use serde::Deserialize;

use crate::probe::result::ProbeMethod;

pub const DEFAULT_WORKERS: usize = 10;

/// Settings for one probing run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub threads: usize,
    pub method: ProbeMethod,
    pub data: Option<String>,
    pub proxy: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout: f64,
    pub retries: u32,
    pub backoff: f64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_WORKERS,
            method: ProbeMethod::Get,
            data: None,
            proxy: None,
            timeout: 5.0,
            retries: 2,
            backoff: 0.5,
        }
    }
}

impl ProbeConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.threads == 0 {
            anyhow::bail!("threads must be at least 1");
        }
        if !self.timeout.is_finite() || self.timeout <= 0.0 {
            anyhow::bail!("timeout must be a positive number of seconds, got {}", self.timeout);
        }
        if let Err(e) = Duration::try_from_secs_f64(self.timeout) {
            anyhow::bail!("timeout of {} seconds is out of range: {}", self.timeout, e);
        }
        if !self.backoff.is_finite() || self.backoff < 0.0 {
            anyhow::bail!("backoff must be a non-negative number, got {}", self.backoff);
        }
        Ok(())
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs_f64(self.timeout)
    }
}
