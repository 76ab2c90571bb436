use serde::{Deserialize, Serialize};

/// Outcome of probing one target. Created once by the probe worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub url: String,
    pub status: Option<u16>,
    pub params: Vec<String>,
    pub time_ms: u64,
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn success(url: &str, status: u16, params: Vec<String>, time_ms: u64) -> Self {
        Self {
            url: url.to_string(),
            status: Some(status),
            params,
            time_ms,
            error: None,
        }
    }

    /// Failed probes carry no status and no params.
    pub fn failure(url: &str, error: impl Into<String>, time_ms: u64) -> Self {
        Self {
            url: url.to_string(),
            status: None,
            params: Vec::new(),
            time_ms,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// HTTP method used for every probe in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeMethod {
    #[default]
    #[value(name = "GET")]
    Get,
    #[value(name = "POST")]
    Post,
}

impl ProbeMethod {
    pub fn as_method(&self) -> reqwest::Method {
        match self {
            ProbeMethod::Get => reqwest::Method::GET,
            ProbeMethod::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_method().as_str())
    }
}
