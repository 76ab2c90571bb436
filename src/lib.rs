pub mod enrich;
pub mod gather;
pub mod config;
pub mod output;
pub mod utils;
pub mod probe;
pub mod http_client;
pub mod concurrent;

// re-export the pieces used by the binary and tests
pub use crate::enrich::params::extract_params;
pub use crate::gather::targets::load_targets;
pub use crate::http_client::{build_client, Fetch, HttpClient};
pub use crate::probe::{probe_url, ProbeMethod, ProbeResult};
