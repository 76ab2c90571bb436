pub mod http_probe;
pub mod result;

pub use http_probe::probe_url;
pub use result::{ProbeMethod, ProbeResult};
