use clap::Parser;
use param_hunter::config::{ProbeConfig, DEFAULT_WORKERS};
use param_hunter::probe::ProbeMethod;

#[derive(clap::Parser, Debug)]
#[command(author, version, about = "ParamHunter v0.8 - Real operational CLI parameter extractor", long_about = None)]
pub struct Cli {
    /// Single target URL
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// File with list of target URLs
    #[arg(short = 'l', long)]
    pub list: Option<String>,

    /// Base name for output files
    #[arg(short = 'o', long, default_value = "results")]
    pub output: String,

    /// Save JSON output
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Save CSV output
    #[arg(long, default_value_t = false)]
    pub csv: bool,

    /// Save TXT output (always written)
    #[arg(long, default_value_t = false)]
    pub txt: bool,

    /// Number of concurrent probes
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub threads: usize,

    /// HTTP method
    #[arg(long, value_enum, default_value_t = ProbeMethod::Get)]
    pub method: ProbeMethod,

    /// POST data to send
    #[arg(long)]
    pub data: Option<String>,

    /// Proxy URL for both HTTP and HTTPS
    #[arg(long)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 5.0)]
    pub timeout: f64,

    /// Number of retries on 429/5xx or connection errors
    #[arg(long, default_value_t = 2)]
    pub retries: u32,

    /// Exponential backoff factor between retries
    #[arg(long, default_value_t = 0.5)]
    pub backoff: f64,

    /// Skip the banner and console table
    #[arg(long, default_value_t = false)]
    pub no_banner: bool,

    /// Re-render a saved JSON report instead of probing
    #[arg(long, value_name = "FILE", conflicts_with_all = ["url", "list"])]
    pub replay: Option<String>,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            threads: self.threads,
            method: self.method,
            data: self.data.clone(),
            proxy: self.proxy.clone(),
            timeout: self.timeout,
            retries: self.retries,
            backoff: self.backoff,
        }
    }
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
