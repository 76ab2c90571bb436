use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::probe::result::ProbeResult;

/// The one-line log form of a result. Every text surface goes through here.
pub fn format_line(r: &ProbeResult) -> String {
    let status = r.status.map(|s| s.to_string()).unwrap_or_else(|| "-".into());
    match &r.error {
        Some(err) => format!("[ERROR] {} -> {}", r.url, err),
        None if !r.params.is_empty() => {
            format!("[+] {} -> params: {} (http {})", r.url, r.params.join(", "), status)
        }
        None => format!("[-] {} -> no params (http {})", r.url, status),
    }
}

pub fn format_lines(results: &[ProbeResult]) -> Vec<String> {
    results.iter().map(format_line).collect()
}

/// Write one line per result, newline separated, without a trailing newline.
pub fn write_txt(path: &Path, results: &[ProbeResult]) -> anyhow::Result<()> {
    fs::write(path, format_lines(results).join("\n"))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
