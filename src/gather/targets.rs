use std::path::Path;

use anyhow::Context;

/// Read newline-delimited targets from `path`.
///
/// Lines are trimmed first; blank lines and lines starting with `#` are
/// dropped. Entries are not validated as URLs, a malformed one surfaces later
/// as a probe error.
pub fn load_targets(path: &Path) -> anyhow::Result<Vec<String>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read target list {}", path.display()))?;
    let targets = parse_targets(&data);
    tracing::debug!(path = %path.display(), count = targets.len(), "loaded targets");
    Ok(targets)
}

pub fn parse_targets(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
