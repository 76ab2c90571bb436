use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::probe::result::ProbeResult;

/// Pretty-printed JSON array of results.
pub fn write_json(path: &Path, results: &[ProbeResult]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Load a report written by [`write_json`].
pub fn read_json(path: &Path) -> anyhow::Result<Vec<ProbeResult>> {
    let data = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let results = serde_json::from_str(&data).with_context(|| format!("{} is not a results report", path.display()))?;
    Ok(results)
}
