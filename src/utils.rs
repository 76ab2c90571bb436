use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

pub fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path).with_context(|| format!("failed to create {}", path.display()))?;
    }
    Ok(())
}

/// `<base>.<ext>`, appended rather than replacing anything after a dot in `base`.
pub fn output_path(base: &str, ext: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", base, ext))
}

/// Create the parent directory of the output base if needed.
pub fn prepare_output_base(base: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(base).parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}
