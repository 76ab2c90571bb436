pub mod console;
pub mod writer_csv;
pub mod writer_json;
pub mod writer_txt;

pub use console::{format_summary, select_renderer, PlainRenderer, Renderer, TableRenderer};
pub use writer_csv::{read_csv, write_csv};
pub use writer_json::{read_json, write_json};
pub use writer_txt::{format_line, write_txt};

use std::path::PathBuf;

use crate::probe::result::ProbeResult;
use crate::utils::{output_path, prepare_output_base};

/// Which optional report files to produce. The text report is always written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFormats {
    pub json: bool,
    pub csv: bool,
}

/// Write `<base>.txt` and any requested `<base>.json` / `<base>.csv`.
///
/// Returns the written paths in the order they were produced.
pub fn write_reports(base: &str, results: &[ProbeResult], formats: ReportFormats) -> anyhow::Result<Vec<PathBuf>> {
    prepare_output_base(base)?;
    let mut written = Vec::new();

    let txt = output_path(base, "txt");
    write_txt(&txt, results)?;
    written.push(txt);

    if formats.json {
        let json = output_path(base, "json");
        write_json(&json, results)?;
        written.push(json);
    }
    if formats.csv {
        let csv = output_path(base, "csv");
        write_csv(&csv, results)?;
        written.push(csv);
    }

    for p in &written {
        tracing::debug!(path = %p.display(), "report written");
    }
    Ok(written)
}
