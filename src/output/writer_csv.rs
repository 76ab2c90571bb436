use crate::probe::result::ProbeResult;
use anyhow::Context;
use csv::{ReaderBuilder, Writer};
use std::fs::File;
use std::path::Path;

pub const CSV_HEADER: [&str; 5] = ["url", "status", "params", "time_ms", "error"];

/// One row per result; params are comma-joined into a single field.
pub fn write_csv(path: &Path, items: &[ProbeResult]) -> anyhow::Result<()> {
    let f = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = Writer::from_writer(f);
    w.write_record(CSV_HEADER)?;
    for it in items {
        w.write_record(&[
            it.url.clone(),
            it.status.map(|v| v.to_string()).unwrap_or_default(),
            it.params.join(","),
            it.time_ms.to_string(),
            it.error.clone().unwrap_or_default(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Read back a file produced by [`write_csv`]. Empty status/error fields map to `None`.
pub fn read_csv(path: &Path) -> anyhow::Result<Vec<ProbeResult>> {
    let f = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut r = ReaderBuilder::new().has_headers(true).from_reader(f);
    let mut out = Vec::new();
    for (i, record) in r.records().enumerate() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or("");
        let row = i + 2;

        let status = match field(1) {
            "" => None,
            s => Some(s.parse::<u16>().with_context(|| format!("row {}: bad status {:?}", row, s))?),
        };
        let params = match field(2) {
            "" => Vec::new(),
            p => p.split(',').map(str::to_string).collect(),
        };
        let time_ms = field(3)
            .parse::<u64>()
            .with_context(|| format!("row {}: bad time_ms {:?}", row, field(3)))?;
        let error = match field(4) {
            "" => None,
            e => Some(e.to_string()),
        };

        out.push(ProbeResult {
            url: field(0).to_string(),
            status,
            params,
            time_ms,
            error,
        });
    }
    Ok(out)
}
