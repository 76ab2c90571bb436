use std::io::IsTerminal;

use once_cell::sync::Lazy;

use crate::output::writer_txt::format_line;
use crate::probe::result::ProbeResult;

pub const ASCII_BANNER: &str = r#"
 ____                      _   _hunter v0.8
|  _ \ __ _ ___ ___  _ __ | |_| |__   ___ _ __
| |_) / _` / __/ __|| '_ \| __| '_ \ / _ \ '__|
|  __/ (_| \__ \__ \| |_) | |_| | | |  __/ |
|_|   \__,_|___/___/| .__/ \__|_| |_|\___|_|
                    |_|
ParamHunter - CLI parameter extractor
"#;

/// True when stdout is an interactive terminal and NO_COLOR is unset.
pub static TABLE_SUPPORTED: Lazy<bool> =
    Lazy::new(|| std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none());

const HEADER_STYLE: &str = "\x1b[1;35m"; // Bold magenta
const ERROR_STYLE: &str = "\x1b[1;91m"; // Bright red
const RESET: &str = "\x1b[0m";

/// Console presentation of a finished batch.
pub trait Renderer: Send + Sync {
    fn render(&self, results: &[ProbeResult]) -> String;
}

/// Banner followed by the same lines that go into the text report.
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, results: &[ProbeResult]) -> String {
        let mut out = String::from(ASCII_BANNER);
        for r in results {
            out.push_str(&format_line(r));
            out.push('\n');
        }
        out
    }
}

/// Banner followed by a boxed URL / Status / Params / Time table.
pub struct TableRenderer {
    pub color: bool,
}

impl TableRenderer {
    fn row(r: &ProbeResult) -> [String; 4] {
        [
            r.url.clone(),
            r.status.map(|s| s.to_string()).unwrap_or_else(|| "ERR".into()),
            if r.params.is_empty() { "-".into() } else { r.params.join(",") },
            r.time_ms.to_string(),
        ]
    }
}

impl Renderer for TableRenderer {
    fn render(&self, results: &[ProbeResult]) -> String {
        let header = ["URL", "Status", "Params", "Time(ms)"];
        let rows: Vec<[String; 4]> = results.iter().map(Self::row).collect();

        let mut widths = header.map(|h| h.chars().count());
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row.iter()) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let rule = |left: &str, mid: &str, right: &str| {
            let segs: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}\n", left, segs.join(mid), right)
        };
        // last column is right aligned
        let line = |cells: [&str; 4]| {
            let mut s = String::from("│");
            for (i, (cell, w)) in cells.iter().zip(widths.iter()).enumerate() {
                let pad = w - cell.chars().count();
                if i == 3 {
                    s.push_str(&format!(" {}{} │", " ".repeat(pad), cell));
                } else {
                    s.push_str(&format!(" {}{} │", cell, " ".repeat(pad)));
                }
            }
            s
        };

        let mut out = String::from(ASCII_BANNER);
        out.push_str(&rule("┌", "┬", "┐"));
        let head = line(header);
        if self.color {
            out.push_str(&format!("{}{}{}\n", HEADER_STYLE, head, RESET));
        } else {
            out.push_str(&head);
            out.push('\n');
        }
        out.push_str(&rule("├", "┼", "┤"));
        for (r, row) in results.iter().zip(rows.iter()) {
            let text = line([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]);
            if self.color && r.is_error() {
                out.push_str(&format!("{}{}{}\n", ERROR_STYLE, text, RESET));
            } else {
                out.push_str(&text);
                out.push('\n');
            }
        }
        out.push_str(&rule("└", "┴", "┘"));
        out
    }
}

/// Pick the renderer for this process: a table on a capable terminal, plain lines otherwise.
pub fn select_renderer() -> Box<dyn Renderer> {
    if *TABLE_SUPPORTED {
        Box::new(TableRenderer { color: true })
    } else {
        Box::new(PlainRenderer)
    }
}

pub fn format_summary(results: &[ProbeResult]) -> String {
    let failed = results.iter().filter(|r| r.is_error()).count();
    let with_params = results.iter().filter(|r| !r.params.is_empty()).count();
    format!(
        "[*] {} targets: {} ok, {} failed, {} with params",
        results.len(),
        results.len() - failed,
        failed,
        with_params
    )
}
