//! CSV export for Kopro list views.
//!
//! Produces spreadsheet-friendly files: UTF-8 BOM so Excel detects the
//! encoding, semicolon delimiters for locales where comma is the decimal
//! separator, and every field double-quoted. Exporting an empty row list
//! is a no-op: no file, no error.

use std::io;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

/// UTF-8 byte-order mark prepended to every export.
const BOM: &str = "\u{feff}";

/// Field delimiter.
const DELIMITER: &str = ";";

/// Maps a row key to a column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub header: String,
}

impl Column {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
        }
    }
}

/// Renders rows to CSV text. Returns `None` for an empty row list.
///
/// Rows are JSON objects; a missing or `null` field serializes as the
/// empty string. Quotes inside fields are doubled.
pub fn render_csv(rows: &[Value], columns: &[Column]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|c| quote(&c.header))
            .collect::<Vec<_>>()
            .join(DELIMITER),
    );
    for row in rows {
        lines.push(
            columns
                .iter()
                .map(|c| quote(&field_text(row.get(&c.key))))
                .collect::<Vec<_>>()
                .join(DELIMITER),
        );
    }

    Some(format!("{BOM}{}", lines.join("\n")))
}

/// Writes rows to a CSV file.
///
/// Returns `Ok(false)` without touching the filesystem when there is
/// nothing to export.
pub fn export_csv(path: &Path, rows: &[Value], columns: &[Column]) -> io::Result<bool> {
    match render_csv(rows, columns) {
        Some(content) => {
            std::fs::write(path, content)?;
            debug!(path = %path.display(), rows = rows.len(), "exported CSV");
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Timestamped default filename, e.g. `residents_20260807_142501.csv`.
pub fn default_filename(prefix: &str) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("{prefix}_{stamp}.csv")
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
