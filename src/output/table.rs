//! Interval table codec
//!
//! Tables are comma separated with a `video,start,end` header. Times are
//! written with two decimals. Video ids containing a comma, quote or line
//! break are quoted with doubled inner quotes.

use std::path::Path;

use tracing::warn;

use crate::domain::model::Interval;
use crate::error::{CatClipError, CatClipResult};
use crate::output::writer::{append_durable, write_atomic};

pub const HEADER: &str = "video,start,end";

/// Render rows, with a header line, as table text
pub fn render(intervals: &[Interval]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + intervals.len() * 32);
    out.push_str(HEADER);
    out.push('\n');
    for interval in intervals {
        out.push_str(&render_row(interval));
    }
    out
}

/// Render a single row including its line break
pub fn render_row(interval: &Interval) -> String {
    format!(
        "{},{:.2},{:.2}\n",
        quote(&interval.video_id),
        interval.start,
        interval.end
    )
}

/// Whether the row still has `start < end` after rounding to the table
/// precision
pub fn is_representable(interval: &Interval) -> bool {
    let rounded = |seconds: f64| format!("{:.2}", seconds).parse::<f64>().unwrap_or(seconds);
    rounded(interval.start) < rounded(interval.end)
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Parse table text.
///
/// Malformed rows are skipped with a warning. A missing header is tolerated
/// so hand-edited tables still load.
pub fn parse(text: &str) -> Vec<Interval> {
    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim_end_matches('\r');
        if trimmed.trim().is_empty() || (line_no == 1 && trimmed.trim() == HEADER) {
            continue;
        }
        match parse_row(trimmed, line_no) {
            Ok(interval) => rows.push(interval),
            Err(e) => warn!("Skipping row: {}", e),
        }
    }
    rows
}

/// Parse one data row
pub fn parse_row(line: &str, line_no: usize) -> CatClipResult<Interval> {
    let fields = split_fields(line).ok_or_else(|| CatClipError::Format {
        line: line_no,
        message: "unterminated quoted field".to_string(),
    })?;
    if fields.len() != 3 {
        return Err(CatClipError::Format {
            line: line_no,
            message: format!("expected 3 fields, found {}", fields.len()),
        });
    }

    let start = parse_seconds(&fields[1], line_no)?;
    let end = parse_seconds(&fields[2], line_no)?;
    Interval::new(fields[0].clone(), start, end).map_err(|e| match e {
        CatClipError::Format { message, .. } => CatClipError::Format {
            line: line_no,
            message,
        },
        other => other,
    })
}

fn parse_seconds(field: &str, line_no: usize) -> CatClipResult<f64> {
    field.trim().parse::<f64>().map_err(|_| CatClipError::Format {
        line: line_no,
        message: format!("'{}' is not a number", field),
    })
}

/// Split a row on commas, honouring double-quoted fields
fn split_fields(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) if current.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut current)),
            (c, _) => current.push(c),
        }
    }
    if in_quotes {
        return None;
    }
    fields.push(current);
    Some(fields)
}

/// Read a table file; a missing file is an empty table
pub fn read(path: &Path) -> CatClipResult<Vec<Interval>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(parse(&text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Replace a table file atomically
pub fn write(path: &Path, intervals: &[Interval]) -> CatClipResult<()> {
    write_atomic(path, render(intervals).as_bytes())
}

/// Append rows to a table file, writing the header first for a new file
pub fn append(path: &Path, intervals: &[Interval]) -> CatClipResult<()> {
    let needs_header = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let mut text = String::new();
    if needs_header {
        text.push_str(HEADER);
        text.push('\n');
    }
    for interval in intervals {
        text.push_str(&render_row(interval));
    }
    append_durable(path, text.as_bytes())
}
