//! Tabular differ: row/cell comparison over parsed CSV.

use tracing::debug;

use crate::change::Change;
use crate::{fallback_result, DiffFormat, SemanticDiffResult, NO_CHANGES};

/// Parse both sides as CSV and produce row/cell-level changes. Malformed
/// CSV on either side degrades to the unified differ, matching the
/// structured-value failure policy.
pub(crate) fn diff_csv(path: &str, base: &[u8], head: &[u8]) -> SemanticDiffResult {
    let base_rows = match parse_rows(base) {
        Ok(rows) => rows,
        Err(err) => {
            debug!(path, error = %err, "base side failed CSV parse");
            return fallback_result(path, base, head, "failed to parse base as CSV");
        }
    };
    let head_rows = match parse_rows(head) {
        Ok(rows) => rows,
        Err(err) => {
            debug!(path, error = %err, "head side failed CSV parse");
            return fallback_result(path, base, head, "failed to parse head as CSV");
        }
    };

    let changes = compare_tables(&base_rows, &head_rows);
    if changes.is_empty() {
        return SemanticDiffResult {
            format: DiffFormat::Csv,
            diff: NO_CHANGES.to_string(),
            message: None,
        };
    }

    SemanticDiffResult {
        format: DiffFormat::Csv,
        diff: crate::change::render_changes(&changes),
        message: None,
    }
}

/// Read all records with strict field counts; a ragged row is a parse error.
fn parse_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Compare CSV data with header awareness. Row 0 on each non-empty side
/// is the header; changed headers disable header-name labels for the
/// rest of the diff since column semantics may have shifted.
fn compare_tables(base: &[Vec<String>], head: &[Vec<String>]) -> Vec<Change> {
    let mut changes = Vec::new();

    let mut headers: Option<&[String]> = if let Some(first) = base.first() {
        Some(first)
    } else {
        head.first().map(Vec::as_slice)
    };

    if let (Some(base_headers), Some(head_headers)) = (base.first(), head.first()) {
        if base_headers != head_headers {
            changes.push(Change::modified(
                "headers changed",
                Some(render_row(base_headers)),
                Some(render_row(head_headers)),
            ));
            headers = None;
        }
    }

    // Data rows start after the header row on each side that has one.
    let base_data = if base.is_empty() { base } else { &base[1..] };
    let head_data = if head.is_empty() { head } else { &head[1..] };

    for i in 0..base_data.len().max(head_data.len()) {
        let row_label = format!("row {}", i + 1);
        match (base_data.get(i), head_data.get(i)) {
            (None, Some(head_row)) => {
                changes.push(Change::added(row_label, Some(render_row(head_row))));
            }
            (Some(base_row), None) => {
                changes.push(Change::removed(row_label, Some(render_row(base_row))));
            }
            (Some(base_row), Some(head_row)) => {
                compare_row(&mut changes, &row_label, headers, base_row, head_row);
            }
            (None, None) => unreachable!("index is below one of the two lengths"),
        }
    }

    changes
}

/// Cell-by-cell comparison of one row. Labels use the header name when
/// headers are stable and known, positional indices otherwise.
fn compare_row(
    changes: &mut Vec<Change>,
    row_label: &str,
    headers: Option<&[String]>,
    base: &[String],
    head: &[String],
) {
    for col in 0..base.len().max(head.len()) {
        let base_val = base.get(col).map(String::as_str).unwrap_or("");
        let head_val = head.get(col).map(String::as_str).unwrap_or("");
        if base_val == head_val {
            continue;
        }

        let label = match headers.and_then(|h| h.get(col)) {
            Some(name) => format!("{row_label}.{name}"),
            None => format!("{row_label}[{col}]"),
        };
        changes.push(Change::modified(
            label,
            Some(format!("{base_val:?}")),
            Some(format!("{head_val:?}")),
        ));
    }
}

/// Space-joined bracket rendering for a row of cells: `[a b]`.
fn render_row(cells: &[String]) -> String {
    format!("[{}]", cells.join(" "))
}
