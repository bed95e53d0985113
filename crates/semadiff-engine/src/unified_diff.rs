//! Unified line diff: the universal fallback.
//!
//! Uses the `similar` crate (Myers diff) for line alignment. Output keeps
//! the classic `--- a/` / `+++ b/` headers with `-`/`+` change lines;
//! unchanged lines are not emitted.

use similar::{ChangeTag, TextDiff};

/// Produce a unified line diff between two byte blobs.
///
/// Line endings are normalized and invalid UTF-8 is replaced lossily, so
/// this never fails.
pub fn unified_diff(path: &str, base: &[u8], head: &[u8]) -> String {
    let base_text = normalize_text(base);
    let head_text = normalize_text(head);

    let mut out = String::new();
    out.push_str(&format!("--- a/{path}\n"));
    out.push_str(&format!("+++ b/{path}\n"));

    let diff = TextDiff::from_lines(&base_text, &head_text);
    for change in diff.iter_all_changes() {
        let line = change.value().trim_end_matches('\n');
        match change.tag() {
            ChangeTag::Delete => {
                out.push('-');
                out.push_str(line);
                out.push('\n');
            }
            ChangeTag::Insert => {
                out.push('+');
                out.push_str(line);
                out.push('\n');
            }
            ChangeTag::Equal => {}
        }
    }

    out
}

fn normalize_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace("\r\n", "\n")
}
