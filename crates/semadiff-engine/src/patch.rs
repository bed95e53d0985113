//! Patch refinement: turn an existing single-file unified patch into a
//! semantic diff when the file's format supports one.
//!
//! The base and head content are reconstructed from the patch hunks.
//! Partial-context patches reconstruct incomplete content, which is
//! acceptable for structured data where the full structure is usually
//! present in the diff.

use crate::{detect_format, semantic_diff, DiffFormat};

/// Re-express a single file's unified patch as a semantic diff.
///
/// Returns the original patch unchanged when the path implies a unified
/// diff anyway, when the patch has no reconstructable hunks, or when the
/// semantic diff itself degraded to the fallback path.
pub fn refine_unified_patch(path: &str, patch: &str) -> String {
    if patch.is_empty() {
        return patch.to_string();
    }

    if detect_format(path) == DiffFormat::Unified {
        return patch.to_string();
    }

    let Some((base, head)) = reconstruct_from_patch(patch) else {
        return patch.to_string();
    };

    let result = semantic_diff(path, Some(&base), Some(&head));
    if result.format == DiffFormat::Fallback {
        return patch.to_string();
    }

    result.diff
}

/// Extract base and head content from a unified patch's hunks.
///
/// `-` lines belong to base, `+` lines to head, and context lines to
/// both. Returns `None` when the patch contains no hunk content.
fn reconstruct_from_patch(patch: &str) -> Option<(Vec<u8>, Vec<u8>)> {
    let mut base_lines: Vec<&str> = Vec::new();
    let mut head_lines: Vec<&str> = Vec::new();
    let mut in_hunk = false;

    for line in patch.split('\n') {
        if line.starts_with("@@") {
            in_hunk = true;
            continue;
        }
        if !in_hunk {
            continue;
        }

        if let Some(rest) = line.strip_prefix('-') {
            base_lines.push(rest);
        } else if let Some(rest) = line.strip_prefix('+') {
            head_lines.push(rest);
        } else if let Some(rest) = line.strip_prefix(' ') {
            base_lines.push(rest);
            head_lines.push(rest);
        } else if line.is_empty() {
            // End of patch or an empty context line.
            base_lines.push("");
            head_lines.push("");
        }
    }

    if base_lines.is_empty() && head_lines.is_empty() {
        return None;
    }

    Some((
        base_lines.join("\n").into_bytes(),
        head_lines.join("\n").into_bytes(),
    ))
}
