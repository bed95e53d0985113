//! Diff engine for semadiff: format-aware comparison of two versions of
//! one file's byte content.
//!
//! The entry point is [`semantic_diff`]: a pure, synchronous computation
//! that picks a comparison granularity from the file's extension and
//! never returns an error. Every internal failure degrades to a unified
//! line diff with an explanatory message.
//!
//! # Key Types
//!
//! - [`DiffFormat`] -- Which differ ran (and how to read the output)
//! - [`SemanticDiffResult`] -- Rendered diff text plus an optional message
//! - [`Change`] / [`ChangeKind`] -- The change records differs emit
//! - [`unified_diff`] -- The universal line-diff fallback
//! - [`refine_unified_patch`] -- Re-express an existing patch semantically

pub mod change;
pub mod patch;
pub mod structural_diff;
pub mod table_diff;
pub mod unified_diff;
pub mod value_diff;

use std::fmt;
use std::path::Path;

use semadiff_lang::Grammar;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use change::{render_changes, Change, ChangeKind};
pub use patch::refine_unified_patch;
pub use unified_diff::unified_diff;

use value_diff::Structured;

/// Maximum blob size for semantic/structural diffing. Larger inputs fall
/// back to a unified diff so worst-case work stays bounded.
pub const MAX_SEMANTIC_FILE_SIZE: usize = 1024 * 1024;

/// The literal rendered when a structured or tabular diff finds nothing.
pub const NO_CHANGES: &str = "no changes detected";

/// The literal rendered when a structural diff finds nothing.
pub const NO_STRUCTURAL_CHANGES: &str = "no structural changes detected";

/// The comparison strategy chosen for a file, which also determines the
/// rendering style of the diff text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffFormat {
    /// Path-based diff over decoded JSON.
    #[serde(rename = "structured-json")]
    Json,
    /// Path-based diff over decoded YAML.
    #[serde(rename = "structured-yaml")]
    Yaml,
    /// Path-based diff over decoded TOML.
    #[serde(rename = "structured-toml")]
    Toml,
    /// Row/cell diff over parsed CSV.
    #[serde(rename = "tabular-csv")]
    Csv,
    /// Declaration-level diff over parsed source code.
    #[serde(rename = "structural-code")]
    Structural,
    /// Line-oriented diff with `---`/`+++` headers.
    #[serde(rename = "unified")]
    Unified,
    /// A format-specific differ could not run; unified diff substituted.
    #[serde(rename = "fallback")]
    Fallback,
}

impl DiffFormat {
    /// The wire/display tag for this format.
    pub fn as_str(self) -> &'static str {
        match self {
            DiffFormat::Json => "structured-json",
            DiffFormat::Yaml => "structured-yaml",
            DiffFormat::Toml => "structured-toml",
            DiffFormat::Csv => "tabular-csv",
            DiffFormat::Structural => "structural-code",
            DiffFormat::Unified => "unified",
            DiffFormat::Fallback => "fallback",
        }
    }
}

impl fmt::Display for DiffFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The output of one diff computation. Constructed once, immutable,
/// returned to the caller; no state outlives the call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticDiffResult {
    /// The format that produced the diff.
    pub format: DiffFormat,
    /// The rendered diff text, or a "no changes" sentinel.
    pub diff: String,
    /// Non-fatal explanation for degraded paths (size limit, parse failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Determine the diff format for a path by extension alone. No parsing
/// happens here; this is the capability query callers may use up front.
pub fn detect_format(path: &str) -> DiffFormat {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("json") => DiffFormat::Json,
        Some("yaml" | "yml") => DiffFormat::Yaml,
        Some("toml") => DiffFormat::Toml,
        Some("csv") => DiffFormat::Csv,
        _ if Grammar::for_path(path).is_some() => DiffFormat::Structural,
        _ => DiffFormat::Unified,
    }
}

/// Compare two versions of a file and produce a semantic diff for
/// supported formats, or a unified diff as a fallback.
///
/// `None` means the file does not exist at that revision (distinct from
/// an empty file): an absent base reports `file added`, an absent head
/// `file deleted`, and two absent sides a trivial no-op. This function
/// never returns an error; every failure mode degrades to the unified
/// differ with a message.
pub fn semantic_diff(path: &str, base: Option<&[u8]>, head: Option<&[u8]>) -> SemanticDiffResult {
    let (base, head) = match (base, head) {
        (None, None) => {
            return SemanticDiffResult {
                format: DiffFormat::Unified,
                diff: NO_CHANGES.to_string(),
                message: None,
            };
        }
        (None, Some(_)) => {
            return SemanticDiffResult {
                format: detect_format(path),
                diff: "file added".to_string(),
                message: None,
            };
        }
        (Some(_), None) => {
            return SemanticDiffResult {
                format: detect_format(path),
                diff: "file deleted".to_string(),
                message: None,
            };
        }
        (Some(base), Some(head)) => (base, head),
    };

    if base.len() > MAX_SEMANTIC_FILE_SIZE || head.len() > MAX_SEMANTIC_FILE_SIZE {
        debug!(path, base_len = base.len(), head_len = head.len(), "size guard tripped");
        return fallback_result(
            path,
            base,
            head,
            "file exceeds maximum size for semantic diff",
        );
    }

    match detect_format(path) {
        DiffFormat::Json => value_diff::diff_structured(path, base, head, Structured::Json),
        DiffFormat::Yaml => value_diff::diff_structured(path, base, head, Structured::Yaml),
        DiffFormat::Toml => value_diff::diff_structured(path, base, head, Structured::Toml),
        DiffFormat::Csv => table_diff::diff_csv(path, base, head),
        DiffFormat::Structural => structural_diff::diff_source(path, base, head),
        DiffFormat::Unified | DiffFormat::Fallback => SemanticDiffResult {
            format: DiffFormat::Unified,
            diff: unified_diff(path, base, head),
            message: None,
        },
    }
}

/// Build the degraded result: a unified diff tagged as fallback, with
/// the reason appended to a short fixed suffix.
pub(crate) fn fallback_result(
    path: &str,
    base: &[u8],
    head: &[u8],
    message: &str,
) -> SemanticDiffResult {
    SemanticDiffResult {
        format: DiffFormat::Fallback,
        diff: unified_diff(path, base, head),
        message: Some(format!("{message}, using unified diff")),
    }
}
