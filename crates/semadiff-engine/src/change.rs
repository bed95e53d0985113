//! The change record shared by all differs, and its single renderer.

use std::fmt;

/// What happened at a path or declaration identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// No corresponding base value existed.
    Added,
    /// No corresponding head value exists.
    Removed,
    /// Both existed and the value (or body text) differs.
    Modified,
    /// Both existed with incompatible shapes (e.g. object vs array).
    TypeChanged,
}

/// A single change emitted by a differ.
///
/// Owned by the emitting differ and consumed immediately by the
/// formatter; never persisted. `old`/`new` hold pre-formatted display
/// strings; structural changes carry no values at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Change {
    /// Dotted/bracketed access path, row/cell label, or declaration identity.
    pub path: String,
    /// The change classification.
    pub kind: ChangeKind,
    /// Formatted base-side value, when one exists.
    pub old: Option<String>,
    /// Formatted head-side value, when one exists.
    pub new: Option<String>,
}

impl Change {
    /// A value that exists only on the head side.
    pub fn added(path: impl Into<String>, new: Option<String>) -> Self {
        Self {
            path: path.into(),
            kind: ChangeKind::Added,
            old: None,
            new,
        }
    }

    /// A value that exists only on the base side.
    pub fn removed(path: impl Into<String>, old: Option<String>) -> Self {
        Self {
            path: path.into(),
            kind: ChangeKind::Removed,
            old,
            new: None,
        }
    }

    /// A value present on both sides with different content.
    pub fn modified(path: impl Into<String>, old: Option<String>, new: Option<String>) -> Self {
        Self {
            path: path.into(),
            kind: ChangeKind::Modified,
            old,
            new,
        }
    }

    /// A value present on both sides with incompatible shapes.
    pub fn type_changed(path: impl Into<String>, old: String, new: String) -> Self {
        Self {
            path: path.into(),
            kind: ChangeKind::TypeChanged,
            old: Some(old),
            new: Some(new),
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ChangeKind::Added => match &self.new {
                Some(new) => write!(f, "{}: added {new}", self.path),
                None => write!(f, "{}: added", self.path),
            },
            ChangeKind::Removed => match &self.old {
                Some(old) => write!(f, "{}: removed (was {old})", self.path),
                None => write!(f, "{}: removed", self.path),
            },
            ChangeKind::Modified | ChangeKind::TypeChanged => match (&self.old, &self.new) {
                (Some(old), Some(new)) => write!(f, "{}: {old} → {new}", self.path),
                _ => write!(f, "{}: modified", self.path),
            },
        }
    }
}

/// Render a change list as newline-joined lines.
pub fn render_changes(changes: &[Change]) -> String {
    changes
        .iter()
        .map(Change::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
