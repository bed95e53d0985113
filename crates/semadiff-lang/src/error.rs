//! Error types for the language crate.

/// Errors produced while parsing source into a declaration set.
#[derive(Debug, thiserror::Error)]
pub enum LangError {
    /// The tree-sitter parser rejected the grammar (version mismatch).
    #[error("incompatible grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser produced no tree at all.
    #[error("failed to parse source")]
    Parse,

    /// The parse tree contains syntax errors.
    #[error("source contains syntax errors")]
    Syntax,

    /// A declaration span was not valid UTF-8.
    #[error("declaration text is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
