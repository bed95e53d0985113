//! Language grammar registry for semadiff's structural differ.
//!
//! Maps file extensions to tree-sitter grammars and extracts named
//! top-level declarations from source files. Adding a language means
//! registering a new [`Grammar`] entry; the comparison algorithm in the
//! engine never changes.
//!
//! # Key Types
//!
//! - [`Grammar`] -- A language handle: tree-sitter language, declaration
//!   kinds, and a naming rule
//! - [`Declaration`] -- A named top-level construct with its source text
//! - [`extract_declarations`] -- Parse source and collect declarations

pub mod declarations;
pub mod error;
pub mod grammar;

pub use declarations::{extract_declarations, Declaration};
pub use error::LangError;
pub use grammar::{Grammar, NameRule};
