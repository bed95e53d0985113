//! Decoded-value model for semadiff.
//!
//! Structured text (JSON, YAML, TOML) is parsed into a single normalized
//! tree shape so the comparison logic never sees decoder-specific types.
//! All numerics become `f64`, YAML's non-string mapping keys become
//! strings, and TOML datetimes become strings.
//!
//! # Key Types
//!
//! - [`DecodedValue`] -- Closed sum over Null/Bool/Number/String/Array/Object
//! - [`DecodeError`] -- Parse failures from any of the three decoders
//! - [`decode_json`] / [`decode_yaml`] / [`decode_toml`] -- Format decoders

pub mod decode;
pub mod error;
pub mod value;

pub use decode::{decode_json, decode_toml, decode_yaml};
pub use error::DecodeError;
pub use value::DecodedValue;
