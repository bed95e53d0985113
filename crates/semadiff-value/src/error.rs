//! Error types for the value crate.

/// Errors produced while decoding structured text into a [`crate::DecodedValue`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input was not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The input was not valid TOML.
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The input was not valid UTF-8 (TOML requires text).
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
