//! Error handling for key normalization and conversion

use thiserror::Error;

/// Key material errors
///
/// Both variants are terminal: a secret that fails here will fail the same
/// way on every attempt, so callers report them instead of retrying.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Single-line secret text without a locatable PEM header/footer pair
    #[error("Malformed key secret: {0}")]
    Format(String),

    /// Bytes that do not decode as an unencrypted, supported private key
    #[error("Key parse error: {0}")]
    KeyParse(String),
}

impl KeyError {
    /// Create a `Format` error
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create a `KeyParse` error
    pub fn key_parse(msg: impl Into<String>) -> Self {
        Self::KeyParse(msg.into())
    }

    /// Stable name of the failure kind, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Format(_) => "format",
            Self::KeyParse(_) => "key_parse",
        }
    }

    /// Whether this is a framing failure of the secret text
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// Whether this is a failure to decode the key itself
    pub fn is_key_parse(&self) -> bool {
        matches!(self, Self::KeyParse(_))
    }
}

/// Result type for key operations
pub type Result<T> = std::result::Result<T, KeyError>;
