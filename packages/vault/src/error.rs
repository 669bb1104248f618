//! Error types for secret retrieval and connection assembly

use budgetkey_key::KeyError;

/// Errors from secret retrieval and connection assembly
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// I/O failure reading a secret or settings file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The secret source has no secret under this name
    #[error("Secret not found: {0}")]
    SecretNotFound(String),
    /// Caller supplied an unusable value
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Settings failed validation
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Settings JSON could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The private key secret could not be turned into PKCS#8 DER
    #[error(transparent)]
    Key(#[from] KeyError),
}

impl VaultError {
    /// The key error behind this failure, if any
    pub fn key_error(&self) -> Option<&KeyError> {
        match self {
            VaultError::Key(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for vault operations
pub type VaultResult<T> = Result<T, VaultError>;
