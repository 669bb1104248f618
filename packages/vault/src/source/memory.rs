use super::{validate_secret_name, SecretSource};
use crate::error::{VaultError, VaultResult};
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

/// Secrets held in process memory
///
/// Useful for tests and for callers that already fetched their secrets
/// through another channel.
#[derive(Debug, Default)]
pub struct InMemorySecretSource {
    secrets: HashMap<String, SecretString>,
}

impl InMemorySecretSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret, replacing any previous value under the same name
    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a secret in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.secrets
            .insert(name.into(), SecretString::from(value.into()));
    }

    /// Number of stored secrets
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Whether the source holds no secrets
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl SecretSource for InMemorySecretSource {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn get_secret(&self, name: &str) -> VaultResult<SecretString> {
        validate_secret_name(name)?;
        self.secrets
            .get(name)
            .map(|secret| SecretString::from(secret.expose_secret().to_owned()))
            .ok_or_else(|| VaultError::SecretNotFound(name.to_string()))
    }
}
