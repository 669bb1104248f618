//! Secret sources
//!
//! A [`SecretSource`] hands out secret text by name. Sources are constructed
//! by the caller and passed in explicitly; there is no process-wide client.

mod file;
mod memory;

pub use file::FileSecretSource;
pub use memory::InMemorySecretSource;

use crate::error::{VaultError, VaultResult};
use secrecy::SecretString;
use std::future::Future;

/// Read access to named secrets
pub trait SecretSource: Send + Sync {
    /// Short label for logs, e.g. `"file"`
    fn kind(&self) -> &'static str;

    /// Fetch the secret stored under `name`
    ///
    /// Returns `VaultError::SecretNotFound` when no such secret exists.
    fn get_secret(&self, name: &str) -> impl Future<Output = VaultResult<SecretString>> + Send;
}

/// Reject names that could escape a namespace or directory
pub(crate) fn validate_secret_name(name: &str) -> VaultResult<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
    {
        return Err(VaultError::InvalidInput(format!(
            "invalid secret name: {name:?}"
        )));
    }
    Ok(())
}
