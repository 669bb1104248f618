use super::{validate_secret_name, SecretSource};
use crate::error::{VaultError, VaultResult};
use secrecy::SecretString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Secrets stored one per file in a directory
///
/// The file name is the secret name. A single trailing line ending is
/// dropped so files written by editors round-trip cleanly.
#[derive(Debug, Clone)]
pub struct FileSecretSource {
    root: PathBuf,
}

impl FileSecretSource {
    /// Serve secrets from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory secrets are read from
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SecretSource for FileSecretSource {
    fn kind(&self) -> &'static str {
        "file"
    }

    async fn get_secret(&self, name: &str) -> VaultResult<SecretString> {
        validate_secret_name(name)?;
        let path = self.root.join(name);

        let mut contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Zeroizing::new(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(VaultError::SecretNotFound(name.to_string()));
            }
            Err(e) => return Err(VaultError::Io(e)),
        };

        if contents.ends_with('\n') {
            contents.pop();
            if contents.ends_with('\r') {
                contents.pop();
            }
        }

        Ok(SecretString::from(std::mem::take(&mut *contents)))
    }
}
