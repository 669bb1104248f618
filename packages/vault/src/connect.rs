//! Key-pair connection assembly
//!
//! Fetches the service user's secrets, turns the private key secret into
//! PKCS#8 DER and bundles everything the warehouse client's connect call
//! takes. Key errors are returned as-is inside [`VaultError::Key`]; nothing
//! here retries or swallows them.

use crate::config::WarehouseSettings;
use crate::error::{VaultError, VaultResult};
use crate::source::SecretSource;
use budgetkey_common::LoggingTransformer;
use budgetkey_key::{public_key_fingerprint, secret_to_der};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Service user credentials for key-pair authentication
pub struct KeyPairCredentials {
    user: String,
    account: String,
    private_key_der: Zeroizing<Vec<u8>>,
}

impl KeyPairCredentials {
    /// Build credentials from the raw private key secret text
    ///
    /// # Errors
    /// Returns `VaultError::Key` wrapping `KeyError::Format` or
    /// `KeyError::KeyParse`, and `VaultError::InvalidInput` for a blank user
    /// or account.
    pub fn from_secret_text(
        user: impl Into<String>,
        account: impl Into<String>,
        private_key_text: &str,
    ) -> VaultResult<Self> {
        let user = user.into().trim().to_string();
        let account = account.into().trim().to_string();
        if user.is_empty() {
            return Err(VaultError::InvalidInput("user must not be empty".into()));
        }
        if account.is_empty() {
            return Err(VaultError::InvalidInput("account must not be empty".into()));
        }

        let private_key_der = secret_to_der(private_key_text)?;

        Ok(Self {
            user,
            account,
            private_key_der,
        })
    }

    /// Login name
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Account identifier
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Unencrypted PKCS#8 DER private key
    pub fn private_key_der(&self) -> &[u8] {
        &self.private_key_der
    }

    /// `SHA256:` fingerprint of the public key to register for the user
    ///
    /// # Errors
    /// Returns `VaultError::Key` if the DER cannot be decoded.
    pub fn fingerprint(&self) -> VaultResult<String> {
        Ok(public_key_fingerprint(&self.private_key_der)?)
    }
}

impl fmt::Debug for KeyPairCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPairCredentials")
            .field("user", &self.user)
            .field("account", &self.account)
            .field("private_key_der", &"[REDACTED]")
            .finish()
    }
}

/// Parameters for the warehouse client's connect call
pub struct ConnectParams {
    /// Account identifier
    pub account: String,
    /// Login name
    pub user: String,
    /// Unencrypted PKCS#8 DER private key
    pub private_key: Zeroizing<Vec<u8>>,
    /// Compute warehouse
    pub warehouse: String,
    /// Default database
    pub database: String,
    /// Default schema
    pub schema: String,
    /// Role to assume
    pub role: String,
}

impl ConnectParams {
    /// Combine credentials with the non-secret settings
    pub fn new(credentials: KeyPairCredentials, settings: &WarehouseSettings) -> Self {
        let KeyPairCredentials {
            user,
            account,
            private_key_der,
        } = credentials;

        Self {
            account,
            user,
            private_key: private_key_der,
            warehouse: settings.warehouse.clone(),
            database: settings.database.clone(),
            schema: settings.schema.clone(),
            role: settings.role.clone(),
        }
    }
}

impl fmt::Debug for ConnectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectParams")
            .field("account", &self.account)
            .field("user", &self.user)
            .field("private_key", &"[REDACTED]")
            .field("warehouse", &self.warehouse)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .field("role", &self.role)
            .finish()
    }
}

async fn fetch_secret<S: SecretSource>(source: &S, name: &str) -> VaultResult<SecretString> {
    let result = source.get_secret(name).await;
    LoggingTransformer::log_secret_access(source.kind(), name, result.is_ok());
    result
}

/// Fetch the configured secrets and assemble connect parameters
///
/// # Errors
/// Propagates secret lookup failures and key conversion failures
/// (`VaultError::Key`) unchanged.
pub async fn resolve_connect_params<S: SecretSource>(
    source: &S,
    settings: &WarehouseSettings,
) -> VaultResult<ConnectParams> {
    settings.validate()?;
    let names = &settings.secrets;

    let user = fetch_secret(source, &names.user).await?;
    let account = fetch_secret(source, &names.account).await?;
    let private_key = fetch_secret(source, &names.private_key).await?;

    let credentials = KeyPairCredentials::from_secret_text(
        user.expose_secret(),
        account.expose_secret(),
        private_key.expose_secret(),
    )
    .inspect_err(|e| match e.key_error() {
        Some(key_err) => {
            LoggingTransformer::log_key_rejected("key-pair credentials", key_err.kind())
        }
        None => warn!("Key-pair credentials rejected: {e}"),
    })?;

    match credentials.fingerprint() {
        Ok(fingerprint) => LoggingTransformer::log_auth_key(credentials.account(), &fingerprint),
        Err(e) => debug!("Could not fingerprint converted key: {e}"),
    }

    debug!(
        warehouse = %settings.warehouse,
        database = %settings.database,
        schema = %settings.schema,
        role = %settings.role,
        "Connect parameters assembled"
    );

    Ok(ConnectParams::new(credentials, settings))
}
