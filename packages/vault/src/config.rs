//! Warehouse connection settings
//!
//! Settings are passed explicitly to [`crate::resolve_connect_params`];
//! nothing here reads the process environment.

use crate::error::{VaultError, VaultResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Non-secret connection settings plus the names of the secrets to fetch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseSettings {
    /// Compute warehouse to run queries on
    #[serde(default = "default_warehouse")]
    pub warehouse: String,
    /// Default database
    #[serde(default = "default_database")]
    pub database: String,
    /// Default schema
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Role to assume after login
    #[serde(default = "default_role")]
    pub role: String,
    /// Names of the secrets holding the credentials
    #[serde(default)]
    pub secrets: SecretNames,
}

/// Secret names looked up in the configured [`crate::SecretSource`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretNames {
    /// Login name of the service user
    #[serde(default = "default_user_secret")]
    pub user: String,
    /// PKCS#8 private key registered for the service user
    #[serde(default = "default_private_key_secret")]
    pub private_key: String,
    /// Account identifier
    #[serde(default = "default_account_secret")]
    pub account: String,
}

fn default_warehouse() -> String {
    "COMPUTE_WH".to_string()
}

fn default_database() -> String {
    "BUDGET".to_string()
}

fn default_schema() -> String {
    "RAW".to_string()
}

fn default_role() -> String {
    "PUBLIC".to_string()
}

fn default_user_secret() -> String {
    "svc-snf-user".to_string()
}

fn default_private_key_secret() -> String {
    "svc-snf-rsa-key".to_string()
}

fn default_account_secret() -> String {
    "svc-snf-acc".to_string()
}

impl Default for SecretNames {
    fn default() -> Self {
        Self {
            user: default_user_secret(),
            private_key: default_private_key_secret(),
            account: default_account_secret(),
        }
    }
}

impl Default for WarehouseSettings {
    fn default() -> Self {
        Self {
            warehouse: default_warehouse(),
            database: default_database(),
            schema: default_schema(),
            role: default_role(),
            secrets: SecretNames::default(),
        }
    }
}

impl WarehouseSettings {
    /// Parse settings from JSON, filling missing fields with defaults
    ///
    /// # Errors
    /// Returns `VaultError::Serialization` for malformed JSON and
    /// `VaultError::Configuration` if a field is empty.
    pub fn from_json_str(json: &str) -> VaultResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    ///
    /// # Errors
    /// Returns `VaultError::Io` if the file cannot be read, otherwise the
    /// errors of [`WarehouseSettings::from_json_str`].
    pub async fn from_json_file(path: impl AsRef<Path>) -> VaultResult<Self> {
        let path = path.as_ref();
        debug!("Loading warehouse settings from {}", path.display());
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&json)
    }

    /// Override the role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Override the schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Check that no setting is blank
    ///
    /// # Errors
    /// Returns `VaultError::Configuration` naming the first blank field.
    pub fn validate(&self) -> VaultResult<()> {
        let fields = [
            ("warehouse", &self.warehouse),
            ("database", &self.database),
            ("schema", &self.schema),
            ("role", &self.role),
            ("secrets.user", &self.secrets.user),
            ("secrets.private_key", &self.secrets.private_key),
            ("secrets.account", &self.secrets.account),
        ];

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(VaultError::Configuration(format!(
                "{name} must not be empty"
            ))),
            None => Ok(()),
        }
    }
}
