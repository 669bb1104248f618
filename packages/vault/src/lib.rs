//! # Budgetkey Vault
//!
//! Glue between a secrets store and the warehouse client: fetch the service
//! user's secrets from an explicitly constructed [`SecretSource`], convert
//! the private key with `budgetkey_key`, and hand back [`ConnectParams`].
//!
//! ```rust,ignore
//! use budgetkey_vault::{resolve_connect_params, FileSecretSource, WarehouseSettings};
//!
//! let source = FileSecretSource::new("/run/secrets");
//! let params = resolve_connect_params(&source, &WarehouseSettings::default()).await?;
//! client.connect(&params.account, &params.user, &params.private_key)?;
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod connect;
pub mod error;
pub mod source;

pub use config::{SecretNames, WarehouseSettings};
pub use connect::{resolve_connect_params, ConnectParams, KeyPairCredentials};
pub use error::{VaultError, VaultResult};
pub use source::{FileSecretSource, InMemorySecretSource, SecretSource};
