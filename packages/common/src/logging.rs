//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with secure handling of sensitive data
//! and proper integration with the standard log crate.

use log::{debug, error, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging entry points shared by the budgetkey crates
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above (recommended for production)
    /// - `RUST_LOG=budgetkey_vault=debug,budgetkey_key=info` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; later calls are ignored.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a secret lookup without revealing the secret name or value
    ///
    /// Secret names are hashed using SHA-256 for secure logging
    pub fn log_secret_access(source: &str, secret_name: &str, success: bool) {
        let name_hash = Self::secure_hash(secret_name);
        if success {
            debug!("Secret lookup succeeded: {source} (name_hash: {name_hash})");
        } else {
            warn!("Secret lookup failed: {source} (name_hash: {name_hash})");
        }
    }

    /// Log a completed key conversion with non-secret metadata only
    pub fn log_key_conversion(algorithm: &str, der_len: usize) {
        debug!("Private key converted to PKCS#8 DER: {algorithm} ({der_len} bytes)");
    }

    /// Log which public key an authentication attempt is going to use
    pub fn log_auth_key(account: &str, fingerprint: &str) {
        let account_hash = Self::secure_hash(account);
        info!("Key-pair credentials ready (account_hash: {account_hash}, key: {fingerprint})");
    }

    /// Log a rejected private key by failure kind, never by content
    pub fn log_key_rejected(operation: &str, kind: &str) {
        error!("Key material rejected: {operation} (kind: {kind})");
    }

    /// SHA-256 prefix of a sensitive identifier, suitable for logs
    ///
    /// Returns `#` followed by the first 12 hex characters of the digest.
    pub fn secure_hash(value: &str) -> String {
        let hash = Sha256::digest(value.as_bytes());
        let hex_hash = format!("{hash:x}");
        format!("#{}", &hex_hash[..12])
    }
}

/// Macro for secure cryptographic operation logging
#[macro_export]
macro_rules! log_crypto_safe {
    (WARN, $operation:expr, $error:expr) => {
        log::warn!(
            "Cryptographic operation warning: {} (error_type: {})",
            $operation,
            std::any::type_name_of_val(&$error)
        );
    };
}
