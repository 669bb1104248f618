//! Common infrastructure for the budgetkey crates
//!
//! This crate provides the logging setup shared by the key and vault crates:
//! - `env_logger` initialisation for binaries and tests
//! - Secret-safe log helpers that never print secret values
//! - Macros for logging cryptographic failures by error type only

#![forbid(unsafe_code)]

pub mod logging;

pub use logging::LoggingTransformer;
