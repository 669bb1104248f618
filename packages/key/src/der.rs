//! PEM to PKCS#8 DER conversion
//!
//! Warehouse clients that authenticate with a key pair take the private key
//! as unencrypted PKCS#8 DER. [`pem_to_der`] parses normalized PEM bytes and
//! re-serializes the key in that form.
//!
//! The PEM reader is lenient about body layout: any line width, including a
//! single unwrapped line, is accepted as long as the base64 decodes.

use crate::error::{KeyError, Result};
use crate::material::PrivateKeyMaterial;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use budgetkey_common::{log_crypto_safe, LoggingTransformer};
use once_cell::sync::Lazy;
use regex::Regex;
use zeroize::Zeroizing;

/// PEM label of an unencrypted PKCS#8 key
pub const PKCS8_LABEL: &str = "PRIVATE KEY";

/// PEM label of an encrypted PKCS#8 key
pub const ENCRYPTED_PKCS8_LABEL: &str = "ENCRYPTED PRIVATE KEY";

/// PEM label of a PKCS#1 RSA key
pub const RSA_PKCS1_LABEL: &str = "RSA PRIVATE KEY";

/// PEM label of a SEC1 EC key
pub const EC_SEC1_LABEL: &str = "EC PRIVATE KEY";

static PEM_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)-----BEGIN ([A-Z0-9 ]+)-----(.*?)-----END ([A-Z0-9 ]+)-----")
        .expect("PEM block pattern is a valid regex")
});

/// Label and decoded body of the first PEM block in `text`
fn decode_pem_block(text: &str) -> Result<(String, Zeroizing<Vec<u8>>)> {
    let captures = PEM_BLOCK
        .captures(text)
        .ok_or_else(|| KeyError::key_parse("invalid PEM encoding: no BEGIN/END block"))?;

    let (begin, body, end) = match (captures.get(1), captures.get(2), captures.get(3)) {
        (Some(begin), Some(body), Some(end)) => (begin.as_str(), body.as_str(), end.as_str()),
        _ => return Err(KeyError::key_parse("invalid PEM encoding: incomplete block")),
    };
    if begin != end {
        return Err(KeyError::key_parse(format!(
            "invalid PEM encoding: BEGIN {begin} closed by END {end}"
        )));
    }

    // RFC 1421 headers only appear on legacy encrypted keys
    if body.lines().any(|line| line.contains(':')) {
        return Err(KeyError::key_parse(
            "private key is encrypted; an unencrypted key is required",
        ));
    }

    let base64_body: Zeroizing<String> = Zeroizing::new(
        body.chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect(),
    );
    let der = STANDARD.decode(base64_body.as_bytes()).map_err(|e| {
        log_crypto_safe!(WARN, "PEM base64 decode", e);
        KeyError::key_parse(format!("invalid PEM encoding: {e}"))
    })?;

    Ok((begin.to_string(), Zeroizing::new(der)))
}

/// Decode PEM bytes into private key material
///
/// # Errors
/// Returns [`KeyError::KeyParse`] when the bytes are not PEM, the key is
/// encrypted, or the key is corrupted.
pub fn decode_private_key(pem_bytes: &[u8]) -> Result<PrivateKeyMaterial> {
    let text = std::str::from_utf8(pem_bytes)
        .map_err(|e| KeyError::key_parse(format!("PEM text is not UTF-8: {e}")))?;
    let (label, der) = decode_pem_block(text)?;

    match label.as_str() {
        PKCS8_LABEL => PrivateKeyMaterial::from_pkcs8_der(&der),
        RSA_PKCS1_LABEL => PrivateKeyMaterial::from_pkcs1_der(&der),
        EC_SEC1_LABEL => PrivateKeyMaterial::from_sec1_der(&der),
        ENCRYPTED_PKCS8_LABEL => Err(KeyError::key_parse(
            "private key is encrypted; an unencrypted key is required",
        )),
        other => Err(KeyError::key_parse(format!(
            "unexpected PEM label: {other}"
        ))),
    }
}

/// Convert normalized PEM bytes into unencrypted PKCS#8 DER bytes
///
/// # Errors
/// Returns [`KeyError::KeyParse`] if the PEM does not hold a valid,
/// unencrypted private key.
pub fn pem_to_der(pem_bytes: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let key = decode_private_key(pem_bytes)?;
    let der = key.to_pkcs8_der()?;
    LoggingTransformer::log_key_conversion(key.algorithm().name(), der.len());
    Ok(der)
}
