//! Public key fingerprints
//!
//! Uses the `SHA256:<base64>` form shown by the warehouse for a registered
//! key-pair public key, so a logged fingerprint can be compared directly.

use crate::error::Result;
use crate::material::PrivateKeyMaterial;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

/// Prefix of every fingerprint string
pub const FINGERPRINT_PREFIX: &str = "SHA256:";

/// Fingerprint of a SubjectPublicKeyInfo DER encoding
pub fn spki_fingerprint(spki_der: &[u8]) -> String {
    let digest = Sha256::digest(spki_der);
    format!("{FINGERPRINT_PREFIX}{}", STANDARD.encode(digest))
}

/// Fingerprint of the public half of a PKCS#8 DER private key
///
/// # Errors
/// Returns [`crate::KeyError::KeyParse`] if the DER is not a supported key.
pub fn public_key_fingerprint(pkcs8_der: &[u8]) -> Result<String> {
    PrivateKeyMaterial::from_pkcs8_der(pkcs8_der)?.fingerprint()
}
