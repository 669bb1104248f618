//! Parsed private key material
//!
//! Wraps the concrete key types behind one enum so the converter and the
//! fingerprint helpers can work without caring which algorithm the vault
//! secret holds.

use crate::error::{KeyError, Result};
use crate::fingerprint::spki_fingerprint;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::der::asn1::ObjectIdentifier;
use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey, EncodePublicKey, PrivateKeyInfo};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use zeroize::Zeroizing;

/// `rsaEncryption` (RFC 8017)
pub const RSA_ENCRYPTION_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// `id-ecPublicKey` (RFC 5480)
pub const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// `secp256r1` named curve (RFC 5480)
pub const SECP256R1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

/// `secp384r1` named curve (RFC 5480)
pub const SECP384R1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

/// `id-Ed25519` (RFC 8410)
pub const ED25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

/// Private key algorithm of a decoded key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// RSA (any modulus size the `rsa` crate accepts)
    Rsa,
    /// ECDSA over NIST P-256
    EcP256,
    /// ECDSA over NIST P-384
    EcP384,
    /// Edwards-curve Ed25519
    Ed25519,
    /// Any other algorithm; the key is carried through without decoding
    Other(ObjectIdentifier),
}

impl KeyAlgorithm {
    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::EcP256 => "EC P-256",
            Self::EcP384 => "EC P-384",
            Self::Ed25519 => "Ed25519",
            Self::Other(_) => "other",
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(oid) => write!(f, "OID {oid}"),
            known => f.write_str(known.name()),
        }
    }
}

/// A decoded, unencrypted private key
///
/// The decoded key types zeroize themselves on drop.
pub enum PrivateKeyMaterial {
    /// RSA private key
    Rsa(RsaPrivateKey),
    /// P-256 secret scalar
    EcP256(p256::SecretKey),
    /// P-384 secret scalar
    EcP384(p384::SecretKey),
    /// Ed25519 signing key
    Ed25519(ed25519_dalek::SigningKey),
    /// Structurally valid PKCS#8 for an algorithm without a decoder here
    Opaque {
        /// Algorithm OID from the `PrivateKeyInfo`
        oid: ObjectIdentifier,
        /// The validated `PrivateKeyInfo` DER, unchanged
        der: Zeroizing<Vec<u8>>,
    },
}

impl PrivateKeyMaterial {
    /// Decode a PKCS#8 `PrivateKeyInfo` in DER form
    ///
    /// RSA, P-256, P-384 and Ed25519 keys are fully decoded. Any other
    /// algorithm is kept as the original DER once its `PrivateKeyInfo`
    /// structure has been validated.
    ///
    /// # Errors
    /// Returns [`KeyError::KeyParse`] for malformed DER or a key that does
    /// not decode under its declared algorithm.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let info = PrivateKeyInfo::try_from(der)
            .map_err(|e| KeyError::key_parse(format!("invalid PKCS#8 structure: {e}")))?;

        let oid = info.algorithm.oid;
        if oid == RSA_ENCRYPTION_OID {
            RsaPrivateKey::from_pkcs8_der(der)
                .map(Self::Rsa)
                .map_err(|e| KeyError::key_parse(format!("invalid RSA private key: {e}")))
        } else if oid == ED25519_OID {
            ed25519_dalek::SigningKey::from_pkcs8_der(der)
                .map(Self::Ed25519)
                .map_err(|e| KeyError::key_parse(format!("invalid Ed25519 private key: {e}")))
        } else if oid == EC_PUBLIC_KEY_OID {
            let curve = info.algorithm.parameters_oid().map_err(|e| {
                KeyError::key_parse(format!("EC private key without named curve: {e}"))
            })?;
            if curve == SECP256R1_OID {
                p256::SecretKey::from_pkcs8_der(der)
                    .map(Self::EcP256)
                    .map_err(|e| KeyError::key_parse(format!("invalid P-256 private key: {e}")))
            } else if curve == SECP384R1_OID {
                p384::SecretKey::from_pkcs8_der(der)
                    .map(Self::EcP384)
                    .map_err(|e| KeyError::key_parse(format!("invalid P-384 private key: {e}")))
            } else {
                Ok(Self::opaque(oid, der))
            }
        } else {
            Ok(Self::opaque(oid, der))
        }
    }

    fn opaque(oid: ObjectIdentifier, der: &[u8]) -> Self {
        Self::Opaque {
            oid,
            der: Zeroizing::new(der.to_vec()),
        }
    }

    /// Decode a PKCS#1 `RSAPrivateKey` in DER form
    ///
    /// # Errors
    /// Returns [`KeyError::KeyParse`] if the bytes are not a valid RSA key.
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self> {
        RsaPrivateKey::from_pkcs1_der(der)
            .map(Self::Rsa)
            .map_err(|e| KeyError::key_parse(format!("invalid PKCS#1 RSA private key: {e}")))
    }

    /// Decode a SEC1 `ECPrivateKey` in DER form (P-256 or P-384)
    ///
    /// # Errors
    /// Returns [`KeyError::KeyParse`] if the bytes are not a valid key on
    /// either curve.
    pub fn from_sec1_der(der: &[u8]) -> Result<Self> {
        if let Ok(key) = p256::SecretKey::from_sec1_der(der) {
            return Ok(Self::EcP256(key));
        }
        p384::SecretKey::from_sec1_der(der)
            .map(Self::EcP384)
            .map_err(|e| KeyError::key_parse(format!("invalid SEC1 EC private key: {e}")))
    }

    /// Algorithm of this key
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Rsa(_) => KeyAlgorithm::Rsa,
            Self::EcP256(_) => KeyAlgorithm::EcP256,
            Self::EcP384(_) => KeyAlgorithm::EcP384,
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
            Self::Opaque { oid, .. } => KeyAlgorithm::Other(*oid),
        }
    }

    /// Serialize as unencrypted PKCS#8 DER
    ///
    /// # Errors
    /// Returns [`KeyError::KeyParse`] if the key cannot be re-encoded.
    pub fn to_pkcs8_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let document = match self {
            Self::Rsa(key) => key.to_pkcs8_der(),
            Self::EcP256(key) => key.to_pkcs8_der(),
            Self::EcP384(key) => key.to_pkcs8_der(),
            Self::Ed25519(key) => key.to_pkcs8_der(),
            Self::Opaque { der, .. } => return Ok(der.clone()),
        }
        .map_err(|e| KeyError::key_parse(format!("PKCS#8 encoding failed: {e}")))?;

        Ok(Zeroizing::new(document.as_bytes().to_vec()))
    }

    /// SubjectPublicKeyInfo DER of the matching public key
    ///
    /// # Errors
    /// Returns [`KeyError::KeyParse`] if the public key cannot be encoded or
    /// the algorithm has no decoder here.
    pub fn public_key_der(&self) -> Result<Vec<u8>> {
        let document = match self {
            Self::Rsa(key) => RsaPublicKey::from(key).to_public_key_der(),
            Self::EcP256(key) => key.public_key().to_public_key_der(),
            Self::EcP384(key) => key.public_key().to_public_key_der(),
            Self::Ed25519(key) => key.verifying_key().to_public_key_der(),
            Self::Opaque { oid, .. } => {
                return Err(KeyError::key_parse(format!(
                    "cannot derive public key for algorithm {oid}"
                )))
            }
        }
        .map_err(|e| KeyError::key_parse(format!("SPKI encoding failed: {e}")))?;

        Ok(document.as_bytes().to_vec())
    }

    /// `SHA256:<base64>` fingerprint of the public key
    ///
    /// # Errors
    /// Returns [`KeyError::KeyParse`] if the public key cannot be encoded.
    pub fn fingerprint(&self) -> Result<String> {
        Ok(spki_fingerprint(&self.public_key_der()?))
    }
}

impl fmt::Debug for PrivateKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyMaterial")
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}
