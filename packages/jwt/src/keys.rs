//! Signing and verification keys
//!
//! Keys arrive already parsed (PEM/DER decoding belongs to the caller) and
//! carry the algorithm they are used with. Key material sits behind an `Arc`
//! so keys are cheap to clone across threads.

use crate::{
    algorithms::Algorithm,
    error::{TokenError, TokenResult},
};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::{fmt, sync::Arc};

/// Recommended RSA modulus size, also the minimum accepted for signing.
pub const RSA_KEY_BITS: usize = 2048;

pub(crate) enum PrivateMaterial {
    Rsa(RsaPrivateKey),
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
}

#[derive(Clone)]
pub(crate) enum PublicMaterial {
    Rsa(RsaPublicKey),
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
}

/// Private key plus the algorithm it signs with. Never serialized.
#[derive(Clone)]
pub struct SigningKey {
    algorithm: Algorithm,
    material: Arc<PrivateMaterial>,
}

impl SigningKey {
    /// RSA private key for one of the `RS*` algorithms.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidKey` if `algorithm` is not an RSA algorithm.
    pub fn rsa(algorithm: Algorithm, key: RsaPrivateKey) -> TokenResult<Self> {
        if !algorithm.is_rsa() {
            return Err(TokenError::InvalidKey(format!(
                "{algorithm} cannot be used with an RSA key"
            )));
        }
        Ok(Self {
            algorithm,
            material: Arc::new(PrivateMaterial::Rsa(key)),
        })
    }

    /// RSA private key for RS256.
    #[must_use]
    pub fn rs256(key: RsaPrivateKey) -> Self {
        Self {
            algorithm: Algorithm::RS256,
            material: Arc::new(PrivateMaterial::Rsa(key)),
        }
    }

    /// P-256 private key for ES256.
    #[must_use]
    pub fn es256(key: p256::ecdsa::SigningKey) -> Self {
        Self {
            algorithm: Algorithm::ES256,
            material: Arc::new(PrivateMaterial::P256(key)),
        }
    }

    /// P-384 private key for ES384.
    #[must_use]
    pub fn es384(key: p384::ecdsa::SigningKey) -> Self {
        Self {
            algorithm: Algorithm::ES384,
            material: Arc::new(PrivateMaterial::P384(key)),
        }
    }

    /// Algorithm this key signs with.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Public half of this key, tagged with the same algorithm.
    #[must_use]
    pub fn verification_key(&self) -> VerificationKey {
        let material = match self.material.as_ref() {
            PrivateMaterial::Rsa(key) => PublicMaterial::Rsa(RsaPublicKey::from(key)),
            PrivateMaterial::P256(key) => {
                PublicMaterial::P256(p256::ecdsa::VerifyingKey::from(key))
            }
            PrivateMaterial::P384(key) => {
                PublicMaterial::P384(p384::ecdsa::VerifyingKey::from(key))
            }
        };
        VerificationKey {
            algorithm: self.algorithm,
            material: Arc::new(material),
        }
    }

    pub(crate) fn material(&self) -> &PrivateMaterial {
        &self.material
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Public key plus the algorithm it verifies. Read-only and shareable.
#[derive(Clone)]
pub struct VerificationKey {
    algorithm: Algorithm,
    material: Arc<PublicMaterial>,
}

impl VerificationKey {
    /// RSA public key for one of the `RS*` algorithms.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidKey` if `algorithm` is not an RSA algorithm.
    pub fn rsa(algorithm: Algorithm, key: RsaPublicKey) -> TokenResult<Self> {
        if !algorithm.is_rsa() {
            return Err(TokenError::InvalidKey(format!(
                "{algorithm} cannot be used with an RSA key"
            )));
        }
        Ok(Self {
            algorithm,
            material: Arc::new(PublicMaterial::Rsa(key)),
        })
    }

    /// RSA public key for RS256.
    #[must_use]
    pub fn rs256(key: RsaPublicKey) -> Self {
        Self {
            algorithm: Algorithm::RS256,
            material: Arc::new(PublicMaterial::Rsa(key)),
        }
    }

    /// P-256 public key for ES256.
    #[must_use]
    pub fn es256(key: p256::ecdsa::VerifyingKey) -> Self {
        Self {
            algorithm: Algorithm::ES256,
            material: Arc::new(PublicMaterial::P256(key)),
        }
    }

    /// P-384 public key for ES384.
    #[must_use]
    pub fn es384(key: p384::ecdsa::VerifyingKey) -> Self {
        Self {
            algorithm: Algorithm::ES384,
            material: Arc::new(PublicMaterial::P384(key)),
        }
    }

    /// Algorithm this key verifies.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub(crate) fn material(&self) -> &PublicMaterial {
        &self.material
    }
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationKey")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Generate a fresh key pair for `algorithm`.
///
/// RSA keys use a [`RSA_KEY_BITS`] modulus. Intended for tests and demos;
/// production keys come from a key store.
///
/// # Errors
/// Returns `TokenError::InvalidKey` if RSA key generation fails.
pub fn generate_keypair(algorithm: Algorithm) -> TokenResult<(SigningKey, VerificationKey)> {
    let signing_key = match algorithm {
        Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => {
            let mut rng = rsa::rand_core::OsRng;
            let key = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)
                .map_err(|e| TokenError::InvalidKey(format!("RSA key generation failed: {e}")))?;
            SigningKey::rsa(algorithm, key)?
        }
        Algorithm::ES256 => {
            let mut rng = p256::elliptic_curve::rand_core::OsRng;
            SigningKey::es256(p256::ecdsa::SigningKey::random(&mut rng))
        }
        Algorithm::ES384 => {
            let mut rng = p384::elliptic_curve::rand_core::OsRng;
            SigningKey::es384(p384::ecdsa::SigningKey::random(&mut rng))
        }
    };
    let verification_key = signing_key.verification_key();
    Ok((signing_key, verification_key))
}
