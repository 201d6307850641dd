//! Shared key fixtures. RSA generation is slow, so each test binary makes one
//! 2048-bit key and reuses it under every RS* tag.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use tokenmint_jwt::{
    generate_keypair,
    rsa::{rand_core::OsRng, RsaPrivateKey},
    Algorithm, SigningKey, VerificationKey,
};

static RSA_PRIVATE_KEY: Lazy<RsaPrivateKey> = Lazy::new(|| {
    RsaPrivateKey::new(&mut OsRng, 2048).expect("RSA-2048 key generation should succeed")
});

static ES256_KEYS: Lazy<(SigningKey, VerificationKey)> =
    Lazy::new(|| generate_keypair(Algorithm::ES256).expect("ES256 key generation"));

static ES384_KEYS: Lazy<(SigningKey, VerificationKey)> =
    Lazy::new(|| generate_keypair(Algorithm::ES384).expect("ES384 key generation"));

/// Signing and verification keys for `algorithm`.
pub fn keypair(algorithm: Algorithm) -> (SigningKey, VerificationKey) {
    match algorithm {
        Algorithm::ES256 => ES256_KEYS.clone(),
        Algorithm::ES384 => ES384_KEYS.clone(),
        rsa_alg => {
            let signing_key = SigningKey::rsa(rsa_alg, RSA_PRIVATE_KEY.clone())
                .expect("RSA algorithm accepts an RSA key");
            let verification_key = signing_key.verification_key();
            (signing_key, verification_key)
        }
    }
}

/// Raw RSA key behind the RS* fixtures.
pub fn rsa_private_key() -> RsaPrivateKey {
    RSA_PRIVATE_KEY.clone()
}

/// Fixed reference instant: 2023-11-14T22:13:20Z.
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}
