//! PEM and JWK key loading
//!
//! RSA private keys are accepted as PKCS#8 (`PRIVATE KEY`) or PKCS#1
//! (`RSA PRIVATE KEY`), RSA public keys as SPKI (`PUBLIC KEY`) or PKCS#1
//! (`RSA PUBLIC KEY`). EC keys must be PKCS#8 / SPKI. Public keys may also
//! be given as a JWK JSON object.

use anyhow::Context;
use std::{fs, path::Path};
use tokenmint_jwt::{
    p256, p384,
    rsa::{
        pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
        pkcs8::{DecodePrivateKey, DecodePublicKey},
        RsaPrivateKey, RsaPublicKey,
    },
    Algorithm, Jwk, SigningKey, VerificationKey,
};

const PEM_PREFIX: &str = "-----BEGIN";
const JSON_PREFIX: char = '{';

/// Resolve `source` to PEM text. Values starting with a PEM boundary are
/// taken as-is, anything else is read as a file path.
pub fn read_pem(source: &str) -> anyhow::Result<String> {
    let trimmed = source.trim_start();
    if trimmed.starts_with(PEM_PREFIX) {
        return Ok(trimmed.to_string());
    }

    let path = Path::new(source);
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read key file: {}", path.display()))
}

/// Parse a private key PEM for `algorithm`.
pub fn parse_signing_key(pem: &str, algorithm: Algorithm) -> anyhow::Result<SigningKey> {
    let key = match algorithm {
        Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => {
            let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
                .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
                .context("Failed to parse RSA private key. Expected PKCS#8 or PKCS#1 PEM")?;
            SigningKey::rsa(algorithm, private_key)?
        }
        Algorithm::ES256 => SigningKey::es256(
            p256::ecdsa::SigningKey::from_pkcs8_pem(pem)
                .context("Failed to parse P-256 private key. Expected PKCS#8 PEM")?,
        ),
        Algorithm::ES384 => SigningKey::es384(
            p384::ecdsa::SigningKey::from_pkcs8_pem(pem)
                .context("Failed to parse P-384 private key. Expected PKCS#8 PEM")?,
        ),
    };
    Ok(key)
}

/// Parse a public key PEM for `algorithm`.
pub fn parse_verification_key(pem: &str, algorithm: Algorithm) -> anyhow::Result<VerificationKey> {
    let key = match algorithm {
        Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => {
            let public_key = RsaPublicKey::from_public_key_pem(pem)
                .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
                .context("Failed to parse RSA public key. Expected SPKI or PKCS#1 PEM")?;
            VerificationKey::rsa(algorithm, public_key)?
        }
        Algorithm::ES256 => VerificationKey::es256(
            p256::ecdsa::VerifyingKey::from_public_key_pem(pem)
                .context("Failed to parse P-256 public key. Expected SPKI PEM")?,
        ),
        Algorithm::ES384 => VerificationKey::es384(
            p384::ecdsa::VerifyingKey::from_public_key_pem(pem)
                .context("Failed to parse P-384 public key. Expected SPKI PEM")?,
        ),
    };
    Ok(key)
}

/// Load the private key named by `source` (path or inline PEM).
pub fn load_signing_key(source: &str, algorithm: Algorithm) -> anyhow::Result<SigningKey> {
    let pem = read_pem(source)?;
    parse_signing_key(&pem, algorithm)
        .with_context(|| format!("Unusable {algorithm} private key"))
}

/// Parse a public JWK for `algorithm`.
///
/// A JWK without `alg` takes `algorithm`; one that names a different
/// algorithm is rejected.
pub fn parse_jwk(json: &str, algorithm: Algorithm) -> anyhow::Result<VerificationKey> {
    let mut jwk: Jwk = serde_json::from_str(json).context("Failed to parse JWK JSON")?;
    match jwk.alg.as_deref() {
        None => jwk.alg = Some(algorithm.as_str().to_string()),
        Some(declared) if declared != algorithm.as_str() => {
            anyhow::bail!("JWK declares {declared} but {algorithm} was requested")
        }
        Some(_) => {}
    }
    Ok(VerificationKey::from_jwk(&jwk)?)
}

/// Load the public key named by `source`: a path, inline PEM or inline JWK
/// JSON. Files holding a JWK are recognised by their leading `{`.
pub fn load_verification_key(
    source: &str,
    algorithm: Algorithm,
) -> anyhow::Result<VerificationKey> {
    let trimmed = source.trim_start();
    let text = if trimmed.starts_with(JSON_PREFIX) {
        trimmed.to_string()
    } else {
        read_pem(source)?
    };

    let key = if text.trim_start().starts_with(JSON_PREFIX) {
        parse_jwk(&text, algorithm)
    } else {
        parse_verification_key(&text, algorithm)
    };
    key.with_context(|| format!("Unusable {algorithm} public key"))
}
