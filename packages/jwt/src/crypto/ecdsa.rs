//! ECDSA (ES256, ES384)
//!
//! Signatures use RFC 6979 deterministic nonces and the fixed-width `r || s`
//! encoding from RFC 7518 section 3.4, not DER.

use crate::error::{TokenError, TokenResult};
use p256::ecdsa::signature::{Signer, Verifier};

pub(super) fn sign_es256(key: &p256::ecdsa::SigningKey, message: &[u8]) -> TokenResult<Vec<u8>> {
    let signature: p256::ecdsa::Signature = key
        .try_sign(message)
        .map_err(|e| TokenError::Signing(format!("ES256 signing failed: {e}")))?;
    Ok(signature.to_bytes().to_vec())
}

pub(super) fn verify_es256(
    key: &p256::ecdsa::VerifyingKey,
    message: &[u8],
    signature: &[u8],
) -> TokenResult<()> {
    let signature =
        p256::ecdsa::Signature::from_slice(signature).map_err(|_| TokenError::SignatureInvalid)?;
    key.verify(message, &signature)
        .map_err(|_| TokenError::SignatureInvalid)
}

pub(super) fn sign_es384(key: &p384::ecdsa::SigningKey, message: &[u8]) -> TokenResult<Vec<u8>> {
    let signature: p384::ecdsa::Signature = key
        .try_sign(message)
        .map_err(|e| TokenError::Signing(format!("ES384 signing failed: {e}")))?;
    Ok(signature.to_bytes().to_vec())
}

pub(super) fn verify_es384(
    key: &p384::ecdsa::VerifyingKey,
    message: &[u8],
    signature: &[u8],
) -> TokenResult<()> {
    let signature =
        p384::ecdsa::Signature::from_slice(signature).map_err(|_| TokenError::SignatureInvalid)?;
    key.verify(message, &signature)
        .map_err(|_| TokenError::SignatureInvalid)
}
