//! Signature primitives over the JWS signing input

mod ecdsa;
mod rsa;

use crate::{
    algorithms::Algorithm,
    error::{TokenError, TokenResult},
    keys::{PrivateMaterial, PublicMaterial, SigningKey, VerificationKey},
};

/// Sign `message` with the key's algorithm.
pub(crate) fn sign_message(key: &SigningKey, message: &[u8]) -> TokenResult<Vec<u8>> {
    match (key.algorithm(), key.material()) {
        (alg, PrivateMaterial::Rsa(private_key)) if alg.is_rsa() => {
            rsa::sign(alg, private_key, message)
        }
        (Algorithm::ES256, PrivateMaterial::P256(private_key)) => {
            ecdsa::sign_es256(private_key, message)
        }
        (Algorithm::ES384, PrivateMaterial::P384(private_key)) => {
            ecdsa::sign_es384(private_key, message)
        }
        (alg, _) => Err(TokenError::Signing(format!(
            "{alg} is not supported by this key type"
        ))),
    }
}

/// Check `signature` over `message` with the key's algorithm.
///
/// Every verification failure, including undecodable signatures, collapses
/// into `TokenError::SignatureInvalid`.
pub(crate) fn verify_message(
    key: &VerificationKey,
    message: &[u8],
    signature: &[u8],
) -> TokenResult<()> {
    match (key.algorithm(), key.material()) {
        (alg, PublicMaterial::Rsa(public_key)) if alg.is_rsa() => {
            rsa::verify(alg, public_key, message, signature)
        }
        (Algorithm::ES256, PublicMaterial::P256(public_key)) => {
            ecdsa::verify_es256(public_key, message, signature)
        }
        (Algorithm::ES384, PublicMaterial::P384(public_key)) => {
            ecdsa::verify_es384(public_key, message, signature)
        }
        (alg, _) => Err(TokenError::InvalidKey(format!(
            "{alg} is not supported by this key type"
        ))),
    }
}
