//! RSASSA-PKCS1-v1_5 (RS256, RS384, RS512)

use crate::{
    algorithms::Algorithm,
    error::{TokenError, TokenResult},
    keys::RSA_KEY_BITS,
};
use rsa::{traits::PublicKeyParts, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Padding scheme and message digest for an RSA algorithm.
fn scheme_and_digest(algorithm: Algorithm, message: &[u8]) -> Option<(Pkcs1v15Sign, Vec<u8>)> {
    match algorithm {
        Algorithm::RS256 => Some((
            Pkcs1v15Sign::new::<Sha256>(),
            Sha256::digest(message).to_vec(),
        )),
        Algorithm::RS384 => Some((
            Pkcs1v15Sign::new::<Sha384>(),
            Sha384::digest(message).to_vec(),
        )),
        Algorithm::RS512 => Some((
            Pkcs1v15Sign::new::<Sha512>(),
            Sha512::digest(message).to_vec(),
        )),
        Algorithm::ES256 | Algorithm::ES384 => None,
    }
}

pub(super) fn sign(
    algorithm: Algorithm,
    private_key: &RsaPrivateKey,
    message: &[u8],
) -> TokenResult<Vec<u8>> {
    let bits = private_key.size() * 8;
    if bits < RSA_KEY_BITS {
        return Err(TokenError::Signing(format!(
            "RSA modulus of {bits} bits is below the {RSA_KEY_BITS} bit minimum"
        )));
    }

    let (scheme, hashed) = scheme_and_digest(algorithm, message)
        .ok_or_else(|| TokenError::Signing(format!("{algorithm} is not an RSA algorithm")))?;

    // Blinded private-key operation; PKCS#1 v1.5 output stays deterministic.
    private_key
        .sign_with_rng(&mut rsa::rand_core::OsRng, scheme, &hashed)
        .map_err(|e| TokenError::Signing(format!("RSA signing failed: {e}")))
}

pub(super) fn verify(
    algorithm: Algorithm,
    public_key: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> TokenResult<()> {
    let (scheme, hashed) = scheme_and_digest(algorithm, message)
        .ok_or_else(|| TokenError::InvalidKey(format!("{algorithm} is not an RSA algorithm")))?;

    public_key
        .verify(scheme, &hashed, signature)
        .map_err(|_| TokenError::SignatureInvalid)
}
