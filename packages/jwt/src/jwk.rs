//! JSON Web Key (RFC 7517) form of verification keys
//!
//! Only public keys are exported: RSA keys as `kty: "RSA"` with `n` and `e`,
//! EC keys as `kty: "EC"` with `crv`, `x` and `y`. Every binary member is
//! unpadded base64url.

use crate::{
    algorithms::Algorithm,
    codec::encoding::{base64_url_decode, base64_url_encode},
    error::{TokenError, TokenResult},
    keys::{PublicMaterial, VerificationKey},
};
use rsa::{traits::PublicKeyParts, BigUint, RsaPublicKey};
use serde::{Deserialize, Serialize};

const P256_FIELD_BYTES: usize = 32;
const P384_FIELD_BYTES: usize = 48;

/// A JSON Web Key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type ("RSA" or "EC")
    pub kty: String,

    /// Key ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,

    /// Algorithm (e.g. "RS256", "ES256")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,

    /// Public key use (e.g. "sig")
    #[serde(default, rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,

    // RSA key components
    /// RSA modulus (base64url)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,

    /// RSA public exponent (base64url)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,

    // EC key components
    /// EC curve name ("P-256" or "P-384")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,

    /// EC x coordinate (base64url)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,

    /// EC y coordinate (base64url)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

impl VerificationKey {
    /// Export as a JWK with `alg` set to this key's algorithm and `use` set
    /// to `sig`.
    #[must_use]
    pub fn to_jwk(&self) -> Jwk {
        let mut jwk = match self.material() {
            PublicMaterial::Rsa(key) => Jwk {
                kty: "RSA".to_string(),
                n: Some(base64_url_encode(&key.n().to_bytes_be())),
                e: Some(base64_url_encode(&key.e().to_bytes_be())),
                ..Jwk::default()
            },
            PublicMaterial::P256(key) => {
                let point = key.to_encoded_point(false);
                ec_jwk("P-256", point.x(), point.y())
            }
            PublicMaterial::P384(key) => {
                let point = key.to_encoded_point(false);
                ec_jwk("P-384", point.x(), point.y())
            }
        };
        jwk.alg = Some(self.algorithm().as_str().to_string());
        jwk.use_ = Some("sig".to_string());
        jwk
    }

    /// Import a public JWK.
    ///
    /// The algorithm comes from `alg` when present; otherwise RSA keys
    /// default to RS256 and EC keys follow their curve (P-256 is ES256,
    /// P-384 is ES384).
    ///
    /// # Errors
    /// Returns `TokenError::InvalidKey` for an unsupported `kty` or `crv`, a
    /// missing or undecodable member, coordinates of the wrong length, a
    /// point not on the curve, or an `alg` that does not fit the key type.
    pub fn from_jwk(jwk: &Jwk) -> TokenResult<Self> {
        let declared = jwk
            .alg
            .as_deref()
            .map(|alg| {
                alg.parse::<Algorithm>()
                    .map_err(|e| TokenError::InvalidKey(e.to_string()))
            })
            .transpose()?;

        let key = match jwk.kty.as_str() {
            "RSA" => {
                let n = decode_member(jwk.n.as_deref(), "n")?;
                let e = decode_member(jwk.e.as_deref(), "e")?;
                let public_key =
                    RsaPublicKey::new(BigUint::from_bytes_be(&n), BigUint::from_bytes_be(&e))
                        .map_err(|e| TokenError::InvalidKey(format!("RSA JWK rejected: {e}")))?;
                return VerificationKey::rsa(declared.unwrap_or(Algorithm::RS256), public_key);
            }
            "EC" => match jwk.crv.as_deref() {
                Some("P-256") => {
                    let point = sec1_point(jwk, P256_FIELD_BYTES)?;
                    let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(&point)
                        .map_err(|_| TokenError::invalid_key("point is not on P-256"))?;
                    VerificationKey::es256(key)
                }
                Some("P-384") => {
                    let point = sec1_point(jwk, P384_FIELD_BYTES)?;
                    let key = p384::ecdsa::VerifyingKey::from_sec1_bytes(&point)
                        .map_err(|_| TokenError::invalid_key("point is not on P-384"))?;
                    VerificationKey::es384(key)
                }
                Some(other) => {
                    return Err(TokenError::InvalidKey(format!(
                        "unsupported EC curve: {other}"
                    )))
                }
                None => return Err(TokenError::invalid_key("EC JWK is missing crv")),
            },
            other => {
                return Err(TokenError::InvalidKey(format!(
                    "unsupported JWK key type: {other}"
                )))
            }
        };

        match declared {
            Some(algorithm) if algorithm != key.algorithm() => Err(TokenError::InvalidKey(
                format!("{algorithm} cannot be used with a {} key", key.algorithm()),
            )),
            _ => Ok(key),
        }
    }
}

fn ec_jwk<B: AsRef<[u8]>>(curve: &str, x: Option<B>, y: Option<B>) -> Jwk {
    // uncompressed points always carry both coordinates
    Jwk {
        kty: "EC".to_string(),
        crv: Some(curve.to_string()),
        x: x.map(|x| base64_url_encode(x.as_ref())),
        y: y.map(|y| base64_url_encode(y.as_ref())),
        ..Jwk::default()
    }
}

fn decode_member(value: Option<&str>, name: &str) -> TokenResult<Vec<u8>> {
    let value = value.ok_or_else(|| TokenError::InvalidKey(format!("JWK is missing {name}")))?;
    base64_url_decode(value).map_err(|e| TokenError::InvalidKey(format!("invalid JWK {name}: {e}")))
}

/// Uncompressed SEC1 point `0x04 || x || y`.
fn sec1_point(jwk: &Jwk, field_bytes: usize) -> TokenResult<Vec<u8>> {
    let x = decode_member(jwk.x.as_deref(), "x")?;
    let y = decode_member(jwk.y.as_deref(), "y")?;
    if x.len() != field_bytes || y.len() != field_bytes {
        return Err(TokenError::InvalidKey(format!(
            "EC coordinates must be {field_bytes} bytes each"
        )));
    }

    let mut point = Vec::with_capacity(1 + 2 * field_bytes);
    point.push(0x04);
    point.extend_from_slice(&x);
    point.extend_from_slice(&y);
    Ok(point)
}
