//! Token signing and verification
//!
//! `sign` turns a [`ClaimSet`] into `b64(header).b64(payload).b64(signature)`;
//! `verify` reverses it, checking in order: segment structure, header
//! algorithm against the key, signature, payload structure, then the time and
//! claim expectations from [`ValidationOptions`].

pub(crate) mod encoding;

use crate::{
    claims::ClaimSet,
    crypto::{sign_message, verify_message},
    error::{TokenError, TokenResult},
    keys::{SigningKey, VerificationKey},
    types::{DecodedHeader, Header, Token},
    validation::ValidationOptions,
};
use chrono::{DateTime, Utc};
use encoding::{base64_url_decode, base64_url_encode};
use serde_json::Value;
use std::collections::BTreeMap;

/// Stateless token codec. Cheap to clone, safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct TokenCodec {
    options: ValidationOptions,
}

impl TokenCodec {
    /// Codec with default validation options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec with custom validation options.
    #[must_use]
    pub fn with_options(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Validation options in effect.
    #[must_use]
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Sign `claims` with `key` at the current time.
    ///
    /// # Errors
    /// See [`TokenCodec::sign_at`].
    pub fn sign(&self, claims: &ClaimSet, key: &SigningKey) -> TokenResult<Token> {
        self.sign_at(claims, key, Utc::now())
    }

    /// Sign `claims` with `key`, treating `now` as the signing time.
    ///
    /// The output depends only on the claims and the key, so equal inputs
    /// yield byte-identical tokens.
    ///
    /// # Errors
    /// Returns `TokenError::Validation` if `exp` is not after `now`, and
    /// `TokenError::Signing` if the key's algorithm is not allowed, the key is
    /// too weak, or the signature primitive fails.
    #[tracing::instrument(level = "debug", skip_all, fields(alg = %key.algorithm()))]
    pub fn sign_at(
        &self,
        claims: &ClaimSet,
        key: &SigningKey,
        now: DateTime<Utc>,
    ) -> TokenResult<Token> {
        let algorithm = key.algorithm();
        if !self.options.allows(algorithm) {
            return Err(TokenError::Signing(format!(
                "algorithm {algorithm} is not allowed"
            )));
        }

        if claims.expiration() <= now.timestamp() {
            return Err(TokenError::validation("exp is not after the signing time"));
        }

        let header_json = serde_json::to_vec(&Header::new(algorithm))
            .map_err(|e| TokenError::Internal(format!("header serialization failed: {e}")))?;
        let payload_json = serde_json::to_vec(claims)
            .map_err(|e| TokenError::Internal(format!("claims serialization failed: {e}")))?;

        let mut compact = base64_url_encode(&header_json);
        compact.push('.');
        compact.push_str(&base64_url_encode(&payload_json));

        let signature = sign_message(key, compact.as_bytes())?;
        compact.push('.');
        compact.push_str(&base64_url_encode(&signature));

        tracing::trace!(len = compact.len(), "token signed");
        Ok(Token::new(compact))
    }

    /// Verify `token` with `key` against the current time.
    ///
    /// # Errors
    /// See [`TokenCodec::verify_at`].
    pub fn verify(&self, token: &str, key: &VerificationKey) -> TokenResult<ClaimSet> {
        self.verify_at(token, key, Utc::now())
    }

    /// Verify `token` with `key` against `now`, returning its claims.
    ///
    /// # Errors
    /// - `MalformedToken`: not three base64url segments, or header/payload
    ///   is not the expected JSON
    /// - `AlgorithmMismatch`: header `alg` differs from the key's algorithm
    /// - `AlgorithmNotAllowed`: key algorithm is off the allow-list
    /// - `SignatureInvalid`: signature does not verify
    /// - `Expired` / `NotYetValid`: time checks failed
    /// - `MissingClaim` / `ClaimMismatch`: claim expectations failed
    #[tracing::instrument(level = "debug", skip_all, fields(alg = %key.algorithm()))]
    pub fn verify_at(
        &self,
        token: &str,
        key: &VerificationKey,
        now: DateTime<Utc>,
    ) -> TokenResult<ClaimSet> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header_b64, payload_b64, signature_b64] = segments[..] else {
            return Err(TokenError::MalformedToken(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        let header_bytes = base64_url_decode(header_b64)
            .map_err(|_| TokenError::malformed("header is not valid base64url"))?;
        let payload_bytes = base64_url_decode(payload_b64)
            .map_err(|_| TokenError::malformed("payload is not valid base64url"))?;
        let signature = base64_url_decode(signature_b64)
            .map_err(|_| TokenError::malformed("signature is not valid base64url"))?;

        let header: DecodedHeader = serde_json::from_slice(&header_bytes)
            .map_err(|e| TokenError::MalformedToken(format!("invalid header: {e}")))?;

        let algorithm = key.algorithm();
        if header.alg != algorithm.as_str() {
            return Err(TokenError::AlgorithmMismatch {
                expected: algorithm.to_string(),
                found: header.alg,
            });
        }
        if !self.options.allows(algorithm) {
            return Err(TokenError::AlgorithmNotAllowed(algorithm.to_string()));
        }

        let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];
        verify_message(key, signing_input.as_bytes(), &signature)?;

        let payload: BTreeMap<String, Value> = serde_json::from_slice(&payload_bytes)
            .map_err(|e| TokenError::MalformedToken(format!("invalid payload: {e}")))?;
        let claims = ClaimSet::try_from(payload).map_err(|e| match e {
            TokenError::Validation(msg) => TokenError::MalformedToken(msg),
            other => other,
        })?;

        self.options.check_claims(&claims, now.timestamp())?;

        tracing::trace!("token verified");
        Ok(claims)
    }
}
