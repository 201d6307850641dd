//! Token error types

use thiserror::Error;

/// Token operation result type
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors returned by claim assembly, signing and verification.
///
/// Every failure is handed back to the caller; nothing in this crate logs,
/// retries or aborts on error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Claim set rejected while building or before signing
    #[error("invalid claim set: {0}")]
    Validation(String),
    /// Key material unusable with the requested algorithm
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// Signing failed (unsupported algorithm, weak key, primitive failure)
    #[error("signing failed: {0}")]
    Signing(String),
    /// Token is not three base64url segments carrying JSON objects
    #[error("malformed token: {0}")]
    MalformedToken(String),
    /// Header algorithm does not match the verification key
    #[error("algorithm mismatch: key expects {expected}, token declares {found}")]
    AlgorithmMismatch {
        /// Algorithm of the verification key
        expected: String,
        /// Algorithm named in the token header
        found: String,
    },
    /// Algorithm is valid but excluded by the configured allow-list
    #[error("algorithm {0} is not allowed")]
    AlgorithmNotAllowed(String),
    /// Signature does not verify against the key
    #[error("invalid token signature")]
    SignatureInvalid,
    /// Token expiration has passed
    #[error("token expired at {expiration}")]
    Expired {
        /// `exp` claim, seconds since the epoch
        expiration: i64,
    },
    /// Token `nbf` lies in the future
    #[error("token not valid before {not_before}")]
    NotYetValid {
        /// `nbf` claim, seconds since the epoch
        not_before: i64,
    },
    /// A claim required by the validation options is absent
    #[error("missing required claim: {0}")]
    MissingClaim(String),
    /// A claim does not carry the value the caller expected
    #[error("claim {claim} mismatch: expected {expected}")]
    ClaimMismatch {
        /// Claim name
        claim: String,
        /// Expected value as supplied by the caller
        expected: String,
    },
    /// Background task failed before producing a result
    #[error("internal error: {0}")]
    Internal(String),
}

impl TokenError {
    /// Create a validation error
    #[inline]
    #[must_use]
    pub fn validation(msg: &str) -> Self {
        TokenError::Validation(msg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        TokenError::InvalidKey(msg.to_string())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(msg: &str) -> Self {
        TokenError::Signing(msg.to_string())
    }

    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(msg: &str) -> Self {
        TokenError::MalformedToken(msg.to_string())
    }

    /// Create a claim mismatch error
    #[inline]
    #[must_use]
    pub fn claim_mismatch(claim: &str, expected: &str) -> Self {
        TokenError::ClaimMismatch {
            claim: claim.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Create an internal error
    #[inline]
    #[must_use]
    pub fn internal(msg: &str) -> Self {
        TokenError::Internal(msg.to_string())
    }
}
