//! Verification policy.

use crate::{
    algorithms::Algorithm,
    claims::ClaimSet,
    error::{TokenError, TokenResult},
};
use serde::{Deserialize, Serialize};

/// Options applied by [`TokenCodec`](crate::TokenCodec) when verifying.
///
/// Deserializable with per-field defaults, so a config file only needs to
/// name the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Clock skew tolerated on `exp` and `nbf`, in seconds.
    pub leeway_seconds: u32,
    /// Reject tokens at or past `exp`.
    pub validate_exp: bool,
    /// Reject tokens before `nbf`.
    pub validate_nbf: bool,
    /// Algorithms accepted for both signing and verification.
    pub allowed_algorithms: Vec<Algorithm>,
    /// Claims that must be present.
    pub required_claims: Vec<String>,
    /// Expected issuer.
    pub expected_issuer: Option<String>,
    /// Expected subject.
    pub expected_subject: Option<String>,
    /// Accepted audiences; the token must name at least one.
    pub expected_audience: Option<Vec<String>>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            leeway_seconds: 0,
            validate_exp: true,
            validate_nbf: true,
            allowed_algorithms: Algorithm::ALL.to_vec(),
            required_claims: Vec::new(),
            expected_issuer: None,
            expected_subject: None,
            expected_audience: None,
        }
    }
}

impl ValidationOptions {
    /// No leeway, both time checks on, ECDSA algorithms only.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            allowed_algorithms: vec![Algorithm::ES256, Algorithm::ES384],
            ..Self::default()
        }
    }

    /// Set the time leeway.
    #[must_use]
    pub fn with_leeway(mut self, seconds: u32) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    /// Set whether to validate expiration.
    #[must_use]
    pub fn validate_expiration(mut self, validate: bool) -> Self {
        self.validate_exp = validate;
        self
    }

    /// Set whether to validate not-before.
    #[must_use]
    pub fn validate_not_before(mut self, validate: bool) -> Self {
        self.validate_nbf = validate;
        self
    }

    /// Restrict the accepted algorithms.
    #[must_use]
    pub fn allowed_algorithms(mut self, algorithms: impl IntoIterator<Item = Algorithm>) -> Self {
        self.allowed_algorithms = algorithms.into_iter().collect();
        self
    }

    /// Add a required claim.
    #[must_use]
    pub fn require_claim(mut self, claim: impl Into<String>) -> Self {
        self.required_claims.push(claim.into());
        self
    }

    /// Set expected issuer.
    #[must_use]
    pub fn expect_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = Some(issuer.into());
        self
    }

    /// Set expected subject.
    #[must_use]
    pub fn expect_subject(mut self, subject: impl Into<String>) -> Self {
        self.expected_subject = Some(subject.into());
        self
    }

    /// Set accepted audiences.
    #[must_use]
    pub fn expect_audience<I, S>(mut self, audience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_audience = Some(audience.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `algorithm` is on the allow-list.
    #[must_use]
    pub fn allows(&self, algorithm: Algorithm) -> bool {
        self.allowed_algorithms.contains(&algorithm)
    }

    /// Check a decoded, signature-verified claim set against `now`.
    pub(crate) fn check_claims(&self, claims: &ClaimSet, now: i64) -> TokenResult<()> {
        let leeway = i64::from(self.leeway_seconds);

        let exp = claims.expiration();
        if self.validate_exp && now >= exp.saturating_add(leeway) {
            return Err(TokenError::Expired { expiration: exp });
        }

        if let Some(nbf) = claims.not_before().filter(|_| self.validate_nbf) {
            if nbf > now.saturating_add(leeway) {
                return Err(TokenError::NotYetValid { not_before: nbf });
            }
        }

        for claim in &self.required_claims {
            if !claims.contains(claim) {
                return Err(TokenError::MissingClaim(claim.clone()));
            }
        }

        if let Some(expected) = &self.expected_issuer {
            if claims.issuer() != Some(expected.as_str()) {
                return Err(TokenError::claim_mismatch("iss", expected));
            }
        }

        if let Some(expected) = &self.expected_subject {
            if claims.subject() != Some(expected.as_str()) {
                return Err(TokenError::claim_mismatch("sub", expected));
            }
        }

        if let Some(expected) = &self.expected_audience {
            let audience = claims.audience();
            if !expected.iter().any(|e| audience.contains(&e.as_str())) {
                return Err(TokenError::claim_mismatch("aud", &expected.join(", ")));
            }
        }

        Ok(())
    }
}
