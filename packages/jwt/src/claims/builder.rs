//! Claims builder
//!
//! Every setter overwrites the previous value stored under the same claim
//! name, whether it was written by a typed setter or by [`ClaimsBuilder::claim`].
//! Setters may be called in any order; only the final value per name counts.

use super::{
    claim_set::ClaimSet,
    names::{AUDIENCE, EXPIRATION, ISSUED_AT, ISSUER, JWT_ID, NOT_BEFORE, SUBJECT},
};
use crate::error::{TokenError, TokenResult};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// Builder for [`ClaimSet`].
#[derive(Debug, Clone, Default)]
pub struct ClaimsBuilder {
    claims: BTreeMap<String, Value>,
    // Set when a relative expiration could not be represented; cleared by
    // any later write to `exp`.
    expiration_error: Option<TokenError>,
}

impl ClaimsBuilder {
    /// Create an empty builder.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the issuer (`iss`).
    #[inline]
    #[must_use]
    pub fn issuer(self, issuer: impl Into<String>) -> Self {
        self.claim(ISSUER, Value::String(issuer.into()))
    }

    /// Set the subject (`sub`).
    #[inline]
    #[must_use]
    pub fn subject(self, subject: impl Into<String>) -> Self {
        self.claim(SUBJECT, Value::String(subject.into()))
    }

    /// Set the expiration (`exp`) to an absolute instant, truncated to seconds.
    #[inline]
    #[must_use]
    pub fn expiration(self, at: DateTime<Utc>) -> Self {
        self.claim(EXPIRATION, Value::from(at.timestamp()))
    }

    /// Set the expiration relative to the current time.
    ///
    /// An instant outside the representable range is reported by `build`.
    #[must_use]
    pub fn expires_in(mut self, duration: Duration) -> Self {
        match Utc::now().checked_add_signed(duration) {
            Some(at) => self.expiration(at),
            None => {
                self.claims.remove(EXPIRATION);
                self.expiration_error = Some(TokenError::validation(
                    "expiration is outside the representable time range",
                ));
                self
            }
        }
    }

    /// Set a single audience (`aud`).
    #[inline]
    #[must_use]
    pub fn audience(self, audience: impl Into<String>) -> Self {
        self.claim(AUDIENCE, Value::String(audience.into()))
    }

    /// Set several audiences (`aud`) as an array.
    #[must_use]
    pub fn audiences<I, S>(self, audiences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = audiences
            .into_iter()
            .map(|aud| Value::String(aud.into()))
            .collect();
        self.claim(AUDIENCE, Value::Array(values))
    }

    /// Set the not-before time (`nbf`).
    #[inline]
    #[must_use]
    pub fn not_before(self, at: DateTime<Utc>) -> Self {
        self.claim(NOT_BEFORE, Value::from(at.timestamp()))
    }

    /// Set the issued-at time (`iat`).
    #[inline]
    #[must_use]
    pub fn issued_at(self, at: DateTime<Utc>) -> Self {
        self.claim(ISSUED_AT, Value::from(at.timestamp()))
    }

    /// Set the issued-at time to now.
    #[inline]
    #[must_use]
    pub fn issued_now(self) -> Self {
        self.issued_at(Utc::now())
    }

    /// Set the token identifier (`jti`).
    #[inline]
    #[must_use]
    pub fn jwt_id(self, jti: impl Into<String>) -> Self {
        self.claim(JWT_ID, Value::String(jti.into()))
    }

    /// Set the token identifier to a random UUID v4.
    #[inline]
    #[must_use]
    pub fn random_jwt_id(self) -> Self {
        self.jwt_id(uuid::Uuid::new_v4().to_string())
    }

    /// Set an arbitrary claim.
    #[inline]
    #[must_use]
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if name == EXPIRATION {
            self.expiration_error = None;
        }
        self.claims.insert(name, value.into());
        self
    }

    /// Validate against the current time and produce the claim set.
    ///
    /// # Errors
    /// See [`ClaimsBuilder::build_at`].
    pub fn build(self) -> TokenResult<ClaimSet> {
        self.build_at(Utc::now())
    }

    /// Validate against `now` and produce the claim set.
    ///
    /// # Errors
    /// Returns `TokenError::Validation` when `exp` is missing, out of range or
    /// not after `now`, when `nbf` is not before `exp`, or when a registered
    /// claim has the wrong JSON type.
    pub fn build_at(self, now: DateTime<Utc>) -> TokenResult<ClaimSet> {
        if let Some(err) = self.expiration_error {
            return Err(err);
        }

        let claims = ClaimSet::try_from(self.claims)?;

        let exp = claims.expiration();
        if exp <= now.timestamp() {
            return Err(TokenError::Validation(format!(
                "exp {exp} is not after the current time {}",
                now.timestamp()
            )));
        }

        if let Some(nbf) = claims.not_before() {
            if nbf >= exp {
                return Err(TokenError::validation("nbf must be before exp"));
            }
        }

        Ok(claims)
    }
}
