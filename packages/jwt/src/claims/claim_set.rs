use super::names::{AUDIENCE, EXPIRATION, ISSUED_AT, ISSUER, JWT_ID, NOT_BEFORE, SUBJECT};
use crate::error::TokenError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Immutable, validated set of claims.
///
/// Claims are kept sorted by name, so the JSON form of a given set is always
/// byte-identical. A `ClaimSet` always carries an integer `exp`, and the
/// registered claims always have their RFC 7519 JSON types.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Value>")]
pub struct ClaimSet {
    claims: BTreeMap<String, Value>,
}

impl ClaimSet {
    /// Issuer (`iss`).
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.get_str(ISSUER)
    }

    /// Subject (`sub`).
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.get_str(SUBJECT)
    }

    /// Expiration (`exp`), whole seconds since the epoch.
    #[must_use]
    pub fn expiration(&self) -> i64 {
        // present by construction; a missing value reads as long expired
        self.numeric_date(EXPIRATION).unwrap_or(i64::MIN)
    }

    /// Expiration as a UTC instant, if representable.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expiration(), 0)
    }

    /// Not-before (`nbf`), seconds since the epoch.
    #[must_use]
    pub fn not_before(&self) -> Option<i64> {
        self.numeric_date(NOT_BEFORE)
    }

    /// Issued-at (`iat`), seconds since the epoch.
    #[must_use]
    pub fn issued_at(&self) -> Option<i64> {
        self.numeric_date(ISSUED_AT)
    }

    /// Token identifier (`jti`).
    #[must_use]
    pub fn jwt_id(&self) -> Option<&str> {
        self.get_str(JWT_ID)
    }

    /// Audience values; a single-string `aud` yields one entry.
    #[must_use]
    pub fn audience(&self) -> Vec<&str> {
        match self.claims.get(AUDIENCE) {
            Some(Value::String(aud)) => vec![aud.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Raw value of any claim.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Claim value if it is a string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.claims.get(name).and_then(Value::as_str)
    }

    /// Claim value if it is an integer.
    #[must_use]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.claims.get(name).and_then(Value::as_i64)
    }

    /// Claim value read as a NumericDate, truncated to whole seconds.
    #[must_use]
    pub fn numeric_date(&self, name: &str) -> Option<i64> {
        self.claims.get(name).and_then(numeric_date)
    }

    /// Whether a claim with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    /// Number of claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Always false for a validated set, which carries at least `exp`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Claims in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.claims.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Borrow the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.claims
    }

    /// Consume the set, returning the underlying map.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, Value> {
        self.claims
    }
}

impl Serialize for ClaimSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.claims.serialize(serializer)
    }
}

impl TryFrom<BTreeMap<String, Value>> for ClaimSet {
    type Error = TokenError;

    /// Structural checks only; time-based checks belong to the builder and
    /// the verifier.
    fn try_from(claims: BTreeMap<String, Value>) -> Result<Self, Self::Error> {
        check_registered_claims(&claims).map_err(TokenError::Validation)?;
        Ok(Self { claims })
    }
}

fn check_registered_claims(claims: &BTreeMap<String, Value>) -> Result<(), String> {
    for name in [ISSUER, SUBJECT, JWT_ID] {
        if let Some(value) = claims.get(name) {
            if !value.is_string() {
                return Err(format!("{name} must be a string"));
            }
        }
    }

    for name in [EXPIRATION, NOT_BEFORE, ISSUED_AT] {
        if let Some(value) = claims.get(name) {
            if numeric_date(value).is_none() {
                return Err(format!("{name} must be a numeric timestamp"));
            }
        }
    }

    match claims.get(AUDIENCE) {
        None | Some(Value::String(_)) => {}
        Some(Value::Array(items)) if items.iter().all(Value::is_string) => {}
        Some(_) => return Err("aud must be a string or an array of strings".to_string()),
    }

    if !claims.contains_key(EXPIRATION) {
        return Err("exp is required".to_string());
    }

    Ok(())
}

/// RFC 7519 NumericDate: integer or fractional seconds, truncated toward zero.
fn numeric_date(value: &Value) -> Option<i64> {
    if let Some(seconds) = value.as_i64() {
        return Some(seconds);
    }

    let seconds = value.as_f64()?.trunc();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    (seconds >= i64::MIN as f64 && seconds < i64::MAX as f64).then(|| seconds as i64)
}
