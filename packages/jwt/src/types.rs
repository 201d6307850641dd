//! Token header and compact token string

use crate::algorithms::Algorithm;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `typ` value written into every header.
pub const TOKEN_TYPE: &str = "JWT";

/// JOSE header produced when signing. Field order is fixed, so the encoded
/// header for a given algorithm never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Signing algorithm
    pub alg: Algorithm,
    /// Token type
    pub typ: &'static str,
}

impl Header {
    /// Header for `alg`.
    #[must_use]
    pub fn new(alg: Algorithm) -> Self {
        Self {
            alg,
            typ: TOKEN_TYPE,
        }
    }
}

/// Header as read from an untrusted token. `alg` stays a string so unknown
/// algorithms surface as a mismatch instead of a parse failure.
#[derive(Debug, Deserialize)]
pub(crate) struct DecodedHeader {
    pub alg: String,
    #[allow(dead_code)]
    pub typ: String,
}

/// Compact serialized token: `header.payload.signature`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub(crate) fn new(compact: String) -> Self {
        Self(compact)
    }

    /// Borrow the compact string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the compact string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
