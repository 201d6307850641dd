//! Claim sets and the builder that assembles them

mod builder;
mod claim_set;

pub use builder::ClaimsBuilder;
pub use claim_set::ClaimSet;

/// Registered claim names (RFC 7519 section 4.1).
pub mod names {
    /// Issuer
    pub const ISSUER: &str = "iss";
    /// Subject
    pub const SUBJECT: &str = "sub";
    /// Audience
    pub const AUDIENCE: &str = "aud";
    /// Expiration time
    pub const EXPIRATION: &str = "exp";
    /// Not before
    pub const NOT_BEFORE: &str = "nbf";
    /// Issued at
    pub const ISSUED_AT: &str = "iat";
    /// JWT ID
    pub const JWT_ID: &str = "jti";
}
