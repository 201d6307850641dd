//! Compact JWT issuance and verification with asymmetric keys
//!
//! - [`ClaimsBuilder`] assembles an immutable [`ClaimSet`]
//! - [`TokenCodec`] signs claim sets into [`Token`]s and verifies tokens back
//!   into claim sets, under a configurable [`ValidationOptions`] policy
//! - [`AsyncTokenCodec`] runs the same operations on tokio's blocking pool
//!
//! Supported algorithms: RS256, RS384, RS512, ES256, ES384. Keys are passed in
//! already parsed, or as a [`Jwk`] for verification keys; this crate does no
//! file or network I/O.
//!
//! ```no_run
//! use chrono::Duration;
//! use tokenmint_jwt::{generate_keypair, Algorithm, ClaimsBuilder, TokenCodec};
//!
//! # fn main() -> tokenmint_jwt::TokenResult<()> {
//! let (signing_key, verification_key) = generate_keypair(Algorithm::RS256)?;
//! let claims = ClaimsBuilder::new()
//!     .issuer("svc-a")
//!     .subject("user-123")
//!     .expires_in(Duration::hours(1))
//!     .build()?;
//!
//! let codec = TokenCodec::new();
//! let token = codec.sign(&claims, &signing_key)?;
//! let verified = codec.verify(token.as_str(), &verification_key)?;
//! assert_eq!(verified, claims);
//! # Ok(())
//! # }
//! ```

mod algorithms;
mod async_ops;
pub mod claims;
mod codec;
pub(crate) mod crypto;
mod error;
mod jwk;
mod keys;
mod types;
mod validation;

pub use algorithms::{Algorithm, ParseAlgorithmError};
pub use async_ops::{AsyncTokenCodec, AsyncTokenResult};
pub use claims::{ClaimSet, ClaimsBuilder};
pub use codec::TokenCodec;
pub use error::{TokenError, TokenResult};
pub use jwk::Jwk;
pub use keys::{generate_keypair, SigningKey, VerificationKey, RSA_KEY_BITS};
pub use types::{Header, Token, TOKEN_TYPE};
pub use validation::ValidationOptions;

// Key types in signatures above come from these crates.
pub use p256;
pub use p384;
pub use rsa;
