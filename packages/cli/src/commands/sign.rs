//! `tokenmint sign`

use crate::{cli::SignArgs, keys::load_signing_key};
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use tokenmint_jwt::{ClaimSet, ClaimsBuilder, Token, TokenCodec};

/// Claim set for `args`, expiring `ttl_seconds` after `now`.
///
/// `--claim` values are applied after the typed flags, so a repeated name
/// overrides them.
pub fn build_claims(args: &SignArgs, now: DateTime<Utc>) -> anyhow::Result<ClaimSet> {
    let builder = ClaimsBuilder::new()
        .issuer(args.issuer.as_str())
        .subject(args.subject.as_str())
        .expiration(now + Duration::seconds(i64::from(args.ttl_seconds)));

    args.claims
        .iter()
        .fold(builder, |builder, (name, value)| {
            builder.claim(name.as_str(), value.clone())
        })
        .build_at(now)
        .context("Invalid claims")
}

/// Load the key, assemble the claims and sign them.
pub fn sign(args: &SignArgs) -> anyhow::Result<Token> {
    let key = load_signing_key(&args.private_key, args.algorithm)?;
    let now = Utc::now();
    let claims = build_claims(args, now)?;

    let token = TokenCodec::new()
        .sign_at(&claims, &key, now)
        .context("Failed to sign token")?;
    tracing::debug!(alg = %args.algorithm, claims = claims.len(), "token signed");
    Ok(token)
}
