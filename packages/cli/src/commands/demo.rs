//! `tokenmint demo`

use crate::{
    cli::DemoArgs,
    keys::{load_signing_key, load_verification_key},
};
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use tokenmint_jwt::{ClaimSet, ClaimsBuilder, TokenCodec, TokenResult};
use tracing::info;

/// Sample issuer.
pub const DEMO_ISSUER: &str = "hyuga.tsukui";
/// Sample subject.
pub const DEMO_SUBJECT: &str = "6a1ba3c4-9a96-40b4-beed-e9c2f8927124";

/// Sample claim set expiring two hours after `now`.
pub fn demo_claims(now: DateTime<Utc>) -> TokenResult<ClaimSet> {
    ClaimsBuilder::new()
        .issuer(DEMO_ISSUER)
        .subject(DEMO_SUBJECT)
        .claim("name", "tsukui")
        .claim("email", "john.doe@example.com")
        .expiration(now + Duration::hours(2))
        .build_at(now)
}

/// Sign the sample claims, verify the result, and log both.
pub fn demo(args: &DemoArgs) -> anyhow::Result<ClaimSet> {
    let signing_key = load_signing_key(&args.private_key, args.algorithm)?;
    let verification_key = load_verification_key(&args.public_key, args.algorithm)?;

    let codec = TokenCodec::new();
    let now = Utc::now();
    let claims = demo_claims(now)?;

    let token = codec
        .sign_at(&claims, &signing_key, now)
        .context("Failed to sign demo token")?;
    info!(alg = %args.algorithm, %token, "signed token");

    let verified = codec
        .verify_at(token.as_str(), &verification_key, now)
        .context("Demo token did not verify; do the keys belong together?")?;
    let rendered = serde_json::to_string(&verified).context("Failed to render claims")?;
    info!(claims = %rendered, "verified claims");

    Ok(verified)
}
