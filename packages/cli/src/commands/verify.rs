//! `tokenmint verify`

use crate::{cli::VerifyArgs, config::load_options, keys::load_verification_key};
use anyhow::Context;
use tokenmint_jwt::{ClaimSet, TokenCodec, ValidationOptions};

/// Options from `--config`, with `--expect-*` flags layered on top.
pub fn validation_options(args: &VerifyArgs) -> anyhow::Result<ValidationOptions> {
    let mut options = load_options(args.config.as_deref())?;
    if let Some(issuer) = &args.expect_issuer {
        options = options.expect_issuer(issuer.as_str());
    }
    if let Some(subject) = &args.expect_subject {
        options = options.expect_subject(subject.as_str());
    }
    Ok(options)
}

/// Verify the token in `args` and return its claims.
pub fn verify(args: &VerifyArgs) -> anyhow::Result<ClaimSet> {
    let key = load_verification_key(&args.public_key, args.algorithm)?;
    let codec = TokenCodec::with_options(validation_options(args)?);

    codec
        .verify(args.token.trim(), &key)
        .context("Token verification failed")
}
