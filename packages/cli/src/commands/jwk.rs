//! `tokenmint jwk`

use crate::{cli::JwkArgs, keys::load_verification_key};
use tokenmint_jwt::Jwk;

/// Load the public key in `args` and export it, tagged with `--kid` if given.
pub fn export(args: &JwkArgs) -> anyhow::Result<Jwk> {
    let key = load_verification_key(&args.public_key, args.algorithm)?;
    let mut jwk = key.to_jwk();
    jwk.kid = args.kid.clone();
    tracing::debug!(alg = %key.algorithm(), kid = ?jwk.kid, "public key exported");
    Ok(jwk)
}
