//! Command line definitions

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tokenmint_jwt::Algorithm;

/// Sign and verify compact JWTs with RSA and ECDSA keys
#[derive(Parser, Debug)]
#[command(name = "tokenmint", version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// `tokenmint` subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign a claim set and print the token
    Sign(SignArgs),

    /// Verify a token and print its claims as JSON
    Verify(VerifyArgs),

    /// Print a public key as a JWK
    Jwk(JwkArgs),

    /// Sign a sample claim set, then verify it, logging both steps
    ///
    /// Uses issuer "hyuga.tsukui", a fixed subject, name and email claims and
    /// a two hour expiry.
    Demo(DemoArgs),
}

/// Sign a claim set and print the token
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Private key PEM, either a file path or the PEM text itself
    #[arg(long, env = "TOKENMINT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Signing algorithm
    #[arg(long, env = "TOKENMINT_ALGORITHM", default_value_t = Algorithm::RS256)]
    pub algorithm: Algorithm,

    /// `iss` claim
    #[arg(long)]
    pub issuer: String,

    /// `sub` claim
    #[arg(long)]
    pub subject: String,

    /// Seconds until `exp`
    #[arg(long, default_value_t = 7200)]
    pub ttl_seconds: u32,

    /// Extra claim; the value is parsed as JSON, falling back to a string
    #[arg(long = "claim", value_name = "NAME=VALUE", value_parser = parse_claim)]
    pub claims: Vec<(String, Value)>,
}

/// Verify a token and print its claims as JSON
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Public key as a PEM or JWK file path, or the PEM or JWK text itself
    #[arg(long, env = "TOKENMINT_PUBLIC_KEY")]
    pub public_key: String,

    /// Expected algorithm
    #[arg(long, env = "TOKENMINT_ALGORITHM", default_value_t = Algorithm::RS256)]
    pub algorithm: Algorithm,

    /// Require this `iss` claim
    #[arg(long)]
    pub expect_issuer: Option<String>,

    /// Require this `sub` claim
    #[arg(long)]
    pub expect_subject: Option<String>,

    /// JSON file with validation options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Compact token to verify
    pub token: String,
}

/// Print a public key as a JWK
#[derive(Args, Debug)]
pub struct JwkArgs {
    /// Public key as a PEM or JWK file path, or the PEM or JWK text itself
    #[arg(long, env = "TOKENMINT_PUBLIC_KEY")]
    pub public_key: String,

    /// Algorithm recorded in the JWK `alg` member
    #[arg(long, env = "TOKENMINT_ALGORITHM", default_value_t = Algorithm::RS256)]
    pub algorithm: Algorithm,

    /// `kid` member
    #[arg(long)]
    pub kid: Option<String>,
}

/// Sign a sample claim set, then verify it, logging both steps
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Private key PEM, either a file path or the PEM text itself
    #[arg(long, env = "TOKENMINT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Public key PEM, either a file path or the PEM text itself
    #[arg(long, env = "TOKENMINT_PUBLIC_KEY")]
    pub public_key: String,

    /// Algorithm for both keys
    #[arg(long, env = "TOKENMINT_ALGORITHM", default_value_t = Algorithm::RS256)]
    pub algorithm: Algorithm,
}

/// Parse `name=value`.
///
/// Values are read as JSON when they parse, so `admin=true` and `level=3`
/// keep their types while `name=tsukui` stays a string.
///
/// # Errors
/// Returns a message for clap when `=` or the name is missing.
pub fn parse_claim(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("claim name is empty in `{raw}`"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}
