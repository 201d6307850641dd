//! `tokenmint` command line: sign, verify, jwk and demo subcommands over
//! [`tokenmint_jwt`], with keys loaded from PEM or JWK.

pub mod cli;
pub mod commands;
pub mod config;
pub mod keys;
pub mod logging;

pub use cli::{Cli, Command};
pub use commands::run;
