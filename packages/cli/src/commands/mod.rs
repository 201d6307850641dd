//! Subcommand implementations

pub mod demo;
pub mod jwk;
pub mod sign;
pub mod verify;

use crate::cli::Command;
use anyhow::Context;

/// Run `command`, writing its result to stdout.
pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Sign(args) => {
            let token = sign::sign(&args)?;
            println!("{token}");
        }
        Command::Verify(args) => {
            let claims = verify::verify(&args)?;
            let rendered =
                serde_json::to_string_pretty(&claims).context("Failed to render claims")?;
            println!("{rendered}");
        }
        Command::Jwk(args) => {
            let jwk = jwk::export(&args)?;
            let rendered = serde_json::to_string_pretty(&jwk).context("Failed to render JWK")?;
            println!("{rendered}");
        }
        Command::Demo(args) => {
            demo::demo(&args)?;
        }
    }
    Ok(())
}
