//! Main entry point for the tokenmint CLI

use clap::Parser;
use tokenmint_cli::{logging, run, Cli};

fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();
    run(cli.command)
}
