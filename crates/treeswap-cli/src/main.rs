mod cli;
mod commands;
mod logging;

use anyhow::Context;
use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    commands::Rewrite::execute(&cli)
        .with_context(|| format!("Failed to rewrite {}", cli.starting.display()))?;

    Ok(())
}
