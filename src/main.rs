use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use route_tally::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = Cli::parse().into_config()?;
    let summary = route_tally::run(&config)
        .with_context(|| format!("could not answer {} for {}", config.question, config.input.display()))?;

    log::debug!("{summary:?}");
    Ok(())
}
