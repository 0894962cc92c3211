//! DreamWeaver CLI
//!
//! Command-line front end for the DreamWeaver journaling core.

use clap::Parser;
use env_logger::Env;
use log::info;

use dreamweaver::cli::commands;
use dreamweaver::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("DreamWeaver v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.config()?;
    let services = commands::build_services(&config, cli.offline);

    match cli.command {
        Some(Commands::Show) => commands::show(&config, services)?,
        Some(Commands::Write { text }) => commands::write(&config, services, &text)?,
        Some(Commands::Analyze) => commands::analyze(&config, services).await?,
        Some(Commands::Art) => commands::art(&config, services).await?,
        None => commands::interactive(&config, services).await?,
    }

    Ok(())
}
