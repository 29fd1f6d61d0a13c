mod auth;
mod cli;
mod config;
mod error;
mod output;
mod providers;
mod records;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Defaults;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    output::print_banner();

    let cli = Cli::parse();
    let defaults = Defaults::from_env();
    info!("Starting azdo - Azure DevOps CLI");
    cli.execute(defaults).await?;

    Ok(())
}
