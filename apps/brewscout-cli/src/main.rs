//! # BrewScout CLI
//!
//! Command-line front end for the BrewScout gateway.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod state;
mod telemetry;

use cli::Cli;
use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    telemetry::init_telemetry(&config.telemetry);

    let state = AppState::new(&config)?;
    tracing::debug!(base_url = %state.client.base_url(), "Starting BrewScout CLI");

    commands::run(&state, cli.command).await
}
