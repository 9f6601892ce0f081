// School Hub - student organizer
// Entry point and application setup

mod cli;

use chrono::Local;
use clap::Parser;
use schoolhub::config::{DATA_DIR_ENV, DEFAULT_DATA_DIR};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schoolhub=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();

    let data_dir = cli
        .data_dir
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    tracing::info!("Starting School Hub");

    let state = schoolhub::app::setup(data_dir, today)?;
    cli::run(&state, cli.command, today).await
}
