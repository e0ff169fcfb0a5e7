//! Strand command-line binary.

mod cli;
mod commands;
mod config;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!(
        project = %cli.project.display(),
        "starting strand v{}",
        env!("CARGO_PKG_VERSION")
    );

    let output = commands::run(&cli).await?;
    print!("{output}");
    Ok(())
}
