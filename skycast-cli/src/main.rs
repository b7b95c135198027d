//! Binary crate for the `skycast` command-line weather widget.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive location prompt
//! - Terminal rendering of the weather view

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
