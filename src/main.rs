//! taskchain CLI
//!
//! Thin command surface over the reconciliation engine in the library.

mod cli;

use anstream::eprintln;
use clap::Parser;
use cli::Cli;
use cli::style::Stylize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Tracing is opt-in via RUST_LOG or --verbose, and goes to stderr
    let default = if cli.verbose { "taskchain=debug" } else { "off" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(err) = cli::run(cli).await {
        eprintln!("{} {err}", "error:".danger());
        std::process::exit(err.exit_code());
    }
}
