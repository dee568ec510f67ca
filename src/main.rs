//! apienv - photo API environment configuration
//!
//! Command-line front end that resolves the photo API configuration from the
//! process environment, validates it, and prints it.

use apienv::cli::Cli;
use apienv::utils::format::DisplayUtils;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.debug);

    info!("Starting apienv");

    let display = DisplayUtils::new(cli.no_color);

    // Execute the command, reporting any failure once
    if let Err(e) = cli.execute().await {
        display.print_error(&format!("Error [{}]: {}", e.kind(), e));
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "apienv=debug" } else { "apienv=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
