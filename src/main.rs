//! tailbridge - bridges the Tailwind CSS toolchain into a web project's
//! asset pipeline
//!
//! # Features
//! - Scaffolds a Tailwind asset app (v3, v4, or v4 standalone)
//! - Installs dependencies via npm or the standalone Tailwind CLI
//! - One-shot and watch-mode CSS builds
//! - Combined dev-server + watcher through a Procfile supervisor
//! - Plugin installation with stylesheet registration

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tailbridge_lib::Cli;

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("tailbridge=debug,tailbridge_lib=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("tailbridge=info,tailbridge_lib=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    cli.execute().await
}
