//! Harness binary entry point.

use clap::Parser;

use textsink::cli::Cli;
use textsink::config::HarnessConfig;
use textsink::session;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout belongs to the capture surface.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = HarnessConfig::resolve(&cli);
    session::run(&config)
}
