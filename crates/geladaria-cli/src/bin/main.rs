//! geladaria CLI binary entry point
//!
//! This is a thin wrapper that installs logging and calls the library's
//! `run_cli()` function.

use anyhow::Result;
use geladaria_cli::run_cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr so stdout stays clean for previews
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run_cli().await
}
