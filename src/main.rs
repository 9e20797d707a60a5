//! Batch Fetcher CLI application
//!
//! Command-line interface for downloading every URL listed in a manifest.
//! Features concurrent downloads, per-item retries and a failure log.

use std::process;

use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use batch_fetcher::cli::{handle_download, shutdown_signal, Cli, INTERRUPT_MESSAGE};
use batch_fetcher::config::AppConfig;
use batch_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse_args();

    tokio::select! {
        result = run(&cli) => {
            if let Err(e) = result {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        interrupt = shutdown_signal() => {
            warn!("Run interrupted by {}", interrupt.signal_name());
            println!("\n{}", INTERRUPT_MESSAGE);
            process::exit(0);
        }
    }
}

/// Main application logic
async fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::load(cli.global.config.as_deref()).await?;

    // Initialize logging based on verbosity, falling back to the config file
    init_logging(cli, &config);

    info!("Batch Fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    handle_download(&cli.download, &config).await?;
    Ok(())
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli, config: &AppConfig) {
    let log_level = cli
        .log_level()
        .unwrap_or_else(|| config.logging.tracing_level());

    // Create environment filter
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("batch_fetcher={}", log_level).parse() {
        filter = filter.add_directive(directive);
    }

    // Initialize subscriber
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
