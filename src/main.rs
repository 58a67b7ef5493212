//! Command-line interface for source-faker
//!
//! Every command writes protocol messages to stdout, one JSON object per
//! line. Logs go to stderr and are controlled with `RUST_LOG`.
//!
//! # Usage Examples
//!
//! ```bash
//! # Print the connector specification
//! source-faker spec
//!
//! # Check a configuration
//! source-faker check --config config.json
//!
//! # Discover the streams
//! source-faker discover --config config.json
//!
//! # Full read of Users and Purchases
//! source-faker read --config config.json --catalog catalog.json
//!
//! # Incremental read resuming from the last STATE message
//! source-faker read --config config.json --catalog catalog.json --state state.json
//! ```
//!
//! ## Config
//! ```json
//! {"count": 1000, "seed": 42, "records_per_sync": 500, "records_per_slice": 100}
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use source_faker::config::load_json_or_yaml;
use source_faker::{catalog, sync, SourceConfig};
use source_protocol::{ConfiguredCatalog, ConnectionStatus, Message};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "source-faker")]
#[command(about = "A mock source generating synthetic Users, Products and Purchases")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the connector specification
    Spec,

    /// Validate the configuration
    Check {
        /// Path to the config file (JSON, or YAML with a .yaml/.yml extension)
        #[arg(long, value_name = "PATH", env = "SOURCE_FAKER_CONFIG")]
        config: PathBuf,
    },

    /// List the available streams
    Discover {
        /// Path to the config file
        #[arg(long, value_name = "PATH", env = "SOURCE_FAKER_CONFIG")]
        config: PathBuf,
    },

    /// Generate records for the configured streams
    Read {
        /// Path to the config file
        #[arg(long, value_name = "PATH", env = "SOURCE_FAKER_CONFIG")]
        config: PathBuf,

        /// Path to the configured catalog selecting the streams to read
        #[arg(long, value_name = "PATH")]
        catalog: PathBuf,

        /// Path to the state returned by a previous read (optional)
        #[arg(long, value_name = "PATH")]
        state: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for protocol messages
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Spec => {
            write_message(&mut out, &Message::Spec {
                spec: catalog::spec()?,
            })?;
        }
        Commands::Check { config } => {
            let connection_status = match SourceConfig::from_file(&config).await {
                Ok(config) => catalog::check(&config),
                Err(e) => {
                    tracing::warn!("Check failed: {e:#}");
                    ConnectionStatus::failed(format!("{e:#}"))
                }
            };
            write_message(&mut out, &Message::ConnectionStatus { connection_status })?;
        }
        Commands::Discover { config } => {
            // Only validated; the catalog does not depend on it
            SourceConfig::from_file(&config)
                .await
                .with_context(|| format!("Failed to load config from {config:?}"))?;
            write_message(&mut out, &Message::Catalog {
                catalog: catalog::discover()?,
            })?;
        }
        Commands::Read {
            config,
            catalog,
            state,
        } => {
            let config = SourceConfig::from_file(&config)
                .await
                .with_context(|| format!("Failed to load config from {config:?}"))?;
            let configured: ConfiguredCatalog = load_json_or_yaml(&catalog)
                .await
                .with_context(|| format!("Failed to load catalog from {catalog:?}"))?;
            let prior_state = match state {
                Some(path) => checkpoint::load_state_file(&path)?,
                None => checkpoint::SyncState::new(),
            };
            tracing::debug!(
                "Configured streams: {:?}",
                configured.stream_names().collect::<Vec<_>>()
            );

            let mut records = 0u64;
            for message in sync::read(&config, &configured, prior_state)? {
                let message = message?;
                if message.as_record().is_some() {
                    records += 1;
                }
                write_message(&mut out, &message)?;
            }
            tracing::info!("Read complete: {records} records emitted");
        }
    }

    out.flush()?;
    Ok(())
}

/// Write one message as a single JSON line.
fn write_message<W: Write>(out: &mut W, message: &Message) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, message).context("Failed to serialize message")?;
    out.write_all(b"\n")?;
    Ok(())
}
