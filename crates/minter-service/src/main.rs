//! Main entry point for the asset minter demo.
//!
//! This binary drives the full NFT lifecycle against a ledger node:
//! create the asset, wait for confirmation, destroy it again, and close
//! the creator account out to the dispenser. It uses a modular
//! architecture with pluggable implementations for the account and
//! ledger components.

use clap::Parser;
use minter_account::implementations::local::create_account;
use minter_config::Config;
use minter_core::{LifecycleBuilder, MintEngine, MinterError, MinterFactories};
use minter_ledger::implementations::http::create_http_ledger;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Command-line arguments for the minter demo.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the minter demo.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the lifecycle engine with all implementations
/// 5. Runs the lifecycle, honoring Ctrl+C at every confirmation wait
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	tracing::info!("Started minter");

	// Load configuration
	let config = Config::from_file(args.config.to_str().unwrap())?;
	tracing::info!("Loaded configuration [{}]", config.minter.id);

	// Build the engine with implementations
	let engine = build_engine(config)?;

	// Cancel in-flight confirmation waits on Ctrl+C instead of sitting
	// out the full round budget.
	let cancellation = CancellationToken::new();
	let signal_token = cancellation.clone();
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			tracing::warn!("Shutdown requested, cancelling in-flight waits");
			signal_token.cancel();
		}
	});

	let report = engine.run(cancellation).await?;

	tracing::info!(
		asset_id = report.asset_id,
		create_tx = %report.create_tx,
		destroy_tx = %report.destroy_tx,
		close_tx = %report.close_tx,
		"Lifecycle complete"
	);

	tracing::info!("Stopped minter");
	Ok(())
}

/// Builds the lifecycle engine with the concrete implementations: a local
/// in-memory account and the HTTP ledger client.
fn build_engine(config: Config) -> Result<MintEngine, MinterError> {
	let factories = MinterFactories {
		account_factory: create_account,
		ledger_factory: create_http_ledger,
	};
	LifecycleBuilder::new(config).build(factories)
}
