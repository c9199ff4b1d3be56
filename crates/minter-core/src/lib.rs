//! Core lifecycle engine for the asset minter system.
//!
//! This module provides the orchestration logic for the demo: it wires the
//! account and ledger services together and drives the full asset
//! lifecycle (create, inspect, destroy, close out) with confirmation
//! tracking between the steps. Services are created through factories so
//! different implementations can be plugged in.

use minter_account::{AccountError, AccountFactory, AccountService};
use minter_asset::AssetError;
use minter_config::Config;
use minter_ledger::{LedgerError, LedgerFactory, LedgerService, TrackError};
use std::sync::Arc;
use thiserror::Error;

mod lifecycle;
pub use lifecycle::MintLifecycle;

/// Errors that can occur while running the mint lifecycle.
#[derive(Debug, Error)]
pub enum MinterError {
	/// Error related to configuration issues.
	#[error("Configuration error: {0}")]
	Config(String),
	/// Error from the account service.
	#[error(transparent)]
	Account(#[from] AccountError),
	/// Error from the ledger service.
	#[error(transparent)]
	Ledger(#[from] LedgerError),
	/// Error while preparing an asset transaction or its content.
	#[error(transparent)]
	Asset(#[from] AssetError),
	/// Terminal tracking outcome other than confirmation.
	#[error(transparent)]
	Track(#[from] TrackError),
	/// Error in the lifecycle sequencing itself.
	#[error("Lifecycle error: {0}")]
	Lifecycle(String),
}

/// Factories used to construct the engine's services.
pub struct MinterFactories {
	/// Factory for the signing account implementation.
	pub account_factory: AccountFactory,
	/// Factory for the ledger client implementation.
	pub ledger_factory: LedgerFactory,
}

/// Builder for constructing a MintEngine with pluggable implementations.
pub struct LifecycleBuilder {
	config: Config,
}

impl LifecycleBuilder {
	/// Creates a new LifecycleBuilder with the given configuration.
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Builds the MintEngine using the configured factories.
	pub fn build(self, factories: MinterFactories) -> Result<MintEngine, MinterError> {
		let mut account_table = toml::map::Map::new();
		if let Some(seed) = &self.config.account.seed {
			account_table.insert("seed".to_string(), toml::Value::String(seed.clone()));
		}
		let account = (factories.account_factory)(&toml::Value::Table(account_table))
			.map_err(|e| MinterError::Config(format!("Failed to create account: {}", e)))?;
		let account = Arc::new(AccountService::new(account));
		tracing::info!(component = "account", "Loaded");

		let mut ledger_table = toml::map::Map::new();
		ledger_table.insert(
			"url".to_string(),
			toml::Value::String(self.config.ledger.url.clone()),
		);
		ledger_table.insert(
			"token".to_string(),
			toml::Value::String(self.config.ledger.token.clone()),
		);
		let ledger = (factories.ledger_factory)(&toml::Value::Table(ledger_table))
			.map_err(|e| MinterError::Config(format!("Failed to create ledger client: {}", e)))?;
		let ledger = Arc::new(LedgerService::new(ledger));
		tracing::info!(component = "ledger", url = %self.config.ledger.url, "Loaded");

		Ok(MintEngine::new(self.config, account, ledger))
	}
}

/// Engine that drives the asset lifecycle end to end.
pub struct MintEngine {
	/// Minter configuration.
	config: Config,
	/// Account service for address retrieval and signing.
	account: Arc<AccountService>,
	/// Ledger service for submission and confirmation tracking.
	ledger: Arc<LedgerService>,
}

impl MintEngine {
	/// Creates an engine from already-constructed services.
	pub fn new(config: Config, account: Arc<AccountService>, ledger: Arc<LedgerService>) -> Self {
		Self {
			config,
			account,
			ledger,
		}
	}

	/// Returns a reference to the configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}
}
