//! Configuration module for the asset minter system.
//!
//! This module provides structures and utilities for managing minter
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required configuration values are
//! properly set.

use minter_types::Address;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the asset minter.
///
/// This structure contains all configuration sections required for the
/// demo to run: minter identity, ledger node access, the signing account,
/// the asset being minted, and lifecycle tracking parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to this minter instance.
	pub minter: MinterConfig,
	/// Ledger node access configuration.
	pub ledger: LedgerConfig,
	/// Signing account configuration.
	#[serde(default)]
	pub account: AccountConfig,
	/// Parameters of the asset to mint.
	pub asset: AssetConfig,
	/// Lifecycle tracking and close-out configuration.
	pub lifecycle: LifecycleConfig,
}

/// Configuration specific to the minter instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MinterConfig {
	/// Unique identifier for this minter instance.
	pub id: String,
}

/// Ledger node access configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
	/// Base URL of the node's REST endpoint.
	pub url: String,
	/// API token sent with every request.
	#[serde(default)]
	pub token: String,
}

/// Signing account configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccountConfig {
	/// Hex-encoded 32-byte seed. A fresh account is generated from OS
	/// entropy when absent.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub seed: Option<String>,
}

/// Parameters of the asset to mint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetConfig {
	/// Short ticker-style unit name, at most 8 bytes.
	pub unit_name: String,
	/// Full asset name, at most 32 bytes.
	pub asset_name: String,
	/// URL pointing at the published metadata record.
	pub url: String,
	/// Path to the artwork file to hash.
	pub image_path: String,
	/// Optional human-readable description for the metadata record.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// Lifecycle tracking and close-out configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LifecycleConfig {
	/// Round budget granted to each confirmation wait.
	/// Defaults to 4 rounds if not specified.
	#[serde(default = "default_timeout_rounds")]
	pub timeout_rounds: u64,
	/// Dispenser address the remaining balance is closed out to.
	pub dispenser: String,
}

/// Returns the default confirmation round budget.
fn default_timeout_rounds() -> u64 {
	4
}

/// Upper bound on the confirmation round budget, matching the validity
/// window of a freshly built transaction.
const MAX_TIMEOUT_ROUNDS: u64 = 1000;

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable
/// VAR_NAME. Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	// Limit input size to prevent ReDoS attacks
	const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => {
				if let Some(default) = default_value {
					default.to_string()
				} else {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)));
				}
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, resolving environment variables
	/// and validating the result.
	pub fn from_file(path: &str) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(Path::new(path))?;
		contents.parse()
	}

	/// Validates the configuration to ensure all required fields are
	/// properly set.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.minter.id.is_empty() {
			return Err(ConfigError::Validation("Minter id cannot be empty".into()));
		}

		if self.ledger.url.is_empty() {
			return Err(ConfigError::Validation("Ledger url cannot be empty".into()));
		}
		if !self.ledger.url.starts_with("http://") && !self.ledger.url.starts_with("https://") {
			return Err(ConfigError::Validation(format!(
				"Ledger url must be an http(s) endpoint, got '{}'",
				self.ledger.url
			)));
		}

		if self.asset.unit_name.is_empty() || self.asset.unit_name.len() > 8 {
			return Err(ConfigError::Validation(
				"Asset unit_name must be between 1 and 8 bytes".into(),
			));
		}
		if self.asset.asset_name.is_empty() || self.asset.asset_name.len() > 32 {
			return Err(ConfigError::Validation(
				"Asset asset_name must be between 1 and 32 bytes".into(),
			));
		}
		if self.asset.image_path.is_empty() {
			return Err(ConfigError::Validation(
				"Asset image_path cannot be empty".into(),
			));
		}

		if self.lifecycle.timeout_rounds > MAX_TIMEOUT_ROUNDS {
			return Err(ConfigError::Validation(format!(
				"Lifecycle timeout_rounds cannot exceed {}",
				MAX_TIMEOUT_ROUNDS
			)));
		}
		if let Err(e) = Address::from_str(&self.lifecycle.dispenser) {
			return Err(ConfigError::Validation(format!(
				"Lifecycle dispenser is not a valid address: {}",
				e
			)));
		}

		Ok(())
	}
}

/// Implementation of FromStr trait for Config to enable parsing from
/// string.
///
/// Environment variables are resolved and the configuration is
/// automatically validated after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
