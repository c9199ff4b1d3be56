//! Account management module for the asset minter system.
//!
//! This module provides abstractions for managing cryptographic accounts
//! and signing operations. It defines interfaces and services for account
//! operations such as address retrieval and transaction signing.

use async_trait::async_trait;
use minter_types::{Address, SignedTransaction, Transaction};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when signing operations fail.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

/// Trait defining the interface for account implementations.
///
/// This trait must be implemented by any account implementation that wants
/// to integrate with the minter. It provides methods for retrieving the
/// account address and signing transactions.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	/// Retrieves the address associated with this account.
	async fn address(&self) -> Result<Address, AccountError>;

	/// Signs a transaction using the account's private key.
	///
	/// Returns the transaction bundled with its signature and derived id.
	async fn sign_transaction(&self, tx: &Transaction) -> Result<SignedTransaction, AccountError>;
}

/// Type alias for account factory functions.
///
/// This is the function signature that all account implementations must
/// provide to create instances of their account interface.
pub type AccountFactory = fn(&toml::Value) -> Result<Box<dyn AccountInterface>, AccountError>;

/// Service that manages account operations.
///
/// This struct provides a high-level interface for account management,
/// wrapping an underlying account implementation.
pub struct AccountService {
	/// The underlying account implementation.
	implementation: Box<dyn AccountInterface>,
}

impl AccountService {
	/// Creates a new AccountService with the specified implementation.
	pub fn new(implementation: Box<dyn AccountInterface>) -> Self {
		Self { implementation }
	}

	/// Retrieves the address associated with the managed account.
	pub async fn get_address(&self) -> Result<Address, AccountError> {
		self.implementation.address().await
	}

	/// Signs a transaction using the managed account.
	pub async fn sign(&self, tx: &Transaction) -> Result<SignedTransaction, AccountError> {
		self.implementation.sign_transaction(tx).await
	}
}
