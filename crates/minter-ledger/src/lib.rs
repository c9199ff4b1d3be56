//! Ledger access module for the asset minter system.
//!
//! This module defines the boundary to the ledger node: reading round
//! status, looking up pending transactions, blocking until the ledger
//! advances, fetching suggested transaction parameters, and submitting
//! signed transactions. It also hosts the confirmation tracker that turns
//! a submitted transaction's asynchronous fate into a bounded synchronous
//! answer.

use async_trait::async_trait;
use minter_types::{NodeStatus, PendingInfo, Round, SignedTransaction, SuggestedParams, TransactionId};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod http;
}

mod tracker;
pub use tracker::{ConfirmationTracker, TrackError};

/// Errors that can occur when talking to the ledger node.
#[derive(Debug, Error)]
pub enum LedgerError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the node rejects a request outright.
	#[error("Node rejected request: {0}")]
	Api(String),
}

/// Trait defining the interface for ledger client implementations.
///
/// This trait must be implemented by any ledger client that wants to
/// integrate with the minter. All failures at this boundary are transport
/// or node-level; the tracker and the lifecycle engine layer their own
/// semantics on top.
#[async_trait]
pub trait LedgerInterface: Send + Sync {
	/// Returns the node's view of ledger progress.
	async fn status(&self) -> Result<NodeStatus, LedgerError>;

	/// Looks up a pending transaction by id.
	///
	/// A transaction unknown to this node is reported exactly like one
	/// that is known and still pending: confirmed round 0 and an empty
	/// pool error. Callers needing to tell the two apart must track
	/// transaction age against a finality window themselves.
	async fn pending_transaction(&self, id: &TransactionId) -> Result<PendingInfo, LedgerError>;

	/// Blocks until the ledger's head round exceeds the given round.
	async fn wait_for_round_after(&self, round: Round) -> Result<NodeStatus, LedgerError>;

	/// Fetches suggested parameters for building a transaction.
	async fn suggested_params(&self) -> Result<SuggestedParams, LedgerError>;

	/// Submits a signed transaction, returning the id under which the
	/// network knows it.
	async fn submit(&self, signed: &SignedTransaction) -> Result<TransactionId, LedgerError>;
}

/// Type alias for ledger client factory functions.
pub type LedgerFactory = fn(&toml::Value) -> Result<Box<dyn LedgerInterface>, LedgerError>;

/// Service that manages ledger access.
///
/// Wraps an underlying ledger client implementation and delegates to it.
/// The service is safe for concurrent use by multiple trackers as long as
/// the wrapped implementation is.
pub struct LedgerService {
	/// The underlying ledger client implementation.
	implementation: Box<dyn LedgerInterface>,
}

impl LedgerService {
	/// Creates a new LedgerService with the specified implementation.
	pub fn new(implementation: Box<dyn LedgerInterface>) -> Self {
		Self { implementation }
	}

	/// Returns the node's view of ledger progress.
	pub async fn status(&self) -> Result<NodeStatus, LedgerError> {
		self.implementation.status().await
	}

	/// Looks up a pending transaction by id.
	pub async fn pending_transaction(
		&self,
		id: &TransactionId,
	) -> Result<PendingInfo, LedgerError> {
		self.implementation.pending_transaction(id).await
	}

	/// Blocks until the ledger's head round exceeds the given round.
	pub async fn wait_for_round_after(&self, round: Round) -> Result<NodeStatus, LedgerError> {
		self.implementation.wait_for_round_after(round).await
	}

	/// Fetches suggested parameters for building a transaction.
	pub async fn suggested_params(&self) -> Result<SuggestedParams, LedgerError> {
		self.implementation.suggested_params().await
	}

	/// Submits a signed transaction.
	pub async fn submit(&self, signed: &SignedTransaction) -> Result<TransactionId, LedgerError> {
		self.implementation.submit(signed).await
	}
}
