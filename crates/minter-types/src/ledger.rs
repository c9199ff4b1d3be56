//! Ledger observation types for the minter system.
//!
//! This module defines the types a client reads back from the ledger while
//! tracking submitted transactions: round numbers, node status snapshots,
//! and per-poll pending-transaction information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The ledger's unit of block-producing progress, analogous to block height.
///
/// Rounds are monotonically non-decreasing; the network is the sole writer.
pub type Round = u64;

/// Opaque identifier assigned to a transaction at submission time.
///
/// Used as the correlation key for all subsequent pending-transaction
/// lookups. The identifier must be non-empty before tracking starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub String);

impl TransactionId {
	/// Creates a new transaction id from any string-like value.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns true if the identifier is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for TransactionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Snapshot of the node's view of ledger progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
	/// The last round the node has seen committed.
	pub last_round: Round,
}

/// Per-poll snapshot of a pending transaction.
///
/// A snapshot has no independent lifecycle: it is replaced wholesale on
/// every poll and discarded once a terminal outcome is reached. A
/// transaction unknown to the node is reported the same way as one that is
/// known and still pending (confirmed round 0, empty pool error).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingInfo {
	/// Round in which the transaction was included, or 0 if not yet confirmed.
	pub confirmed_round: Round,
	/// Non-empty when the node evicted the transaction from its pending
	/// pool; names the terminal rejection reason.
	pub pool_error: String,
	/// Asset id created by the transaction, populated once an
	/// asset-creation transaction confirms.
	pub asset_index: Option<u64>,
}

impl PendingInfo {
	/// Returns true once the transaction has been included in a round.
	pub fn is_confirmed(&self) -> bool {
		self.confirmed_round > 0
	}

	/// Returns true if the node evicted the transaction from its pool.
	pub fn is_rejected(&self) -> bool {
		!self.pool_error.is_empty()
	}
}

/// Transaction parameters suggested by the node.
///
/// Fetched before building transactions so the validity window tracks the
/// current head of the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedParams {
	/// Suggested fee in microunits.
	pub fee: u64,
	/// Minimum fee the network accepts.
	pub min_fee: u64,
	/// First round the transaction is valid in.
	pub first_valid: Round,
	/// Last round the transaction is valid in.
	pub last_valid: Round,
	/// Genesis id of the network.
	pub genesis_id: String,
	/// Base64 genesis hash of the network.
	pub genesis_hash: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pending_info_states() {
		let pending = PendingInfo::default();
		assert!(!pending.is_confirmed());
		assert!(!pending.is_rejected());

		let confirmed = PendingInfo {
			confirmed_round: 42,
			..Default::default()
		};
		assert!(confirmed.is_confirmed());
		assert!(!confirmed.is_rejected());

		let rejected = PendingInfo {
			pool_error: "overspend".to_string(),
			..Default::default()
		};
		assert!(!rejected.is_confirmed());
		assert!(rejected.is_rejected());
	}

	#[test]
	fn test_transaction_id_display() {
		let id = TransactionId::new("ABCD1234");
		assert_eq!(id.to_string(), "ABCD1234");
		assert!(!id.is_empty());
		assert!(TransactionId::new("").is_empty());
	}
}
