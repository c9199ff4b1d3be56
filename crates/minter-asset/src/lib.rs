//! Asset lifecycle transaction builders for the minter system.
//!
//! This module assembles the transactions the demo submits: NFT creation,
//! asset destruction, and the final close-out payment that sweeps the
//! remaining balance back to the dispenser. Builders validate parameters
//! before producing a transaction so malformed assets never reach the
//! signing step.

use minter_types::{Address, AssetParams, SuggestedParams, Transaction, TransactionKind};
use thiserror::Error;

/// Content-addressing helpers: file hashing, SRI strings, metadata records.
pub mod content;

/// Maximum byte length of an asset unit name.
pub const MAX_UNIT_NAME_LEN: usize = 8;
/// Maximum byte length of an asset name.
pub const MAX_ASSET_NAME_LEN: usize = 32;
/// Maximum byte length of an asset URL.
pub const MAX_URL_LEN: usize = 96;
/// Required byte length of an asset metadata hash.
pub const METADATA_HASH_LEN: usize = 32;

/// Errors that can occur while preparing asset transactions.
#[derive(Debug, Error)]
pub enum AssetError {
	/// Error that occurs when asset parameters violate an invariant.
	#[error("Invalid asset parameters: {0}")]
	InvalidParams(String),
	/// Error that occurs while reading a content file.
	#[error("IO error reading {path}: {source}")]
	Io {
		/// Path of the file that failed to read.
		path: String,
		#[source]
		source: std::io::Error,
	},
	/// Error that occurs while encoding a metadata record.
	#[error("Metadata encoding failed: {0}")]
	Encode(String),
}

fn header(sender: Address, params: &SuggestedParams, kind: TransactionKind) -> Transaction {
	Transaction {
		sender,
		fee: params.fee.max(params.min_fee),
		first_valid: params.first_valid,
		last_valid: params.last_valid,
		genesis_id: params.genesis_id.clone(),
		genesis_hash: params.genesis_hash.clone(),
		note: None,
		kind,
	}
}

fn validate_nft(params: &AssetParams) -> Result<(), AssetError> {
	if params.total != 1 {
		return Err(AssetError::InvalidParams(format!(
			"An NFT has a total supply of exactly 1, got {}",
			params.total
		)));
	}
	if params.decimals != 0 {
		return Err(AssetError::InvalidParams(format!(
			"An NFT is not divisible, got {} decimals",
			params.decimals
		)));
	}
	if params.unit_name.len() > MAX_UNIT_NAME_LEN {
		return Err(AssetError::InvalidParams(format!(
			"Unit name exceeds {} bytes",
			MAX_UNIT_NAME_LEN
		)));
	}
	if params.asset_name.len() > MAX_ASSET_NAME_LEN {
		return Err(AssetError::InvalidParams(format!(
			"Asset name exceeds {} bytes",
			MAX_ASSET_NAME_LEN
		)));
	}
	if params.url.len() > MAX_URL_LEN {
		return Err(AssetError::InvalidParams(format!(
			"URL exceeds {} bytes",
			MAX_URL_LEN
		)));
	}
	if params.metadata_hash.len() != METADATA_HASH_LEN {
		return Err(AssetError::InvalidParams(format!(
			"Metadata hash must be exactly {} bytes, got {}",
			METADATA_HASH_LEN,
			params.metadata_hash.len()
		)));
	}
	Ok(())
}

/// Builds an NFT creation transaction.
///
/// Validates the NFT invariants (supply of 1, zero decimals, field length
/// limits, 32-byte metadata hash) before assembling the transaction.
pub fn create_nft(
	sender: Address,
	params: AssetParams,
	suggested: &SuggestedParams,
	note: Option<Vec<u8>>,
) -> Result<Transaction, AssetError> {
	validate_nft(&params)?;
	let mut tx = header(sender, suggested, TransactionKind::AssetCreate(params));
	tx.note = note;
	Ok(tx)
}

/// Builds an asset destruction transaction.
///
/// Only the asset manager can destroy an asset, and only while it holds
/// the entire supply; the ledger enforces both, this builder only rejects
/// the reserved id 0.
pub fn destroy_asset(
	sender: Address,
	asset_id: u64,
	suggested: &SuggestedParams,
) -> Result<Transaction, AssetError> {
	if asset_id == 0 {
		return Err(AssetError::InvalidParams(
			"Asset id 0 is reserved".to_string(),
		));
	}
	Ok(header(
		sender,
		suggested,
		TransactionKind::AssetDestroy { asset_id },
	))
}

/// Builds a zero-amount payment that closes the sender out to the given
/// account, sweeping the entire remaining balance to it.
pub fn close_account(
	sender: Address,
	close_to: Address,
	suggested: &SuggestedParams,
) -> Result<Transaction, AssetError> {
	if sender == close_to {
		return Err(AssetError::InvalidParams(
			"Cannot close an account out to itself".to_string(),
		));
	}
	Ok(header(
		sender,
		suggested,
		TransactionKind::Payment {
			receiver: close_to,
			amount: 0,
			close_to: Some(close_to),
		},
	))
}
