//! The asset lifecycle: create, inspect, destroy, close out.
//!
//! Each step presupposes the success of all prior steps: the first
//! failure aborts the remaining lifecycle and is surfaced to the caller
//! unchanged. Progress accumulates in an explicit report object rather
//! than shared mutable state.

use crate::{MintEngine, MinterError};
use minter_asset::content::{self, AssetMetadata};
use minter_ledger::ConfirmationTracker;
use minter_types::{
	Address, AssetParams, PendingInfo, Round, Transaction, TransactionId,
};
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Record of a completed lifecycle run.
#[derive(Debug, Clone)]
pub struct MintLifecycle {
	/// Account that created, destroyed, and closed out.
	pub creator: Address,
	/// Integrity string of the artwork file.
	pub image_sri: String,
	/// 32-byte commitment to the metadata record.
	pub metadata_hash: Vec<u8>,
	/// Id of the asset-creation transaction.
	pub create_tx: TransactionId,
	/// Round the creation confirmed in.
	pub create_round: Round,
	/// Id assigned to the created asset.
	pub asset_id: u64,
	/// Id of the asset-destruction transaction.
	pub destroy_tx: TransactionId,
	/// Round the destruction confirmed in.
	pub destroy_round: Round,
	/// Id of the close-out payment.
	pub close_tx: TransactionId,
	/// Round the close-out confirmed in.
	pub close_round: Round,
}

impl MintEngine {
	/// Runs the full lifecycle, aborting on the first failed step.
	///
	/// The cancellation token is honored at every confirmation wait, so a
	/// shutdown signal does not have to sit out a full round budget.
	pub async fn run(&self, cancellation: CancellationToken) -> Result<MintLifecycle, MinterError> {
		let timeout_rounds = self.config().lifecycle.timeout_rounds;
		let creator = self.account.get_address().await?;
		tracing::info!(address = %creator, "Using creator account");

		// Content addressing: hash the artwork, embed its integrity
		// string in the metadata record, hash the record itself.
		let asset = &self.config().asset;
		let image_sri = content::file_sri(Path::new(&asset.image_path))?;
		let metadata = AssetMetadata {
			name: asset.asset_name.clone(),
			description: asset.description.clone(),
			image: asset.image_path.clone(),
			image_integrity: image_sri.clone(),
		};
		let metadata_hash = metadata.hash()?;
		tracing::info!(sri = %image_sri, "Hashed asset content");

		let tracker = ConfirmationTracker::with_cancellation(self.ledger.clone(), cancellation);

		// Create the NFT.
		let suggested = self.ledger.suggested_params().await?;
		let params = AssetParams {
			total: 1,
			decimals: 0,
			default_frozen: false,
			unit_name: asset.unit_name.clone(),
			asset_name: asset.asset_name.clone(),
			url: asset.url.clone(),
			metadata_hash: metadata_hash.to_vec(),
			manager: Some(creator),
		};
		let tx = minter_asset::create_nft(creator, params, &suggested, None)?;
		let (create_tx, create_info) = self.execute(&tracker, tx, timeout_rounds).await?;
		let asset_id = create_info.asset_index.ok_or_else(|| {
			MinterError::Lifecycle("Confirmed creation reported no asset id".to_string())
		})?;
		tracing::info!(asset_id, round = create_info.confirmed_round, "Asset created");

		// Destroy it again.
		let suggested = self.ledger.suggested_params().await?;
		let tx = minter_asset::destroy_asset(creator, asset_id, &suggested)?;
		let (destroy_tx, destroy_info) = self.execute(&tracker, tx, timeout_rounds).await?;
		tracing::info!(asset_id, round = destroy_info.confirmed_round, "Asset destroyed");

		// Sweep the remaining balance back to the dispenser.
		let dispenser: Address = self.config().lifecycle.dispenser.parse().map_err(|e| {
			MinterError::Lifecycle(format!("Invalid dispenser address: {}", e))
		})?;
		let suggested = self.ledger.suggested_params().await?;
		let tx = minter_asset::close_account(creator, dispenser, &suggested)?;
		let (close_tx, close_info) = self.execute(&tracker, tx, timeout_rounds).await?;
		tracing::info!(
			dispenser = %dispenser,
			round = close_info.confirmed_round,
			"Closed creator account out to dispenser"
		);

		Ok(MintLifecycle {
			creator,
			image_sri,
			metadata_hash: metadata_hash.to_vec(),
			create_tx,
			create_round: create_info.confirmed_round,
			asset_id,
			destroy_tx,
			destroy_round: destroy_info.confirmed_round,
			close_tx,
			close_round: close_info.confirmed_round,
		})
	}

	/// Signs, submits, and tracks a single transaction.
	async fn execute(
		&self,
		tracker: &ConfirmationTracker,
		tx: Transaction,
		timeout_rounds: u64,
	) -> Result<(TransactionId, PendingInfo), MinterError> {
		let signed = self.account.sign(&tx).await?;
		let tx_id = self.ledger.submit(&signed).await?;
		let info = tracker.track(&tx_id, timeout_rounds).await?;
		Ok((tx_id, info))
	}
}
