//! Transaction and asset-parameter types.
//!
//! Transactions carry a common header (sender, fee, validity window,
//! genesis identity) plus a kind-specific body. The canonical signing
//! payload is the domain-tagged canonical encoding of the whole
//! transaction; the transaction id is derived from the same bytes.

use crate::account::{Address, Signature};
use crate::ledger::{Round, TransactionId};
use crate::utils::base32_encode;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512_256};

/// Domain separation tag prepended to a transaction's canonical bytes
/// before signing and id derivation.
const TRANSACTION_DOMAIN_TAG: &[u8] = b"TX";

/// Parameters of an asset held on the ledger.
///
/// For an NFT the total supply is exactly 1 and decimals exactly 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetParams {
	/// Total number of base units of the asset.
	pub total: u64,
	/// Number of digits after the decimal point.
	pub decimals: u32,
	/// Whether holdings are frozen by default.
	pub default_frozen: bool,
	/// Short ticker-style name, at most 8 bytes.
	pub unit_name: String,
	/// Full asset name, at most 32 bytes.
	pub asset_name: String,
	/// URL pointing at the asset's metadata record, at most 96 bytes.
	pub url: String,
	/// 32-byte commitment to the metadata record.
	pub metadata_hash: Vec<u8>,
	/// Account allowed to reconfigure or destroy the asset.
	pub manager: Option<Address>,
}

/// Kind-specific transaction body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransactionKind {
	/// Creates a new asset with the given parameters.
	AssetCreate(AssetParams),
	/// Destroys an existing asset. Only valid from the asset manager
	/// while the manager holds the entire supply.
	AssetDestroy {
		/// Id of the asset to destroy.
		asset_id: u64,
	},
	/// Moves funds between accounts.
	Payment {
		/// Receiving account.
		receiver: Address,
		/// Amount in microunits.
		amount: u64,
		/// When set, the sender's remaining balance is swept to this
		/// account and the sender is closed out of the ledger.
		close_to: Option<Address>,
	},
}

/// A transaction ready for signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
	/// Sending account.
	pub sender: Address,
	/// Fee in microunits.
	pub fee: u64,
	/// First round the transaction is valid in.
	pub first_valid: Round,
	/// Last round the transaction is valid in.
	pub last_valid: Round,
	/// Genesis id of the target network.
	pub genesis_id: String,
	/// Base64 genesis hash of the target network.
	pub genesis_hash: String,
	/// Optional free-form note.
	pub note: Option<Vec<u8>>,
	/// Kind-specific body.
	pub kind: TransactionKind,
}

impl Transaction {
	/// Returns the domain-tagged canonical bytes that are signed.
	pub fn signing_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
		let mut payload = TRANSACTION_DOMAIN_TAG.to_vec();
		payload.extend(serde_json::to_vec(self)?);
		Ok(payload)
	}

	/// Derives the transaction id: base32 of the SHA-512/256 digest of
	/// the signing payload.
	pub fn id(&self) -> Result<TransactionId, serde_json::Error> {
		let digest = Sha512_256::digest(self.signing_payload()?);
		Ok(TransactionId::new(base32_encode(&digest)))
	}
}

/// A transaction together with its authorizing signature and derived id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
	/// The signed transaction.
	pub transaction: Transaction,
	/// Signature over the transaction's signing payload.
	pub signature: Signature,
	/// Id derived from the transaction's canonical bytes.
	pub id: TransactionId,
}
