//! Local ed25519 account implementation.
//!
//! Keys live in process memory: either generated from OS entropy for
//! throwaway demo accounts, or restored from a configured 32-byte hex
//! seed. The address is the public key in its checksummed base32 form.

use crate::{AccountError, AccountInterface};
use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use minter_types::{Address, Signature, SignedTransaction, Transaction};
use rand::rngs::OsRng;
use rand::RngCore;

/// In-memory ed25519 account.
pub struct LocalAccount {
	signing_key: SigningKey,
}

impl LocalAccount {
	/// Generates a fresh account from OS entropy.
	pub fn generate() -> Self {
		let mut seed = [0u8; 32];
		OsRng.fill_bytes(&mut seed);
		Self::from_seed(seed)
	}

	/// Restores an account from a 32-byte seed.
	pub fn from_seed(seed: [u8; 32]) -> Self {
		Self {
			signing_key: SigningKey::from_bytes(&seed),
		}
	}

	/// Restores an account from a hex-encoded 32-byte seed.
	pub fn from_seed_hex(seed: &str) -> Result<Self, AccountError> {
		let bytes = hex::decode(seed.trim_start_matches("0x"))
			.map_err(|e| AccountError::InvalidKey(format!("Invalid hex seed: {}", e)))?;
		let seed: [u8; 32] = bytes
			.try_into()
			.map_err(|_| AccountError::InvalidKey("Seed must be exactly 32 bytes".to_string()))?;
		Ok(Self::from_seed(seed))
	}

	/// Returns the account's address.
	pub fn account_address(&self) -> Address {
		Address::new(self.signing_key.verifying_key().to_bytes())
	}
}

#[async_trait]
impl AccountInterface for LocalAccount {
	async fn address(&self) -> Result<Address, AccountError> {
		Ok(self.account_address())
	}

	async fn sign_transaction(&self, tx: &Transaction) -> Result<SignedTransaction, AccountError> {
		let payload = tx
			.signing_payload()
			.map_err(|e| AccountError::SigningFailed(format!("Failed to encode transaction: {}", e)))?;
		let signature = self.signing_key.sign(&payload);
		let id = tx
			.id()
			.map_err(|e| AccountError::SigningFailed(format!("Failed to derive id: {}", e)))?;
		Ok(SignedTransaction {
			transaction: tx.clone(),
			signature: Signature(signature.to_bytes().to_vec()),
			id,
		})
	}
}

/// Factory function to create a local account from configuration.
///
/// Configuration parameters:
/// - `seed` (optional): hex-encoded 32-byte seed. A fresh account is
///   generated from OS entropy when absent.
pub fn create_account(config: &toml::Value) -> Result<Box<dyn AccountInterface>, AccountError> {
	match config.get("seed").and_then(|v| v.as_str()) {
		Some(seed) => Ok(Box::new(LocalAccount::from_seed_hex(seed)?)),
		None => Ok(Box::new(LocalAccount::generate())),
	}
}
