//! Account-related types for the minter system.
//!
//! Addresses are 32-byte ed25519 public keys rendered in the ledger's
//! human-readable form: unpadded base32 over the key followed by a 4-byte
//! SHA-512/256 checksum, 58 characters in total.

use crate::utils::{base32_decode, base32_encode};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512_256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of the checksum suffix appended to an encoded address.
const CHECKSUM_LEN: usize = 4;
/// Length of the human-readable address form.
const ENCODED_ADDRESS_LEN: usize = 58;

/// Errors produced when parsing the human-readable address form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
	/// The string is not 58 characters long.
	#[error("Invalid address length: expected {ENCODED_ADDRESS_LEN} characters, got {0}")]
	Length(usize),
	/// The string contains characters outside the base32 alphabet.
	#[error("Invalid base32 encoding in address")]
	Encoding,
	/// The trailing checksum does not match the public key.
	#[error("Address checksum mismatch")]
	Checksum,
}

/// A ledger account address backed by an ed25519 public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 32]);

impl Address {
	/// Creates an address from raw public key bytes.
	pub fn new(public_key: [u8; 32]) -> Self {
		Self(public_key)
	}

	/// Returns the raw public key bytes.
	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}

	fn checksum(&self) -> [u8; CHECKSUM_LEN] {
		let digest = Sha512_256::digest(self.0);
		let mut checksum = [0u8; CHECKSUM_LEN];
		checksum.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
		checksum
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut bytes = [0u8; 32 + CHECKSUM_LEN];
		bytes[..32].copy_from_slice(&self.0);
		bytes[32..].copy_from_slice(&self.checksum());
		f.write_str(&base32_encode(&bytes))
	}
}

impl FromStr for Address {
	type Err = AddressParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.len() != ENCODED_ADDRESS_LEN {
			return Err(AddressParseError::Length(s.len()));
		}
		let bytes = base32_decode(s).ok_or(AddressParseError::Encoding)?;
		if bytes.len() < 32 + CHECKSUM_LEN {
			return Err(AddressParseError::Encoding);
		}
		let mut public_key = [0u8; 32];
		public_key.copy_from_slice(&bytes[..32]);
		let address = Address(public_key);
		if bytes[32..32 + CHECKSUM_LEN] != address.checksum() {
			return Err(AddressParseError::Checksum);
		}
		Ok(address)
	}
}

impl Serialize for Address {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> Deserialize<'de> for Address {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(de::Error::custom)
	}
}

/// An ed25519 signature over a transaction's signing payload.
///
/// Stored as raw bytes to keep the wire representation flexible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(pub Vec<u8>);
