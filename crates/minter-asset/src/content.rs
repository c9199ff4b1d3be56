//! Content-addressing helpers for asset metadata.
//!
//! The demo pins its artwork and metadata by content: the source file is
//! hashed with SHA-256, rendered as a subresource-integrity string inside
//! the metadata record, and the record itself is hashed again to produce
//! the 32-byte commitment embedded in the asset-creation transaction.

use crate::AssetError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

/// Hashes a file's contents with SHA-256.
pub fn hash_file(path: &Path) -> Result<[u8; 32], AssetError> {
	let mut file = File::open(path).map_err(|source| AssetError::Io {
		path: path.display().to_string(),
		source,
	})?;
	let mut hasher = Sha256::new();
	io::copy(&mut file, &mut hasher).map_err(|source| AssetError::Io {
		path: path.display().to_string(),
		source,
	})?;
	Ok(hasher.finalize().into())
}

/// Returns the subresource-integrity string for a file: `sha256-` followed
/// by the base64 digest of its contents.
pub fn file_sri(path: &Path) -> Result<String, AssetError> {
	Ok(format!("sha256-{}", BASE64.encode(hash_file(path)?)))
}

/// ARC-3-style metadata record describing an NFT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
	/// Asset name, mirrored in the on-ledger parameters.
	pub name: String,
	/// Optional human-readable description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Location of the artwork.
	pub image: String,
	/// Integrity string for the artwork file.
	pub image_integrity: String,
}

impl AssetMetadata {
	/// Serializes the record to its canonical JSON form.
	pub fn to_json(&self) -> Result<String, AssetError> {
		serde_json::to_string_pretty(self).map_err(|e| AssetError::Encode(e.to_string()))
	}

	/// Hashes the canonical JSON form into the 32-byte commitment the
	/// asset-creation transaction carries.
	pub fn hash(&self) -> Result<[u8; 32], AssetError> {
		let json = serde_json::to_vec(self).map_err(|e| AssetError::Encode(e.to_string()))?;
		Ok(Sha256::digest(json).into())
	}
}
