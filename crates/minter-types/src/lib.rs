//! Common types module for the asset minter system.
//!
//! This module defines the core data types and structures used throughout
//! the minter. It provides a centralized location for shared types to
//! ensure consistency across all components.

/// Account-related types for addresses and signatures.
pub mod account;
/// Ledger observation types: rounds, node status, pending snapshots.
pub mod ledger;
/// Transaction and asset-parameter types.
pub mod transaction;
/// Utility functions for encoding and display.
pub mod utils;

// Re-export all types for convenient access
pub use account::*;
pub use ledger::*;
pub use transaction::*;
pub use utils::{base32_decode, base32_encode, truncate_id};
