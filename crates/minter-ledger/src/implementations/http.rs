//! HTTP ledger client for algod-style REST nodes.
//!
//! Implements the ledger boundary over the node's v2 REST surface. All
//! transport failures map to network errors carrying the underlying
//! cause; non-success responses from the node itself are surfaced as API
//! errors with the node's message.

use crate::{LedgerError, LedgerInterface};
use async_trait::async_trait;
use minter_types::{
	truncate_id, NodeStatus, PendingInfo, Round, SignedTransaction, SuggestedParams, TransactionId,
};
use serde::Deserialize;

/// Header carrying the node API token.
const TOKEN_HEADER: &str = "X-Algo-API-Token";
/// Number of rounds a built transaction stays valid for.
const VALIDITY_WINDOW: Round = 1000;

/// HTTP-backed ledger client.
pub struct HttpLedger {
	client: reqwest::Client,
	base_url: String,
	token: String,
}

impl HttpLedger {
	/// Creates a new client against the given node URL and API token.
	pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
		Self {
			client: reqwest::Client::new(),
			base_url: base_url.into().trim_end_matches('/').to_string(),
			token: token.into(),
		}
	}

	async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, LedgerError> {
		let response = self
			.client
			.get(format!("{}{}", self.base_url, path))
			.header(TOKEN_HEADER, &self.token)
			.send()
			.await
			.map_err(|e| LedgerError::Network(format!("Request to {} failed: {}", path, e)))?;

		if !response.status().is_success() {
			let status = response.status();
			let body = response.text().await.unwrap_or_default();
			return Err(LedgerError::Api(format!("{} returned {}: {}", path, status, body)));
		}

		response
			.json::<T>()
			.await
			.map_err(|e| LedgerError::Network(format!("Invalid response from {}: {}", path, e)))
	}
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
	#[serde(rename = "last-round")]
	last_round: Round,
}

impl From<StatusResponse> for NodeStatus {
	fn from(response: StatusResponse) -> Self {
		NodeStatus {
			last_round: response.last_round,
		}
	}
}

#[derive(Debug, Deserialize)]
struct PendingResponse {
	#[serde(rename = "confirmed-round", default)]
	confirmed_round: Round,
	#[serde(rename = "pool-error", default)]
	pool_error: String,
	#[serde(rename = "asset-index", default)]
	asset_index: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ParamsResponse {
	#[serde(default)]
	fee: u64,
	#[serde(rename = "min-fee")]
	min_fee: u64,
	#[serde(rename = "last-round")]
	last_round: Round,
	#[serde(rename = "genesis-id")]
	genesis_id: String,
	#[serde(rename = "genesis-hash")]
	genesis_hash: String,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
	#[serde(rename = "txId")]
	tx_id: String,
}

#[async_trait]
impl LedgerInterface for HttpLedger {
	async fn status(&self) -> Result<NodeStatus, LedgerError> {
		Ok(self.get::<StatusResponse>("/v2/status").await?.into())
	}

	async fn pending_transaction(&self, id: &TransactionId) -> Result<PendingInfo, LedgerError> {
		let response: PendingResponse = self
			.get(&format!("/v2/transactions/pending/{}", id))
			.await?;
		Ok(PendingInfo {
			confirmed_round: response.confirmed_round,
			pool_error: response.pool_error,
			asset_index: response.asset_index,
		})
	}

	async fn wait_for_round_after(&self, round: Round) -> Result<NodeStatus, LedgerError> {
		Ok(self
			.get::<StatusResponse>(&format!("/v2/status/wait-for-block-after/{}", round))
			.await?
			.into())
	}

	async fn suggested_params(&self) -> Result<SuggestedParams, LedgerError> {
		let response: ParamsResponse = self.get("/v2/transactions/params").await?;
		Ok(SuggestedParams {
			fee: response.fee,
			min_fee: response.min_fee,
			first_valid: response.last_round,
			last_valid: response.last_round + VALIDITY_WINDOW,
			genesis_id: response.genesis_id,
			genesis_hash: response.genesis_hash,
		})
	}

	async fn submit(&self, signed: &SignedTransaction) -> Result<TransactionId, LedgerError> {
		let response = self
			.client
			.post(format!("{}/v2/transactions", self.base_url))
			.header(TOKEN_HEADER, &self.token)
			.json(signed)
			.send()
			.await
			.map_err(|e| LedgerError::Network(format!("Submit failed: {}", e)))?;

		if !response.status().is_success() {
			let status = response.status();
			let body = response.text().await.unwrap_or_default();
			return Err(LedgerError::Api(format!("Submit returned {}: {}", status, body)));
		}

		let submitted: SubmitResponse = response
			.json()
			.await
			.map_err(|e| LedgerError::Network(format!("Invalid submit response: {}", e)))?;
		tracing::info!(tx_id = %truncate_id(&submitted.tx_id), "Submitted transaction");
		Ok(TransactionId::new(submitted.tx_id))
	}
}

/// Factory function to create an HTTP ledger client from configuration.
///
/// Configuration parameters:
/// - `url` (required): base URL of the node's REST endpoint
/// - `token` (optional): API token sent with every request
pub fn create_http_ledger(config: &toml::Value) -> Result<Box<dyn LedgerInterface>, LedgerError> {
	let url = config
		.get("url")
		.and_then(|v| v.as_str())
		.ok_or_else(|| LedgerError::Api("Ledger url is required".to_string()))?;
	let token = config
		.get("token")
		.and_then(|v| v.as_str())
		.unwrap_or_default();
	Ok(Box::new(HttpLedger::new(url, token)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_response_field_names() {
		let status: StatusResponse = serde_json::from_str(r#"{"last-round": 27423079}"#).unwrap();
		assert_eq!(NodeStatus::from(status).last_round, 27423079);
	}

	#[test]
	fn test_pending_response_defaults_for_unknown_transaction() {
		// A node that does not know the transaction omits every field.
		let pending: PendingResponse = serde_json::from_str(r#"{}"#).unwrap();
		assert_eq!(pending.confirmed_round, 0);
		assert!(pending.pool_error.is_empty());
		assert!(pending.asset_index.is_none());
	}

	#[test]
	fn test_pending_response_confirmed_with_asset() {
		let pending: PendingResponse = serde_json::from_str(
			r#"{"confirmed-round": 104, "pool-error": "", "asset-index": 87234773}"#,
		)
		.unwrap();
		assert_eq!(pending.confirmed_round, 104);
		assert_eq!(pending.asset_index, Some(87234773));
	}

	#[test]
	fn test_params_response_builds_validity_window() {
		let params: ParamsResponse = serde_json::from_str(
			r#"{
				"fee": 0,
				"min-fee": 1000,
				"last-round": 500,
				"genesis-id": "testnet-v1.0",
				"genesis-hash": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI="
			}"#,
		)
		.unwrap();
		assert_eq!(params.min_fee, 1000);
		assert_eq!(params.last_round, 500);
	}

	#[test]
	fn test_factory_requires_url() {
		let empty = toml::Value::Table(Default::default());
		assert!(matches!(
			create_http_ledger(&empty),
			Err(LedgerError::Api(_))
		));

		let config: toml::Value = toml::from_str(
			"url = \"https://testnet-api.example.net\"\ntoken = \"secret\"",
		)
		.unwrap();
		assert!(create_http_ledger(&config).is_ok());
	}

	#[test]
	fn test_base_url_trailing_slash_is_normalized() {
		let ledger = HttpLedger::new("https://node.example.net/", "");
		assert_eq!(ledger.base_url, "https://node.example.net");
	}
}
