//! Confirmation tracking for submitted transactions.
//!
//! Converts the asynchronous question "has this transaction been included
//! in a block?" into a synchronous, bounded answer: the tracker polls the
//! node's pending-transaction view once per round until the transaction
//! confirms, is evicted from the pool, or a round-count deadline passes.

use crate::{LedgerError, LedgerService};
use minter_types::{truncate_id, PendingInfo, Round, TransactionId};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Terminal outcomes of a tracking attempt that did not end in
/// confirmation.
#[derive(Debug, Error)]
pub enum TrackError {
	/// The caller supplied an unusable argument; detected before any
	/// ledger call and never retried.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	/// A ledger call failed at the transport level. Surfaced immediately
	/// with the underlying cause; retry policy belongs to the caller.
	#[error("Network error while tracking: {0}")]
	Network(#[from] LedgerError),
	/// The node evicted the transaction from its pending pool. Terminal
	/// and certain: the transaction will never confirm.
	#[error("Transaction rejected by pool: {0}")]
	Rejected(String),
	/// The round budget ran out with no confirmation and no rejection.
	/// Terminal but inconclusive: the transaction may still confirm
	/// later, so callers needing certainty must re-query out of band.
	#[error("No confirmation by round {deadline_round}")]
	TimedOut {
		/// First round past the tracking window.
		deadline_round: Round,
	},
	/// The caller's cancellation token fired during a round-wait.
	#[error("Tracking cancelled")]
	Cancelled,
}

/// Tracks a submitted transaction until it confirms, is rejected, or a
/// round-count deadline elapses.
///
/// The deadline is a round budget relative to the round observed when
/// tracking starts, not wall-clock time. A budget of `n` allows `n + 1`
/// pending-transaction polls (one per round in the window plus the
/// initial look), so a budget of 0 still checks once before giving up.
pub struct ConfirmationTracker {
	ledger: Arc<LedgerService>,
	cancellation: CancellationToken,
}

impl ConfirmationTracker {
	/// Creates a tracker that can only be stopped by its round deadline.
	pub fn new(ledger: Arc<LedgerService>) -> Self {
		Self::with_cancellation(ledger, CancellationToken::new())
	}

	/// Creates a tracker that additionally aborts when the given token is
	/// cancelled, without waiting out the round budget.
	pub fn with_cancellation(ledger: Arc<LedgerService>, cancellation: CancellationToken) -> Self {
		Self {
			ledger,
			cancellation,
		}
	}

	/// Waits for the transaction to be included in a block.
	///
	/// Returns the confirming snapshot on success. Exactly one outcome is
	/// produced per call, polls are strictly sequential, and no ledger
	/// calls are made after a terminal outcome. A failure of the
	/// round-wait call aborts tracking as a network error: without
	/// observed round advancement the deadline accounting is meaningless.
	pub async fn track(
		&self,
		id: &TransactionId,
		timeout_rounds: u64,
	) -> Result<PendingInfo, TrackError> {
		if id.is_empty() {
			return Err(TrackError::InvalidArgument(
				"transaction id must not be empty".to_string(),
			));
		}
		if self.cancellation.is_cancelled() {
			return Err(TrackError::Cancelled);
		}

		let status = self.ledger.status().await?;
		let start_round = status.last_round + 1;
		let deadline_round = start_round + timeout_rounds;
		let mut current_round = start_round;

		loop {
			let info = self.ledger.pending_transaction(id).await?;

			if info.is_confirmed() {
				tracing::info!(
					tx_id = %truncate_id(id.as_str()),
					round = info.confirmed_round,
					"Transaction confirmed"
				);
				return Ok(info);
			}
			if info.is_rejected() {
				return Err(TrackError::Rejected(info.pool_error));
			}
			if current_round >= deadline_round {
				return Err(TrackError::TimedOut { deadline_round });
			}

			tracing::debug!(
				tx_id = %truncate_id(id.as_str()),
				round = current_round,
				"Waiting for next round"
			);
			tokio::select! {
				_ = self.cancellation.cancelled() => {
					return Err(TrackError::Cancelled);
				}
				status = self.ledger.wait_for_round_after(current_round) => {
					status?;
				}
			}
			current_round += 1;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::LedgerInterface;
	use async_trait::async_trait;
	use minter_types::{NodeStatus, SignedTransaction, SuggestedParams};
	use std::collections::VecDeque;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Mutex;
	use std::time::Duration;

	const LAST_ROUND: Round = 100;

	/// Scripted ledger: hands out pending-transaction snapshots in order
	/// and records every call it receives.
	#[derive(Default)]
	struct ScriptedLedger {
		responses: Mutex<VecDeque<Result<PendingInfo, LedgerError>>>,
		status_calls: AtomicUsize,
		pending_calls: AtomicUsize,
		wait_rounds: Mutex<Vec<Round>>,
		fail_status: bool,
		fail_wait: bool,
		hang_waits: bool,
	}

	impl ScriptedLedger {
		fn new(responses: Vec<Result<PendingInfo, LedgerError>>) -> Self {
			Self {
				responses: Mutex::new(responses.into()),
				..Default::default()
			}
		}

		fn pending_calls(&self) -> usize {
			self.pending_calls.load(Ordering::SeqCst)
		}

		fn status_calls(&self) -> usize {
			self.status_calls.load(Ordering::SeqCst)
		}

		fn wait_rounds(&self) -> Vec<Round> {
			self.wait_rounds.lock().unwrap().clone()
		}
	}

	#[async_trait]
	impl LedgerInterface for Arc<ScriptedLedger> {
		async fn status(&self) -> Result<NodeStatus, LedgerError> {
			self.status_calls.fetch_add(1, Ordering::SeqCst);
			if self.fail_status {
				return Err(LedgerError::Network("status unreachable".to_string()));
			}
			Ok(NodeStatus {
				last_round: LAST_ROUND,
			})
		}

		async fn pending_transaction(
			&self,
			_id: &TransactionId,
		) -> Result<PendingInfo, LedgerError> {
			self.pending_calls.fetch_add(1, Ordering::SeqCst);
			self.responses
				.lock()
				.unwrap()
				.pop_front()
				.unwrap_or_else(unconfirmed)
		}

		async fn wait_for_round_after(&self, round: Round) -> Result<NodeStatus, LedgerError> {
			self.wait_rounds.lock().unwrap().push(round);
			if self.fail_wait {
				return Err(LedgerError::Network("wait interrupted".to_string()));
			}
			if self.hang_waits {
				tokio::time::sleep(Duration::from_secs(3600)).await;
			}
			Ok(NodeStatus { last_round: round })
		}

		async fn suggested_params(&self) -> Result<SuggestedParams, LedgerError> {
			Ok(SuggestedParams::default())
		}

		async fn submit(&self, _signed: &SignedTransaction) -> Result<TransactionId, LedgerError> {
			unreachable!("tracker never submits")
		}
	}

	fn unconfirmed() -> Result<PendingInfo, LedgerError> {
		Ok(PendingInfo::default())
	}

	fn confirmed(round: Round) -> Result<PendingInfo, LedgerError> {
		Ok(PendingInfo {
			confirmed_round: round,
			..Default::default()
		})
	}

	fn rejected(reason: &str) -> Result<PendingInfo, LedgerError> {
		Ok(PendingInfo {
			pool_error: reason.to_string(),
			..Default::default()
		})
	}

	fn tracker_over(ledger: ScriptedLedger) -> (ConfirmationTracker, Arc<ScriptedLedger>) {
		let ledger = Arc::new(ledger);
		let service = Arc::new(LedgerService::new(Box::new(ledger.clone())));
		(ConfirmationTracker::new(service), ledger)
	}

	fn tx_id() -> TransactionId {
		TransactionId::new("NBGJXYJ5HQMBSH3LES4BCGJ2RTXQQDEMOTXIDAAAAAAAAAAAAAAA")
	}

	#[tokio::test]
	async fn test_empty_id_fails_without_ledger_calls() {
		let (tracker, ledger) = tracker_over(ScriptedLedger::new(vec![]));

		let result = tracker.track(&TransactionId::new(""), 4).await;

		assert!(matches!(result, Err(TrackError::InvalidArgument(_))));
		assert_eq!(ledger.status_calls(), 0);
		assert_eq!(ledger.pending_calls(), 0);
	}

	#[tokio::test]
	async fn test_immediate_confirmation_polls_once() {
		let (tracker, ledger) =
			tracker_over(ScriptedLedger::new(vec![confirmed(LAST_ROUND + 1)]));

		let info = tracker.track(&tx_id(), 4).await.unwrap();

		assert_eq!(info.confirmed_round, LAST_ROUND + 1);
		assert_eq!(ledger.status_calls(), 1);
		assert_eq!(ledger.pending_calls(), 1);
		assert!(ledger.wait_rounds().is_empty());
	}

	#[tokio::test]
	async fn test_rejection_short_circuits() {
		let (tracker, ledger) = tracker_over(ScriptedLedger::new(vec![
			unconfirmed(),
			unconfirmed(),
			rejected("transaction dead: overspend"),
		]));

		let result = tracker.track(&tx_id(), 10).await;

		match result {
			Err(TrackError::Rejected(reason)) => assert!(reason.contains("overspend")),
			other => panic!("expected rejection, got {:?}", other),
		}
		assert_eq!(ledger.pending_calls(), 3);
		assert_eq!(ledger.wait_rounds().len(), 2);
	}

	#[tokio::test]
	async fn test_timeout_polls_budget_plus_one() {
		let (tracker, ledger) = tracker_over(ScriptedLedger::new(vec![]));

		let result = tracker.track(&tx_id(), 3).await;

		match result {
			Err(TrackError::TimedOut { deadline_round }) => {
				assert_eq!(deadline_round, LAST_ROUND + 1 + 3);
			}
			other => panic!("expected timeout, got {:?}", other),
		}
		assert_eq!(ledger.pending_calls(), 4);
		assert_eq!(ledger.wait_rounds().len(), 3);
	}

	#[tokio::test]
	async fn test_zero_budget_still_polls_once() {
		let (tracker, ledger) = tracker_over(ScriptedLedger::new(vec![]));

		let result = tracker.track(&tx_id(), 0).await;

		assert!(matches!(result, Err(TrackError::TimedOut { .. })));
		assert_eq!(ledger.pending_calls(), 1);
		assert!(ledger.wait_rounds().is_empty());
	}

	#[tokio::test]
	async fn test_waited_rounds_are_strictly_increasing() {
		let (tracker, ledger) = tracker_over(ScriptedLedger::new(vec![]));

		let _ = tracker.track(&tx_id(), 4).await;

		let start = LAST_ROUND + 1;
		let deadline = start + 4;
		assert_eq!(
			ledger.wait_rounds(),
			vec![start, start + 1, start + 2, start + 3]
		);
		assert!(ledger.wait_rounds().iter().all(|&r| r < deadline));
	}

	#[tokio::test]
	async fn test_status_failure_propagates_before_polling() {
		let ledger = ScriptedLedger {
			fail_status: true,
			..Default::default()
		};
		let (tracker, ledger) = tracker_over(ledger);

		let result = tracker.track(&tx_id(), 4).await;

		assert!(matches!(result, Err(TrackError::Network(_))));
		assert_eq!(ledger.pending_calls(), 0);
	}

	#[tokio::test]
	async fn test_poll_failure_stops_tracking() {
		let (tracker, ledger) = tracker_over(ScriptedLedger::new(vec![
			unconfirmed(),
			Err(LedgerError::Network("connection reset".to_string())),
			confirmed(LAST_ROUND + 3),
		]));

		let result = tracker.track(&tx_id(), 10).await;

		assert!(matches!(result, Err(TrackError::Network(_))));
		assert_eq!(ledger.pending_calls(), 2);
		assert_eq!(ledger.wait_rounds().len(), 1);
	}

	#[tokio::test]
	async fn test_round_wait_failure_aborts_tracking() {
		let ledger = ScriptedLedger {
			fail_wait: true,
			..Default::default()
		};
		let (tracker, ledger) = tracker_over(ledger);

		let result = tracker.track(&tx_id(), 4).await;

		assert!(matches!(result, Err(TrackError::Network(_))));
		assert_eq!(ledger.pending_calls(), 1);
		assert_eq!(ledger.wait_rounds().len(), 1);
	}

	#[tokio::test]
	async fn test_confirmation_after_three_round_waits() {
		// Budget 4 starting after round 100: polls at rounds 101-103 see
		// nothing, the fourth poll reports inclusion in round 104.
		let (tracker, ledger) = tracker_over(ScriptedLedger::new(vec![
			unconfirmed(),
			unconfirmed(),
			unconfirmed(),
			confirmed(104),
		]));

		let info = tracker.track(&tx_id(), 4).await.unwrap();

		assert_eq!(info.confirmed_round, 104);
		assert_eq!(ledger.pending_calls(), 4);
		assert_eq!(ledger.wait_rounds(), vec![101, 102, 103]);
	}

	#[tokio::test(start_paused = true)]
	async fn test_cancellation_interrupts_round_wait() {
		let ledger = Arc::new(ScriptedLedger {
			hang_waits: true,
			..Default::default()
		});
		let service = Arc::new(LedgerService::new(Box::new(ledger.clone())));
		let token = CancellationToken::new();
		let tracker = ConfirmationTracker::with_cancellation(service, token.clone());

		let cancel = token.clone();
		tokio::spawn(async move {
			tokio::time::sleep(Duration::from_millis(10)).await;
			cancel.cancel();
		});

		let result = tracker.track(&tx_id(), 100).await;

		assert!(matches!(result, Err(TrackError::Cancelled)));
		assert_eq!(ledger.pending_calls(), 1);
	}

	#[tokio::test]
	async fn test_already_cancelled_token_skips_ledger_entirely() {
		let ledger = Arc::new(ScriptedLedger::default());
		let service = Arc::new(LedgerService::new(Box::new(ledger.clone())));
		let token = CancellationToken::new();
		token.cancel();
		let tracker = ConfirmationTracker::with_cancellation(service, token);

		let result = tracker.track(&tx_id(), 4).await;

		assert!(matches!(result, Err(TrackError::Cancelled)));
		assert_eq!(ledger.status_calls(), 0);
		assert_eq!(ledger.pending_calls(), 0);
	}
}
