//! On-chain activity scoring for a single wallet on Base
//!
//! Pure computation: the caller supplies the wallet's transfer history
//! (outgoing followed by incoming) and gets back summary metrics and a
//! composite score in [0, 10].

use chrono::{DateTime, Utc};
use serde::Serialize;

pub mod bridges;
pub mod metrics;
pub mod scoring;
pub mod transfer;

// Re-export commonly used types
pub use metrics::{aggregate_transfers, aggregate_transfers_at, WalletMetrics};
pub use scoring::{OnChainScore, ScoreBreakdown, ScoreCalculator, ScoreResult};
pub use transfer::{dedup_transfers, TransferCategory, TransferRecord, TransferValue};

/// Metrics and score for one wallet
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletScore {
    pub metrics: WalletMetrics,
    pub score: ScoreResult,
}

/// Aggregate `transfers` for `address` and score the result
pub fn compute_wallet_score(address: &str, transfers: &[TransferRecord]) -> WalletScore {
    compute_wallet_score_at(address, transfers, Utc::now())
}

pub fn compute_wallet_score_at(
    address: &str,
    transfers: &[TransferRecord],
    now: DateTime<Utc>,
) -> WalletScore {
    let metrics = aggregate_transfers_at(transfers, address, now);
    let score = ScoreCalculator::calculate(&metrics);

    tracing::debug!(
        address = %address,
        transfers = transfers.len(),
        score = %score.total,
        "Computed wallet score"
    );

    WalletScore { metrics, score }
}
