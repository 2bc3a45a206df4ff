//! Wallet score API routes

use std::sync::Arc;

use alchemy_transfers::validate_address;
use axum::{
    extract::{Path, State},
    Json,
};
use onchain_score::{compute_wallet_score, ScoreBreakdown, ScoreCalculator, WalletScore};
use serde::Serialize;

use crate::{error::ApiError, AppState};

/// Score card response - matches the frontend score card
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletScoreResponse {
    pub address: String,
    pub on_chain_score: String,
    pub rating: String,
    pub rating_color: String,
    pub txn_count: u64,
    pub nft_count: u64,
    pub contracts_interacted: u64,
    pub bridged_volume: String,
    pub transacted_volume: String,
    pub transacted_volume_num: f64,
    pub wallet_age: String,
    pub wallet_age_months: u64,
    pub breakdown: Vec<ScoreBreakdown>,
}

impl From<WalletScore> for WalletScoreResponse {
    fn from(s: WalletScore) -> Self {
        let m = s.metrics;
        Self {
            on_chain_score: s.score.total.to_string(),
            rating: ScoreCalculator::get_rating(s.score.total).to_string(),
            rating_color: ScoreCalculator::get_rating_color(s.score.total).to_string(),
            txn_count: m.txn_count,
            nft_count: m.nft_count,
            contracts_interacted: m.unique_counterparty_count,
            bridged_volume: format!("{:.2} ETH", m.bridged_volume),
            transacted_volume: format!("{:.2} ETH", m.total_volume),
            transacted_volume_num: m.total_volume,
            wallet_age: format!("{:.1} years", m.wallet_age_years()),
            wallet_age_months: m.wallet_age_months,
            breakdown: s.score.breakdown,
            address: m.address,
        }
    }
}

/// GET /api/wallets/:address/score
/// Fetches the wallet's transfers and returns its on-chain score
pub async fn get_wallet_score(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<WalletScoreResponse>, ApiError> {
    validate_address(&address)?;

    let transfers = state.client.fetch_all(&address).await?;
    let score = compute_wallet_score(&address, &transfers);

    tracing::info!(
        address = %address,
        transfers = transfers.len(),
        score = %score.score.total,
        "Scored wallet"
    );

    Ok(Json(score.into()))
}
