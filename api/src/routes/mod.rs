//! API route definitions

pub mod score;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/wallets/:address/score", get(score::get_wallet_score))
}
