//! On-chain score module
//!
//! Maps [`WalletMetrics`](crate::metrics::WalletMetrics) to a score in [0, 10]
//! from five independently capped terms:
//! - Activity (0-3): transfer count
//! - Collectibles (0-2): NFT transfers
//! - Longevity (0-2): wallet age
//! - Breadth (0-1.5): distinct counterparties
//! - Volume (0-1.5): native volume

pub mod calculator;

pub use calculator::{OnChainScore, ScoreBreakdown, ScoreCalculator, ScoreResult};
