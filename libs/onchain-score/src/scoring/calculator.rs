//! On-chain score calculator
//!
//! Calculates a score from 0.0-10.0 for a wallet. Each term is a linear
//! ratio capped on its own before summation, so no single metric can
//! carry a wallet past its share of the total.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::metrics::WalletMetrics;

mod weights {
    pub const TXN_PER_POINT: f64 = 500.0;
    pub const TXN_CAP: f64 = 3.0;
    pub const NFT_PER_POINT: f64 = 20.0;
    pub const NFT_CAP: f64 = 2.0;
    pub const MONTHS_PER_POINT: f64 = 36.0;
    pub const AGE_CAP: f64 = 2.0;
    pub const COUNTERPARTIES_PER_POINT: f64 = 50.0;
    pub const COUNTERPARTY_CAP: f64 = 1.5;
    pub const ETH_PER_POINT: f64 = 1000.0;
    pub const VOLUME_CAP: f64 = 1.5;
    pub const MAX_SCORE: f64 = 10.0;
}

/// Score rounded to one decimal place, displayed as e.g. `4.7`
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct OnChainScore(f64);

impl OnChainScore {
    fn from_raw(raw: f64) -> Self {
        Self(round_one_decimal(raw.clamp(0.0, weights::MAX_SCORE)))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for OnChainScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Serialize for OnChainScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of on-chain score calculation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Total score (0.0-10.0, one decimal)
    pub total: OnChainScore,
    /// Unrounded sum of the capped terms
    pub raw_total: f64,
    /// Per-term breakdown
    pub breakdown: Vec<ScoreBreakdown>,
}

/// Individual score term breakdown
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub name: String,
    pub score: f64,
    pub max_score: f64,
    pub reason: String,
}

/// On-chain score calculator
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Calculate the on-chain score (0-10) for a wallet
    /// Activity (0-3) + Collectibles (0-2) + Longevity (0-2)
    /// + Breadth (0-1.5) + Volume (0-1.5) = Total Score
    pub fn calculate(metrics: &WalletMetrics) -> ScoreResult {
        let breakdown = vec![
            capped_term(
                "Activity",
                metrics.txn_count as f64,
                weights::TXN_PER_POINT,
                weights::TXN_CAP,
                format!("{} transfers", metrics.txn_count),
            ),
            capped_term(
                "Collectibles",
                metrics.nft_count as f64,
                weights::NFT_PER_POINT,
                weights::NFT_CAP,
                format!("{} NFT transfers", metrics.nft_count),
            ),
            capped_term(
                "Longevity",
                metrics.wallet_age_months as f64,
                weights::MONTHS_PER_POINT,
                weights::AGE_CAP,
                format!("{} months since first transfer", metrics.wallet_age_months),
            ),
            capped_term(
                "Breadth",
                metrics.unique_counterparty_count as f64,
                weights::COUNTERPARTIES_PER_POINT,
                weights::COUNTERPARTY_CAP,
                format!("{} contracts interacted", metrics.unique_counterparty_count),
            ),
            capped_term(
                "Volume",
                metrics.total_volume,
                weights::ETH_PER_POINT,
                weights::VOLUME_CAP,
                format!("{:.2} ETH transacted", metrics.total_volume),
            ),
        ];

        let raw_total = breakdown
            .iter()
            .map(|term| term.score)
            .sum::<f64>()
            .min(weights::MAX_SCORE);

        ScoreResult {
            total: OnChainScore::from_raw(raw_total),
            raw_total,
            breakdown,
        }
    }

    /// Get a human-readable rating based on score
    pub fn get_rating(score: OnChainScore) -> &'static str {
        match score.value() {
            s if s >= 8.0 => "Excellent",
            s if s >= 6.0 => "Good",
            s if s >= 4.0 => "Fair",
            s if s >= 2.0 => "Emerging",
            _ => "Newcomer",
        }
    }

    /// Get rating color (for UI)
    pub fn get_rating_color(score: OnChainScore) -> &'static str {
        match score.value() {
            s if s >= 8.0 => "green",
            s if s >= 6.0 => "lime",
            s if s >= 4.0 => "yellow",
            s if s >= 2.0 => "orange",
            _ => "red",
        }
    }
}

fn capped_term(name: &str, value: f64, per_point: f64, cap: f64, reason: String) -> ScoreBreakdown {
    let score = (value / per_point).clamp(0.0, cap);

    ScoreBreakdown {
        name: name.to_string(),
        score,
        max_score: cap,
        reason,
    }
}

/// Round a non-negative value to one decimal from its exact binary expansion,
/// ties going up. `0.35_f64` is really `0.3499…` and rounds down; `0.25` is
/// an exact tie and rounds up.
fn round_one_decimal(value: f64) -> f64 {
    // 60 places holds the full expansion of any f64 in 0..=10
    let exact = format!("{:.60}", value);
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits = fraction.bytes().map(|d| u64::from(d - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);

    let mut scaled = whole.parse::<u64>().unwrap_or(0) * 10 + tenths;
    if hundredths >= 5 {
        scaled += 1;
    }

    scaled as f64 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_wallet() {
        let result = ScoreCalculator::calculate(&WalletMetrics::default());

        assert_eq!(result.total.value(), 0.0);
        assert_eq!(result.total.to_string(), "0.0");
        assert_eq!(result.breakdown.len(), 5);
    }

    #[test]
    fn test_perfect_wallet() {
        let metrics = WalletMetrics {
            txn_count: 10_000,
            nft_count: 500,
            wallet_age_months: 120,
            unique_counterparty_count: 1_000,
            total_volume: 1_000_000.0,
            ..Default::default()
        };

        let result = ScoreCalculator::calculate(&metrics);

        assert_eq!(result.total.to_string(), "10.0");
        for term in &result.breakdown {
            assert_eq!(term.score, term.max_score);
        }
        let caps: f64 = result.breakdown.iter().map(|t| t.max_score).sum();
        assert_eq!(caps, 10.0);
    }

    #[test]
    fn test_activity_term_capped() {
        let metrics = WalletMetrics {
            txn_count: u64::MAX,
            ..Default::default()
        };

        let result = ScoreCalculator::calculate(&metrics);

        assert_eq!(result.total.to_string(), "3.0");
    }

    #[test]
    fn test_mixed_wallet_rounds_at_the_end() {
        let metrics = WalletMetrics {
            txn_count: 1000,
            nft_count: 0,
            wallet_age_months: 48,
            unique_counterparty_count: 10,
            total_volume: 1200.0,
            ..Default::default()
        };

        let result = ScoreCalculator::calculate(&metrics);

        assert!((result.raw_total - 4.7333).abs() < 1e-3);
        assert_eq!(result.total.to_string(), "4.7");
        assert_eq!(
            serde_json::to_value(result.total).unwrap(),
            serde_json::json!("4.7")
        );
    }

    #[test]
    fn test_rounds_exact_binary_value() {
        // 175 / 500 is 0.34999999999999997779... in binary
        let below_tie = WalletMetrics {
            txn_count: 175,
            ..Default::default()
        };
        assert_eq!(ScoreCalculator::calculate(&below_tie).total.to_string(), "0.3");

        // 125 / 500 is exactly 0.25
        let exact_tie = WalletMetrics {
            txn_count: 125,
            ..Default::default()
        };
        assert_eq!(ScoreCalculator::calculate(&exact_tie).total.to_string(), "0.3");

        assert_eq!(round_one_decimal(0.0), 0.0);
        assert_eq!(round_one_decimal(9.96), 10.0);
        assert_eq!(round_one_decimal(10.0), 10.0);
        assert_eq!(round_one_decimal(1e-300), 0.0);
    }

    #[test]
    fn test_score_bounds() {
        let samples = [
            (0, 0, 0, 0, 0.0),
            (1, 1, 1, 1, 0.001),
            (250, 10, 18, 25, 500.0),
            (5_000, 5_000, 5_000, 5_000, 5e9),
        ];

        for (txns, nfts, months, peers, volume) in samples {
            let metrics = WalletMetrics {
                txn_count: txns,
                nft_count: nfts,
                wallet_age_months: months,
                unique_counterparty_count: peers,
                total_volume: volume,
                ..Default::default()
            };
            let score = ScoreCalculator::calculate(&metrics).total.value();
            assert!((0.0..=10.0).contains(&score));
        }
    }

    #[test]
    fn test_rating() {
        let score = |v: f64| OnChainScore::from_raw(v);
        assert_eq!(ScoreCalculator::get_rating(score(8.5)), "Excellent");
        assert_eq!(ScoreCalculator::get_rating(score(6.5)), "Good");
        assert_eq!(ScoreCalculator::get_rating(score(4.7)), "Fair");
        assert_eq!(ScoreCalculator::get_rating(score(2.0)), "Emerging");
        assert_eq!(ScoreCalculator::get_rating(score(0.3)), "Newcomer");
        assert_eq!(ScoreCalculator::get_rating_color(score(9.0)), "green");
    }
}
