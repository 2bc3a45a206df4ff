//! Transfer aggregation
//!
//! Reduces the combined inbound + outbound transfer list of one wallet
//! into the [`WalletMetrics`] consumed by the score calculator.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{bridges, transfer::TransferRecord};

/// Days per month used for wallet age
const DAYS_PER_MONTH: i64 = 30;

/// Summary metrics for one wallet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletMetrics {
    /// Queried address, as supplied
    pub address: String,
    pub txn_count: u64,
    /// erc721 + erc1155 transfers
    pub nft_count: u64,
    pub unique_counterparty_count: u64,
    /// Native-asset volume only
    pub total_volume: f64,
    /// Part of `total_volume` moved through a known bridge contract
    pub bridged_volume: f64,
    pub wallet_age_months: u64,
}

impl WalletMetrics {
    /// Wallet age in years, one decimal
    pub fn wallet_age_years(&self) -> f64 {
        (self.wallet_age_months as f64 / 12.0 * 10.0).round() / 10.0
    }
}

/// Aggregate transfers using the current time for wallet age
pub fn aggregate_transfers(transfers: &[TransferRecord], address: &str) -> WalletMetrics {
    aggregate_transfers_at(transfers, address, Utc::now())
}

/// Aggregate transfers relative to `now`
///
/// 1. Count every record
/// 2. Count erc721/erc1155 records as NFTs
/// 3. Collect distinct counterparties (`to`/`from` other than the wallet,
///    plus every `rawContract.address`)
/// 4. Sum native volume and the bridged share of it
/// 5. Derive wallet age from the earliest timestamp
pub fn aggregate_transfers_at(
    transfers: &[TransferRecord],
    address: &str,
    now: DateTime<Utc>,
) -> WalletMetrics {
    let owner = address.to_lowercase();

    let mut nft_count: u64 = 0;
    let mut counterparties: HashSet<String> = HashSet::new();
    let mut total_volume = 0.0;
    let mut bridged_volume = 0.0;
    let mut earliest: Option<DateTime<Utc>> = None;

    for transfer in transfers {
        if transfer.is_nft() {
            nft_count += 1;
        }

        for party in [transfer.to_address(), transfer.from_address()]
            .into_iter()
            .flatten()
        {
            let party = party.to_lowercase();
            if party != owner {
                counterparties.insert(party);
            }
        }

        // Contract addresses are counted even when they equal the wallet
        if let Some(contract) = transfer.contract_address() {
            counterparties.insert(contract.to_lowercase());
        }

        if transfer.is_native_transfer() {
            let value = transfer.native_value();
            total_volume += value;

            // At most once per record, even when both sides are bridges
            let via_bridge = [transfer.to_address(), transfer.from_address()]
                .into_iter()
                .flatten()
                .any(bridges::is_bridge_contract);
            if via_bridge {
                bridged_volume += value;
            }
        }

        if let Some(timestamp) = transfer.block_timestamp() {
            earliest = Some(earliest.map_or(timestamp, |e| e.min(timestamp)));
        }
    }

    WalletMetrics {
        address: address.to_string(),
        txn_count: transfers.len() as u64,
        nft_count,
        unique_counterparty_count: counterparties.len() as u64,
        total_volume,
        bridged_volume,
        wallet_age_months: earliest.map_or(0, |first| months_between(first, now)),
    }
}

/// Whole 30-day months from `first` to `now`; future timestamps give 0
fn months_between(first: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let age_days = (now - first).num_days();
    u64::try_from(age_days / DAYS_PER_MONTH).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::transfer::{RawContract, TransferCategory, TransferMetadata, TransferValue};

    const WALLET: &str = "0xabcabcabcabcabcabcabcabcabcabcabcabcabca";
    const PEER: &str = "0x1111111111111111111111111111111111111111";
    const BASE_L2_BRIDGE: &str = "0x4200000000000000000000000000000000000010";
    const BASE_PORTAL: &str = "0x3154cf16ccdb4c6d922629664174b904d80f2c35";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    fn eth_transfer(from: &str, to: &str, value: &str) -> TransferRecord {
        TransferRecord {
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            asset: Some("ETH".to_string()),
            value: Some(TransferValue::Text(value.to_string())),
            category: Some(TransferCategory::External),
            ..Default::default()
        }
    }

    fn stamped(timestamp: DateTime<Utc>) -> TransferRecord {
        TransferRecord {
            metadata: Some(TransferMetadata {
                block_timestamp: Some(timestamp.to_rfc3339()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_transfers() {
        let metrics = aggregate_transfers_at(&[], WALLET, now());

        assert_eq!(
            metrics,
            WalletMetrics {
                address: WALLET.to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_nft_and_bridge_scenario() {
        let transfers = vec![
            TransferRecord {
                category: Some(TransferCategory::Erc721),
                ..Default::default()
            },
            eth_transfer(WALLET, BASE_L2_BRIDGE, "500"),
        ];

        let metrics = aggregate_transfers_at(&transfers, WALLET, now());

        assert_eq!(metrics.txn_count, 2);
        assert_eq!(metrics.nft_count, 1);
        assert_eq!(metrics.total_volume, 500.0);
        assert_eq!(metrics.bridged_volume, 500.0);
        assert_eq!(metrics.unique_counterparty_count, 1);
    }

    #[test]
    fn test_bridge_to_bridge_counted_once() {
        let transfers = vec![eth_transfer(BASE_PORTAL, BASE_L2_BRIDGE, "2")];

        let metrics = aggregate_transfers_at(&transfers, WALLET, now());

        assert_eq!(metrics.total_volume, 2.0);
        assert_eq!(metrics.bridged_volume, 2.0);
    }

    #[test]
    fn test_non_native_transfers_add_no_volume() {
        let token = TransferRecord {
            asset: Some("USDC".to_string()),
            category: Some(TransferCategory::Erc20),
            ..eth_transfer(WALLET, BASE_L2_BRIDGE, "1000")
        };
        let garbage = eth_transfer(WALLET, PEER, "not-a-number");
        let missing = TransferRecord {
            value: None,
            ..eth_transfer(WALLET, PEER, "0")
        };

        let metrics = aggregate_transfers_at(&[token, garbage, missing], WALLET, now());

        assert_eq!(metrics.txn_count, 3);
        assert_eq!(metrics.total_volume, 0.0);
        assert_eq!(metrics.bridged_volume, 0.0);
    }

    #[test]
    fn test_counterparties_are_case_insensitive() {
        let lower = vec![
            eth_transfer(WALLET, PEER, "1"),
            eth_transfer(PEER, WALLET, "1"),
        ];
        let mixed = vec![
            eth_transfer(&WALLET.to_uppercase().replace("0X", "0x"), PEER, "1"),
            eth_transfer(PEER, "0xABCabcABCabcABCabcABCabcABCabcABCabcABCa", "1"),
        ];

        let a = aggregate_transfers_at(&lower, WALLET, now());
        let b = aggregate_transfers_at(&mixed, "0xAbCaBcAbCaBcAbCaBcAbCaBcAbCaBcAbCaBcAbCa", now());

        assert_eq!(a.unique_counterparty_count, 1);
        assert_eq!(b.unique_counterparty_count, 1);
    }

    #[test]
    fn test_contract_address_always_counted() {
        let transfer = TransferRecord {
            from: Some(WALLET.to_string()),
            to: Some(WALLET.to_string()),
            raw_contract: Some(RawContract {
                address: Some(WALLET.to_uppercase().replace("0X", "0x")),
                ..Default::default()
            }),
            ..Default::default()
        };

        let metrics = aggregate_transfers_at(&[transfer], WALLET, now());

        assert_eq!(metrics.unique_counterparty_count, 1);
    }

    #[test]
    fn test_wallet_age_uses_earliest_timestamp() {
        let transfers = vec![
            stamped(now() - Duration::days(45)),
            stamped(now() - Duration::days(400)),
            TransferRecord {
                metadata: Some(TransferMetadata {
                    block_timestamp: Some("garbage".to_string()),
                }),
                ..Default::default()
            },
            TransferRecord::default(),
        ];

        let metrics = aggregate_transfers_at(&transfers, WALLET, now());

        assert_eq!(metrics.wallet_age_months, 13);
        assert_eq!(metrics.wallet_age_years(), 1.1);
    }

    #[test]
    fn test_future_timestamp_clamps_to_zero() {
        let metrics =
            aggregate_transfers_at(&[stamped(now() + Duration::days(90))], WALLET, now());

        assert_eq!(metrics.wallet_age_months, 0);
    }

    #[test]
    fn test_partial_month_is_floored() {
        let metrics =
            aggregate_transfers_at(&[stamped(now() - Duration::days(59))], WALLET, now());

        assert_eq!(metrics.wallet_age_months, 1);
    }

    #[test]
    fn test_invariants_hold() {
        let transfers = vec![
            eth_transfer(BASE_PORTAL, WALLET, "3.5"),
            eth_transfer(WALLET, PEER, "1.5"),
            TransferRecord {
                category: Some(TransferCategory::Erc1155),
                ..Default::default()
            },
        ];

        let metrics = aggregate_transfers_at(&transfers, WALLET, now());

        assert!(metrics.bridged_volume <= metrics.total_volume);
        assert!(metrics.nft_count <= metrics.txn_count);
        assert_eq!(metrics, aggregate_transfers_at(&transfers, WALLET, now()));
    }
}
