//! Asset transfer records
//!
//! Mirrors the transfer objects returned by `alchemy_getAssetTransfers`.
//! Every field is optional: malformed or partial records degrade to
//! zero contribution during aggregation instead of failing.

use std::{collections::HashSet, fmt};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize, Serializer};

/// Symbol of the native asset on the target network
pub const NATIVE_ASSET: &str = "ETH";

/// Transfer category tag reported by the indexing API
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransferCategory {
    External,
    Internal,
    Erc20,
    Erc721,
    Erc1155,
    Specialnft,
    Other(String),
}

impl TransferCategory {
    /// Categories requested from the indexing API for every wallet
    pub const REQUESTED: [TransferCategory; 4] = [
        TransferCategory::External,
        TransferCategory::Erc20,
        TransferCategory::Erc721,
        TransferCategory::Erc1155,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TransferCategory::External => "external",
            TransferCategory::Internal => "internal",
            TransferCategory::Erc20 => "erc20",
            TransferCategory::Erc721 => "erc721",
            TransferCategory::Erc1155 => "erc1155",
            TransferCategory::Specialnft => "specialnft",
            TransferCategory::Other(tag) => tag,
        }
    }

    /// Only erc721 and erc1155 transfers count as collectibles
    pub fn is_nft(&self) -> bool {
        matches!(self, TransferCategory::Erc721 | TransferCategory::Erc1155)
    }
}

impl From<&str> for TransferCategory {
    fn from(tag: &str) -> Self {
        match tag {
            "external" => TransferCategory::External,
            "internal" => TransferCategory::Internal,
            "erc20" => TransferCategory::Erc20,
            "erc721" => TransferCategory::Erc721,
            "erc1155" => TransferCategory::Erc1155,
            "specialnft" => TransferCategory::Specialnft,
            other => TransferCategory::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TransferCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TransferCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransferCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(TransferCategory::from(tag.as_str()))
    }
}

/// Transfer magnitude as sent by the API
///
/// The API sends a JSON number, but string-encoded values are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransferValue {
    Number(f64),
    Text(String),
}

impl TransferValue {
    /// Lenient numeric view of the value, see [`parse_value_or_zero`]
    pub fn amount(&self) -> f64 {
        match self {
            TransferValue::Number(value) => positive_or_zero(*value),
            TransferValue::Text(raw) => parse_value_or_zero(raw),
        }
    }
}

/// Reads `value`, treating JSON types other than number and string as absent
fn lenient_value<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<TransferValue>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Usable(TransferValue),
        Unusable(IgnoredAny),
    }

    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Usable(value)) => Some(value),
        Some(Lenient::Unusable(_)) | None => None,
    })
}

impl fmt::Display for TransferValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferValue::Number(value) => write!(f, "{value}"),
            TransferValue::Text(raw) => f.write_str(raw),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContract {
    pub address: Option<String>,
    pub value: Option<String>,
    pub decimal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferMetadata {
    pub block_timestamp: Option<String>,
}

/// One inbound or outbound asset movement involving the queried wallet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub from: Option<String>,
    pub to: Option<String>,
    pub asset: Option<String>,
    #[serde(default, deserialize_with = "lenient_value")]
    pub value: Option<TransferValue>,
    pub category: Option<TransferCategory>,
    pub raw_contract: Option<RawContract>,
    pub metadata: Option<TransferMetadata>,
    pub hash: Option<String>,
    pub unique_id: Option<String>,
    pub block_num: Option<String>,
}

impl TransferRecord {
    pub fn is_nft(&self) -> bool {
        self.category.as_ref().is_some_and(TransferCategory::is_nft)
    }

    /// Exact, case-sensitive match on the native asset symbol
    pub fn is_native_transfer(&self) -> bool {
        self.asset.as_deref() == Some(NATIVE_ASSET)
    }

    /// Native amount moved, 0 when missing or unparsable
    pub fn native_value(&self) -> f64 {
        self.value.as_ref().map(TransferValue::amount).unwrap_or(0.0)
    }

    pub fn to_address(&self) -> Option<&str> {
        non_empty(self.to.as_deref())
    }

    pub fn from_address(&self) -> Option<&str> {
        non_empty(self.from.as_deref())
    }

    pub fn contract_address(&self) -> Option<&str> {
        non_empty(self.raw_contract.as_ref().and_then(|c| c.address.as_deref()))
    }

    /// Block timestamp, `None` when absent or unparsable
    pub fn block_timestamp(&self) -> Option<DateTime<Utc>> {
        self.metadata
            .as_ref()
            .and_then(|m| m.block_timestamp.as_deref())
            .and_then(parse_block_timestamp)
    }

    /// Key identifying the same logical transfer across fetch directions
    fn dedup_key(&self) -> Option<String> {
        if let Some(unique_id) = non_empty(self.unique_id.as_deref()) {
            return Some(unique_id.to_string());
        }

        let hash = non_empty(self.hash.as_deref())?;
        Some(format!(
            "{}:{}:{}:{}:{}",
            hash.to_lowercase(),
            self.category.as_ref().map(TransferCategory::as_str).unwrap_or_default(),
            self.from_address().unwrap_or_default().to_lowercase(),
            self.to_address().unwrap_or_default().to_lowercase(),
            self.value.as_ref().map(ToString::to_string).unwrap_or_default(),
        ))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn positive_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse a numeric string, treating anything unusable as zero
///
/// Unparsable, non-finite and negative inputs all yield `0.0`.
pub fn parse_value_or_zero(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .map(positive_or_zero)
        .unwrap_or(0.0)
}

/// Parse an ISO-8601 block timestamp
///
/// Timestamps without an offset are read as UTC.
pub fn parse_block_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Drop transfers already seen earlier in the list
///
/// Records are keyed by `uniqueId`, falling back to the transaction hash
/// combined with category, parties and value. Records without either key
/// are always kept. The first occurrence wins and order is preserved.
pub fn dedup_transfers(transfers: Vec<TransferRecord>) -> Vec<TransferRecord> {
    let mut seen = HashSet::new();

    transfers
        .into_iter()
        .filter(|transfer| match transfer.dedup_key() {
            Some(key) => seen.insert(key),
            None => true,
        })
        .collect()
}
