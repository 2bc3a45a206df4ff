use std::time::Duration;

use alloy::{
    providers::{Provider, ProviderBuilder},
    transports::TransportError,
};
use onchain_score::{dedup_transfers, TransferCategory, TransferRecord};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::{config::ClientConfig, error::AppError};

const GET_ASSET_TRANSFERS: &str = "alchemy_getAssetTransfers";
const MAX_BACKOFF_MS: u64 = 60_000;

/// Which side of the transfer the wallet is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    Outgoing,
    Incoming,
}

impl TransferDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferDirection::Outgoing => "outgoing",
            TransferDirection::Incoming => "incoming",
        }
    }
}

/// Request object for `alchemy_getAssetTransfers`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfersParams {
    pub from_block: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_address: Option<String>,
    pub category: Vec<TransferCategory>,
    pub max_count: String,
    pub with_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,
}

impl AssetTransfersParams {
    pub fn new(direction: TransferDirection, address: &str, max_count: String) -> Self {
        let (from_address, to_address) = match direction {
            TransferDirection::Outgoing => (Some(address.to_string()), None),
            TransferDirection::Incoming => (None, Some(address.to_string())),
        };

        Self {
            from_block: "0x0".to_string(),
            from_address,
            to_address,
            category: TransferCategory::REQUESTED.to_vec(),
            max_count,
            with_metadata: true,
            page_key: None,
        }
    }
}

/// One page of `alchemy_getAssetTransfers` results
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfersPage {
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
    pub page_key: Option<String>,
}

/// Fetches a wallet's transfer history from the Alchemy indexing API
#[derive(Debug, Clone)]
pub struct TransferClient {
    config: ClientConfig,
}

impl TransferClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch outgoing and incoming transfers concurrently
    ///
    /// Returns outgoing records followed by incoming ones, de-duplicated
    /// only when `DEDUPLICATE_TRANSFERS` is enabled.
    pub async fn fetch_all(&self, address: &str) -> Result<Vec<TransferRecord>, AppError> {
        let provider = ProviderBuilder::new()
            .on_builtin(&self.config.rpc_url)
            .await
            .map_err(|e| AppError::RpcError(e.to_string()))?;

        let (outgoing, incoming) = tokio::try_join!(
            self.fetch_direction(&provider, TransferDirection::Outgoing, address),
            self.fetch_direction(&provider, TransferDirection::Incoming, address),
        )?;

        tracing::info!(
            network = %self.config.network,
            outgoing = outgoing.len(),
            incoming = incoming.len(),
            "Fetched transfers for {address}"
        );

        let mut transfers = outgoing;
        transfers.extend(incoming);

        if self.config.deduplicate {
            let before = transfers.len();
            transfers = dedup_transfers(transfers);
            tracing::debug!(dropped = before - transfers.len(), "Deduplicated transfers");
        }

        Ok(transfers)
    }

    /// Fetch one direction, following `pageKey` up to `max_pages` pages
    pub async fn fetch_direction<P: Provider>(
        &self,
        provider: &P,
        direction: TransferDirection,
        address: &str,
    ) -> Result<Vec<TransferRecord>, AppError> {
        let mut transfers = Vec::new();
        let mut params = AssetTransfersParams::new(direction, address, self.config.max_count_hex());

        for page in 0..self.config.max_pages {
            let result = request_with_retry(
                provider,
                &params,
                self.config.max_retries,
                self.config.rpc_delay_ms,
            )
            .await?;

            tracing::debug!(
                direction = direction.as_str(),
                page,
                count = result.transfers.len(),
                "Fetched transfer page"
            );

            transfers.extend(result.transfers);

            match result.page_key {
                Some(key) => params.page_key = Some(key),
                None => break,
            }
        }

        Ok(transfers)
    }
}

/// Check if an error is a rate limit error
fn is_rate_limited(err: &TransportError) -> bool {
    let err_str = err.to_string().to_lowercase();
    err_str.contains("429")
        || err_str.contains("rate limit")
        || err_str.contains("too many requests")
        || err_str.contains("-32005")
        || err_str.contains("limit exceeded")
}

/// Convert a transport error, surfacing JSON-RPC error messages as API errors
fn to_app_error(err: TransportError) -> AppError {
    match err.as_error_resp() {
        Some(payload) => AppError::Api(payload.message.to_string()),
        None => AppError::RpcError(err.to_string()),
    }
}

/// Exponential backoff for a retry attempt, saturating at `MAX_BACKOFF_MS`
fn backoff_ms(base_delay_ms: u64, attempt: u32) -> u64 {
    2_u64
        .checked_pow(attempt)
        .and_then(|factor| base_delay_ms.checked_mul(factor))
        .map_or(MAX_BACKOFF_MS, |delay| delay.min(MAX_BACKOFF_MS))
}

/// Request one page with retry logic and exponential backoff
async fn request_with_retry<P: Provider>(
    provider: &P,
    params: &AssetTransfersParams,
    max_retries: u32,
    base_delay_ms: u64,
) -> Result<AssetTransfersPage, AppError> {
    for attempt in 0..max_retries {
        match provider
            .raw_request::<_, AssetTransfersPage>(GET_ASSET_TRANSFERS.into(), [params.clone()])
            .await
        {
            Ok(page) => return Ok(page),
            Err(e) if is_rate_limited(&e) => {
                let delay = backoff_ms(base_delay_ms, attempt);
                tracing::warn!(
                    "Rate limited (attempt {}/{}), backing off for {}ms",
                    attempt + 1,
                    max_retries,
                    delay
                );
                sleep(Duration::from_millis(delay)).await;
            }
            Err(e) => return Err(to_app_error(e)),
        }
    }

    Err(AppError::MaxRetriesExceeded(max_retries))
}
