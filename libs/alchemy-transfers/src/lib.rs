//! Transfer history fetcher for the on-chain score
//!
//! Wraps `alchemy_getAssetTransfers`: validates the wallet address, loads
//! endpoint settings from the environment and pulls both transfer
//! directions for the scoring core.

pub mod address;
pub mod client;
pub mod config;
pub mod error;

pub use address::validate_address;
pub use client::{AssetTransfersPage, AssetTransfersParams, TransferClient, TransferDirection};
pub use config::ClientConfig;
pub use error::AppError;
