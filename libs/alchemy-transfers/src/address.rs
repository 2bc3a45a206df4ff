//! Wallet address validation
//!
//! The scoring core trusts its address input, so every front end runs
//! user-supplied addresses through here first.

use std::str::FromStr;

use alloy::primitives::Address;

use crate::error::AppError;

/// Accept only `0x` followed by exactly 40 hex digits
pub fn validate_address(input: &str) -> Result<Address, AppError> {
    let well_formed = input
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()));

    if !well_formed {
        return Err(AppError::InvalidAddress(input.to_string()));
    }

    Address::from_str(input).map_err(|_| AppError::InvalidAddress(input.to_string()))
}
