pub mod constants;
pub mod decimal;
pub mod pool_address;
pub mod tracked_pools;

use alloy::primitives::Address;
use std::str::FromStr;

use crate::error::{IndexerError, Result};

/// Entity id for an address: lowercase 0x hex
pub fn address_to_id(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

/// Lowercase an address string coming from outside the crate
pub fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Parse an entity id back into an address for contract calls
pub fn parse_address(id: &str) -> Result<Address> {
    Address::from_str(id.trim()).map_err(|e| IndexerError::InvalidAddress(format!("{}: {}", id, e)))
}
