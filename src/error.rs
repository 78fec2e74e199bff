//! Error types shared by the handlers, services and stores

use sea_orm::DbErr;
use thiserror::Error;

use crate::chain::CallError;

/// Main handler error type. Any variant aborts the current event.
#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Could not find {entity}: {id}")]
    EntityNotFound { entity: &'static str, id: String },

    #[error("Contract call failed: {0}")]
    Call(#[from] CallError),

    #[error("TVL aggregation aborted at position {token_id}: {source}")]
    Aggregation {
        token_id: String,
        #[source]
        source: CallError,
    },

    #[error("Token {token} has no usable decimals ({reason})")]
    InvalidDecimals { token: String, reason: String },

    #[error("Decimal overflow while computing {0}")]
    DecimalOverflow(&'static str),

    #[error("Invalid management fee for cellar {cellar}: {fee_bps} bps")]
    InvalidManagementFee { cellar: String, fee_bps: i64 },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid position id: {0}")]
    InvalidPositionId(String),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: u64 },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl IndexerError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        IndexerError::EntityNotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result type alias for handler operations
pub type Result<T> = std::result::Result<T, IndexerError>;
