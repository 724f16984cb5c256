// indexer/errors.rs

use thiserror::Error;

/// JSON-RPC error code Helius returns when a key exceeds its credit/rate budget.
pub const RATE_LIMIT_RPC_CODE: i64 = -32429;

/// Error types for indexer / RPC operations
#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Data parsing error: {0}")]
    ParseError(String),
}

impl IndexerError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, IndexerError::RateLimited(_))
    }

    /// Map a JSON-RPC error object onto the taxonomy.
    pub fn from_rpc(code: i64, message: String) -> Self {
        if code == RATE_LIMIT_RPC_CODE || message.to_lowercase().contains("rate limit") {
            IndexerError::RateLimited(message)
        } else {
            IndexerError::RpcError { code, message }
        }
    }
}

// Convert from common error types
impl From<serde_json::Error> for IndexerError {
    fn from(err: serde_json::Error) -> Self {
        IndexerError::ParseError(err.to_string())
    }
}

impl From<reqwest::Error> for IndexerError {
    fn from(err: reqwest::Error) -> Self {
        if err.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) {
            IndexerError::RateLimited(err.to_string())
        } else if err.is_decode() {
            IndexerError::ParseError(err.to_string())
        } else {
            IndexerError::NetworkError(err.to_string())
        }
    }
}
