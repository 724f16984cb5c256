use crate::indexer::IndexerError;
use crate::vault::VaultError;
use thiserror::Error;

/// Service layer error types. Each variant names the stage that failed.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Stage 'address' failed: {0}")]
    Address(#[source] IndexerError),

    #[error("Stage 'assets' failed: {0}")]
    Assets(#[source] IndexerError),

    #[error("Stage 'balance' failed: {0}")]
    Balance(#[source] IndexerError),

    #[error("Stage 'handshake' failed: {0}")]
    Handshake(#[source] VaultError),

    #[error("Stage 'encryption' failed: {0}")]
    Encryption(#[source] VaultError),
}

impl ServiceError {
    pub fn stage(&self) -> &'static str {
        match self {
            ServiceError::Address(_) => "address",
            ServiceError::Assets(_) => "assets",
            ServiceError::Balance(_) => "balance",
            ServiceError::Handshake(_) => "handshake",
            ServiceError::Encryption(_) => "encryption",
        }
    }
}
