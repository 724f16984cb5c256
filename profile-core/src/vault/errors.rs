// vault/errors.rs

use profile_common::ProfileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Encryption not initialized: handshake has not completed")]
    NotInitialized,

    #[error("Session already initialized; open a new session for another handshake")]
    AlreadyInitialized,

    #[error("Invalid peer public key: {0}")]
    InvalidPeerKey(String),

    #[error("Peer key lookup failed: {0}")]
    KeySource(String),

    #[error("Cipher error: {0}")]
    Cipher(String),

    #[error("Encoding error: {0}")]
    Encoding(#[from] ProfileError),
}
