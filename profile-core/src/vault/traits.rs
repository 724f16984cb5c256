// vault/traits.rs

use async_trait::async_trait;

use crate::vault::errors::VaultError;

pub const NONCE_LEN: usize = 16;
pub type Nonce = [u8; NONCE_LEN];

/// One ciphertext block per encrypted field.
pub type CipherBlock = [u8; 32];

/// Supplies the vault's public key for the handshake.
#[async_trait]
pub trait PeerKeySource: Send + Sync {
    async fn peer_public_key(&self) -> Result<Vec<u8>, VaultError>;
}

/// Key exchange: ephemeral client key pair + shared cipher with the peer.
pub trait CipherSuite: Send + Sync {
    fn establish(&self, peer_public_key: &[u8]) -> Result<Handshake, VaultError>;
}

/// Symmetric cipher bound to one shared secret.
pub trait FieldCipher: Send + Sync {
    fn encrypt(&self, values: &[u64], nonce: &Nonce) -> Result<Vec<CipherBlock>, VaultError>;
}

/// Result of a successful key exchange.
pub struct Handshake {
    pub client_public_key: Vec<u8>,
    pub cipher: Box<dyn FieldCipher>,
}
