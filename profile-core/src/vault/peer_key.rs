// vault/peer_key.rs

use async_trait::async_trait;

use super::errors::VaultError;
use super::traits::PeerKeySource;

/// Vault public key supplied through configuration.
#[derive(Debug, Clone)]
pub struct StaticPeerKey {
    key: Vec<u8>,
}

impl StaticPeerKey {
    pub fn new(key: Vec<u8>) -> Self {
        Self { key }
    }

    /// Accepts hex with or without 0x prefix
    pub fn from_hex(key_hex: &str) -> Result<Self, VaultError> {
        let key_hex = key_hex.trim().trim_start_matches("0x");
        let key = hex::decode(key_hex).map_err(|e| VaultError::InvalidPeerKey(e.to_string()))?;

        if key.is_empty() {
            return Err(VaultError::InvalidPeerKey("empty key".to_string()));
        }

        Ok(Self { key })
    }
}

#[async_trait]
impl PeerKeySource for StaticPeerKey {
    async fn peer_public_key(&self) -> Result<Vec<u8>, VaultError> {
        Ok(self.key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hex_peer_key() {
        let source = StaticPeerKey::from_hex("0x02ab").unwrap();
        assert_eq!(source.peer_public_key().await.unwrap(), vec![0x02, 0xab]);

        assert!(StaticPeerKey::from_hex("zz").is_err());
        assert!(StaticPeerKey::from_hex("").is_err());
    }
}
