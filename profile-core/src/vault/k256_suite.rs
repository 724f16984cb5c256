// ====
// secp256k1 ECDH + Keccak keystream
// ====
// Local cipher suite for the vault session.
// Ephemeral key per handshake, shared secret hashed into a session key.
// ====

use k256::ecdh::EphemeralSecret;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use rand::rngs::OsRng;
use sha3::{Digest, Keccak256};

use super::errors::VaultError;
use super::traits::{CipherBlock, CipherSuite, FieldCipher, Handshake, Nonce};

const SESSION_KEY_DOMAIN: &[u8] = b"iap-vault-session-v1";

/// secp256k1 key agreement producing a [`KeccakStreamCipher`]
#[derive(Debug, Default, Clone, Copy)]
pub struct K256KeccakSuite;

impl K256KeccakSuite {
    pub fn new() -> Self {
        Self
    }
}

impl CipherSuite for K256KeccakSuite {
    fn establish(&self, peer_public_key: &[u8]) -> Result<Handshake, VaultError> {
        let peer = PublicKey::from_sec1_bytes(peer_public_key)
            .map_err(|e| VaultError::InvalidPeerKey(e.to_string()))?;

        // Ephemeral key pair, never reused across handshakes
        let secret = EphemeralSecret::random(&mut OsRng);
        let client_public_key = secret
            .public_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec();

        let shared = secret.diffie_hellman(&peer);
        let cipher = KeccakStreamCipher::from_shared_secret(shared.raw_secret_bytes().as_slice());

        Ok(Handshake {
            client_public_key,
            cipher: Box::new(cipher),
        })
    }
}

/// Keccak-256 keystream cipher.
///
/// Block i = keccak256(key ‖ nonce ‖ i) with the little-endian value XORed into the first 8 bytes.
pub struct KeccakStreamCipher {
    key: [u8; 32],
}

impl KeccakStreamCipher {
    /// Derive the session key from raw ECDH output
    pub fn from_shared_secret(shared_secret: &[u8]) -> Self {
        let mut material = Vec::with_capacity(SESSION_KEY_DOMAIN.len() + shared_secret.len());
        material.extend_from_slice(SESSION_KEY_DOMAIN);
        material.extend_from_slice(shared_secret);

        Self {
            key: keccak256(&material),
        }
    }

    fn keystream_block(&self, nonce: &Nonce, index: u32) -> CipherBlock {
        let mut input = Vec::with_capacity(32 + nonce.len() + 4);
        input.extend_from_slice(&self.key);
        input.extend_from_slice(nonce);
        input.extend_from_slice(&index.to_le_bytes());
        keccak256(&input)
    }

    /// Inverse of [`FieldCipher::encrypt`] for holders of the same shared secret
    #[cfg(test)]
    fn decrypt(&self, blocks: &[CipherBlock], nonce: &Nonce) -> Vec<u64> {
        blocks
            .iter()
            .enumerate()
            .map(|(i, block)| {
                let stream = self.keystream_block(nonce, i as u32);
                let mut value = [0u8; 8];
                for (j, byte) in value.iter_mut().enumerate() {
                    *byte = block[j] ^ stream[j];
                }
                u64::from_le_bytes(value)
            })
            .collect()
    }
}

impl FieldCipher for KeccakStreamCipher {
    fn encrypt(&self, values: &[u64], nonce: &Nonce) -> Result<Vec<CipherBlock>, VaultError> {
        let count = u32::try_from(values.len())
            .map_err(|_| VaultError::Cipher(format!("too many fields: {}", values.len())))?;

        Ok((0..count)
            .zip(values)
            .map(|(i, value)| {
                let mut block = self.keystream_block(nonce, i);
                for (j, byte) in value.to_le_bytes().iter().enumerate() {
                    block[j] ^= byte;
                }
                block
            })
            .collect())
    }
}

/// Helper: Keccak256 hash
fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}
