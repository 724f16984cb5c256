// vault/session.rs
// Explicit handshake session. Holds the client key and cipher for exactly one peer.

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::{debug, info};

use profile_common::{encode_fields, EncodedFields, InterestProfile, TierValue};

use super::errors::VaultError;
use super::traits::{CipherBlock, CipherSuite, FieldCipher, Nonce, PeerKeySource, NONCE_LEN};

/// Ciphertext handed to the on-chain publisher
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedProfile {
    #[serde(serialize_with = "serialize_blocks")]
    pub ciphertext: Vec<CipherBlock>,
    #[serde(serialize_with = "serialize_hex")]
    pub nonce: Nonce,
    #[serde(serialize_with = "serialize_hex")]
    pub client_pub_key: Vec<u8>,
    pub field_count: usize,
    pub encrypted_at: DateTime<Utc>,
}

struct Established {
    client_public_key: Vec<u8>,
    cipher: Box<dyn FieldCipher>,
}

pub struct VaultSession {
    suite: Arc<dyn CipherSuite>,
    established: Option<Established>,
}

impl VaultSession {
    pub fn new(suite: Arc<dyn CipherSuite>) -> Self {
        Self {
            suite,
            established: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.established.is_some()
    }

    pub fn client_public_key(&self) -> Option<&[u8]> {
        self.established
            .as_ref()
            .map(|session| session.client_public_key.as_slice())
    }

    /// Key exchange with the vault. Allowed once per session.
    pub async fn handshake(&mut self, peer: &dyn PeerKeySource) -> Result<(), VaultError> {
        if self.established.is_some() {
            return Err(VaultError::AlreadyInitialized);
        }

        let peer_key = peer.peer_public_key().await?;
        let handshake = self.suite.establish(&peer_key)?;

        info!(
            "Vault handshake complete (client key {})",
            hex::encode(&handshake.client_public_key)
        );

        self.established = Some(Established {
            client_public_key: handshake.client_public_key,
            cipher: handshake.cipher,
        });
        Ok(())
    }

    /// Encrypt the six-field profile record under a fresh nonce.
    pub fn encrypt_profile(&self, profile: &InterestProfile) -> Result<EncryptedProfile, VaultError> {
        let session = self.established.as_ref().ok_or(VaultError::NotInitialized)?;
        let fields = encode_fields(profile)?;
        self.seal(session, fields.values())
    }

    /// Same as [`encrypt_profile`](Self::encrypt_profile) for callers that already hold the fields.
    pub fn encrypt_fields(&self, fields: &EncodedFields) -> Result<EncryptedProfile, VaultError> {
        let session = self.established.as_ref().ok_or(VaultError::NotInitialized)?;
        self.seal(session, fields.values())
    }

    /// Single-field tier encryption.
    #[deprecated(note = "use encrypt_profile; the vault stores the six-field record")]
    pub fn encrypt_tier(&self, value: TierValue) -> Result<EncryptedProfile, VaultError> {
        let session = self.established.as_ref().ok_or(VaultError::NotInitialized)?;
        let tier = value.resolve()?;
        self.seal(session, &[u64::from(tier.code())])
    }

    fn seal(&self, session: &Established, values: &[u64]) -> Result<EncryptedProfile, VaultError> {
        let nonce = fresh_nonce();
        let ciphertext = session.cipher.encrypt(values, &nonce)?;

        if ciphertext.len() != values.len() {
            return Err(VaultError::Cipher(format!(
                "expected {} blocks, cipher returned {}",
                values.len(),
                ciphertext.len()
            )));
        }

        debug!("Encrypted {} field(s)", values.len());

        Ok(EncryptedProfile {
            ciphertext,
            nonce,
            client_pub_key: session.client_public_key.clone(),
            field_count: values.len(),
            encrypted_at: Utc::now(),
        })
    }
}

fn fresh_nonce() -> Nonce {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

fn serialize_hex<S: Serializer, T: AsRef<[u8]>>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

fn serialize_blocks<S: Serializer>(blocks: &[CipherBlock], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(blocks.iter().map(hex::encode))
}
