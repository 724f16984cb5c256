// profile-core/src/vault/mod.rs

pub mod errors;
pub mod k256_suite;
pub mod peer_key;
pub mod session;
pub mod traits;

pub use errors::VaultError;
pub use k256_suite::{K256KeccakSuite, KeccakStreamCipher};
pub use peer_key::StaticPeerKey;
pub use session::{EncryptedProfile, VaultSession};
pub use traits::{CipherBlock, CipherSuite, FieldCipher, Handshake, Nonce, PeerKeySource};
