// profile-core/src/lib.rs
// Wallet Interest Profile - Core Library Definitions

pub mod config;
pub mod indexer;
pub mod service;
pub mod vault;

// Re-export profile-common for convenience
pub use profile_common::{encode_fields, EncodedFields, InterestProfile, Tier, TierValue};
