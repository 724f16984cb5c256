// profile-common/src/lib.rs
// Wallet interest profile: domain types, tier classification and field encoding.
// No I/O lives here; connectors and the vault session are in profile-core.

pub mod data;

pub use data::encoding::{encode_fields, EncodedFields, FIELD_COUNT};
pub use data::types::{InterestProfile, ProfileError, ProfileResult, Tier, TierValue};
