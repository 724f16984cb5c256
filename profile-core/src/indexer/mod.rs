// profile-core/src/indexer/mod.rs

pub mod connector;
pub mod errors;
pub mod programs;
pub mod traits;
pub mod types;
pub mod utils;

// Re-exports für den Profile Builder
pub use connector::HeliusConnector;
pub use errors::IndexerError;
pub use traits::{AssetSource, TransactionSource};
pub use types::*;
