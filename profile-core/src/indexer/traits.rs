// indexer/traits.rs

use async_trait::async_trait;

use crate::indexer::errors::IndexerError;
use crate::indexer::types::{Asset, ParsedTransaction, SignatureInfo};

/// Holdings and native balance of an address.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Every asset owned by the address, all pages.
    async fn get_assets_by_owner(&self, owner: &str) -> Result<Vec<Asset>, IndexerError>;

    /// Native balance in lamports.
    async fn get_balance(&self, owner: &str) -> Result<u64, IndexerError>;
}

/// Recent transaction history of an address.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Most recent signatures first, at most `limit`.
    async fn get_signatures_for_address(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<SignatureInfo>, IndexerError>;

    /// One entry per signature, in order. Unresolvable entries are `None`.
    async fn get_parsed_transactions(
        &self,
        signatures: &[String],
    ) -> Result<Vec<Option<ParsedTransaction>>, IndexerError>;
}
