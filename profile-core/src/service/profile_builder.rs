// service/profile_builder.rs
// Aggregates holdings, balance and the recent transaction window into an InterestProfile.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use profile_common::InterestProfile;

use super::errors::ServiceError;
use crate::indexer::programs::{is_defi_program, is_dex_program, is_nft_interface};
use crate::indexer::utils::{lamports_to_sol, validate_solana_address};
use crate::indexer::{Asset, AssetSource, IndexerError, ParsedTransaction, TransactionSource};

pub const DEFAULT_SIGNATURE_LIMIT: usize = 100;

/// Placeholder USD price per coin for the volume estimate.
pub const DEFAULT_SOL_USD_PRICE: f64 = 100.0;

#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub signature_limit: usize,
    pub sol_usd_price: f64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            signature_limit: DEFAULT_SIGNATURE_LIMIT,
            sol_usd_price: DEFAULT_SOL_USD_PRICE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    TradingVolume,
    DefiInteractions,
}

/// A metric that fell back to 0 because the history fetch failed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradedMetric {
    pub metric: Metric,
    pub rate_limited: bool,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReport {
    pub address: String,
    pub profile: InterestProfile,
    pub degraded: Vec<DegradedMetric>,
    pub fetched_at: DateTime<Utc>,
}

impl ProfileReport {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AssetSummary {
    pub nft_count: u64,
    pub token_holdings: u64,
}

pub struct ProfileBuilder {
    assets: Arc<dyn AssetSource>,
    transactions: Arc<dyn TransactionSource>,
    options: ScanOptions,
}

impl ProfileBuilder {
    pub fn new(
        assets: Arc<dyn AssetSource>,
        transactions: Arc<dyn TransactionSource>,
        options: ScanOptions,
    ) -> Self {
        Self {
            assets,
            transactions,
            options,
        }
    }

    /// Build the profile for one address.
    ///
    /// Asset and balance failures abort the run. History failures degrade
    /// trading volume and DeFi interactions to 0 and are recorded in the report.
    pub async fn build(&self, address: &str) -> Result<ProfileReport, ServiceError> {
        let address = validate_solana_address(address).map_err(ServiceError::Address)?;

        // Unabhängige Fetches parallel
        let (assets, balance, window) = tokio::join!(
            self.assets.get_assets_by_owner(&address),
            self.assets.get_balance(&address),
            self.fetch_window(&address),
        );

        let summary = partition_assets(&assets.map_err(ServiceError::Assets)?);
        let sol_balance = lamports_to_sol(balance.map_err(ServiceError::Balance)?);

        let mut degraded = Vec::new();
        let (trading_volume, defi_interactions) = match window {
            Ok(transactions) => (
                estimate_trading_volume(&transactions, self.options.sol_usd_price),
                count_defi_interactions(&transactions),
            ),
            Err(err) => {
                for metric in [Metric::TradingVolume, Metric::DefiInteractions] {
                    degraded.push(degrade(metric, &err));
                }
                (0.0, 0)
            }
        };

        let profile = InterestProfile::new(
            summary.nft_count,
            sol_balance,
            trading_volume,
            summary.token_holdings,
            defi_interactions,
        );

        info!(
            "Profile for {}: tier={} nfts={} balance={:.4} volume=${:.2} tokens={} defi={}",
            address,
            profile.tier(),
            profile.nft_count(),
            profile.sol_balance(),
            profile.trading_volume(),
            profile.token_holdings(),
            profile.defi_interactions()
        );

        Ok(ProfileReport {
            address,
            profile,
            degraded,
            fetched_at: Utc::now(),
        })
    }

    /// Successful, parsed transactions among the most recent `signature_limit` signatures.
    async fn fetch_window(&self, address: &str) -> Result<Vec<ParsedTransaction>, IndexerError> {
        let limit = self.options.signature_limit;
        let signatures = self
            .transactions
            .get_signatures_for_address(address, limit)
            .await?;

        if signatures.is_empty() {
            return Ok(Vec::new());
        }

        // Sources may ignore the limit; the window stays bounded regardless
        let signatures: Vec<String> = signatures
            .into_iter()
            .take(limit)
            .map(|s| s.signature)
            .collect();
        let parsed = self.transactions.get_parsed_transactions(&signatures).await?;

        Ok(parsed
            .into_iter()
            .flatten()
            .filter(|tx| !tx.is_failed())
            .collect())
    }
}

fn degrade(metric: Metric, err: &IndexerError) -> DegradedMetric {
    let rate_limited = err.is_rate_limited();
    if rate_limited {
        warn!("{:?} defaulted to 0: transaction history rate limited ({})", metric, err);
    } else {
        warn!("{:?} defaulted to 0: transaction history unavailable ({})", metric, err);
    }

    DegradedMetric {
        metric,
        rate_limited,
        reason: err.to_string(),
    }
}

/// NFTs by interface tag; fungible tokens by supply attribute, counted by distinct id.
pub(crate) fn partition_assets(assets: &[Asset]) -> AssetSummary {
    let mut nft_count = 0u64;
    let mut token_ids: HashSet<&str> = HashSet::new();

    for asset in assets {
        if is_nft_interface(&asset.interface) {
            nft_count += 1;
        } else if asset.has_supply() {
            token_ids.insert(asset.id.as_str());
        }
    }

    AssetSummary {
        nft_count,
        token_holdings: token_ids.len() as u64,
    }
}

/// Coarse USD volume estimate over DEX-touching transactions.
///
/// Sums the absolute lamport delta of every balance slot, fee and rent movements
/// included, priced at `sol_usd_price`. Over-counts; not a trade parser.
pub fn estimate_trading_volume(transactions: &[ParsedTransaction], sol_usd_price: f64) -> f64 {
    let mut volume = 0.0;

    for tx in transactions {
        if !tx.account_keys().any(is_dex_program) {
            continue;
        }
        let Some(meta) = &tx.meta else { continue };

        for (pre, post) in meta.pre_balances.iter().zip(meta.post_balances.iter()) {
            let delta = pre.abs_diff(*post);
            volume += lamports_to_sol(delta) * sol_usd_price;
        }
    }

    volume
}

/// Number of distinct DeFi programs referenced in the window.
pub fn count_defi_interactions(transactions: &[ParsedTransaction]) -> u64 {
    let mut seen: HashSet<&str> = HashSet::new();

    for tx in transactions {
        for key in tx.account_keys() {
            if is_defi_program(key) {
                seen.insert(key);
            }
        }
    }

    seen.len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::{AccountKey, TokenInfo, TransactionEnvelope, TransactionMessage, TransactionMeta};

    const JUPITER: &str = "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4";
    const SOLEND: &str = "So1endDq2YkqhipRh3WViPa8hdiSpxWy6z3Z6tMCpAo";

    fn tx(keys: &[&str], pre: &[u64], post: &[u64]) -> ParsedTransaction {
        ParsedTransaction {
            meta: Some(TransactionMeta {
                err: None,
                pre_balances: pre.to_vec(),
                post_balances: post.to_vec(),
            }),
            transaction: TransactionEnvelope {
                message: TransactionMessage {
                    account_keys: keys.iter().map(|k| AccountKey::Plain(k.to_string())).collect(),
                },
            },
        }
    }

    fn asset(id: &str, interface: &str, supply: Option<u64>) -> Asset {
        Asset {
            id: id.to_string(),
            interface: interface.to_string(),
            token_info: supply.map(|s| TokenInfo { supply: Some(s) }),
        }
    }

    #[test]
    fn test_partition_assets() {
        let assets = vec![
            asset("n1", "V1_NFT", None),
            asset("n2", "ProgrammableNFT", Some(1)),
            asset("t1", "FungibleToken", Some(1_000)),
            asset("t1", "FungibleToken", Some(1_000)),
            asset("t2", "FungibleAsset", Some(5)),
            asset("x", "Custom", None),
        ];

        let summary = partition_assets(&assets);
        assert_eq!(summary.nft_count, 2);
        assert_eq!(summary.token_holdings, 2);
    }

    #[test]
    fn test_volume_only_counts_dex_transactions() {
        let txs = vec![
            // 1.5 SOL out, 1.5 SOL in → 3 SOL of movement
            tx(&["Wallet", JUPITER], &[3_000_000_000, 0], &[1_500_000_000, 1_500_000_000]),
            tx(&["Wallet", SOLEND], &[10_000_000_000], &[0]),
        ];

        let volume = estimate_trading_volume(&txs, 100.0);
        assert!((volume - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_defi_count_is_distinct_programs() {
        let txs = vec![
            tx(&["Wallet", SOLEND], &[], &[]),
            tx(&["Wallet", SOLEND], &[], &[]),
            tx(&[SOLEND, "Other"], &[], &[]),
        ];
        assert_eq!(count_defi_interactions(&txs), 1);

        let txs = vec![tx(&[SOLEND, JUPITER], &[], &[]), tx(&[JUPITER], &[], &[])];
        assert_eq!(count_defi_interactions(&txs), 2);
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(estimate_trading_volume(&[], 100.0), 0.0);
        assert_eq!(count_defi_interactions(&[]), 0);
    }
}
