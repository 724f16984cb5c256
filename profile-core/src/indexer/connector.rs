// ====
// Helius RPC Connector
// ====
// DAS API (getAssetsByOwner) + Standard Solana JSON-RPC
// Plain reqwest, no Solana SDK
// ====

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::errors::IndexerError;
use super::traits::{AssetSource, TransactionSource};
use super::types::*;

/// Helius RPC Endpoints
pub const MAINNET_RPC: &str = "https://mainnet.helius-rpc.com/";
pub const DEVNET_RPC: &str = "https://devnet.helius-rpc.com/";

pub const DEFAULT_PAGE_LIMIT: usize = 1000;

/// Helius Connector
///
/// Serves both the asset/balance and the transaction-history side of a profile run.
pub struct HeliusConnector {
    /// HTTP client
    client: Client,
    /// RPC endpoint including the api-key query
    endpoint: Url,
    /// DAS page size
    page_limit: usize,
}

impl HeliusConnector {
    /// Create new connector
    ///
    /// Example:
    /// ```ignore
    /// let endpoint = HeliusConnector::endpoint_for(false, "my-api-key")?; // Mainnet
    /// let connector = HeliusConnector::new(endpoint, Duration::from_secs(30), 1000)?;
    /// ```
    pub fn new(endpoint: Url, timeout: Duration, page_limit: usize) -> Result<Self, IndexerError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            page_limit: page_limit.max(1),
        })
    }

    /// Helius endpoint for the cluster with the api key attached.
    pub fn endpoint_for(devnet: bool, api_key: &str) -> Result<Url, IndexerError> {
        let base = if devnet { DEVNET_RPC } else { MAINNET_RPC };
        let mut url = Url::parse(base).map_err(|e| IndexerError::ParseError(e.to_string()))?;
        url.query_pairs_mut().append_pair("api-key", api_key);
        Ok(url)
    }

    pub fn endpoint_host(&self) -> &str {
        self.endpoint.host_str().unwrap_or("unknown")
    }

    // ====================================================================
    // INTERNAL
    // ====================================================================

    /// Single JSON-RPC call
    async fn rpc_call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, IndexerError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": method,
            "method": method,
            "params": params
        });

        let response: RpcResponse<T> = serde_json::from_value(self.post(&body).await?)?;

        if let Some(error) = response.error {
            return Err(IndexerError::from_rpc(error.code, error.message));
        }

        response
            .result
            .ok_or_else(|| IndexerError::ParseError(format!("{}: response without result", method)))
    }

    /// POST a body and hand back the raw JSON. HTTP 429 maps to `RateLimited`.
    async fn post(&self, body: &Value) -> Result<Value, IndexerError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(IndexerError::RateLimited(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            return Err(IndexerError::NetworkError(format!("HTTP {}", status)));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AssetSource for HeliusConnector {
    async fn get_assets_by_owner(&self, owner: &str) -> Result<Vec<Asset>, IndexerError> {
        let mut assets = Vec::new();
        let mut page = 1usize;

        loop {
            let batch: AssetPage = self
                .rpc_call(
                    "getAssetsByOwner",
                    json!({
                        "ownerAddress": owner,
                        "page": page,
                        "limit": self.page_limit,
                        "displayOptions": { "showFungible": true }
                    }),
                )
                .await?;

            let received = batch.items.len();
            assets.extend(batch.items);
            debug!("getAssetsByOwner page {}: {} items", page, received);

            if received < self.page_limit {
                break;
            }
            page += 1;
        }

        Ok(assets)
    }

    async fn get_balance(&self, owner: &str) -> Result<u64, IndexerError> {
        let balance: BalanceResponse = self.rpc_call("getBalance", json!([owner])).await?;
        Ok(balance.value)
    }
}

#[async_trait]
impl TransactionSource for HeliusConnector {
    async fn get_signatures_for_address(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<SignatureInfo>, IndexerError> {
        self.rpc_call("getSignaturesForAddress", json!([address, { "limit": limit }]))
            .await
    }

    async fn get_parsed_transactions(
        &self,
        signatures: &[String],
    ) -> Result<Vec<Option<ParsedTransaction>>, IndexerError> {
        if signatures.is_empty() {
            return Ok(Vec::new());
        }

        // Batch of getTransaction calls, id = position in `signatures`
        let batch: Vec<Value> = signatures
            .iter()
            .enumerate()
            .map(|(i, signature)| {
                json!({
                    "jsonrpc": "2.0",
                    "id": i,
                    "method": "getTransaction",
                    "params": [signature, {
                        "encoding": "jsonParsed",
                        "maxSupportedTransactionVersion": 0
                    }]
                })
            })
            .collect();

        let raw = self.post(&Value::Array(batch)).await?;
        collect_batch(raw, signatures.len())
    }
}

// ====================================================================
// HELPERS
// ====================================================================

/// Order a batch response by request id. `null` results become `None`.
///
/// A rate-limited entry fails the whole batch, as does a batch where every entry errored;
/// other per-entry errors are skipped. An error object in place of the array fails the batch.
fn collect_batch(raw: Value, expected: usize) -> Result<Vec<Option<ParsedTransaction>>, IndexerError> {
    let entries = match raw {
        Value::Array(entries) => entries,
        other => {
            let response: RpcResponse<Value> = serde_json::from_value(other)?;
            return Err(match response.error {
                Some(error) => IndexerError::from_rpc(error.code, error.message),
                None => IndexerError::ParseError("batch response is not an array".to_string()),
            });
        }
    };

    let received = entries.len();
    let mut entry_errors: Vec<IndexerError> = Vec::new();
    let mut ordered: Vec<Option<ParsedTransaction>> = vec![None; expected];

    for entry in entries {
        let response: RpcResponse<Option<ParsedTransaction>> = match serde_json::from_value(entry) {
            Ok(response) => response,
            Err(e) => {
                debug!("Skipping unparseable transaction entry: {}", e);
                continue;
            }
        };

        let index = response
            .id
            .as_ref()
            .and_then(Value::as_u64)
            .map(|id| id as usize);

        match (index, response.error) {
            (Some(i), None) if i < expected => ordered[i] = response.result.flatten(),
            (_, Some(error)) => {
                let err = IndexerError::from_rpc(error.code, error.message);
                if err.is_rate_limited() {
                    return Err(err);
                }
                debug!("Skipping transaction entry: {}", err);
                entry_errors.push(err);
            }
            _ => debug!("Skipping transaction entry with unknown id"),
        }
    }

    if received > 0 && entry_errors.len() == received {
        // Nothing resolved; report instead of handing back an empty window
        return Err(entry_errors.remove(0));
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx_entry(id: usize) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {
                "meta": { "err": null, "preBalances": [1], "postBalances": [1] },
                "transaction": { "message": { "accountKeys": ["A"] } }
            }
        })
    }

    #[test]
    fn test_endpoint_carries_api_key() {
        let url = HeliusConnector::endpoint_for(false, "abc").unwrap();
        assert_eq!(url.as_str(), "https://mainnet.helius-rpc.com/?api-key=abc");

        let url = HeliusConnector::endpoint_for(true, "abc").unwrap();
        assert_eq!(url.host_str(), Some("devnet.helius-rpc.com"));
    }

    #[test]
    fn test_batch_is_reordered_and_tolerates_gaps() {
        let raw = json!([
            tx_entry(2),
            { "jsonrpc": "2.0", "id": 1, "error": { "code": -32009, "message": "not found" } },
            tx_entry(0),
            { "jsonrpc": "2.0", "id": 3, "result": null }
        ]);

        let ordered = collect_batch(raw, 4).unwrap();
        assert_eq!(ordered.len(), 4);
        assert!(ordered[0].is_some());
        assert!(ordered[1].is_none());
        assert!(ordered[2].is_some());
        assert!(ordered[3].is_none());
    }

    #[test]
    fn test_batch_level_rate_limit() {
        let raw = json!({ "jsonrpc": "2.0", "id": null, "error": { "code": -32429, "message": "rate limited" } });
        let err = collect_batch(raw, 2).unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_entry_level_rate_limit_fails_batch() {
        let raw = json!([
            { "jsonrpc": "2.0", "id": 0, "error": { "code": -32429, "message": "max usage reached" } },
            { "jsonrpc": "2.0", "id": 1, "error": { "code": -32429, "message": "max usage reached" } }
        ]);
        assert!(collect_batch(raw, 2).unwrap_err().is_rate_limited());

        // A single rate-limited entry among successes still fails the batch
        let raw = json!([
            tx_entry(0),
            { "jsonrpc": "2.0", "id": 1, "error": { "code": -32429, "message": "max usage reached" } }
        ]);
        assert!(collect_batch(raw, 2).unwrap_err().is_rate_limited());
    }

    #[test]
    fn test_all_entries_errored_fails_batch() {
        let raw = json!([
            { "jsonrpc": "2.0", "id": 0, "error": { "code": -32603, "message": "internal error" } },
            { "jsonrpc": "2.0", "id": 1, "error": { "code": -32603, "message": "internal error" } }
        ]);
        let err = collect_batch(raw, 2).unwrap_err();
        assert!(!err.is_rate_limited());
        assert!(matches!(err, IndexerError::RpcError { code: -32603, .. }));
    }

    #[test]
    fn test_empty_batch_is_empty_window() {
        let ordered = collect_batch(json!([]), 0).unwrap();
        assert!(ordered.is_empty());
    }
}
