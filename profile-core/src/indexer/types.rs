// indexer/types.rs
// Wire types for the Helius DAS API and the Solana JSON-RPC (jsonParsed encoding).

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ====================================================================
// JSON-RPC ENVELOPE
// ====================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    #[serde(default)]
    pub id: Option<Value>,
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

// ====================================================================
// ASSETS (DAS)
// ====================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AssetPage {
    #[serde(default)]
    pub items: Vec<Asset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub interface: String,
    #[serde(default)]
    pub token_info: Option<TokenInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub supply: Option<u64>,
}

impl Asset {
    /// True when the asset carries a fungible supply attribute.
    pub fn has_supply(&self) -> bool {
        self.token_info
            .as_ref()
            .map_or(false, |info| info.supply.is_some())
    }
}

// ====================================================================
// BALANCE
// ====================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    pub value: u64,
}

// ====================================================================
// TRANSACTIONS
// ====================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureInfo {
    pub signature: String,
    #[serde(default)]
    pub err: Option<Value>,
    #[serde(default)]
    pub slot: u64,
    #[serde(rename = "blockTime", default)]
    pub block_time: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedTransaction {
    pub meta: Option<TransactionMeta>,
    pub transaction: TransactionEnvelope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionMeta {
    #[serde(default)]
    pub err: Option<Value>,
    #[serde(rename = "preBalances", default)]
    pub pre_balances: Vec<u64>,
    #[serde(rename = "postBalances", default)]
    pub post_balances: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub message: TransactionMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionMessage {
    #[serde(rename = "accountKeys", default)]
    pub account_keys: Vec<AccountKey>,
}

/// `jsonParsed` returns objects, `json` returns plain strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountKey {
    Plain(String),
    Parsed {
        pubkey: String,
        #[serde(default)]
        signer: bool,
        #[serde(default)]
        writable: bool,
    },
}

impl AccountKey {
    pub fn pubkey(&self) -> &str {
        match self {
            AccountKey::Plain(key) => key,
            AccountKey::Parsed { pubkey, .. } => pubkey,
        }
    }
}

impl ParsedTransaction {
    /// Missing meta counts as failed; there is nothing to measure.
    pub fn is_failed(&self) -> bool {
        match &self.meta {
            Some(meta) => meta.err.as_ref().map_or(false, |err| !err.is_null()),
            None => true,
        }
    }

    pub fn account_keys(&self) -> impl Iterator<Item = &str> {
        self.transaction
            .message
            .account_keys
            .iter()
            .map(AccountKey::pubkey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_parsed_transaction() {
        let raw = json!({
            "slot": 1,
            "meta": { "err": null, "fee": 5000, "preBalances": [10, 20], "postBalances": [5, 25] },
            "transaction": {
                "message": {
                    "accountKeys": [
                        { "pubkey": "Wallet111", "signer": true, "writable": true, "source": "transaction" },
                        "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4"
                    ]
                }
            }
        });

        let tx: ParsedTransaction = serde_json::from_value(raw).unwrap();
        assert!(!tx.is_failed());
        let keys: Vec<&str> = tx.account_keys().collect();
        assert_eq!(keys, vec!["Wallet111", "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4"]);
    }

    #[test]
    fn test_failed_transaction_detection() {
        let raw = json!({
            "meta": { "err": { "InstructionError": [0, "Custom"] }, "preBalances": [], "postBalances": [] },
            "transaction": { "message": { "accountKeys": [] } }
        });
        let tx: ParsedTransaction = serde_json::from_value(raw).unwrap();
        assert!(tx.is_failed());
    }

    #[test]
    fn test_asset_supply_attribute() {
        let nft: Asset = serde_json::from_value(json!({ "id": "a", "interface": "V1_NFT" })).unwrap();
        let token: Asset = serde_json::from_value(json!({
            "id": "b", "interface": "FungibleToken", "token_info": { "supply": 1000, "decimals": 6 }
        }))
        .unwrap();

        assert!(!nft.has_supply());
        assert!(token.has_supply());
    }
}
