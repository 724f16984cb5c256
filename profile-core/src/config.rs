// profile-core/src/config.rs
// Konfiguration: defaults → optional config file → IAP__* environment

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::indexer::HeliusConnector;

/// Largest page the DAS API serves for getAssetsByOwner.
pub const MAX_DAS_PAGE_LIMIT: usize = 1000;

#[derive(Debug, Deserialize, Clone)]
pub struct Rpc {
    /// "mainnet" or "devnet"
    pub cluster: String,
    pub api_key: Option<String>,
    /// Full endpoint override; used as-is
    pub url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Scan {
    pub signature_limit: usize,
    pub sol_usd_price: f64,
    pub asset_page_limit: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Vault {
    pub peer_public_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub rpc: Rpc,
    pub scan: Scan,
    #[serde(default)]
    pub vault: Vault,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = Self::defaults()?;

        // Conventional variable names, lowest priority after the defaults
        if let Ok(api_key) = std::env::var("HELIUS_API_KEY") {
            builder = builder.set_default("rpc.api_key", api_key)?;
        }
        if let Ok(peer_key) = std::env::var("VAULT_PUBLIC_KEY") {
            builder = builder.set_default("vault.peer_public_key", peer_key)?;
        }

        let builder = builder
            .add_source(File::with_name("config").required(false))
            .add_source(Self::environment());

        Self::from_builder(builder)
    }

    /// IAP__SECTION__KEY variables. Values stay strings; numeric fields are converted on
    /// deserialization, so digit-only credentials are not mangled.
    pub fn environment() -> Environment {
        Environment::with_prefix("IAP")
            .prefix_separator("__")
            .separator("__")
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("rpc.cluster", "mainnet")?
            .set_default("rpc.timeout_secs", 30)?
            .set_default("scan.signature_limit", 100)?
            .set_default("scan.sol_usd_price", 100.0)?
            .set_default("scan.asset_page_limit", MAX_DAS_PAGE_LIMIT as i64)
    }

    /// Build and validate. Missing credentials are fatal here, before any request is made.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc.url.is_none() && self.api_key().is_none() {
            return Err(ConfigError::NotFound(
                "rpc.api_key (HELIUS_API_KEY)".to_string(),
            ));
        }
        if self.peer_public_key().is_none() {
            return Err(ConfigError::NotFound(
                "vault.peer_public_key (VAULT_PUBLIC_KEY)".to_string(),
            ));
        }
        if !matches!(self.rpc.cluster.as_str(), "mainnet" | "devnet") {
            return Err(ConfigError::Message(format!(
                "rpc.cluster must be 'mainnet' or 'devnet', got '{}'",
                self.rpc.cluster
            )));
        }
        if !(1..=MAX_DAS_PAGE_LIMIT).contains(&self.scan.asset_page_limit) {
            return Err(ConfigError::Message(format!(
                "scan.asset_page_limit must be within 1..={}, got {}",
                MAX_DAS_PAGE_LIMIT, self.scan.asset_page_limit
            )));
        }
        if self.scan.signature_limit == 0 {
            return Err(ConfigError::Message(
                "scan.signature_limit must be at least 1".to_string(),
            ));
        }
        self.rpc_endpoint()?;
        Ok(())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.rpc.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn peer_public_key(&self) -> Option<&str> {
        self.vault
            .peer_public_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }

    pub fn rpc_endpoint(&self) -> Result<Url, ConfigError> {
        if let Some(url) = &self.rpc.url {
            return Url::parse(url)
                .map_err(|e| ConfigError::Message(format!("rpc.url '{}': {}", url, e)));
        }

        let api_key = self
            .api_key()
            .ok_or_else(|| ConfigError::NotFound("rpc.api_key".to_string()))?;
        HeliusConnector::endpoint_for(self.rpc.cluster == "devnet", api_key)
            .map_err(|e| ConfigError::Message(e.to_string()))
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc.timeout_secs)
    }
}
