// profile-core/src/bin/profile_wallet.rs
// One-shot run: profile a wallet, encrypt the record, print the payload for the publisher.
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use profile_core::config::Settings;
use profile_core::indexer::HeliusConnector;
use profile_core::service::{ProfileBuilder, ProfilePipeline, ScanOptions};
use profile_core::vault::{K256KeccakSuite, StaticPeerKey};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let address = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("usage: profile_wallet <WALLET_ADDRESS>"))?;

    let settings = Settings::new().context("Konfiguration unvollständig")?;
    let peer_key = settings
        .peer_public_key()
        .context("vault.peer_public_key missing")?;

    let connector = Arc::new(HeliusConnector::new(
        settings.rpc_endpoint()?,
        settings.rpc_timeout(),
        settings.scan.asset_page_limit,
    )?);
    println!("🛰️ Profiling {} via {}", address, connector.endpoint_host());

    let options = ScanOptions {
        signature_limit: settings.scan.signature_limit,
        sol_usd_price: settings.scan.sol_usd_price,
    };
    let builder = ProfileBuilder::new(connector.clone(), connector, options);
    let pipeline = ProfilePipeline::new(
        builder,
        Arc::new(K256KeccakSuite::new()),
        Arc::new(StaticPeerKey::from_hex(peer_key)?),
    );

    match pipeline.run(&address).await {
        Ok(output) => {
            if output.report.is_degraded() {
                println!("⚠️ Teilweise degradiert: Volumen/DeFi evtl. unterschätzt");
            }
            println!("✅ Tier: {}", output.report.profile.tier());
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            println!("❌ Stage '{}' fehlgeschlagen", e.stage());
            Err(e.into())
        }
    }
}
