// profile-common/src/data/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =================================================================
// Errors
// =================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Invalid tier code: {0} (expected 0..=3)")]
    InvalidTierCode(u8),

    #[error("Field '{field}' cannot be encoded: {reason}")]
    Unencodable { field: &'static str, reason: String },
}

pub type ProfileResult<T> = Result<T, ProfileError>;

// =================================================================
// Tier
// =================================================================

/// Four-level wallet classification, ordered Bronze < Silver < Gold < Platinum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

/// Classification rows, evaluated top to bottom. First match wins.
/// Both bounds are strict: (tier, nft_count >, sol_balance >).
const TIER_THRESHOLDS: [(Tier, u64, f64); 3] = [
    (Tier::Platinum, 100, 100.0),
    (Tier::Gold, 49, 30.0),
    (Tier::Silver, 20, 10.0),
];

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Bronze, Tier::Silver, Tier::Gold, Tier::Platinum];

    /// Derive the tier from NFT count and balance (whole coins).
    ///
    /// A large balance alone never promotes a wallet; both conditions of a row must hold.
    pub fn classify(nft_count: u64, sol_balance: f64) -> Tier {
        TIER_THRESHOLDS
            .iter()
            .find(|(_, min_nfts, min_balance)| nft_count > *min_nfts && sol_balance > *min_balance)
            .map(|(tier, _, _)| *tier)
            .unwrap_or(Tier::Bronze)
    }

    /// Numeric code used at the encryption boundary.
    pub fn code(self) -> u8 {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => 1,
            Tier::Gold => 2,
            Tier::Platinum => 3,
        }
    }

    pub fn from_code(code: u8) -> ProfileResult<Tier> {
        match code {
            0 => Ok(Tier::Bronze),
            1 => Ok(Tier::Silver),
            2 => Ok(Tier::Gold),
            3 => Ok(Tier::Platinum),
            other => Err(ProfileError::InvalidTierCode(other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input accepted by the legacy single-field tier encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierValue {
    Code(u8),
    Named(Tier),
}

impl TierValue {
    pub fn resolve(self) -> ProfileResult<Tier> {
        match self {
            TierValue::Code(code) => Tier::from_code(code),
            TierValue::Named(tier) => Ok(tier),
        }
    }
}

impl From<Tier> for TierValue {
    fn from(tier: Tier) -> Self {
        TierValue::Named(tier)
    }
}

impl From<u8> for TierValue {
    fn from(code: u8) -> Self {
        TierValue::Code(code)
    }
}

// =================================================================
// InterestProfile
// =================================================================

/// Snapshot of one wallet's on-chain activity. Built once per run, never mutated.
///
/// The tier is always derived from `nft_count` and `sol_balance`, including on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawProfile")]
pub struct InterestProfile {
    tier: Tier,
    nft_count: u64,
    sol_balance: f64,
    trading_volume: f64,
    token_holdings: u64,
    defi_interactions: u64,
}

/// Wire shape without a tier; any incoming tier is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    nft_count: u64,
    sol_balance: f64,
    trading_volume: f64,
    token_holdings: u64,
    defi_interactions: u64,
}

impl From<RawProfile> for InterestProfile {
    fn from(raw: RawProfile) -> Self {
        InterestProfile::new(
            raw.nft_count,
            raw.sol_balance,
            raw.trading_volume,
            raw.token_holdings,
            raw.defi_interactions,
        )
    }
}

impl InterestProfile {
    pub fn new(
        nft_count: u64,
        sol_balance: f64,
        trading_volume: f64,
        token_holdings: u64,
        defi_interactions: u64,
    ) -> Self {
        Self {
            tier: Tier::classify(nft_count, sol_balance),
            nft_count,
            sol_balance,
            trading_volume,
            token_holdings,
            defi_interactions,
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn nft_count(&self) -> u64 {
        self.nft_count
    }

    /// Native balance in whole coins.
    pub fn sol_balance(&self) -> f64 {
        self.sol_balance
    }

    /// Estimated USD volume over the scanned transaction window.
    pub fn trading_volume(&self) -> f64 {
        self.trading_volume
    }

    pub fn token_holdings(&self) -> u64 {
        self.token_holdings
    }

    pub fn defi_interactions(&self) -> u64 {
        self.defi_interactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platinum_requires_both_strict_bounds() {
        assert_eq!(Tier::classify(101, 100.5), Tier::Platinum);
        assert_eq!(Tier::classify(150, 120.0), Tier::Platinum);
        assert_ne!(Tier::classify(100, 500.0), Tier::Platinum);
        assert_ne!(Tier::classify(500, 100.0), Tier::Platinum);
    }

    #[test]
    fn test_first_matching_row_wins() {
        assert_eq!(Tier::classify(60, 50.0), Tier::Gold);
        assert_eq!(Tier::classify(50, 30.01), Tier::Gold);
        assert_eq!(Tier::classify(49, 31.0), Tier::Silver);
        assert_eq!(Tier::classify(21, 10.5), Tier::Silver);
        // PLATINUM-sized NFT count but GOLD-sized balance
        assert_eq!(Tier::classify(200, 40.0), Tier::Gold);
    }

    #[test]
    fn test_balance_alone_does_not_promote() {
        assert_eq!(Tier::classify(0, 1_000_000.0), Tier::Bronze);
        assert_eq!(Tier::classify(20, 11.0), Tier::Bronze);
        assert_eq!(Tier::classify(21, 10.0), Tier::Bronze);
        assert_eq!(Tier::classify(10_000, 0.0), Tier::Bronze);
    }

    #[test]
    fn test_tier_code_bijection() {
        let codes: Vec<u8> = Tier::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3]);

        for tier in Tier::ALL {
            assert_eq!(Tier::from_code(tier.code()).unwrap(), tier);
        }
        assert_eq!(Tier::from_code(4), Err(ProfileError::InvalidTierCode(4)));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Bronze < Tier::Silver);
        assert!(Tier::Silver < Tier::Gold);
        assert!(Tier::Gold < Tier::Platinum);
    }

    #[test]
    fn test_tier_value_resolution() {
        assert_eq!(TierValue::Code(2).resolve().unwrap(), Tier::Gold);
        assert_eq!(TierValue::from(Tier::Silver).resolve().unwrap(), Tier::Silver);
        assert!(TierValue::from(9u8).resolve().is_err());
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = InterestProfile::new(150, 120.0, 0.0, 5, 2);
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["tier"], "PLATINUM");
        assert_eq!(json["nftCount"], 150);
        assert_eq!(json["defiInteractions"], 2);
    }

    #[test]
    fn test_deserialized_tier_is_rederived() {
        let json = serde_json::json!({
            "tier": "PLATINUM",
            "nftCount": 0,
            "solBalance": 0.0,
            "tradingVolume": 0.0,
            "tokenHoldings": 0,
            "defiInteractions": 0
        });
        let profile: InterestProfile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.tier(), Tier::Bronze);

        let json = serde_json::json!({
            "nftCount": 60,
            "solBalance": 50.0,
            "tradingVolume": 1.0,
            "tokenHoldings": 1,
            "defiInteractions": 1
        });
        let profile: InterestProfile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.tier(), Tier::Gold);
    }

    #[test]
    fn test_serialize_round_trip_keeps_derived_tier() {
        let profile = InterestProfile::new(150, 120.0, 0.0, 5, 2);
        let json = serde_json::to_string(&profile).unwrap();
        let back: InterestProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
