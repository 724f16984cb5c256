// profile-common/src/data/encoding.rs
// Field order and units are a wire contract with the vault program:
// [tierCode, nftCount, solBalanceLamports, tradingVolumeCents, tokenHoldings, defiInteractions]

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{InterestProfile, ProfileError, ProfileResult};

pub const FIELD_COUNT: usize = 6;

pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;
pub const CENTS_PER_USD: f64 = 100.0;

/// Bit widths of the on-chain storage slots, in field order.
pub const STORAGE_WIDTHS: [u32; FIELD_COUNT] = [8, 32, 64, 64, 32, 32];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedFields(pub [u64; FIELD_COUNT]);

impl EncodedFields {
    pub fn values(&self) -> &[u64; FIELD_COUNT] {
        &self.0
    }

    pub fn tier_code(&self) -> u64 {
        self.0[0]
    }

    pub fn nft_count(&self) -> u64 {
        self.0[1]
    }

    pub fn sol_balance_lamports(&self) -> u64 {
        self.0[2]
    }

    pub fn trading_volume_cents(&self) -> u64 {
        self.0[3]
    }

    pub fn token_holdings(&self) -> u64 {
        self.0[4]
    }

    pub fn defi_interactions(&self) -> u64 {
        self.0[5]
    }

    /// Whether every value fits its storage slot. Nothing is clamped here.
    pub fn fits_storage_widths(&self) -> bool {
        self.0
            .iter()
            .zip(STORAGE_WIDTHS.iter())
            .all(|(value, bits)| *bits >= 64 || *value < (1u64 << bits))
    }
}

/// Convert a profile into the six-field integer record that gets encrypted.
pub fn encode_fields(profile: &InterestProfile) -> ProfileResult<EncodedFields> {
    let fields = EncodedFields([
        u64::from(profile.tier().code()),
        profile.nft_count(),
        scale_floor("solBalance", profile.sol_balance(), LAMPORTS_PER_SOL)?,
        scale_floor("tradingVolume", profile.trading_volume(), CENTS_PER_USD)?,
        profile.token_holdings(),
        profile.defi_interactions(),
    ]);

    debug!("Encoded profile fields: {:?}", fields.0);
    Ok(fields)
}

/// floor(value * scale) as an unsigned integer.
///
/// Non-finite, negative or out-of-range products are rejected rather than saturated.
fn scale_floor(field: &'static str, value: f64, scale: f64) -> ProfileResult<u64> {
    let scaled = (value * scale).floor();

    if !scaled.is_finite() {
        return Err(ProfileError::Unencodable {
            field,
            reason: format!("value {} is not finite", value),
        });
    }
    if scaled < 0.0 {
        return Err(ProfileError::Unencodable {
            field,
            reason: format!("value {} is negative", value),
        });
    }
    // 2^64 is exactly representable; anything at or above it overflows u64.
    if scaled >= 18_446_744_073_709_551_616.0 {
        return Err(ProfileError::Unencodable {
            field,
            reason: format!("value {} exceeds 64 bits after scaling", value),
        });
    }

    Ok(scaled as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::Tier;

    fn profile(sol_balance: f64, trading_volume: f64) -> InterestProfile {
        InterestProfile::new(3, sol_balance, trading_volume, 1, 0)
    }

    #[test]
    fn test_unit_conversion_floors() {
        let fields = encode_fields(&profile(1.5, 12.345)).unwrap();
        assert_eq!(fields.sol_balance_lamports(), 1_500_000_000);
        assert_eq!(fields.trading_volume_cents(), 1234);

        let fields = encode_fields(&profile(0.25, 0.999)).unwrap();
        assert_eq!(fields.sol_balance_lamports(), 250_000_000);
        assert_eq!(fields.trading_volume_cents(), 99);
    }

    #[test]
    fn test_platinum_scenario_field_order() {
        let p = InterestProfile::new(150, 120.0, 0.0, 5, 2);
        assert_eq!(p.tier(), Tier::Platinum);

        let fields = encode_fields(&p).unwrap();
        assert_eq!(fields.0, [3, 150, 120_000_000_000, 0, 5, 2]);
        assert!(fields.fits_storage_widths());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let p = InterestProfile::new(42, 17.25, 980.5, 12, 3);
        assert_eq!(encode_fields(&p).unwrap(), encode_fields(&p).unwrap());
    }

    #[test]
    fn test_rejects_unrepresentable_values() {
        assert!(encode_fields(&profile(-1.0, 0.0)).is_err());
        assert!(encode_fields(&profile(f64::NAN, 0.0)).is_err());
        assert!(encode_fields(&profile(0.0, f64::INFINITY)).is_err());
        assert!(encode_fields(&profile(0.0, 1.0e18)).is_err());
    }

    #[test]
    fn test_storage_width_check() {
        let fields = EncodedFields([3, u64::from(u32::MAX), u64::MAX, 0, 1, 1]);
        assert!(fields.fits_storage_widths());

        let fields = EncodedFields([3, u64::from(u32::MAX) + 1, 0, 0, 1, 1]);
        assert!(!fields.fits_storage_widths());

        let fields = EncodedFields([256, 0, 0, 0, 0, 0]);
        assert!(!fields.fits_storage_widths());
    }
}
