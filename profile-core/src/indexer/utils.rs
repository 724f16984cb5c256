// indexer/utils.rs
// Utility functions for Solana addresses

use super::IndexerError;

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Validate a base58 Solana address before it is sent anywhere
pub fn validate_solana_address(address: &str) -> Result<String, IndexerError> {
    let address = address.trim();

    if address.is_empty() {
        return Err(IndexerError::InvalidAddress(
            "Address cannot be empty".to_string(),
        ));
    }

    if !address.chars().all(|c| BASE58_ALPHABET.contains(c)) {
        return Err(IndexerError::InvalidAddress(format!(
            "Address '{}' contains non-base58 characters",
            address
        )));
    }

    // 32 bytes encode to 32..=44 base58 characters
    if address.len() < 32 || address.len() > 44 {
        return Err(IndexerError::InvalidAddress(format!(
            "Address '{}' has invalid length",
            address
        )));
    }

    Ok(address.to_string())
}

/// Lamports to whole coins
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / 1_000_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_validation() {
        assert!(validate_solana_address("JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4").is_ok());
        assert!(validate_solana_address("  So11111111111111111111111111111111111111112 ").is_ok());
        assert!(validate_solana_address("").is_err());
        assert!(validate_solana_address("0xdeadbeef").is_err());
        assert!(validate_solana_address("JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4IO").is_err());
        assert!(validate_solana_address("abc").is_err());
    }

    #[test]
    fn test_lamport_conversion() {
        assert_eq!(lamports_to_sol(1_500_000_000), 1.5);
        assert_eq!(lamports_to_sol(0), 0.0);
    }
}
