// indexer/programs.rs
// Known on-chain program ids and DAS interface tags used by the profile scans.

/// DAS interface tags that identify non-fungible assets.
pub const NFT_INTERFACES: &[&str] = &[
    "V1_NFT",
    "V2_NFT",
    "LEGACY_NFT",
    "ProgrammableNFT",
    "MplCoreAsset",
];

/// Swap programs. A transaction touching one of these counts as a trade.
pub const DEX_PROGRAM_IDS: &[&str] = &[
    "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4", // Jupiter v6
    "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8", // Raydium AMM v4
    "CAMMCzo5YL8w4VFF8KVHrK22GGUsp5VTaW7grrKgrWqK", // Raydium CLMM
    "whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc",  // Orca Whirlpool
];

/// DeFi protocols counted once each per run.
pub const DEFI_PROGRAM_IDS: &[&str] = &[
    "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4",  // Jupiter v6
    "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8", // Raydium AMM v4
    "whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc",  // Orca Whirlpool
    "So1endDq2YkqhipRh3WViPa8hdiSpxWy6z3Z6tMCpAo",  // Solend
    "MarBmsSgKXdrN1egZf5sqe1TMai9K1rChYNDJgjq7aD",  // Marinade
    "MFv2hWf31Z9kbCa1snEPYctwafyhdvnV7FZnsebVacA",  // marginfi v2
    "KLend2g3cP87fffoy8q1mQqGKjrxjC8boSyAYavgmjD",  // Kamino Lend
    "dRiftyHA39MWEi3m9aunc5MzRF1JYuBsbn6VPcn33UH",  // Drift v2
];

pub fn is_nft_interface(interface: &str) -> bool {
    NFT_INTERFACES.contains(&interface)
}

pub fn is_dex_program(program_id: &str) -> bool {
    DEX_PROGRAM_IDS.contains(&program_id)
}

pub fn is_defi_program(program_id: &str) -> bool {
    DEFI_PROGRAM_IDS.contains(&program_id)
}
