//! Wallet address format

/// Shortest accepted base58 wallet address
pub const MIN_WALLET_LEN: usize = 32;

/// Longest accepted base58 wallet address
pub const MAX_WALLET_LEN: usize = 44;

/// Whether `address` looks like a Solana wallet: 32 to 44 ASCII alphanumerics
pub fn is_valid_wallet_address(address: &str) -> bool {
    (MIN_WALLET_LEN..=MAX_WALLET_LEN).contains(&address.len())
        && address.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_format() {
        assert!(is_valid_wallet_address("4E1i4swPTALvtwvokjnzxnEQF2ZE4n24D2NCj5BR4sF"));
        assert!(is_valid_wallet_address(&"a".repeat(32)));
        assert!(!is_valid_wallet_address(&"a".repeat(31)));
        assert!(!is_valid_wallet_address(&"a".repeat(45)));
        assert!(!is_valid_wallet_address("invalid_address"));
        assert!(!is_valid_wallet_address("4E1i4swPTALvtwvokjnzxnEQF2ZE4n24D2NCj5BR4s-"));
    }
}
