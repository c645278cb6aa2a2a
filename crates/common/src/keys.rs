//! Ledger key builder.
//!
//! The ledger namespace is flat; every logical entity maps to one key
//! through this builder rather than string concatenation at call sites.

use crate::error::{AlphaError, Result};

const WALLET_PREFIX: &str = "wallet_";
const NAME_KEY: &str = "name";
const SYMBOL_KEY: &str = "symbol";
const DECIMALS_KEY: &str = "decimals";
const TOTAL_SUPPLY_KEY: &str = "totalSupply";
const FAUCET_WALLET_KEY: &str = "faucetWallet";

/// Logical state key for the ledger namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateKey {
    Name,
    Symbol,
    Decimals,
    TotalSupply,
    Wallet(String),
    FaucetWallet,
}

/// Owner ids become part of ledger keys, and the ledger's history index
/// uses NUL as a separator, so ids that contain one are invalid.
pub fn validate_owner_id(owner_id: &str) -> Result<()> {
    if owner_id.contains('\0') {
        return Err(AlphaError::Validation(
            "owner id must not contain NUL bytes".to_string(),
        ));
    }
    Ok(())
}

impl StateKey {
    pub fn wallet(owner_id: &str) -> Self {
        StateKey::Wallet(owner_id.to_string())
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateKey::Name => f.write_str(NAME_KEY),
            StateKey::Symbol => f.write_str(SYMBOL_KEY),
            StateKey::Decimals => f.write_str(DECIMALS_KEY),
            StateKey::TotalSupply => f.write_str(TOTAL_SUPPLY_KEY),
            StateKey::Wallet(owner_id) => write!(f, "{}{}", WALLET_PREFIX, owner_id),
            StateKey::FaucetWallet => f.write_str(FAUCET_WALLET_KEY),
        }
    }
}
