use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed token parameters written by `set_token`.
pub const TOKEN_NAME: &str = "Alpha";
pub const TOKEN_SYMBOL: &str = "ALP";
pub const TOKEN_DECIMALS: u32 = 18;

/// Fixed amount released per successful faucet request. The faucet must
/// hold strictly more than this before any grant is made.
pub const FAUCET_GRANT: u64 = 50;

/// Caller capability derived from verified identity attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Minter,
    User,
}

impl Role {
    /// Parse the `role` attribute value. Unknown strings map to the
    /// unprivileged `User` role.
    pub fn from_attribute(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "minter" => Role::Minter,
            _ => Role::User,
        }
    }

    pub fn can_mint(&self) -> bool {
        matches!(self, Role::Admin | Role::Minter)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Minter => f.write_str("minter"),
            Role::User => f.write_str("user"),
        }
    }
}

/// Singleton token metadata. `total_supply` only grows, and only via
/// minting; transfers conserve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    pub total_supply: u64,
}

impl TokenMetadata {
    pub fn initial() -> Self {
        Self {
            name: TOKEN_NAME.to_string(),
            symbol: TOKEN_SYMBOL.to_string(),
            decimals: TOKEN_DECIMALS,
            total_supply: 0,
        }
    }
}

/// Per-account balance record. Every write is a full-record replace;
/// callers must pass the complete desired state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub owner_id: String,
    pub token_name: String,
    pub balance: u64,
    /// Epoch millis of the last write that refreshed this wallet.
    /// Faucet eligibility is computed against this value.
    pub last_timestamp: i64,
}

impl Wallet {
    pub fn new(owner_id: &str, balance: u64, last_timestamp: i64) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            token_name: TOKEN_NAME.to_string(),
            balance,
            last_timestamp,
        }
    }

    /// Fresh zero-balance wallet for an account that has never been
    /// credited. The zero timestamp marks it as never granted.
    pub fn empty(owner_id: &str) -> Self {
        Self::new(owner_id, 0, 0)
    }
}

/// Shared faucet reserve. Created and refilled only by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetWallet {
    pub token_name: String,
    pub balance: u64,
    /// Minimum elapsed millis between two grants to the same account.
    pub time_delay: i64,
    /// Epoch millis of the last admin refill.
    pub modified_at: i64,
}

impl FaucetWallet {
    pub fn new(balance: u64, time_delay: i64, modified_at: i64) -> Self {
        Self {
            token_name: TOKEN_NAME.to_string(),
            balance,
            time_delay,
            modified_at,
        }
    }
}
