//! Shared types for the Alpha token ledger.

pub mod error;
pub mod keys;
pub mod types;

pub use error::{AlphaError, Result};
pub use keys::StateKey;
pub use types::{
    FaucetWallet, Role, TokenMetadata, Wallet, FAUCET_GRANT, TOKEN_DECIMALS, TOKEN_NAME,
    TOKEN_SYMBOL,
};
