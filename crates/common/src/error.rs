use thiserror::Error;

/// Error types shared across the Alpha ledger crates.
#[derive(Error, Debug)]
pub enum AlphaError {
    /// Role mismatch or unresolved identity attribute
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Negative or otherwise invalid amount
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Sender balance cannot cover the requested amount
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Missing metadata, wallet, key or history
    #[error("Not found: {0}")]
    NotFound(String),

    /// Faucet cooldown window has not elapsed
    #[error("Cooldown active: {remaining_ms} ms remaining")]
    CooldownActive { remaining_ms: i64 },

    /// Faucet reserve is at or below the minimum grant
    #[error("Faucet is empty or does not have enough funds")]
    FaucetDepleted,

    /// Stored value could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Underlying ledger store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Optimistic commit validation failed; caller should retry
    #[error("Invocation conflict on key: {0}")]
    Conflict(String),
}

pub type Result<T> = std::result::Result<T, AlphaError>;
