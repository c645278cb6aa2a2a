//! Wallet ledger: per-account balance records.
//!
//! Wallets are stored as JSON under `wallet_{ownerId}` and created
//! lazily on the first balance-affecting operation. Every write is a
//! full-record replace; callers stage the complete desired state.

use alpha_common::{AlphaError, Result, StateKey, Wallet};
use alpha_ledger::Invocation;
use tracing::debug;

/// Read an account's wallet, if one was ever written.
pub fn read_wallet(inv: &mut Invocation<'_>, owner_id: &str) -> Result<Option<Wallet>> {
    let key = StateKey::wallet(owner_id);
    match inv.get(&key)? {
        Some(bytes) => {
            let wallet: Wallet = serde_json::from_slice(&bytes).map_err(|err| {
                AlphaError::Decode(format!("wallet record for {}: {}", owner_id, err))
            })?;
            Ok(Some(wallet))
        }
        None => Ok(None),
    }
}

/// Stage a full-record replace of an account's wallet.
pub fn write_wallet(inv: &mut Invocation<'_>, wallet: &Wallet) -> Result<()> {
    alpha_common::keys::validate_owner_id(&wallet.owner_id)?;
    let key = StateKey::wallet(&wallet.owner_id);
    let bytes = serde_json::to_vec(wallet)
        .map_err(|err| AlphaError::Decode(format!("wallet record encoding: {}", err)))?;
    inv.put(&key, bytes);

    debug!(owner = %wallet.owner_id, balance = wallet.balance, "wallet staged");
    Ok(())
}

/// Unconditional overwrite of the caller's wallet with the given state.
pub fn create_or_update_wallet(
    inv: &mut Invocation<'_>,
    owner_id: &str,
    timestamp_ms: i64,
    amount: i64,
) -> Result<()> {
    if amount < 0 {
        return Err(AlphaError::Validation(
            "wallet balance cannot be negative".to_string(),
        ));
    }
    write_wallet(inv, &Wallet::new(owner_id, amount as u64, timestamp_ms))
}

/// Balance of an account; 0 when no wallet exists yet.
pub fn balance_of(inv: &mut Invocation<'_>, owner_id: &str) -> Result<u64> {
    Ok(read_wallet(inv, owner_id)?.map_or(0, |wallet| wallet.balance))
}
