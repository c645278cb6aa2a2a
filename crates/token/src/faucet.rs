//! Faucet controller.
//!
//! A shared reserve wallet releases a fixed grant of 50 tokens to a
//! requesting account once per cooldown window. The reserve is created
//! and refilled by an admin; grants are the only other thing that moves
//! its balance.

use crate::identity::Caller;
use crate::wallet;
use alpha_common::{AlphaError, FaucetWallet, Result, StateKey, Wallet, FAUCET_GRANT};
use alpha_ledger::Invocation;
use tracing::{info, warn};

/// Read the faucet singleton.
pub fn faucet_wallet(inv: &mut Invocation<'_>) -> Result<FaucetWallet> {
    let bytes = inv
        .get(&StateKey::FaucetWallet)?
        .ok_or_else(|| AlphaError::NotFound("faucet wallet is not set".to_string()))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| AlphaError::Decode(format!("faucet wallet record: {}", err)))
}

/// Admin-only: write the faucet singleton with a fresh reserve and
/// cooldown policy.
///
/// The admin's own balance must cover the reserve, but it is not
/// debited; funding is authorized, not transferred.
pub fn set_faucet_wallet(
    inv: &mut Invocation<'_>,
    caller: &Caller,
    amount: i64,
    time_delay: i64,
    timestamp_ms: i64,
) -> Result<()> {
    if !caller.role.is_admin() {
        warn!(user = %caller.user_id, role = %caller.role, "faucet configuration denied");
        return Err(AlphaError::Unauthorized(
            "only an admin can set the faucet wallet".to_string(),
        ));
    }
    if amount < 0 {
        return Err(AlphaError::Validation(
            "faucet reserve cannot be negative".to_string(),
        ));
    }
    if time_delay < 0 {
        return Err(AlphaError::Validation(
            "faucet time delay cannot be negative".to_string(),
        ));
    }
    let amount = amount as u64;

    let admin_balance = wallet::balance_of(inv, &caller.user_id)?;
    if admin_balance == 0 {
        return Err(AlphaError::Validation(
            "your balance is 0, mint some tokens first".to_string(),
        ));
    }
    if admin_balance < amount {
        return Err(AlphaError::Validation(format!(
            "balance {} does not cover the faucet reserve of {}",
            admin_balance, amount
        )));
    }

    put_faucet_wallet(inv, &FaucetWallet::new(amount, time_delay, timestamp_ms))?;

    info!(
        user = %caller.user_id,
        reserve = amount,
        time_delay,
        "faucet wallet staged"
    );
    Ok(())
}

/// Grant the fixed amount to an account, once per cooldown window.
///
/// A wallet that has never been written is immediately eligible; after
/// that, the elapsed time since the wallet's last grant must strictly
/// exceed the configured delay. A failed request stages nothing.
pub fn request_token(inv: &mut Invocation<'_>, user_id: &str, timestamp_ms: i64) -> Result<u64> {
    let mut faucet = match inv.get(&StateKey::FaucetWallet)? {
        Some(bytes) => serde_json::from_slice::<FaucetWallet>(&bytes)
            .map_err(|err| AlphaError::Decode(format!("faucet wallet record: {}", err)))?,
        None => {
            warn!(user = user_id, "faucet requested before it was set");
            return Err(AlphaError::FaucetDepleted);
        }
    };

    if faucet.balance <= FAUCET_GRANT {
        warn!(user = user_id, reserve = faucet.balance, "faucet depleted");
        return Err(AlphaError::FaucetDepleted);
    }

    let requester = wallet::read_wallet(inv, user_id)?;
    if let Some(ref existing) = requester {
        let elapsed = timestamp_ms - existing.last_timestamp;
        if elapsed <= faucet.time_delay {
            let remaining_ms = faucet.time_delay - elapsed;
            warn!(user = user_id, remaining_ms, "faucet cooldown active");
            return Err(AlphaError::CooldownActive { remaining_ms });
        }
    }
    let requester = requester.unwrap_or_else(|| Wallet::empty(user_id));

    let new_balance = requester
        .balance
        .checked_add(FAUCET_GRANT)
        .ok_or_else(|| AlphaError::Validation("grant overflows balance".to_string()))?;

    wallet::write_wallet(inv, &Wallet::new(user_id, new_balance, timestamp_ms))?;
    faucet.balance -= FAUCET_GRANT;
    put_faucet_wallet(inv, &faucet)?;

    info!(
        user = user_id,
        balance = new_balance,
        reserve = faucet.balance,
        "faucet grant staged"
    );
    Ok(new_balance)
}

fn put_faucet_wallet(inv: &mut Invocation<'_>, faucet: &FaucetWallet) -> Result<()> {
    let bytes = serde_json::to_vec(faucet)
        .map_err(|err| AlphaError::Decode(format!("faucet wallet encoding: {}", err)))?;
    inv.put(&StateKey::FaucetWallet, bytes);
    Ok(())
}
