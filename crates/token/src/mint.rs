//! Mint engine.
//!
//! Minting credits the caller's own wallet and grows `totalSupply`,
//! both inside one invocation. Restricted to the minter and admin
//! roles.

use crate::identity::Caller;
use crate::{registry, wallet};
use alpha_common::{AlphaError, Result, Wallet};
use alpha_ledger::Invocation;
use tracing::{info, warn};

pub fn mint(
    inv: &mut Invocation<'_>,
    caller: &Caller,
    amount: i64,
    timestamp_ms: i64,
) -> Result<u64> {
    if !caller.role.can_mint() {
        warn!(user = %caller.user_id, role = %caller.role, "mint denied");
        return Err(AlphaError::Unauthorized(
            "only a minter or admin can mint tokens".to_string(),
        ));
    }
    if amount < 0 {
        return Err(AlphaError::Validation(
            "mint amount cannot be negative".to_string(),
        ));
    }
    let amount = amount as u64;

    let current = wallet::read_wallet(inv, &caller.user_id)?
        .unwrap_or_else(|| Wallet::empty(&caller.user_id));
    let new_balance = current
        .balance
        .checked_add(amount)
        .ok_or_else(|| AlphaError::Validation("mint amount overflows balance".to_string()))?;
    wallet::write_wallet(
        inv,
        &Wallet::new(&caller.user_id, new_balance, timestamp_ms),
    )?;

    let supply = registry::total_supply(inv)?;
    let new_supply = supply
        .checked_add(amount)
        .ok_or_else(|| AlphaError::Validation("mint amount overflows total supply".to_string()))?;
    registry::put_total_supply(inv, new_supply);

    info!(
        user = %caller.user_id,
        amount,
        balance = new_balance,
        total_supply = new_supply,
        "mint staged"
    );
    Ok(new_balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use alpha_common::Role;
    use alpha_ledger::SledLedger;
    use tempfile::TempDir;

    fn caller(role: Role, user_id: &str) -> Caller {
        Caller {
            role,
            user_id: user_id.to_string(),
        }
    }

    fn ledger_with_token(dir: &TempDir) -> SledLedger {
        let ledger = SledLedger::open(dir.path()).unwrap();
        let mut inv = Invocation::new(&ledger);
        registry::set_token(&mut inv).unwrap();
        inv.commit(1).unwrap();
        ledger
    }

    #[test]
    fn minter_and_admin_can_mint() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with_token(&dir);

        let mut inv = Invocation::new(&ledger);
        assert_eq!(mint(&mut inv, &caller(Role::Minter, "m"), 300, 10).unwrap(), 300);
        inv.commit(10).unwrap();

        let mut inv = Invocation::new(&ledger);
        assert_eq!(mint(&mut inv, &caller(Role::Admin, "a"), 700, 20).unwrap(), 700);
        inv.commit(20).unwrap();

        let mut inv = Invocation::new(&ledger);
        assert_eq!(registry::total_supply(&mut inv).unwrap(), 1000);
        assert_eq!(wallet::balance_of(&mut inv, "m").unwrap(), 300);
        assert_eq!(wallet::balance_of(&mut inv, "a").unwrap(), 700);
    }

    #[test]
    fn plain_user_cannot_mint() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with_token(&dir);

        let mut inv = Invocation::new(&ledger);
        let err = mint(&mut inv, &caller(Role::User, "u"), 10, 10).unwrap_err();
        assert!(matches!(err, AlphaError::Unauthorized(_)));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with_token(&dir);

        let mut inv = Invocation::new(&ledger);
        let err = mint(&mut inv, &caller(Role::Admin, "a"), -5, 10).unwrap_err();
        assert!(matches!(err, AlphaError::Validation(_)));
    }

    #[test]
    fn mint_requires_initialized_metadata() {
        let dir = TempDir::new().unwrap();
        let ledger = SledLedger::open(dir.path()).unwrap();

        let mut inv = Invocation::new(&ledger);
        let err = mint(&mut inv, &caller(Role::Admin, "a"), 10, 10).unwrap_err();
        assert!(matches!(err, AlphaError::NotFound(_)));
    }
}
