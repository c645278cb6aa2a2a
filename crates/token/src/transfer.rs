//! Transfer engine: moves balance between two wallets atomically.

use alpha_common::{AlphaError, Result, Wallet};
use alpha_ledger::Invocation;
use tracing::{info, warn};

use crate::wallet;

/// Move `amount` from the sender to the receiver. Debit and credit are
/// staged in the same invocation; a partial transfer is never
/// observable. The sender's wallet gets a fresh timestamp, the
/// receiver's keeps its own.
pub fn transfer(
    inv: &mut Invocation<'_>,
    sender: &str,
    receiver: &str,
    amount: i64,
    timestamp_ms: i64,
) -> Result<()> {
    // A transfer of 0 is allowed; only negative amounts are invalid.
    if amount < 0 {
        return Err(AlphaError::Validation(
            "transfer amount cannot be negative".to_string(),
        ));
    }
    if sender == receiver {
        return Err(AlphaError::Validation(
            "cannot transfer to the sending account".to_string(),
        ));
    }
    let amount = amount as u64;

    let sender_balance = wallet::balance_of(inv, sender)?;
    if sender_balance == 0 {
        warn!(sender, "transfer denied: no balance");
        return Err(AlphaError::InsufficientFunds(format!(
            "account {} has no balance",
            sender
        )));
    }
    if sender_balance < amount {
        warn!(sender, amount, balance = sender_balance, "transfer denied");
        return Err(AlphaError::InsufficientFunds(format!(
            "account {} has insufficient funds",
            sender
        )));
    }

    let receiver_wallet =
        wallet::read_wallet(inv, receiver)?.unwrap_or_else(|| Wallet::empty(receiver));
    let receiver_balance = receiver_wallet
        .balance
        .checked_add(amount)
        .ok_or_else(|| AlphaError::Validation("transfer overflows receiver balance".to_string()))?;

    wallet::write_wallet(
        inv,
        &Wallet::new(sender, sender_balance - amount, timestamp_ms),
    )?;
    wallet::write_wallet(
        inv,
        &Wallet::new(receiver, receiver_balance, receiver_wallet.last_timestamp),
    )?;

    info!(sender, receiver, amount, "transfer staged");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_ledger::SledLedger;
    use tempfile::TempDir;

    fn ledger_with_balance(dir: &TempDir, owner: &str, balance: u64) -> SledLedger {
        let ledger = SledLedger::open(dir.path()).unwrap();
        let mut inv = Invocation::new(&ledger);
        wallet::write_wallet(&mut inv, &Wallet::new(owner, balance, 5)).unwrap();
        inv.commit(5).unwrap();
        ledger
    }

    #[test]
    fn balances_are_conserved() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with_balance(&dir, "alice", 100);

        let mut inv = Invocation::new(&ledger);
        transfer(&mut inv, "alice", "bob", 40, 50).unwrap();
        inv.commit(50).unwrap();

        let mut inv = Invocation::new(&ledger);
        let alice = wallet::read_wallet(&mut inv, "alice").unwrap().unwrap();
        let bob = wallet::read_wallet(&mut inv, "bob").unwrap().unwrap();
        assert_eq!(alice.balance, 60);
        assert_eq!(bob.balance, 40);
        assert_eq!(alice.balance + bob.balance, 100);
        // Sender side gets the fresh timestamp, the lazily created
        // receiver wallet stays never-granted.
        assert_eq!(alice.last_timestamp, 50);
        assert_eq!(bob.last_timestamp, 0);
    }

    #[test]
    fn negative_amount_mutates_nothing() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with_balance(&dir, "alice", 100);

        let mut inv = Invocation::new(&ledger);
        let err = transfer(&mut inv, "alice", "bob", -1, 50).unwrap_err();
        assert!(matches!(err, AlphaError::Validation(_)));
        drop(inv);

        let mut inv = Invocation::new(&ledger);
        assert_eq!(wallet::balance_of(&mut inv, "alice").unwrap(), 100);
        assert_eq!(wallet::read_wallet(&mut inv, "bob").unwrap(), None);
    }

    #[test]
    fn overdraft_mutates_nothing() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with_balance(&dir, "alice", 30);

        let mut inv = Invocation::new(&ledger);
        let err = transfer(&mut inv, "alice", "bob", 31, 50).unwrap_err();
        assert!(matches!(err, AlphaError::InsufficientFunds(_)));
        drop(inv);

        let mut inv = Invocation::new(&ledger);
        assert_eq!(wallet::balance_of(&mut inv, "alice").unwrap(), 30);
        assert_eq!(wallet::read_wallet(&mut inv, "bob").unwrap(), None);
    }

    #[test]
    fn sender_without_wallet_has_no_balance() {
        let dir = TempDir::new().unwrap();
        let ledger = SledLedger::open(dir.path()).unwrap();

        let mut inv = Invocation::new(&ledger);
        let err = transfer(&mut inv, "ghost", "bob", 10, 50).unwrap_err();
        assert!(matches!(err, AlphaError::InsufficientFunds(_)));
    }

    #[test]
    fn self_transfer_is_rejected() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with_balance(&dir, "alice", 100);

        let mut inv = Invocation::new(&ledger);
        let err = transfer(&mut inv, "alice", "alice", 10, 50).unwrap_err();
        assert!(matches!(err, AlphaError::Validation(_)));
    }

    #[test]
    fn zero_transfer_is_allowed() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with_balance(&dir, "alice", 100);

        let mut inv = Invocation::new(&ledger);
        transfer(&mut inv, "alice", "bob", 0, 50).unwrap();
        inv.commit(50).unwrap();

        let mut inv = Invocation::new(&ledger);
        assert_eq!(wallet::balance_of(&mut inv, "alice").unwrap(), 100);
        assert_eq!(wallet::balance_of(&mut inv, "bob").unwrap(), 0);
    }
}
