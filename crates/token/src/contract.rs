//! Public operation surface.
//!
//! Each operation is one atomic invocation: resolve identity, read and
//! validate committed state, stage writes, commit. A failed validation
//! commits nothing, and every outcome is returned as a structured
//! response value.

use crate::identity::{Caller, IdentityProvider};
use crate::response::{QueryResponse, TxResponse};
use crate::{faucet, mint, query, registry, transfer, wallet};
use alpha_common::{AlphaError, Result, FAUCET_GRANT, TOKEN_NAME};
use alpha_ledger::{Invocation, LedgerStore};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

pub struct FaucetContract<S> {
    ledger: S,
}

impl<S: LedgerStore> FaucetContract<S> {
    pub fn new(ledger: S) -> Self {
        Self { ledger }
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Run one operation as an atomic invocation and commit its staged
    /// writes. Errors anywhere abort the whole invocation.
    fn execute<F>(&self, timestamp_ms: i64, op: F) -> TxResponse
    where
        F: FnOnce(&mut Invocation<'_>) -> Result<TxResponse>,
    {
        let mut inv = Invocation::new(&self.ledger);
        match op(&mut inv) {
            Ok(response) => match inv.commit(timestamp_ms) {
                Ok(()) => response,
                Err(err) => err.into(),
            },
            Err(err) => err.into(),
        }
    }

    /// Bootstrap hook. Mutates nothing; the token parameters are fixed
    /// later by `set_token`.
    pub fn init_ledger(&self) -> TxResponse {
        info!("ledger initialized");
        TxResponse::ok("ledger init success")
    }

    /// Admin-only: write the fixed initial token metadata.
    pub fn set_token(&self, identity: &dyn IdentityProvider) -> TxResponse {
        self.execute(Self::now_ms(), |inv| {
            let caller = Caller::resolve(identity)?;
            if !caller.role.is_admin() {
                return Err(AlphaError::Unauthorized(
                    "only an admin can set the token".to_string(),
                ));
            }
            registry::set_token(inv)?;
            Ok(TxResponse::ok("success"))
        })
    }

    pub fn get_token_name(&self) -> TxResponse {
        self.execute(Self::now_ms(), |inv| {
            let name = registry::name(inv)?;
            Ok(TxResponse::ok_with_data("success", Value::String(name)))
        })
    }

    pub fn get_token_symbol(&self) -> TxResponse {
        self.execute(Self::now_ms(), |inv| {
            let symbol = registry::symbol(inv)?;
            Ok(TxResponse::ok_with_data("success", Value::String(symbol)))
        })
    }

    pub fn get_token_decimals(&self) -> TxResponse {
        self.execute(Self::now_ms(), |inv| {
            let decimals = registry::decimals(inv)?;
            Ok(TxResponse::ok_with_data("success", json!(decimals)))
        })
    }

    pub fn get_total_supply(&self) -> TxResponse {
        self.execute(Self::now_ms(), |inv| {
            let supply = registry::total_supply(inv)?;
            Ok(TxResponse::ok_with_data("success", json!(supply)))
        })
    }

    /// Overwrite the caller's wallet with the given state.
    pub fn create_wallet(
        &self,
        identity: &dyn IdentityProvider,
        timestamp_ms: i64,
        amount: i64,
    ) -> TxResponse {
        self.execute(timestamp_ms, |inv| {
            let caller = Caller::resolve(identity)?;
            wallet::create_or_update_wallet(inv, &caller.user_id, timestamp_ms, amount)?;
            Ok(TxResponse::ok("success"))
        })
    }

    /// Balance of the caller's wallet; 0 when no wallet exists yet.
    pub fn get_balance(&self, identity: &dyn IdentityProvider) -> TxResponse {
        self.execute(Self::now_ms(), |inv| {
            let caller = Caller::resolve(identity)?;
            let balance = wallet::balance_of(inv, &caller.user_id)?;
            Ok(TxResponse::ok_with_data("success", json!(balance)))
        })
    }

    /// Credit the caller's own wallet and grow the total supply.
    pub fn mint_token(&self, identity: &dyn IdentityProvider, amount: i64) -> TxResponse {
        let now = Self::now_ms();
        self.execute(now, |inv| {
            let caller = Caller::resolve(identity)?;
            mint::mint(inv, &caller, amount, now)?;
            Ok(TxResponse::ok("success"))
        })
    }

    /// Move balance from the caller to the receiver.
    pub fn transfer(
        &self,
        identity: &dyn IdentityProvider,
        receiver: &str,
        amount: i64,
    ) -> TxResponse {
        let now = Self::now_ms();
        self.execute(now, |inv| {
            let caller = Caller::resolve(identity)?;
            transfer::transfer(inv, &caller.user_id, receiver, amount, now)?;
            Ok(TxResponse::ok(format!(
                "transfer success from {} to {}",
                caller.user_id, receiver
            )))
        })
    }

    /// Current faucet reserve record.
    pub fn faucet_balance(&self) -> TxResponse {
        self.execute(Self::now_ms(), |inv| {
            let record = faucet::faucet_wallet(inv)?;
            let data = serde_json::to_value(&record)
                .map_err(|err| AlphaError::Decode(err.to_string()))?;
            Ok(TxResponse::ok_with_data("success", data))
        })
    }

    /// Admin-only: set the faucet reserve and cooldown policy.
    pub fn set_faucet_wallet(
        &self,
        identity: &dyn IdentityProvider,
        amount: i64,
        time_delay: i64,
        timestamp_ms: i64,
    ) -> TxResponse {
        self.execute(timestamp_ms, |inv| {
            let caller = Caller::resolve(identity)?;
            faucet::set_faucet_wallet(inv, &caller, amount, time_delay, timestamp_ms)?;
            Ok(TxResponse::ok("success"))
        })
    }

    /// Grant the fixed faucet amount to an account, once per window.
    pub fn request_token(&self, user_id: &str, timestamp_ms: i64) -> TxResponse {
        self.execute(timestamp_ms, |inv| {
            faucet::request_token(inv, user_id, timestamp_ms)?;
            Ok(TxResponse::ok(format!(
                "{} {} tokens transferred successfully",
                FAUCET_GRANT, TOKEN_NAME
            )))
        })
    }

    /// Ordered listing of every ledger entry.
    pub fn query_all_assets(&self) -> QueryResponse {
        let inv = Invocation::new(&self.ledger);
        match query::list_all_assets(&inv).and_then(|records| {
            serde_json::to_value(records).map_err(|err| AlphaError::Decode(err.to_string()))
        }) {
            Ok(data) => QueryResponse::ok(data),
            Err(err) => err.into(),
        }
    }

    /// Replay of one key's committed history.
    pub fn query_history_of_asset(&self, asset_id: &str) -> QueryResponse {
        let inv = Invocation::new(&self.ledger);
        match query::history_of_asset(&inv, asset_id).and_then(|records| {
            serde_json::to_value(records).map_err(|err| AlphaError::Decode(err.to_string()))
        }) {
            Ok(data) => QueryResponse::ok(data),
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentity;
    use alpha_ledger::SledLedger;
    use tempfile::TempDir;

    fn contract(dir: &TempDir) -> FaucetContract<SledLedger> {
        FaucetContract::new(SledLedger::open(dir.path()).unwrap())
    }

    #[test]
    fn init_ledger_succeeds_without_writes() {
        let dir = TempDir::new().unwrap();
        let contract = contract(&dir);

        assert!(contract.init_ledger().status);
        assert!(!contract.query_all_assets().status);
    }

    #[test]
    fn set_token_is_gated_on_the_admin_role() {
        let dir = TempDir::new().unwrap();
        let contract = contract(&dir);

        let denied = contract.set_token(&StaticIdentity::new("user", "mallory"));
        assert!(!denied.status);
        assert!(!contract.get_token_name().status);

        let granted = contract.set_token(&StaticIdentity::new("admin", "alice"));
        assert!(granted.status);
        assert_eq!(
            contract.get_token_name().data,
            Some(Value::String("Alpha".to_string()))
        );
        assert_eq!(contract.get_token_symbol().data, Some(json!("ALP")));
        assert_eq!(contract.get_token_decimals().data, Some(json!(18)));
        assert_eq!(contract.get_total_supply().data, Some(json!(0)));
    }

    #[test]
    fn unresolved_identity_fails_every_gated_operation() {
        let dir = TempDir::new().unwrap();
        let contract = contract(&dir);
        let anonymous = StaticIdentity::anonymous();

        assert!(!contract.set_token(&anonymous).status);
        assert!(!contract.mint_token(&anonymous, 10).status);
        assert!(!contract.transfer(&anonymous, "bob", 10).status);
        assert!(!contract.get_balance(&anonymous).status);
    }
}
