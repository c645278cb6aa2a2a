//! Alpha token contract: token registry, wallet ledger, mint and
//! transfer engines, the rate-limited faucet, and the query layer.
//!
//! Every public operation resolves the caller's identity, runs against
//! one atomic ledger invocation and surfaces its outcome as a
//! structured response value.

pub mod contract;
pub mod faucet;
pub mod identity;
pub mod mint;
pub mod query;
pub mod registry;
pub mod response;
pub mod transfer;
pub mod wallet;

pub use contract::FaucetContract;
pub use identity::{Caller, IdentityProvider, StaticIdentity};
pub use response::{QueryResponse, TxResponse};
