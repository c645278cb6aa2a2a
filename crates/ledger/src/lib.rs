//! Ordered key-value ledger with per-key change history.
//!
//! Every public contract operation runs as one `Invocation`: reads
//! record the version of each key they observe, writes are staged, and
//! commit re-validates the read set before applying all writes
//! atomically. A losing invocation fails with `AlphaError::Conflict`
//! and stages nothing; retries are caller-driven.

pub mod invocation;
pub mod sled_store;
pub mod store;

pub use invocation::Invocation;
pub use sled_store::SledLedger;
pub use store::{HistoryEntry, LedgerStore};
