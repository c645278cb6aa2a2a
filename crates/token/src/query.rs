//! Query engine: full-namespace listing and per-key history replay.
//!
//! Stored values are JSON records or plain text scalars, so decoding is
//! best-effort: anything that is not valid JSON is surfaced as a raw
//! string instead of aborting the scan. Empty results are reported as
//! errors; callers depend on that contract.

use alpha_common::{AlphaError, Result};
use alpha_ledger::Invocation;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// One committed ledger entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub key: String,
    pub record: Value,
}

/// One past version of a ledger entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetHistoryRecord {
    pub commit_seq: u64,
    pub timestamp_ms: i64,
    pub record: Value,
}

/// Ordered listing of every committed entry in the ledger namespace.
pub fn list_all_assets(inv: &Invocation<'_>) -> Result<Vec<AssetRecord>> {
    let entries = inv.range_scan(b"", b"")?;
    if entries.is_empty() {
        return Err(AlphaError::NotFound("no assets exist on ledger".to_string()));
    }

    let records = entries
        .into_iter()
        .map(|(key, value)| AssetRecord {
            key: String::from_utf8_lossy(&key).into_owned(),
            record: decode_or_raw(&value),
        })
        .collect::<Vec<_>>();

    debug!(count = records.len(), "ledger listing");
    Ok(records)
}

/// Replay of a key's committed versions, oldest first.
pub fn history_of_asset(inv: &Invocation<'_>, asset_id: &str) -> Result<Vec<AssetHistoryRecord>> {
    let entries = inv.history(asset_id.as_bytes())?;
    if entries.is_empty() {
        return Err(AlphaError::NotFound(format!("{} does not exist", asset_id)));
    }

    Ok(entries
        .into_iter()
        .map(|entry| AssetHistoryRecord {
            commit_seq: entry.commit_seq,
            timestamp_ms: entry.timestamp_ms,
            record: decode_or_raw(&entry.value),
        })
        .collect())
}

/// Structured decode with a raw-text fallback; never fails the scan.
fn decode_or_raw(bytes: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => value,
        Err(_) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
    }
}
