//! Sled-backed ledger store.
//!
//! Two trees: `state` holds the current value per key, `meta` holds the
//! per-key write version (`ver\0{key}`), the append-only history index
//! (`his\0{key}\0{seq}`), and the global commit counter. Commits apply
//! state, version and history writes in one sled transaction.

use crate::store::{HistoryEntry, LedgerStore};
use alpha_common::{AlphaError, Result};
use sled::transaction::{ConflictableTransactionError, TransactionError};
use sled::Transactional;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn};

const SEQ_KEY: &[u8] = b"seq";
const VERSION_PREFIX: &[u8] = b"ver\0";
const HISTORY_PREFIX: &[u8] = b"his\0";

pub struct SledLedger {
    _db: sled::Db,
    state: sled::Tree,
    meta: sled::Tree,
    /// Serializes read-set validation with the transactional apply.
    commit_lock: Mutex<()>,
}

impl SledLedger {
    /// Create or open a ledger at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Opening ledger at: {}", path.as_ref().display());

        let db = sled::open(path).map_err(storage_err)?;
        let state = db.open_tree("state").map_err(storage_err)?;
        let meta = db.open_tree("meta").map_err(storage_err)?;

        Ok(Self {
            _db: db,
            state,
            meta,
            commit_lock: Mutex::new(()),
        })
    }

    fn next_commit_seq(&self) -> Result<u64> {
        let last = match self.meta.get(SEQ_KEY).map_err(storage_err)? {
            Some(bytes) => decode_u64(&bytes)?,
            None => 0,
        };
        Ok(last + 1)
    }
}

impl LedgerStore for SledLedger {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self
            .state
            .get(key)
            .map_err(storage_err)?
            .map(|ivec| ivec.to_vec()))
    }

    fn version(&self, key: &[u8]) -> Result<u64> {
        match self.meta.get(version_key(key)).map_err(storage_err)? {
            Some(bytes) => decode_u64(&bytes),
            None => Ok(0),
        }
    }

    fn range_scan(&self, start: &[u8], end: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let iter: Box<dyn Iterator<Item = sled::Result<(sled::IVec, sled::IVec)>>> =
            match (start.is_empty(), end.is_empty()) {
                (true, true) => Box::new(self.state.iter()),
                (false, true) => Box::new(self.state.range(start.to_vec()..)),
                (true, false) => Box::new(self.state.range(..end.to_vec())),
                (false, false) => Box::new(self.state.range(start.to_vec()..end.to_vec())),
            };

        let mut entries = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(storage_err)?;
            entries.push((key.to_vec(), value.to_vec()));
        }
        Ok(entries)
    }

    fn history(&self, key: &[u8]) -> Result<Vec<HistoryEntry>> {
        let mut entries = Vec::new();
        // scan_prefix walks keys in order, so entries come back in
        // commit order (the sequence number is big-endian).
        for item in self.meta.scan_prefix(history_prefix(key)) {
            let (_, value) = item.map_err(storage_err)?;
            entries.push(decode_history_entry(&value)?);
        }
        Ok(entries)
    }

    fn commit(
        &self,
        reads: &[(Vec<u8>, u64)],
        writes: &[(Vec<u8>, Vec<u8>)],
        timestamp_ms: i64,
    ) -> Result<()> {
        let _guard = self
            .commit_lock
            .lock()
            .map_err(|_| AlphaError::Storage("commit lock poisoned".to_string()))?;

        for (key, observed) in reads {
            let current = self.version(key)?;
            if current != *observed {
                let key_str = String::from_utf8_lossy(key).into_owned();
                warn!(
                    key = %key_str,
                    observed, current,
                    "read-set validation failed, aborting invocation"
                );
                return Err(AlphaError::Conflict(key_str));
            }
        }

        if writes.is_empty() {
            return Ok(());
        }

        let seq = self.next_commit_seq()?;

        (&self.state, &self.meta)
            .transaction(|(state, meta)| {
                meta.insert(SEQ_KEY, seq.to_be_bytes().to_vec())?;
                for (key, value) in writes {
                    state.insert(key.as_slice(), value.as_slice())?;

                    let vkey = version_key(key);
                    let version = match meta.get(&vkey)? {
                        Some(bytes) => decode_u64_tx(&bytes)? + 1,
                        None => 1,
                    };
                    meta.insert(vkey.as_slice(), version.to_be_bytes().to_vec())?;

                    meta.insert(
                        history_key(key, seq).as_slice(),
                        encode_history_entry(seq, timestamp_ms, value).as_slice(),
                    )?;
                }
                Ok(())
            })
            .map_err(|err: TransactionError<()>| match err {
                TransactionError::Abort(()) => {
                    AlphaError::Storage("ledger commit aborted".to_string())
                }
                TransactionError::Storage(e) => storage_err(e),
            })?;

        debug!(seq, writes = writes.len(), "invocation committed");
        Ok(())
    }
}

fn storage_err(err: sled::Error) -> AlphaError {
    AlphaError::Storage(err.to_string())
}

fn version_key(key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(VERSION_PREFIX.len() + key.len());
    out.extend_from_slice(VERSION_PREFIX);
    out.extend_from_slice(key);
    out
}

fn history_prefix(key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HISTORY_PREFIX.len() + key.len() + 1);
    out.extend_from_slice(HISTORY_PREFIX);
    out.extend_from_slice(key);
    out.push(0);
    out
}

fn history_key(key: &[u8], seq: u64) -> Vec<u8> {
    let mut out = history_prefix(key);
    out.extend_from_slice(&seq.to_be_bytes());
    out
}

/// History entries are framed as `seq(8) | timestamp(8) | value`.
fn encode_history_entry(seq: u64, timestamp_ms: i64, value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(16 + value.len());
    out.extend_from_slice(&seq.to_be_bytes());
    out.extend_from_slice(&timestamp_ms.to_be_bytes());
    out.extend_from_slice(value);
    out
}

fn decode_history_entry(bytes: &[u8]) -> Result<HistoryEntry> {
    if bytes.len() < 16 {
        return Err(AlphaError::Decode(
            "history entry shorter than its header".to_string(),
        ));
    }
    let commit_seq = u64::from_be_bytes(bytes[..8].try_into().unwrap_or_default());
    let timestamp_ms = i64::from_be_bytes(bytes[8..16].try_into().unwrap_or_default());
    Ok(HistoryEntry {
        commit_seq,
        timestamp_ms,
        value: bytes[16..].to_vec(),
    })
}

fn decode_u64(bytes: &[u8]) -> Result<u64> {
    let arr: [u8; 8] = bytes
        .try_into()
        .map_err(|_| AlphaError::Decode("invalid u64 encoding".to_string()))?;
    Ok(u64::from_be_bytes(arr))
}

fn decode_u64_tx(bytes: &[u8]) -> std::result::Result<u64, ConflictableTransactionError<()>> {
    let arr: [u8; 8] = bytes
        .as_ref()
        .try_into()
        .map_err(|_| ConflictableTransactionError::Abort(()))?;
    Ok(u64::from_be_bytes(arr))
}
