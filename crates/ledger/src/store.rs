use alpha_common::Result;

/// One past version of a key, as exposed by the ledger's history
/// capability. Entries are returned oldest to newest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Global commit sequence number of the invocation that wrote it.
    pub commit_seq: u64,
    /// Epoch millis recorded at commit time.
    pub timestamp_ms: i64,
    /// The value bytes as they were written.
    pub value: Vec<u8>,
}

/// Ordered key-value store with per-key change history and optimistic,
/// all-or-nothing commits.
///
/// Keys must not contain NUL bytes; the history index uses NUL as a
/// separator.
pub trait LedgerStore {
    /// Read the committed value for a key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Current write version of a key; 0 for a key never written.
    fn version(&self, key: &[u8]) -> Result<u64>;

    /// Ordered scan over committed state. Empty bounds are unbounded,
    /// so `range_scan(b"", b"")` walks the whole namespace.
    fn range_scan(&self, start: &[u8], end: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Replay every committed version of a key, oldest first.
    fn history(&self, key: &[u8]) -> Result<Vec<HistoryEntry>>;

    /// Validate a read set and apply a write set atomically.
    ///
    /// Each `(key, version)` pair in `reads` must still match the
    /// store's current version, otherwise the whole commit fails with
    /// `AlphaError::Conflict` and nothing is written. `timestamp_ms`
    /// is recorded on every history entry the commit produces.
    fn commit(
        &self,
        reads: &[(Vec<u8>, u64)],
        writes: &[(Vec<u8>, Vec<u8>)],
        timestamp_ms: i64,
    ) -> Result<()>;
}
