use crate::store::{HistoryEntry, LedgerStore};
use alpha_common::{Result, StateKey};
use std::collections::{BTreeMap, HashMap};

/// One atomic invocation against the ledger.
///
/// Reads record the version of every key they touch; writes are staged
/// until [`Invocation::commit`]. The store validates the read set at
/// commit time and applies the whole write set or nothing. Reads see
/// this invocation's own staged writes; range scans and history replay
/// observe committed state only.
pub struct Invocation<'a> {
    store: &'a dyn LedgerStore,
    reads: HashMap<Vec<u8>, u64>,
    writes: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl<'a> Invocation<'a> {
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self {
            store,
            reads: HashMap::new(),
            writes: BTreeMap::new(),
        }
    }

    /// Read a key, preferring this invocation's staged write.
    pub fn get(&mut self, key: &StateKey) -> Result<Option<Vec<u8>>> {
        let raw = key.as_bytes();
        if let Some(staged) = self.writes.get(&raw) {
            return Ok(Some(staged.clone()));
        }
        if !self.reads.contains_key(&raw) {
            let version = self.store.version(&raw)?;
            self.reads.insert(raw.clone(), version);
        }
        self.store.get(&raw)
    }

    /// Stage a write for commit.
    pub fn put(&mut self, key: &StateKey, value: Vec<u8>) {
        self.writes.insert(key.as_bytes(), value);
    }

    /// Ordered scan over committed state.
    pub fn range_scan(&self, start: &[u8], end: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        self.store.range_scan(start, end)
    }

    /// Committed history of a key, oldest first.
    pub fn history(&self, key: &[u8]) -> Result<Vec<HistoryEntry>> {
        self.store.history(key)
    }

    /// Validate the read set and apply the staged writes atomically.
    /// On failure nothing is written and the invocation is consumed.
    pub fn commit(self, timestamp_ms: i64) -> Result<()> {
        let reads: Vec<(Vec<u8>, u64)> = self.reads.into_iter().collect();
        let writes: Vec<(Vec<u8>, Vec<u8>)> = self.writes.into_iter().collect();
        self.store.commit(&reads, &writes, timestamp_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sled_store::SledLedger;
    use alpha_common::AlphaError;
    use tempfile::TempDir;

    #[test]
    fn reads_see_staged_writes() {
        let dir = TempDir::new().unwrap();
        let ledger = SledLedger::open(dir.path()).unwrap();

        let key = StateKey::wallet("alice");
        let mut inv = Invocation::new(&ledger);
        assert_eq!(inv.get(&key).unwrap(), None);

        inv.put(&key, b"staged".to_vec());
        assert_eq!(inv.get(&key).unwrap(), Some(b"staged".to_vec()));

        // Nothing visible outside the invocation before commit.
        assert_eq!(ledger.get(&key.as_bytes()).unwrap(), None);

        inv.commit(5).unwrap();
        assert_eq!(ledger.get(&key.as_bytes()).unwrap(), Some(b"staged".to_vec()));
    }

    #[test]
    fn concurrent_writer_aborts_the_loser() {
        let dir = TempDir::new().unwrap();
        let ledger = SledLedger::open(dir.path()).unwrap();

        let key = StateKey::FaucetWallet;
        ledger
            .commit(&[], &[(key.as_bytes(), b"200".to_vec())], 1)
            .unwrap();

        let mut first = Invocation::new(&ledger);
        let mut second = Invocation::new(&ledger);
        first.get(&key).unwrap();
        second.get(&key).unwrap();

        first.put(&key, b"150".to_vec());
        second.put(&key, b"150".to_vec());

        first.commit(2).unwrap();
        let lost = second.commit(3);
        assert!(matches!(lost, Err(AlphaError::Conflict(_))));
        assert_eq!(ledger.get(&key.as_bytes()).unwrap(), Some(b"150".to_vec()));
    }

    #[test]
    fn failed_validation_stages_nothing() {
        let dir = TempDir::new().unwrap();
        let ledger = SledLedger::open(dir.path()).unwrap();

        let key = StateKey::TotalSupply;
        let mut inv = Invocation::new(&ledger);
        inv.get(&key).unwrap();
        inv.put(&key, b"100".to_vec());
        drop(inv);

        assert_eq!(ledger.get(&key.as_bytes()).unwrap(), None);
        assert!(ledger.history(&key.as_bytes()).unwrap().is_empty());
    }
}
