use std::sync::Arc;
use std::time::Duration;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use crate::core::library::{AssetId, LibraryError, LibraryResult};

// AssetLocks hands out one mutex per asset id; assets never share a lock.
#[derive(Debug)]
pub(crate) struct AssetLocks {
    locks: DashMap<AssetId, Arc<Mutex<()>>>,
    timeout: Duration,
}

// Entries are never evicted. Commands only lock registered assets, so the map is bounded
// by the catalog size.

impl AssetLocks {
    pub(crate) fn new(timeout_ms: u64) -> Self {
        Self {
            locks: DashMap::new(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub(crate) async fn acquire(&self, asset_id: AssetId) -> LibraryResult<OwnedMutexGuard<()>> {
        // the shard guard must be gone before awaiting
        let lock = self.locks.entry(asset_id).or_insert_with(|| Arc::new(Mutex::new(()))).value().clone();
        tokio::time::timeout(self.timeout, lock.lock_owned()).await.map_err(|_|
            LibraryError::concurrency_conflict(format!("asset {} is busy, lock not acquired in {}ms",
                                                       asset_id, self.timeout.as_millis()).as_str()))
    }
}
