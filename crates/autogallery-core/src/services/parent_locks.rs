//! Per-parent mutual exclusion for gallery mutations.
//!
//! Mutations on different parents never contend. Entries are created on
//! demand and pruned once nobody holds or waits on them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Keyed lock table, one async mutex per parent ID.
#[derive(Debug, Default)]
pub struct ParentLocks {
    table: Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>,
}

impl ParentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `parent_id`.
    ///
    /// The returned guard releases the parent when dropped.
    pub async fn lock(&self, parent_id: i64) -> OwnedMutexGuard<()> {
        let entry = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            // Only the table holds an idle entry.
            table.retain(|id, mutex| *id == parent_id || Arc::strong_count(mutex) > 1);
            Arc::clone(table.entry(parent_id).or_default())
        };
        entry.lock_owned().await
    }

    /// Number of parents currently tracked.
    pub fn tracked(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
