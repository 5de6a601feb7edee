//! Per-object lock table.
//!
//! Serializes operations on the same object so a reader never pairs the
//! metadata of one write with the body of another. Entries exist only while
//! some task holds or waits on them.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One table entry: the mutex plus the number of tasks holding or waiting on it.
#[derive(Debug, Default)]
struct Slot {
    mutex: Arc<Mutex<()>>,
    users: usize,
}

type LockMap = DashMap<String, Slot>;

/// Table of async mutexes keyed by object namespace.
#[derive(Debug, Default, Clone)]
pub(crate) struct KeyLocks {
    inner: Arc<LockMap>,
}

impl KeyLocks {
    /// Acquire the lock for `key`, waiting for any current holder.
    ///
    /// Dropping the returned future before it resolves gives up the wait and
    /// releases the entry.
    pub(crate) async fn lock(&self, key: String) -> KeyGuard {
        let mutex = {
            let mut slot = self.inner.entry(key.clone()).or_default();
            slot.users += 1;
            Arc::clone(&slot.mutex)
        };
        let registration = Registration {
            key,
            table: Arc::clone(&self.inner),
        };

        let guard = mutex.lock_owned().await;
        KeyGuard {
            _guard: guard,
            _registration: registration,
        }
    }

    /// Number of live entries.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Counts one task against an entry; the last one out removes it.
#[derive(Debug)]
struct Registration {
    key: String,
    table: Arc<LockMap>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(mut slot) = self.table.get_mut(&self.key) {
            slot.users -= 1;
        }
        self.table.remove_if(&self.key, |_, slot| slot.users == 0);
    }
}

/// Holds one entry of a [`KeyLocks`] table until dropped.
///
/// Fields drop in order: the mutex is released before the entry is.
#[derive(Debug)]
pub(crate) struct KeyGuard {
    _guard: OwnedMutexGuard<()>,
    _registration: Registration,
}
