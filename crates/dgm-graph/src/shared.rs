use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::config::ManagerConfig;
use crate::manager::HypergraphManager;

/// Thread-safe handle to a [`HypergraphManager`].
///
/// All edits and queries go through one coarse lock, since traversal reads
/// the adjacency lists that edits write. Clones share the same registry;
/// separately constructed handles share nothing.
#[derive(Debug, Clone, Default)]
pub struct SharedHypergraphManager {
    inner: Arc<Mutex<HypergraphManager>>,
}

impl SharedHypergraphManager {
    /// Creates a handle around a fresh manager.
    pub fn new(config: ManagerConfig) -> Self {
        Self::from_manager(HypergraphManager::new(config))
    }

    /// Wraps an existing manager, e.g. one restored from a snapshot.
    pub fn from_manager(manager: HypergraphManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    /// Runs a read-only closure under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&HypergraphManager) -> R) -> R {
        let guard = self.inner.lock();
        f(&guard)
    }

    /// Runs a mutating closure under the lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut HypergraphManager) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Acquires the lock for a sequence of operations.
    pub fn lock(&self) -> MutexGuard<'_, HypergraphManager> {
        self.inner.lock()
    }

    /// Returns whether both handles point at the same registry.
    pub fn same_registry(&self, other: &SharedHypergraphManager) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
