//! Per-entity locking
//!
//! Engines are pure; callers that load, evaluate and persist the same proposal
//! or agent from several threads hold the entity's lock across that sequence
//! so tallies and tier application stay exact.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::trace;
use uuid::Uuid;

/// One logical row lock per entity id
#[derive(Debug, Default)]
pub struct EntityLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `id`
    pub fn with_lock<R>(&self, id: Uuid, f: impl FnOnce() -> R) -> R {
        // Clone the Arc out so the DashMap shard is not held while `f` runs
        let lock = self
            .locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let _guard = lock.lock();
        trace!(entity_id = %id, "Entity lock acquired");
        f()
    }

    /// Drop the lock entry for `id` if nobody holds or waits on it
    pub fn release(&self, id: &Uuid) -> bool {
        self.locks
            .remove_if(id, |_, lock| Arc::strong_count(lock) == 1)
            .is_some()
    }

    /// Number of tracked entities
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
