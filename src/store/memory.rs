//! In-memory reference implementation of the repository contract.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Entity, EntityId, Repository, StoreError};

/// Process-local keyed store. One coarse mutex guards the whole container,
/// so every `with_mut` closure runs as a serialized critical section.
pub struct InMemoryRepo<T> {
    items: Mutex<HashMap<EntityId, T>>,
    next_id: AtomicU64,
}

impl<T> InMemoryRepo<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Poisoning is recovered: a panicked request must not wedge the store.
    fn lock(&self) -> MutexGuard<'_, HashMap<EntityId, T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for InMemoryRepo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Repository<T> for InMemoryRepo<T> {
    fn add(&self, mut entity: T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        entity.assign_id(id);
        self.lock().insert(id, entity.clone());
        entity
    }

    fn get(&self, id: EntityId) -> Option<T> {
        self.lock().get(&id).cloned()
    }

    fn update(&self, id: EntityId, entity: T) {
        let mut items = self.lock();
        if items.contains_key(&id) {
            items.insert(id, entity);
        }
    }

    fn with_mut(&self, id: EntityId, op: &mut dyn FnMut(&mut T)) -> bool {
        let mut items = self.lock();
        match items.get_mut(&id) {
            Some(entity) => {
                op(entity);
                true
            }
            None => false,
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        // The id counter is left alone: identifiers are never reused within
        // a process lifetime.
        self.lock().clear();
        Ok(())
    }
}
