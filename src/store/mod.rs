//! Generic keyed storage for domain entities.
//!
//! The `Repository` trait decouples the account logic from the storage
//! technology. The reference backend is the process-local [`InMemoryRepo`];
//! a persistent backend would implement the same contract.

pub mod memory;

pub use memory::InMemoryRepo;

use thiserror::Error;

/// Repository-assigned identifier. Unique and monotonic within a process
/// lifetime; never reused, even across a bulk clear.
pub type EntityId = u64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("backend does not support bulk clear")]
    Unsupported,
}

/// A storable entity. Identifiers are owned by the repository: `assign_id`
/// is called exactly once, on insertion.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> EntityId;
    fn assign_id(&mut self, id: EntityId);
}

/// Keyed store contract, polymorphic over the entity type.
///
/// `with_mut` is the concurrency seam: the closure runs while the store's
/// own lock is held, so a check-and-set sequence (inspect lock state, then
/// mutate) is atomic with respect to concurrent requests. The lock is held
/// only for the duration of that closure, never across requests.
pub trait Repository<T: Entity>: Send + Sync {
    /// Assigns a fresh identifier, stores the entity, returns the stored form.
    fn add(&self, entity: T) -> T;

    /// Lookup by id. Absence is a valid outcome, not an error.
    fn get(&self, id: EntityId) -> Option<T>;

    /// Replaces stored state for an existing identifier; no-op when absent.
    fn update(&self, id: EntityId, entity: T);

    /// Runs `op` against the stored entity under the store lock. Returns
    /// false when the id is absent (the closure is not invoked).
    fn with_mut(&self, id: EntityId, op: &mut dyn FnMut(&mut T)) -> bool;

    /// Bulk reset. Administrative capability; backends without it return
    /// [`StoreError::Unsupported`].
    fn clear(&self) -> Result<(), StoreError>;
}
