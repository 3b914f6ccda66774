//! Record storage abstractions.
//!
//! Stores never hold records in memory between calls; every operation reads
//! through a `Repository` handle injected at construction.

pub mod in_memory;

pub use in_memory::InMemoryRepository;

use std::sync::Arc;

use warehouse_core::{DomainError, DomainResult, Entity};

/// What a guarded write did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// A stored record satisfied the conflict predicate; nothing was written.
    Conflict,
    /// The backend refused the write.
    Unavailable,
}

impl WriteOutcome {
    /// `Ok` when written, `conflict()` on a conflict.
    pub fn into_result(self, conflict: impl FnOnce() -> DomainError) -> DomainResult<()> {
        match self {
            WriteOutcome::Written => Ok(()),
            WriteOutcome::Conflict => Err(conflict()),
            WriteOutcome::Unavailable => Err(DomainError::Unavailable),
        }
    }
}

/// Key/value record storage that remembers insertion order.
pub trait Repository<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    /// Insert or replace `key` unless a stored record satisfies `conflict`.
    /// The check and the write are one atomic step. A replaced record keeps
    /// its original position.
    fn upsert_unless(&self, key: K, value: V, conflict: &dyn Fn(&V) -> bool) -> WriteOutcome;
    fn remove(&self, key: &K) -> Option<V>;
    /// All records, in insertion order.
    fn list(&self) -> Vec<V>;
    /// Whether any record satisfies `pred`.
    fn any(&self, pred: &dyn Fn(&V) -> bool) -> bool;

    /// Insert or replace.
    fn upsert(&self, key: K, value: V) -> WriteOutcome {
        self.upsert_unless(key, value, &|_| false)
    }

    /// [`Repository::upsert_unless`] keyed by the entity's own id.
    fn save_unless(&self, value: V, conflict: &dyn Fn(&V) -> bool) -> WriteOutcome
    where
        V: Entity<Id = K>,
        K: Clone,
    {
        let key = value.id().clone();
        self.upsert_unless(key, value, conflict)
    }
}

impl<K, V, S> Repository<K, V> for Arc<S>
where
    S: Repository<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    fn upsert_unless(&self, key: K, value: V, conflict: &dyn Fn(&V) -> bool) -> WriteOutcome {
        (**self).upsert_unless(key, value, conflict)
    }

    fn remove(&self, key: &K) -> Option<V> {
        (**self).remove(key)
    }

    fn list(&self) -> Vec<V> {
        (**self).list()
    }

    fn any(&self, pred: &dyn Fn(&V) -> bool) -> bool {
        (**self).any(pred)
    }
}
