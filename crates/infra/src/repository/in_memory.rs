use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

use super::{Repository, WriteOutcome};

#[derive(Debug)]
struct Slots<K, V> {
    records: HashMap<K, (u64, V)>,
    next_seq: u64,
}

/// In-memory repository for tests/dev and the default server wiring.
#[derive(Debug)]
pub struct InMemoryRepository<K, V> {
    inner: RwLock<Slots<K, V>>,
}

impl<K, V> InMemoryRepository<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Slots {
                records: HashMap::new(),
                next_seq: 0,
            }),
        }
    }
}

impl<K, V> Default for InMemoryRepository<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Repository<K, V> for InMemoryRepository<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        let slots = self.inner.read().ok()?;
        slots.records.get(key).map(|(_, v)| v.clone())
    }

    fn upsert_unless(&self, key: K, value: V, conflict: &dyn Fn(&V) -> bool) -> WriteOutcome {
        let Ok(mut slots) = self.inner.write() else {
            return WriteOutcome::Unavailable;
        };
        if slots.records.values().any(|(_, v)| conflict(v)) {
            return WriteOutcome::Conflict;
        }
        if let Some((_, existing)) = slots.records.get_mut(&key) {
            *existing = value;
            return WriteOutcome::Written;
        }
        let seq = slots.next_seq;
        slots.next_seq += 1;
        slots.records.insert(key, (seq, value));
        WriteOutcome::Written
    }

    fn remove(&self, key: &K) -> Option<V> {
        let mut slots = self.inner.write().ok()?;
        slots.records.remove(key).map(|(_, v)| v)
    }

    fn list(&self) -> Vec<V> {
        let slots = match self.inner.read() {
            Ok(s) => s,
            Err(_) => return vec![],
        };

        let mut ordered: Vec<&(u64, V)> = slots.records.values().collect();
        ordered.sort_by_key(|(seq, _)| *seq);
        ordered.into_iter().map(|(_, v)| v.clone()).collect()
    }

    fn any(&self, pred: &dyn Fn(&V) -> bool) -> bool {
        match self.inner.read() {
            Ok(slots) => slots.records.values().any(|(_, v)| pred(v)),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn list_preserves_insertion_order() {
        let repo: InMemoryRepository<u32, &str> = InMemoryRepository::new();
        for (k, v) in [(30, "c"), (10, "a"), (20, "b")] {
            repo.upsert(k, v);
        }
        assert_eq!(repo.list(), vec!["c", "a", "b"]);
    }

    #[test]
    fn replacing_keeps_position() {
        let repo: InMemoryRepository<u32, &str> = InMemoryRepository::new();
        repo.upsert(1, "first");
        repo.upsert(2, "second");
        repo.upsert(1, "first again");
        assert_eq!(repo.list(), vec!["first again", "second"]);
    }

    #[test]
    fn remove_and_any() {
        let repo: InMemoryRepository<u32, u32> = InMemoryRepository::new();
        repo.upsert(1, 10);
        repo.upsert(2, 20);
        assert!(repo.any(&|v| *v == 20));
        assert_eq!(repo.remove(&2), Some(20));
        assert!(!repo.any(&|v| *v == 20));
        assert_eq!(repo.get(&2), None);
        assert_eq!(repo.remove(&2), None);
    }

    #[test]
    fn guarded_write_checks_and_writes_together() {
        let repo: InMemoryRepository<u32, u32> = InMemoryRepository::new();
        assert_eq!(repo.upsert(1, 10), WriteOutcome::Written);
        assert_eq!(repo.upsert_unless(2, 10, &|v| *v == 10), WriteOutcome::Conflict);
        assert_eq!(repo.get(&2), None);
        assert_eq!(repo.upsert_unless(2, 20, &|v| *v == 20), WriteOutcome::Written);
        assert_eq!(repo.list(), vec![10, 20]);
    }

    #[test]
    fn poisoned_lock_reports_unavailable() {
        let repo: Arc<InMemoryRepository<u32, u32>> = Arc::new(InMemoryRepository::new());
        let held = repo.clone();
        let _ = std::thread::spawn(move || {
            let _guard = held.inner.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert_eq!(repo.upsert(1, 10), WriteOutcome::Unavailable);
        assert_eq!(repo.get(&1), None);
    }
}
