use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

use thiserror::Error;

use larder_core::GroupId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("group store lock poisoned")]
    Poisoned,
}

/// Group-isolated key/value store.
///
/// Every operation is keyed by `(group_id, key)`; there is no way to read or
/// remove a value without naming its group.
pub trait GroupStore<K, V>: Send + Sync {
    fn get(&self, group_id: GroupId, key: &K) -> Result<Option<V>, StoreError>;
    fn upsert(&self, group_id: GroupId, key: K, value: V) -> Result<(), StoreError>;
    fn remove(&self, group_id: GroupId, key: &K) -> Result<Option<V>, StoreError>;
    fn list(&self, group_id: GroupId) -> Result<Vec<V>, StoreError>;
}

/// `RwLock<HashMap>` store for tests and single-process deployments.
#[derive(Debug)]
pub struct InMemoryGroupStore<K, V> {
    inner: RwLock<HashMap<(GroupId, K), V>>,
}

impl<K, V> InMemoryGroupStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryGroupStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> GroupStore<K, V> for InMemoryGroupStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, group_id: GroupId, key: &K) -> Result<Option<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(&(group_id, key.clone())).cloned())
    }

    fn upsert(&self, group_id: GroupId, key: K, value: V) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert((group_id, key), value);
        Ok(())
    }

    fn remove(&self, group_id: GroupId, key: &K) -> Result<Option<V>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(map.remove(&(group_id, key.clone())))
    }

    fn list(&self, group_id: GroupId) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map
            .iter()
            .filter_map(|((g, _k), v)| if *g == group_id { Some(v.clone()) } else { None })
            .collect())
    }
}

#[cfg(test)]
impl<K, V> InMemoryGroupStore<K, V> {
    /// Panic while holding the write lock so later calls see a poisoned lock.
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.inner.write();
            panic!("poisoning group store");
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_invisible_across_groups() {
        let store: InMemoryGroupStore<u32, &'static str> = InMemoryGroupStore::new();
        let (a, b) = (GroupId::new(), GroupId::new());

        store.upsert(a, 1, "soups").unwrap();
        assert_eq!(store.get(a, &1).unwrap(), Some("soups"));
        assert_eq!(store.get(b, &1).unwrap(), None);
        assert!(store.list(b).unwrap().is_empty());
        assert_eq!(store.remove(b, &1).unwrap(), None);
        assert_eq!(store.list(a).unwrap(), vec!["soups"]);
    }

    #[test]
    fn remove_returns_the_value_once() {
        let store: InMemoryGroupStore<u32, &'static str> = InMemoryGroupStore::new();
        let g = GroupId::new();
        store.upsert(g, 7, "bread").unwrap();

        assert_eq!(store.remove(g, &7).unwrap(), Some("bread"));
        assert_eq!(store.remove(g, &7).unwrap(), None);
    }

    #[test]
    fn poisoned_lock_is_reported_not_swallowed() {
        let store: InMemoryGroupStore<u32, u32> = InMemoryGroupStore::new();
        store.poison();

        let g = GroupId::new();
        assert_eq!(store.upsert(g, 1, 1), Err(StoreError::Poisoned));
        assert_eq!(store.get(g, &1), Err(StoreError::Poisoned));
        assert_eq!(store.list(g), Err(StoreError::Poisoned));
        assert_eq!(store.remove(g, &1), Err(StoreError::Poisoned));
    }
}
