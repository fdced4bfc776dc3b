//! Shared in-memory entity store.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, RwLockWriteGuard};

use common::OperationResult;
use domain::Entity;

/// Guarded in-place change for [`MemoryStore::modify`].
///
/// `Err` carries the failure to report; the stored entity is left as it was.
pub type Cambio<T> = Box<dyn FnOnce(&mut T) -> Result<(), OperationResult<T>> + Send>;

/// Thread-safe keyed store of entities, shared by cloning the handle.
///
/// Readers get clones; the map itself never leaves the lock.
#[derive(Debug)]
pub struct MemoryStore<T: Entity> {
    entities: Arc<RwLock<HashMap<String, T>>>,
}

impl<T: Entity> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            entities: Arc::clone(&self.entities),
        }
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store pre-populated with entities
    pub fn with_entries(entries: impl IntoIterator<Item = T>) -> Self {
        let map = entries
            .into_iter()
            .map(|e| (e.id().to_string(), e))
            .collect();

        Self {
            entities: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.entities.read().await.get(id).cloned()
    }

    /// First entity matching the predicate
    pub async fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.entities
            .read()
            .await
            .values()
            .find(|e| predicate(e))
            .cloned()
    }

    /// All matching entities, oldest first.
    pub async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let mut found: Vec<T> = self
            .entities
            .read()
            .await
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect();
        sort_by_creation(&mut found);
        found
    }

    pub async fn all(&self) -> Vec<T> {
        self.filter(|_| true).await
    }

    pub async fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.entities.read().await.values().any(predicate)
    }

    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }

    /// Exclusive access for check-and-insert sequences.
    pub async fn lock(&self) -> RwLockWriteGuard<'_, HashMap<String, T>> {
        self.entities.write().await
    }

    /// Replace an existing entity. Returns `false` if the id is not stored.
    pub async fn replace(&self, entity: T) -> bool {
        let mut entities = self.entities.write().await;
        match entities.get_mut(entity.id()) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    /// Apply `cambio` to a copy of the stored entity and write it back on success.
    ///
    /// Lookup, guard and write-back run under one write lock, so concurrent
    /// changes to the same id are serialized. `None` if the id is not stored.
    pub async fn modify<E>(
        &self,
        id: &str,
        cambio: impl FnOnce(&mut T) -> Result<(), E>,
    ) -> Option<Result<T, E>> {
        let mut entities = self.entities.write().await;
        let slot = entities.get_mut(id)?;

        let mut copia = slot.clone();
        if let Err(err) = cambio(&mut copia) {
            return Some(Err(err));
        }
        *slot = copia.clone();
        Some(Ok(copia))
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.entities.write().await.remove(id).is_some()
    }
}

fn sort_by_creation<T: Entity>(entities: &mut [T]) {
    entities.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
}

/// Await the configured storage latency, if any.
pub(crate) async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Debug, Clone)]
    struct Item {
        id: String,
        created_at: DateTime<Utc>,
    }

    impl Item {
        fn new(id: &str) -> Self {
            Self {
                id: id.to_string(),
                created_at: Utc::now(),
            }
        }
    }

    impl Entity for Item {
        fn id(&self) -> &str {
            &self.id
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn updated_at(&self) -> DateTime<Utc> {
            self.created_at
        }
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::with_entries(vec![Item::new("a")]);
        let other = store.clone();

        other.lock().await.insert("b".to_string(), Item::new("b"));

        assert_eq!(store.len().await, 2);
        assert!(store.get("b").await.is_some());
    }

    #[tokio::test]
    async fn test_replace_requires_existing() {
        let store = MemoryStore::new();
        assert!(!store.replace(Item::new("a")).await);
        assert!(store.is_empty().await);

        store.lock().await.insert("a".to_string(), Item::new("a"));
        assert!(store.replace(Item::new("a")).await);
    }

    #[tokio::test]
    async fn test_modify_is_all_or_nothing() {
        let store = MemoryStore::with_entries(vec![Item::new("a")]);

        let missing = store.modify("b", |_| Ok::<(), ()>(())).await;
        assert!(missing.is_none());

        let rejected = store
            .modify("a", |item| {
                item.id = "cambiado".to_string();
                Err("rechazado")
            })
            .await;
        assert_eq!(rejected.map(|r| r.map(|i| i.id)), Some(Err("rechazado")));
        assert!(store.get("a").await.is_some());

        let stamped = Utc::now() - chrono::Duration::seconds(30);
        let applied = store
            .modify("a", |item| {
                item.created_at = stamped;
                Ok::<(), ()>(())
            })
            .await;
        assert!(matches!(applied, Some(Ok(_))));
        assert_eq!(store.get("a").await.map(|i| i.created_at), Some(stamped));
    }

    #[tokio::test]
    async fn test_remove_reports_presence() {
        let store = MemoryStore::with_entries(vec![Item::new("a")]);
        assert!(store.remove("a").await);
        assert!(!store.remove("a").await);
    }

    #[tokio::test]
    async fn test_filter_orders_by_creation() {
        let mut first = Item::new("z");
        first.created_at = Utc::now() - chrono::Duration::seconds(10);
        let store = MemoryStore::with_entries(vec![Item::new("a"), first]);

        let ids: Vec<_> = store.all().await.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }
}
