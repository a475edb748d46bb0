use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::TodoStore;
use crate::error::StoreError;
use crate::model::{NewTodo, TodoItem};

#[derive(Default)]
struct Inner {
    items: BTreeMap<i64, TodoItem>,
    last_id: i64,
}

/// Process-local store. Ids keep increasing after deletes, like an
/// auto-increment column.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.items.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.items.get(&id).cloned())
    }

    async fn insert(&self, new: NewTodo) -> Result<TodoItem, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let item = TodoItem::from_new(inner.last_id, new);
        inner.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn replace(&self, item: TodoItem) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let slot = inner.items.get_mut(&item.id).ok_or(StoreError::NotFound(item.id))?;
        *slot = item;
        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.items.remove(&id))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().await.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.insert(NewTodo::named("a")).await.unwrap();
        let b = store.insert(NewTodo::named("b")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_remove() {
        let store = MemoryStore::new();
        let a = store.insert(NewTodo::named("a")).await.unwrap();
        store.remove(a.id).await.unwrap();
        let b = store.insert(NewTodo::named("b")).await.unwrap();
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn list_is_in_id_order() {
        let store = MemoryStore::new();
        for name in ["x", "y", "z"] {
            store.insert(NewTodo::named(name)).await.unwrap();
        }
        let names: Vec<_> = store.list().await.unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["x", "y", "z"]);
    }

    #[tokio::test]
    async fn replace_missing_record_fails() {
        let store = MemoryStore::new();
        let err = store
            .replace(TodoItem {
                id: 42,
                name: "ghost".into(),
                is_complete: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn remove_returns_snapshot() {
        let store = MemoryStore::new();
        let item = store.insert(NewTodo::named("gone")).await.unwrap();
        assert_eq!(store.remove(item.id).await.unwrap(), Some(item.clone()));
        assert_eq!(store.remove(item.id).await.unwrap(), None);
        assert_eq!(store.find(item.id).await.unwrap(), None);
    }
}
