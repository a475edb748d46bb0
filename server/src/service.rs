//! CRUD operations over the record store.
//!
//! # Design
//! `TodoService` is a thin layer that turns store outcomes into
//! `ServiceError`s. It holds no state of its own, so it is cheap to clone into
//! every handler. Seeding is a separate call made once at startup.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::ServiceError;
use crate::model::{NewTodo, TodoItem, TodoPayload};
use crate::store::TodoStore;

/// Name of the item inserted into an empty store at startup.
pub const SEED_NAME: &str = "Item1";

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Insert the seed item if the store is empty. Returns `true` when it did.
    pub async fn seed(&self) -> Result<bool, ServiceError> {
        if self.store.count().await? > 0 {
            return Ok(false);
        }
        let item = self.store.insert(NewTodo::named(SEED_NAME)).await?;
        info!(id = item.id, "seeded empty store");
        Ok(true)
    }

    pub async fn list(&self) -> Result<Vec<TodoItem>, ServiceError> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: i64) -> Result<TodoItem, ServiceError> {
        self.store.find(id).await?.ok_or(ServiceError::NotFound(id))
    }

    /// Any id in the payload is ignored; the store assigns one.
    pub async fn create(&self, payload: TodoPayload) -> Result<TodoItem, ServiceError> {
        let item = self.store.insert(payload.into()).await?;
        debug!(id = item.id, "created todo item");
        Ok(item)
    }

    pub async fn update(&self, id: i64, payload: TodoPayload) -> Result<(), ServiceError> {
        if payload.id != Some(id) {
            return Err(ServiceError::InvalidRequest(format!(
                "body id {} does not match path id {id}",
                payload.id.map_or_else(|| "<missing>".to_string(), |v| v.to_string())
            )));
        }
        self.store
            .replace(TodoItem {
                id,
                name: payload.name,
                is_complete: payload.is_complete,
            })
            .await?;
        debug!(id, "updated todo item");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<TodoItem, ServiceError> {
        let item = self.store.remove(id).await?.ok_or(ServiceError::NotFound(id))?;
        debug!(id, "deleted todo item");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> TodoService {
        TodoService::new(Arc::new(MemoryStore::new()))
    }

    fn payload(id: Option<i64>, name: &str, is_complete: bool) -> TodoPayload {
        TodoPayload {
            id,
            name: name.to_string(),
            is_complete,
        }
    }

    #[tokio::test]
    async fn seed_inserts_item1_once() {
        let svc = service();
        assert!(svc.seed().await.unwrap());
        assert!(!svc.seed().await.unwrap());

        let items = svc.list().await.unwrap();
        assert_eq!(
            items,
            vec![TodoItem {
                id: 1,
                name: SEED_NAME.to_string(),
                is_complete: false,
            }]
        );
    }

    #[tokio::test]
    async fn seed_skips_non_empty_store() {
        let svc = service();
        svc.create(payload(None, "existing", true)).await.unwrap();
        assert!(!svc.seed().await.unwrap());
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let svc = service();
        svc.seed().await.unwrap();
        let created = svc.create(payload(None, "Buy milk", false)).await.unwrap();
        assert_eq!(created.id, 2);
        assert_eq!(svc.get(2).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_ignores_payload_id() {
        let svc = service();
        let created = svc.create(payload(Some(500), "x", false)).await.unwrap();
        assert_eq!(created.id, 1);
        assert!(matches!(svc.get(500).await, Err(ServiceError::NotFound(500))));
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let svc = service();
        svc.seed().await.unwrap();
        assert!(matches!(svc.get(9999).await, Err(ServiceError::NotFound(9999))));
    }

    #[tokio::test]
    async fn update_with_mismatched_id_is_rejected_and_store_unchanged() {
        let svc = service();
        svc.seed().await.unwrap();
        let before = svc.get(1).await.unwrap();

        let err = svc.update(1, payload(Some(2), "x", true)).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));
        assert_eq!(svc.get(1).await.unwrap(), before);
    }

    #[tokio::test]
    async fn update_without_body_id_is_rejected() {
        let svc = service();
        svc.seed().await.unwrap();
        let err = svc.update(1, payload(None, "x", true)).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let svc = service();
        svc.seed().await.unwrap();
        svc.update(1, payload(Some(1), "renamed", true)).await.unwrap();
        let item = svc.get(1).await.unwrap();
        assert_eq!(item.name, "renamed");
        assert!(item.is_complete);
    }

    #[tokio::test]
    async fn update_absent_id_is_not_found() {
        let svc = service();
        let err = svc.update(7, payload(Some(7), "x", false)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(7)));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_returns_snapshot_then_not_found() {
        let svc = service();
        svc.seed().await.unwrap();
        let created = svc.create(payload(None, "temp", true)).await.unwrap();

        let deleted = svc.delete(created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert!(matches!(svc.get(created.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(created.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_length_tracks_creates_and_deletes() {
        let svc = service();
        svc.seed().await.unwrap();
        let mut expected = 1;
        let mut ids = Vec::new();
        for i in 0..3 {
            let item = svc.create(payload(None, &format!("item {i}"), false)).await.unwrap();
            ids.push(item.id);
            expected += 1;
            assert_eq!(svc.list().await.unwrap().len(), expected);
        }
        for id in ids {
            svc.delete(id).await.unwrap();
            expected -= 1;
            assert_eq!(svc.list().await.unwrap().len(), expected);
        }
    }
}
