//! Keyed record storage for todo items.
//!
//! The service only talks to `TodoStore`; which backend sits behind it is
//! decided at startup.

mod memory;
mod sqlite;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{NewTodo, TodoItem};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// All records in ascending id order.
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<TodoItem>, StoreError>;

    /// Persist a new record. The store assigns the id.
    async fn insert(&self, new: NewTodo) -> Result<TodoItem, StoreError>;

    /// Overwrite the record with `item.id`. Fails with `NotFound` when there
    /// is no such record.
    async fn replace(&self, item: TodoItem) -> Result<(), StoreError>;

    async fn remove(&self, id: i64) -> Result<Option<TodoItem>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}
