//! SQLite-backed store.
//!
//! # Design
//! One `todo_items` table with an `AUTOINCREMENT` key so ids are never reused.
//! rusqlite is blocking, so every call hops onto `spawn_blocking` and takes
//! the connection mutex for the duration of the statement. Each statement
//! runs in autocommit mode, so a write is durable once the call returns.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::TodoStore;
use crate::error::StoreError;
use crate::model::{NewTodo, TodoItem};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS todo_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        is_complete INTEGER NOT NULL DEFAULT 0
    );
";

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::init_with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init_with_connection(conn)
    }

    fn init_with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StoreError::Backend("connection mutex poisoned".to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Backend(format!("blocking task failed: {e}")))?
    }
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<TodoItem> {
    Ok(TodoItem {
        id: row.get(0)?,
        name: row.get(1)?,
        is_complete: row.get(2)?,
    })
}

fn select_one(conn: &Connection, id: i64) -> Result<Option<TodoItem>, StoreError> {
    let item = conn
        .query_row(
            "SELECT id, name, is_complete FROM todo_items WHERE id = ?1",
            params![id],
            row_to_item,
        )
        .optional()?;
    Ok(item)
}

#[async_trait]
impl TodoStore for SqliteStore {
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, is_complete FROM todo_items ORDER BY id")?;
            let items = stmt
                .query_map([], row_to_item)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(items)
        })
        .await
    }

    async fn find(&self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        self.with_conn(move |conn| select_one(conn, id)).await
    }

    async fn insert(&self, new: NewTodo) -> Result<TodoItem, StoreError> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO todo_items (name, is_complete) VALUES (?1, ?2)",
                params![new.name, new.is_complete],
            )?;
            Ok(TodoItem::from_new(conn.last_insert_rowid(), new))
        })
        .await
    }

    async fn replace(&self, item: TodoItem) -> Result<(), StoreError> {
        self.with_conn(move |conn| {
            let changed = conn.execute(
                "UPDATE todo_items SET name = ?1, is_complete = ?2 WHERE id = ?3",
                params![item.name, item.is_complete, item.id],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound(item.id));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        self.with_conn(move |conn| {
            let Some(item) = select_one(conn, id)? else {
                return Ok(None);
            };
            conn.execute("DELETE FROM todo_items WHERE id = ?1", params![id])?;
            Ok(Some(item))
        })
        .await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM todo_items", [], |row| row.get(0))?;
            Ok(n as usize)
        })
        .await
    }
}
