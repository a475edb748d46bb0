use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::error::StoreError;
use crate::store::{MemoryStore, SqliteStore, TodoStore};

/// Command-line and environment configuration for the server binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", about = "HTTP to-do list service")]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "TODO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database file. Created if missing.
    #[arg(long, env = "TODO_DATABASE", default_value = "todo.db")]
    pub database: PathBuf,

    /// Keep records in memory only; `--database` is ignored.
    #[arg(long, env = "TODO_IN_MEMORY")]
    pub in_memory: bool,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn open_store(&self) -> Result<Arc<dyn TodoStore>, StoreError> {
        if self.in_memory {
            return Ok(Arc::new(MemoryStore::new()));
        }
        Ok(Arc::new(SqliteStore::open(&self.database)?))
    }
}
