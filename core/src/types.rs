//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! so the client core does not depend on Axum. Integration tests catch any
//! schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: i64,
    pub name: String,
    pub is_complete: bool,
}

/// Request body for create and update. `id` is omitted on create and must
/// match the path id on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub is_complete: bool,
}

impl TodoPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            is_complete: false,
        }
    }

    /// Payload that replaces every field of `item`.
    pub fn replacing(item: &TodoItem) -> Self {
        Self {
            id: Some(item.id),
            name: item.name.clone(),
            is_complete: item.is_complete,
        }
    }
}

/// Result of a successful create: the stored item and the `Location` header
/// the server returned, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub item: TodoItem,
    pub location: Option<String>,
}
