//! Wire and storage types for todo records.
//!
//! # Design
//! `TodoItem` is both the persisted record and its JSON form. Request bodies
//! go through `TodoPayload` instead, which rejects unknown fields and requires
//! `name`, so a malformed body fails deterministically rather than silently
//! defaulting.

use serde::{Deserialize, Serialize};

/// A persisted todo record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: i64,
    pub name: String,
    pub is_complete: bool,
}

/// Request body accepted by create and update.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TodoPayload {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub is_complete: bool,
}

/// Fields of a record that does not have an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTodo {
    pub name: String,
    pub is_complete: bool,
}

impl NewTodo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_complete: false,
        }
    }
}

impl From<TodoPayload> for NewTodo {
    fn from(payload: TodoPayload) -> Self {
        Self {
            name: payload.name,
            is_complete: payload.is_complete,
        }
    }
}

impl TodoItem {
    pub fn from_new(id: i64, new: NewTodo) -> Self {
        Self {
            id,
            name: new.name,
            is_complete: new.is_complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_item_serializes_with_camel_case() {
        let item = TodoItem {
            id: 1,
            name: "Item1".to_string(),
            is_complete: false,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Item1", "isComplete": false}));
    }

    #[test]
    fn payload_defaults_id_and_is_complete() {
        let payload: TodoPayload = serde_json::from_str(r#"{"name":"Buy milk"}"#).unwrap();
        assert_eq!(payload.id, None);
        assert_eq!(payload.name, "Buy milk");
        assert!(!payload.is_complete);
    }

    #[test]
    fn payload_accepts_full_shape() {
        let payload: TodoPayload =
            serde_json::from_str(r#"{"id":7,"name":"","isComplete":true}"#).unwrap();
        assert_eq!(payload.id, Some(7));
        assert!(payload.name.is_empty());
        assert!(payload.is_complete);
    }

    #[test]
    fn payload_rejects_missing_name() {
        let result: Result<TodoPayload, _> = serde_json::from_str(r#"{"isComplete":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn payload_rejects_unknown_fields() {
        let result: Result<TodoPayload, _> =
            serde_json::from_str(r#"{"name":"x","completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn payload_rejects_wrong_types() {
        let result: Result<TodoPayload, _> =
            serde_json::from_str(r#"{"name":"x","isComplete":"yes"}"#);
        assert!(result.is_err());
    }
}
