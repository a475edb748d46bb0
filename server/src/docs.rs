//! OpenAPI description of the todo API and a Swagger UI page that renders it.
//!
//! The document is built by hand with `serde_json::json!`, so it has to be
//! kept in step with the routes in `lib.rs` and the types in `model.rs`.

use axum::{response::Html, Json};
use serde_json::{json, Value};

/// Where the OpenAPI document is served.
pub const OPENAPI_PATH: &str = "/swagger/v1/swagger.json";

pub async fn openapi() -> Json<Value> {
    Json(document())
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/Error" } }
        }
    })
}

fn item_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/TodoItem" } }
        }
    })
}

fn id_parameter() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    })
}

fn payload_body(example: Value) -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/TodoPayload" },
                "example": example
            }
        }
    })
}

/// Builds the OpenAPI 3.0.3 document.
pub fn document() -> Value {
    let collection = json!({
        "get": {
            "tags": ["Todo"],
            "operationId": "listTodoItems",
            "summary": "Gets all todo items.",
            "responses": {
                "200": {
                    "description": "All items in ascending id order",
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/TodoItem" }
                            }
                        }
                    }
                }
            }
        },
        "post": {
            "tags": ["Todo"],
            "operationId": "createTodoItem",
            "summary": "Creates a todo item.",
            "description": "Any `id` in the body is ignored; the store assigns one. The `Location` header points at the new item.",
            "requestBody": payload_body(json!({ "name": "Item1", "isComplete": true })),
            "responses": {
                "201": item_response("The newly created item"),
                "400": error_response("Malformed body")
            }
        }
    });

    let item = json!({
        "parameters": [id_parameter()],
        "get": {
            "tags": ["Todo"],
            "operationId": "getTodoItem",
            "summary": "Gets a single todo item.",
            "responses": {
                "200": item_response("The requested item"),
                "400": error_response("Malformed path id"),
                "404": error_response("No item with that id")
            }
        },
        "put": {
            "tags": ["Todo"],
            "operationId": "updateTodoItem",
            "summary": "Replaces a todo item.",
            "description": "The body `id` must equal the path id.",
            "requestBody": payload_body(json!({ "id": 1, "name": "Item1", "isComplete": true })),
            "responses": {
                "204": { "description": "Updated, no content returned" },
                "400": error_response("Id mismatch or malformed body"),
                "404": error_response("No item with that id")
            }
        },
        "delete": {
            "tags": ["Todo"],
            "operationId": "deleteTodoItem",
            "summary": "Deletes a todo item.",
            "responses": {
                "200": item_response("The deleted item"),
                "400": error_response("Malformed path id"),
                "404": error_response("No item with that id")
            }
        }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Todo API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Create, read, update and delete to-do items."
        },
        "servers": [{ "url": "/", "description": "Current server" }],
        "tags": [{ "name": "Todo", "description": "To-do item operations" }],
        "paths": {
            "/todo": collection.clone(),
            "/todo/{id}": item.clone(),
            "/api/todo": collection,
            "/api/todo/{id}": item,
            "/health": {
                "get": {
                    "summary": "Liveness probe.",
                    "responses": { "200": { "description": "Service is up" } }
                }
            }
        },
        "components": {
            "schemas": {
                "TodoItem": {
                    "type": "object",
                    "required": ["id", "name", "isComplete"],
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "name": { "type": "string" },
                        "isComplete": { "type": "boolean" }
                    }
                },
                "TodoPayload": {
                    "type": "object",
                    "required": ["name"],
                    "additionalProperties": false,
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "name": { "type": "string" },
                        "isComplete": { "type": "boolean", "default": false }
                    }
                },
                "Error": {
                    "type": "object",
                    "required": ["error"],
                    "properties": { "error": { "type": "string" } }
                }
            }
        }
    })
}

pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Todo API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            SwaggerUIBundle({{ url: '{OPENAPI_PATH}', dom_id: '#swagger-ui', deepLinking: true }});
        }};
    </script>
</body>
</html>
"#
    ))
}
