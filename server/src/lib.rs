//! HTTP to-do list service.
//!
//! # Overview
//! Exposes list/get/create/update/delete over `/todo` (also mounted under
//! `/api/todo`) on top of a pluggable `TodoStore`. Handlers only translate
//! between HTTP and `TodoService`; status codes are decided by `ApiError`.

pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        OriginalUri, Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub use config::Config;
pub use error::{ApiError, ServiceError, StoreError};
pub use model::{TodoItem, TodoPayload};
pub use service::TodoService;
pub use store::{MemoryStore, SqliteStore, TodoStore};

pub fn app(service: TodoService) -> Router {
    let todo: Router<TodoService> = Router::new()
        .route("/todo", get(list_todos).post(create_todo))
        .route("/todo/{id}", get(get_todo).put(update_todo).delete(delete_todo));

    Router::new()
        .route("/health", get(health))
        .route(docs::OPENAPI_PATH, get(docs::openapi))
        .route("/swagger", get(docs::swagger_ui))
        .merge(todo.clone())
        .nest("/api", todo)
        .with_state(service)
}

/// Seed the store and build the router. Must finish before serving requests.
pub async fn prepare(store: Arc<dyn TodoStore>) -> Result<Router, ServiceError> {
    let service = TodoService::new(store);
    service.seed().await?;
    Ok(app(service))
}

pub async fn run(listener: TcpListener, store: Arc<dyn TodoStore>) -> anyhow::Result<()> {
    let router = prepare(store).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router).await?;
    Ok(())
}

fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::MalformedInput(format!("path id: {}", e.body_text())))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| ApiError::MalformedInput(format!("body: {}", e.body_text())))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_todos(State(svc): State<TodoService>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    Ok(Json(svc.list().await?))
}

async fn get_todo(
    State(svc): State<TodoService>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let id = path_id(id)?;
    Ok(Json(svc.get(id).await?))
}

async fn create_todo(
    State(svc): State<TodoService>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<TodoPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let item = svc.create(body(payload)?).await?;
    // Point at the prefix the client used, `/todo` or `/api/todo`.
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), item.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

async fn update_todo(
    State(svc): State<TodoService>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TodoPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    svc.update(id, body(payload)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_todo(
    State(svc): State<TodoService>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let id = path_id(id)?;
    Ok(Json(svc.delete(id).await?))
}
