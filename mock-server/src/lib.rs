use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// A stored item: whatever object the client sent, plus `_uuid`.
pub type Item = Map<String, Value>;

pub type Db = Arc<RwLock<HashMap<String, Vec<Item>>>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    api_key: Arc<str>,
}

pub fn app(api_key: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(HashMap::new())),
        api_key: Arc::from(api_key),
    };
    Router::new()
        .route("/health", get(health))
        .route("/{collection}", get(list_items).post(create_items))
        .route(
            "/{collection}/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| token == &*state.api_key);
    if !authorized {
        tracing::debug!(uri = %request.uri(), "rejecting request without valid bearer token");
        return error_body(StatusCode::FORBIDDEN, "forbidden");
    }
    next.run(request).await
}

async fn health() -> &'static str {
    "ok"
}

async fn list_items(State(state): State<AppState>, Path(collection): Path<String>) -> Json<Value> {
    let db = state.db.read().await;
    let items = db.get(&collection).cloned().unwrap_or_default();
    Json(json!({ "count": items.len(), "items": items }))
}

async fn create_items(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(input): Json<Value>,
) -> Response {
    let Value::Array(values) = input else {
        return error_body(StatusCode::BAD_REQUEST, "expected an array of items");
    };
    let mut created = Vec::with_capacity(values.len());
    for value in values {
        let Value::Object(mut item) = value else {
            return error_body(StatusCode::BAD_REQUEST, "items must be objects");
        };
        item.insert("_uuid".to_string(), Value::String(Uuid::new_v4().to_string()));
        created.push(item);
    }
    state
        .db
        .write()
        .await
        .entry(collection)
        .or_default()
        .extend(created.iter().cloned());
    (StatusCode::CREATED, Json(json!({ "items": created }))).into_response()
}

fn position(items: &[Item], id: &str) -> Option<usize> {
    items
        .iter()
        .position(|item| item.get("_uuid").and_then(Value::as_str) == Some(id))
}

async fn get_item(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Item>, StatusCode> {
    let db = state.db.read().await;
    let items = db.get(&collection).ok_or(StatusCode::NOT_FOUND)?;
    let idx = position(items, &id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(items[idx].clone()))
}

async fn update_item(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(patch): Json<Item>,
) -> Result<Json<Item>, StatusCode> {
    let mut db = state.db.write().await;
    let items = db.get_mut(&collection).ok_or(StatusCode::NOT_FOUND)?;
    let idx = position(items, &id).ok_or(StatusCode::NOT_FOUND)?;
    let item = &mut items[idx];
    for (key, value) in patch {
        if key != "_uuid" {
            item.insert(key, value);
        }
    }
    Ok(Json(item.clone()))
}

async fn delete_item(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Item>, StatusCode> {
    let mut db = state.db.write().await;
    let items = db.get_mut(&collection).ok_or(StatusCode::NOT_FOUND)?;
    let idx = position(items, &id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(items.remove(idx)))
}
