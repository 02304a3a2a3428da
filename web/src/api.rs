//! # REST document API
//!
//! The server side of the proxy strategy's wire contract: one POST endpoint
//! per (collection, operation) pair plus the `GET /ping` reachability
//! probe. Handlers call the selected strategy directly — errors surface as
//! `500` here and are absorbed (or, for inserts, propagated) by the client.
//!
//! When an `API_KEY` is configured, every document endpoint requires it in
//! the `X-Api-Key` header.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use dal::{Database, Document, Filter, StorageStrategy, Store};

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
struct ApiState {
    db: Database<Store>,
    api_key: Option<String>,
}

pub fn router(db: Database<Store>, api_key: Option<String>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/{collection}/findOne", post(find_one))
        .route("/{collection}/find", post(find))
        .route("/{collection}/insertOne", post(insert_one))
        .route("/{collection}/updateOne", post(update_one))
        .route("/{collection}/deleteOne", post(delete_one))
        .with_state(ApiState { db, api_key })
}

async fn ping() -> StatusCode {
    StatusCode::OK
}

fn check_key(state: &ApiState, headers: &HeaderMap) -> Result<(), StatusCode> {
    let Some(expected) = &state.api_key else {
        return Ok(());
    };
    let provided = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if provided == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

#[derive(Deserialize)]
struct QueryBody {
    #[serde(default)]
    query: Filter,
}

#[derive(Deserialize)]
struct DocumentBody {
    document: Document,
}

#[derive(Deserialize)]
struct UpdateBody {
    #[serde(default)]
    query: Filter,
    update: Document,
}

async fn find_one(
    State(state): State<ApiState>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<QueryBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    check_key(&state, &headers)?;
    match state.db.store().find_one(&collection, &body.query).await {
        Ok(found) => Ok(Json(json!({ "data": found }))),
        Err(err) => {
            tracing::error!(%err, %collection, "findOne failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn find(
    State(state): State<ApiState>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<QueryBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    check_key(&state, &headers)?;
    match state.db.store().find(&collection, &body.query).await {
        Ok(docs) => Ok(Json(json!({ "data": docs }))),
        Err(err) => {
            tracing::error!(%err, %collection, "find failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn insert_one(
    State(state): State<ApiState>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<DocumentBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    check_key(&state, &headers)?;
    match state.db.store().insert_one(&collection, body.document).await {
        Ok(id) => Ok(Json(json!({ "insertedId": id }))),
        Err(err) => {
            tracing::error!(%err, %collection, "insertOne failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn update_one(
    State(state): State<ApiState>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UpdateBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    check_key(&state, &headers)?;
    match state
        .db
        .store()
        .update_one(&collection, &body.query, &body.update)
        .await
    {
        Ok(modified) => Ok(Json(json!({ "modifiedCount": modified }))),
        Err(err) => {
            tracing::error!(%err, %collection, "updateOne failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn delete_one(
    State(state): State<ApiState>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<QueryBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    check_key(&state, &headers)?;
    match state.db.store().delete_one(&collection, &body.query).await {
        Ok(deleted) => Ok(Json(json!({ "deletedCount": deleted }))),
        Err(err) => {
            tracing::error!(%err, %collection, "deleteOne failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
