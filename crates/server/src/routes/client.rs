use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use models::client::Client;

use crate::errors::{missing_body, ApiError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body.ok_or_else(missing_body)?;
    service::client::create(state.store.as_ref(), &body).await?;
    Ok(StatusCode::CREATED)
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Client>>, ApiError> {
    Ok(Json(service::client::list(state.store.as_ref()).await?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(service::client::get(state.store.as_ref(), &id).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body.ok_or_else(missing_body)?;
    service::client::update(state.store.as_ref(), &id, &body).await?;
    Ok(StatusCode::OK)
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service::client::delete(state.store.as_ref(), &id).await?;
    Ok(StatusCode::OK)
}
