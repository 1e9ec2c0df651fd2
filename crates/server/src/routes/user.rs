use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use models::user::User;

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
    service::user::create(state.store.as_ref(), &body).await?;
    Ok(StatusCode::CREATED)
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(service::user::list(state.store.as_ref()).await?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(service::user::get(state.store.as_ref(), &id).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.ok_or_else(missing_body)?;
    service::user::update(state.store.as_ref(), &id, &body).await?;
    Ok(Json(json!({ "message": "Usuário atualizado com sucesso." })))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    service::user::delete(state.store.as_ref(), &id).await?;
    Ok(Json(json!({ "message": "Usuário excluído com sucesso." })))
}
