use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use service::errors::ServiceError;

/// Maps pipeline outcomes onto the wire contract: a `{message}` body for
/// input/not-found/conflict/server errors, a field map for validation
/// errors. The two shapes are never mixed in one response.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

/// The 400 returned when a create/update request carries no usable body.
pub fn missing_body() -> ApiError {
    ApiError(ServiceError::Input("Corpo da requisição não informado.".to_string()))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ServiceError::Input(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            ServiceError::Validation(fields) => {
                (StatusCode::BAD_REQUEST, Json(fields)).into_response()
            }
            ServiceError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ServiceError::Conflict(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            // server faults: log the detail, answer with the generic message
            other => {
                error!(error = %other, "request failed on the store tier");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Erro interno do servidor." })),
                )
                    .into_response()
            }
        }
    }
}
