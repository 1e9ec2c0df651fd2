use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Hello;

use crate::state::AppState;

pub mod category;
pub mod client;
pub mod event;
pub mod participant;
pub mod user;
pub mod venue;

pub async fn hello() -> Json<Hello> {
    Json(Hello { message: "Hello World!" })
}

/// Build the full application router: one sub-router per resource plus the
/// liveness route.
pub fn build_router(cors: CorsLayer, state: AppState) -> Router {
    Router::new()
        .route("/hello", get(hello))
        .nest("/usuario", user::router())
        .nest("/categoria", category::router())
        .nest("/local", venue::router())
        .nest("/cliente", client::router())
        .nest("/evento", event::router())
        .nest("/participante", participant::router())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
