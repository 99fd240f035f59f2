//! Router assembly.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::error::AppError;
use crate::response::error_body;
use crate::state::AppState;
use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json, Router,
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(error_body("not_found", AppError::NotFound(uri.path().to_string()).to_string())),
    )
}

/// Full application: common routes at the root, CRUD under /api, JSON 404 for anything else.
pub fn app(state: AppState) -> Router {
    let body_limit = state.settings.body_limit;
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", api_routes(state))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
