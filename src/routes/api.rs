//! Notes, folders and tags CRUD routes, nested under /api by [`super::app`].

use crate::handlers::{folders, notes, tags};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/notes", get(notes::list).post(notes::create))
        .route(
            "/notes/:id",
            get(notes::read).put(notes::update).delete(notes::delete),
        )
        .route("/folders", get(folders::list).post(folders::create))
        .route(
            "/folders/:id",
            get(folders::read).put(folders::update).delete(folders::delete),
        )
        .route("/tags", get(tags::list).post(tags::create))
        .route(
            "/tags/:id",
            get(tags::read).put(tags::update).delete(tags::delete),
        )
        .with_state(state)
}
