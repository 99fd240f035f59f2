//! Tag handlers.

use super::{body_to, parse_id, JsonBody};
use crate::error::AppError;
use crate::model::NameInput;
use crate::response::{created, no_content, ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.store.list_tags().await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let tag = state
        .store
        .get_tag(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tag {}", id)))?;
    Ok(ok(tag))
}

pub async fn create(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: NameInput = body_to(body)?;
    let name = RequestValidator::name(&input)?;
    let tag = state.store.create_tag(name).await?;
    tracing::info!(tag_id = tag.id, "tag created");
    Ok(created(format!("/api/tags/{}", tag.id), tag))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let input: NameInput = body_to(body)?;
    let name = RequestValidator::name(&input)?;
    let tag = state
        .store
        .update_tag(id, name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tag {}", id)))?;
    Ok(ok(tag))
}

/// Removes the tag from every note it was attached to.
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.store.delete_tag(id).await?;
    Ok(no_content())
}
