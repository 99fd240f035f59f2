//! Folder handlers.

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
    Ok(ok(state.store.list_folders().await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let folder = state
        .store
        .get_folder(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("folder {}", id)))?;
    Ok(ok(folder))
}

pub async fn create(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: NameInput = body_to(body)?;
    let name = RequestValidator::name(&input)?;
    let folder = state.store.create_folder(name).await?;
    tracing::info!(folder_id = folder.id, "folder created");
    Ok(created(format!("/api/folders/{}", folder.id), folder))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let input: NameInput = body_to(body)?;
    let name = RequestValidator::name(&input)?;
    let folder = state
        .store
        .update_folder(id, name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("folder {}", id)))?;
    Ok(ok(folder))
}

/// Notes in the folder are kept and lose their folder.
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.store.delete_folder(id).await?;
    Ok(no_content())
}
