//! Note handlers: list (with search/folder/tag filters), read, create, update, delete.

use super::{body_to, parse_id, JsonBody};
use crate::error::AppError;
use crate::model::{NoteFilter, NoteInput};
use crate::response::{created, no_content, ok};
use crate::service::NoteService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;

/// Build the list filter from `searchTerm`, `folderId` and `tagId`; other keys are ignored.
fn filter_from_query(params: HashMap<String, String>, limit: u32) -> Result<NoteFilter, AppError> {
    let mut filter = NoteFilter {
        limit: Some(limit),
        ..Default::default()
    };
    for (k, v) in params {
        let v = v.trim();
        if v.is_empty() {
            continue;
        }
        match k.as_str() {
            "searchTerm" => filter.search_term = Some(v.to_string()),
            "folderId" => filter.folder_id = Some(parse_id(v)?),
            "tagId" => filter.tag_id = Some(parse_id(v)?),
            _ => {}
        }
    }
    Ok(filter)
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = filter_from_query(params, state.settings.notes_limit)?;
    let notes = NoteService::list(state.store.as_ref(), &filter).await?;
    Ok(ok(notes))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let note = NoteService::get(state.store.as_ref(), id).await?;
    Ok(ok(note))
}

pub async fn create(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: NoteInput = body_to(body)?;
    let note = NoteService::create(state.store.as_ref(), input).await?;
    Ok(created(format!("/api/notes/{}", note.id), note))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let input: NoteInput = body_to(body)?;
    let note = NoteService::update(state.store.as_ref(), id, input).await?;
    Ok(ok(note))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    NoteService::delete(state.store.as_ref(), id).await?;
    Ok(no_content())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn query_keys_map_to_filter() {
        let f = filter_from_query(
            params(&[("searchTerm", "gaga"), ("folderId", "100"), ("tagId", "2"), ("page", "3")]),
            10,
        )
        .unwrap();
        assert_eq!(f.search_term.as_deref(), Some("gaga"));
        assert_eq!(f.folder_id, Some(100));
        assert_eq!(f.tag_id, Some(2));
        assert_eq!(f.limit, Some(10));
        assert_eq!(f.note_id, None);
    }

    #[test]
    fn blank_values_are_ignored() {
        let f = filter_from_query(params(&[("searchTerm", " "), ("folderId", "")]), 10).unwrap();
        assert_eq!(f.search_term, None);
        assert_eq!(f.folder_id, None);
    }

    #[test]
    fn non_numeric_folder_is_rejected() {
        assert!(filter_from_query(params(&[("folderId", "abc")]), 10).is_err());
    }
}
