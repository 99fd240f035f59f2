//! Note reads and writes: fetch joined rows from the store, then hydrate.

use crate::error::AppError;
use crate::hydrate::hydrate;
use crate::model::{Note, NoteFilter, NoteInput};
use crate::service::RequestValidator;
use crate::store::NoteStore;

pub struct NoteService;

impl NoteService {
    pub async fn list(store: &dyn NoteStore, filter: &NoteFilter) -> Result<Vec<Note>, AppError> {
        let rows = store.note_rows(filter).await?;
        Ok(hydrate(rows))
    }

    /// The single hydrated note, or NotFound when no rows come back.
    pub async fn get(store: &dyn NoteStore, id: i32) -> Result<Note, AppError> {
        let rows = store.note_rows(&NoteFilter::by_id(id)).await?;
        hydrate(rows)
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("note {}", id)))
    }

    pub async fn create(store: &dyn NoteStore, mut input: NoteInput) -> Result<Note, AppError> {
        RequestValidator::tag_ids(&mut input)?;
        let title = RequestValidator::note_title(&input)?;
        let id = store.create_note(title, &input).await?;
        tracing::info!(note_id = id, "note created");
        Self::get(store, id).await
    }

    pub async fn update(store: &dyn NoteStore, id: i32, mut input: NoteInput) -> Result<Note, AppError> {
        RequestValidator::tag_ids(&mut input)?;
        let title = RequestValidator::note_title(&input)?;
        store
            .update_note(id, title, &input)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("note {}", id)))?;
        Self::get(store, id).await
    }

    /// Deleting a missing note is not an error.
    pub async fn delete(store: &dyn NoteStore, id: i32) -> Result<(), AppError> {
        if !store.delete_note(id).await? {
            tracing::debug!(note_id = id, "delete of missing note");
        }
        Ok(())
    }
}
