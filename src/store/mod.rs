//! Persistence capability injected into handlers. Stores return flat joined rows; they never hydrate.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::model::{Folder, JoinedRow, NoteFilter, NoteInput, Tag};
use async_trait::async_trait;

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    /// Joined note/folder/tag rows for the notes matching `filter`, ordered by note id then tag id.
    async fn note_rows(&self, filter: &NoteFilter) -> Result<Vec<JoinedRow>, AppError>;

    /// Insert a note (and its tag links when `input.tags` is set). Returns the new id.
    async fn create_note(&self, title: &str, input: &NoteInput) -> Result<i32, AppError>;

    /// Update a note; `input.tags`, when set, replaces the note's tags. `None` when the id is unknown.
    async fn update_note(&self, id: i32, title: &str, input: &NoteInput) -> Result<Option<i32>, AppError>;

    /// Returns whether a row was deleted.
    async fn delete_note(&self, id: i32) -> Result<bool, AppError>;

    async fn list_folders(&self) -> Result<Vec<Folder>, AppError>;
    async fn get_folder(&self, id: i32) -> Result<Option<Folder>, AppError>;
    async fn create_folder(&self, name: &str) -> Result<Folder, AppError>;
    async fn update_folder(&self, id: i32, name: &str) -> Result<Option<Folder>, AppError>;
    async fn delete_folder(&self, id: i32) -> Result<bool, AppError>;

    async fn list_tags(&self) -> Result<Vec<Tag>, AppError>;
    async fn get_tag(&self, id: i32) -> Result<Option<Tag>, AppError>;
    async fn create_tag(&self, name: &str) -> Result<Tag, AppError>;
    async fn update_tag(&self, id: i32, name: &str) -> Result<Option<Tag>, AppError>;
    async fn delete_tag(&self, id: i32) -> Result<bool, AppError>;
}
