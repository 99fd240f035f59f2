//! Noteful: notes, folders and tags over PostgreSQL.
//!
//! Handlers fetch flat joined rows through an injected [`NoteStore`] and shape them into
//! nested [`Note`]s with the pure [`hydrate`] function.

pub mod db;
pub mod error;
pub mod handlers;
pub mod hydrate;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use db::{connect, ensure_database_exists};
pub use error::{AppError, SettingsError};
pub use hydrate::hydrate;
pub use model::{Folder, JoinedRow, Note, NoteFilter, NoteInput, Tag};
pub use routes::{api_routes, app, common_routes};
pub use service::NoteService;
pub use settings::Settings;
pub use state::AppState;
pub use store::{MemoryStore, NoteStore, PgStore};
