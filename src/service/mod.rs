//! NoteService: note reads/writes through the store and the hydrator.

mod notes;
mod validation;
pub use notes::NoteService;
pub use validation::RequestValidator;
