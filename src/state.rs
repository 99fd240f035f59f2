//! Shared application state for all routes.

use crate::settings::Settings;
use crate::store::NoteStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Injected persistence; handlers never see a pool directly.
    pub store: Arc<dyn NoteStore>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(store: Arc<dyn NoteStore>, settings: Settings) -> Self {
        AppState {
            store,
            settings: Arc::new(settings),
        }
    }
}
