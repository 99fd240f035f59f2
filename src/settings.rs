//! Runtime settings read from the environment and an optional `.env` file.

use crate::error::SettingsError;
use std::collections::HashMap;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_NOTES_LIMIT: u32 = 100;
pub const MAX_NOTES_LIMIT: u32 = 1000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// `DATABASE_URL`. When unset the server runs on the in-memory store.
    pub database_url: Option<String>,
    /// `BIND_ADDR`.
    pub bind_addr: String,
    /// `NOTES_DEFAULT_LIMIT`: notes returned by GET /notes, capped at [`MAX_NOTES_LIMIT`].
    pub notes_limit: u32,
    /// `DB_MAX_CONNECTIONS`.
    pub max_connections: u32,
    /// `BODY_LIMIT_BYTES`.
    pub body_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.into(),
            notes_limit: DEFAULT_NOTES_LIMIT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Settings {
    /// Loads `.env` (if present, without overriding set variables), then reads the environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, SettingsError> {
        let defaults = Settings::default();
        let get = |k: &str| vars.get(k).map(|v| v.trim()).filter(|v| !v.is_empty());

        Ok(Settings {
            database_url: get("DATABASE_URL").map(str::to_string),
            bind_addr: get("BIND_ADDR").map(str::to_string).unwrap_or(defaults.bind_addr),
            notes_limit: parse(get("NOTES_DEFAULT_LIMIT"), "NOTES_DEFAULT_LIMIT")?
                .unwrap_or(defaults.notes_limit)
                .clamp(1, MAX_NOTES_LIMIT),
            max_connections: parse(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS")?
                .unwrap_or(defaults.max_connections),
            body_limit: parse(get("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES")?.unwrap_or(defaults.body_limit),
        })
    }
}

fn parse<T: std::str::FromStr>(raw: Option<&str>, key: &'static str) -> Result<Option<T>, SettingsError> {
    raw.map(|v| {
        v.parse().map_err(|_| SettingsError::Invalid {
            key,
            value: v.to_string(),
        })
    })
    .transpose()
}
