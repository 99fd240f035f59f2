//! Noteful server: reads settings from the environment, picks the PostgreSQL or in-memory store,
//! and serves the API.
//!
//! Run from repo root: `cargo run -p noteful-server`

use noteful::{app, connect, AppState, MemoryStore, NoteStore, PgStore, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("noteful=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store: Arc<dyn NoteStore> = match settings.database_url.as_deref() {
        Some(url) => {
            let pool = connect(url, &settings).await?;
            tracing::info!(max_connections = settings.max_connections, "connected to PostgreSQL");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    let state = AppState::new(store, settings);
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
