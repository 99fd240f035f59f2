//! Database bootstrap: create the database if missing and open the pool.

use crate::error::AppError;
use crate::settings::Settings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Connect to the maintenance database and CREATE DATABASE when the target does not exist.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin_url, db_name)) = parse_db_name_from_url(database_url)? else {
        tracing::debug!("DATABASE_URL names no database, skipping create");
        return Ok(());
    };
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

pub async fn connect(database_url: &str, settings: &Settings) -> Result<PgPool, AppError> {
    ensure_database_exists(database_url).await?;
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Split a connection URL into (maintenance URL, database name). The path only starts after the
/// authority, so `postgres://host:5432` has no database name and yields `None`.
fn parse_db_name_from_url(url: &str) -> Result<Option<(String, String)>, AppError> {
    let authority_start = url
        .find("://")
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: missing scheme".into()))?
        + 3;
    let rest = &url[authority_start..];
    let path_start = match rest.find(['/', '?']) {
        Some(i) if rest[i..].starts_with('/') => authority_start + i + 1,
        _ => return Ok(None),
    };
    let (db_name, query) = match url[path_start..].split_once('?') {
        Some((name, query)) => (name, Some(query)),
        None => (&url[path_start..], None),
    };
    let mut admin_url = format!("{}postgres", &url[..path_start]);
    if let Some(query) = query {
        admin_url.push('?');
        admin_url.push_str(query);
    }
    Ok(Some((admin_url, db_name.trim().to_string())))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
