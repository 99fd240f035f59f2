//! PostgreSQL store over a sqlx pool.

use super::NoteStore;
use crate::error::AppError;
use crate::model::{Folder, JoinedRow, NoteFilter, NoteInput, Tag};
use crate::sql::{
    bind_query, bind_query_as, delete_by_id, delete_note_tags, insert_named, insert_note, insert_note_tags,
    select_named, select_named_by_id, select_note_rows, update_named, update_note, NamedTable, QueryBuf, FOLDERS,
    NOTES, TAGS,
};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn fetch_all<O>(&self, q: &QueryBuf) -> Result<Vec<O>, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_query_as(sqlx::query_as::<_, O>(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_optional<O>(&self, q: &QueryBuf) -> Result<Option<O>, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_query_as(sqlx::query_as::<_, O>(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let done = bind_query(sqlx::query(&q.sql), &q.params).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }

    async fn returning_id_tx(conn: &mut PgConnection, q: &QueryBuf) -> Result<Option<i32>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query (tx)");
        let row: Option<(i32,)> = bind_query_as(sqlx::query_as(&q.sql), &q.params)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.map(|r| r.0))
    }

    async fn execute_tx(conn: &mut PgConnection, q: &QueryBuf) -> Result<(), AppError> {
        if q.sql.is_empty() {
            return Ok(());
        }
        tracing::debug!(sql = %q.sql, params = ?q.params, "query (tx)");
        bind_query(sqlx::query(&q.sql), &q.params).execute(&mut *conn).await?;
        Ok(())
    }

    async fn create_named<O>(&self, table: NamedTable, name: &str) -> Result<O, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        self.fetch_optional(&insert_named(table, name))
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn note_rows(&self, filter: &NoteFilter) -> Result<Vec<JoinedRow>, AppError> {
        self.fetch_all(&select_note_rows(filter)).await
    }

    async fn create_note(&self, title: &str, input: &NoteInput) -> Result<i32, AppError> {
        let mut tx = self.pool.begin().await?;
        let id = Self::returning_id_tx(&mut tx, &insert_note(title, input))
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        if let Some(tags) = &input.tags {
            Self::execute_tx(&mut tx, &insert_note_tags(id, tags)).await?;
        }
        tx.commit().await?;
        Ok(id)
    }

    async fn update_note(&self, id: i32, title: &str, input: &NoteInput) -> Result<Option<i32>, AppError> {
        let mut tx = self.pool.begin().await?;
        let Some(id) = Self::returning_id_tx(&mut tx, &update_note(id, title, input)).await? else {
            return Ok(None);
        };
        if let Some(tags) = &input.tags {
            Self::execute_tx(&mut tx, &delete_note_tags(id)).await?;
            Self::execute_tx(&mut tx, &insert_note_tags(id, tags)).await?;
        }
        tx.commit().await?;
        Ok(Some(id))
    }

    async fn delete_note(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.execute(&delete_by_id(NOTES, id)).await? > 0)
    }

    async fn list_folders(&self) -> Result<Vec<Folder>, AppError> {
        self.fetch_all(&select_named(NamedTable::Folders)).await
    }

    async fn get_folder(&self, id: i32) -> Result<Option<Folder>, AppError> {
        self.fetch_optional(&select_named_by_id(NamedTable::Folders, id)).await
    }

    async fn create_folder(&self, name: &str) -> Result<Folder, AppError> {
        self.create_named(NamedTable::Folders, name).await
    }

    async fn update_folder(&self, id: i32, name: &str) -> Result<Option<Folder>, AppError> {
        self.fetch_optional(&update_named(NamedTable::Folders, id, name)).await
    }

    async fn delete_folder(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.execute(&delete_by_id(FOLDERS, id)).await? > 0)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        self.fetch_all(&select_named(NamedTable::Tags)).await
    }

    async fn get_tag(&self, id: i32) -> Result<Option<Tag>, AppError> {
        self.fetch_optional(&select_named_by_id(NamedTable::Tags, id)).await
    }

    async fn create_tag(&self, name: &str) -> Result<Tag, AppError> {
        self.create_named(NamedTable::Tags, name).await
    }

    async fn update_tag(&self, id: i32, name: &str) -> Result<Option<Tag>, AppError> {
        self.fetch_optional(&update_named(NamedTable::Tags, id, name)).await
    }

    async fn delete_tag(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.execute(&delete_by_id(TAGS, id)).await? > 0)
    }
}
