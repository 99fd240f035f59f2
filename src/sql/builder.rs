//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the notes, folders, tags and notes_tags tables.

use super::params::SqlParam;
use crate::model::{NoteFilter, NoteInput};

pub const NOTES: &str = "notes";
pub const FOLDERS: &str = "folders";
pub const TAGS: &str = "tags";
pub const NOTES_TAGS: &str = "notes_tags";

/// Quote identifier for PostgreSQL (identifiers here are constants, never request input).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// `alias.column`, both quoted.
fn col(alias: &str, column: &str) -> String {
    format!("{}.{}", quoted(alias), quoted(column))
}

/// Escape LIKE metacharacters so a search term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    /// Push a param and return its `$n` placeholder.
    fn push_param(&mut self, v: impl Into<SqlParam>) -> String {
        self.params.push(v.into());
        format!("${}", self.params.len())
    }
}

/// Folders and tags share the same `(id, name)` shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamedTable {
    Folders,
    Tags,
}

impl NamedTable {
    pub fn table(self) -> &'static str {
        match self {
            NamedTable::Folders => FOLDERS,
            NamedTable::Tags => TAGS,
        }
    }
}

/// The hydration query: one row per (note, tag), notes and tags left-joined so every note appears.
///
/// Filters and the limit are applied to a note-id subquery, so the limit counts notes
/// and a note's tag rows are never cut off. Rows are ordered by note id, then tag id.
pub fn select_note_rows(filter: &NoteFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();

    if let Some(id) = filter.note_id {
        let ph = q.push_param(id);
        where_parts.push(format!("{} = {}", quoted("id"), ph));
    }
    if let Some(term) = filter.search_term.as_deref() {
        let ph = q.push_param(format!("%{}%", escape_like(term)).as_str());
        where_parts.push(format!("{} ILIKE {}", quoted("title"), ph));
    }
    if let Some(folder_id) = filter.folder_id {
        let ph = q.push_param(folder_id);
        where_parts.push(format!("{} = {}", quoted("folder_id"), ph));
    }
    if let Some(tag_id) = filter.tag_id {
        let ph = q.push_param(tag_id);
        where_parts.push(format!(
            "{} IN (SELECT {} FROM {} WHERE {} = {})",
            quoted("id"),
            quoted("note_id"),
            quoted(NOTES_TAGS),
            quoted("tag_id"),
            ph
        ));
    }

    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let limit_clause = filter.limit.map(|n| format!(" LIMIT {}", n)).unwrap_or_default();
    let note_ids = format!(
        "SELECT {id} FROM {notes}{w} ORDER BY {id}{l}",
        id = quoted("id"),
        notes = quoted(NOTES),
        w = where_clause,
        l = limit_clause
    );

    q.sql = format!(
        "SELECT {} AS note_id, {} AS title, {} AS content, {} AS folder_id, {} AS folder_name, {} AS tag_id, {} AS tag_name \
         FROM {} n \
         LEFT JOIN {} f ON {} = {} \
         LEFT JOIN {} nt ON {} = {} \
         LEFT JOIN {} t ON {} = {} \
         WHERE {} IN ({}) \
         ORDER BY {}, {}",
        col("n", "id"),
        col("n", "title"),
        col("n", "content"),
        col("f", "id"),
        col("f", "name"),
        col("t", "id"),
        col("t", "name"),
        quoted(NOTES),
        quoted(FOLDERS),
        col("n", "folder_id"),
        col("f", "id"),
        quoted(NOTES_TAGS),
        col("n", "id"),
        col("nt", "note_id"),
        quoted(TAGS),
        col("t", "id"),
        col("nt", "tag_id"),
        col("n", "id"),
        note_ids,
        col("n", "id"),
        col("t", "id"),
    );
    q
}

/// INSERT a note, returning its id. `title` must already be validated.
pub fn insert_note(title: &str, input: &NoteInput) -> QueryBuf {
    let mut q = QueryBuf::new();
    let title_ph = q.push_param(title);
    let content_ph = q.push_param(input.content());
    let folder_ph = q.push_param(input.folder_id());
    q.sql = format!(
        "INSERT INTO {} ({}, {}, {}) VALUES ({}, {}, {}) RETURNING {}",
        quoted(NOTES),
        quoted("title"),
        quoted("content"),
        quoted("folder_id"),
        title_ph,
        content_ph,
        folder_ph,
        quoted("id")
    );
    q
}

/// UPDATE a note by id: title always, content and folder_id only when present in the input.
pub fn update_note(id: i32, title: &str, input: &NoteInput) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = vec![format!("{} = {}", quoted("title"), q.push_param(title))];
    if let Some(content) = &input.content {
        sets.push(format!("{} = {}", quoted("content"), q.push_param(content.as_deref())));
    }
    if let Some(folder_id) = input.folder_id {
        sets.push(format!("{} = {}", quoted("folder_id"), q.push_param(folder_id)));
    }
    let id_ph = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quoted(NOTES),
        sets.join(", "),
        quoted("id"),
        id_ph,
        quoted("id")
    );
    q
}

/// Link a note to tags. Empty `tag_ids` yields an empty statement; callers skip it.
pub fn insert_note_tags(note_id: i32, tag_ids: &[i32]) -> QueryBuf {
    let mut q = QueryBuf::new();
    if tag_ids.is_empty() {
        return q;
    }
    let note_ph = q.push_param(note_id);
    let values: Vec<String> = tag_ids
        .iter()
        .map(|t| format!("({}, {})", note_ph, q.push_param(*t)))
        .collect();
    q.sql = format!(
        "INSERT INTO {} ({}, {}) VALUES {} ON CONFLICT DO NOTHING",
        quoted(NOTES_TAGS),
        quoted("note_id"),
        quoted("tag_id"),
        values.join(", ")
    );
    q
}

pub fn delete_note_tags(note_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(note_id);
    q.sql = format!("DELETE FROM {} WHERE {} = {}", quoted(NOTES_TAGS), quoted("note_id"), ph);
    q
}

/// DELETE by id from any of the id-keyed tables.
pub fn delete_by_id(table: &str, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(id);
    q.sql = format!("DELETE FROM {} WHERE {} = {}", quoted(table), quoted("id"), ph);
    q
}

/// SELECT all folders or tags, ordered by id.
pub fn select_named(table: NamedTable) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {}, {} FROM {} ORDER BY {}",
        quoted("id"),
        quoted("name"),
        quoted(table.table()),
        quoted("id")
    );
    q
}

pub fn select_named_by_id(table: NamedTable, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(id);
    q.sql = format!(
        "SELECT {}, {} FROM {} WHERE {} = {}",
        quoted("id"),
        quoted("name"),
        quoted(table.table()),
        quoted("id"),
        ph
    );
    q
}

pub fn insert_named(table: NamedTable, name: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(name);
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}, {}",
        quoted(table.table()),
        quoted("name"),
        ph,
        quoted("id"),
        quoted("name")
    );
    q
}

pub fn update_named(table: NamedTable, id: i32, name: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let name_ph = q.push_param(name);
    let id_ph = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} = {} WHERE {} = {} RETURNING {}, {}",
        quoted(table.table()),
        quoted("name"),
        name_ph,
        quoted("id"),
        id_ph,
        quoted("id"),
        quoted("name")
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_note_rows_limit_the_id_subquery() {
        let q = select_note_rows(&NoteFilter {
            limit: Some(10),
            ..Default::default()
        });
        assert!(q.params.is_empty());
        assert!(q.sql.contains("LEFT JOIN \"folders\" f"));
        assert!(q.sql.contains("LEFT JOIN \"notes_tags\" nt"));
        assert!(q.sql.contains("LEFT JOIN \"tags\" t"));
        assert!(q.sql.contains("IN (SELECT \"id\" FROM \"notes\" ORDER BY \"id\" LIMIT 10)"));
        assert!(q.sql.ends_with("ORDER BY \"n\".\"id\", \"t\".\"id\""));
    }

    #[test]
    fn filters_are_bound_in_order() {
        let q = select_note_rows(&NoteFilter {
            note_id: None,
            search_term: Some("50%_off".into()),
            folder_id: Some(100),
            tag_id: Some(3),
            limit: None,
        });
        assert_eq!(
            q.params,
            vec![
                SqlParam::Text("%50\\%\\_off%".into()),
                SqlParam::Int(100),
                SqlParam::Int(3),
            ]
        );
        assert!(q.sql.contains("\"title\" ILIKE $1"));
        assert!(q.sql.contains("\"folder_id\" = $2"));
        assert!(q.sql.contains("\"tag_id\" = $3"));
        assert!(!q.sql.contains("LIMIT"));
    }

    #[test]
    fn update_note_sets_only_present_columns() {
        let input = NoteInput {
            title: Some("t".into()),
            content: None,
            folder_id: Some(None),
            tags: None,
        };
        let q = update_note(7, "t", &input);
        assert_eq!(
            q.sql,
            "UPDATE \"notes\" SET \"title\" = $1, \"folder_id\" = $2 WHERE \"id\" = $3 RETURNING \"id\""
        );
        assert_eq!(q.params, vec![SqlParam::Text("t".into()), SqlParam::NullInt, SqlParam::Int(7)]);
    }

    #[test]
    fn insert_note_tags_reuses_note_placeholder() {
        let q = insert_note_tags(5, &[1, 2]);
        assert!(q.sql.contains("VALUES ($1, $2), ($1, $3)"));
        assert_eq!(q.params, vec![SqlParam::Int(5), SqlParam::Int(1), SqlParam::Int(2)]);
        assert_eq!(insert_note_tags(5, &[]), QueryBuf::default());
    }

    #[test]
    fn named_statements_target_the_right_table() {
        let q = update_named(NamedTable::Tags, 1, "work");
        assert_eq!(
            q.sql,
            "UPDATE \"tags\" SET \"name\" = $1 WHERE \"id\" = $2 RETURNING \"id\", \"name\""
        );
        let q = insert_named(NamedTable::Folders, "Drafts");
        assert!(q.sql.starts_with("INSERT INTO \"folders\""));
    }
}
