//! Domain types: joined query rows, notes, folders, tags, and request payloads.

use serde::{Deserialize, Serialize};

/// One row of the notes ⟕ folders ⟕ notes_tags ⟕ tags query.
/// A note with several tags appears once per tag; missing folder or tag columns are `None`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct JoinedRow {
    pub note_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i32>,
    pub folder_name: Option<String>,
    pub tag_id: Option<i32>,
    pub tag_name: Option<String>,
}

impl JoinedRow {
    /// Folder carried by this row; both columns must be present.
    pub fn folder(&self) -> Option<Folder> {
        match (self.folder_id, &self.folder_name) {
            (Some(id), Some(name)) => Some(Folder { id, name: name.clone() }),
            _ => None,
        }
    }

    /// Tag carried by this row; both columns must be present.
    pub fn tag(&self) -> Option<Tag> {
        match (self.tag_id, &self.tag_name) {
            (Some(id), Some(name)) => Some(Tag { id, name: name.clone() }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Folder {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

/// A note with its folder and de-duplicated tags, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<Folder>,
    pub tags: Vec<Tag>,
}

/// Body of POST/PUT /notes. `title` is checked by the validator, so it is optional here.
///
/// `content` and `folder_id` distinguish "absent" (outer `None`, column left as is on update)
/// from an explicit `null` (`Some(None)`, column cleared).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Option<String>>,
    #[serde(default, alias = "folder_id", deserialize_with = "present")]
    pub folder_id: Option<Option<i32>>,
    /// Tag ids. `None` leaves a note's tags untouched on update.
    #[serde(default)]
    pub tags: Option<Vec<i32>>,
}

impl NoteInput {
    pub fn content(&self) -> Option<&str> {
        self.content.as_ref().and_then(|c| c.as_deref())
    }

    pub fn folder_id(&self) -> Option<i32> {
        self.folder_id.flatten()
    }
}

/// Maps a present field (even `null`) to `Some`, so absence stays `None` via `#[serde(default)]`.
fn present<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

/// Body of POST/PUT /folders and /tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NameInput {
    #[serde(default)]
    pub name: Option<String>,
}

/// Which notes to fetch. All set fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub note_id: Option<i32>,
    pub search_term: Option<String>,
    pub folder_id: Option<i32>,
    pub tag_id: Option<i32>,
    pub limit: Option<u32>,
}

impl NoteFilter {
    pub fn by_id(id: i32) -> Self {
        NoteFilter {
            note_id: Some(id),
            ..Default::default()
        }
    }
}
