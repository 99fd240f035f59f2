//! In-process store with the same constraints and join shape as the PostgreSQL schema.

use super::NoteStore;
use crate::error::AppError;
use crate::model::{Folder, JoinedRow, NoteFilter, NoteInput, Tag};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone, Debug)]
struct NoteRecord {
    title: String,
    content: Option<String>,
    folder_id: Option<i32>,
}

#[derive(Default)]
struct Tables {
    notes: BTreeMap<i32, NoteRecord>,
    folders: BTreeMap<i32, String>,
    tags: BTreeMap<i32, String>,
    /// (note_id, tag_id)
    notes_tags: BTreeSet<(i32, i32)>,
    next_note: i32,
    next_folder: i32,
    next_tag: i32,
}

impl Tables {
    fn check_folder(&self, folder_id: Option<i32>) -> Result<(), AppError> {
        match folder_id {
            Some(id) if !self.folders.contains_key(&id) => {
                Err(AppError::BadRequest(format!("folder {} does not exist", id)))
            }
            _ => Ok(()),
        }
    }

    fn check_tags(&self, tag_ids: Option<&Vec<i32>>) -> Result<(), AppError> {
        for id in tag_ids.into_iter().flatten() {
            if !self.tags.contains_key(id) {
                return Err(AppError::BadRequest(format!("tag {} does not exist", id)));
            }
        }
        Ok(())
    }

    fn set_tags(&mut self, note_id: i32, tag_ids: &[i32]) {
        self.notes_tags.retain(|(n, _)| *n != note_id);
        self.notes_tags.extend(tag_ids.iter().map(|t| (note_id, *t)));
    }

    fn note_matches(&self, id: i32, note: &NoteRecord, filter: &NoteFilter) -> bool {
        if filter.note_id.is_some_and(|n| n != id) {
            return false;
        }
        if let Some(term) = filter.search_term.as_deref() {
            if !note.title.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        if filter.folder_id.is_some() && note.folder_id != filter.folder_id {
            return false;
        }
        if let Some(tag_id) = filter.tag_id {
            if !self.notes_tags.contains(&(id, tag_id)) {
                return false;
            }
        }
        true
    }
}

fn name_taken(names: &BTreeMap<i32, String>, name: &str, except: Option<i32>) -> bool {
    names.iter().any(|(id, n)| n == name && Some(*id) != except)
}

fn conflict(kind: &str, name: &str) -> AppError {
    AppError::Conflict(format!("{} '{}' already exists", kind, name))
}

/// Notes, folders and tags held in memory. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn note_rows(&self, filter: &NoteFilter) -> Result<Vec<JoinedRow>, AppError> {
        let t = self.read();
        let limit = filter.limit.map(|n| n as usize).unwrap_or(usize::MAX);
        let mut rows = Vec::new();
        for (id, note) in t
            .notes
            .iter()
            .filter(|(id, note)| t.note_matches(**id, note, filter))
            .take(limit)
        {
            let folder_name = note.folder_id.and_then(|f| t.folders.get(&f).cloned());
            let base = JoinedRow {
                note_id: *id,
                title: note.title.clone(),
                content: note.content.clone(),
                folder_id: folder_name.as_ref().and(note.folder_id),
                folder_name,
                tag_id: None,
                tag_name: None,
            };
            let tags: Vec<(i32, &String)> = t
                .notes_tags
                .range((*id, i32::MIN)..=(*id, i32::MAX))
                .filter_map(|(_, tag_id)| t.tags.get(tag_id).map(|name| (*tag_id, name)))
                .collect();
            if tags.is_empty() {
                rows.push(base);
                continue;
            }
            for (tag_id, name) in tags {
                rows.push(JoinedRow {
                    tag_id: Some(tag_id),
                    tag_name: Some(name.clone()),
                    ..base.clone()
                });
            }
        }
        Ok(rows)
    }

    async fn create_note(&self, title: &str, input: &NoteInput) -> Result<i32, AppError> {
        let mut t = self.write();
        t.check_folder(input.folder_id())?;
        t.check_tags(input.tags.as_ref())?;
        t.next_note += 1;
        let id = t.next_note;
        t.notes.insert(
            id,
            NoteRecord {
                title: title.to_string(),
                content: input.content().map(str::to_string),
                folder_id: input.folder_id(),
            },
        );
        if let Some(tags) = &input.tags {
            t.set_tags(id, tags);
        }
        Ok(id)
    }

    async fn update_note(&self, id: i32, title: &str, input: &NoteInput) -> Result<Option<i32>, AppError> {
        let mut t = self.write();
        if !t.notes.contains_key(&id) {
            return Ok(None);
        }
        if let Some(folder_id) = input.folder_id {
            t.check_folder(folder_id)?;
        }
        t.check_tags(input.tags.as_ref())?;
        if let Some(note) = t.notes.get_mut(&id) {
            note.title = title.to_string();
            if let Some(content) = &input.content {
                note.content = content.clone();
            }
            if let Some(folder_id) = input.folder_id {
                note.folder_id = folder_id;
            }
        }
        if let Some(tags) = &input.tags {
            t.set_tags(id, tags);
        }
        Ok(Some(id))
    }

    async fn delete_note(&self, id: i32) -> Result<bool, AppError> {
        let mut t = self.write();
        t.notes_tags.retain(|(n, _)| *n != id);
        Ok(t.notes.remove(&id).is_some())
    }

    async fn list_folders(&self) -> Result<Vec<Folder>, AppError> {
        Ok(self
            .read()
            .folders
            .iter()
            .map(|(id, name)| Folder { id: *id, name: name.clone() })
            .collect())
    }

    async fn get_folder(&self, id: i32) -> Result<Option<Folder>, AppError> {
        Ok(self.read().folders.get(&id).map(|name| Folder { id, name: name.clone() }))
    }

    async fn create_folder(&self, name: &str) -> Result<Folder, AppError> {
        let mut t = self.write();
        if name_taken(&t.folders, name, None) {
            return Err(conflict("folder", name));
        }
        t.next_folder += 1;
        let id = t.next_folder;
        t.folders.insert(id, name.to_string());
        Ok(Folder { id, name: name.to_string() })
    }

    async fn update_folder(&self, id: i32, name: &str) -> Result<Option<Folder>, AppError> {
        let mut t = self.write();
        if !t.folders.contains_key(&id) {
            return Ok(None);
        }
        if name_taken(&t.folders, name, Some(id)) {
            return Err(conflict("folder", name));
        }
        t.folders.insert(id, name.to_string());
        Ok(Some(Folder { id, name: name.to_string() }))
    }

    async fn delete_folder(&self, id: i32) -> Result<bool, AppError> {
        let mut t = self.write();
        let existed = t.folders.remove(&id).is_some();
        if existed {
            for note in t.notes.values_mut() {
                if note.folder_id == Some(id) {
                    note.folder_id = None;
                }
            }
        }
        Ok(existed)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        Ok(self
            .read()
            .tags
            .iter()
            .map(|(id, name)| Tag { id: *id, name: name.clone() })
            .collect())
    }

    async fn get_tag(&self, id: i32) -> Result<Option<Tag>, AppError> {
        Ok(self.read().tags.get(&id).map(|name| Tag { id, name: name.clone() }))
    }

    async fn create_tag(&self, name: &str) -> Result<Tag, AppError> {
        let mut t = self.write();
        if name_taken(&t.tags, name, None) {
            return Err(conflict("tag", name));
        }
        t.next_tag += 1;
        let id = t.next_tag;
        t.tags.insert(id, name.to_string());
        Ok(Tag { id, name: name.to_string() })
    }

    async fn update_tag(&self, id: i32, name: &str) -> Result<Option<Tag>, AppError> {
        let mut t = self.write();
        if !t.tags.contains_key(&id) {
            return Ok(None);
        }
        if name_taken(&t.tags, name, Some(id)) {
            return Err(conflict("tag", name));
        }
        t.tags.insert(id, name.to_string());
        Ok(Some(Tag { id, name: name.to_string() }))
    }

    async fn delete_tag(&self, id: i32) -> Result<bool, AppError> {
        let mut t = self.write();
        t.notes_tags.retain(|(_, tag)| *tag != id);
        Ok(t.tags.remove(&id).is_some())
    }
}
