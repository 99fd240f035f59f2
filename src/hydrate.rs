//! Groups flat joined rows into notes with their folder and tags.

use crate::model::{JoinedRow, Note};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

struct Accumulator {
    note: Note,
    seen_tags: HashSet<i32>,
}

/// Build one `Note` per distinct `note_id`, in first-seen order.
///
/// Rows for the same note need not be contiguous. The folder comes from the first row of a note
/// that carries one; tags are de-duplicated by id and kept in first-seen order. A row contributes a folder or tag
/// only when both its id and name columns are present.
pub fn hydrate<I>(rows: I) -> Vec<Note>
where
    I: IntoIterator<Item = JoinedRow>,
{
    let mut order: Vec<i32> = Vec::new();
    let mut by_id: HashMap<i32, Accumulator> = HashMap::new();

    for row in rows {
        let tag = row.tag();
        let acc = match by_id.entry(row.note_id) {
            Entry::Occupied(e) => {
                let acc = e.into_mut();
                if acc.note.folder.is_none() {
                    acc.note.folder = row.folder();
                }
                acc
            }
            Entry::Vacant(e) => {
                order.push(row.note_id);
                let folder = row.folder();
                e.insert(Accumulator {
                    note: Note {
                        id: row.note_id,
                        title: row.title,
                        content: row.content,
                        folder,
                        tags: Vec::new(),
                    },
                    seen_tags: HashSet::new(),
                })
            }
        };
        if let Some(tag) = tag {
            if acc.seen_tags.insert(tag.id) {
                acc.note.tags.push(tag);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .map(|acc| acc.note)
        .collect()
}
