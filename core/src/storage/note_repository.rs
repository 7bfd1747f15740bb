use crate::models::{Note, NoteColor, NotePatch};
use crate::storage::{KeyValueStore, NOTES};
use crate::{Error, Result};
use chrono::NaiveDate;
use log::debug;
use std::collections::HashSet;

pub struct NoteRepository;

impl NoteRepository {
    /// Create a new note dated today. Title and body must be non-blank.
    pub fn create(
        store: &impl KeyValueStore,
        title: &str,
        body: &str,
        color: NoteColor,
    ) -> Result<Note> {
        let title = title.trim();
        let body = body.trim();
        if title.is_empty() || body.is_empty() {
            return Err(Error::Validation(
                "Note needs both a title and a body".to_string(),
            ));
        }

        let note = Note::new(title.to_string(), body.to_string(), color);
        Self::persist(store, &note)?;
        debug!("created note {}", note.id);
        Ok(note)
    }

    /// Create an empty note for an editing session to fill in.
    /// Blank notes are allowed to exist while being edited; the
    /// validated save paths reject them.
    pub fn create_draft(store: &impl KeyValueStore) -> Result<Note> {
        let note = Note::new(String::new(), String::new(), NoteColor::default());
        Self::persist(store, &note)?;
        debug!("created draft note {}", note.id);
        Ok(note)
    }

    /// Get a note by ID
    pub fn get(store: &impl KeyValueStore, id: &str) -> Result<Note> {
        match store.read_one(NOTES, id)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(Error::NotFound(format!("Note not found: {}", id))),
        }
    }

    /// Get all notes as a snapshot, in stored order
    pub fn get_all(store: &impl KeyValueStore) -> Result<Vec<Note>> {
        store
            .read_all(NOTES)?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(Into::into))
            .collect()
    }

    /// Shallow-merge a patch into a note: only the fields the patch
    /// provides change, and the record keeps its position.
    pub fn update(store: &impl KeyValueStore, id: &str, patch: NotePatch) -> Result<Note> {
        let mut note = Self::get(store, id)?;
        note.apply(patch);
        Self::persist(store, &note)?;
        debug!("updated note {}", id);
        Ok(note)
    }

    /// Delete a note. Deleting an absent id is a no-op.
    pub fn delete(store: &impl KeyValueStore, id: &str) -> Result<()> {
        if store.delete_one(NOTES, id)? {
            debug!("deleted note {}", id);
        }
        Ok(())
    }

    /// Flip a note's pinned flag. No-op if the id is absent.
    pub fn toggle_pin(store: &impl KeyValueStore, id: &str) -> Result<()> {
        let Some(value) = store.read_one(NOTES, id)? else {
            return Ok(());
        };
        let mut note: Note = serde_json::from_value(value)?;
        note.pinned = !note.pinned;
        Self::persist(store, &note)
    }

    /// All notes created on the given day
    pub fn list_by_date(store: &impl KeyValueStore, date: NaiveDate) -> Result<Vec<Note>> {
        let mut notes = Self::get_all(store)?;
        notes.retain(|note| note.date == date);
        Ok(notes)
    }

    /// The distinct set of days that have at least one note
    pub fn dates_with_notes(store: &impl KeyValueStore) -> Result<HashSet<NaiveDate>> {
        Ok(Self::get_all(store)?.into_iter().map(|n| n.date).collect())
    }

    /// Append an attachment id to a note's attachment list
    pub fn attach(store: &impl KeyValueStore, note_id: &str, attachment_id: &str) -> Result<Note> {
        let mut note = Self::get(store, note_id)?;
        note.attachments.push(attachment_id.to_string());
        Self::persist(store, &note)?;
        Ok(note)
    }

    fn persist(store: &impl KeyValueStore, note: &Note) -> Result<()> {
        store.write_one(NOTES, &note.id, &serde_json::to_value(note)?)
    }
}
