use crate::models::{Attachment, Note};
use crate::storage::{KeyValueStore, FILES};
use crate::{Error, Result};
use log::warn;

pub struct AttachmentRepository;

impl AttachmentRepository {
    /// Persist an attachment descriptor
    pub fn create(store: &impl KeyValueStore, name: &str, mime: &str) -> Result<Attachment> {
        let attachment = Attachment::new(name.to_string(), mime.to_string());
        store.write_one(FILES, &attachment.id, &serde_json::to_value(&attachment)?)?;
        Ok(attachment)
    }

    /// Get an attachment by ID
    pub fn get(store: &impl KeyValueStore, id: &str) -> Result<Attachment> {
        match store.read_one(FILES, id)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(Error::NotFound(format!("Attachment not found: {}", id))),
        }
    }

    /// Resolve a note's attachments, in attachment order. Ids that no
    /// longer resolve are skipped rather than failing the whole list.
    pub fn get_all_for(store: &impl KeyValueStore, note: &Note) -> Result<Vec<Attachment>> {
        let mut attachments = Vec::with_capacity(note.attachments.len());
        for id in &note.attachments {
            match store.read_one(FILES, id)? {
                Some(value) => attachments.push(serde_json::from_value(value)?),
                None => warn!("note {} references missing attachment {}", note.id, id),
            }
        }
        Ok(attachments)
    }

    /// Delete an attachment descriptor. No-op if the id is absent.
    pub fn delete(store: &impl KeyValueStore, id: &str) -> Result<()> {
        store.delete_one(FILES, id)?;
        Ok(())
    }
}
