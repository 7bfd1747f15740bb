use serde::{Deserialize, Serialize};

/// Attachment metadata. The blob itself lives outside the core; only
/// the descriptor is persisted, in the "files" collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub mime: String,
}

impl Attachment {
    /// Create a new attachment descriptor with a generated UUID
    pub fn new(name: String, mime: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            mime,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image")
    }
}
