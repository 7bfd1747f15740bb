use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Card color, one of the fixed editor palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    #[default]
    White,
    Yellow,
    Green,
    Blue,
    Pink,
    Purple,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub color: NoteColor,
    #[serde(default)]
    pub pinned: bool,
    /// Creation day. Never changes after creation.
    pub date: NaiveDate,
    /// Ordered attachment ids, in the order they were attached.
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl Note {
    /// Create a new note with a generated UUID, dated today
    pub fn new(title: String, body: String, color: NoteColor) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            body,
            color,
            pinned: false,
            date: Utc::now().date_naive(),
            attachments: Vec::new(),
        }
    }

    /// Create a note with a specific ID and date (for testing or import)
    pub fn with_id(id: String, title: String, body: String, date: NaiveDate) -> Self {
        Self {
            id,
            title,
            body,
            color: NoteColor::default(),
            pinned: false,
            date,
            attachments: Vec::new(),
        }
    }

    /// Format the creation date as YYYY-MM-DD
    pub fn date_key(&self) -> String {
        super::date_to_key(&self.date)
    }

    /// Shallow-merge a patch: only fields the patch provides change.
    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(pinned) = patch.pinned {
            self.pinned = pinned;
        }
    }
}

/// Partial update to a note. `id` and `date` are not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotePatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub color: Option<NoteColor>,
    pub pinned: Option<bool>,
}
