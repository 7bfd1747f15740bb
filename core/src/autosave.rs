//! Debounced autosave for a single note editing session.
//!
//! The session holds at most one pending edit. Every reported edit
//! replaces the pending one and re-arms the quiet-period deadline, so
//! a burst of keystrokes collapses into a single write once input
//! pauses. This is a debounce, not a throttle: continuous edits defer
//! the write indefinitely.
//!
//! The session is driven from the caller's event loop: report edits
//! with [`AutosaveSession::record_edit`] and call
//! [`AutosaveSession::poll`] on each tick. Time comes in as an
//! argument, which keeps the state machine deterministic under test.

use crate::models::{Note, NotePatch};
use crate::storage::{KeyValueStore, NoteRepository};
use crate::Result;
use log::debug;
use std::time::{Duration, Instant};

/// Quiet period before a pending edit is written out
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(600);

#[derive(Debug, Clone)]
struct PendingEdit {
    title: String,
    body: String,
    deadline: Instant,
}

#[derive(Debug)]
pub struct AutosaveSession {
    note_id: String,
    quiet_period: Duration,
    pending: Option<PendingEdit>,
}

impl AutosaveSession {
    /// Start a session for one note with the default quiet period
    pub fn new(note_id: String) -> Self {
        Self::with_quiet_period(note_id, DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(note_id: String, quiet_period: Duration) -> Self {
        Self {
            note_id,
            quiet_period,
            pending: None,
        }
    }

    pub fn note_id(&self) -> &str {
        &self.note_id
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record the editor's current title and body. Replaces any
    /// pending edit and restarts the quiet period from `now`.
    pub fn record_edit(&mut self, title: &str, body: &str, now: Instant) {
        self.pending = Some(PendingEdit {
            title: title.to_string(),
            body: body.to_string(),
            deadline: now + self.quiet_period,
        });
    }

    /// Flush the pending edit if its quiet period has elapsed by
    /// `now`. Returns the saved note when a write happened, so callers
    /// can refresh dependent views (note list, link preview).
    pub fn poll(&mut self, store: &impl KeyValueStore, now: Instant) -> Result<Option<Note>> {
        match &self.pending {
            Some(edit) if now >= edit.deadline => self.flush(store),
            _ => Ok(None),
        }
    }

    /// Write the pending edit immediately, ignoring the timer.
    ///
    /// The write re-reads the persisted record and overwrites title
    /// and body only; other fields keep whatever is currently stored
    /// (last timer wins, no merge with concurrent external changes).
    pub fn flush(&mut self, store: &impl KeyValueStore) -> Result<Option<Note>> {
        let Some(edit) = self.pending.take() else {
            return Ok(None);
        };

        let patch = NotePatch {
            title: Some(edit.title),
            body: Some(edit.body),
            ..NotePatch::default()
        };
        let note = NoteRepository::update(store, &self.note_id, patch)?;
        debug!("autosaved note {}", self.note_id);
        Ok(Some(note))
    }

    /// Drop the pending edit without writing it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// End the session, flushing any pending edit first so the last
    /// debounce window cannot silently lose input.
    pub fn finish(mut self, store: &impl KeyValueStore) -> Result<Option<Note>> {
        self.flush(store)
    }
}
