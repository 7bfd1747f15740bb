mod attachment_repository;
mod database;
mod note_repository;
mod store;
mod task_repository;

pub use attachment_repository::AttachmentRepository;
pub use database::Database;
pub use note_repository::NoteRepository;
pub use store::{KeyValueStore, SqliteStore, FILES, NOTES, TASKS};
pub use task_repository::TaskRepository;
