pub mod autosave;
pub mod calendar;
pub mod error;
pub mod export;
pub mod models;
pub mod query;
pub mod storage;

pub use error::{Error, Result};
