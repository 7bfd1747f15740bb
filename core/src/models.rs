mod attachment;
mod calendar_day;
mod note;
mod task;

pub use attachment::Attachment;
pub use calendar_day::CalendarDay;
pub use note::{Note, NoteColor, NotePatch};
pub use task::Task;

use chrono::NaiveDate;

/// Day-granularity date format used everywhere a date crosses the
/// persistence or view-model boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date as YYYY-MM-DD
pub fn date_to_key(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a YYYY-MM-DD date key
pub fn key_to_date(key: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_FORMAT)
        .map_err(|_| crate::Error::Validation(format!("Invalid date key: {}", key)))
}
