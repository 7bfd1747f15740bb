use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One cell of the 6x7 month grid. Derived on every build, never
/// persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub has_notes: bool,
}

impl CalendarDay {
    /// Day-of-month number shown in the cell
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Format the cell's date as YYYY-MM-DD
    pub fn date_key(&self) -> String {
        super::date_to_key(&self.date)
    }
}
