//! Month-grid construction for the calendar view.
//!
//! The grid is always 6 weeks of 7 days, starting at the most recent
//! Sunday on or before the 1st of the target month, so a month always
//! renders at the same size no matter where its days fall.

use crate::models::CalendarDay;
use crate::storage::{KeyValueStore, NoteRepository};
use crate::{Error, Result};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use std::collections::HashSet;

/// Rows in the month grid
pub const WEEKS_PER_GRID: usize = 6;
/// Columns in the month grid (Sunday through Saturday)
pub const DAYS_PER_WEEK: usize = 7;

/// The month a calendar view is looking at. Month indices are
/// zero-based (0 = January) and navigation wraps across year
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Create a cursor. The month index must be 0..=11.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if month > 11 {
            return Err(Error::Validation(format!(
                "Month index out of range: {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// Cursor for the real current month
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self {
            year: today.year(),
            month: today.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The previous month, rolling into December of the prior year
    /// from January.
    pub fn prev(self) -> Self {
        if self.month == 0 {
            Self {
                year: self.year - 1,
                month: 11,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The next month, rolling into January of the following year from
    /// December.
    pub fn next(self) -> Self {
        if self.month == 11 {
            Self {
                year: self.year + 1,
                month: 0,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the cursor's month
    pub fn first_day(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).ok_or_else(|| {
            Error::Validation(format!("Invalid month: {}-{}", self.year, self.month))
        })
    }

    /// Header label, e.g. "March 2024"
    pub fn label(&self) -> String {
        match self.first_day() {
            Ok(first) => first.format("%B %Y").to_string(),
            Err(_) => format!("{}-{}", self.year, self.month),
        }
    }
}

pub struct CalendarIndexer;

impl CalendarIndexer {
    /// Build the month grid against the store: `has_notes` comes from
    /// the notes collection and `is_today` from the real current day.
    pub fn build_month(
        store: &impl KeyValueStore,
        cursor: MonthCursor,
    ) -> Result<Vec<Vec<CalendarDay>>> {
        let noted = NoteRepository::dates_with_notes(store)?;
        Self::build_month_with(cursor, Utc::now().date_naive(), &noted)
    }

    /// Build the month grid from explicit inputs. Always returns
    /// exactly [`WEEKS_PER_GRID`] rows of [`DAYS_PER_WEEK`] consecutive
    /// days.
    pub fn build_month_with(
        cursor: MonthCursor,
        today: NaiveDate,
        noted_dates: &HashSet<NaiveDate>,
    ) -> Result<Vec<Vec<CalendarDay>>> {
        let first = cursor.first_day()?;
        // Back up to the Sunday on or before the 1st
        let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);

        let mut grid = Vec::with_capacity(WEEKS_PER_GRID);
        let mut date = start;
        for _ in 0..WEEKS_PER_GRID {
            let mut week = Vec::with_capacity(DAYS_PER_WEEK);
            for _ in 0..DAYS_PER_WEEK {
                week.push(CalendarDay {
                    date,
                    is_current_month: date.year() == cursor.year && date.month0() == cursor.month,
                    is_today: date == today,
                    has_notes: noted_dates.contains(&date),
                });
                date += Duration::days(1);
            }
            grid.push(week);
        }

        Ok(grid)
    }
}
