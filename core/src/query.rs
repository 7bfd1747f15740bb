//! Pure view-model queries over note snapshots.
//!
//! Nothing here touches the store or mutates its input; callers pass a
//! snapshot from [`NoteRepository::get_all`] and apply the stages in
//! the fixed order search -> filter -> sort.
//!
//! [`NoteRepository::get_all`]: crate::storage::NoteRepository::get_all

use crate::models::Note;
use chrono::{NaiveDate, Utc};

/// Active filter toggles. Each enabled flag intersects the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub pinned: bool,
    pub today: bool,
    /// Not implemented yet; enabling it currently filters nothing.
    pub checklist: bool,
}

/// Case-insensitive substring match on title or body. A blank query
/// returns the snapshot unchanged.
pub fn search(notes: &[Note], query: &str) -> Vec<Note> {
    let query = query.trim();
    if query.is_empty() {
        return notes.to_vec();
    }

    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&needle)
                || note.body.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Apply the active filter flags, using `today` as the reference day.
pub fn filter(notes: &[Note], filters: &NoteFilter, today: NaiveDate) -> Vec<Note> {
    let mut filtered = notes.to_vec();
    if filters.pinned {
        filtered.retain(|note| note.pinned);
    }
    if filters.today {
        filtered.retain(|note| note.date == today);
    }
    // `checklist` passes everything through until checklist notes land
    filtered
}

/// Pinned notes first, then most recent first. Stable: notes with
/// equal pinned state and date keep their input order.
pub fn sort(notes: &[Note]) -> Vec<Note> {
    let mut sorted = notes.to_vec();
    sorted.sort_by(|a, b| b.pinned.cmp(&a.pinned).then(b.date.cmp(&a.date)));
    sorted
}

/// The full pipeline in its contractual order: search, then filter,
/// then sort.
pub fn compose(notes: &[Note], query: &str, filters: &NoteFilter, today: NaiveDate) -> Vec<Note> {
    sort(&filter(&search(notes, query), filters, today))
}

/// [`compose`] against the real current day.
pub fn compose_now(notes: &[Note], query: &str, filters: &NoteFilter) -> Vec<Note> {
    compose(notes, query, filters, Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str, body: &str, date: &str, pinned: bool) -> Note {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let mut note = Note::with_id(id.to_string(), title.to_string(), body.to_string(), date);
        note.pinned = pinned;
        note
    }

    #[test]
    fn test_search_blank_query_is_identity() {
        let notes = vec![
            note("1", "B", "x", "2024-01-01", false),
            note("2", "A", "y", "2024-02-01", false),
        ];

        let result = search(&notes, "");
        assert_eq!(result, notes);

        let result = search(&notes, "   ");
        assert_eq!(result, notes);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let notes = vec![
            note("1", "A", "hello world", "2024-03-10", false),
            note("2", "B", "unrelated", "2024-03-10", false),
        ];

        let result = search(&notes, "WORLD");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn test_search_matches_title_or_body() {
        let notes = vec![
            note("1", "Groceries", "milk", "2024-03-10", false),
            note("2", "Work", "buy groceries later", "2024-03-10", false),
            note("3", "Other", "nothing", "2024-03-10", false),
        ];

        let result = search(&notes, "groceries");
        let ids: Vec<&str> = result.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_filter_pinned() {
        let notes = vec![
            note("1", "A", "x", "2024-01-01", true),
            note("2", "B", "y", "2024-01-02", false),
        ];
        let filters = NoteFilter {
            pinned: true,
            ..NoteFilter::default()
        };

        let result = filter(&notes, &filters, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn test_filter_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let notes = vec![
            note("1", "A", "x", "2024-06-15", false),
            note("2", "B", "y", "2024-06-14", false),
        ];
        let filters = NoteFilter {
            today: true,
            ..NoteFilter::default()
        };

        let result = filter(&notes, &filters, today);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn test_filter_checklist_passes_through() {
        let notes = vec![
            note("1", "A", "x", "2024-01-01", false),
            note("2", "B", "y", "2024-01-02", true),
        ];
        let filters = NoteFilter {
            checklist: true,
            ..NoteFilter::default()
        };

        let result = filter(&notes, &filters, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(result, notes);
    }

    #[test]
    fn test_filters_intersect() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let notes = vec![
            note("1", "A", "x", "2024-06-15", true),
            note("2", "B", "y", "2024-06-15", false),
            note("3", "C", "z", "2024-06-14", true),
        ];
        let filters = NoteFilter {
            pinned: true,
            today: true,
            checklist: false,
        };

        let result = filter(&notes, &filters, today);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn test_sort_pinned_first_regardless_of_date() {
        let notes = vec![
            note("old-pinned", "A", "x", "2024-01-01", true),
            note("new-unpinned", "B", "y", "2024-06-01", false),
        ];

        let result = sort(&notes);
        assert_eq!(result[0].id, "old-pinned");
        assert_eq!(result[1].id, "new-unpinned");
    }

    #[test]
    fn test_sort_recency_within_partition() {
        let notes = vec![
            note("1", "A", "x", "2024-01-01", false),
            note("2", "B", "y", "2024-03-01", false),
            note("3", "C", "z", "2024-02-01", false),
        ];

        let result = sort(&notes);
        let ids: Vec<&str> = result.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let notes = vec![
            note("first", "A", "x", "2024-05-01", false),
            note("second", "B", "y", "2024-05-01", false),
            note("third", "C", "z", "2024-05-01", false),
        ];

        let result = sort(&notes);
        let ids: Vec<&str> = result.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_compose_pipeline() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let notes = vec![
            note("1", "meeting notes", "agenda", "2024-06-10", false),
            note("2", "meeting recap", "notes from standup", "2024-06-12", true),
            note("3", "shopping", "milk", "2024-06-15", false),
        ];

        let result = compose(&notes, "meeting", &NoteFilter::default(), today);
        let ids: Vec<&str> = result.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }
}
