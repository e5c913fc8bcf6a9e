use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A short note pinned to a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarNote {
    pub id: Uuid,
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
}

impl CalendarNote {
    pub fn new(date: NaiveDate, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            title: title.into(),
            description: description.into(),
            tag: None,
        }
    }
}

/// All calendar notes, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteBook {
    pub notes: Vec<CalendarNote>,
}

impl NoteBook {
    pub fn add(&mut self, note: CalendarNote) {
        self.notes.push(note);
    }

    /// Replace the note with the same id; a note that no longer exists is
    /// ignored.
    pub fn update(&mut self, note: CalendarNote) {
        if let Some(existing) = self.notes.iter_mut().find(|n| n.id == note.id) {
            *existing = note;
        }
    }

    pub fn delete(&mut self, id: Uuid) {
        self.notes.retain(|n| n.id != id);
    }

    pub fn notes_on(&self, date: NaiveDate) -> Vec<&CalendarNote> {
        self.notes.iter().filter(|n| n.date == date).collect()
    }

    /// Days that carry at least one note, for marking the calendar.
    pub fn dates_with_notes(&self) -> BTreeSet<NaiveDate> {
        self.notes.iter().map(|n| n.date).collect()
    }

    /// The most recent notes by date, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&CalendarNote> {
        let mut sorted: Vec<&CalendarNote> = self.notes.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.truncate(limit);
        sorted
    }

    pub fn with_tag(&self, tag: &str) -> Vec<&CalendarNote> {
        self.notes
            .iter()
            .filter(|n| n.tag.as_deref() == Some(tag))
            .collect()
    }

    /// Distinct tags in use, sorted.
    pub fn tags(&self) -> Vec<String> {
        let set: BTreeSet<String> = self.notes.iter().filter_map(|n| n.tag.clone()).collect();
        set.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn book() -> NoteBook {
        let mut book = NoteBook::default();
        let mut standup = CalendarNote::new(date(2025, 4, 21), "Standup", "daily sync");
        standup.tag = Some("work".to_string());
        book.add(standup);
        book.add(CalendarNote::new(date(2025, 4, 21), "Dentist", ""));
        let mut review = CalendarNote::new(date(2025, 4, 25), "Review", "sprint review");
        review.tag = Some("work".to_string());
        book.add(review);
        book
    }

    #[test]
    fn notes_on_filters_by_exact_date() {
        let book = book();
        assert_eq!(book.notes_on(date(2025, 4, 21)).len(), 2);
        assert_eq!(book.notes_on(date(2025, 4, 22)).len(), 0);
    }

    #[test]
    fn delete_removes_only_the_matching_note() {
        let mut book = book();
        let id = book.notes[0].id;
        book.delete(id);
        assert_eq!(book.notes.len(), 2);
        assert!(book.notes.iter().all(|n| n.id != id));
    }

    #[test]
    fn update_replaces_in_place_and_ignores_unknown_ids() {
        let mut book = book();
        let mut edited = book.notes[1].clone();
        edited.title = "Dentist (moved)".to_string();
        edited.date = date(2025, 4, 28);
        book.update(edited.clone());
        assert_eq!(book.notes[1], edited);

        let ghost = CalendarNote::new(date(2025, 1, 1), "ghost", "");
        book.update(ghost);
        assert_eq!(book.notes.len(), 3);
    }

    #[test]
    fn recent_sorts_newest_first_and_truncates() {
        let book = book();
        let recent = book.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, date(2025, 4, 25));
    }

    #[test]
    fn tags_are_distinct_and_filterable() {
        let book = book();
        assert_eq!(book.tags(), vec!["work".to_string()]);
        assert_eq!(book.with_tag("work").len(), 2);
        assert!(book.with_tag("home").is_empty());
    }

    #[test]
    fn dates_with_notes_deduplicates() {
        let book = book();
        let dates = book.dates_with_notes();
        assert_eq!(dates.len(), 2);
        assert!(dates.contains(&date(2025, 4, 21)));
    }
}
