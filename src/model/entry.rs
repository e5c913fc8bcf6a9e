use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One tracked stretch of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub started: DateTime<Local>,
    pub stopped: Option<DateTime<Local>>,
    /// Tracked time in milliseconds, refreshed by [`TimeSheet::tick`] while
    /// the entry runs.
    pub duration_ms: i64,
    pub running: bool,
}

/// All time entries plus the rules for the single live timer.
///
/// At most one entry runs at a time; starting or resuming an entry pauses
/// any other running one. The running entry's duration is derived from the
/// wall clock on every tick, so the caller only needs to keep ticking while
/// something runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSheet {
    pub entries: Vec<TimeEntry>,
}

impl TimeSheet {
    /// Start a fresh timer and make it the running entry.
    pub fn start(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        now: DateTime<Local>,
    ) -> Uuid {
        self.pause_all();
        let entry = TimeEntry {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            started: now,
            stopped: None,
            duration_ms: 0,
            running: true,
        };
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Record a finished stretch of `hours` and `minutes` ending now.
    /// Returns `None` when the requested duration is zero.
    pub fn add_manual(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        hours: i64,
        minutes: i64,
        now: DateTime<Local>,
    ) -> Option<Uuid> {
        let duration_ms = (hours * 60 + minutes) * 60 * 1000;
        if duration_ms <= 0 {
            return None;
        }
        let entry = TimeEntry {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            started: now - chrono::Duration::milliseconds(duration_ms),
            stopped: Some(now),
            duration_ms,
            running: false,
        };
        let id = entry.id;
        self.entries.push(entry);
        Some(id)
    }

    /// Pause whatever entry is running, keeping its tracked time.
    pub fn pause_all(&mut self) {
        for entry in &mut self.entries {
            entry.running = false;
        }
    }

    /// Resume a paused, unstopped entry. Any other running entry is paused.
    pub fn resume(&mut self, id: Uuid) {
        if !self
            .entries
            .iter()
            .any(|e| e.id == id && e.stopped.is_none())
        {
            return;
        }
        self.pause_all();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.running = true;
        }
    }

    /// Finish an entry for good.
    pub fn stop(&mut self, id: Uuid, now: DateTime<Local>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.running = false;
            entry.stopped = Some(now);
        }
    }

    pub fn delete(&mut self, id: Uuid) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn rename(&mut self, id: Uuid, title: impl Into<String>, description: impl Into<String>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.title = title.into();
            entry.description = description.into();
        }
    }

    pub fn running_entry(&self) -> Option<&TimeEntry> {
        self.entries.iter().find(|e| e.running)
    }

    /// Refresh the running entry's duration from the clock. A no-op when
    /// nothing runs.
    pub fn tick(&mut self, now: DateTime<Local>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.running) {
            entry.duration_ms = (now - entry.started).num_milliseconds().max(0);
        }
    }

    pub fn total_ms(&self) -> i64 {
        self.entries.iter().map(|e| e.duration_ms).sum()
    }
}

/// Format milliseconds as `hh:mm:ss`, with hours allowed past 99.
pub fn format_hms(ms: i64) -> String {
    let total_seconds = (ms / 1000).max(0);
    let seconds = total_seconds % 60;
    let minutes = (total_seconds / 60) % 60;
    let hours = total_seconds / 3600;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 4, 21, h, m, s).unwrap()
    }

    #[test]
    fn start_creates_a_single_running_entry() {
        let mut sheet = TimeSheet::default();
        sheet.start("Refactor", "", at(9, 0, 0));
        sheet.start("Review", "", at(9, 30, 0));
        let running: Vec<_> = sheet.entries.iter().filter(|e| e.running).collect();
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].title, "Review");
    }

    #[test]
    fn tick_tracks_elapsed_wall_clock_time() {
        let mut sheet = TimeSheet::default();
        sheet.start("Refactor", "", at(9, 0, 0));
        sheet.tick(at(9, 0, 42));
        assert_eq!(sheet.entries[0].duration_ms, 42_000);
        sheet.tick(at(10, 30, 0));
        assert_eq!(sheet.entries[0].duration_ms, 5_400_000);
    }

    #[test]
    fn pause_freezes_duration_and_tick_ignores_paused_entries() {
        let mut sheet = TimeSheet::default();
        sheet.start("Refactor", "", at(9, 0, 0));
        sheet.tick(at(9, 10, 0));
        sheet.pause_all();
        sheet.tick(at(11, 0, 0));
        assert_eq!(sheet.entries[0].duration_ms, 600_000);
        assert!(sheet.running_entry().is_none());
    }

    #[test]
    fn stopped_entries_cannot_be_resumed() {
        let mut sheet = TimeSheet::default();
        let id = sheet.start("Refactor", "", at(9, 0, 0));
        sheet.stop(id, at(9, 30, 0));
        sheet.resume(id);
        assert!(sheet.running_entry().is_none());
        assert_eq!(sheet.entries[0].stopped, Some(at(9, 30, 0)));
    }

    #[test]
    fn resume_pauses_the_previous_runner() {
        let mut sheet = TimeSheet::default();
        let first = sheet.start("First", "", at(9, 0, 0));
        sheet.pause_all();
        let _second = sheet.start("Second", "", at(10, 0, 0));
        sheet.resume(first);
        assert_eq!(sheet.running_entry().map(|e| e.id), Some(first));
    }

    #[test]
    fn manual_entry_spans_backwards_from_now() {
        let mut sheet = TimeSheet::default();
        let id = sheet.add_manual("Meeting", "", 1, 30, at(14, 0, 0)).unwrap();
        let entry = sheet.entries.iter().find(|e| e.id == id).unwrap();
        assert_eq!(entry.duration_ms, 5_400_000);
        assert_eq!(entry.started, at(12, 30, 0));
        assert_eq!(entry.stopped, Some(at(14, 0, 0)));
        assert!(!entry.running);
    }

    #[test]
    fn manual_entry_of_zero_minutes_is_rejected() {
        let mut sheet = TimeSheet::default();
        assert!(sheet.add_manual("Nothing", "", 0, 0, at(14, 0, 0)).is_none());
        assert!(sheet.entries.is_empty());
    }

    #[test]
    fn total_sums_every_entry() {
        let mut sheet = TimeSheet::default();
        let _ = sheet.add_manual("a", "", 0, 10, at(12, 0, 0));
        let _ = sheet.add_manual("b", "", 0, 5, at(13, 0, 0));
        assert_eq!(sheet.total_ms(), 900_000);
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(61_000), "00:01:01");
        assert_eq!(format_hms(5_400_000), "01:30:00");
        assert_eq!(format_hms(-5), "00:00:00");
    }
}
