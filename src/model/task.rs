use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single task rendered as a bar on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    /// First day of the task (inclusive).
    pub start: NaiveDate,
    /// Last day of the task (inclusive).
    pub end: NaiveDate,
    /// Completion from 0 to 100.
    pub progress: u8,
    /// Display color for the task bar (stored as RGBA).
    #[serde(with = "color_serde")]
    pub color: Color32,
    /// Ids of tasks this task depends on. Dangling ids are tolerated and
    /// skipped during edge layout.
    #[serde(default)]
    pub dependencies: Vec<Uuid>,
}

impl Task {
    /// Create a new task with a fresh id and no dependencies.
    pub fn new(title: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start,
            end,
            progress: 0,
            color: Color32::from_rgb(99, 102, 241), // Indigo
            dependencies: Vec::new(),
        }
    }

    /// Inclusive duration in days. An end before the start counts as a
    /// single day rather than a zero or negative span.
    pub fn duration_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }
}

/// Serde helper for `Color32`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rgba = [color.r(), color.g(), color.b(), color.a()];
        rgba.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: [u8; 4] = Deserialize::deserialize(deserializer)?;
        Ok(Color32::from_rgba_premultiplied(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn duration_is_inclusive_of_both_endpoints() {
        let task = Task::new("a", date(2025, 4, 20), date(2025, 4, 22));
        assert_eq!(task.duration_days(), 3);
    }

    #[test]
    fn single_day_task_lasts_one_day() {
        let task = Task::new("a", date(2025, 4, 20), date(2025, 4, 20));
        assert_eq!(task.duration_days(), 1);
    }

    #[test]
    fn end_before_start_clamps_to_one_day() {
        let task = Task::new("a", date(2025, 4, 20), date(2025, 4, 10));
        assert_eq!(task.duration_days(), 1);
    }

    #[test]
    fn task_round_trips_through_json() {
        let mut task = Task::new("Design Phase", date(2025, 4, 23), date(2025, 4, 27));
        task.progress = 70;
        task.color = Color32::from_rgb(34, 197, 94);
        task.dependencies = vec![Uuid::new_v4()];

        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn missing_dependencies_field_defaults_to_empty() {
        let json = format!(
            r#"{{"id":"{}","title":"t","start":"2025-04-20","end":"2025-04-22","progress":0,"color":[99,102,241,255]}}"#,
            Uuid::new_v4()
        );
        let task: Task = serde_json::from_str(&json).unwrap();
        assert!(task.dependencies.is_empty());
    }
}
