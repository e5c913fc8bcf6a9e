use std::collections::HashMap;

use uuid::Uuid;

use crate::model::{DateRangeWindow, Task};

use super::{COLUMN_WIDTH, ROW_HEIGHT};

/// A dependency arrow between two laid-out task bars: from the end of the
/// dependency's bar to the start of the dependent's bar. Day offsets are
/// relative to the window anchor; rows are positional list indices, exactly
/// matching [`super::TaskBarGeometry::row`], so edges must be recomputed
/// whenever the task list changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyEdge {
    /// The task depended upon (arrow tail).
    pub from: Uuid,
    /// The dependent task (arrow head).
    pub to: Uuid,
    /// Day offset one past the dependency's end.
    pub from_day: i64,
    /// Day offset of the dependent's start.
    pub to_day: i64,
    pub from_row: usize,
    pub to_row: usize,
}

impl DependencyEdge {
    pub fn start(&self) -> (f32, f32) {
        (self.from_day as f32 * COLUMN_WIDTH, row_center(self.from_row))
    }

    pub fn end(&self) -> (f32, f32) {
        (self.to_day as f32 * COLUMN_WIDTH, row_center(self.to_row))
    }
}

fn row_center(row: usize) -> f32 {
    row as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0
}

/// Compute every drawable dependency arrow.
///
/// Dangling dependency ids resolve to nothing and are dropped silently; the
/// referenced task may have been deleted. Unlike bar clipping, edges are
/// clipped strictly: both endpoints must lie inside the window or the arrow
/// is not drawn at all.
pub fn layout_edges(tasks: &[Task], window: &DateRangeWindow) -> Vec<DependencyEdge> {
    let window_days = window.days();
    let rows: HashMap<Uuid, usize> = tasks
        .iter()
        .enumerate()
        .map(|(row, task)| (task.id, row))
        .collect();

    let mut edges = Vec::new();
    for (to_row, task) in tasks.iter().enumerate() {
        let to_day = (task.start - window.anchor).num_days();
        for dep_id in &task.dependencies {
            let Some(&from_row) = rows.get(dep_id) else {
                continue;
            };
            let from_day = (tasks[from_row].end - window.anchor).num_days() + 1;

            if from_day < 0 || from_day > window_days || to_day < 0 || to_day > window_days {
                continue;
            }

            edges.push(DependencyEdge {
                from: *dep_id,
                to: task.id,
                from_day,
                to_day,
                from_row,
                to_row,
            });
        }
    }
    edges
}
