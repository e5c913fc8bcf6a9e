use crate::model::{DateRangeWindow, Task};

use super::{BAR_INSET, COLUMN_WIDTH, ROW_HEIGHT};

/// Horizontal placement of one task bar inside the visible window, in day
/// units, plus the row it renders on. Rows are positional: `row` is the
/// task's index in the hosting list, so reordering the list moves the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskBarGeometry {
    /// Index of the originating task in the input slice.
    pub row: usize,
    /// Days from the window anchor to the task start; negative when the
    /// task starts before the window.
    pub start_offset: i64,
    /// First visible day of the bar, clipped to the window (≥ 0).
    pub visible_start: i64,
    /// Visible length in days, clipped to the window edge (≥ 0).
    pub visible_span: i64,
}

impl TaskBarGeometry {
    /// Left pixel edge of the visible bar.
    pub fn x(&self) -> f32 {
        self.visible_start as f32 * COLUMN_WIDTH
    }

    /// Pixel width of the visible bar.
    pub fn width(&self) -> f32 {
        self.visible_span as f32 * COLUMN_WIDTH
    }

    /// Top pixel edge of the bar within its row.
    pub fn y(&self) -> f32 {
        self.row as f32 * ROW_HEIGHT + BAR_INSET
    }

    /// Pixel height of the bar.
    pub fn height(&self) -> f32 {
        ROW_HEIGHT - BAR_INSET * 2.0
    }
}

/// Place every task that intersects the window. Tasks entirely outside the
/// window emit nothing; tasks straddling an edge are clipped to the part
/// inside. An end date before the start counts as a one-day task.
pub fn layout_bars(tasks: &[Task], window: &DateRangeWindow) -> Vec<TaskBarGeometry> {
    let window_days = window.days();
    let mut bars = Vec::with_capacity(tasks.len());

    for (row, task) in tasks.iter().enumerate() {
        let start_offset = (task.start - window.anchor).num_days();
        let raw_duration = task.duration_days();

        // No intersection with the visible day range at all.
        if start_offset + raw_duration < 0 || start_offset > window_days {
            continue;
        }

        let visible_start = start_offset.max(0);
        let visible_span =
            (raw_duration - (-start_offset).max(0)).min(window_days - visible_start);

        bars.push(TaskBarGeometry {
            row,
            start_offset,
            visible_start,
            visible_span,
        });
    }

    bars
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window() -> DateRangeWindow {
        DateRangeWindow::new(date(2025, 4, 20), 2)
    }

    fn task(start: NaiveDate, end: NaiveDate) -> Task {
        Task::new("t", start, end)
    }

    #[test]
    fn tasks_fully_inside_keep_their_raw_placement() {
        let tasks = vec![
            task(date(2025, 4, 20), date(2025, 4, 22)),
            task(date(2025, 4, 23), date(2025, 4, 27)),
        ];
        let bars = layout_bars(&tasks, &window());
        assert_eq!(bars.len(), 2);

        assert_eq!(bars[0].row, 0);
        assert_eq!(bars[0].visible_start, 0);
        assert_eq!(bars[0].visible_span, 3);
        assert_eq!(bars[0].visible_start, bars[0].start_offset);

        assert_eq!(bars[1].row, 1);
        assert_eq!(bars[1].visible_start, 3);
        assert_eq!(bars[1].visible_span, 5);
    }

    #[test]
    fn task_entirely_before_the_window_emits_nothing() {
        let tasks = vec![task(date(2025, 3, 1), date(2025, 3, 5))];
        assert!(layout_bars(&tasks, &window()).is_empty());
    }

    #[test]
    fn task_entirely_after_the_window_emits_nothing() {
        let tasks = vec![task(date(2025, 6, 1), date(2025, 6, 5))];
        assert!(layout_bars(&tasks, &window()).is_empty());
    }

    #[test]
    fn task_straddling_the_left_edge_is_clipped_to_the_window() {
        let tasks = vec![task(date(2025, 4, 17), date(2025, 4, 22))];
        let bars = layout_bars(&tasks, &window());
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].start_offset, -3);
        assert_eq!(bars[0].visible_start, 0);
        // Six raw days, three of them cut off on the left.
        assert_eq!(bars[0].visible_span, 3);
    }

    #[test]
    fn task_straddling_the_right_edge_is_clipped_to_the_window() {
        let tasks = vec![task(date(2025, 5, 1), date(2025, 5, 10))];
        let bars = layout_bars(&tasks, &window());
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].visible_start, 11);
        assert_eq!(bars[0].visible_span, 3);
    }

    #[test]
    fn task_spanning_the_whole_window_covers_it_exactly() {
        let tasks = vec![task(date(2025, 4, 1), date(2025, 6, 1))];
        let bars = layout_bars(&tasks, &window());
        assert_eq!(bars[0].visible_start, 0);
        assert_eq!(bars[0].visible_start + bars[0].visible_span, 14);
    }

    #[test]
    fn end_before_start_renders_a_one_day_bar() {
        let tasks = vec![task(date(2025, 4, 22), date(2025, 4, 10))];
        let bars = layout_bars(&tasks, &window());
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].visible_start, 2);
        assert_eq!(bars[0].visible_span, 1);
    }

    #[test]
    fn skipped_tasks_do_not_shift_the_rows_of_later_tasks() {
        let tasks = vec![
            task(date(2025, 3, 1), date(2025, 3, 5)),
            task(date(2025, 4, 23), date(2025, 4, 27)),
        ];
        let bars = layout_bars(&tasks, &window());
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].row, 1);
    }

    #[test]
    fn empty_task_list_yields_empty_geometry() {
        assert!(layout_bars(&[], &window()).is_empty());
    }

    #[test]
    fn layout_is_idempotent() {
        let tasks = vec![
            task(date(2025, 4, 17), date(2025, 4, 22)),
            task(date(2025, 4, 23), date(2025, 4, 27)),
        ];
        let first = layout_bars(&tasks, &window());
        let second = layout_bars(&tasks, &window());
        assert_eq!(first, second);
    }

    #[test]
    fn pixel_conversion_uses_the_fixed_column_and_row_metrics() {
        let tasks = vec![
            task(date(2025, 4, 20), date(2025, 4, 22)),
            task(date(2025, 4, 23), date(2025, 4, 27)),
        ];
        let bars = layout_bars(&tasks, &window());
        assert_eq!(bars[1].x(), 3.0 * COLUMN_WIDTH);
        assert_eq!(bars[1].width(), 5.0 * COLUMN_WIDTH);
        assert_eq!(bars[1].y(), ROW_HEIGHT + BAR_INSET);
    }
}
