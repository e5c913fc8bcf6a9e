pub mod calendar;
pub mod gantt_chart;
pub mod task_form;
pub mod theme;
pub mod time_tracker;
pub mod toolbar;
