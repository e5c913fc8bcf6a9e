use chrono::{Datelike, NaiveDate};

use crate::model::DateRangeWindow;

/// One header column of the timeline, covering a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineColumn {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_weekend: bool,
}

/// The ordered day columns of the visible window, one per day starting at
/// the anchor. "Today" is read from the wall clock on every call, so a
/// window left open past midnight picks up the new day on the next repaint.
pub fn columns_for(window: &DateRangeWindow) -> Vec<TimelineColumn> {
    columns_for_on(window, chrono::Local::now().date_naive())
}

/// Clock-free variant backing [`columns_for`].
pub fn columns_for_on(window: &DateRangeWindow, today: NaiveDate) -> Vec<TimelineColumn> {
    (0..window.days())
        .map(|i| {
            let date = window.anchor + chrono::Duration::days(i);
            TimelineColumn {
                date,
                is_today: date == today,
                is_weekend: is_weekend(date),
            }
        })
        .collect()
}

/// Saturday or Sunday, with the week starting on Sunday.
fn is_weekend(date: NaiveDate) -> bool {
    let index = date.weekday().num_days_from_sunday();
    index == 0 || index == 6
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window() -> DateRangeWindow {
        DateRangeWindow::new(date(2025, 4, 20), 2)
    }

    #[test]
    fn one_column_per_day_strictly_increasing() {
        let cols = columns_for_on(&window(), date(2025, 4, 21));
        assert_eq!(cols.len(), 14);
        assert_eq!(cols[0].date, date(2025, 4, 20));
        assert_eq!(cols[13].date, date(2025, 5, 3));
        for pair in cols.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, chrono::Duration::days(1));
        }
    }

    #[test]
    fn today_is_flagged_exactly_once_when_inside_the_window() {
        let cols = columns_for_on(&window(), date(2025, 4, 25));
        let today: Vec<_> = cols.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2025, 4, 25));
    }

    #[test]
    fn today_outside_the_window_flags_nothing() {
        let cols = columns_for_on(&window(), date(2025, 6, 1));
        assert!(cols.iter().all(|c| !c.is_today));
    }

    #[test]
    fn weekends_are_saturdays_and_sundays() {
        // Anchor 2025-04-20 is a Sunday, so weekends sit at indices
        // 0, 6, 7, 13 of a two-week window.
        let cols = columns_for_on(&window(), date(2025, 4, 21));
        let weekend_indices: Vec<usize> = cols
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_weekend)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(weekend_indices, vec![0, 6, 7, 13]);
    }

    #[test]
    fn widening_the_window_adds_a_week_of_columns() {
        let mut w = window();
        w.zoom_out();
        assert_eq!(columns_for_on(&w, date(2025, 4, 21)).len(), 21);
    }
}
