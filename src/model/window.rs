use chrono::{Datelike, NaiveDate};

/// Narrowest allowed window, in weeks.
pub const MIN_WEEKS: i64 = 2;

/// The visible date range of the timeline: an anchor date (leftmost day)
/// and a width in whole weeks. Navigation shifts the anchor, zoom changes
/// the width. Never persisted; a fresh app starts on the current week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRangeWindow {
    /// The leftmost visible date.
    pub anchor: NaiveDate,
    /// Width in whole weeks, at least [`MIN_WEEKS`].
    pub weeks: i64,
}

impl DateRangeWindow {
    pub fn new(anchor: NaiveDate, weeks: i64) -> Self {
        Self {
            anchor,
            weeks: weeks.max(MIN_WEEKS),
        }
    }

    /// A four-week window anchored on the Sunday of the week containing
    /// `today`.
    pub fn current_week(today: NaiveDate) -> Self {
        let back = today.weekday().num_days_from_sunday() as i64;
        Self::new(today - chrono::Duration::days(back), 4)
    }

    /// Total number of visible days.
    pub fn days(&self) -> i64 {
        self.weeks * 7
    }

    /// First date past the visible range (exclusive end).
    pub fn end(&self) -> NaiveDate {
        self.anchor + chrono::Duration::days(self.days())
    }

    /// Last visible date (inclusive), for range labels.
    pub fn last_day(&self) -> NaiveDate {
        self.end() - chrono::Duration::days(1)
    }

    /// Shift the anchor by whole weeks; negative moves into the past.
    /// Unbounded in both directions.
    pub fn shift_weeks(&mut self, delta: i64) {
        self.anchor += chrono::Duration::days(7 * delta);
    }

    /// Narrow the window by one week, down to the [`MIN_WEEKS`] floor.
    pub fn zoom_in(&mut self) {
        if self.weeks > MIN_WEEKS {
            self.weeks -= 1;
        }
    }

    /// Widen the window by one week. No ceiling.
    pub fn zoom_out(&mut self) {
        self.weeks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn current_week_snaps_back_to_sunday() {
        // 2025-04-23 is a Wednesday; the week starts on Sunday the 20th.
        let w = DateRangeWindow::current_week(date(2025, 4, 23));
        assert_eq!(w.anchor, date(2025, 4, 20));
        assert_eq!(w.weeks, 4);
    }

    #[test]
    fn current_week_on_a_sunday_stays_put() {
        let w = DateRangeWindow::current_week(date(2025, 4, 20));
        assert_eq!(w.anchor, date(2025, 4, 20));
    }

    #[test]
    fn shift_moves_anchor_by_whole_weeks() {
        let mut w = DateRangeWindow::new(date(2025, 4, 20), 2);
        w.shift_weeks(1);
        assert_eq!(w.anchor, date(2025, 4, 27));
        w.shift_weeks(-2);
        assert_eq!(w.anchor, date(2025, 4, 13));
    }

    #[test]
    fn zoom_in_stops_at_two_weeks() {
        let mut w = DateRangeWindow::new(date(2025, 4, 20), 3);
        w.zoom_in();
        assert_eq!(w.weeks, 2);
        w.zoom_in();
        assert_eq!(w.weeks, 2);
    }

    #[test]
    fn zoom_out_has_no_ceiling() {
        let mut w = DateRangeWindow::new(date(2025, 4, 20), 2);
        for _ in 0..50 {
            w.zoom_out();
        }
        assert_eq!(w.weeks, 52);
    }

    #[test]
    fn new_clamps_width_to_floor() {
        let w = DateRangeWindow::new(date(2025, 4, 20), 0);
        assert_eq!(w.weeks, MIN_WEEKS);
    }

    #[test]
    fn exclusive_end_is_one_past_last_day() {
        let w = DateRangeWindow::new(date(2025, 4, 20), 2);
        assert_eq!(w.days(), 14);
        assert_eq!(w.end(), date(2025, 5, 4));
        assert_eq!(w.last_day(), date(2025, 5, 3));
    }
}
