use chrono::{Datelike, Duration, NaiveDate};

use super::task::Task;

/// Minimum number of day columns the grid shows, anchored at today.
pub const MIN_WINDOW_DAYS: i64 = 150;
/// Days of breathing room added on each side of the task span.
pub const RANGE_MARGIN_DAYS: i64 = 7;

/// Compute the ordered, contiguous sequence of calendar days the grid
/// displays.
///
/// With no tasks the window is `today .. today + MIN_WINDOW_DAYS - 1`. With
/// tasks it brackets every task span plus a margin on each side, extended
/// (never shifted) so that today stays inside and the minimum window length
/// measured from today forward is still met.
///
/// Callers must not invoke this while a drag is in progress; regenerating the
/// sequence mid-gesture would shift columns under the pointer.
pub fn generate_dates(tasks: &[Task], today: NaiveDate) -> Vec<NaiveDate> {
    let min_end = today + Duration::days(MIN_WINDOW_DAYS - 1);

    let (start, end) = match task_extent(tasks) {
        None => (today, min_end),
        Some((min_date, max_date)) => {
            let start = (min_date - Duration::days(RANGE_MARGIN_DAYS)).min(today);
            let end = (max_date + Duration::days(RANGE_MARGIN_DAYS)).max(min_end);
            (start, end)
        }
    };

    let len = (end - start).num_days() + 1;
    (0..len).map(|i| start + Duration::days(i)).collect()
}

/// Earliest start and latest end across all tasks.
fn task_extent(tasks: &[Task]) -> Option<(NaiveDate, NaiveDate)> {
    let min = tasks.iter().map(|t| t.start).min()?;
    let max = tasks.iter().map(|t| t.end).max()?;
    Some((min, max))
}

/// Column index of `date` in the displayed sequence.
///
/// A miss means the date is outside the window (or the sequence is stale);
/// callers must treat `None` as "do not act", never coerce to column 0.
pub fn col_of(dates: &[NaiveDate], date: NaiveDate) -> Option<usize> {
    let first = *dates.first()?;
    let offset = (date - first).num_days();
    if offset < 0 || offset >= dates.len() as i64 {
        return None;
    }
    Some(offset as usize)
}

/// One calendar month's worth of columns in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSpan {
    /// Stable key, `YYYY-MM`.
    pub key: String,
    /// Display label, e.g. `Jan 2024`.
    pub label: String,
    pub start_index: usize,
    pub len: usize,
}

impl MonthSpan {
    pub fn end_index(&self) -> usize {
        self.start_index + self.len - 1
    }
}

/// Group consecutive columns by calendar month for the month header row.
pub fn month_spans(dates: &[NaiveDate]) -> Vec<MonthSpan> {
    let mut spans: Vec<MonthSpan> = Vec::new();
    for (i, date) in dates.iter().enumerate() {
        let key = format!("{:04}-{:02}", date.year(), date.month());
        match spans.last_mut() {
            Some(last) if last.key == key => last.len += 1,
            _ => spans.push(MonthSpan {
                key,
                label: date.format("%b %Y").to_string(),
                start_index: i,
                len: 1,
            }),
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn assert_contiguous(dates: &[NaiveDate]) {
        for pair in dates.windows(2) {
            assert_eq!(pair[1], pair[0] + Duration::days(1));
        }
    }

    #[test]
    fn empty_store_yields_minimum_window_from_today() {
        let today = d("2024-01-01");
        let dates = generate_dates(&[], today);
        assert_eq!(dates.len(), MIN_WINDOW_DAYS as usize);
        assert_eq!(dates[0], today);
        assert_eq!(*dates.last().unwrap(), d("2024-05-29"));
        assert_contiguous(&dates);
    }

    #[test]
    fn tasks_are_bracketed_with_margin() {
        let today = d("2024-03-01");
        let tasks = vec![
            Task::new("a", d("2024-03-10"), d("2024-03-20"), 0),
            Task::new("b", d("2024-04-01"), d("2024-09-15"), 1),
        ];
        let dates = generate_dates(&tasks, today);
        // Task minimum 03-10 minus margin is after today, so today wins.
        assert_eq!(dates[0], today);
        // Task maximum 09-15 plus margin beats the 150-day minimum.
        assert_eq!(*dates.last().unwrap(), d("2024-09-22"));
        assert_contiguous(&dates);
    }

    #[test]
    fn window_extends_left_for_past_tasks_without_clipping_today() {
        let today = d("2024-06-01");
        let tasks = vec![Task::new("old", d("2024-01-15"), d("2024-01-20"), 0)];
        let dates = generate_dates(&tasks, today);
        assert_eq!(dates[0], d("2024-01-08"));
        assert!(col_of(&dates, today).is_some());
        // Minimum window from today forward still holds.
        let today_col = col_of(&dates, today).unwrap();
        assert!(dates.len() - today_col >= MIN_WINDOW_DAYS as usize);
    }

    #[test]
    fn col_of_misses_outside_window() {
        let dates = generate_dates(&[], d("2024-01-01"));
        assert_eq!(col_of(&dates, d("2024-01-01")), Some(0));
        assert_eq!(col_of(&dates, d("2024-01-31")), Some(30));
        assert_eq!(col_of(&dates, d("2023-12-31")), None);
        assert_eq!(col_of(&dates, d("2030-01-01")), None);
        assert_eq!(col_of(&[], d("2024-01-01")), None);
    }

    #[test]
    fn month_spans_cover_every_column_once() {
        let dates = generate_dates(&[], d("2024-01-15"));
        let spans = month_spans(&dates);
        assert_eq!(spans[0].key, "2024-01");
        assert_eq!(spans[0].start_index, 0);
        assert_eq!(spans[0].len, 17); // Jan 15..31
        assert_eq!(spans[1].key, "2024-02");
        assert_eq!(spans[1].start_index, 17);
        assert_eq!(spans[1].len, 29); // 2024 is a leap year

        let total: usize = spans.iter().map(|s| s.len).sum();
        assert_eq!(total, dates.len());
    }
}
