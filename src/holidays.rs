//! Holiday lookup for grid shading.
//!
//! Holidays are decoration only: a lookup that comes back empty just means
//! no shading, never a blocked interaction.

use chrono::{Datelike, NaiveDate, Weekday};

/// Year/month span of the visible window, used to scope a holiday fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolidayRange {
    pub start_year: i32,
    pub start_month: u32,
    pub end_year: i32,
    pub end_month: u32,
}

impl HolidayRange {
    /// Range covering the first through last date of a displayed window.
    /// An empty window yields `None`.
    pub fn from_dates(dates: &[NaiveDate]) -> Option<Self> {
        let first = dates.first()?;
        let last = dates.last()?;
        Some(Self {
            start_year: first.year(),
            start_month: first.month(),
            end_year: last.year(),
            end_month: last.month(),
        })
    }

    fn contains(&self, date: NaiveDate) -> bool {
        let ym = (date.year(), date.month());
        ym >= (self.start_year, self.start_month) && ym <= (self.end_year, self.end_month)
    }
}

/// A single public holiday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

/// Source of public holidays for a date range.
///
/// Implementations swallow their own failures and return an empty list;
/// shading quietly disappears instead of surfacing an error to the grid.
pub trait HolidayProvider {
    fn fetch(&self, range: &HolidayRange) -> Vec<Holiday>;
}

/// Fixed-date Korean public holidays. Lunar-calendar holidays (Seollal,
/// Chuseok, Buddha's birthday) shift every year and are not listed.
const KR_FIXED_HOLIDAYS: &[(u32, u32, &str)] = &[
    (1, 1, "New Year's Day"),
    (3, 1, "Independence Movement Day"),
    (5, 5, "Children's Day"),
    (6, 6, "Memorial Day"),
    (8, 15, "Liberation Day"),
    (10, 3, "National Foundation Day"),
    (10, 9, "Hangul Day"),
    (12, 25, "Christmas Day"),
];

/// Built-in provider backed by the fixed-date holiday table above.
#[derive(Debug, Clone, Copy, Default)]
pub struct KoreanHolidays;

impl HolidayProvider for KoreanHolidays {
    fn fetch(&self, range: &HolidayRange) -> Vec<Holiday> {
        let mut out = Vec::new();
        for year in range.start_year..=range.end_year {
            for &(month, day, name) in KR_FIXED_HOLIDAYS {
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                    if range.contains(date) {
                        out.push(Holiday {
                            date,
                            name: name.to_string(),
                        });
                    }
                }
            }
        }
        out.sort_by_key(|h| h.date);
        out
    }
}

/// Saturday and Sunday shading is computed locally, independent of any
/// holiday provider.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn weekend_detection() {
        assert!(is_weekend(d("2024-01-06"))); // Saturday
        assert!(is_weekend(d("2024-01-07"))); // Sunday
        assert!(!is_weekend(d("2024-01-08"))); // Monday
    }

    #[test]
    fn range_from_window_edges() {
        let dates = vec![d("2023-12-20"), d("2023-12-21"), d("2024-02-03")];
        let range = HolidayRange::from_dates(&dates).unwrap();
        assert_eq!(range.start_year, 2023);
        assert_eq!(range.start_month, 12);
        assert_eq!(range.end_year, 2024);
        assert_eq!(range.end_month, 2);
        assert!(HolidayRange::from_dates(&[]).is_none());
    }

    #[test]
    fn fixed_holidays_respect_the_range() {
        let range = HolidayRange {
            start_year: 2023,
            start_month: 12,
            end_year: 2024,
            end_month: 3,
        };
        let holidays = KoreanHolidays.fetch(&range);
        let dates: Vec<NaiveDate> = holidays.iter().map(|h| h.date).collect();
        assert!(dates.contains(&d("2023-12-25")));
        assert!(dates.contains(&d("2024-01-01")));
        assert!(dates.contains(&d("2024-03-01")));
        assert!(!dates.contains(&d("2024-05-05"))); // past end month
        assert!(!dates.contains(&d("2023-10-09"))); // before start month
        assert!(dates.windows(2).all(|p| p[0] <= p[1]));
    }
}
