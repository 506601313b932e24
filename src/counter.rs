//! Days-together counter and anniversary countdown.
//!
//! Everything is calendar arithmetic on [`NaiveDate`]s; the caller supplies
//! "today", so the numbers are reproducible.
//!
//! ## Month arithmetic
//!
//! Months are counted with [`NaiveDate::checked_add_months`], which clamps to
//! the end of shorter months. A story that began on January 31 completes its
//! first month on February 28 (29 in leap years), and one that began on
//! February 29 has its anniversaries on February 28 in common years.
//!
//! ```text
//! start 2025-04-06, today 2026-05-20
//!   days 409, weeks 58, months 13, years 1
//!   next anniversary 2027-04-06 (the 2nd), 321 days away
//! ```

use chrono::{Datelike, Months, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CounterError {
    #[error("Invalid start date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("No counter.start_date set in config.toml")]
    NoStartDate,
    #[error("Start date {start} is after {today}")]
    NotStarted { start: NaiveDate, today: NaiveDate },
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CounterError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CounterError::InvalidDate(raw.to_string()))
}

/// Elapsed time since `start` as of `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Together {
    pub start: NaiveDate,
    pub today: NaiveDate,
    pub days: i64,
    pub weeks: i64,
    /// Complete calendar months.
    pub months: u32,
    pub years: u32,
    pub next_anniversary: NaiveDate,
    /// Which anniversary `next_anniversary` is (1 for the first).
    pub anniversary_number: u32,
    /// 0 on the anniversary itself.
    pub days_until_anniversary: i64,
}

/// `start` advanced by `months`, clamped to month ends.
fn add_months(start: NaiveDate, months: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(months))
}

/// The `n`th anniversary of `start`.
pub fn anniversary(start: NaiveDate, n: u32) -> Option<NaiveDate> {
    add_months(start, n.checked_mul(12)?)
}

fn complete_months(start: NaiveDate, today: NaiveDate) -> u32 {
    let span = (today.year() - start.year()) * 12 + today.month() as i32 - start.month() as i32;
    let mut months = span.max(0) as u32;
    while months > 0 && add_months(start, months).is_none_or(|d| d > today) {
        months -= 1;
    }
    months
}

pub fn together(start: NaiveDate, today: NaiveDate) -> Result<Together, CounterError> {
    if start > today {
        return Err(CounterError::NotStarted { start, today });
    }
    let days = (today - start).num_days();
    let months = complete_months(start, today);

    let mut n = ((today.year() - start.year()) as u32).max(1);
    let mut next = anniversary(start, n).unwrap_or(NaiveDate::MAX);
    if next < today {
        n += 1;
        next = anniversary(start, n).unwrap_or(NaiveDate::MAX);
    }

    tracing::debug!(%start, %today, days, months, next = %next, "counter computed");
    Ok(Together {
        start,
        today,
        days,
        weeks: days / 7,
        months,
        years: months / 12,
        next_anniversary: next,
        anniversary_number: n,
        days_until_anniversary: (next - today).num_days(),
    })
}

/// `"April 6, 2025"`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(raw: &str) -> NaiveDate {
        parse_date(raw).unwrap()
    }

    #[test]
    fn counts_days_weeks_months_years() {
        let t = together(d("2025-04-06"), d("2026-05-20")).unwrap();
        assert_eq!(t.days, 409);
        assert_eq!(t.weeks, 58);
        assert_eq!(t.months, 13);
        assert_eq!(t.years, 1);
        assert_eq!(t.next_anniversary, d("2027-04-06"));
        assert_eq!(t.anniversary_number, 2);
        assert_eq!(t.days_until_anniversary, 321);
    }

    #[test]
    fn first_day_counts_zero() {
        let t = together(d("2025-04-06"), d("2025-04-06")).unwrap();
        assert_eq!((t.days, t.weeks, t.months, t.years), (0, 0, 0, 0));
        assert_eq!(t.next_anniversary, d("2026-04-06"));
        assert_eq!(t.anniversary_number, 1);
        assert_eq!(t.days_until_anniversary, 365);
    }

    #[test]
    fn anniversary_day_is_zero_days_away() {
        let t = together(d("2025-04-06"), d("2026-04-06")).unwrap();
        assert_eq!(t.years, 1);
        assert_eq!(t.next_anniversary, d("2026-04-06"));
        assert_eq!(t.anniversary_number, 1);
        assert_eq!(t.days_until_anniversary, 0);

        let after = together(d("2025-04-06"), d("2026-04-07")).unwrap();
        assert_eq!(after.next_anniversary, d("2027-04-06"));
        assert_eq!(after.anniversary_number, 2);
    }

    #[test]
    fn incomplete_month_is_not_counted() {
        assert_eq!(together(d("2025-01-15"), d("2025-02-14")).unwrap().months, 0);
        assert_eq!(together(d("2025-01-15"), d("2025-02-15")).unwrap().months, 1);
    }

    #[test]
    fn month_end_start_clamps() {
        assert_eq!(together(d("2025-01-31"), d("2025-02-28")).unwrap().months, 1);
        assert_eq!(together(d("2025-01-31"), d("2025-02-27")).unwrap().months, 0);
    }

    #[test]
    fn leap_day_anniversary_falls_on_feb_28() {
        let start = d("2024-02-29");
        assert_eq!(anniversary(start, 1), Some(d("2025-02-28")));
        assert_eq!(anniversary(start, 4), Some(d("2028-02-29")));
        let t = together(start, d("2025-02-28")).unwrap();
        assert_eq!(t.years, 1);
        assert_eq!(t.days_until_anniversary, 0);
    }

    #[test]
    fn future_start_is_an_error() {
        assert_eq!(
            together(d("2030-01-01"), d("2025-01-01")),
            Err(CounterError::NotStarted {
                start: d("2030-01-01"),
                today: d("2025-01-01"),
            })
        );
    }

    #[test]
    fn parse_rejects_other_formats() {
        assert!(matches!(parse_date("06/04/2025"), Err(CounterError::InvalidDate(_))));
        assert_eq!(parse_date(" 2025-04-06 "), Ok(d("2025-04-06")));
    }

    #[test]
    fn long_date_format() {
        assert_eq!(format_long_date(d("2025-04-06")), "April 6, 2025");
    }
}
