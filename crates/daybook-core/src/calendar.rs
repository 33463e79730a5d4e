//! Grouping of diary entries by local calendar day.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};

use crate::entities::{DiaryEntry, DiaryEntrySummary};
use crate::errors::CoreError;

/// Anything stamped with a creation time.
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}

impl Timestamped for DiaryEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Timestamped for DiaryEntrySummary {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl<T: Timestamped> Timestamped for &T {
    fn created_at(&self) -> DateTime<Utc> {
        (*self).created_at()
    }
}

/// Partition entries by the calendar day of `created_at` in `tz`.
///
/// Days without entries are absent from the map. Input order is kept within
/// each day.
pub fn group_by_day<E, Tz>(entries: impl IntoIterator<Item = E>, tz: &Tz) -> BTreeMap<NaiveDate, Vec<E>>
where
    E: Timestamped,
    Tz: TimeZone,
{
    let mut grouped: BTreeMap<NaiveDate, Vec<E>> = BTreeMap::new();
    for entry in entries {
        let day = entry.created_at().with_timezone(tz).date_naive();
        grouped.entry(day).or_default().push(entry);
    }
    grouped
}

/// Number of entries per day.
#[must_use]
pub fn entry_counts<E>(grouped: &BTreeMap<NaiveDate, Vec<E>>) -> BTreeMap<NaiveDate, usize> {
    grouped
        .iter()
        .map(|(day, entries)| (*day, entries.len()))
        .collect()
}

/// Number of entries per day, restricted to one month.
#[must_use]
pub fn month_counts<E>(
    grouped: &BTreeMap<NaiveDate, Vec<E>>,
    month: MonthCursor,
) -> BTreeMap<NaiveDate, usize> {
    grouped
        .range(month.first_day()..=month.last_day())
        .map(|(day, entries)| (*day, entries.len()))
        .collect()
}

// ---------------------------------------------------------------------------
// MonthCursor
// ---------------------------------------------------------------------------

/// A calendar month, navigable one month at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    /// # Errors
    ///
    /// [`CoreError::Validation`] when `month` is not 1..=12 or the year is
    /// out of range.
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| CoreError::Validation(format!("invalid month {year}-{month:02}")))
    }

    /// The month containing `day`.
    #[must_use]
    pub fn containing(day: NaiveDate) -> Self {
        Self {
            first: day.with_day(1).unwrap_or(day),
        }
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.first.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.first.month()
    }

    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first
    }

    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.next().first.pred_opt().unwrap_or(self.first)
    }

    #[must_use]
    pub fn previous(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    #[must_use]
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    /// Every day of the month in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day();
        self.first.iter_days().take_while(move |day| *day <= last)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthCursor {
    type Err = CoreError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("expected YYYY-MM, got '{s}'"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}
