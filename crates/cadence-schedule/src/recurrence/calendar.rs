//! Calendar arithmetic used by the expander.

use chrono::{Datelike, Days, NaiveDate};

use crate::model::DayOfWeek;

/// Returns the number of days in `month` (1-12) of `year`.
pub(super) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    first_of_next.pred_opt().map(|date| date.day())
}

/// Sunday on or before `date`.
pub(super) fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(DayOfWeek::of(date).days_from_sunday()))
}

/// A calendar month, advanced without reference to any particular day so
/// clamping in a short month never drifts later months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Month {
    year: i32,
    month0: u32,
}

impl Month {
    pub(super) fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub(super) fn advance(self, months: u32) -> Option<Self> {
        let total = self.month0.checked_add(months)?;
        let years = i32::try_from(total / 12).ok()?;
        Some(Self {
            year: self.year.checked_add(years)?,
            month0: total % 12,
        })
    }

    /// Date for `day` in this month, clamped to the month's last day.
    pub(super) fn snap(self, day: u32) -> Option<NaiveDate> {
        let month = self.month0 + 1;
        let last = days_in_month(self.year, month)?;
        NaiveDate::from_ymd_opt(self.year, month, day.min(last))
    }
}
