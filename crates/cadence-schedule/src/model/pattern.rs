use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DayOfWeek;
use crate::error::PatternError;

/// How a pattern repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    /// Placeholder for a bespoke cadence. Steps like `Daily` until a
    /// dedicated rule is defined for it.
    Custom,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ## Summary
/// Rule describing how an appointment repeats.
///
/// Equality and hashing are structural, so `(pattern, count)` can key a cache
/// of expansions. Fields are public for the editing UI; call
/// [`RecurrencePattern::validate`] (the expander always does) before relying
/// on the invariants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecurrencePattern {
    pub frequency: Frequency,
    pub interval: u32,
    /// Days emitted per period for `Weekly` and `Biweekly`; ignored otherwise.
    #[serde(default)]
    pub days_of_week: BTreeSet<DayOfWeek>,
    /// Day snapped to for `Monthly`; ignored otherwise.
    #[serde(default)]
    pub day_of_month: Option<u8>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub skip_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub max_occurrences: Option<u32>,
}

impl RecurrencePattern {
    /// Creates a pattern with interval 1 and no constraints.
    #[must_use]
    pub fn new(frequency: Frequency, start_date: NaiveDate) -> Self {
        Self {
            frequency,
            interval: 1,
            days_of_week: BTreeSet::new(),
            day_of_month: None,
            start_date,
            end_date: None,
            skip_dates: BTreeSet::new(),
            max_occurrences: None,
        }
    }

    #[must_use]
    pub fn daily(start_date: NaiveDate) -> Self {
        Self::new(Frequency::Daily, start_date)
    }

    #[must_use]
    pub fn weekly(start_date: NaiveDate, days: impl IntoIterator<Item = DayOfWeek>) -> Self {
        Self::new(Frequency::Weekly, start_date).with_days_of_week(days)
    }

    #[must_use]
    pub fn biweekly(start_date: NaiveDate, days: impl IntoIterator<Item = DayOfWeek>) -> Self {
        Self::new(Frequency::Biweekly, start_date).with_days_of_week(days)
    }

    #[must_use]
    pub fn monthly(start_date: NaiveDate, day_of_month: u8) -> Self {
        Self {
            day_of_month: Some(day_of_month),
            ..Self::new(Frequency::Monthly, start_date)
        }
    }

    #[must_use]
    pub fn custom(start_date: NaiveDate) -> Self {
        Self::new(Frequency::Custom, start_date)
    }

    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_days_of_week(mut self, days: impl IntoIterator<Item = DayOfWeek>) -> Self {
        self.days_of_week.extend(days);
        self
    }

    #[must_use]
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn with_skip_date(mut self, date: NaiveDate) -> Self {
        self.skip_dates.insert(date);
        self
    }

    #[must_use]
    pub fn with_max_occurrences(mut self, max: u32) -> Self {
        self.max_occurrences = Some(max);
        self
    }

    /// Whether an occurrence on `date` is marked skipped.
    #[must_use]
    pub fn is_skipped(&self, date: NaiveDate) -> bool {
        self.skip_dates.contains(&date)
    }

    /// Whether expansion terminates without an external count.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.end_date.is_some() || self.max_occurrences.is_some()
    }

    /// ## Summary
    /// Checks the invariants required by the chosen frequency.
    ///
    /// ## Errors
    /// Returns the first [`PatternError`] found: zero interval, missing days
    /// for weekly cadences, missing or out-of-range day of month, a zero
    /// occurrence cap, or an end date before the start date.
    pub fn validate(&self) -> Result<(), PatternError> {
        if self.interval < 1 {
            return Err(PatternError::ZeroInterval);
        }

        match self.frequency {
            Frequency::Weekly | Frequency::Biweekly if self.days_of_week.is_empty() => {
                return Err(PatternError::MissingDaysOfWeek(self.frequency));
            }
            Frequency::Monthly => match self.day_of_month {
                None => return Err(PatternError::MissingDayOfMonth),
                Some(day) if !(1..=31).contains(&day) => {
                    return Err(PatternError::DayOfMonthOutOfRange(day));
                }
                Some(_) => {}
            },
            _ => {}
        }

        if self.max_occurrences == Some(0) {
            return Err(PatternError::ZeroMaxOccurrences);
        }

        if let Some(end) = self.end_date.filter(|end| *end < self.start_date) {
            return Err(PatternError::EndBeforeStart {
                start: self.start_date,
                end,
            });
        }

        Ok(())
    }

    /// ## Summary
    /// Validates the pattern and additionally requires an end date or cap.
    ///
    /// ## Errors
    /// Returns any [`RecurrencePattern::validate`] error, or
    /// [`PatternError::Unbounded`] when nothing stops the sequence.
    pub fn validate_bounded(&self) -> Result<(), PatternError> {
        self.validate()?;
        if self.is_bounded() {
            Ok(())
        } else {
            Err(PatternError::Unbounded)
        }
    }
}
