//! Recurrence expansion algorithm.
//!
//! Each frequency produces candidate dates through a `Cursor`. The occurrence
//! cap and end date are checked in `Occurrences::next`, once per candidate,
//! for every frequency.

use std::iter::FusedIterator;

use cadence_core::config::{DEFAULT_MAX_EXPANSION_COUNT, SchedulingConfig};
use chrono::{Days, NaiveDate};

use super::calendar::{Month, week_start};
use crate::error::{PatternError, ScheduleError, ScheduleResult};
use crate::model::{DayOfWeek, Frequency, Occurrence, RecurrencePattern};

const DAYS_PER_WEEK: u64 = 7;
const BIWEEKLY_STEP_DAYS: u64 = 14;

/// Options for recurrence expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// Largest `count` a single expansion may request.
    pub max_count: usize,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_EXPANSION_COUNT,
        }
    }
}

impl ExpansionOptions {
    /// Sets the maximum number of occurrences.
    #[must_use]
    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }
}

impl From<&SchedulingConfig> for ExpansionOptions {
    fn from(config: &SchedulingConfig) -> Self {
        Self {
            max_count: config.max_expansion_count,
        }
    }
}

/// ## Summary
/// Expands `pattern` into at most `count` occurrences using the default limit.
///
/// ## Errors
/// See [`expand_with_options`].
pub fn expand(pattern: &RecurrencePattern, count: usize) -> ScheduleResult<Vec<Occurrence>> {
    expand_with_options(pattern, count, &ExpansionOptions::default())
}

/// ## Summary
/// Expands `pattern` into an ordered list of at most `count` occurrences.
///
/// Fewer are returned when the next candidate falls after the pattern's end
/// date or the occurrence cap is reached.
///
/// ## Errors
/// Returns `ScheduleError::InvalidPattern` if the pattern is malformed, or
/// `ScheduleError::TooManyOccurrences` if `count` exceeds `options.max_count`.
///
/// ## Side Effects
/// None - the result depends only on `pattern` and `count`.
#[tracing::instrument(
    level = "debug",
    skip(pattern, options),
    fields(frequency = %pattern.frequency, start_date = %pattern.start_date)
)]
pub fn expand_with_options(
    pattern: &RecurrencePattern,
    count: usize,
    options: &ExpansionOptions,
) -> ScheduleResult<Vec<Occurrence>> {
    pattern.validate()?;

    if count > options.max_count {
        return Err(ScheduleError::TooManyOccurrences {
            requested: count,
            limit: options.max_count,
        });
    }

    let occurrences: Vec<_> = Occurrences::from_valid(pattern)?.take(count).collect();

    tracing::debug!(
        produced = occurrences.len(),
        skipped = occurrences.iter().filter(|o| o.skipped).count(),
        "Expanded recurrence pattern"
    );

    Ok(occurrences)
}

impl RecurrencePattern {
    /// ## Summary
    /// Returns a lazy iterator over this pattern's occurrences.
    ///
    /// ## Errors
    /// Returns a [`PatternError`] if the pattern is malformed or has neither
    /// an end date nor an occurrence cap.
    pub fn occurrences(&self) -> Result<Occurrences<'_>, PatternError> {
        Occurrences::new(self)
    }
}

/// Next-candidate state for each family of frequencies.
#[derive(Debug, Clone)]
enum Cursor {
    /// `Daily` and `Custom`: fixed number of days between occurrences.
    Stepping { next: Option<NaiveDate>, step: Days },
    /// `Weekly` and `Biweekly`: every listed day of each period.
    Periodic {
        period_start: Option<NaiveDate>,
        days: Vec<DayOfWeek>,
        slot: usize,
        step: Days,
    },
    /// `Monthly`: one day per `step` months, clamped to short months.
    Monthly {
        month: Option<Month>,
        day: u32,
        step: u32,
    },
}

impl Cursor {
    fn new(pattern: &RecurrencePattern) -> Result<Self, PatternError> {
        let start = pattern.start_date;
        let interval = pattern.interval;

        let cursor = match pattern.frequency {
            Frequency::Daily => Self::Stepping {
                next: Some(start),
                step: Days::new(u64::from(interval)),
            },
            Frequency::Custom => {
                tracing::debug!("Custom frequency expands with daily stepping");
                Self::Stepping {
                    next: Some(start),
                    step: Days::new(u64::from(interval)),
                }
            }
            Frequency::Weekly => Self::Periodic {
                period_start: week_start(start),
                days: pattern.days_of_week.iter().copied().collect(),
                slot: 0,
                step: Days::new(DAYS_PER_WEEK * u64::from(interval)),
            },
            Frequency::Biweekly => Self::Periodic {
                period_start: week_start(start),
                days: pattern.days_of_week.iter().copied().collect(),
                slot: 0,
                step: Days::new(BIWEEKLY_STEP_DAYS),
            },
            Frequency::Monthly => {
                let day = pattern
                    .day_of_month
                    .map(u32::from)
                    .ok_or(PatternError::MissingDayOfMonth)?;
                let first = Month::of(start);
                // The start month only counts if its snapped day is not
                // already behind the start date.
                let month = match first.snap(day) {
                    Some(date) if date >= start => Some(first),
                    _ => first.advance(interval),
                };
                Self::Monthly {
                    month,
                    day,
                    step: interval,
                }
            }
        };

        Ok(cursor)
    }

    /// Produces the next candidate date, or `None` once the calendar runs out.
    fn next_date(&mut self, not_before: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Stepping { next, step } => {
                let current = (*next)?;
                *next = current.checked_add_days(*step);
                Some(current)
            }
            Self::Periodic {
                period_start,
                days,
                slot,
                step,
            } => loop {
                let start = (*period_start)?;
                while let Some(day) = days.get(*slot) {
                    *slot += 1;
                    let candidate = start.checked_add_days(Days::new(day.days_from_sunday()))?;
                    if candidate >= not_before {
                        return Some(candidate);
                    }
                }
                *slot = 0;
                *period_start = start.checked_add_days(*step);
            },
            Self::Monthly { month, day, step } => {
                let current = (*month)?;
                *month = current.advance(*step);
                current.snap(*day)
            }
        }
    }
}

/// ## Summary
/// Lazy, ordered sequence of a pattern's occurrences.
///
/// Occurrences are strictly chronological, never precede the start date and
/// carry strictly increasing sequence indices. Skipped dates still consume an
/// index.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    pattern: &'a RecurrencePattern,
    cursor: Cursor,
    next_index: u32,
    finished: bool,
}

impl<'a> Occurrences<'a> {
    /// ## Summary
    /// Creates an iterator over a bounded pattern.
    ///
    /// ## Errors
    /// Returns a [`PatternError`] if the pattern is malformed or unbounded.
    pub fn new(pattern: &'a RecurrencePattern) -> Result<Self, PatternError> {
        pattern.validate_bounded()?;
        Self::from_valid(pattern)
    }

    /// Callers must have validated the pattern and must bound the iteration.
    fn from_valid(pattern: &'a RecurrencePattern) -> Result<Self, PatternError> {
        Ok(Self {
            pattern,
            cursor: Cursor::new(pattern)?,
            next_index: 0,
            finished: false,
        })
    }

    fn finish(&mut self) -> Option<Occurrence> {
        self.finished = true;
        None
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self
            .pattern
            .max_occurrences
            .is_some_and(|max| self.next_index >= max)
        {
            tracing::trace!(index = self.next_index, "Occurrence cap reached");
            return self.finish();
        }

        let Some(date) = self.cursor.next_date(self.pattern.start_date) else {
            tracing::trace!("Calendar range exhausted");
            return self.finish();
        };

        if self.pattern.end_date.is_some_and(|end| date > end) {
            tracing::trace!(%date, "Candidate past end date");
            return self.finish();
        }

        let occurrence = Occurrence {
            date,
            sequence_index: self.next_index,
            skipped: self.pattern.is_skipped(date),
        };
        tracing::trace!(
            %date,
            index = occurrence.sequence_index,
            skipped = occurrence.skipped,
            "Emitting occurrence"
        );

        match self.next_index.checked_add(1) {
            Some(next) => self.next_index = next,
            None => self.finished = true,
        }

        Some(occurrence)
    }
}

impl FusedIterator for Occurrences<'_> {}
