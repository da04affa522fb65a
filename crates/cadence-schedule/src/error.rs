use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::model::{DayOfWeek, Frequency, ShiftId, StaffId};

/// Scheduling engine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] PatternError),

    #[error("Requested {requested} occurrences, limit is {limit}")]
    TooManyOccurrences { requested: usize, limit: usize },

    #[error("Invalid day of week: {0} (expected 0-6)")]
    InvalidDayOfWeek(u8),

    #[error("Invalid time range: {start} is not before {end}")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },

    #[error("Invalid shift {shift_id}: {start} is not before {end}")]
    InvalidShift {
        shift_id: ShiftId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Overlapping availability windows for staff {staff_id} on {day}")]
    OverlappingAvailability { staff_id: StaffId, day: DayOfWeek },

    #[error("Duplicate staff member: {0}")]
    DuplicateStaff(StaffId),
}

/// Malformed recurrence configuration, reported before any expansion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("interval must be at least 1")]
    ZeroInterval,

    #[error("{0} pattern requires at least one day of week")]
    MissingDaysOfWeek(Frequency),

    #[error("monthly pattern requires a day of month")]
    MissingDayOfMonth,

    #[error("day of month {0} is outside 1-31")]
    DayOfMonthOutOfRange(u8),

    #[error("max occurrences must be at least 1")]
    ZeroMaxOccurrences,

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("pattern has neither an end date nor a max occurrence cap")]
    Unbounded,
}

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;
