use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::model::{DayOfWeek, ShiftId, StaffId};

#[derive(Deserialize)]
struct RawJobWindow {
    start: NaiveTime,
    end: NaiveTime,
}

/// Proposed time-of-day range `[start, end)` for a job, anchored on an
/// occurrence's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawJobWindow")]
pub struct JobWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl JobWindow {
    /// ## Summary
    /// Creates a job window from `start` up to `end`.
    ///
    /// ## Errors
    /// Returns `ScheduleError::InvalidTimeRange` unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> ScheduleResult<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Concrete `[start, end)` timestamps on `date`.
    #[must_use]
    pub fn on(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (date.and_time(self.start), date.and_time(self.end))
    }
}

impl TryFrom<RawJobWindow> for JobWindow {
    type Error = ScheduleError;

    fn try_from(raw: RawJobWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

/// Why a proposed staff member cannot take an occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConflictReason {
    /// No availability window on `day` contains the job.
    OutsideAvailability {
        staff_id: StaffId,
        day: DayOfWeek,
        job: JobWindow,
    },
    /// An existing shift overlaps the job.
    DoubleBooked { staff_id: StaffId, shift_id: ShiftId },
}

impl ConflictReason {
    #[must_use]
    pub const fn staff_id(&self) -> &StaffId {
        match self {
            Self::OutsideAvailability { staff_id, .. } | Self::DoubleBooked { staff_id, .. } => {
                staff_id
            }
        }
    }
}

impl std::fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutsideAvailability { staff_id, day, job } => write!(
                f,
                "{staff_id} is not available on {day} from {} to {}",
                job.start, job.end
            ),
            Self::DoubleBooked { staff_id, shift_id } => {
                write!(f, "{staff_id} is already booked on shift {shift_id}")
            }
        }
    }
}

/// Outcome of a staffing check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "conflicts", rename_all = "snake_case")]
pub enum Verdict {
    Assignable,
    /// Every conflict found across all proposed staff.
    Conflict(Vec<ConflictReason>),
}

impl Verdict {
    #[must_use]
    pub fn from_conflicts(conflicts: Vec<ConflictReason>) -> Self {
        if conflicts.is_empty() {
            Self::Assignable
        } else {
            Self::Conflict(conflicts)
        }
    }

    #[must_use]
    pub const fn is_assignable(&self) -> bool {
        matches!(self, Self::Assignable)
    }

    #[must_use]
    pub fn conflicts(&self) -> &[ConflictReason] {
        match self {
            Self::Assignable => &[],
            Self::Conflict(conflicts) => conflicts.as_slice(),
        }
    }
}
