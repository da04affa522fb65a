use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DayOfWeek;

/// One concrete date produced by expanding a recurrence pattern.
///
/// A skipped occurrence keeps its slot and `sequence_index`; excluding it from
/// staffing is the caller's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub sequence_index: u32,
    pub skipped: bool,
}

impl Occurrence {
    #[must_use]
    pub fn weekday(&self) -> DayOfWeek {
        DayOfWeek::of(self.date)
    }
}
