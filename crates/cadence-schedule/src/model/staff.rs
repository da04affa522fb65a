use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::DayOfWeek;
use crate::error::{ScheduleError, ScheduleResult};

/// Opaque staff identifier assigned by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(String);

impl StaffId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StaffId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
struct RawWindow {
    day_of_week: DayOfWeek,
    start: NaiveTime,
    end: NaiveTime,
}

/// Recurring weekday range `[start, end)` during which a member may work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct AvailabilityWindow {
    day_of_week: DayOfWeek,
    start: NaiveTime,
    end: NaiveTime,
}

impl AvailabilityWindow {
    /// ## Summary
    /// Creates a window on `day_of_week` from `start` up to `end`.
    ///
    /// ## Errors
    /// Returns `ScheduleError::InvalidTimeRange` unless `start < end`.
    pub fn new(day_of_week: DayOfWeek, start: NaiveTime, end: NaiveTime) -> ScheduleResult<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidTimeRange { start, end });
        }
        Ok(Self {
            day_of_week,
            start,
            end,
        })
    }

    #[must_use]
    pub const fn day_of_week(&self) -> DayOfWeek {
        self.day_of_week
    }

    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whether `[start, end)` lies entirely inside this window.
    #[must_use]
    pub fn contains(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start <= start && end <= self.end
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.day_of_week == other.day_of_week && self.start < other.end && other.start < self.end
    }
}

impl TryFrom<RawWindow> for AvailabilityWindow {
    type Error = ScheduleError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.day_of_week, raw.start, raw.end)
    }
}

#[derive(Deserialize)]
struct RawStaffMember {
    id: StaffId,
    #[serde(default)]
    availability: Vec<AvailabilityWindow>,
}

/// A staff member and their weekly availability, ordered by day then start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStaffMember")]
pub struct StaffMember {
    id: StaffId,
    availability: Vec<AvailabilityWindow>,
}

impl StaffMember {
    /// ## Summary
    /// Creates a member, sorting the windows by weekday and start time.
    ///
    /// ## Errors
    /// Returns `ScheduleError::OverlappingAvailability` if two windows on the
    /// same day overlap.
    pub fn new(
        id: StaffId,
        availability: impl IntoIterator<Item = AvailabilityWindow>,
    ) -> ScheduleResult<Self> {
        let mut availability: Vec<_> = availability.into_iter().collect();
        availability.sort_by_key(|window| (window.day_of_week, window.start, window.end));

        if let Some(pair) = availability
            .windows(2)
            .find(|pair| pair[0].overlaps(&pair[1]))
        {
            return Err(ScheduleError::OverlappingAvailability {
                staff_id: id,
                day: pair[0].day_of_week,
            });
        }

        Ok(Self { id, availability })
    }

    #[must_use]
    pub const fn id(&self) -> &StaffId {
        &self.id
    }

    #[must_use]
    pub fn availability(&self) -> &[AvailabilityWindow] {
        &self.availability
    }

    /// Windows on the given weekday, in start order.
    pub fn windows_on(&self, day: DayOfWeek) -> impl Iterator<Item = &AvailabilityWindow> {
        self.availability
            .iter()
            .filter(move |window| window.day_of_week == day)
    }

    /// Whether a single window on `day` covers `[start, end)`.
    #[must_use]
    pub fn is_available(&self, day: DayOfWeek, start: NaiveTime, end: NaiveTime) -> bool {
        self.windows_on(day).any(|window| window.contains(start, end))
    }
}

impl TryFrom<RawStaffMember> for StaffMember {
    type Error = ScheduleError;

    fn try_from(raw: RawStaffMember) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.availability)
    }
}

/// Immutable snapshot of staff members keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffRoster {
    members: HashMap<StaffId, StaffMember>,
}

impl StaffRoster {
    /// ## Summary
    /// Indexes the given members by id.
    ///
    /// ## Errors
    /// Returns `ScheduleError::DuplicateStaff` if an id appears twice.
    pub fn new(members: impl IntoIterator<Item = StaffMember>) -> ScheduleResult<Self> {
        let mut index = HashMap::new();
        for member in members {
            match index.entry(member.id.clone()) {
                Entry::Occupied(entry) => {
                    return Err(ScheduleError::DuplicateStaff(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(member);
                }
            }
        }
        Ok(Self { members: index })
    }

    #[must_use]
    pub fn get(&self, id: &StaffId) -> Option<&StaffMember> {
        self.members.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> impl Iterator<Item = &StaffMember> {
        self.members.values()
    }
}
