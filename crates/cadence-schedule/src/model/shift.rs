use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::StaffId;
use crate::error::{ScheduleError, ScheduleResult};

/// Opaque shift identifier assigned by the booking workflow.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(String);

impl ShiftId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ShiftId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ShiftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
struct RawShift {
    id: ShiftId,
    staff_id: StaffId,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// A committed interval `[start, end)` assigned to one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawShift")]
pub struct Shift {
    id: ShiftId,
    staff_id: StaffId,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Shift {
    /// ## Summary
    /// Creates a shift for `staff_id` covering `[start, end)`.
    ///
    /// ## Errors
    /// Returns `ScheduleError::InvalidShift` unless `start < end`.
    pub fn new(
        id: ShiftId,
        staff_id: StaffId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ScheduleResult<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidShift {
                shift_id: id,
                start,
                end,
            });
        }
        Ok(Self {
            id,
            staff_id,
            start,
            end,
        })
    }

    #[must_use]
    pub const fn id(&self) -> &ShiftId {
        &self.id
    }

    #[must_use]
    pub const fn staff_id(&self) -> &StaffId {
        &self.staff_id
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Half-open overlap test; intervals that only touch do not overlap.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && start < self.end
    }
}

impl TryFrom<RawShift> for Shift {
    type Error = ScheduleError;

    fn try_from(raw: RawShift) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.staff_id, raw.start, raw.end)
    }
}

/// Two shifts of the same staff member whose intervals overlap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ShiftOverlap {
    pub staff_id: StaffId,
    pub first: ShiftId,
    pub second: ShiftId,
}

/// Immutable snapshot of committed shifts indexed by staff member.
///
/// Each member's shifts are kept ordered by start time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftSet {
    by_staff: HashMap<StaffId, Vec<Shift>>,
}

impl ShiftSet {
    #[must_use]
    pub fn new(shifts: impl IntoIterator<Item = Shift>) -> Self {
        let mut by_staff: HashMap<StaffId, Vec<Shift>> = HashMap::new();
        for shift in shifts {
            by_staff
                .entry(shift.staff_id.clone())
                .or_default()
                .push(shift);
        }
        for shifts in by_staff.values_mut() {
            shifts.sort_by(|a, b| (a.start, a.end, &a.id).cmp(&(b.start, b.end, &b.id)));
        }
        Self { by_staff }
    }

    /// Shifts of one staff member in start order; empty for unknown members.
    #[must_use]
    pub fn for_staff(&self, staff_id: &StaffId) -> &[Shift] {
        self.by_staff
            .get(staff_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_staff.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_staff.values().all(Vec::is_empty)
    }

    /// ## Summary
    /// Flags every pair of overlapping shifts that belong to the same member.
    ///
    /// Pairs are ordered by staff id, then by the start of the earlier shift.
    #[must_use]
    pub fn overlapping_shifts(&self) -> Vec<ShiftOverlap> {
        let ordered: BTreeMap<&StaffId, &Vec<Shift>> = self.by_staff.iter().collect();
        let mut overlaps = Vec::new();

        for (staff_id, shifts) in ordered {
            for (i, first) in shifts.iter().enumerate() {
                // Sorted by start, so the scan can stop at the first later
                // shift that begins at or after `first` ends.
                for second in shifts[i + 1..]
                    .iter()
                    .take_while(|second| second.start < first.end)
                {
                    tracing::trace!(
                        staff_id = %staff_id,
                        first = %first.id,
                        second = %second.id,
                        "Overlapping shifts"
                    );
                    overlaps.push(ShiftOverlap {
                        staff_id: staff_id.clone(),
                        first: first.id.clone(),
                        second: second.id.clone(),
                    });
                }
            }
        }

        overlaps
    }
}

impl FromIterator<Shift> for ShiftSet {
    fn from_iter<I: IntoIterator<Item = Shift>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn shift(id: &str, staff: &str, start: NaiveDateTime, end: NaiveDateTime) -> Shift {
        Shift::new(ShiftId::from(id), StaffId::from(staff), start, end).unwrap()
    }

    #[test]
    fn test_shift_requires_start_before_end() {
        let result = Shift::new(
            ShiftId::from("s1"),
            StaffId::from("ana"),
            at(1, 10, 0),
            at(1, 9, 0),
        );
        assert!(matches!(result, Err(ScheduleError::InvalidShift { .. })));
    }

    #[test]
    fn test_overlap_is_half_open() {
        let s = shift("s1", "ana", at(1, 9, 0), at(1, 11, 0));
        assert!(!s.overlaps(at(1, 11, 0), at(1, 13, 0)));
        assert!(!s.overlaps(at(1, 7, 0), at(1, 9, 0)));
        assert!(s.overlaps(at(1, 10, 59), at(1, 13, 0)));
        assert!(s.overlaps(at(1, 8, 0), at(1, 12, 0)));
    }

    #[test]
    fn test_for_staff_is_sorted_and_partitioned() {
        let set = ShiftSet::new([
            shift("late", "ana", at(2, 9, 0), at(2, 10, 0)),
            shift("other", "ben", at(1, 9, 0), at(1, 10, 0)),
            shift("early", "ana", at(1, 9, 0), at(1, 10, 0)),
        ]);

        let ids: Vec<_> = set
            .for_staff(&StaffId::from("ana"))
            .iter()
            .map(|s| s.id().as_str())
            .collect();
        assert_eq!(ids, vec!["early", "late"]);
        assert_eq!(set.len(), 3);
        assert!(set.for_staff(&StaffId::from("cy")).is_empty());
    }

    #[test]
    fn test_overlapping_shifts_flags_same_staff_only() {
        let set: ShiftSet = [
            shift("a1", "ana", at(1, 9, 0), at(1, 12, 0)),
            shift("a2", "ana", at(1, 11, 0), at(1, 13, 0)),
            shift("a3", "ana", at(1, 13, 0), at(1, 14, 0)),
            shift("b1", "ben", at(1, 9, 0), at(1, 12, 0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            set.overlapping_shifts(),
            vec![ShiftOverlap {
                staff_id: StaffId::from("ana"),
                first: ShiftId::from("a1"),
                second: ShiftId::from("a2"),
            }]
        );
    }

    #[test]
    fn test_overlapping_shifts_nested_interval() {
        let set = ShiftSet::new([
            shift("outer", "ana", at(1, 8, 0), at(1, 18, 0)),
            shift("inner1", "ana", at(1, 9, 0), at(1, 10, 0)),
            shift("inner2", "ana", at(1, 12, 0), at(1, 13, 0)),
        ]);

        let pairs: Vec<_> = set
            .overlapping_shifts()
            .into_iter()
            .map(|o| (o.first.to_string(), o.second.to_string()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("outer".to_string(), "inner1".to_string()),
                ("outer".to_string(), "inner2".to_string()),
            ]
        );
    }
}
