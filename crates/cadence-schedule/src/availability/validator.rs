use std::collections::HashSet;

use super::{ConflictReason, JobWindow, Verdict};
use crate::model::{Occurrence, ShiftSet, StaffId, StaffRoster};

/// ## Summary
/// Checks proposed staffing against a roster and committed shift snapshot.
///
/// Borrows immutable snapshots and never mutates them.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityValidator<'a> {
    roster: &'a StaffRoster,
    shifts: &'a ShiftSet,
}

impl<'a> AvailabilityValidator<'a> {
    #[must_use]
    pub const fn new(roster: &'a StaffRoster, shifts: &'a ShiftSet) -> Self {
        Self { roster, shifts }
    }

    /// ## Summary
    /// Determines whether every staff member in `staff_ids` can work `job` on
    /// the occurrence's date.
    ///
    /// Skipped occurrences are always assignable. Otherwise each member must
    /// have one availability window on that weekday containing the job and no
    /// committed shift overlapping it. All conflicts are collected, in
    /// proposal order; a member listed twice is checked once.
    #[must_use]
    #[tracing::instrument(
        level = "debug",
        skip(self, staff_ids),
        fields(date = %occurrence.date, staff = staff_ids.len())
    )]
    pub fn can_assign(
        &self,
        occurrence: &Occurrence,
        staff_ids: &[StaffId],
        job: JobWindow,
    ) -> Verdict {
        if occurrence.skipped {
            tracing::debug!("Occurrence skipped, no staffing required");
            return Verdict::Assignable;
        }

        let day = occurrence.weekday();
        let (job_start, job_end) = job.on(occurrence.date);
        let mut seen = HashSet::new();
        let mut conflicts = Vec::new();

        for staff_id in staff_ids {
            if !seen.insert(staff_id) {
                continue;
            }

            let available = self
                .roster
                .get(staff_id)
                .is_some_and(|member| member.is_available(day, job.start(), job.end()));
            if !available {
                tracing::trace!(%staff_id, %day, "Outside availability");
                conflicts.push(ConflictReason::OutsideAvailability {
                    staff_id: staff_id.clone(),
                    day,
                    job,
                });
            }

            for shift in self
                .shifts
                .for_staff(staff_id)
                .iter()
                .filter(|shift| shift.overlaps(job_start, job_end))
            {
                tracing::trace!(%staff_id, shift_id = %shift.id(), "Double booked");
                conflicts.push(ConflictReason::DoubleBooked {
                    staff_id: staff_id.clone(),
                    shift_id: shift.id().clone(),
                });
            }
        }

        tracing::debug!(conflicts = conflicts.len(), "Staffing check complete");
        Verdict::from_conflicts(conflicts)
    }

    /// ## Summary
    /// Runs [`AvailabilityValidator::can_assign`] for every occurrence of a
    /// series, pairing each occurrence with its verdict.
    #[must_use]
    pub fn check_series(
        &self,
        occurrences: &[Occurrence],
        staff_ids: &[StaffId],
        job: JobWindow,
    ) -> Vec<(Occurrence, Verdict)> {
        occurrences
            .iter()
            .map(|occurrence| (*occurrence, self.can_assign(occurrence, staff_ids, job)))
            .collect()
    }
}

/// ## Summary
/// Convenience wrapper over [`AvailabilityValidator::can_assign`] for a single
/// check.
#[must_use]
pub fn can_assign(
    occurrence: &Occurrence,
    staff_ids: &[StaffId],
    roster: &StaffRoster,
    shifts: &ShiftSet,
    job: JobWindow,
) -> Verdict {
    AvailabilityValidator::new(roster, shifts).can_assign(occurrence, staff_ids, job)
}
