//! Recurring-appointment scheduling engine.
//!
//! Two pure components composed by a booking workflow:
//! - [`recurrence`] expands a [`RecurrencePattern`] into ordered [`Occurrence`]s.
//! - [`availability`] checks whether an occurrence can be staffed against a
//!   [`StaffRoster`] and the already committed [`ShiftSet`].

pub mod availability;
pub mod error;
pub mod model;
pub mod recurrence;

pub use availability::{AvailabilityValidator, ConflictReason, JobWindow, Verdict, can_assign};
pub use error::{PatternError, ScheduleError, ScheduleResult};
pub use model::{
    AvailabilityWindow, DayOfWeek, Frequency, Occurrence, RecurrencePattern, Shift, ShiftId,
    ShiftOverlap, ShiftSet, StaffId, StaffMember, StaffRoster,
};
pub use recurrence::{ExpansionOptions, Occurrences, expand, expand_with_options};
