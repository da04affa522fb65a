//! Staffing checks for expanded occurrences.
//!
//! The validator only reads the roster and shift snapshots it is given;
//! persisting a booking after an [`Verdict::Assignable`] result is the
//! caller's job.

mod validator;
mod verdict;

pub use validator::{AvailabilityValidator, can_assign};
pub use verdict::{ConflictReason, JobWindow, Verdict};
