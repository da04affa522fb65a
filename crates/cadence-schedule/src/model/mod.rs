//! Value types shared by the expander and the validator.

mod day_of_week;
mod occurrence;
mod pattern;
mod shift;
mod staff;

pub use day_of_week::DayOfWeek;
pub use occurrence::Occurrence;
pub use pattern::{Frequency, RecurrencePattern};
pub use shift::{Shift, ShiftId, ShiftOverlap, ShiftSet};
pub use staff::{AvailabilityWindow, StaffId, StaffMember, StaffRoster};
