//! Recurrence expansion for appointment patterns.
//!
//! Turns a [`RecurrencePattern`](crate::model::RecurrencePattern) into an
//! ordered, finite sequence of [`Occurrence`](crate::model::Occurrence)s.

mod calendar;
mod expander;

pub use expander::{ExpansionOptions, Occurrences, expand, expand_with_options};
