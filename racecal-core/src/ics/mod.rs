//! ICS document generation.
//!
//! Serializes built calendar entries into a single iCalendar document
//! according to RFC 5545.

mod generate;

pub use generate::generate_calendar;
