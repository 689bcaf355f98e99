#![doc = include_str!("../../README.md")]

pub mod context;
pub mod date_filter;
pub mod error;
pub mod localization;
pub mod opening_hours;
pub mod periods;
#[macro_use]
pub mod schedule;
pub mod solar;

mod time_filter;
mod utils;

#[cfg(test)]
mod tests;

// Public re-exports
pub use crate::context::{Context, ContextHolidays, HolidayCalendar};
pub use crate::error::{
    Error, NextChangeError, NextChangeRecursionError, ParserError, SolarHoursError,
};
pub use crate::opening_hours::{Day, HolidaysStatus, OpeningHours, DEFAULT_MAX_RECURSION};
pub use crate::periods::{Boundary, DateTimeRange, OpeningPeriods};
pub use crate::solar::{SolarHours, SolarRecord};
pub use osm_opening_hours_syntax::rules::RuleKind;
