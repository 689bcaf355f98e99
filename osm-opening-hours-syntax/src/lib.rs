#![doc = include_str!("../README.md")]

#[macro_use]
extern crate pest_derive;

pub mod error;
pub mod extended_time;
pub mod rules;
pub mod sanitize;

mod display;
mod parser;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use extended_time::ExtendedTime;
pub use parser::{parse, parse_raw};
pub use rules::time::{SolarEvent, SolarEvents};
pub use rules::{Field, Rule, RuleKind};
