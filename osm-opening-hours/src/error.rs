use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime};

pub use osm_opening_hours_syntax::error::Error as ParserError;

/// Solar events could not be resolved to clock times.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum SolarHoursError {
    /// The field refers to solar events but the evaluator has neither a
    /// location nor any explicit solar hours.
    NotConfigured,
    /// The almanac could not compute solar events for this date, which is the
    /// case during polar day or night.
    Unavailable { date: NaiveDate },
}

impl Display for SolarHoursError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "solar hours are needed but no location is configured"),
            Self::Unavailable { date } => write!(f, "solar hours are not available on {date}"),
        }
    }
}

impl std::error::Error for SolarHoursError {}

/// The search for the next change exceeded its budget of days.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct NextChangeRecursionError {
    /// Last instant that was examined before the search stopped.
    pub last: NaiveDateTime,
}

impl Display for NextChangeRecursionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no status change found before {}", self.last)
    }
}

impl std::error::Error for NextChangeRecursionError {}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum NextChangeError {
    Solar(SolarHoursError),
    Recursion(NextChangeRecursionError),
}

impl From<SolarHoursError> for NextChangeError {
    fn from(err: SolarHoursError) -> Self {
        Self::Solar(err)
    }
}

impl From<NextChangeRecursionError> for NextChangeError {
    fn from(err: NextChangeRecursionError) -> Self {
        Self::Recursion(err)
    }
}

impl Display for NextChangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solar(err) => write!(f, "{err}"),
            Self::Recursion(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for NextChangeError {}

/// Any error raised by this crate.
#[derive(Clone, Debug)]
pub enum Error {
    Parser(ParserError),
    Solar(SolarHoursError),
    Recursion(NextChangeRecursionError),
}

impl From<ParserError> for Error {
    fn from(err: ParserError) -> Self {
        Self::Parser(err)
    }
}

impl From<SolarHoursError> for Error {
    fn from(err: SolarHoursError) -> Self {
        Self::Solar(err)
    }
}

impl From<NextChangeRecursionError> for Error {
    fn from(err: NextChangeRecursionError) -> Self {
        Self::Recursion(err)
    }
}

impl From<NextChangeError> for Error {
    fn from(err: NextChangeError) -> Self {
        match err {
            NextChangeError::Solar(err) => Self::Solar(err),
            NextChangeError::Recursion(err) => Self::Recursion(err),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parser(err) => write!(f, "{err}"),
            Self::Solar(err) => write!(f, "{err}"),
            Self::Recursion(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}
