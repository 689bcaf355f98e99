use chrono_tz::Tz;

use crate::localization::Coordinates;

/// A place on earth and the timezone its clocks follow.
///
/// ```
/// use osm_opening_hours::localization::{Coordinates, Location};
///
/// let paris = Location::new(Coordinates::new(48.8535, 2.34839).unwrap(), chrono_tz::Europe::Paris);
/// assert_eq!(paris.to_string(), "(48.8535, 2.34839) Europe/Paris");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub coordinates: Coordinates,
    pub timezone: Tz,
}

impl Location {
    pub fn new(coordinates: Coordinates, timezone: Tz) -> Self {
        Self { coordinates, timezone }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.coordinates, self.timezone)
    }
}
