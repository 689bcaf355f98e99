use chrono::NaiveDate;
use osm_opening_hours_syntax::SolarEvent;
use sunrise::{DawnType, SolarDay};

/// A valid pair of geographic coordinates.
///
/// See https://en.wikipedia.org/wiki/Geographic_coordinate_system
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Coordinates(sunrise::Coordinates);

impl Coordinates {
    /// Validate a pair of latitude / longitude.
    ///
    /// Return `None` if values are out of range (`abs(lat) > 90` or
    /// `abs(lon) > 180`).
    ///
    /// ```
    /// use osm_opening_hours::localization::Coordinates;
    ///
    /// assert!(Coordinates::new(48.8535, 2.34839).is_some());
    /// assert!(Coordinates::new(91.0, 2.34839).is_none());
    /// ```
    pub const fn new(lat: f64, lon: f64) -> Option<Self> {
        match sunrise::Coordinates::new(lat, lon) {
            Some(c) => Some(Self(c)),
            None => None,
        }
    }

    /// Get the time for a sun event at a given date. Dawn and dusk are
    /// civil twilights.
    pub fn event_time(&self, date: NaiveDate, event: SolarEvent) -> chrono::DateTime<chrono::Utc> {
        let solar_event = match event {
            SolarEvent::Dawn => sunrise::SolarEvent::Dawn(DawnType::Civil),
            SolarEvent::Sunrise => sunrise::SolarEvent::Sunrise,
            SolarEvent::Sunset => sunrise::SolarEvent::Sunset,
            SolarEvent::Dusk => sunrise::SolarEvent::Dusk(DawnType::Civil),
        };

        let solar_day = SolarDay::new(self.0, date);
        solar_day.event_time(solar_event)
    }

    /// Get latitude component.
    pub fn lat(&self) -> f64 {
        self.0.lat()
    }

    /// Get longitude component.
    pub fn lon(&self) -> f64 {
        self.0.lon()
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat(), self.lon())
    }
}
