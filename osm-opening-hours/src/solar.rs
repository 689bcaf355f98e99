use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use osm_opening_hours_syntax::SolarEvent;

use crate::error::SolarHoursError;
use crate::localization::{Almanac, Location, SunriseAlmanac};

/// Local clock times of solar events for a single date.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct SolarRecord {
    pub dawn: NaiveTime,
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
    pub dusk: NaiveTime,
}

impl SolarRecord {
    /// Get the time of an event.
    pub fn get(&self, event: SolarEvent) -> NaiveTime {
        match event {
            SolarEvent::Dawn => self.dawn,
            SolarEvent::Sunrise => self.sunrise,
            SolarEvent::Sunset => self.sunset,
            SolarEvent::Dusk => self.dusk,
        }
    }
}

/// Resolve solar events into clock times, caching results for each date.
///
/// Explicit records always take precedence over computed ones: first the
/// override for the requested date, then the default record, then the cache,
/// and finally the almanac if a location is configured.
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use osm_opening_hours::{SolarHours, SolarHoursError, SolarRecord};
///
/// let time = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
/// let mut solar = SolarHours::default();
/// assert_eq!(solar.get_or_compute(date), Err(SolarHoursError::NotConfigured));
///
/// let record = SolarRecord { dawn: time(5), sunrise: time(6), sunset: time(21), dusk: time(22) };
/// solar.set_override(date, record);
/// assert_eq!(solar.get_or_compute(date), Ok(record));
/// ```
#[derive(Clone, Debug)]
pub struct SolarHours {
    location: Option<Location>,
    almanac: Arc<dyn Almanac>,
    overrides: HashMap<NaiveDate, SolarRecord>,
    default: Option<SolarRecord>,
    cache: HashMap<NaiveDate, SolarRecord>,
}

impl Default for SolarHours {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SolarHours {
    pub fn new(location: Option<Location>) -> Self {
        Self {
            location,
            almanac: Arc::new(SunriseAlmanac),
            overrides: HashMap::new(),
            default: None,
            cache: HashMap::new(),
        }
    }

    /// Replace the almanac used to compute solar events, this clears the
    /// cache.
    pub fn with_almanac(self, almanac: Arc<dyn Almanac>) -> Self {
        Self { almanac, cache: HashMap::new(), ..self }
    }

    /// Check if there is any source of solar hours at all.
    pub fn is_configured(&self) -> bool {
        self.location.is_some() || self.default.is_some() || !self.overrides.is_empty()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Change the location used to compute solar events. Computed records
    /// are dropped as they are specific to the previous location.
    pub fn set_location(&mut self, location: Option<Location>) {
        if self.location != location {
            self.location = location;
            self.clear();
        }
    }

    /// Get the solar hours at given date, computing them if needed.
    pub fn get_or_compute(&mut self, date: NaiveDate) -> Result<SolarRecord, SolarHoursError> {
        if let Some(record) = self.overrides.get(&date).or(self.default.as_ref()) {
            return Ok(*record);
        }

        if let Some(record) = self.cache.get(&date) {
            return Ok(*record);
        }

        let location = self.location.as_ref().ok_or(SolarHoursError::NotConfigured)?;

        let Some(record) = self.almanac.solar_times(date, location) else {
            #[cfg(feature = "log")]
            log::warn!("Solar hours are not available at {location} on {date}");

            return Err(SolarHoursError::Unavailable { date });
        };

        self.cache.insert(date, record);
        Ok(record)
    }

    /// Force the solar hours of a date, regardless of the location.
    pub fn set_override(&mut self, date: NaiveDate, record: SolarRecord) {
        self.overrides.insert(date, record);
    }

    pub fn remove_override(&mut self, date: NaiveDate) -> Option<SolarRecord> {
        self.overrides.remove(&date)
    }

    /// Use the same solar hours for any date that has no override.
    pub fn set_default(&mut self, record: Option<SolarRecord>) {
        self.default = record;
    }

    /// Drop all computed records, overrides are kept.
    pub fn clear(&mut self) {
        #[cfg(feature = "log")]
        if !self.cache.is_empty() {
            log::debug!(entries = self.cache.len(); "Clearing solar hours cache");
        }

        self.cache.clear();
    }

    /// Dates for which a record was computed from the almanac.
    pub fn cached_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cache.keys().copied()
    }

    /// Switch to an alternative location, without overrides and with an
    /// empty cache. The previous configuration is returned so that it can be
    /// restored later.
    pub(crate) fn replace_with_location(&mut self, location: Location) -> Self {
        let alternate = Self { almanac: self.almanac.clone(), ..Self::new(Some(location)) };
        std::mem::replace(self, alternate)
    }
}
