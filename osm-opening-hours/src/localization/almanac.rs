use std::fmt::Debug;

use chrono::NaiveDate;
use osm_opening_hours_syntax::SolarEvent;

use crate::localization::Location;
use crate::solar::SolarRecord;

/// Computes the clock times of solar events for a date and a location.
pub trait Almanac: Send + Sync + Debug {
    /// Return `None` if any of the events doesn't occur at this date, for
    /// example during polar night.
    fn solar_times(&self, date: NaiveDate, location: &Location) -> Option<SolarRecord>;
}

/// Almanac backed by the `sunrise` crate, using civil twilight for dawn and
/// dusk.
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use osm_opening_hours::localization::{Almanac, Coordinates, Location, SunriseAlmanac};
///
/// let paris = Location::new(Coordinates::new(48.8535, 2.34839).unwrap(), chrono_tz::Europe::Paris);
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
/// let record = SunriseAlmanac.solar_times(date, &paris).unwrap();
///
/// assert!(record.dawn < record.sunrise);
/// assert!(record.sunrise < NaiveTime::from_hms_opt(6, 0, 0).unwrap());
/// assert!(record.sunset > NaiveTime::from_hms_opt(21, 0, 0).unwrap());
/// assert!(record.sunset < record.dusk);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SunriseAlmanac;

impl Almanac for SunriseAlmanac {
    fn solar_times(&self, date: NaiveDate, location: &Location) -> Option<SolarRecord> {
        let local_time = |event| {
            let local = location
                .coordinates
                .event_time(date, event)
                .with_timezone(&location.timezone)
                .naive_local();

            // Events that don't happen are computed far away from the date.
            ((local.date() - date).num_days().abs() <= 1).then_some(local.time())
        };

        let record = SolarRecord {
            dawn: local_time(SolarEvent::Dawn)?,
            sunrise: local_time(SolarEvent::Sunrise)?,
            sunset: local_time(SolarEvent::Sunset)?,
            dusk: local_time(SolarEvent::Dusk)?,
        };

        #[cfg(feature = "log")]
        log::trace!("Computed solar hours at {location} on {date}: {record:?}");

        Some(record)
    }
}
