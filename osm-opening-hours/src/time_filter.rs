use std::ops::Range;

use chrono::NaiveDate;

use osm_opening_hours_syntax::extended_time::ExtendedTime;
use osm_opening_hours_syntax::rules::time as ts;

use crate::error::SolarHoursError;
use crate::solar::SolarHours;

const MINUTES_PER_DAY: i16 = 24 * 60;

/// Trait used to project a time representation to its naive representation at
/// a given date.
pub(crate) trait TimeFilter {
    type Output;

    /// Project a time representation to its naive representation at a given
    /// date, solar events are resolved on the go.
    fn as_naive(
        &self,
        solar: &mut SolarHours,
        date: NaiveDate,
    ) -> Result<Self::Output, SolarHoursError>;
}

impl TimeFilter for ts::Moment {
    type Output = ExtendedTime;

    fn as_naive(
        &self,
        solar: &mut SolarHours,
        date: NaiveDate,
    ) -> Result<Self::Output, SolarHoursError> {
        match *self {
            ts::Moment::Clock(time) => Ok(time),
            ts::Moment::Solar { event, offset } => {
                let time = solar.get_or_compute(date)?.get(event);
                Ok(ExtendedTime::from(time).saturating_add_minutes(offset))
            }
        }
    }
}

impl TimeFilter for ts::TimeSpan {
    /// The span is `None` when both ends resolve to the same time.
    type Output = Option<Range<ExtendedTime>>;

    fn as_naive(
        &self,
        solar: &mut SolarHours,
        date: NaiveDate,
    ) -> Result<Self::Output, SolarHoursError> {
        let start = self.beginning.as_naive(solar, date)?;
        let end = self.end.as_naive(solar, date)?;

        // If end < start, it actually wraps to next day
        let end = {
            if start <= end {
                end
            } else {
                end.saturating_add_minutes(MINUTES_PER_DAY)
            }
        };

        Ok((start < end).then_some(start..end))
    }
}

impl TimeFilter for [ts::TimeSpan] {
    type Output = Vec<Range<ExtendedTime>>;

    fn as_naive(
        &self,
        solar: &mut SolarHours,
        date: NaiveDate,
    ) -> Result<Self::Output, SolarHoursError> {
        let mut ranges = Vec::with_capacity(self.len());

        for span in self {
            ranges.extend(span.as_naive(solar, date)?);
        }

        Ok(ranges)
    }
}

/// Check if a span may still be open after midnight, which can't be decided
/// without solar hours in general.
pub(crate) fn may_end_next_day(span: &ts::TimeSpan) -> bool {
    match (span.beginning, span.end) {
        (ts::Moment::Clock(start), ts::Moment::Clock(end)) => {
            end < start || end > ExtendedTime::MIDNIGHT_24
        }
        (
            ts::Moment::Solar { event: start, offset: 0 },
            ts::Moment::Solar { event: end, offset: 0 },
        ) => end < start,
        // Wraps around only if the solar moment can be later than the end.
        (ts::Moment::Solar { offset, .. }, ts::Moment::Clock(end)) => {
            end != ExtendedTime::MIDNIGHT_00
                && (end > ExtendedTime::MIDNIGHT_24 || latest_solar_moment(offset) > end)
        }
        // From midnight, the end can't be before the start.
        (ts::Moment::Clock(start), ts::Moment::Solar { offset, .. }) => {
            start != ExtendedTime::MIDNIGHT_00
                || latest_solar_moment(offset) > ExtendedTime::MIDNIGHT_24
        }
        _ => true,
    }
}

/// Latest time a solar moment can resolve to: events always happen before
/// *24:00* and seconds are truncated.
fn latest_solar_moment(offset: i16) -> ExtendedTime {
    ExtendedTime::MIDNIGHT_24.saturating_add_minutes(offset.saturating_sub(1))
}
