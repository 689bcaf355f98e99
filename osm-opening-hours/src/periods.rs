use std::collections::VecDeque;
use std::ops::Range;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::SolarHoursError;
use crate::opening_hours::OpeningHours;
use crate::utils::dates::datetime_at;

// DateTimeRange

/// A concrete opening period.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct DateTimeRange {
    pub range: Range<NaiveDateTime>,
}

impl DateTimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { range: start..end }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.range.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.range.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.range.end - self.range.start
    }
}

impl From<Range<NaiveDateTime>> for DateTimeRange {
    fn from(range: Range<NaiveDateTime>) -> Self {
        Self { range }
    }
}

// Boundary

/// A bound of an enumeration of periods. Dates include the whole day and
/// don't clip periods, datetimes clip the periods that overlap them.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Boundary {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Boundary {
    fn date(self) -> NaiveDate {
        match self {
            Self::Date(date) => date,
            Self::DateTime(datetime) => datetime.date(),
        }
    }

    fn clip(self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(_) => None,
            Self::DateTime(datetime) => Some(datetime),
        }
    }
}

impl From<NaiveDate> for Boundary {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDateTime> for Boundary {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::DateTime(datetime)
    }
}

// OpeningPeriods

/// Lazy iterator over the opening periods of an expression, day by day. It is
/// returned by [`OpeningHours::iter_periods`].
#[derive(Debug)]
pub struct OpeningPeriods<'a> {
    opening_hours: &'a mut OpeningHours,
    /// Next date to evaluate, `None` once all dates have been evaluated.
    curr_date: Option<NaiveDate>,
    end_date: NaiveDate,
    clip_start: Option<NaiveDateTime>,
    clip_end: Option<NaiveDateTime>,
    merge: bool,
    /// Periods of the last evaluated date that were not yielded yet.
    buffer: VecDeque<DateTimeRange>,
    /// Period that may still be extended by the next one when merging.
    pending: Option<DateTimeRange>,
    error: Option<SolarHoursError>,
}

impl<'a> OpeningPeriods<'a> {
    pub(crate) fn new(
        opening_hours: &'a mut OpeningHours,
        start: Boundary,
        end: Boundary,
        merge: bool,
    ) -> Self {
        let start_date = start.date();
        let end_date = end.date();

        Self {
            opening_hours,
            curr_date: (start_date <= end_date).then_some(start_date),
            end_date,
            clip_start: start.clip(),
            clip_end: end.clip(),
            merge,
            buffer: VecDeque::new(),
            pending: None,
            error: None,
        }
    }

    /// Evaluate the next date and queue its periods, return `false` if there
    /// is no more date to evaluate.
    fn load_next_date(&mut self) -> Result<bool, SolarHoursError> {
        let Some(date) = self.curr_date else {
            return Ok(false);
        };

        self.curr_date = date.succ_opt().filter(|next| *next <= self.end_date);
        let schedule = self.opening_hours.schedule_at(date)?;

        for range in schedule {
            let (Some(mut start), Some(mut end)) =
                (datetime_at(date, range.start), datetime_at(date, range.end))
            else {
                continue;
            };

            if let Some(clip_start) = self.clip_start {
                start = start.max(clip_start);
            }

            if let Some(clip_end) = self.clip_end {
                end = end.min(clip_end);
            }

            if start < end {
                self.buffer.push_back(DateTimeRange::new(start, end));
            }
        }

        Ok(true)
    }
}

impl Iterator for OpeningPeriods<'_> {
    type Item = Result<DateTimeRange, SolarHoursError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(err) = self.error.take() {
                self.curr_date = None;
                self.buffer.clear();
                return Some(Err(err));
            }

            let Some(period) = self.buffer.pop_front() else {
                match self.load_next_date() {
                    Ok(true) => continue,
                    Ok(false) => return self.pending.take().map(Ok),
                    Err(err) => {
                        // Periods evaluated before the failure are still valid.
                        self.error = Some(err);
                        self.curr_date = None;

                        match self.pending.take() {
                            Some(pending) => return Some(Ok(pending)),
                            None => continue,
                        }
                    }
                }
            };

            if !self.merge {
                return Some(Ok(period));
            }

            match self.pending.take() {
                None => self.pending = Some(period),
                Some(mut pending) if pending.range.end == period.range.start => {
                    pending.range.end = period.range.end;
                    self.pending = Some(pending);
                }
                Some(pending) => {
                    self.pending = Some(period);
                    return Some(Ok(pending));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for OpeningPeriods<'_> {}
