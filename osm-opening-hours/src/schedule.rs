use std::ops::Range;

use osm_opening_hours_syntax::ExtendedTime;

use crate::utils::range::range_intersection;

const WHOLE_DAY: Range<ExtendedTime> = ExtendedTime::MIDNIGHT_00..ExtendedTime::MIDNIGHT_24;
const NEXT_DAY: Range<ExtendedTime> = ExtendedTime::MIDNIGHT_24..ExtendedTime::MIDNIGHT_48;

/// Opening periods of a day.
///
/// The periods are kept sorted, disjoint and non-adjacent, so that any
/// boundary of a period is a change of state.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Schedule {
    /// Always keep a sequence of non-overlaping, increasing time ranges.
    pub(crate) inner: Vec<Range<ExtendedTime>>,
}

impl Schedule {
    /// Creates a new empty schedule, which represents an always closed period.
    ///
    /// ```
    /// use osm_opening_hours::schedule::Schedule;
    ///
    /// assert!(Schedule::new().is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new schedule from a list of ranges, which may overlap.
    ///
    /// ```
    /// use osm_opening_hours::schedule::Schedule;
    /// use osm_opening_hours_syntax::ExtendedTime;
    ///
    /// let sch1 = Schedule::from_ranges([
    ///     ExtendedTime::new(10, 0).unwrap()..ExtendedTime::new(14, 0).unwrap(),
    ///     ExtendedTime::new(12, 0).unwrap()..ExtendedTime::new(16, 0).unwrap(),
    /// ]);
    ///
    /// let sch2 = Schedule::from_ranges([
    ///     ExtendedTime::new(10, 0).unwrap()..ExtendedTime::new(16, 0).unwrap(),
    /// ]);
    ///
    /// assert_eq!(sch1, sch2);
    /// ```
    pub fn from_ranges(ranges: impl IntoIterator<Item = Range<ExtendedTime>>) -> Self {
        let mut inner: Vec<_> = ranges
            .into_iter()
            .filter(|range| range.start < range.end)
            .collect();

        // Ensure ranges are disjoint and in increasing order
        inner.sort_unstable_by_key(|range| range.start);
        let mut i = 0;

        while i + 1 < inner.len() {
            if inner[i].end >= inner[i + 1].start {
                let next = inner.remove(i + 1);
                inner[i].end = inner[i].end.max(next.end);
            } else {
                i += 1;
            }
        }

        Self { inner }
    }

    /// Check if a schedule is empty.
    ///
    /// ```
    /// use osm_opening_hours::schedule::Schedule;
    ///
    /// assert!(Schedule::new().is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn ranges(&self) -> &[Range<ExtendedTime>] {
        &self.inner
    }

    /// Merge two schedules together.
    pub fn addition(self, other: Self) -> Self {
        Self::from_ranges(self.inner.into_iter().chain(other.inner))
    }

    /// Remove the periods of another schedule from this one.
    ///
    /// ```
    /// use osm_opening_hours::schedule;
    ///
    /// let day = schedule! { 8,00 => 18,00 };
    /// let lunch = schedule! { 12,00 => 14,00 };
    /// assert_eq!(day.subtract(lunch), schedule! { 8,00 => 12,00; 14,00 => 18,00 });
    /// ```
    pub fn subtract(self, other: Self) -> Self {
        let mut inner = self.inner;

        for removed in other.inner {
            inner = inner
                .into_iter()
                .flat_map(|range| {
                    let before = range.start..range.end.min(removed.start);
                    let after = range.start.max(removed.end)..range.end;
                    [before, after]
                })
                .filter(|range| range.start < range.end)
                .collect();
        }

        Self { inner }
    }

    /// Keep only the parts of this schedule that are inside given range.
    pub(crate) fn clip(self, bounds: Range<ExtendedTime>) -> Self {
        let inner = self
            .inner
            .into_iter()
            .filter_map(|range| range_intersection(range, bounds.clone()))
            .collect();

        Self { inner }
    }

    /// Periods of this schedule that belong to the following day, shifted
    /// back to be relative to the following day.
    pub(crate) fn next_day_tail(&self) -> Self {
        let inner = self
            .inner
            .iter()
            .filter_map(|range| range_intersection(range.clone(), NEXT_DAY))
            .map(|range| {
                let shift = |time: ExtendedTime| {
                    ExtendedTime::from_mins_from_midnight(time.mins_from_midnight() - 24 * 60)
                        .unwrap_or(ExtendedTime::MIDNIGHT_00)
                };

                shift(range.start)..shift(range.end)
            })
            .collect();

        Self { inner }
    }

    /// Restrict to the current day, from *00:00* to *24:00*.
    pub(crate) fn within_day(self) -> Self {
        self.clip(WHOLE_DAY)
    }

    /// Check if given time is inside one of the periods.
    ///
    /// ```
    /// use osm_opening_hours::schedule;
    /// use osm_opening_hours_syntax::ExtendedTime;
    ///
    /// let sch = schedule! { 10,00 => 12,00 };
    /// assert!(sch.contains(ExtendedTime::new(10, 0).unwrap()));
    /// assert!(!sch.contains(ExtendedTime::new(12, 0).unwrap()));
    /// ```
    pub fn contains(&self, time: ExtendedTime) -> bool {
        self.inner.iter().any(|range| range.contains(&time))
    }

    /// Check if the schedule is open at the first minute of the day.
    pub fn starts_open(&self) -> bool {
        self.inner
            .first()
            .map(|range| range.start == ExtendedTime::MIDNIGHT_00)
            .unwrap_or(false)
    }

    /// Check if the schedule is still open at the end of the day.
    pub fn ends_open(&self) -> bool {
        self.inner
            .last()
            .map(|range| range.end >= ExtendedTime::MIDNIGHT_24)
            .unwrap_or(false)
    }

    /// Ordered times at which the state changes during the day, midnights
    /// excluded.
    pub(crate) fn inner_boundaries(&self) -> impl Iterator<Item = ExtendedTime> + '_ {
        self.inner
            .iter()
            .flat_map(|range| [range.start, range.end])
            .filter(|time| *time != ExtendedTime::MIDNIGHT_00 && *time != ExtendedTime::MIDNIGHT_24)
    }
}

impl IntoIterator for Schedule {
    type Item = Range<ExtendedTime>;
    type IntoIter = std::vec::IntoIter<Range<ExtendedTime>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// Macro that allows to quickly create a schedule.
///
/// ## Syntax
///
/// Each opening period is written `{hour},{minutes} => {hour},{minutes}` and
/// periods are separated by semicolons.
///
/// ```
/// let schedule = osm_opening_hours::schedule! {
///      9,00 => 12,00;
///     14,00 => 18,00;
///     22,00 => 26,00;
/// };
///
/// assert_eq!(schedule.ranges().len(), 3);
/// ```
#[macro_export]
macro_rules! schedule {
    (
        $( $hh1:expr,$mm1:expr => $hh2:expr,$mm2:expr );*
        $( ; )?
    ) => {{
        #[allow(unused_imports)]
        use $crate::schedule::Schedule;

        #[allow(unused_imports)]
        use osm_opening_hours_syntax::ExtendedTime;

        Schedule::from_ranges([
            $(
                ExtendedTime::new($hh1, $mm1).expect("Invalid interval start")
                    ..ExtendedTime::new($hh2, $mm2).expect("Invalid interval end")
            ),*
        ])
    }};
}
