use std::fmt::Display;
use std::ops::RangeInclusive;

use chrono::prelude::Datelike;

// Reexport Weekday from chrono as part of the public type.
pub use chrono::Weekday;

use crate::display::{write_group, write_selector};

/// Two-letters abbreviations of weekdays, starting on monday.
const WEEKDAY_NAMES: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Mo"),
    (Weekday::Tue, "Tu"),
    (Weekday::Wed, "We"),
    (Weekday::Thu, "Th"),
    (Weekday::Fri, "Fr"),
    (Weekday::Sat, "Sa"),
    (Weekday::Sun, "Su"),
];

fn wday_str(wday: Weekday) -> &'static str {
    WEEKDAY_NAMES[wday.num_days_from_monday() as usize].1
}

/// Read the abbreviation of a weekday, as written in opening hours fields.
pub fn weekday_from_str(name: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .find(|(_, abbreviation)| *abbreviation == name)
        .map(|(wday, _)| *wday)
}

// DaySelector

/// Conjunction of date predicates, an empty list of ranges matches any date.
///
/// Each list is a union: `Sa,Su` matches both saturdays and sundays. The
/// special case of holidays written before weekdays with a space (`SH Mo-Fr`)
/// is stored in `holiday` and is intersected with the weekday ranges.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct DaySelector {
    pub year: Vec<YearRange>,
    pub monthday: Vec<MonthdayRange>,
    pub week: Vec<WeekRange>,
    pub weekday: Vec<WeekDayRange>,
    pub holiday: Vec<HolidayKind>,
}

impl DaySelector {
    /// Return `true` if there is no date filter in this expression.
    pub fn is_empty(&self) -> bool {
        self.year.is_empty()
            && self.monthday.is_empty()
            && self.week.is_empty()
            && self.weekday.is_empty()
            && self.holiday.is_empty()
    }

    /// Return `true` if this selector matches any date, which can be the case
    /// for non-empty selectors such as `Mo-Su`.
    pub fn is_every_day(&self) -> bool {
        if !(self.year.is_empty()
            && self.monthday.is_empty()
            && self.week.is_empty()
            && self.holiday.is_empty())
        {
            return false;
        }

        if self.weekday.is_empty() {
            return true;
        }

        (0..7).all(|day| {
            self.weekday.iter().any(|range| match range {
                WeekDayRange::Fixed { range } => {
                    let start = range.start().num_days_from_monday();
                    let end = range.end().num_days_from_monday();

                    if start <= end {
                        (start..=end).contains(&day)
                    } else {
                        day >= start || day <= end
                    }
                }
                WeekDayRange::Holiday { .. } => false,
            })
        })
    }

    /// Check if given kind of holiday is explicitly referenced.
    pub fn mentions_holiday(&self, kind: HolidayKind) -> bool {
        self.holiday.contains(&kind)
            || self
                .weekday
                .iter()
                .any(|range| *range == WeekDayRange::Holiday { kind })
    }
}

impl Display for DaySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut is_first = true;
        is_first &= !write_group(f, &self.year, "", is_first)?;
        is_first &= !write_group(f, &self.monthday, "", is_first)?;
        is_first &= !write_group(f, &self.week, "week ", is_first)?;
        is_first &= !write_group(f, &self.holiday, "", is_first)?;
        write_group(f, &self.weekday, "", is_first)?;
        Ok(())
    }
}

// YearRange

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct YearRange {
    pub range: RangeInclusive<u16>,
    pub step: u16,
}

impl Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.range.start())?;

        if self.range.start() != self.range.end() {
            write!(f, "-{}", self.range.end())?;
        }

        if self.step != 1 {
            write!(f, "/{}", self.step)?;
        }

        Ok(())
    }
}

// MonthdayRange

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum MonthdayRange {
    Month {
        range: RangeInclusive<Month>,
        year: Option<u16>,
    },
    Date {
        start: Date,
        end: Date,
    },
}

impl Display for MonthdayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Month { range, year } => {
                if let Some(year) = year {
                    write!(f, "{year} ")?;
                }

                write!(f, "{}", range.start())?;

                if range.start() != range.end() {
                    write!(f, "-{}", range.end())?;
                }
            }
            Self::Date { start, end } => {
                write!(f, "{start}")?;

                if start != end {
                    write!(f, "-{end}")?;
                }
            }
        }

        Ok(())
    }
}

// Date

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Date {
    Fixed {
        year: Option<u16>,
        month: Month,
        day: u8,
    },
    Easter {
        year: Option<u16>,
    },
}

impl Date {
    #[inline]
    pub fn ymd(day: u8, month: Month, year: u16) -> Self {
        Self::Fixed { day, month, year: Some(year) }
    }

    #[inline]
    pub fn md(day: u8, month: Month) -> Self {
        Self::Fixed { day, month, year: None }
    }

    #[inline]
    pub fn year(&self) -> Option<u16> {
        match self {
            Self::Fixed { year, .. } | Self::Easter { year } => *year,
        }
    }

    #[inline]
    pub fn has_year(&self) -> bool {
        self.year().is_some()
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(year) = self.year() {
            write!(f, "{year} ")?;
        }

        match self {
            Date::Fixed { month, day, .. } => write!(f, "{month} {day:02}"),
            Date::Easter { .. } => write!(f, "easter"),
        }
    }
}

// WeekDayRange

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum WeekDayRange {
    Fixed { range: RangeInclusive<Weekday> },
    Holiday { kind: HolidayKind },
}

impl Display for WeekDayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed { range } => {
                write!(f, "{}", wday_str(*range.start()))?;

                if range.start() != range.end() {
                    write!(f, "-{}", wday_str(*range.end()))?;
                }

                Ok(())
            }
            Self::Holiday { kind } => write!(f, "{kind}"),
        }
    }
}

// HolidayKind

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum HolidayKind {
    Public,
    School,
}

impl Display for HolidayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "PH"),
            Self::School => write!(f, "SH"),
        }
    }
}

// WeekRange

/// A range of ISO week numbers, which may wrap around the end of the year.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct WeekRange {
    pub range: RangeInclusive<u8>,
    pub step: u8,
}

impl Display for WeekRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.range.start())?;

        if self.range.start() != self.range.end() {
            write!(f, "-{:02}", self.range.end())?;
        }

        if self.step != 1 {
            write!(f, "/{}", self.step)?;
        }

        Ok(())
    }
}

// Month

#[derive(Copy, Clone, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl Month {
    pub const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    #[inline]
    pub fn next(self) -> Self {
        Self::ALL[usize::from(self as u8) % 12]
    }

    /// Extract a month from a [`chrono::Datelike`].
    #[inline]
    pub fn from_date(date: impl Datelike) -> Self {
        // Datelike::month0 is always in 0..12
        Self::ALL[date.month0() as usize]
    }

    /// Three-letters abbreviation used in opening hours fields.
    #[inline]
    pub fn as_str(self) -> &'static str {
        const NAMES: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];

        NAMES[usize::from(self as u8) - 1]
    }

    /// Read a three-letters abbreviation, see [`Month::as_str`].
    pub fn from_abbreviation(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|month| month.as_str() == name)
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Month> for u32 {
    fn from(val: Month) -> Self {
        val as _
    }
}
