use std::fmt::{Debug, Display};

use chrono::{NaiveTime, Timelike};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A clock value measured in minutes from the beginning of a day, that can go
/// up to 48h so that a span may end on the following day.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExtendedTime {
    mins: u16,
}

impl ExtendedTime {
    /// The first minute of the day.
    pub const MIDNIGHT_00: Self = Self { mins: 0 };

    /// The end of the day, or the first minute of the next day.
    pub const MIDNIGHT_24: Self = Self { mins: MINUTES_PER_DAY };

    /// The end of the next day, which is the largest value representable.
    pub const MIDNIGHT_48: Self = Self { mins: 2 * MINUTES_PER_DAY };

    /// Create a new extended time, this may return `None` if input values are
    /// out of range.
    ///
    /// ```
    /// use osm_opening_hours_syntax::ExtendedTime;
    ///
    /// assert!(ExtendedTime::new(28, 30).is_some());
    /// assert!(ExtendedTime::new(72, 15).is_none()); // hours are out of bound
    /// assert!(ExtendedTime::new(24, 60).is_none()); // minutes are out of bound
    /// ```
    #[inline]
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 48 || minute > 59 || (hour == 48 && minute > 0) {
            None
        } else {
            Some(Self { mins: hour as u16 * 60 + minute as u16 })
        }
    }

    /// Get the number of full hours in this extended time.
    ///
    /// ```
    /// use osm_opening_hours_syntax::ExtendedTime;
    ///
    /// let time = ExtendedTime::new(27, 35).unwrap();
    /// assert_eq!(time.hour(), 27);
    /// ```
    #[inline]
    pub const fn hour(self) -> u8 {
        (self.mins / 60) as u8
    }

    /// Get the number of remaining minutes in this extended time.
    #[inline]
    pub const fn minute(self) -> u8 {
        (self.mins % 60) as u8
    }

    /// Get the total number of minutes from *00:00*.
    #[inline]
    pub const fn mins_from_midnight(self) -> u16 {
        self.mins
    }

    /// Build an extended time from the total number of minutes from midnight
    /// and return `None` if the result is out of bounds.
    ///
    /// ```
    /// use osm_opening_hours_syntax::ExtendedTime;
    ///
    /// assert_eq!(
    ///     ExtendedTime::from_mins_from_midnight(26 * 60 + 15),
    ///     ExtendedTime::new(26, 15),
    /// );
    ///
    /// assert!(ExtendedTime::from_mins_from_midnight(65_000).is_none());
    /// ```
    #[inline]
    pub const fn from_mins_from_midnight(mins: u16) -> Option<Self> {
        if mins > 2 * MINUTES_PER_DAY {
            None
        } else {
            Some(Self { mins })
        }
    }

    /// Add a signed number of minutes and return `None` if this results in
    /// the time being out of bounds.
    ///
    /// ```
    /// use osm_opening_hours_syntax::ExtendedTime;
    ///
    /// let time = ExtendedTime::new(24, 0).unwrap();
    /// assert_eq!(time.add_minutes(75), ExtendedTime::new(25, 15));
    /// assert!(time.add_minutes(24 * 60 + 1).is_none());
    /// assert!(time.add_minutes(-24 * 60 - 1).is_none());
    /// ```
    #[inline]
    pub fn add_minutes(self, minutes: i16) -> Option<Self> {
        let mins = i32::from(self.mins) + i32::from(minutes);
        Self::from_mins_from_midnight(u16::try_from(mins).ok()?)
    }

    /// Same as [`ExtendedTime::add_minutes`] but saturates at *00:00* and
    /// *48:00* instead of failing.
    #[inline]
    pub fn saturating_add_minutes(self, minutes: i16) -> Self {
        let mins = (i32::from(self.mins) + i32::from(minutes)).clamp(0, 2 * 1440);
        Self { mins: mins as u16 }
    }

    /// Check if this time belongs to the following day.
    #[inline]
    pub fn is_next_day(self) -> bool {
        self >= Self::MIDNIGHT_24
    }

    /// Convert to a clock time, which is only possible before *24:00*.
    ///
    /// ```
    /// use chrono::NaiveTime;
    /// use osm_opening_hours_syntax::ExtendedTime;
    ///
    /// assert_eq!(
    ///     ExtendedTime::new(9, 30).unwrap().as_naive_time(),
    ///     NaiveTime::from_hms_opt(9, 30, 0),
    /// );
    ///
    /// assert!(ExtendedTime::MIDNIGHT_24.as_naive_time().is_none());
    /// ```
    #[inline]
    pub fn as_naive_time(self) -> Option<NaiveTime> {
        if self.is_next_day() {
            return None;
        }

        NaiveTime::from_hms_opt(self.hour().into(), self.minute().into(), 0)
    }
}

impl Display for ExtendedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Debug for ExtendedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{self}")
    }
}

impl From<NaiveTime> for ExtendedTime {
    /// Seconds are truncated.
    #[inline]
    fn from(time: NaiveTime) -> ExtendedTime {
        // A NaiveTime is always below 24:00, the cast can't overflow.
        Self { mins: (time.hour() * 60 + time.minute()) as u16 }
    }
}
