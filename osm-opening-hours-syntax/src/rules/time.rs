use std::fmt::Display;

use crate::extended_time::ExtendedTime;

// SolarEvent

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum SolarEvent {
    Dawn,
    Sunrise,
    Sunset,
    Dusk,
}

impl SolarEvent {
    pub const ALL: [Self; 4] = [Self::Dawn, Self::Sunrise, Self::Sunset, Self::Dusk];

    /// The keyword used for this event in opening hours fields.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
            Self::Dusk => "dusk",
        }
    }

    #[inline]
    pub fn flag(self) -> SolarEvents {
        match self {
            Self::Dawn => SolarEvents::DAWN,
            Self::Sunrise => SolarEvents::SUNRISE,
            Self::Sunset => SolarEvents::SUNSET,
            Self::Dusk => SolarEvents::DUSK,
        }
    }
}

impl Display for SolarEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// SolarEvents

bitflags::bitflags! {
    /// Set of solar events referenced by an expression.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct SolarEvents: u8 {
        const DAWN    = 1 << 0;
        const SUNRISE = 1 << 1;
        const SUNSET  = 1 << 2;
        const DUSK    = 1 << 3;
    }
}

// Moment

/// A boundary of a time span: either a plain clock value or a solar event
/// shifted by a signed number of minutes.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Moment {
    Clock(ExtendedTime),
    Solar { event: SolarEvent, offset: i16 },
}

impl Moment {
    #[inline]
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Solar { .. })
    }

    #[inline]
    pub fn solar_events(&self) -> SolarEvents {
        match self {
            Self::Clock(_) => SolarEvents::empty(),
            Self::Solar { event, .. } => event.flag(),
        }
    }
}

impl Display for Moment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clock(time) => write!(f, "{time}"),
            Self::Solar { event, offset: 0 } => write!(f, "{event}"),
            Self::Solar { event, offset } => {
                let sign = if *offset < 0 { '-' } else { '+' };
                let abs = offset.unsigned_abs();
                write!(f, "({event}{sign}{:02}:{:02})", abs / 60, abs % 60)
            }
        }
    }
}

// TimeSpan

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TimeSpan {
    pub beginning: Moment,
    pub end: Moment,
}

impl TimeSpan {
    #[inline]
    pub const fn fixed(start: ExtendedTime, end: ExtendedTime) -> Self {
        Self { beginning: Moment::Clock(start), end: Moment::Clock(end) }
    }

    /// The span covering a whole day, *00:00-24:00*.
    #[inline]
    pub const fn full_day() -> Self {
        Self::fixed(ExtendedTime::MIDNIGHT_00, ExtendedTime::MIDNIGHT_24)
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        self.beginning.is_variable() || self.end.is_variable()
    }

    #[inline]
    pub fn solar_events(&self) -> SolarEvents {
        self.beginning.solar_events() | self.end.solar_events()
    }
}

impl Display for TimeSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.beginning, self.end)
    }
}
