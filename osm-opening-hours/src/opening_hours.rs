use std::borrow::Cow;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use osm_opening_hours_syntax::rules::day::HolidayKind;
use osm_opening_hours_syntax::rules::{Field, Rule, RuleKind};

use crate::context::Context;
use crate::date_filter::DateFilter;
use crate::error::{NextChangeError, NextChangeRecursionError, ParserError, SolarHoursError};
use crate::localization::{Almanac, Location};
use crate::periods::{Boundary, DateTimeRange, OpeningPeriods};
use crate::schedule::Schedule;
use crate::solar::SolarHours;
use crate::time_filter::{may_end_next_day, TimeFilter};
use crate::utils::dates::{datetime_at, end_of_day};

/// Number of days [`OpeningHours::next_change`] is usually allowed to look
/// ahead when the state doesn't change at midnight.
pub const DEFAULT_MAX_RECURSION: u32 = 31;

// OpeningHours

/// A parsed opening hours expression and its evaluation context.
///
/// The parsed field is immutable and wrapped by an `Arc`, the only state
/// owned by an instance is its cache of solar hours. This is the reason why
/// evaluation methods take `&mut self`: clone the value to evaluate it from
/// several threads.
#[derive(Clone, Debug)]
pub struct OpeningHours {
    /// Rules describing opening hours
    field: Arc<Field>,
    /// Evaluation context
    pub(crate) ctx: Context,
    solar: SolarHours,
}

impl OpeningHours {
    /// Sanitize and parse a raw opening hours expression.
    ///
    /// ```
    /// use osm_opening_hours::OpeningHours;
    ///
    /// assert!(OpeningHours::parse("24/7 open").is_ok());
    /// assert!(OpeningHours::parse("mo-fr 10h-18h").is_ok());
    /// assert!(OpeningHours::parse("Mo-Fr 25:00-26:00").is_err());
    /// ```
    pub fn parse(raw_oh: &str) -> Result<Self, ParserError> {
        let field = osm_opening_hours_syntax::parse_raw(raw_oh)?;
        Ok(Self::from_field(field))
    }

    pub fn from_field(field: Field) -> Self {
        Self {
            field: Arc::new(field),
            ctx: Context::default(),
            solar: SolarHours::default(),
        }
    }

    // --
    // -- Builder Methods
    // --

    /// Set a new evaluation context for this expression.
    ///
    /// ```
    /// use osm_opening_hours::{Context, OpeningHours};
    ///
    /// let oh = OpeningHours::parse("Mo-Fr open")
    ///     .unwrap()
    ///     .with_context(Context::default());
    /// ```
    pub fn with_context(self, ctx: Context) -> Self {
        Self { ctx, ..self }
    }

    /// Compute solar events from the position of a place.
    pub fn with_location(mut self, location: Location) -> Self {
        self.solar.set_location(Some(location));
        self
    }

    /// Replace the almanac used to compute solar events.
    pub fn with_almanac(self, almanac: Arc<dyn Almanac>) -> Self {
        Self { solar: self.solar.with_almanac(almanac), ..self }
    }

    // --
    // -- Accessors
    // --

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn solar_hours(&self) -> &SolarHours {
        &self.solar
    }

    /// Access the solar hours cache, for example to override the solar hours
    /// of some dates.
    pub fn solar_hours_mut(&mut self) -> &mut SolarHours {
        &mut self.solar
    }

    /// Run `f` with solar events computed for another location. The solar
    /// hours configured on this expression, overrides and cache included, are
    /// restored before this returns, even if `f` panics.
    ///
    /// ```
    /// use osm_opening_hours::localization::{Coordinates, Location};
    /// use osm_opening_hours::OpeningHours;
    ///
    /// let paris = Location::new(Coordinates::new(48.8535, 2.34839).unwrap(), chrono_tz::Europe::Paris);
    /// let mut oh = OpeningHours::parse("sunrise-sunset").unwrap();
    /// let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
    ///
    /// let schedule = oh.with_temporary_location(paris, |oh| oh.schedule_at(date));
    /// assert_eq!(schedule.unwrap().ranges().len(), 1);
    /// assert!(oh.solar_hours().location().is_none());
    /// ```
    pub fn with_temporary_location<R>(
        &mut self,
        location: Location,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let saved = self.solar.replace_with_location(location);
        let result = panic::catch_unwind(AssertUnwindSafe(|| f(self)));
        self.solar = saved;

        match result {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    // --
    // -- Low level implementations.
    // --

    fn check_solar(&self) -> Result<(), SolarHoursError> {
        if !self.field.needs_solar().is_empty() && !self.solar.is_configured() {
            return Err(SolarHoursError::NotConfigured);
        }

        Ok(())
    }

    /// Schedule built by the rules matching a date, which may extend on the
    /// following day. The returned flag is `false` if the rules close the
    /// whole date, including periods coming from the previous day.
    ///
    /// With `tail_only`, spans that end before midnight are ignored.
    fn own_schedule(
        &mut self,
        date: NaiveDate,
        tail_only: bool,
    ) -> Result<(Schedule, bool), SolarHoursError> {
        let field = self.field.clone();
        let matching = MatchingRules::at(&field, &self.ctx, date);
        let mut schedule = Schedule::new();
        let mut keeps_previous_day = true;

        if let Some(rule) = matching.governing {
            match rule.kind {
                RuleKind::Open => schedule = resolve_rule(&mut self.solar, rule, date, tail_only)?,
                RuleKind::Closed | RuleKind::Comment => keeps_previous_day = false,
            }
        }

        for rule in matching.additional {
            match rule.kind {
                RuleKind::Open => {
                    let ranges = resolve_rule(&mut self.solar, rule, date, tail_only)?;
                    schedule = schedule.addition(ranges);
                }
                RuleKind::Closed if rule.spans.is_empty() => {
                    schedule = Schedule::new();
                    keeps_previous_day = false;
                }
                RuleKind::Closed => {
                    let ranges = resolve_rule(&mut self.solar, rule, date, tail_only)?;
                    schedule = schedule.subtract(ranges);
                }
                RuleKind::Comment => {}
            }
        }

        Ok((schedule, keeps_previous_day))
    }

    // --
    // -- High level implementations / Syntactic sugar
    // --

    /// Get the rule that decides of the state at a given date: the last
    /// matching rule that is not additional, or an implicit closed rule.
    ///
    /// ```
    /// use osm_opening_hours::{OpeningHours, RuleKind};
    ///
    /// let oh = OpeningHours::parse("Mo-Fr 10:00-18:00; Su off").unwrap();
    /// let sunday = chrono::NaiveDate::from_ymd_opt(2024, 6, 23).unwrap();
    /// let saturday = chrono::NaiveDate::from_ymd_opt(2024, 6, 22).unwrap();
    /// assert_eq!(oh.rule_for(sunday).to_string(), "Su off");
    /// assert_eq!(oh.rule_for(saturday).kind, RuleKind::Closed);
    /// ```
    pub fn rule_for(&self, date: NaiveDate) -> Cow<'_, Rule> {
        let matching = MatchingRules::at(&self.field, &self.ctx, date);

        match matching.governing.or(matching.additional.first().copied()) {
            Some(rule) => Cow::Borrowed(rule),
            None => Cow::Owned(Rule::closed()),
        }
    }

    /// Get the opening periods of a day, including the end of overnight
    /// periods that started on the previous day.
    ///
    /// ```
    /// use osm_opening_hours::{schedule, OpeningHours};
    ///
    /// let mut oh = OpeningHours::parse("Mo-Fr 20:00-02:00").unwrap();
    /// let tuesday = chrono::NaiveDate::from_ymd_opt(2024, 6, 18).unwrap();
    ///
    /// assert_eq!(
    ///     oh.schedule_at(tuesday).unwrap(),
    ///     schedule! { 0,00 => 2,00; 20,00 => 24,00 },
    /// );
    /// ```
    pub fn schedule_at(&mut self, date: NaiveDate) -> Result<Schedule, SolarHoursError> {
        self.check_solar()?;
        let (own, keeps_previous_day) = self.own_schedule(date, false)?;
        let mut schedule = own.within_day();

        if keeps_previous_day {
            if let Some(prev_date) = date.pred_opt() {
                let (prev_own, _) = self.own_schedule(prev_date, true)?;
                schedule = schedule.addition(prev_own.next_day_tail());
            }
        }

        Ok(schedule)
    }

    /// Check if this is open at a given time.
    ///
    /// ```
    /// use chrono::NaiveDateTime;
    /// use osm_opening_hours::OpeningHours;
    ///
    /// let mut oh = OpeningHours::parse("12:00-18:00 open, 18:00-20:00 unknown").unwrap();
    /// let date_1 = NaiveDateTime::parse_from_str("2024-11-18 15:00", "%Y-%m-%d %H:%M").unwrap();
    /// let date_2 = NaiveDateTime::parse_from_str("2024-11-18 19:00", "%Y-%m-%d %H:%M").unwrap();
    /// assert!(oh.is_open(date_1).unwrap());
    /// assert!(!oh.is_open(date_2).unwrap());
    /// ```
    pub fn is_open(&mut self, current_time: NaiveDateTime) -> Result<bool, SolarHoursError> {
        if self.field.is_24_7() {
            return Ok(true);
        }

        let schedule = self.schedule_at(current_time.date())?;
        Ok(schedule.contains(current_time.time().into()))
    }

    /// Check if this is closed at a given time.
    pub fn is_closed(&mut self, current_time: NaiveDateTime) -> Result<bool, SolarHoursError> {
        self.is_open(current_time).map(|open| !open)
    }

    /// Get the next time where the state will change.
    ///
    /// When the state stays the same until midnight, the following days are
    /// examined, up to `max_recursion` more days. With `max_recursion` set to
    /// zero, the search stops at the end of the current day, which is
    /// returned if the state doesn't change before.
    ///
    /// ```
    /// use chrono::NaiveDateTime;
    /// use osm_opening_hours::{OpeningHours, DEFAULT_MAX_RECURSION};
    ///
    /// let mut oh = OpeningHours::parse("Mo-Fr 10:00-18:00").unwrap();
    /// let friday = NaiveDateTime::parse_from_str("2024-11-22 19:00", "%Y-%m-%d %H:%M").unwrap();
    /// let monday = NaiveDateTime::parse_from_str("2024-11-25 10:00", "%Y-%m-%d %H:%M").unwrap();
    /// assert_eq!(oh.next_change(friday, DEFAULT_MAX_RECURSION).unwrap(), monday);
    /// ```
    pub fn next_change(
        &mut self,
        current_time: NaiveDateTime,
        max_recursion: u32,
    ) -> Result<NaiveDateTime, NextChangeError> {
        if self.field.is_24_7() {
            let last = end_of_day(current_time.date());

            return if max_recursion == 0 {
                Ok(last)
            } else {
                Err(NextChangeRecursionError { last }.into())
            };
        }

        let mut date = current_time.date();
        let mut schedule = self.schedule_at(date)?;
        let mut budget = max_recursion;

        loop {
            let change = schedule
                .inner_boundaries()
                .filter_map(|time| datetime_at(date, time))
                .find(|change| *change > current_time);

            if let Some(change) = change {
                return Ok(change);
            }

            let last = end_of_day(date);

            let Some(next_date) = date.succ_opt() else {
                return Err(NextChangeRecursionError { last }.into());
            };

            let next_schedule = self.schedule_at(next_date)?;

            if schedule.ends_open() != next_schedule.starts_open() {
                return Ok(next_date.and_time(NaiveTime::MIN));
            }

            if max_recursion == 0 {
                return Ok(last);
            }

            if budget == 0 {
                #[cfg(feature = "log")]
                log::debug!(
                    from = current_time.to_string().as_str(), max_recursion = max_recursion;
                    "No change found before {last}"
                );

                return Err(NextChangeRecursionError { last }.into());
            }

            budget -= 1;
            date = next_date;
            schedule = next_schedule;
        }
    }

    /// Get the duration until the state changes, see
    /// [`OpeningHours::next_change`].
    pub fn time_before_next_change(
        &mut self,
        current_time: NaiveDateTime,
        max_recursion: u32,
    ) -> Result<TimeDelta, NextChangeError> {
        let next_change = self.next_change(current_time, max_recursion)?;
        Ok(next_change - current_time)
    }

    /// Get the opening periods of a date.
    pub fn day(&mut self, date: NaiveDate) -> Result<Day, SolarHoursError> {
        let periods = self
            .schedule_at(date)?
            .into_iter()
            .filter_map(|range| {
                let start = datetime_at(date, range.start)?;
                let end = datetime_at(date, range.end)?;
                Some(DateTimeRange::new(start, end))
            })
            .collect();

        Ok(Day {
            date,
            periods,
            is_public_holiday: self.ctx.holidays.get_public().contains(date),
            is_school_holiday: self.ctx.holidays.get_school().contains(date),
        })
    }

    /// Check if the expression opens during holidays. This is only decided by
    /// the last rule that mentions each kind of holidays.
    ///
    /// ```
    /// use osm_opening_hours::OpeningHours;
    ///
    /// let status = OpeningHours::parse("Mo-Sa 09:00-19:00; PH off").unwrap().holidays_status();
    /// assert_eq!(status.public, Some(false));
    /// assert_eq!(status.school, None);
    /// ```
    pub fn holidays_status(&self) -> HolidaysStatus {
        let status = |kind| {
            self.field
                .rules()
                .iter()
                .rev()
                .find(|rule| rule.selector.mentions_holiday(kind))
                .map(|rule| rule.kind == RuleKind::Open)
        };

        HolidaysStatus {
            public: status(HolidayKind::Public),
            school: status(HolidayKind::School),
        }
    }

    /// Iterate over opening periods from `start` to `end`, which are both
    /// included. When `merge` is set, periods that follow each other with no
    /// gap are merged.
    pub fn iter_periods(
        &mut self,
        start: impl Into<Boundary>,
        end: impl Into<Boundary>,
        merge: bool,
    ) -> OpeningPeriods<'_> {
        OpeningPeriods::new(self, start.into(), end.into(), merge)
    }

    /// Collect opening periods from `start` to `end`, see
    /// [`OpeningHours::iter_periods`].
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use osm_opening_hours::OpeningHours;
    ///
    /// let mut oh = OpeningHours::parse("24/7").unwrap();
    /// let start = NaiveDate::from_ymd_opt(2024, 6, 17).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 6, 19).unwrap();
    /// assert_eq!(oh.opening_periods_between(start, end, false).unwrap().len(), 3);
    /// assert_eq!(oh.opening_periods_between(start, end, true).unwrap().len(), 1);
    /// ```
    pub fn opening_periods_between(
        &mut self,
        start: impl Into<Boundary>,
        end: impl Into<Boundary>,
        merge: bool,
    ) -> Result<Vec<DateTimeRange>, SolarHoursError> {
        self.iter_periods(start, end, merge).collect()
    }
}

impl FromStr for OpeningHours {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for OpeningHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field)
    }
}

fn resolve_rule(
    solar: &mut SolarHours,
    rule: &Rule,
    date: NaiveDate,
    tail_only: bool,
) -> Result<Schedule, SolarHoursError> {
    let ranges = {
        if tail_only {
            let spans: Vec<_> = rule.spans.iter().copied().filter(may_end_next_day).collect();
            spans.as_naive(solar, date)?
        } else {
            rule.spans.as_naive(solar, date)?
        }
    };

    Ok(Schedule::from_ranges(ranges))
}

// MatchingRules

/// Rules of a field that match a date.
struct MatchingRules<'f> {
    /// Last matching rule that is not additional
    governing: Option<&'f Rule>,
    /// Matching additional rules that follow the governing rule
    additional: Vec<&'f Rule>,
}

impl<'f> MatchingRules<'f> {
    fn at(field: &'f Field, ctx: &Context, date: NaiveDate) -> Self {
        let mut governing = None;
        let mut additional = Vec::new();

        for rule in field.rules() {
            if !rule.selector.filter(date, ctx) {
                continue;
            }

            if rule.additional {
                additional.push(rule);
            } else {
                governing = Some(rule);
                additional.clear();
            }
        }

        Self { governing, additional }
    }
}

// Day

/// Opening periods of a single date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Day {
    pub date: NaiveDate,
    pub periods: Vec<DateTimeRange>,
    pub is_public_holiday: bool,
    pub is_school_holiday: bool,
}

impl Day {
    pub fn opens(&self) -> bool {
        !self.periods.is_empty()
    }

    /// Total duration of opening periods during this day.
    pub fn total_duration(&self) -> TimeDelta {
        self.periods
            .iter()
            .map(DateTimeRange::duration)
            .fold(TimeDelta::zero(), |acc, duration| acc + duration)
    }
}

// HolidaysStatus

/// Opening state during holidays, `None` when an expression doesn't mention
/// a kind of holidays.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct HolidaysStatus {
    pub public: Option<bool>,
    pub school: Option<bool>,
}
