use chrono::prelude::Datelike;
use chrono::NaiveDate;

use osm_opening_hours_syntax::rules::day::{self as ds, Month};

use crate::context::{Context, HolidayCalendar};
use crate::utils::dates::{easter, first_valid_ymd, iso_weeks_in_year};
use crate::utils::range::WrappingRange;

/// Generic trait to specify the behavior of a selector over dates.
pub trait DateFilter {
    fn filter(&self, date: NaiveDate, ctx: &Context) -> bool;
}

impl<T: DateFilter> DateFilter for [T] {
    fn filter(&self, date: NaiveDate, ctx: &Context) -> bool {
        self.is_empty() || self.iter().any(|x| x.filter(date, ctx))
    }
}

impl DateFilter for ds::DaySelector {
    fn filter(&self, date: NaiveDate, ctx: &Context) -> bool {
        self.year.filter(date, ctx)
            && self.monthday.filter(date, ctx)
            && self.week.filter(date, ctx)
            && self.weekday.filter(date, ctx)
            && self.holiday.filter(date, ctx)
    }
}

fn calendar(ctx: &Context, kind: ds::HolidayKind) -> &dyn HolidayCalendar {
    match kind {
        ds::HolidayKind::Public => ctx.holidays.get_public(),
        ds::HolidayKind::School => ctx.holidays.get_school(),
    }
}

impl DateFilter for ds::HolidayKind {
    fn filter(&self, date: NaiveDate, ctx: &Context) -> bool {
        calendar(ctx, *self).contains(date)
    }
}

impl DateFilter for ds::YearRange {
    fn filter(&self, date: NaiveDate, _ctx: &Context) -> bool {
        let Ok(year) = date.year().try_into() else {
            return false;
        };

        self.range.contains(&year) && (year - self.range.start()) % self.step == 0
    }
}

/// Project a date of the selector on a given year.
fn date_on_year(date: ds::Date, for_year: i32) -> Option<NaiveDate> {
    match date {
        ds::Date::Easter { year } => easter(year.map(Into::into).unwrap_or(for_year)),
        ds::Date::Fixed { year, month, day } => first_valid_ymd(
            year.map(Into::into).unwrap_or(for_year),
            month.into(),
            day.into(),
        ),
    }
}

impl DateFilter for ds::MonthdayRange {
    fn filter(&self, date: NaiveDate, _ctx: &Context) -> bool {
        let in_month = Month::from_date(date);

        match self {
            ds::MonthdayRange::Month { year: None, range } => range.wrapping_contains(&in_month),
            ds::MonthdayRange::Month { year: Some(year), range } => {
                let year = i32::from(*year);

                if range.start() <= range.end() {
                    date.year() == year && range.contains(&in_month)
                } else {
                    // The range overflows on the following year
                    (date.year() == year && in_month >= *range.start())
                        || (date.year() == year + 1 && in_month <= *range.end())
                }
            }
            ds::MonthdayRange::Date { start, end } => {
                let candidate_years = match start.year().or(end.year()) {
                    Some(year) => {
                        let year = i32::from(year);
                        year..=year
                    }
                    None => date.year() - 1..=date.year(),
                };

                candidate_years.into_iter().any(|year| {
                    let Some(start) = date_on_year(*start, year) else {
                        return false;
                    };

                    let end = date_on_year(*end, year).and_then(|candidate| {
                        if candidate < start && !end.has_year() {
                            date_on_year(*end, year + 1)
                        } else {
                            Some(candidate)
                        }
                    });

                    end.map(|end| (start..=end).contains(&date))
                        .unwrap_or(false)
                })
            }
        }
    }
}

impl DateFilter for ds::WeekDayRange {
    fn filter(&self, date: NaiveDate, ctx: &Context) -> bool {
        match self {
            ds::WeekDayRange::Fixed { range } => {
                let range_u32 = range.start().num_days_from_monday()..=range.end().num_days_from_monday();
                range_u32.wrapping_contains(&date.weekday().num_days_from_monday())
            }
            ds::WeekDayRange::Holiday { kind } => kind.filter(date, ctx),
        }
    }
}

impl DateFilter for ds::WeekRange {
    fn filter(&self, date: NaiveDate, _ctx: &Context) -> bool {
        let iso_week = date.iso_week();
        let week = iso_week.week() as u8;
        let start = *self.range.start();

        // Steps keep counting from the first week when the range wraps around
        // the end of the year.
        let weeks_since_start = {
            if week >= start {
                u16::from(week - start)
            } else {
                let weeks_last_year = iso_weeks_in_year(iso_week.year() - 1);
                u16::from(weeks_last_year.saturating_sub(start)) + u16::from(week)
            }
        };

        self.range.wrapping_contains(&week) && weeks_since_start % u16::from(self.step) == 0
    }
}
