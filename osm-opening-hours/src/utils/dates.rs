use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};

use osm_opening_hours_syntax::ExtendedTime;

/// Get the last valid date before given "yyyy/mm/dd", for example if
/// 2021/02/30 is given, this will return february 28th as 2021 is not a leap
/// year.
pub(crate) fn first_valid_ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day)
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
}

/// Find Easter date for given year using.
///
/// See https://en.wikipedia.org/wiki/Date_of_Easter#Anonymous_Gregorian_algorithm
pub(crate) fn easter(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n = (h + l - 7 * m + 114) / 31;
    let o = (h + l - 7 * m + 114) % 31;

    NaiveDate::from_ymd_opt(year, n.try_into().ok()?, (o + 1).try_into().ok()?)
}

/// Number of ISO weeks in a year, which is either 52 or 53.
pub(crate) fn iso_weeks_in_year(year: i32) -> u8 {
    if NaiveDate::from_isoywd_opt(year, 53, Weekday::Mon).is_some() {
        53
    } else {
        52
    }
}

/// The last representable instant of a day.
pub(crate) fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN))
}

/// Instant at given time of a day, *24:00* being the next day at midnight.
pub(crate) fn datetime_at(date: NaiveDate, time: ExtendedTime) -> Option<NaiveDateTime> {
    let minutes = TimeDelta::minutes(time.mins_from_midnight().into());
    date.and_time(NaiveTime::MIN).checked_add_signed(minutes)
}
