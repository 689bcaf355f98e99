use std::collections::BTreeSet;
use std::sync::Arc;

use crate::context::{Context, ContextHolidays};
use crate::error::Error;
use crate::opening_hours::HolidaysStatus;
use crate::schedule::Schedule;
use crate::{date, schedule_at, OpeningHours};

fn ctx() -> Context {
    let public = BTreeSet::from([date!("2020-06-01"), date!("2020-07-14")]);
    let school = BTreeSet::from([date!("2020-07-06"), date!("2020-07-11"), date!("2020-07-14")]);
    Context::default().with_holidays(ContextHolidays::new(Arc::new(public), Arc::new(school)))
}

#[test]
fn public_holidays() -> Result<(), Error> {
    assert_eq!(
        schedule_at!("Mo-Fr 10:00-18:00; PH off", "2020-06-01", ctx = ctx()),
        Schedule::new()
    );

    assert_eq!(
        schedule_at!("Mo-Fr 10:00-18:00; PH off", "2020-06-03", ctx = ctx()),
        schedule! { 10,00 => 18,00 }
    );

    // Without calendar, no date is a holiday
    assert_eq!(
        schedule_at!("Mo-Fr 10:00-18:00; PH off", "2020-06-01"),
        schedule! { 10,00 => 18,00 }
    );

    Ok(())
}

#[test]
fn weekdays_or_holidays() -> Result<(), Error> {
    let expression = "Su,PH 10:00-12:00";
    assert_eq!(schedule_at!(expression, "2020-06-01", ctx = ctx()), schedule! { 10,00 => 12,00 });
    assert_eq!(schedule_at!(expression, "2020-06-07", ctx = ctx()), schedule! { 10,00 => 12,00 });
    assert_eq!(schedule_at!(expression, "2020-06-03", ctx = ctx()), Schedule::new());
    Ok(())
}

#[test]
fn holidays_and_weekdays() -> Result<(), Error> {
    let expression = "SH Mo-Fr 10:00-12:00";
    assert_eq!(schedule_at!(expression, "2020-07-06", ctx = ctx()), schedule! { 10,00 => 12,00 });
    assert_eq!(schedule_at!(expression, "2020-07-11", ctx = ctx()), Schedule::new());
    assert_eq!(schedule_at!(expression, "2020-07-07", ctx = ctx()), Schedule::new());
    Ok(())
}

#[test]
fn holidays_status() -> Result<(), Error> {
    assert_eq!(
        OpeningHours::parse("Mo-Fr 10:00-18:00; PH off; SH 10:00-12:00")?.holidays_status(),
        HolidaysStatus { public: Some(false), school: Some(true) }
    );

    assert_eq!(
        OpeningHours::parse("PH off; PH 10:00-12:00")?.holidays_status(),
        HolidaysStatus { public: Some(true), school: None }
    );

    assert_eq!(OpeningHours::parse("24/7")?.holidays_status(), HolidaysStatus::default());
    Ok(())
}

#[test]
fn day_flags() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("Mo-Su 10:00-12:00,14:00-18:00; PH off")?.with_context(ctx());

    let bastille_day = oh.day(date!("2020-07-14"))?;
    assert!(bastille_day.is_public_holiday);
    assert!(bastille_day.is_school_holiday);
    assert!(!bastille_day.opens());

    let day = oh.day(date!("2020-07-06"))?;
    assert!(!day.is_public_holiday);
    assert!(day.is_school_holiday);
    assert_eq!(day.periods.len(), 2);
    assert_eq!(day.total_duration(), chrono::TimeDelta::hours(6));
    Ok(())
}
