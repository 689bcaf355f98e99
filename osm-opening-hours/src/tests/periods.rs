use crate::error::{Error, SolarHoursError};
use crate::periods::{Boundary, DateTimeRange};
use crate::{date, datetime, OpeningHours};

fn period(start: &str, end: &str) -> DateTimeRange {
    DateTimeRange::new(datetime!(start), datetime!(end))
}

#[test]
fn one_period_per_day() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("Mo-Fr 06:00-21:00; Sa,Su 07:00-21:00")?;
    let periods = oh.opening_periods_between(date!("2024-06-17"), date!("2024-06-23"), false)?;

    assert_eq!(periods.len(), 7);
    assert_eq!(periods[0], period("2024-06-17 06:00", "2024-06-17 21:00"));
    assert_eq!(periods[6], period("2024-06-23 07:00", "2024-06-23 21:00"));

    for pair in periods.windows(2) {
        assert!(pair[0].end() < pair[1].start());
    }

    for period in &periods {
        assert_eq!(period.start().date(), period.end().date());
    }

    Ok(())
}

#[test]
fn merge_always_open() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("Mo-Su 00:00-24:00")?;

    assert_eq!(
        oh.opening_periods_between(date!("2024-06-17"), date!("2024-06-19"), true)?,
        vec![period("2024-06-17 00:00", "2024-06-20 00:00")]
    );

    assert_eq!(
        oh.opening_periods_between(date!("2024-06-17"), date!("2024-06-19"), false)?
            .len(),
        3
    );

    Ok(())
}

#[test]
fn clip_to_datetimes() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("10:00-18:00")?;

    assert_eq!(
        oh.opening_periods_between(
            datetime!("2024-06-17 12:00"),
            datetime!("2024-06-18 15:00"),
            false
        )?,
        vec![
            period("2024-06-17 12:00", "2024-06-17 18:00"),
            period("2024-06-18 10:00", "2024-06-18 15:00"),
        ]
    );

    // Bounds can be mixed, dates don't clip periods
    assert_eq!(
        oh.opening_periods_between(date!("2024-06-17"), datetime!("2024-06-17 11:00"), false)?,
        vec![period("2024-06-17 10:00", "2024-06-17 11:00")]
    );

    assert!(oh
        .opening_periods_between(date!("2024-06-18"), date!("2024-06-17"), false)?
        .is_empty());

    Ok(())
}

#[test]
fn overnight_periods() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("20:00-02:00")?;

    assert_eq!(
        oh.opening_periods_between(date!("2024-06-17"), date!("2024-06-18"), true)?,
        vec![
            period("2024-06-17 00:00", "2024-06-17 02:00"),
            period("2024-06-17 20:00", "2024-06-18 02:00"),
            period("2024-06-18 20:00", "2024-06-19 00:00"),
        ]
    );

    assert_eq!(
        oh.opening_periods_between(date!("2024-06-17"), date!("2024-06-18"), false)?
            .len(),
        4
    );

    Ok(())
}

#[test]
fn lazy_iteration() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("Mo-Fr 10:00-12:00,14:00-18:00")?;
    let start = Boundary::from(date!("2024-06-17"));
    let end = Boundary::from(date!("9999-12-31"));

    let first_three: Vec<_> = oh
        .iter_periods(start, end, false)
        .take(3)
        .collect::<Result<_, _>>()?;

    assert_eq!(first_three[2], period("2024-06-18 10:00", "2024-06-18 12:00"));
    Ok(())
}

#[test]
fn stops_on_solar_error() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("sunrise-sunset")?;
    let mut periods = oh.iter_periods(date!("2024-06-17"), date!("2024-06-19"), false);
    assert_eq!(periods.next(), Some(Err(SolarHoursError::NotConfigured)));
    assert_eq!(periods.next(), None);
    Ok(())
}
