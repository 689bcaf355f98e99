use chrono::TimeDelta;

use crate::error::{Error, NextChangeError, NextChangeRecursionError};
use crate::utils::dates::end_of_day;
use crate::{date, datetime, OpeningHours, DEFAULT_MAX_RECURSION};

// 2024-06-17 is a monday.

#[test]
fn within_day() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("Mo-Fr 06:00-21:00; Sa,Su 08:00-12:00")?;

    assert_eq!(
        oh.next_change(datetime!("2024-06-17 20:30"), DEFAULT_MAX_RECURSION)?,
        datetime!("2024-06-17 21:00")
    );

    assert_eq!(
        oh.next_change(datetime!("2024-06-17 05:00"), DEFAULT_MAX_RECURSION)?,
        datetime!("2024-06-17 06:00")
    );

    // Changes are strictly after the input time
    assert_eq!(
        oh.next_change(datetime!("2024-06-17 06:00"), DEFAULT_MAX_RECURSION)?,
        datetime!("2024-06-17 21:00")
    );

    assert_eq!(
        oh.time_before_next_change(datetime!("2024-06-17 20:30"), DEFAULT_MAX_RECURSION)?,
        TimeDelta::minutes(30)
    );

    Ok(())
}

#[test]
fn across_days() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("Mo-Fr 06:00-21:00; Sa,Su 08:00-12:00")?;

    assert_eq!(
        oh.next_change(datetime!("2024-06-21 22:00"), DEFAULT_MAX_RECURSION)?,
        datetime!("2024-06-22 08:00")
    );

    let mut oh = OpeningHours::parse("Mo-Fr 10:00-18:00")?;

    assert_eq!(
        oh.next_change(datetime!("2024-06-21 19:00"), DEFAULT_MAX_RECURSION)?,
        datetime!("2024-06-24 10:00")
    );

    Ok(())
}

#[test]
fn overnight() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("Mo-Fr 20:00-02:00")?;

    assert_eq!(
        oh.next_change(datetime!("2024-06-17 21:00"), DEFAULT_MAX_RECURSION)?,
        datetime!("2024-06-18 02:00")
    );

    assert_eq!(
        oh.next_change(datetime!("2024-06-18 01:00"), DEFAULT_MAX_RECURSION)?,
        datetime!("2024-06-18 02:00")
    );

    Ok(())
}

#[test]
fn change_at_midnight() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("Mo-Fr 00:00-24:00")?;

    // Friday ends open and saturday starts closed
    assert_eq!(
        oh.next_change(datetime!("2024-06-21 10:00"), 0)?,
        datetime!("2024-06-22 00:00")
    );

    assert_eq!(
        oh.next_change(datetime!("2024-06-17 10:00"), 4)?,
        datetime!("2024-06-22 00:00")
    );

    assert_eq!(
        oh.next_change(datetime!("2024-06-22 10:00"), DEFAULT_MAX_RECURSION)?,
        datetime!("2024-06-24 00:00")
    );

    Ok(())
}

#[test]
fn recursion_budget() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("Mo-Fr 00:00-24:00")?;

    assert_eq!(
        oh.next_change(datetime!("2024-06-17 10:00"), 0)?,
        end_of_day(date!("2024-06-17"))
    );

    assert_eq!(
        oh.next_change(datetime!("2024-06-17 10:00"), 2),
        Err(NextChangeError::Recursion(NextChangeRecursionError {
            last: end_of_day(date!("2024-06-19"))
        }))
    );

    assert_eq!(
        oh.next_change(datetime!("2024-06-17 10:00"), 3),
        Err(NextChangeError::Recursion(NextChangeRecursionError {
            last: end_of_day(date!("2024-06-20"))
        }))
    );

    Ok(())
}

#[test]
fn never_changes() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("off")?;

    assert_eq!(
        oh.next_change(datetime!("2024-06-17 10:00"), DEFAULT_MAX_RECURSION),
        Err(NextChangeError::Recursion(NextChangeRecursionError {
            last: end_of_day(date!("2024-07-18"))
        }))
    );

    Ok(())
}

#[test]
fn always_open() -> Result<(), Error> {
    let mut oh = OpeningHours::parse("24/7")?;
    assert!(oh.field().is_24_7());

    assert_eq!(
        oh.next_change(datetime!("2024-06-17 10:00"), 0)?,
        end_of_day(date!("2024-06-17"))
    );

    assert_eq!(
        oh.next_change(datetime!("2024-06-17 10:00"), DEFAULT_MAX_RECURSION),
        Err(NextChangeError::Recursion(NextChangeRecursionError {
            last: end_of_day(date!("2024-06-17"))
        }))
    );

    assert!(oh.is_open(datetime!("2024-06-17 10:00"))?);
    Ok(())
}

#[test]
fn recursion_error_message() {
    let err = NextChangeRecursionError { last: end_of_day(date!("2024-06-17")) };
    assert!(err.to_string().contains("2024-06-17 23:59:59"));
}
