use crate::error::Error;
use crate::schedule_at;

fn opens_on(expression: &str, date: &str) -> Result<bool, Error> {
    Ok(!schedule_at!(expression, date).is_empty())
}

#[test]
fn year_ranges() -> Result<(), Error> {
    assert!(opens_on("2020 10:00-12:00", "2020-06-01")?);
    assert!(!opens_on("2020 10:00-12:00", "2021-06-01")?);

    assert!(opens_on("2020-2022/2 10:00-12:00", "2020-06-01")?);
    assert!(!opens_on("2020-2022/2 10:00-12:00", "2021-06-01")?);
    assert!(opens_on("2020-2022/2 10:00-12:00", "2022-06-01")?);
    assert!(!opens_on("2020-2022/2 10:00-12:00", "2024-06-01")?);

    assert!(!opens_on("2020+ 10:00-12:00", "2019-12-31")?);
    assert!(opens_on("2020+ 10:00-12:00", "2020-01-01")?);
    assert!(opens_on("2020+ 10:00-12:00", "2450-01-01")?);

    assert!(opens_on("2018,2020 10:00-12:00", "2018-03-01")?);
    assert!(!opens_on("2018,2020 10:00-12:00", "2019-03-01")?);
    Ok(())
}

#[test]
fn month_ranges() -> Result<(), Error> {
    assert!(opens_on("Jan-Feb 10:00-12:00", "2020-02-29")?);
    assert!(!opens_on("Jan-Feb 10:00-12:00", "2020-03-01")?);

    assert!(opens_on("Nov-Feb 10:00-12:00", "2020-12-15")?);
    assert!(opens_on("Nov-Feb 10:00-12:00", "2021-01-31")?);
    assert!(!opens_on("Nov-Feb 10:00-12:00", "2021-03-01")?);
    assert!(!opens_on("Nov-Feb 10:00-12:00", "2021-10-31")?);

    assert!(opens_on("2019 Nov-Feb 10:00-12:00", "2019-12-01")?);
    assert!(opens_on("2019 Nov-Feb 10:00-12:00", "2020-01-15")?);
    assert!(!opens_on("2019 Nov-Feb 10:00-12:00", "2019-01-15")?);
    assert!(!opens_on("2019 Nov-Feb 10:00-12:00", "2020-12-01")?);

    assert!(opens_on("Jan,Mar 10:00-12:00", "2020-03-10")?);
    assert!(!opens_on("Jan,Mar 10:00-12:00", "2020-02-10")?);
    Ok(())
}

#[test]
fn date_ranges() -> Result<(), Error> {
    assert!(opens_on("Dec 24-26 10:00-12:00", "2020-12-25")?);
    assert!(!opens_on("Dec 24-26 10:00-12:00", "2020-12-27")?);

    assert!(opens_on("Dec 24-Jan 02 10:00-12:00", "2020-12-31")?);
    assert!(opens_on("Dec 24-Jan 02 10:00-12:00", "2021-01-02")?);
    assert!(!opens_on("Dec 24-Jan 02 10:00-12:00", "2021-01-03")?);
    assert!(!opens_on("Dec 24-Jan 02 10:00-12:00", "2020-12-23")?);

    assert!(opens_on("Dec 25+ 10:00-12:00", "2020-12-31")?);
    assert!(!opens_on("Dec 25+ 10:00-12:00", "2020-12-24")?);

    assert!(opens_on("2019 Dec 24-2020 Jan 02 10:00-12:00", "2020-01-01")?);
    assert!(!opens_on("2019 Dec 24-2020 Jan 02 10:00-12:00", "2021-01-01")?);

    // 2024-03-31 is easter sunday
    assert!(opens_on("easter 10:00-12:00", "2024-03-31")?);
    assert!(!opens_on("easter 10:00-12:00", "2024-04-01")?);
    Ok(())
}

#[test]
fn week_ranges() -> Result<(), Error> {
    // 2020-01-01 is in ISO week 1
    assert!(opens_on("week 1-10/2 10:00-12:00", "2020-01-01")?);
    assert!(!opens_on("week 1-10/2 10:00-12:00", "2020-01-08")?);
    assert!(opens_on("week 1-10/2 10:00-12:00", "2020-01-15")?);
    assert!(!opens_on("week 1-10/2 10:00-12:00", "2020-06-01")?);

    assert!(opens_on("week 50-02 10:00-12:00", "2020-12-14")?);
    assert!(opens_on("week 50-02 10:00-12:00", "2020-01-08")?);
    assert!(!opens_on("week 50-02 10:00-12:00", "2020-01-15")?);

    // 2021 has 52 ISO weeks: week 1 of 2022 is the 4th week of the range
    assert!(opens_on("week 50-02/2 10:00-12:00", "2021-12-27")?);
    assert!(!opens_on("week 50-02/2 10:00-12:00", "2022-01-03")?);
    assert!(opens_on("week 50-02/2 10:00-12:00", "2022-01-10")?);

    // 2020 has 53 ISO weeks: week 1 of 2021 is the 5th week of the range
    assert!(!opens_on("week 50-02/2 10:00-12:00", "2020-12-28")?);
    assert!(opens_on("week 50-02/2 10:00-12:00", "2021-01-04")?);
    Ok(())
}

#[test]
fn weekday_ranges() -> Result<(), Error> {
    // 2020-06-05 is a friday
    assert!(opens_on("Fr-Mo 10:00-12:00", "2020-06-05")?);
    assert!(opens_on("Fr-Mo 10:00-12:00", "2020-06-07")?);
    assert!(opens_on("Fr-Mo 10:00-12:00", "2020-06-08")?);
    assert!(!opens_on("Fr-Mo 10:00-12:00", "2020-06-09")?);

    assert!(opens_on("Mo,We 10:00-12:00", "2020-06-03")?);
    assert!(!opens_on("Mo,We 10:00-12:00", "2020-06-04")?);
    Ok(())
}

#[test]
fn combined_selectors() -> Result<(), Error> {
    let expression = "Jan-Feb Mo-Fr 10:00-20:00";
    assert!(opens_on(expression, "2020-01-06")?);
    assert!(!opens_on(expression, "2020-01-05")?);
    assert!(!opens_on(expression, "2020-03-02")?);

    assert_eq!(
        schedule_at!("Jan: 10:00-12:00", "2020-01-10"),
        schedule! { 10,00 => 12,00 }
    );

    assert_eq!(
        schedule_at!("week 1-10/2 Sa-Su 09:00-12:00", "2020-01-04"),
        schedule! { 9,00 => 12,00 }
    );

    Ok(())
}
