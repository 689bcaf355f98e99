mod holidays;
mod next_change;
mod periods;
mod selectors;

#[macro_export]
macro_rules! date {
    ( $date: expr ) => {{
        use chrono::NaiveDate;
        NaiveDate::parse_from_str($date, "%Y-%m-%d").expect("invalid date literal")
    }};
}

#[macro_export]
macro_rules! datetime {
    ( $date: expr ) => {{
        use chrono::NaiveDateTime;
        NaiveDateTime::parse_from_str($date, "%Y-%m-%d %H:%M").expect("invalid datetime literal")
    }};
}

#[macro_export]
macro_rules! schedule_at {
    (
        $expression: expr,
        $date: expr
        $( , ctx = $ctx: expr )?
        $( , solar = $record: expr )?
        $( , )?
    ) => {{
        use $crate::{date, OpeningHours};

        #[allow(unused_mut)]
        let mut oh = OpeningHours::parse($expression)?
            $( .with_context($ctx) )?;

        $( oh.solar_hours_mut().set_default(Some($record)); )?
        oh.schedule_at(date!($date))?
    }};
}
