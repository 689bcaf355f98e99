use crate::error::Result;
use crate::parser::parse;

use super::ex;

const EXAMPLES: &[(&str, u32, &str, &str)] = &[
    ex!("24/7", "24/7"),
    ex!("Mo-Fr 08:00-19:00", "Mo-Fr 08:00-19:00"),
    ex!("Mo-Fr", "Mo-Fr 00:00-24:00"),
    ex!("Sa,Su 10:00-20:00", "Sa,Su 10:00-20:00"),
    ex!("Su,PH off", "Su,PH off"),
    ex!("Su closed", "Su off"),
    ex!("sunrise-sunset", "sunrise-sunset"),
    ex!("(sunrise+01:00)-20:00", "(sunrise+01:00)-20:00"),
    ex!("( dusk - 00:30 )-22:00", "(dusk-00:30)-22:00"),
    ex!("Jan-Feb Mo-Fr 10:00-20:00", "Jan-Feb Mo-Fr 10:00-20:00"),
    ex!("SH Mo-Fr 10:00-20:00", "SH Mo-Fr 10:00-20:00"),
    ex!("week 1-10/2 Sa-Su 09:00-12:00", "week 01-10/2 Sa-Su 09:00-12:00"),
    ex!("2018-2022/2 Mo-Fr 10:00-20:00", "2018-2022/2 Mo-Fr 10:00-20:00"),
    ex!("2019 Jan", "2019 Jan 00:00-24:00"),
    ex!("Dec 24-26 off", "Dec 24-Dec 26 off"),
    ex!("Dec 28-05 off", "Dec 28-Jan 05 off"),
    ex!("Dec 25+ off", "Dec 25-Dec 31 off"),
    ex!("easter off", "easter off"),
    ex!("Jan: 10:00-12:00", "Jan 10:00-12:00"),
    ex!("Mo 10:00-12:00, Tu 14:00-16:00", "Mo 10:00-12:00, Tu 14:00-16:00"),
    ex!("Mo-Fr 20:00-02:00", "Mo-Fr 20:00-02:00"),
    ex!("Mo \"on appointment\"", "Mo \"on appointment\""),
    ex!("Mo unknown", "Mo unknown"),
    ex!("10:00-12:00 \"call first\"", "10:00-12:00 \"call first\""),
    ex!("Mo-Fr 10:00-12:00 unknown \"maybe\"", "Mo-Fr 10:00-12:00 unknown \"maybe\""),
    ex!("off", "off"),
];

#[test]
fn canonical_rendering() -> Result<()> {
    for (file, line, expr, expected) in EXAMPLES {
        assert_eq!(
            parse(expr)?.to_string(),
            *expected,
            "error with example from {file}:{line}",
        );
    }

    Ok(())
}

#[test]
fn rendering_parses_back() -> Result<()> {
    for (file, line, expr, _) in EXAMPLES {
        let field = parse(expr)?;

        assert_eq!(
            parse(&field.to_string())?.rules(),
            field.rules(),
            "error with example from {file}:{line}",
        );
    }

    Ok(())
}
