use crate::sanitize::normalize;

use super::ex;

const EXAMPLES: &[(&str, u32, &str, &str)] = &[
    ex!("mo-sa 09:00-19:00", "Mo-Sa 09:00-19:00"),
    ex!("Mo,th 9:00-12:00, 13:00-19:00", "Mo,Th 09:00-12:00,13:00-19:00"),
    ex!("Mo 09:00 - 12:00 , 13:00 - 19:00;    ", "Mo 09:00-12:00,13:00-19:00"),
    ex!(
        "Mo 10h00-12h00 14:00-19:00; Tu-Sa 10:00-19:00",
        "Mo 10:00-12:00,14:00-19:00; Tu-Sa 10:00-19:00",
    ),
    ex!("mo-fr,su 10h - 20h", "Mo-Fr,Su 10:00-20:00"),
    ex!("jan-feb SUNRISE-SUNSET", "Jan-Feb sunrise-sunset"),
    ex!("Mo-Fr 08:00-12:00 13:00-17:00 18:00-20:00", "Mo-Fr 08:00-12:00,13:00-17:00,18:00-20:00"),
    ex!("Mo-Su 10:00-00:00", "Mo-Su 10:00-24:00"),
    ex!("Mo-Fr 10:00-12:00;sa OFF;;ph Closed", "Mo-Fr 10:00-12:00; Sa off; PH closed"),
    ex!("24h", "24/7"),
    ex!("24 Hours", "24/7"),
    ex!("  24/7 ", "24/7"),
    ex!("(Sunrise+1:00) - 20:00", "(sunrise+01:00)-20:00"),
    ex!("Mo  \"Open ; by Appointment\"", "Mo \"Open ; by Appointment\""),
    ex!("2019 dec 24-26 off", "2019 Dec 24-26 off"),
    ex!("", ""),
];

#[test]
fn sanitize() {
    for (file, line, raw, expected) in EXAMPLES {
        assert_eq!(
            normalize(raw),
            *expected,
            "error with example from {file}:{line}",
        );
    }
}

/// Inputs where a rewrite produces text that the same rewrite matches again.
const CHAINED: &[(&str, u32, &str, &str)] = &[
    ex!("30-00:00-00:00-00:00", "30-00:00-24:00-24:00"),
    ex!("/7h-00:00-00:00", "/07:00-24:00-24:00"),
    ex!("00:30-00:00-00:00", "00:30-24:00-24:00"),
];

#[test]
fn sanitize_chained_rewrites() {
    for (file, line, raw, expected) in CHAINED {
        assert_eq!(
            normalize(raw),
            *expected,
            "error with example from {file}:{line}",
        );
    }
}

#[test]
fn sanitize_idempotent() {
    for (file, line, raw, _) in EXAMPLES.iter().chain(CHAINED) {
        let once = normalize(raw);

        assert_eq!(
            normalize(&once),
            once,
            "error with example from {file}:{line}",
        );
    }
}

#[test]
fn sanitized_examples_parse() {
    for (file, line, raw, _) in &EXAMPLES[..EXAMPLES.len() - 1] {
        assert!(
            crate::parse_raw(raw).is_ok(),
            "error with example from {file}:{line}",
        );
    }
}
