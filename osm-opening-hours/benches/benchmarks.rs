use osm_opening_hours::localization::{Coordinates, Location};
use osm_opening_hours::{OpeningHours, DEFAULT_MAX_RECURSION};

use chrono::{NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SCH_24_7: &str = "24/7";
const SCH_ADDITION: &str = "10:00-12:00 open, 14:00-16:00 unknown, 16:00-23:00 closed";
const SCH_OVERNIGHT: &str = "Mo-Th 18:00-02:00; Fr-Sa 18:00-04:00; Su off";
const SCH_SOLAR: &str = "Mo-Su sunrise-sunset";
const SCH_JAN_DEC: &str = "Jan-Dec Mo-Fr 08:00-12:00,13:00-17:00";

fn paris() -> Location {
    Location::new(
        Coordinates::new(48.8535, 2.34839).unwrap(),
        chrono_tz::Europe::Paris,
    )
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("24_7", |b| {
        b.iter(|| OpeningHours::parse(black_box(SCH_24_7)).unwrap())
    });

    group.bench_function("addition", |b| {
        b.iter(|| OpeningHours::parse(black_box(SCH_ADDITION)).unwrap())
    });

    group.bench_function("overnight", |b| {
        b.iter(|| OpeningHours::parse(black_box(SCH_OVERNIGHT)).unwrap())
    });
}

fn bench_eval(c: &mut Criterion) {
    let date_time = NaiveDateTime::parse_from_str("2021-02-01 12:03", "%Y-%m-%d %H:%M").unwrap();

    let mut expressions = [
        ("24_7", OpeningHours::parse(SCH_24_7).unwrap()),
        ("addition", OpeningHours::parse(SCH_ADDITION).unwrap()),
        ("overnight", OpeningHours::parse(SCH_OVERNIGHT).unwrap()),
        (
            "solar",
            OpeningHours::parse(SCH_SOLAR).unwrap().with_location(paris()),
        ),
        ("jan-dec", OpeningHours::parse(SCH_JAN_DEC).unwrap()),
    ];

    {
        let mut group = c.benchmark_group("is_open");

        for (slug, expr) in &mut expressions {
            group.bench_function(*slug, |b| {
                b.iter(|| black_box(&mut *expr).is_open(black_box(date_time)))
            });
        }
    }

    {
        let mut group = c.benchmark_group("next_change");

        for (slug, expr) in &mut expressions {
            group.bench_function(*slug, |b| {
                b.iter(|| {
                    black_box(
                        black_box(&mut *expr).next_change(black_box(date_time), DEFAULT_MAX_RECURSION),
                    )
                })
            });
        }
    }

    {
        let mut group = c.benchmark_group("periods");
        let start = NaiveDate::from_ymd_opt(2021, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2021, 2, 28).unwrap();

        for (slug, expr) in &mut expressions {
            group.bench_function(*slug, |b| {
                b.iter(|| {
                    black_box(&mut *expr)
                        .opening_periods_between(black_box(start), black_box(end), true)
                        .unwrap()
                })
            });
        }
    }
}

criterion_group!(benches, bench_parse, bench_eval);
criterion_main!(benches);
