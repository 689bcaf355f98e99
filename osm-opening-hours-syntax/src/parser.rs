use std::sync::Arc;

use pest::iterators::Pair;
use pest::Parser;

use crate::error::{Error, Result};
use crate::extended_time::ExtendedTime;
use crate::rules as rl;
use crate::rules::day as ds;
use crate::rules::time as ts;
use crate::sanitize::KEYWORDS;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct OHParser;

/// Parse a field that was already sanitized.
///
/// ```
/// use osm_opening_hours_syntax::{parse, Error};
///
/// assert_eq!(parse("Mo-Fr 08:00-19:00; Su,PH off").unwrap().rules().len(), 2);
/// assert!(matches!(parse("Su[1] 10:00-20:00"), Err(Error::Unsupported { .. })));
/// assert!(matches!(parse("Mo-Fr 10:00-"), Err(Error::Parser(_))));
/// ```
pub fn parse(data: &str) -> Result<rl::Field> {
    parse_with_original(data, data)
}

/// Sanitize a raw field with [`crate::sanitize::normalize`] and parse the
/// result. The raw text is kept as the original text of the field.
///
/// ```
/// use osm_opening_hours_syntax::parse_raw;
///
/// let field = parse_raw("mo-fr 9h - 19h").unwrap();
/// assert_eq!(field.original(), "mo-fr 9h - 19h");
/// assert_eq!(field.sanitized(), "Mo-Fr 09:00-19:00");
/// ```
pub fn parse_raw(raw: &str) -> Result<rl::Field> {
    let sanitized = crate::sanitize::normalize(raw);
    parse_with_original(raw, &sanitized)
}

fn parse_with_original(original: &str, data: &str) -> Result<rl::Field> {
    let opening_hours_pair = match OHParser::parse(Rule::input_opening_hours, data) {
        Ok(mut pairs) => pairs.next().expect("grammar error: no opening_hours found"),
        Err(err) => {
            return Err(match comment_only_text(data) {
                Some(comment) => Error::CommentOnlyField { comment },
                None => err.into(),
            });
        }
    };

    let rules = build_opening_hours(opening_hours_pair)?;
    let field = rl::Field::new(original.to_string(), data.to_string(), rules);

    if let Some(comment) = field.comment_only() {
        return Err(Error::CommentOnlyField { comment: comment.trim().to_string() });
    }

    Ok(field)
}

/// Extract the text of a field that doesn't match the grammar but has no
/// chance to describe a schedule either.
fn comment_only_text(data: &str) -> Option<String> {
    let text = data
        .trim()
        .trim_matches(|c: char| c == '"' || c == ';')
        .trim();

    if text.is_empty() || text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    // A field with no digit and no grammar word can't hold a schedule.
    let has_keyword = text
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| KEYWORDS.contains(&word));

    (!has_keyword).then(|| text.to_string())
}

// ---
// --- Time domain
// ---

fn unexpected_token<T>(token: Rule, parent: Rule) -> T {
    unreachable!("Grammar error: found `{token:?}` inside of `{parent:?}`")
}

fn unsupported(feature: &'static str, pair: &Pair<Rule>) -> Error {
    Error::Unsupported {
        feature,
        position: pair.as_span().start(),
        fragment: pair.as_str().to_string(),
    }
}

fn build_opening_hours(pair: Pair<Rule>) -> Result<Vec<rl::Rule>> {
    assert_eq!(pair.as_rule(), Rule::opening_hours);
    let mut pairs = pair.into_inner();
    let mut rules = Vec::new();

    while let Some(pair) = pairs.next() {
        rules.push(match pair.as_rule() {
            Rule::rule_sequence => build_rule_sequence(pair, false),
            Rule::any_rule_separator => {
                let additional = build_any_rule_separator(pair)?;

                build_rule_sequence(
                    pairs.next().expect("separator not followed by any rule"),
                    additional,
                )
            }
            other => unexpected_token(other, Rule::opening_hours),
        }?)
    }

    Ok(rules)
}

fn build_rule_sequence(pair: Pair<Rule>, additional: bool) -> Result<rl::Rule> {
    assert_eq!(pair.as_rule(), Rule::rule_sequence);
    let mut pairs = pair.into_inner();
    let first = pairs.next().expect("grammar error: empty rule sequence");

    let (selector, mut spans, modifier) = {
        if first.as_rule() == Rule::selector_sequence {
            let (selector, spans) = build_selector_sequence(first)?;
            (selector, spans, pairs.next())
        } else {
            (ds::DaySelector::default(), Vec::new(), Some(first))
        }
    };

    let (kind, comment) = modifier
        .map(build_rules_modifier)
        .unwrap_or((None, None));

    // A comment without any state or time is a description of the state
    // itself.
    let kind = kind.unwrap_or(match (&comment, spans.is_empty()) {
        (Some(_), true) => rl::RuleKind::Comment,
        _ => rl::RuleKind::Open,
    });

    if kind == rl::RuleKind::Open && spans.is_empty() {
        spans.push(ts::TimeSpan::full_day());
    }

    Ok(rl::Rule {
        selector,
        spans,
        kind,
        comment: comment.map(|s| Arc::from(s.into_boxed_str())),
        additional,
    })
}

fn build_any_rule_separator(pair: Pair<Rule>) -> Result<bool> {
    assert_eq!(pair.as_rule(), Rule::any_rule_separator);
    let inner = pair.into_inner().next().expect("empty rule separator");

    match inner.as_rule() {
        Rule::normal_rule_separator => Ok(false),
        Rule::additional_rule_separator => Ok(true),
        Rule::fallback_rule_separator => Err(unsupported("fallback rule", &inner)),
        other => unexpected_token(other, Rule::any_rule_separator),
    }
}

// ---
// --- Rule modifier
// ---

fn build_rules_modifier(pair: Pair<Rule>) -> (Option<rl::RuleKind>, Option<String>) {
    assert_eq!(pair.as_rule(), Rule::rules_modifier);
    let mut pairs = pair.into_inner();

    let kind = {
        if pairs.peek().expect("empty rules_modifier").as_rule() == Rule::rules_modifier_enum {
            pairs.next().map(build_rules_modifier_enum)
        } else {
            None
        }
    };

    let comment = pairs.next().map(build_comment);
    (kind, comment)
}

fn build_rules_modifier_enum(pair: Pair<Rule>) -> rl::RuleKind {
    assert_eq!(pair.as_rule(), Rule::rules_modifier_enum);

    let pair = pair
        .into_inner()
        .next()
        .expect("grammar error: empty rules modifier enum");

    match pair.as_rule() {
        Rule::rules_modifier_enum_closed => rl::RuleKind::Closed,
        Rule::rules_modifier_enum_open => rl::RuleKind::Open,
        Rule::rules_modifier_enum_unknown => rl::RuleKind::Comment,
        other => unexpected_token(other, Rule::rules_modifier_enum),
    }
}

// ---
// --- Selectors
// ---

fn build_selector_sequence(pair: Pair<Rule>) -> Result<(ds::DaySelector, Vec<ts::TimeSpan>)> {
    assert_eq!(pair.as_rule(), Rule::selector_sequence);
    let mut pairs = pair.into_inner();

    if pairs.peek().map(|x| x.as_rule()).expect("empty selector") == Rule::always_open {
        return Ok((ds::DaySelector::default(), vec![ts::TimeSpan::full_day()]));
    }

    let mut selector = ds::DaySelector::default();
    let mut spans = Vec::new();

    for pair in pairs {
        match pair.as_rule() {
            Rule::wide_range_selectors => build_wide_range_selectors(pair, &mut selector)?,
            Rule::small_range_selectors => {
                spans = build_small_range_selectors(pair, &mut selector)?
            }
            other => unexpected_token(other, Rule::selector_sequence),
        }
    }

    Ok((selector, spans))
}

fn build_wide_range_selectors(pair: Pair<Rule>, selector: &mut ds::DaySelector) -> Result<()> {
    assert_eq!(pair.as_rule(), Rule::wide_range_selectors);

    for pair in pair.into_inner() {
        match pair.as_rule() {
            Rule::year_selector => {
                selector.year = build_list(pair, Rule::year_selector, build_year_range)?
            }
            Rule::monthday_selector => {
                selector.monthday = build_list(pair, Rule::monthday_selector, build_monthday_range)?
            }
            Rule::week_selector => {
                selector.week = build_list(pair, Rule::week_selector, build_week)?
            }
            other => unexpected_token(other, Rule::wide_range_selectors),
        }
    }

    Ok(())
}

fn build_small_range_selectors(
    pair: Pair<Rule>,
    selector: &mut ds::DaySelector,
) -> Result<Vec<ts::TimeSpan>> {
    assert_eq!(pair.as_rule(), Rule::small_range_selectors);
    let mut time_selector = Vec::new();

    for pair in pair.into_inner() {
        match pair.as_rule() {
            Rule::weekday_selector => {
                (selector.weekday, selector.holiday) = build_weekday_selector(pair)?
            }
            Rule::time_selector => {
                time_selector = build_list(pair, Rule::time_selector, build_timespan)?
            }
            other => unexpected_token(other, Rule::small_range_selectors),
        }
    }

    Ok(time_selector)
}

// ---
// --- Time selector
// ---

fn build_timespan(pair: Pair<Rule>) -> Result<ts::TimeSpan> {
    assert_eq!(pair.as_rule(), Rule::timespan);
    let mut pairs = pair.clone().into_inner();

    let beginning = build_time(pairs.next().expect("empty timespan"))?;

    let end = match pairs.next() {
        None => return Err(unsupported("point in time", &pair)),
        Some(inner) if inner.as_rule() == Rule::timespan_plus => {
            return Err(unsupported("open end", &pair))
        }
        Some(inner) => build_extended_time(inner)?,
    };

    if pairs.next().is_some() {
        return Err(unsupported("open end", &pair));
    }

    Ok(ts::TimeSpan { beginning, end })
}

fn build_time(pair: Pair<Rule>) -> Result<ts::Moment> {
    assert_eq!(pair.as_rule(), Rule::time);
    let inner = pair.into_inner().next().expect("empty time");

    Ok(match inner.as_rule() {
        Rule::hour_minutes => ts::Moment::Clock(build_hour_minutes(inner)?),
        Rule::variable_time => build_variable_time(inner)?,
        other => unexpected_token(other, Rule::time),
    })
}

fn build_extended_time(pair: Pair<Rule>) -> Result<ts::Moment> {
    assert_eq!(pair.as_rule(), Rule::extended_time);
    let inner = pair.into_inner().next().expect("empty extended time");

    Ok(match inner.as_rule() {
        Rule::extended_hour_minutes => ts::Moment::Clock(build_extended_hour_minutes(inner)?),
        Rule::variable_time => build_variable_time(inner)?,
        other => unexpected_token(other, Rule::extended_time),
    })
}

fn build_variable_time(pair: Pair<Rule>) -> Result<ts::Moment> {
    assert_eq!(pair.as_rule(), Rule::variable_time);
    let mut pairs = pair.into_inner();

    let event = build_event(pairs.next().expect("empty variable time"));

    let offset = {
        if let Some(sign) = pairs.next() {
            // An hour_minutes is at most 24:00, which always fits.
            let mins = build_hour_minutes(pairs.next().expect("missing hour minutes"))?
                .mins_from_midnight() as i16;

            build_sign(sign) * mins
        } else {
            0
        }
    };

    Ok(ts::Moment::Solar { event, offset })
}

fn build_event(pair: Pair<Rule>) -> ts::SolarEvent {
    assert_eq!(pair.as_rule(), Rule::event);

    match pair.into_inner().next().expect("empty event").as_rule() {
        Rule::dawn => ts::SolarEvent::Dawn,
        Rule::sunrise => ts::SolarEvent::Sunrise,
        Rule::sunset => ts::SolarEvent::Sunset,
        Rule::dusk => ts::SolarEvent::Dusk,
        other => unexpected_token(other, Rule::event),
    }
}

// ---
// --- WeekDay selector
// ---

fn build_weekday_selector(
    pair: Pair<Rule>,
) -> Result<(Vec<ds::WeekDayRange>, Vec<ds::HolidayKind>)> {
    assert_eq!(pair.as_rule(), Rule::weekday_selector);
    let mut weekday = Vec::new();
    let mut holiday = Vec::new();

    for pair in pair.into_inner() {
        match pair.as_rule() {
            Rule::holiday_and_weekday => {
                for pair in pair.into_inner() {
                    match pair.as_rule() {
                        Rule::holiday_sequence => {
                            holiday = build_list(pair, Rule::holiday_sequence, build_holiday)?
                        }
                        Rule::weekday_sequence => {
                            weekday = build_list(pair, Rule::weekday_sequence, build_weekday_range)?
                        }
                        other => unexpected_token(other, Rule::holiday_and_weekday),
                    }
                }
            }
            Rule::weekday_sequence => weekday.extend(
                build_list(pair, Rule::weekday_sequence, build_weekday_range)?,
            ),
            Rule::holiday_sequence => weekday.extend(
                build_list(pair, Rule::holiday_sequence, build_holiday)?
                    .into_iter()
                    .map(|kind| ds::WeekDayRange::Holiday { kind }),
            ),
            other => unexpected_token(other, Rule::weekday_selector),
        }
    }

    Ok((weekday, holiday))
}

fn build_weekday_range(pair: Pair<Rule>) -> Result<ds::WeekDayRange> {
    assert_eq!(pair.as_rule(), Rule::weekday_range);
    let mut pairs = pair.into_inner();

    let start = build_wday(pairs.next().expect("empty weekday range"));

    let end = {
        if pairs.peek().map(|x| x.as_rule()) == Some(Rule::wday) {
            pairs.next().map(build_wday).unwrap_or(start)
        } else {
            start
        }
    };

    match pairs.next() {
        None => Ok(ds::WeekDayRange::Fixed { range: start..=end }),
        Some(pair) if pair.as_rule() == Rule::nth_entries => {
            Err(unsupported("numbered weekday occurrence", &pair))
        }
        Some(pair) => Err(unsupported("day offset", &pair)),
    }
}

fn build_holiday(pair: Pair<Rule>) -> Result<ds::HolidayKind> {
    assert_eq!(pair.as_rule(), Rule::holiday);
    let mut pairs = pair.into_inner();

    let kind = match pairs.next().expect("empty holiday").as_rule() {
        Rule::public_holiday => ds::HolidayKind::Public,
        Rule::school_holiday => ds::HolidayKind::School,
        other => unexpected_token(other, Rule::holiday),
    };

    if let Some(offset) = pairs.next() {
        return Err(unsupported("day offset", &offset));
    }

    Ok(kind)
}

// ---
// --- Week selector
// ---

fn build_week(pair: Pair<Rule>) -> Result<ds::WeekRange> {
    assert_eq!(pair.as_rule(), Rule::week);
    let mut rules = pair.into_inner();

    let start = build_weeknum(rules.next().expect("empty weeknum range"))?;
    let end = rules.next().map(build_weeknum).transpose()?;

    let step = rules.next().map(build_positive_number).transpose()?;
    let step = build_step(step, "an integer in [1, 255]")?;

    Ok(ds::WeekRange { range: start..=end.unwrap_or(start), step })
}

// ---
// --- Month selector
// ---

fn build_monthday_range(pair: Pair<Rule>) -> Result<ds::MonthdayRange> {
    assert_eq!(pair.as_rule(), Rule::monthday_range);
    let mut pairs = pair.into_inner();

    if pairs.peek().expect("empty monthday range").as_rule() != Rule::date_from {
        let year = {
            if pairs.peek().map(|x| x.as_rule()) == Some(Rule::year) {
                pairs.next().map(build_year)
            } else {
                None
            }
        };

        let start = build_month(pairs.next().expect("missing month"));
        let end = pairs.next().map(build_month).unwrap_or(start);
        return Ok(ds::MonthdayRange::Month { year, range: start..=end });
    }

    let start = build_date_from(pairs.next().expect("missing date"));

    let end = match pairs.next() {
        None => start,
        Some(pair) => match pair.as_rule() {
            Rule::date_to => build_date_to(pair, start)?,
            Rule::monthday_range_plus => {
                if start.has_year() {
                    ds::Date::ymd(31, ds::Month::December, 9999)
                } else {
                    ds::Date::md(31, ds::Month::December)
                }
            }
            Rule::day_offset => return Err(unsupported("day offset", &pair)),
            other => unexpected_token(other, Rule::monthday_range),
        },
    };

    if let Some(offset) = pairs.next() {
        return Err(unsupported("day offset", &offset));
    }

    Ok(ds::MonthdayRange::Date { start, end })
}

fn build_date_from(pair: Pair<Rule>) -> ds::Date {
    assert_eq!(pair.as_rule(), Rule::date_from);
    let mut pairs = pair.into_inner();

    let year = {
        if pairs.peek().map(|x| x.as_rule()) == Some(Rule::year) {
            pairs.next().map(build_year)
        } else {
            None
        }
    };

    let first = pairs.next().expect("empty date (from)");

    match first.as_rule() {
        Rule::variable_date => ds::Date::Easter { year },
        Rule::month => ds::Date::Fixed {
            year,
            month: build_month(first),
            day: build_daynum(pairs.next().expect("missing day")),
        },
        other => unexpected_token(other, Rule::date_from),
    }
}

fn build_date_to(pair: Pair<Rule>, from: ds::Date) -> Result<ds::Date> {
    assert_eq!(pair.as_rule(), Rule::date_to);
    let pair = pair.into_inner().next().expect("empty date (to)");

    Ok(match pair.as_rule() {
        Rule::date_from => build_date_from(pair),
        Rule::daynum => {
            let daynum = build_daynum(pair.clone());

            match from {
                ds::Date::Easter { .. } => {
                    return Err(unsupported("easter followed by a day number", &pair));
                }
                ds::Date::Fixed { mut year, mut month, day } => {
                    if day > daynum {
                        month = month.next();

                        if month == ds::Month::January {
                            if let Some(x) = year.as_mut() {
                                *x += 1
                            }
                        }
                    }

                    ds::Date::Fixed { year, month, day: daynum }
                }
            }
        }
        other => unexpected_token(other, Rule::date_to),
    })
}

// ---
// --- Year selector
// ---

fn build_year_range(pair: Pair<Rule>) -> Result<ds::YearRange> {
    assert_eq!(pair.as_rule(), Rule::year_range);
    let mut rules = pair.into_inner();

    let start = build_year(rules.next().expect("empty year range"));
    let end = rules.next().map(|pair| match pair.as_rule() {
        Rule::year => build_year(pair),
        Rule::year_range_plus => 9999,
        other => unexpected_token(other, Rule::year_range),
    });

    let step = rules.next().map(build_positive_number).transpose()?;
    let step = build_step(step, "an integer in [1, 2**16[")?;

    Ok(ds::YearRange { range: start..=end.unwrap_or(start), step })
}

// ---
// --- Basic elements
// ---

/// Builds every child of a comma-separated sequence.
fn build_list<T>(
    pair: Pair<Rule>,
    rule: Rule,
    build_item: impl Fn(Pair<Rule>) -> Result<T>,
) -> Result<Vec<T>> {
    assert_eq!(pair.as_rule(), rule);
    pair.into_inner().map(build_item).collect()
}

fn build_step<T: TryFrom<u64>>(step: Option<u64>, expected: &str) -> Result<T> {
    let value = step.unwrap_or(1);

    value
        .try_into()
        .ok()
        .filter(|_| value > 0)
        .ok_or_else(|| Error::Overflow { value: value.to_string(), expected: expected.to_string() })
}

fn build_sign(pair: Pair<Rule>) -> i16 {
    assert_eq!(pair.as_rule(), Rule::plus_or_minus);

    if pair.as_str() == "-" {
        -1
    } else {
        1
    }
}

fn build_clock(pair: Pair<Rule>, max_hour: u8) -> Result<ExtendedTime> {
    let mut pairs = pair.into_inner();

    let hour: u8 = pairs
        .next()
        .expect("missing hour")
        .as_str()
        .parse()
        .expect("invalid hour");

    let minutes: u8 = pairs
        .next()
        .expect("missing minutes")
        .as_str()
        .parse()
        .expect("invalid minutes");

    ExtendedTime::new(hour, minutes)
        .filter(|time| *time <= ExtendedTime::new(max_hour, 0).unwrap_or(ExtendedTime::MIDNIGHT_48))
        .ok_or_else(|| Error::Overflow {
            value: format!("{hour:02}:{minutes:02}"),
            expected: format!("a time between 00:00 and {max_hour:02}:00"),
        })
}

fn build_hour_minutes(pair: Pair<Rule>) -> Result<ExtendedTime> {
    assert_eq!(pair.as_rule(), Rule::hour_minutes);
    build_clock(pair, 24)
}

fn build_extended_hour_minutes(pair: Pair<Rule>) -> Result<ExtendedTime> {
    assert_eq!(pair.as_rule(), Rule::extended_hour_minutes);
    build_clock(pair, 48)
}

fn build_wday(pair: Pair<Rule>) -> ds::Weekday {
    assert_eq!(pair.as_rule(), Rule::wday);
    ds::weekday_from_str(pair.as_str()).expect("grammar error: unknown weekday")
}

fn build_daynum(pair: Pair<Rule>) -> u8 {
    assert_eq!(pair.as_rule(), Rule::daynum);
    let daynum = pair.as_str().parse().expect("invalid month format");

    if daynum == 0 {
        #[cfg(feature = "log")]
        log::warn!("Found day number 0 in opening hours: specify the 1st or 31st instead.");
        return 1;
    }

    if daynum > 31 {
        #[cfg(feature = "log")]
        log::warn!("Found day number {daynum} in opening hours");
        return 31;
    }

    daynum
}

fn build_weeknum(pair: Pair<Rule>) -> Result<u8> {
    assert_eq!(pair.as_rule(), Rule::weeknum);
    let weeknum: u8 = pair.as_str().parse().expect("invalid weeknum format");

    if (1..=53).contains(&weeknum) {
        Ok(weeknum)
    } else {
        Err(Error::Overflow {
            value: weeknum.to_string(),
            expected: "a week number in [1, 53]".to_string(),
        })
    }
}

fn build_month(pair: Pair<Rule>) -> ds::Month {
    assert_eq!(pair.as_rule(), Rule::month);
    ds::Month::from_abbreviation(pair.as_str()).expect("grammar error: unknown month")
}

fn build_year(pair: Pair<Rule>) -> u16 {
    assert_eq!(pair.as_rule(), Rule::year);
    pair.as_str().parse().expect("invalid year format")
}

fn build_positive_number(pair: Pair<Rule>) -> Result<u64> {
    assert_eq!(pair.as_rule(), Rule::positive_number);
    pair.as_str().parse().map_err(|_| Error::Overflow {
        value: pair.as_str().to_string(),
        expected: "a number between 0 and 2**64".to_string(),
    })
}

fn build_comment(pair: Pair<Rule>) -> String {
    assert_eq!(pair.as_rule(), Rule::comment);
    let inner = pair.into_inner().next().expect("empty comment");
    inner.as_str().to_string()
}
