//! Best-effort cleanup of hand-written fields.
//!
//! Contributors often write fields that are almost valid: wrong case, `10h`
//! instead of `10:00`, spaces around dashes. [`normalize`] rewrites the most
//! common mistakes so that the parser has a better chance to succeed. Quoted
//! comments are left untouched.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

macro_rules! regex {
    ($pat:literal) => {{
        static RE: Lazy<Regex> = Lazy::new(|| Regex::new($pat).expect("invalid regex"));
        &*RE
    }};
}

/// Words of the grammar, written with their canonical case.
pub(crate) const KEYWORDS: &[&str] = &[
    "Mo", "Tu", "We", "Th", "Fr", "Sa", "Su", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul",
    "Aug", "Sep", "Oct", "Nov", "Dec", "PH", "SH", "dawn", "sunrise", "sunset", "dusk", "easter",
    "week", "open", "off", "closed", "unknown",
];

/// Rewrite a field into a form that is more likely to be accepted by the
/// parser. Applying it twice gives the same result as applying it once.
///
/// ```
/// use osm_opening_hours_syntax::sanitize::normalize;
///
/// assert_eq!(normalize("mo-sa 9:00 - 19:00;"), "Mo-Sa 09:00-19:00");
/// assert_eq!(normalize("Mo 10h-12h 14h-18h;sa OFF"), "Mo 10:00-12:00,14:00-18:00; Sa off");
/// ```
pub fn normalize(text: &str) -> String {
    let result = split_rules(text)
        .into_iter()
        .map(normalize_rule)
        .filter(|rule| !rule.is_empty())
        .collect::<Vec<_>>()
        .join("; ");

    #[cfg(feature = "log")]
    if result != text {
        log::debug!(raw = text, sanitized = result.as_str(); "Rewrote opening hours field");
    }

    result
}

/// Split a field on semicolons that are not part of a comment.
fn split_rules(text: &str) -> Vec<&str> {
    let mut rules = Vec::new();
    let mut in_comment = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '"' => in_comment = !in_comment,
            ';' if !in_comment => {
                rules.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    rules.push(text[start..].trim());
    rules.retain(|rule| !rule.is_empty());
    rules
}

fn normalize_rule(rule: &str) -> String {
    let collapsed = regex!(r"\s+").replace_all(rule, " ");

    if regex!(r"(?i)^24 ?(h|hours?|/7)?$").is_match(&collapsed) {
        return "24/7".to_string();
    }

    let mut result = String::with_capacity(collapsed.len());
    let mut rest = collapsed.as_ref();

    // Alternate between plain text and quoted comments.
    while !rest.is_empty() {
        let plain_end = rest.find('"').unwrap_or(rest.len());
        result.push_str(&normalize_plain(&rest[..plain_end]));
        rest = &rest[plain_end..];

        if rest.is_empty() {
            break;
        }

        let comment_end = rest[1..].find('"').map(|i| i + 2).unwrap_or(rest.len());
        result.push_str(&rest[..comment_end]);
        rest = &rest[comment_end..];
    }

    result.trim().to_string()
}

fn normalize_plain(text: &str) -> String {
    let text = regex!(r"\s*,\s*").replace_all(text, ",");
    let text = regex!(r"\b(\d{1,2})[hH](\d{2})\b").replace_all(&text, "$1:$2");
    let text = regex!(r"\b(\d{1,2})[hH]\b").replace_all(&text, "$1:00");
    let text = regex!(r"\b(\d):(\d{2})").replace_all(&text, "0$1:$2");

    let text = regex!(r"(?i)(\d{2}:\d{2}|sunrise|sunset|dawn|dusk|\))\s*-\s*(\d{2}:\d{2}|sunrise|sunset|dawn|dusk|\()")
        .replace_all(&text, "$1-$2");

    let text = replace_until_stable(regex!(r"(\d{2}:\d{2})-00:00\b"), &text, "$1-24:00");

    let text = regex!(r"[A-Za-z]+").replace_all(&text, |caps: &Captures| {
        let word = &caps[0];

        KEYWORDS
            .iter()
            .find(|keyword| keyword.eq_ignore_ascii_case(word))
            .map(|keyword| keyword.to_string())
            .unwrap_or_else(|| word.to_string())
    });

    join_time_spans(&text)
}

/// `10:00-12:00 14:00-18:00` => `10:00-12:00,14:00-18:00`
fn join_time_spans(text: &str) -> String {
    let span_sequence = regex!(
        r"((?:\d{2}:\d{2}|sunrise|sunset|dawn|dusk|\)))-((?:\d{2}:\d{2}|sunrise|sunset|dawn|dusk|\([a-z]+[+-]\d{2}:\d{2}\))) (\d{2}:\d{2}|sunrise|sunset|dawn|dusk|\()"
    );

    replace_until_stable(span_sequence, text, "$1-$2,$3")
}

/// Matches never overlap, so a replacement may create a new match right
/// after itself: apply it until nothing changes.
fn replace_until_stable(re: &Regex, text: &str, rep: &str) -> String {
    let mut text = text.to_string();

    loop {
        let replaced = re.replace_all(&text, rep).into_owned();

        if replaced == text {
            return text;
        }

        text = replaced;
    }
}
