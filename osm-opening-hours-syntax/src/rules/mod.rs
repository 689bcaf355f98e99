pub mod day;
pub mod time;

use std::fmt::Display;
use std::sync::Arc;

use crate::display::write_selector;

// Field

/// A parsed opening hours expression.
///
/// Rules are kept in source order, which is meaningful: a rule overrides the
/// rules before it for the dates it matches, unless it is additional.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Field {
    original: String,
    sanitized: String,
    rules: Vec<Rule>,
    is_24_7: bool,
    needs_solar: time::SolarEvents,
}

impl Field {
    pub fn new(original: String, sanitized: String, rules: Vec<Rule>) -> Self {
        let is_24_7 = match rules.as_slice() {
            [rule] => rule.is_always_open(),
            _ => false,
        };

        let needs_solar = rules
            .iter()
            .fold(time::SolarEvents::empty(), |acc, rule| acc | rule.solar_events());

        Self { original, sanitized, rules, is_24_7, needs_solar }
    }

    /// The text this field was built from, before sanitization.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The text that was actually parsed.
    pub fn sanitized(&self) -> &str {
        &self.sanitized
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Check if this field is made of a single rule that is open all day,
    /// every day.
    ///
    /// ```
    /// use osm_opening_hours_syntax::parse;
    ///
    /// assert!(parse("24/7").unwrap().is_24_7());
    /// assert!(parse("Mo-Su 00:00-24:00").unwrap().is_24_7());
    /// assert!(!parse("24/7; PH off").unwrap().is_24_7());
    /// ```
    pub fn is_24_7(&self) -> bool {
        self.is_24_7
    }

    /// Set of solar events that need to be resolved to evaluate this field.
    ///
    /// ```
    /// use osm_opening_hours_syntax::{parse, SolarEvents};
    ///
    /// let field = parse("Mo-Fr (sunrise+01:00)-sunset").unwrap();
    /// assert_eq!(field.needs_solar(), SolarEvents::SUNRISE | SolarEvents::SUNSET);
    /// assert!(parse("Mo-Fr 10:00-18:00").unwrap().needs_solar().is_empty());
    /// ```
    pub fn needs_solar(&self) -> time::SolarEvents {
        self.needs_solar
    }

    /// If this field only holds a comment, which can't be scheduled, get its
    /// text.
    pub(crate) fn comment_only(&self) -> Option<&str> {
        match self.rules.as_slice() {
            [rule]
                if rule.kind == RuleKind::Comment
                    && rule.selector.is_empty()
                    && rule.spans.is_empty() =>
            {
                rule.comment.as_deref()
            }
            _ => None,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(first) = self.rules.first() else {
            return Ok(());
        };

        write!(f, "{first}")?;

        for rule in &self.rules[1..] {
            let separator = if rule.additional { ", " } else { "; " };
            write!(f, "{separator}{rule}")?;
        }

        Ok(())
    }
}

// Rule

/// One clause of a field.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Rule {
    pub selector: day::DaySelector,
    pub spans: Vec<time::TimeSpan>,
    pub kind: RuleKind,
    pub comment: Option<Arc<str>>,
    /// Set for rules introduced by a comma, which add up to the rule they
    /// follow instead of overriding it.
    pub additional: bool,
}

impl Rule {
    /// The implicit rule that applies when no rule matches a date.
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn is_always_open(&self) -> bool {
        self.kind == RuleKind::Open
            && !self.additional
            && self.selector.is_every_day()
            && self.spans == [time::TimeSpan::full_day()]
    }

    pub fn solar_events(&self) -> time::SolarEvents {
        self.spans
            .iter()
            .fold(time::SolarEvents::empty(), |acc, span| acc | span.solar_events())
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut is_empty = true;

        if self.selector.is_empty() && self.spans == [time::TimeSpan::full_day()] {
            write!(f, "24/7")?;
            is_empty = false;
        } else {
            if !self.selector.is_empty() {
                write!(f, "{}", self.selector)?;
                is_empty = false;
            }

            if !self.spans.is_empty() {
                if !is_empty {
                    write!(f, " ")?;
                }

                write_selector(f, &self.spans)?;
                is_empty = false;
            }
        }

        let modifier = match self.kind {
            RuleKind::Open => None,
            RuleKind::Closed => Some("off"),
            RuleKind::Comment if self.comment.is_none() || !self.spans.is_empty() => {
                Some("unknown")
            }
            RuleKind::Comment => None,
        };

        if let Some(text) = modifier {
            if !is_empty {
                write!(f, " ")?;
            }

            write!(f, "{text}")?;
            is_empty = false;
        }

        if let Some(comment) = &self.comment {
            if !is_empty {
                write!(f, " ")?;
            }

            write!(f, "\"{comment}\"")?;
        }

        Ok(())
    }
}

// RuleKind

#[derive(Copy, Clone, Debug, Default, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub enum RuleKind {
    Open,
    #[default]
    Closed,
    /// The state is described by a comment, such as *"on appointment"*.
    Comment,
}
