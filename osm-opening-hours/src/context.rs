use std::collections::{BTreeSet, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use chrono::NaiveDate;

// --
// -- Holidays
// --

/// A set of dates provided by the caller, such as the public holidays of a
/// country.
pub trait HolidayCalendar: Send + Sync + Debug {
    /// Check if the calendar contains given date.
    fn contains(&self, date: NaiveDate) -> bool;
}

impl HolidayCalendar for BTreeSet<NaiveDate> {
    fn contains(&self, date: NaiveDate) -> bool {
        BTreeSet::contains(self, &date)
    }
}

impl HolidayCalendar for HashSet<NaiveDate> {
    fn contains(&self, date: NaiveDate) -> bool {
        HashSet::contains(self, &date)
    }
}

impl HolidayCalendar for Vec<NaiveDate> {
    fn contains(&self, date: NaiveDate) -> bool {
        self.as_slice().contains(&date)
    }
}

/// Pairs a set of public holidays with a set of school holidays.
#[derive(Clone, Debug)]
pub struct ContextHolidays {
    pub(crate) public: Arc<dyn HolidayCalendar>,
    pub(crate) school: Arc<dyn HolidayCalendar>,
}

impl ContextHolidays {
    /// Create a new holidays context from sets of public and school holidays.
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use std::sync::Arc;
    ///
    /// use chrono::NaiveDate;
    /// use osm_opening_hours::ContextHolidays;
    ///
    /// let christmas = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
    /// let public = Arc::new(BTreeSet::from([christmas]));
    /// let holidays = ContextHolidays::new(public, Arc::new(Vec::<NaiveDate>::new()));
    /// assert!(holidays.get_public().contains(christmas));
    /// assert!(!holidays.get_school().contains(christmas));
    /// ```
    pub fn new(public: Arc<dyn HolidayCalendar>, school: Arc<dyn HolidayCalendar>) -> Self {
        Self { public, school }
    }

    /// Get the set of public holidays attached to this context.
    pub fn get_public(&self) -> &dyn HolidayCalendar {
        self.public.as_ref()
    }

    /// Get the set of school holidays attached to this context.
    pub fn get_school(&self) -> &dyn HolidayCalendar {
        self.school.as_ref()
    }
}

impl Default for ContextHolidays {
    fn default() -> Self {
        let empty: Arc<dyn HolidayCalendar> = Arc::new(BTreeSet::new());
        Self { public: empty.clone(), school: empty }
    }
}

/// All the context attached to a parsed OpeningHours expression and that can
/// alter its evaluation semantics.
#[derive(Clone, Debug, Default)]
pub struct Context {
    pub holidays: ContextHolidays,
}

impl Context {
    /// Attach a new holidays component to this context.
    pub fn with_holidays(self, holidays: ContextHolidays) -> Self {
        Self { holidays, ..self }
    }
}
