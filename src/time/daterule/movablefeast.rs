use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

/// A feast whose date is computed from the year alone.
pub type MovableFeast = fn(i32) -> Option<NaiveDate>;

/// First year of the Gregorian calendar.
const GREGORIAN_REFORM_YEAR: i32 = 1583;

/// Western Easter Sunday by Gauss's method.
///
/// Returns `None` before the Gregorian reform and past the last year `NaiveDate` can hold.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    if !(GREGORIAN_REFORM_YEAR..=NaiveDate::MAX.year()).contains(&year) {
        return None;
    }

    let g = year % 19;
    let c = year / 100;
    let c_div_4 = c / 4;
    let h = (c - c_div_4 - (8 * c + 13) / 25 + 19 * g + 15) % 30;
    let h_div_28 = h / 28;
    let i = h - h_div_28 * (1 - h_div_28 * (29 / (h + 1)) * ((21 - g) / 11));
    let day_of_march = i - ((year + year / 4 + i + 2 - c + c_div_4) % 7) + 28;

    if day_of_march > 31 {
        NaiveDate::from_ymd_opt(year, 4, (day_of_march - 31) as u32)
    } else {
        NaiveDate::from_ymd_opt(year, 3, day_of_march as u32)
    }
}

/// Name → feast lookup used by the date expression grammar.
///
/// Names are stored and looked up lowercased.
#[derive(Clone, Debug)]
pub struct MovableFeastRegistry {
    feasts: HashMap<String, MovableFeast>,
}

impl MovableFeastRegistry {
    pub fn new() -> MovableFeastRegistry {
        MovableFeastRegistry { feasts: HashMap::new() }
    }

    pub fn with_defaults() -> MovableFeastRegistry {
        let mut registry = MovableFeastRegistry::new();
        registry.register("easter", easter_sunday);
        registry
    }

    /// Adds or replaces a feast, returning the previous one under that name.
    pub fn register(&mut self, name: &str, feast: MovableFeast) -> Option<MovableFeast> {
        self.feasts.insert(name.to_lowercase(), feast)
    }

    pub fn get(&self, name: &str) -> Option<MovableFeast> {
        self.feasts.get(&name.to_lowercase()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.feasts.contains_key(&name.to_lowercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.feasts.keys().map(String::as_str)
    }
}

impl Default for MovableFeastRegistry {
    fn default() -> Self {
        MovableFeastRegistry::with_defaults()
    }
}
