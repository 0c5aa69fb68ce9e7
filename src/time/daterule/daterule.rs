use chrono::{
    Datelike,
    Days,
    Month,
    NaiveDate,
    Weekday
};

use super::movablefeast::MovableFeast;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Direction {
    Before,
    After
}

impl Direction {
    pub fn from_name(name: &str) -> Option<Direction> {
        if name.eq_ignore_ascii_case("before") {
            Some(Direction::Before)
        } else if name.eq_ignore_ascii_case("after") {
            Some(Direction::After)
        } else {
            None
        }
    }
}

/// A parsed date expression, one variant per grammar form.
///
/// A rule is a pure function of the year and is shared freely between threads.
#[derive(Clone, Debug)]
pub enum DateRule {
    /// `MM-DD`
    Fixed { month: u32, day: u32 },
    /// `<feast>`
    MovableFeast { name: String, feast: MovableFeast },
    /// `<feast> <offset>`
    MovableFeastOffset { name: String, feast: MovableFeast, offset: i64 },
    /// `<weekday> before|after MM-DD`
    WeekdayRelative { weekday: Weekday, direction: Direction, month: u32, day: u32 },
    /// `<weekday> in <month>`
    WeekdayInMonth { weekday: Weekday, month: Month },
}

impl DateRule {
    /// Resolves the rule against `year`.
    ///
    /// `None` means the rule has no date in that year, e.g. `02-29` in a common year.
    pub fn resolve(&self, year: i32) -> Option<NaiveDate> {
        match self {
            DateRule::Fixed { month, day } => NaiveDate::from_ymd_opt(year, *month, *day),
            DateRule::MovableFeast { feast, .. } => feast(year),
            DateRule::MovableFeastOffset { feast, offset, .. } => {
                let magnitude = Days::new(offset.unsigned_abs());
                let d = feast(year)?;
                if *offset >= 0 {
                    d.checked_add_days(magnitude)
                } else {
                    d.checked_sub_days(magnitude)
                }
            },
            DateRule::WeekdayRelative { weekday, direction, month, day } => {
                let anchor = NaiveDate::from_ymd_opt(year, *month, *day)?;
                let current = anchor.weekday().num_days_from_monday();
                let target = weekday.num_days_from_monday();
                match direction {
                    Direction::After => anchor.checked_add_days(Days::new(((target + 7 - current) % 7) as u64)),
                    Direction::Before => anchor.checked_sub_days(Days::new(((current + 7 - target) % 7) as u64))
                }
            },
            DateRule::WeekdayInMonth { weekday, month } => {
                NaiveDate::from_weekday_of_month_opt(year, month.number_from_month(), *weekday, 1)
            }
        }
    }
}

// Feasts compare by registered name; function pointers have no stable identity.
impl PartialEq for DateRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DateRule::Fixed { month: m1, day: d1 }, DateRule::Fixed { month: m2, day: d2 }) => {
                m1 == m2 && d1 == d2
            },
            (DateRule::MovableFeast { name: n1, .. }, DateRule::MovableFeast { name: n2, .. }) => n1 == n2,
            (
                DateRule::MovableFeastOffset { name: n1, offset: o1, .. },
                DateRule::MovableFeastOffset { name: n2, offset: o2, .. }
            ) => n1 == n2 && o1 == o2,
            (
                DateRule::WeekdayRelative { weekday: w1, direction: r1, month: m1, day: d1 },
                DateRule::WeekdayRelative { weekday: w2, direction: r2, month: m2, day: d2 }
            ) => w1 == w2 && r1 == r2 && m1 == m2 && d1 == d2,
            (
                DateRule::WeekdayInMonth { weekday: w1, month: m1 },
                DateRule::WeekdayInMonth { weekday: w2, month: m2 }
            ) => w1 == w2 && m1 == m2,
            _ => false
        }
    }
}

impl Eq for DateRule {}
