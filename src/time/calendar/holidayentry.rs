use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::daterule::daterule::DateRule;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Default, Serialize, Deserialize)]
pub enum DayKind {
    Observance,
    #[default]
    Holiday
}

impl DayKind {
    pub fn from_name(name: &str) -> Option<DayKind> {
        if name.eq_ignore_ascii_case("holiday") {
            Some(DayKind::Holiday)
        } else if name.eq_ignore_ascii_case("observance") {
            Some(DayKind::Observance)
        } else {
            None
        }
    }
}

impl fmt::Display for DayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayKind::Observance => write!(f, "Observance"),
            DayKind::Holiday => write!(f, "Holiday")
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolidayEntry {
    name: String,
    kind: DayKind,
    rule: DateRule
}

impl HolidayEntry {
    pub fn new(name: String, kind: DayKind, rule: DateRule) -> HolidayEntry {
        HolidayEntry { name, kind, rule }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DayKind {
        self.kind
    }

    pub fn rule(&self) -> &DateRule {
        &self.rule
    }

    pub fn materialize(&self, year: i32) -> Option<MaterializedDay> {
        self.rule.resolve(year).map(|date| MaterializedDay {
            name: self.name.clone(),
            kind: self.kind,
            date
        })
    }
}

/// A [`HolidayEntry`] resolved against a specific year.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MaterializedDay {
    name: String,
    kind: DayKind,
    date: NaiveDate
}

impl MaterializedDay {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DayKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_holiday(&self) -> bool {
        self.kind == DayKind::Holiday
    }
}

impl fmt::Display for MaterializedDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.date, self.name, self.kind)
    }
}
