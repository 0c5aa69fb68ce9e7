use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::{debug, info};

use crate::configuration::{Configuration, RegionConfiguration};
use crate::error::{ConfigurationError, HolidayError};
use crate::locale::Locale;
use crate::time::calendar::holidayentry::{DayKind, HolidayEntry, MaterializedDay};
use crate::time::daterule::dateexpression::parse_date_expression;
use crate::time::daterule::movablefeast::MovableFeastRegistry;
use crate::time::utility::weekday_from_name;

/// Holidays and observances of one locale.
///
/// Built once from configuration and read-only afterwards, so a calendar can be
/// shared between threads behind an `Arc`.
#[derive(Clone, Debug)]
pub struct HolidayCalendar {
    day_off: Weekday,
    supported_languages: HashSet<String>,
    region_names: HashMap<String, String>,
    entries: Vec<HolidayEntry>
}

impl HolidayCalendar {
    pub fn new(day_off: Weekday, supported_languages: HashSet<String>, entries: Vec<HolidayEntry>) -> HolidayCalendar {
        HolidayCalendar {
            day_off,
            supported_languages,
            region_names: HashMap::new(),
            entries
        }
    }

    pub fn from_configuration(
        configuration: &Configuration,
        locale: &Locale,
        registry: &MovableFeastRegistry,
    ) -> Result<HolidayCalendar, HolidayError> {
        let region = configuration.region(locale.region())?;
        HolidayCalendar::from_region(locale.region(), locale.language(), region, registry)
    }

    /// Builds the calendar of `region_code` with names in `language`.
    ///
    /// Every date expression is parsed here; the first failing entry aborts construction.
    pub fn from_region(
        region_code: &str,
        language: &str,
        region: &RegionConfiguration,
        registry: &MovableFeastRegistry,
    ) -> Result<HolidayCalendar, HolidayError> {
        if !region.supports_language(language) {
            return Err(ConfigurationError::LanguageNotSupported {
                region: region_code.to_owned(),
                language: language.to_owned()
            }.into());
        }

        let day_off = weekday_from_name(region.dayoff()).ok_or_else(|| ConfigurationError::UnknownDayOff {
            region: region_code.to_owned(),
            name: region.dayoff().to_owned()
        })?;

        let mut entries = Vec::new();
        for (expression, value) in region.days() {
            let properties = RegionConfiguration::day_properties(expression, value)?;
            let name = properties.display_name(language).ok_or_else(|| ConfigurationError::MissingName {
                expression: expression.to_owned(),
                language: language.to_owned()
            })?;
            let kind = match properties.kind() {
                Some(kind) => DayKind::from_name(kind).ok_or_else(|| ConfigurationError::UnknownDayType {
                    expression: expression.to_owned(),
                    kind: kind.to_owned()
                })?,
                None => DayKind::default()
            };
            let rule = parse_date_expression(expression, registry)?;
            entries.push(HolidayEntry::new(name.to_owned(), kind, rule));
        }

        info!(region = region_code, language, entries = entries.len(), "holiday calendar built");

        Ok(HolidayCalendar {
            day_off,
            supported_languages: region.langs().iter().map(|lang| lang.to_ascii_lowercase()).collect(),
            region_names: region.names().clone(),
            entries
        })
    }

    pub fn day_off(&self) -> Weekday {
        self.day_off
    }

    pub fn supported_languages(&self) -> &HashSet<String> {
        &self.supported_languages
    }

    pub fn supports_language(&self, language: &str) -> bool {
        self.supported_languages.contains(&language.to_ascii_lowercase())
    }

    /// Name of the region itself in `language`, if configured.
    pub fn region_name(&self, language: &str) -> Option<&str> {
        self.region_names.get(language).map(String::as_str)
    }

    pub fn entries(&self) -> &[HolidayEntry] {
        &self.entries
    }

    /// Every entry resolved against `year`, in declaration order.
    ///
    /// Entries without a date in `year` are left out.
    pub fn get_days(&self, year: i32) -> Vec<MaterializedDay> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let day = entry.materialize(year);
                if day.is_none() {
                    debug!(entry = entry.name(), year, "entry has no date in year");
                }
                day
            })
            .collect()
    }

    /// Holiday-kind days of `year`; observances are left out.
    pub fn holidays(&self, year: i32) -> Vec<MaterializedDay> {
        self.get_days(year)
            .into_iter()
            .filter(MaterializedDay::is_holiday)
            .collect()
    }

    #[inline]
    pub fn is_day_off(&self, d: NaiveDate) -> bool {
        d.weekday() == self.day_off
    }

    /// Uncached holiday test. The weekly day off always counts.
    pub fn is_holiday(&self, d: NaiveDate) -> bool {
        if self.is_day_off(d) {
            return true;
        }
        self.entries
            .iter()
            .filter(|entry| entry.kind() == DayKind::Holiday)
            .any(|entry| entry.rule().resolve(d.year()) == Some(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::daterule::daterule::DateRule;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn configuration(days: serde_json::Value) -> Configuration {
        let json = serde_json::json!({
            "holidays": {
                "SE": {
                    "names": { "sv": "Sverige", "en": "Sweden" },
                    "dayoff": "Sunday",
                    "langs": ["sv", "en"],
                    "days": days
                }
            }
        });
        serde_json::from_value(json).unwrap()
    }

    fn build(days: serde_json::Value, locale: &str) -> Result<HolidayCalendar, HolidayError> {
        HolidayCalendar::from_configuration(
            &configuration(days),
            &Locale::parse(locale).unwrap(),
            &MovableFeastRegistry::with_defaults(),
        )
    }

    #[test]
    fn builds_entries_in_order_with_localized_names() {
        let calendar = build(serde_json::json!({
            "easter -2": { "name": { "sv": "Långfredagen", "en": "Good Friday" } },
            "01-01": { "_name": "Nyårsdagen" },
            "02-14": { "_name": "Alla hjärtans dag", "type": "Observance" }
        }), "en-SE").unwrap();

        assert_eq!(calendar.day_off(), Weekday::Sun);
        assert!(calendar.supports_language("SV"));
        assert_eq!(calendar.region_name("en"), Some("Sweden"));

        let names: Vec<&str> = calendar.entries().iter().map(HolidayEntry::name).collect();
        assert_eq!(names, vec!["Good Friday", "Nyårsdagen", "Alla hjärtans dag"]);
        assert_eq!(calendar.entries()[1].rule(), &DateRule::Fixed { month: 1, day: 1 });
        assert_eq!(calendar.entries()[2].kind(), DayKind::Observance);
    }

    #[test]
    fn get_days_is_deterministic_and_ordered() {
        let calendar = build(serde_json::json!({
            "12-25": { "_name": "Juldagen" },
            "easter": { "_name": "Påskdagen" },
            "saturday after 06-20": { "_name": "Midsommardagen" }
        }), "sv-SE").unwrap();

        let days = calendar.get_days(2017);
        assert_eq!(days, calendar.get_days(2017));
        let dates: Vec<NaiveDate> = days.iter().map(MaterializedDay::date).collect();
        assert_eq!(dates, vec![ymd(2017, 12, 25), ymd(2017, 4, 16), ymd(2017, 6, 24)]);
    }

    #[test]
    fn holidays_exclude_observances() {
        let calendar = build(serde_json::json!({
            "01-06": { "_name": "Trettondedag jul" },
            "02-14": { "_name": "Alla hjärtans dag", "type": "observance" }
        }), "sv-SE").unwrap();

        let holidays = calendar.holidays(2017);
        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].name(), "Trettondedag jul");
        assert!(calendar.is_holiday(ymd(2017, 1, 6)));
        assert!(!calendar.is_holiday(ymd(2017, 2, 14)));
    }

    #[test]
    fn assembled_from_entries() {
        let entries = vec![
            HolidayEntry::new("Labour Day".to_owned(), DayKind::Holiday, DateRule::Fixed { month: 5, day: 1 }),
            HolidayEntry::new("Mother's Day".to_owned(), DayKind::Observance, DateRule::WeekdayRelative {
                weekday: Weekday::Sun,
                direction: crate::time::daterule::daterule::Direction::After,
                month: 5,
                day: 8,
            }),
        ];
        let calendar = HolidayCalendar::new(Weekday::Sat, HashSet::from(["en".to_owned()]), entries);

        assert!(calendar.supports_language("en"));
        assert_eq!(calendar.region_name("en"), None);
        let dates: Vec<NaiveDate> = calendar.get_days(2024).iter().map(MaterializedDay::date).collect();
        assert_eq!(dates, vec![ymd(2024, 5, 1), ymd(2024, 5, 12)]);
        assert!(calendar.is_holiday(ymd(2024, 5, 1)));
        assert!(calendar.is_holiday(ymd(2024, 5, 4)));
        assert!(!calendar.is_holiday(ymd(2024, 5, 12)));
    }

    #[test]
    fn day_off_is_always_a_holiday() {
        let calendar = build(serde_json::json!({}), "sv-SE").unwrap();
        assert!(calendar.is_holiday(ymd(2017, 3, 5)));
        assert!(!calendar.is_holiday(ymd(2017, 3, 6)));
    }

    #[test]
    fn leap_day_entry_skipped_in_common_years() {
        let calendar = build(serde_json::json!({ "02-29": { "_name": "Skottdagen" } }), "sv-SE").unwrap();
        assert_eq!(calendar.get_days(2020).len(), 1);
        assert!(calendar.get_days(2021).is_empty());
    }

    #[test]
    fn unsupported_language() {
        let error = build(serde_json::json!({}), "de-SE").unwrap_err();
        assert!(matches!(
            error,
            HolidayError::Configuration(ConfigurationError::LanguageNotSupported { ref language, .. }) if language == "de"
        ));
    }

    #[test]
    fn missing_name() {
        let error = build(serde_json::json!({ "01-01": { "name": { "en": "New Year's Day" } } }), "sv-SE").unwrap_err();
        assert!(matches!(
            error,
            HolidayError::Configuration(ConfigurationError::MissingName { ref expression, .. }) if expression == "01-01"
        ));
    }

    #[test]
    fn unknown_type() {
        let error = build(serde_json::json!({ "01-01": { "_name": "Nyårsdagen", "type": "feast" } }), "sv-SE").unwrap_err();
        assert!(matches!(error, HolidayError::Configuration(ConfigurationError::UnknownDayType { .. })));
    }

    #[test]
    fn parse_errors_fail_construction() {
        let error = build(serde_json::json!({
            "01-01": { "_name": "Nyårsdagen" },
            "last monday of may": { "_name": "Memorial Day" }
        }), "sv-SE").unwrap_err();
        match error {
            HolidayError::Parse(error) => assert_eq!(error.expression(), "last monday of may"),
            other => panic!("unexpected error {:?}", other)
        }
    }

    #[test]
    fn unknown_day_off() {
        let json = serde_json::json!({
            "holidays": { "SE": { "dayoff": "caturday", "langs": ["sv"], "days": {} } }
        });
        let configuration: Configuration = serde_json::from_value(json).unwrap();
        let error = HolidayCalendar::from_configuration(
            &configuration,
            &Locale::new("sv", "SE"),
            &MovableFeastRegistry::with_defaults(),
        ).unwrap_err();
        assert!(matches!(error, HolidayError::Configuration(ConfigurationError::UnknownDayOff { .. })));
    }
}
