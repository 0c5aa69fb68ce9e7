use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::cache::boundedcache::BoundedCache;
use crate::configuration::Configuration;
use crate::error::HolidayError;
use crate::locale::Locale;
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::holidayentry::MaterializedDay;
use crate::time::daterule::movablefeast::MovableFeastRegistry;

pub type YearKey = (Locale, i32);

/// Query facade over a configuration.
///
/// Owns two caches whose lifetime is that of the `LocaleCache` itself:
///
/// - one [`HolidayCalendar`] per locale, built on first use and never evicted;
/// - the holiday-kind days of recently queried `(locale, year)` pairs, kept in a
///   [`BoundedCache`] sized by [`CacheConfiguration::year_capacity`].
///
/// Calendars are built outside the lock. Two threads asking for the same new
/// locale may both build it; the first insert is kept and the other discarded.
///
/// [`CacheConfiguration::year_capacity`]: crate::configuration::CacheConfiguration::year_capacity
pub struct LocaleCache {
    configuration: Configuration,
    registry: MovableFeastRegistry,
    calendars: RwLock<HashMap<Locale, Arc<HolidayCalendar>>>,
    holidays_by_year: BoundedCache<YearKey, Arc<[MaterializedDay]>>
}

impl LocaleCache {
    pub fn new(configuration: Configuration) -> LocaleCache {
        let capacity = configuration.cache().year_capacity();
        LocaleCache::with_capacity(configuration, capacity)
    }

    pub fn with_capacity(configuration: Configuration, capacity: usize) -> LocaleCache {
        LocaleCache {
            configuration,
            registry: MovableFeastRegistry::with_defaults(),
            calendars: RwLock::new(HashMap::new()),
            holidays_by_year: BoundedCache::new(capacity)
        }
    }

    /// Replaces the movable feasts date expressions may refer to.
    pub fn with_movable_feasts(mut self, registry: MovableFeastRegistry) -> LocaleCache {
        self.registry = registry;
        self.calendars.get_mut().clear();
        self.holidays_by_year.clear();
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn get_calendar(&self, locale: &Locale) -> Result<Arc<HolidayCalendar>, HolidayError> {
        if let Some(calendar) = self.calendars.read().get(locale) {
            trace!(%locale, "calendar cache hit");
            return Ok(Arc::clone(calendar));
        }

        debug!(%locale, "calendar cache miss");
        let calendar = Arc::new(HolidayCalendar::from_configuration(&self.configuration, locale, &self.registry)?);
        let mut calendars = self.calendars.write();
        let calendar = calendars.entry(locale.clone()).or_insert(calendar);
        Ok(Arc::clone(calendar))
    }

    /// Every entry of `locale` in `year`, observances included. Bypasses the year cache.
    pub fn get_days(&self, locale: &Locale, year: i32) -> Result<Vec<MaterializedDay>, HolidayError> {
        Ok(self.get_calendar(locale)?.get_days(year))
    }

    pub fn is_holiday(&self, d: NaiveDate, locale: &Locale) -> Result<bool, HolidayError> {
        let calendar = self.get_calendar(locale)?;
        if calendar.is_day_off(d) {
            return Ok(true);
        }

        let year = d.year();
        let holidays = self.holidays_by_year.get_or_insert_with((locale.clone(), year), || {
            debug!(%locale, year, "materializing holidays");
            Arc::from(calendar.holidays(year))
        });
        Ok(holidays.iter().any(|day| day.date() == d))
    }

    /// Number of locales whose calendar has been built.
    pub fn calendar_count(&self) -> usize {
        self.calendars.read().len()
    }

    pub fn year_cache(&self) -> &BoundedCache<YearKey, Arc<[MaterializedDay]>> {
        &self.holidays_by_year
    }
}
