use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigurationError;

const DEFAULT_YEAR_CAPACITY: usize = 20;

fn default_year_capacity() -> usize {
    DEFAULT_YEAR_CAPACITY
}

#[derive(Clone, Debug, Deserialize)]
pub struct CacheConfiguration {
    #[serde(default = "default_year_capacity")]
    year_capacity: usize
}

impl CacheConfiguration {
    pub fn new(year_capacity: usize) -> CacheConfiguration {
        CacheConfiguration { year_capacity }
    }

    /// Number of (locale, year) holiday lists kept by the query cache.
    pub fn year_capacity(&self) -> usize {
        self.year_capacity
    }
}

impl Default for CacheConfiguration {
    fn default() -> Self {
        CacheConfiguration::new(DEFAULT_YEAR_CAPACITY)
    }
}

/// Properties of a single `days` entry.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DayProperties {
    #[serde(default)]
    name: Option<HashMap<String, String>>,
    #[serde(default, rename = "_name")]
    shared_name: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>
}

impl DayProperties {
    /// Localized name for `language`, falling back to the shared `_name`.
    pub fn display_name(&self, language: &str) -> Option<&str> {
        self.name
            .as_ref()
            .and_then(|names| names.get(language))
            .or(self.shared_name.as_ref())
            .map(String::as_str)
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RegionConfiguration {
    #[serde(default)]
    names: HashMap<String, String>,
    dayoff: String,
    #[serde(default)]
    langs: Vec<String>,
    days: serde_json::Map<String, serde_json::Value>
}

impl RegionConfiguration {
    pub fn names(&self) -> &HashMap<String, String> {
        &self.names
    }

    pub fn dayoff(&self) -> &str {
        &self.dayoff
    }

    pub fn langs(&self) -> &[String] {
        &self.langs
    }

    pub fn supports_language(&self, language: &str) -> bool {
        self.langs.iter().any(|lang| lang.eq_ignore_ascii_case(language))
    }

    /// Date expressions with their raw properties, in declaration order.
    pub fn days(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.days.iter().map(|(expression, value)| (expression.as_str(), value))
    }

    pub fn day_properties(expression: &str, value: &serde_json::Value) -> Result<DayProperties, ConfigurationError> {
        DayProperties::deserialize(value).map_err(|source| ConfigurationError::MalformedEntry {
            expression: expression.to_owned(),
            source
        })
    }
}

/// Region codes are stored uppercase, matching [`Locale`](crate::locale::Locale).
fn uppercase_region_codes(holidays: HashMap<String, RegionConfiguration>) -> HashMap<String, RegionConfiguration> {
    holidays
        .into_iter()
        .map(|(code, region)| (code.to_ascii_uppercase(), region))
        .collect()
}

fn deserialize_regions<'de, D>(deserializer: D) -> Result<HashMap<String, RegionConfiguration>, D::Error>
where
    D: Deserializer<'de>,
{
    HashMap::deserialize(deserializer).map(uppercase_region_codes)
}

/// Parsed holiday configuration: one subtree per region code.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Configuration {
    #[serde(default, deserialize_with = "deserialize_regions")]
    holidays: HashMap<String, RegionConfiguration>,
    #[serde(default)]
    cache: CacheConfiguration
}

impl Configuration {
    pub fn new(holidays: HashMap<String, RegionConfiguration>, cache: CacheConfiguration) -> Configuration {
        Configuration {
            holidays: uppercase_region_codes(holidays),
            cache
        }
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration = serde_json::from_reader(reader)?;
        Ok(configuration)
    }

    /// Looks up a region by code, ignoring case.
    pub fn region(&self, region: &str) -> Result<&RegionConfiguration, ConfigurationError> {
        self.holidays
            .get(&region.to_ascii_uppercase())
            .ok_or_else(|| ConfigurationError::RegionNotFound(region.to_owned()))
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.holidays.keys().map(String::as_str)
    }

    pub fn cache(&self) -> &CacheConfiguration {
        &self.cache
    }
}

impl FromStr for Configuration {
    type Err = ConfigurationError;

    fn from_str(json: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(json)?)
    }
}
