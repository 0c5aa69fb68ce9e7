use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// A language code paired with a region code, e.g. `sv-SE`.
///
/// The language is kept lowercase and the region uppercase so that
/// `sv-se`, `SV_SE` and `sv-SE` are the same cache key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: String
}

impl Locale {
    pub fn new(language: &str, region: &str) -> Locale {
        Locale {
            language: language.to_ascii_lowercase(),
            region: region.to_ascii_uppercase()
        }
    }

    /// Parses a `language-REGION` or `language_REGION` tag.
    pub fn parse(tag: &str) -> Result<Locale, ConfigurationError> {
        let invalid = || ConfigurationError::InvalidLocale(tag.to_owned());
        let (language, region) = tag.split_once(['-', '_']).ok_or_else(invalid)?;
        let is_code = |code: &str| !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric());
        if !is_code(language) || !is_code(region) {
            return Err(invalid());
        }
        Ok(Locale::new(language, region))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl FromStr for Locale {
    type Err = ConfigurationError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Locale::parse(tag)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.language, self.region)
    }
}
