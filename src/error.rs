use std::num::ParseIntError;

use thiserror::Error;

/// Raised while turning a textual date expression into a [`DateRule`].
///
/// Every variant carries the offending expression so that a failing entry can
/// be found in the configuration without further context.
///
/// [`DateRule`]: crate::time::daterule::daterule::DateRule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDateExpressionError {
    #[error("unknown date expression \"{0}\"")]
    UnknownExpression(String),

    #[error("unknown weekday '{name}' in date expression \"{expression}\"")]
    UnknownWeekday { expression: String, name: String },

    #[error("unknown month '{name}' in date expression \"{expression}\"")]
    UnknownMonth { expression: String, name: String },

    #[error("unknown movable feast '{name}' in date expression \"{expression}\"")]
    UnknownMovableFeast { expression: String, name: String },

    #[error("month {month} has no day {day} in date expression \"{expression}\"")]
    InvalidDate { expression: String, month: u32, day: u32 },

    #[error("invalid day offset in date expression \"{expression}\": {source}")]
    InvalidOffset { expression: String, source: ParseIntError },
}

impl ParseDateExpressionError {
    pub fn expression(&self) -> &str {
        match self {
            ParseDateExpressionError::UnknownExpression(expression) => expression,
            ParseDateExpressionError::UnknownWeekday { expression, .. }
            | ParseDateExpressionError::UnknownMonth { expression, .. }
            | ParseDateExpressionError::UnknownMovableFeast { expression, .. }
            | ParseDateExpressionError::InvalidDate { expression, .. }
            | ParseDateExpressionError::InvalidOffset { expression, .. } => expression,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("region '{0}' not found in configuration")]
    RegionNotFound(String),

    #[error("language '{language}' is not supported by region '{region}'")]
    LanguageNotSupported { region: String, language: String },

    #[error("invalid locale tag '{0}'")]
    InvalidLocale(String),

    #[error("unknown day off '{name}' for region '{region}'")]
    UnknownDayOff { region: String, name: String },

    #[error("entry \"{expression}\" has no name for language '{language}'")]
    MissingName { expression: String, language: String },

    #[error("entry \"{expression}\" has unknown type '{kind}'")]
    UnknownDayType { expression: String, kind: String },

    #[error("entry \"{expression}\" is malformed: {source}")]
    MalformedEntry { expression: String, source: serde_json::Error },

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
}

/// Error surfaced by calendar construction and the query facade.
#[derive(Debug, Error)]
pub enum HolidayError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Parse(#[from] ParseDateExpressionError),
}
