use chrono::Weekday;
use tracing::trace;

use crate::error::ParseDateExpressionError;
use crate::time::utility::{
    max_days_of_month,
    month_from_name,
    parse_month_day,
    weekday_from_name
};

use super::daterule::{DateRule, Direction};
use super::movablefeast::{MovableFeast, MovableFeastRegistry};

type MatchResult = Option<Result<DateRule, ParseDateExpressionError>>;

/// Returns `None` when the tokens do not have the shape of the form, so the
/// next form gets a chance. A shape match that fails to resolve a name is final.
type Matcher = fn(&str, &[&str], &MovableFeastRegistry) -> MatchResult;

/// Grammar forms in priority order; the first structural match wins.
const DATE_EXPRESSION_FORMS: [(&str, Matcher); 5] = [
    ("MM-DD", match_fixed_date),
    ("<feast>", match_movable_feast),
    ("<feast> <offset>", match_movable_feast_offset),
    ("<weekday> before|after MM-DD", match_weekday_relative),
    ("<weekday> in <month>", match_weekday_in_month),
];

pub fn date_expression_forms() -> impl Iterator<Item = &'static str> {
    DATE_EXPRESSION_FORMS.iter().map(|(form, _)| *form)
}

pub fn parse_date_expression(
    expression: &str,
    registry: &MovableFeastRegistry,
) -> Result<DateRule, ParseDateExpressionError> {
    let tokens: Vec<&str> = expression.split_whitespace().collect();
    for (form, matcher) in DATE_EXPRESSION_FORMS.iter() {
        if let Some(result) = matcher(expression, &tokens, registry) {
            trace!(expression, form, "date expression matched");
            return result;
        }
    }
    Err(ParseDateExpressionError::UnknownExpression(expression.to_owned()))
}

fn is_identifier(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn is_signed_integer(token: &str) -> bool {
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn checked_month_day(expression: &str, month: u32, day: u32) -> Result<(u32, u32), ParseDateExpressionError> {
    if (1..=12).contains(&month) && (1..=max_days_of_month(month)).contains(&day) {
        Ok((month, day))
    } else {
        Err(ParseDateExpressionError::InvalidDate { expression: expression.to_owned(), month, day })
    }
}

fn lookup_weekday(expression: &str, name: &str) -> Result<Weekday, ParseDateExpressionError> {
    weekday_from_name(name).ok_or_else(|| ParseDateExpressionError::UnknownWeekday {
        expression: expression.to_owned(),
        name: name.to_owned(),
    })
}

fn lookup_feast(
    expression: &str,
    name: &str,
    registry: &MovableFeastRegistry,
) -> Result<MovableFeast, ParseDateExpressionError> {
    registry.get(name).ok_or_else(|| ParseDateExpressionError::UnknownMovableFeast {
        expression: expression.to_owned(),
        name: name.to_owned(),
    })
}

fn match_fixed_date(expression: &str, tokens: &[&str], _registry: &MovableFeastRegistry) -> MatchResult {
    let [token] = tokens else { return None };
    let (month, day) = parse_month_day(token)?;
    Some(checked_month_day(expression, month, day).map(|(month, day)| DateRule::Fixed { month, day }))
}

fn match_movable_feast(expression: &str, tokens: &[&str], registry: &MovableFeastRegistry) -> MatchResult {
    let [name] = tokens else { return None };
    if !is_identifier(name) {
        return None;
    }
    Some(lookup_feast(expression, name, registry).map(|feast| DateRule::MovableFeast {
        name: name.to_lowercase(),
        feast,
    }))
}

fn match_movable_feast_offset(expression: &str, tokens: &[&str], registry: &MovableFeastRegistry) -> MatchResult {
    let [name, offset] = tokens else { return None };
    if !is_identifier(name) || !is_signed_integer(offset) {
        return None;
    }
    let rule = lookup_feast(expression, name, registry).and_then(|feast| {
        let offset = offset.parse::<i64>().map_err(|source| ParseDateExpressionError::InvalidOffset {
            expression: expression.to_owned(),
            source,
        })?;
        Ok(DateRule::MovableFeastOffset { name: name.to_lowercase(), feast, offset })
    });
    Some(rule)
}

fn match_weekday_relative(expression: &str, tokens: &[&str], _registry: &MovableFeastRegistry) -> MatchResult {
    let [weekday, direction, month_day] = tokens else { return None };
    if !is_identifier(weekday) {
        return None;
    }
    let direction = Direction::from_name(direction)?;
    let (month, day) = parse_month_day(month_day)?;
    let rule = lookup_weekday(expression, weekday).and_then(|weekday| {
        let (month, day) = checked_month_day(expression, month, day)?;
        Ok(DateRule::WeekdayRelative { weekday, direction, month, day })
    });
    Some(rule)
}

fn match_weekday_in_month(expression: &str, tokens: &[&str], _registry: &MovableFeastRegistry) -> MatchResult {
    let [weekday, keyword, month] = tokens else { return None };
    if !is_identifier(weekday) || !keyword.eq_ignore_ascii_case("in") || !is_identifier(month) {
        return None;
    }
    let rule = lookup_weekday(expression, weekday).and_then(|weekday| {
        let month = month_from_name(month).ok_or_else(|| ParseDateExpressionError::UnknownMonth {
            expression: expression.to_owned(),
            name: (*month).to_owned(),
        })?;
        Ok(DateRule::WeekdayInMonth { weekday, month })
    });
    Some(rule)
}
