use chrono::{Month, Weekday};

#[inline]
pub const fn is_leap(year: i32) -> bool {
    ((year % 4 == 0) && (year % 100 != 0)) || (year % 400 == 0)
}

/// Number of days in `month` (1-based). `month` must lie in `1..=12`.
pub const fn days_of_month(year: i32, month: u32) -> u32 {
    const NO_LEAP_EOM: [u32; 13] = [
        0, 31, 28, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    const LEAP_EOM: [u32; 13] = [
        0, 31, 29, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    if is_leap(year) {
        LEAP_EOM[month as usize]
    } else {
        NO_LEAP_EOM[month as usize]
    }
}

/// Longest length `month` can have in any year, i.e. February counts 29.
pub const fn max_days_of_month(month: u32) -> u32 {
    days_of_month(2000, month)
}

const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun)
];

/// Case-insensitive lookup of a full weekday name ("Monday", "monday").
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .find(|(full, _)| full.eq_ignore_ascii_case(name))
        .map(|(_, weekday)| *weekday)
}

/// Case-insensitive lookup of a full month name ("September", "september").
pub fn month_from_name(name: &str) -> Option<Month> {
    (1..=12u8)
        .filter_map(|number| Month::try_from(number).ok())
        .find(|month| month.name().eq_ignore_ascii_case(name))
}

/// Parses a strict `MM-DD` token into `(month, day)` without range checks.
pub fn parse_month_day(token: &str) -> Option<(u32, u32)> {
    let bytes = token.as_bytes();
    if bytes.len() != 5 || bytes[2] != b'-' {
        return None;
    }
    let (month, day) = (&token[..2], &token[3..]);
    if !month.bytes().chain(day.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((month.parse().ok()?, day.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn february_length_follows_leap_rule() {
        assert_eq!(days_of_month(2024, 2), 29);
        assert_eq!(days_of_month(1900, 2), 28);
        assert_eq!(days_of_month(2000, 2), 29);
        assert_eq!(max_days_of_month(2), 29);
        assert_eq!(max_days_of_month(4), 30);
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(weekday_from_name("FRIDAY"), Some(Weekday::Fri));
        assert_eq!(weekday_from_name("sunday"), Some(Weekday::Sun));
        assert_eq!(month_from_name("September"), Some(Month::September));
        assert_eq!(weekday_from_name("funday"), None);
        assert_eq!(month_from_name("smarch"), None);
    }

    #[test]
    fn abbreviations_are_not_names() {
        assert_eq!(weekday_from_name("mon"), None);
        assert_eq!(weekday_from_name("Thu"), None);
        assert_eq!(month_from_name("sep"), None);
        assert_eq!(month_from_name("Dec"), None);
        assert_eq!(month_from_name("december"), Some(Month::December));
    }

    #[test]
    fn month_day_token() {
        assert_eq!(parse_month_day("04-21"), Some((4, 21)));
        assert_eq!(parse_month_day("4-21"), None);
        assert_eq!(parse_month_day("04/21"), None);
        assert_eq!(parse_month_day("0a-21"), None);
        assert_eq!(parse_month_day("+4-21"), None);
    }
}
