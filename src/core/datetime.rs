//! Date and time parsing utilities.
//!
//! Workouts are logged after the fact, so relative expressions resolve
//! backwards: `monday` is the most recent Monday, `oct 3` the most recent
//! October 3rd.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

/// Parse a day expression relative to `today`.
///
/// Supports patterns like:
/// - `today`, `yesterday`
/// - `3 days ago`, `2 weeks ago`
/// - `monday`, `last friday`
/// - `oct 3`, `october 3`
/// - `2026-10-03` (ISO format)
/// - `10/03` or `10/03/2026`
///
/// Returns `None` if the input cannot be parsed.
#[must_use]
pub fn parse_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim().to_lowercase();
    let input = input.as_str();

    match input {
        "today" => return Some(today),
        "yesterday" => return today.pred_opt(),
        _ => {},
    }

    if let Some(date) = parse_ago(input, today) {
        return Some(date);
    }

    if let Some(date) = parse_weekday(input, today) {
        return Some(date);
    }

    if let Some(date) = parse_month_day(input, today) {
        return Some(date);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }

    parse_us_date(input, today)
}

/// Parse a month expression: `2026-10`, `oct 2026`, `october` (current year).
#[must_use]
pub fn parse_month(input: &str, today: NaiveDate) -> Option<(i32, u32)> {
    let input = input.trim().to_lowercase();

    if let Some((year, month)) = input.split_once('-') {
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        return (1..=12).contains(&month).then_some((year, month));
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    match parts.as_slice() {
        [month] => Some((today.year(), parse_month_name(month)?)),
        [month, year] => Some((year.parse().ok()?, parse_month_name(month)?)),
        _ => None,
    }
}

/// Parse a time of day.
///
/// Accepts `18:30`, `7pm`, `7:15am`, and the words `morning`, `noon`,
/// `afternoon`, `evening`, `night`.
#[must_use]
pub fn parse_time_of_day(input: &str) -> Option<NaiveTime> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "morning" => return NaiveTime::from_hms_opt(9, 0, 0),
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
        "afternoon" => return NaiveTime::from_hms_opt(14, 0, 0),
        "evening" => return NaiveTime::from_hms_opt(18, 0, 0),
        "night" => return NaiveTime::from_hms_opt(21, 0, 0),
        _ => {},
    }

    // 24-hour format (15:00, 15:30)
    if let Ok(time) = NaiveTime::parse_from_str(&input, "%H:%M") {
        return Some(time);
    }

    // 12-hour format (3pm, 3:30pm)
    let (time_str, is_pm) = if let Some(rest) = input.strip_suffix("pm") {
        (rest, true)
    } else if let Some(rest) = input.strip_suffix("am") {
        (rest, false)
    } else {
        return None;
    };

    let (hour, minute) = match time_str.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (time_str.parse::<u32>().ok()?, 0),
    };

    if hour == 0 || hour > 12 {
        return None;
    }

    let hour = match (is_pm, hour) {
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, 12) => 0,
        (false, h) => h,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parse "N days/weeks ago" patterns. `None` if the result is out of range.
fn parse_ago(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() != 3 || parts[2] != "ago" {
        return None;
    }

    let amount: i64 = parts[0].parse().ok()?;
    let days = match parts[1].trim_end_matches('s') {
        "day" => amount,
        "week" => amount.checked_mul(7)?,
        _ => return None,
    };

    today.checked_sub_signed(Duration::try_days(days)?)
}

/// Parse weekday names, resolving to the most recent occurrence.
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (is_last, day_str) = input
        .strip_prefix("last ")
        .map_or((false, input), |rest| (true, rest));

    let target_weekday = match day_str {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };

    let mut days_since = (i64::from(today.weekday().num_days_from_sunday())
        - i64::from(target_weekday.num_days_from_sunday())
        + 7)
        % 7;

    // "last monday" on a Monday means a week back
    if days_since == 0 && is_last {
        days_since = 7;
    }

    today.checked_sub_signed(Duration::days(days_since))
}

/// Parse month and day patterns.
fn parse_month_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() != 2 {
        return None;
    }

    let month = parse_month_name(parts[0])?;
    let day: u32 = parts[1].parse().ok()?;

    most_recent(today, month, day)
}

/// Parse month name to number.
fn parse_month_name(input: &str) -> Option<u32> {
    match input {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Parse US date format (MM/DD or MM/DD/YYYY).
fn parse_us_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split('/').collect();

    match parts.as_slice() {
        [month, day] => most_recent(today, month.parse().ok()?, day.parse().ok()?),
        [month, day, year] => {
            let year: i32 = year.parse().ok()?;
            // Handle 2-digit years
            let year = if year < 100 { 2000 + year } else { year };
            NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
        },
        _ => None,
    }
}

/// This year's `month`/`day`, or last year's if that is still ahead.
fn most_recent(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if date > today {
        NaiveDate::from_ymd_opt(today.year() - 1, month, day)
    } else {
        Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Saturday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_today_yesterday() {
        assert_eq!(parse_day("today", today()), Some(today()));
        assert_eq!(parse_day("Yesterday", today()), Some(ymd(2026, 10, 16)));
    }

    #[test]
    fn test_parse_ago() {
        assert_eq!(parse_day("3 days ago", today()), Some(ymd(2026, 10, 14)));
        assert_eq!(parse_day("1 week ago", today()), Some(ymd(2026, 10, 10)));
        assert_eq!(parse_day("3 months ago", today()), None);
    }

    #[test]
    fn test_parse_ago_out_of_range() {
        assert_eq!(parse_day("99999999 days ago", today()), None);
        assert_eq!(parse_day("99999999 weeks ago", today()), None);
        assert_eq!(parse_day("9223372036854775807 weeks ago", today()), None);
        assert_eq!(parse_day("9223372036854775807 days ago", today()), None);
    }

    #[test]
    fn test_parse_weekday_looks_back() {
        assert_eq!(parse_day("monday", today()), Some(ymd(2026, 10, 12)));
        assert_eq!(parse_day("sat", today()), Some(today()));
        assert_eq!(parse_day("last saturday", today()), Some(ymd(2026, 10, 10)));
    }

    #[test]
    fn test_parse_month_day_looks_back() {
        assert_eq!(parse_day("oct 3", today()), Some(ymd(2026, 10, 3)));
        assert_eq!(parse_day("december 24", today()), Some(ymd(2025, 12, 24)));
    }

    #[test]
    fn test_parse_iso_and_us() {
        assert_eq!(parse_day("2026-01-15", today()), Some(ymd(2026, 1, 15)));
        assert_eq!(parse_day("1/15/26", today()), Some(ymd(2026, 1, 15)));
        assert_eq!(parse_day("11/01", today()), Some(ymd(2025, 11, 1)));
        assert_eq!(parse_day("not a date", today()), None);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2026-02", today()), Some((2026, 2)));
        assert_eq!(parse_month("2026-13", today()), None);
        assert_eq!(parse_month("feb", today()), Some((2026, 2)));
        assert_eq!(parse_month("feb 2025", today()), Some((2025, 2)));
    }

    #[test]
    fn test_parse_time_12hour() {
        assert_eq!(parse_time_of_day("3pm"), NaiveTime::from_hms_opt(15, 0, 0));
        assert_eq!(parse_time_of_day("3:30pm"), NaiveTime::from_hms_opt(15, 30, 0));
        assert_eq!(parse_time_of_day("12am"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_time_of_day("12pm"), NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(parse_time_of_day("13pm"), None);
    }

    #[test]
    fn test_parse_time_24hour_and_words() {
        assert_eq!(parse_time_of_day("18:45"), NaiveTime::from_hms_opt(18, 45, 0));
        assert_eq!(parse_time_of_day("morning"), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(parse_time_of_day("later"), None);
    }
}
