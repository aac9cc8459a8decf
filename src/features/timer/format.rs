//! Duration parsing and clock-style formatting.

use serde::{Deserialize, Serialize};

/// A duration split into hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DurationParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationParts {
    /// Split a number of seconds.
    #[must_use]
    pub const fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    /// Total seconds. Minute and second fields may exceed 59.
    ///
    /// Returns `None` if the total does not fit in a `u64`.
    #[must_use]
    pub fn total_seconds(&self) -> Option<u64> {
        self.hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)
    }
}

/// Format as `HH:MM:SS`, or `MM:SS` under an hour.
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    let DurationParts {
        hours,
        minutes,
        seconds,
    } = DurationParts::from_seconds(seconds);

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Format as `H:MM:SS`, or `MM:SS` under an hour.
#[must_use]
pub fn format_clock_compact(seconds: u64) -> String {
    let DurationParts {
        hours,
        minutes,
        seconds,
    } = DurationParts::from_seconds(seconds);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Format as `HH:MM:SS` regardless of length, like the stopwatch dial.
#[must_use]
pub fn format_dial(seconds: u64) -> String {
    let DurationParts {
        hours,
        minutes,
        seconds,
    } = DurationParts::from_seconds(seconds);

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let parts = DurationParts::from_seconds(seconds);
    let plural = |n: u64| if n == 1 { "" } else { "s" };

    if parts.hours == 0 && parts.minutes == 0 {
        return format!("{} second{}", parts.seconds, plural(parts.seconds));
    }

    if parts.hours > 0 {
        if parts.minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                parts.hours,
                plural(parts.hours),
                parts.minutes,
                plural(parts.minutes)
            )
        } else {
            format!("{} hour{}", parts.hours, plural(parts.hours))
        }
    } else {
        format!("{} minute{}", parts.minutes, plural(parts.minutes))
    }
}

/// Parse a duration string into seconds.
///
/// Accepts `1h30m`, `90s`, `45` (minutes), `1:02:03` and `12:30` (minutes and
/// seconds). Returns `None` for values too large to count in seconds.
#[must_use]
pub fn parse_duration(s: &str) -> Option<u64> {
    let s = s.trim().to_lowercase();

    // Try parsing as just a number (assume minutes)
    if let Ok(minutes) = s.parse::<u64>() {
        return minutes.checked_mul(60);
    }

    if s.contains(':') {
        return parse_clock(&s);
    }

    let mut total_seconds: u64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: u64 = current_num.parse().ok()?;
            current_num.clear();

            let unit = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(num.checked_mul(unit)?)?;
        } else {
            return None;
        }
    }

    // Handle trailing number without unit (assume minutes)
    if !current_num.is_empty() {
        let num: u64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    (total_seconds > 0).then_some(total_seconds)
}

fn parse_clock(s: &str) -> Option<u64> {
    let fields = s
        .split(':')
        .map(str::parse::<u64>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;

    let parts = match fields.as_slice() {
        [minutes, seconds] => DurationParts {
            hours: 0,
            minutes: *minutes,
            seconds: *seconds,
        },
        [hours, minutes, seconds] => DurationParts {
            hours: *hours,
            minutes: *minutes,
            seconds: *seconds,
        },
        _ => return None,
    };

    if (fields.len() == 3 && parts.minutes > 59) || parts.seconds > 59 {
        return None;
    }

    parts.total_seconds()
}
