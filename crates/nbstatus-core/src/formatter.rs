//! Relative-time formatting for the checkpoint slot.
//!
//! The scheduler only depends on [`RelativeTimeFormatter`]; hosts with their
//! own date library implement it. [`ChronoFormatter`] is the built-in English
//! implementation: short "ago" strings, calendar strings such as
//! "Yesterday at 3:04 PM", and a long absolute form for tooltips.

use std::fmt;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use nbstatus_config::{ThresholdConfig, TimezoneChoice};

const HOURS_THRESHOLD: i64 = 22;
const DAYS_THRESHOLD: i64 = 26;
const MONTHS_THRESHOLD: i64 = 11;

const MS_PER_DAY: f64 = 86_400_000.0;
/// Average Gregorian month length in days (400-year cycle).
const DAYS_PER_MONTH: f64 = 146_097.0 / 4_800.0;

const TIME_FORMAT: &str = "%-I:%M %p";
const LONG_FORMAT: &str = "%a, %b %-d, %Y %-I:%M %p";
const SHORT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Points at which the relative form changes unit.
///
/// `seconds`: "a few seconds ago" becomes "a minute ago".
/// `minutes`: "N minutes ago" becomes "an hour ago".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeThresholds {
    pub seconds: u64,
    pub minutes: u64,
}

impl Default for RelativeThresholds {
    fn default() -> Self {
        Self::from_config(&ThresholdConfig::default())
    }
}

impl RelativeThresholds {
    pub fn from_config(config: &ThresholdConfig) -> Self {
        Self {
            seconds: config.seconds(),
            minutes: config.minutes(),
        }
    }
}

/// Date-formatting collaborator used by the checkpoint scheduler.
pub trait RelativeTimeFormatter {
    /// Short relative form, e.g. "a few seconds ago", "5 minutes ago".
    fn from_now(&self, then: DateTime<Utc>, now: DateTime<Utc>) -> String;

    /// Calendar form, e.g. "Today at 9:30 AM", "Last Monday at 9:30 AM".
    fn calendar(&self, then: DateTime<Utc>, now: DateTime<Utc>) -> String;

    /// Long absolute form, e.g. "Fri, Mar 1, 2024 9:30 AM".
    fn long_date(&self, then: DateTime<Utc>) -> String;

    fn thresholds(&self) -> RelativeThresholds;
}

/// English formatter backed by chrono, rendering in the timezone `Tz`.
#[derive(Debug, Clone)]
pub struct ChronoFormatter<Tz: TimeZone> {
    tz: Tz,
    thresholds: RelativeThresholds,
}

impl ChronoFormatter<Utc> {
    pub fn utc() -> Self {
        Self::new(Utc, RelativeThresholds::default())
    }
}

impl ChronoFormatter<Local> {
    pub fn local() -> Self {
        Self::new(Local, RelativeThresholds::default())
    }
}

impl<Tz: TimeZone> ChronoFormatter<Tz> {
    pub fn new(tz: Tz, thresholds: RelativeThresholds) -> Self {
        Self { tz, thresholds }
    }

    pub fn with_thresholds(mut self, thresholds: RelativeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

/// Build the formatter selected by the `[display]` and `[thresholds]` config.
pub fn formatter_for(
    timezone: TimezoneChoice,
    thresholds: RelativeThresholds,
) -> Box<dyn RelativeTimeFormatter> {
    match timezone {
        TimezoneChoice::Local => Box::new(ChronoFormatter::new(Local, thresholds)),
        TimezoneChoice::Utc => Box::new(ChronoFormatter::new(Utc, thresholds)),
    }
}

impl<Tz> RelativeTimeFormatter for ChronoFormatter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    fn from_now(&self, then: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let delta = now - then;
        let phrase = relative_phrase(delta.abs(), self.thresholds);
        if delta < TimeDelta::zero() {
            format!("in {}", phrase)
        } else {
            format!("{} ago", phrase)
        }
    }

    fn calendar(&self, then: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let local_then = then.with_timezone(&self.tz);
        let time = local_then.format(TIME_FORMAT);

        let days = days_since_start_of_day(&self.tz, then, now);
        if days < -6.0 {
            local_then.format(SHORT_DATE_FORMAT).to_string()
        } else if days < -1.0 {
            format!("Last {} at {}", local_then.format("%A"), time)
        } else if days < 0.0 {
            format!("Yesterday at {}", time)
        } else if days < 1.0 {
            format!("Today at {}", time)
        } else if days < 2.0 {
            format!("Tomorrow at {}", time)
        } else if days < 7.0 {
            format!("{} at {}", local_then.format("%A"), time)
        } else {
            local_then.format(SHORT_DATE_FORMAT).to_string()
        }
    }

    fn long_date(&self, then: DateTime<Utc>) -> String {
        then.with_timezone(&self.tz).format(LONG_FORMAT).to_string()
    }

    fn thresholds(&self) -> RelativeThresholds {
        self.thresholds
    }
}

/// Unit phrase for a non-negative duration, without "ago"/"in".
fn relative_phrase(delta: TimeDelta, thresholds: RelativeThresholds) -> String {
    let ms = delta.num_milliseconds() as f64;
    let seconds = (ms / 1000.0).round() as i64;
    let minutes = (ms / 60_000.0).round() as i64;
    let hours = (ms / 3_600_000.0).round() as i64;
    let days = (ms / MS_PER_DAY).round() as i64;
    let months = (ms / MS_PER_DAY / DAYS_PER_MONTH).round() as i64;
    let years = (ms / MS_PER_DAY / DAYS_PER_MONTH / 12.0).round() as i64;

    if seconds < thresholds.seconds as i64 {
        "a few seconds".to_string()
    } else if minutes <= 1 {
        "a minute".to_string()
    } else if minutes < thresholds.minutes as i64 {
        format!("{} minutes", minutes)
    } else if hours <= 1 {
        "an hour".to_string()
    } else if hours < HOURS_THRESHOLD {
        format!("{} hours", hours)
    } else if days <= 1 {
        "a day".to_string()
    } else if days < DAYS_THRESHOLD {
        format!("{} days", days)
    } else if months <= 1 {
        "a month".to_string()
    } else if months < MONTHS_THRESHOLD {
        format!("{} months", months)
    } else if years <= 1 {
        "a year".to_string()
    } else {
        format!("{} years", years)
    }
}

/// Fractional days between the start of `now`'s day (in `tz`) and `then`.
fn days_since_start_of_day<Tz: TimeZone>(tz: &Tz, then: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let midnight = now
        .with_timezone(tz)
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or(now);

    (then - midnight).num_milliseconds() as f64 / MS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn ago(formatter: &ChronoFormatter<Utc>, secs: i64) -> String {
        let now = at("2024-03-01T12:00:00Z");
        formatter.from_now(now - TimeDelta::seconds(secs), now)
    }

    #[test]
    fn test_from_now_bands() {
        let f = ChronoFormatter::utc();
        assert_eq!(ago(&f, 0), "a few seconds ago");
        assert_eq!(ago(&f, 10), "a few seconds ago");
        assert_eq!(ago(&f, 44), "a few seconds ago");
        assert_eq!(ago(&f, 45), "a minute ago");
        assert_eq!(ago(&f, 89), "a minute ago");
        assert_eq!(ago(&f, 5 * 60), "5 minutes ago");
        assert_eq!(ago(&f, 44 * 60), "44 minutes ago");
        assert_eq!(ago(&f, 50 * 60), "an hour ago");
        assert_eq!(ago(&f, 3 * 3600), "3 hours ago");
        assert_eq!(ago(&f, 23 * 3600), "a day ago");
        assert_eq!(ago(&f, 3 * 86_400), "3 days ago");
        assert_eq!(ago(&f, 30 * 86_400), "a month ago");
        assert_eq!(ago(&f, 100 * 86_400), "3 months ago");
        assert_eq!(ago(&f, 365 * 86_400), "a year ago");
        assert_eq!(ago(&f, 3 * 365 * 86_400), "3 years ago");
    }

    #[test]
    fn test_from_now_future() {
        let f = ChronoFormatter::utc();
        let now = at("2024-03-01T12:00:00Z");
        assert_eq!(
            f.from_now(now + TimeDelta::seconds(5), now),
            "in a few seconds"
        );
    }

    #[test]
    fn test_custom_seconds_threshold() {
        let f = ChronoFormatter::utc().with_thresholds(RelativeThresholds {
            seconds: 20,
            minutes: 45,
        });
        assert_eq!(ago(&f, 25), "a minute ago");
    }

    #[test]
    fn test_calendar_forms() {
        let f = ChronoFormatter::utc();
        let now = at("2024-03-01T12:00:00Z"); // a Friday

        assert_eq!(f.calendar(at("2024-03-01T04:00:00Z"), now), "Today at 4:00 AM");
        assert_eq!(
            f.calendar(at("2024-02-29T15:30:00Z"), now),
            "Yesterday at 3:30 PM"
        );
        assert_eq!(
            f.calendar(at("2024-02-27T09:05:00Z"), now),
            "Last Tuesday at 9:05 AM"
        );
        assert_eq!(f.calendar(at("2024-02-20T09:05:00Z"), now), "02/20/2024");
        assert_eq!(
            f.calendar(at("2024-03-02T08:00:00Z"), now),
            "Tomorrow at 8:00 AM"
        );
    }

    #[test]
    fn test_long_date() {
        let f = ChronoFormatter::utc();
        assert_eq!(
            f.long_date(at("2024-03-01T09:30:00Z")),
            "Fri, Mar 1, 2024 9:30 AM"
        );
    }

    #[test]
    fn test_thresholds_from_config() {
        let config = ThresholdConfig {
            seconds: Some(30),
            minutes: None,
        };
        let thresholds = RelativeThresholds::from_config(&config);
        assert_eq!(thresholds.seconds, 30);
        assert_eq!(thresholds.minutes, 45);
    }
}
