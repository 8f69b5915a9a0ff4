//! Configuration validation logic.

use crate::errors::ConfigError;
use crate::types::StatusConfig;

/// Largest accepted `[thresholds] seconds`: one day.
pub const MAX_SECONDS_THRESHOLD: u64 = 24 * 3600;
/// Largest accepted `[thresholds] minutes`: one day.
pub const MAX_MINUTES_THRESHOLD: u64 = 24 * 60;
/// Largest accepted short-form window and calendar refresh: 30 days.
pub const MAX_SCHEDULER_SECS: u64 = 30 * 24 * 3600;

/// Validate a StatusConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - Both relative-time thresholds must be positive and at most one day
/// - The minutes band must start after the one-minute band ends
///   (`minutes * 60 > seconds + 60`)
/// - Scheduler intervals and the jitter slack must be positive
/// - Scheduler intervals must be at most 30 days
/// - The jitter slack must be shorter than the calendar refresh interval
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfiguration` describing the first violation.
pub fn validate_config(config: &StatusConfig) -> Result<(), ConfigError> {
    let seconds = config.thresholds.seconds();
    let minutes = config.thresholds.minutes();

    if seconds == 0 || minutes == 0 {
        return Err(invalid(format!(
            "Relative-time thresholds must be positive (seconds = {}, minutes = {})",
            seconds, minutes
        )));
    }

    if seconds > MAX_SECONDS_THRESHOLD || minutes > MAX_MINUTES_THRESHOLD {
        return Err(invalid(format!(
            "Relative-time thresholds must be at most one day \
             (seconds = {} of max {}, minutes = {} of max {})",
            seconds, MAX_SECONDS_THRESHOLD, minutes, MAX_MINUTES_THRESHOLD
        )));
    }

    if minutes * 60 <= seconds + 60 {
        return Err(invalid(format!(
            "Minutes threshold ({} min) must end after the one-minute band ({}s + 60s)",
            minutes, seconds
        )));
    }

    let scheduler = &config.scheduler;
    if scheduler.short_form_window_secs() == 0 {
        return Err(invalid(
            "short_form_window_secs must be positive".to_string(),
        ));
    }
    if scheduler.calendar_refresh_secs() == 0 {
        return Err(invalid("calendar_refresh_secs must be positive".to_string()));
    }
    for (key, value) in [
        ("short_form_window_secs", scheduler.short_form_window_secs()),
        ("calendar_refresh_secs", scheduler.calendar_refresh_secs()),
    ] {
        if value > MAX_SCHEDULER_SECS {
            return Err(invalid(format!(
                "{} ({}) must be at most {} (30 days)",
                key, value, MAX_SCHEDULER_SECS
            )));
        }
    }
    if scheduler.jitter_slack_ms() == 0 {
        return Err(invalid("jitter_slack_ms must be positive".to_string()));
    }
    if scheduler.jitter_slack_ms() >= scheduler.calendar_refresh_secs() * 1000 {
        return Err(invalid(format!(
            "jitter_slack_ms ({}) must be shorter than calendar_refresh_secs ({}s)",
            scheduler.jitter_slack_ms(),
            scheduler.calendar_refresh_secs()
        )));
    }

    Ok(())
}

fn invalid(message: String) -> ConfigError {
    ConfigError::InvalidConfiguration { message }
}
