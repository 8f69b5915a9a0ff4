//! Configuration type definitions for the status widget.
//!
//! These types are deserialized from TOML config files. Fields are
//! `Option<T>` so that the hierarchy merge only lets explicitly-set values
//! override lower-priority configs; accessors supply the defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! [thresholds]
//! seconds = 45
//! minutes = 45
//!
//! [scheduler]
//! short_form_window_secs = 21600
//! calendar_refresh_secs = 3600
//! jitter_slack_ms = 1000
//!
//! [messages]
//! save_failed = "Autosave Failed!"
//!
//! [display]
//! timezone = "utc"
//! ```

use serde::{Deserialize, Serialize};

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.nbstatus/config.toml`
/// 2. Project config: `./.nbstatus/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Relative-time thresholds that decide when "ago" strings change form.
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Checkpoint refresh scheduling.
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Status text shown in the display slots.
    #[serde(default)]
    pub messages: MessagesConfig,

    /// Date rendering options.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Relative-time thresholds.
///
/// `seconds` is where "a few seconds ago" flips to "a minute ago";
/// `minutes` is where "N minutes ago" flips to the hour form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Default: 45.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,

    /// Default: 45.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
}

impl ThresholdConfig {
    pub fn seconds(&self) -> u64 {
        self.seconds.unwrap_or(crate::defaults::SECONDS_THRESHOLD)
    }

    pub fn minutes(&self) -> u64 {
        self.minutes.unwrap_or(crate::defaults::MINUTES_THRESHOLD)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            seconds: override_config.seconds.or(base.seconds),
            minutes: override_config.minutes.or(base.minutes),
        }
    }
}

/// Checkpoint refresh scheduling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// How long after a checkpoint the short "ago" form is shown.
    /// Default: 6 hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_form_window_secs: Option<u64>,

    /// Refresh interval once the calendar form is shown.
    /// Default: 1 hour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_refresh_secs: Option<u64>,

    /// Extra delay added to short-form rearms so the refresh lands after the
    /// boundary, never before it. Default: 1000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jitter_slack_ms: Option<u64>,
}

impl SchedulerConfig {
    pub fn short_form_window_secs(&self) -> u64 {
        self.short_form_window_secs
            .unwrap_or(crate::defaults::SHORT_FORM_WINDOW_SECS)
    }

    pub fn calendar_refresh_secs(&self) -> u64 {
        self.calendar_refresh_secs
            .unwrap_or(crate::defaults::CALENDAR_REFRESH_SECS)
    }

    pub fn jitter_slack_ms(&self) -> u64 {
        self.jitter_slack_ms
            .unwrap_or(crate::defaults::JITTER_SLACK_MS)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            short_form_window_secs: override_config
                .short_form_window_secs
                .or(base.short_form_window_secs),
            calendar_refresh_secs: override_config
                .calendar_refresh_secs
                .or(base.calendar_refresh_secs),
            jitter_slack_ms: override_config.jitter_slack_ms.or(base.jitter_slack_ms),
        }
    }
}

/// Status text rendered into the display slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_failed: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsaved: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autosaved: Option<String>,

    /// Prefix placed before the human checkpoint date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint_prefix: Option<String>,

    /// Tooltip of the checkpoint slot when no checkpoint exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_checkpoint_tooltip: Option<String>,
}

impl MessagesConfig {
    pub fn save_failed(&self) -> &str {
        self.save_failed
            .as_deref()
            .unwrap_or(crate::defaults::SAVE_FAILED)
    }

    pub fn unsaved(&self) -> &str {
        self.unsaved.as_deref().unwrap_or(crate::defaults::UNSAVED)
    }

    pub fn autosaved(&self) -> &str {
        self.autosaved
            .as_deref()
            .unwrap_or(crate::defaults::AUTOSAVED)
    }

    pub fn checkpoint_prefix(&self) -> &str {
        self.checkpoint_prefix
            .as_deref()
            .unwrap_or(crate::defaults::CHECKPOINT_PREFIX)
    }

    pub fn no_checkpoint_tooltip(&self) -> &str {
        self.no_checkpoint_tooltip
            .as_deref()
            .unwrap_or(crate::defaults::NO_CHECKPOINT_TOOLTIP)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            save_failed: override_config
                .save_failed
                .clone()
                .or_else(|| base.save_failed.clone()),
            unsaved: override_config
                .unsaved
                .clone()
                .or_else(|| base.unsaved.clone()),
            autosaved: override_config
                .autosaved
                .clone()
                .or_else(|| base.autosaved.clone()),
            checkpoint_prefix: override_config
                .checkpoint_prefix
                .clone()
                .or_else(|| base.checkpoint_prefix.clone()),
            no_checkpoint_tooltip: override_config
                .no_checkpoint_tooltip
                .clone()
                .or_else(|| base.no_checkpoint_tooltip.clone()),
        }
    }
}

/// Timezone used when rendering calendar and absolute dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimezoneChoice {
    #[default]
    Local,
    Utc,
}

/// Date rendering options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Default: local.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<TimezoneChoice>,
}

impl DisplayConfig {
    pub fn timezone(&self) -> TimezoneChoice {
        self.timezone.unwrap_or_default()
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            timezone: override_config.timezone.or(base.timezone),
        }
    }
}
