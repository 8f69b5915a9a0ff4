//! Built-in fallback values for every optional config field.

pub const SECONDS_THRESHOLD: u64 = 45;
pub const MINUTES_THRESHOLD: u64 = 45;

pub const SHORT_FORM_WINDOW_SECS: u64 = 6 * 3600;
pub const CALENDAR_REFRESH_SECS: u64 = 3600;
pub const JITTER_SLACK_MS: u64 = 1000;

pub const SAVE_FAILED: &str = "Autosave Failed!";
pub const UNSAVED: &str = "(unsaved changes)";
pub const AUTOSAVED: &str = "(autosaved)";
pub const CHECKPOINT_PREFIX: &str = "Last Checkpoint: ";
pub const NO_CHECKPOINT_TOOLTIP: &str = "no-checkpoint";
