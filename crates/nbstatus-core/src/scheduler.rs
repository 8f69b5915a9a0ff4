//! Self-rescheduling "last checkpoint" refresher.
//!
//! The checkpoint slot shows a relative time ("5 minutes ago") that goes
//! stale as the clock moves. Instead of polling, each refresh computes how
//! long the rendered string stays correct and arms a single one-shot timer
//! for that moment. Young checkpoints re-render right after each unit
//! boundary; checkpoints older than the short-form window switch to the
//! calendar form and refresh hourly.
//!
//! At most one timer is live. Every rearm cancels the previous timer, and a
//! firing whose id is not the live one is ignored. Refreshes always read the
//! stored checkpoint date, never a value captured when the timer was armed.

use std::time::Duration;

use chrono::{DateTime, Utc};
use nbstatus_config::SchedulerConfig;
use tracing::{debug, info};

use crate::checkpoint::Checkpoint;
use crate::clock::Clock;
use crate::display::{CheckpointStatus, StatusDisplay};
use crate::formatter::{RelativeThresholds, RelativeTimeFormatter};
use crate::timer::{Timer, TimerId};

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Milliseconds until the relative form for a checkpoint of age `age_ms`
/// would next change.
///
/// Bands, with `S`/`M` the seconds/minutes thresholds:
/// - below `S` seconds: "a few seconds ago" until `S` seconds
/// - one more minute of "a minute ago"
/// - below `M` minutes: changes every minute
/// - one more hour of "an hour ago"
/// - afterwards: changes every hour
///
/// The result is always positive.
pub fn time_until_next_boundary_crossing(age_ms: u64, thresholds: RelativeThresholds) -> u64 {
    let seconds_edge = thresholds.seconds.saturating_mul(MS_PER_SECOND);
    let minute_band_end = seconds_edge.saturating_add(MS_PER_MINUTE);
    let minutes_edge = thresholds.minutes.saturating_mul(MS_PER_MINUTE);
    let hour_band_end = minutes_edge.saturating_add(MS_PER_HOUR);

    if age_ms < seconds_edge {
        seconds_edge - age_ms
    } else if age_ms < minute_band_end {
        minute_band_end - age_ms
    } else if age_ms < minutes_edge {
        MS_PER_MINUTE
    } else if age_ms < hour_band_end {
        hour_band_end - age_ms
    } else {
        MS_PER_HOUR
    }
}

/// Timing knobs for the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    /// Age below which the short relative form is shown.
    pub short_form_window: Duration,
    /// Refresh interval once the calendar form is shown.
    pub calendar_refresh: Duration,
    /// Added to short-form delays so the refresh lands after the boundary.
    pub jitter_slack: Duration,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self::from_config(&SchedulerConfig::default())
    }
}

impl SchedulerSettings {
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            short_form_window: Duration::from_secs(config.short_form_window_secs()),
            calendar_refresh: Duration::from_secs(config.calendar_refresh_secs()),
            jitter_slack: Duration::from_millis(config.jitter_slack_ms()),
        }
    }
}

/// The one live timer and what it was armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledRefresh {
    pub id: TimerId,
    pub armed_for: DateTime<Utc>,
    pub delay: Duration,
}

/// Owns the last checkpoint date and keeps the checkpoint slot fresh.
pub struct CheckpointScheduler {
    checkpoint_date: Option<DateTime<Utc>>,
    pending: Option<ScheduledRefresh>,
    formatter: Box<dyn RelativeTimeFormatter>,
    clock: Box<dyn Clock>,
    timer: Box<dyn Timer>,
    settings: SchedulerSettings,
}

impl CheckpointScheduler {
    pub fn new(
        formatter: Box<dyn RelativeTimeFormatter>,
        clock: Box<dyn Clock>,
        timer: Box<dyn Timer>,
        settings: SchedulerSettings,
    ) -> Self {
        Self {
            checkpoint_date: None,
            pending: None,
            formatter,
            clock,
            timer,
            settings,
        }
    }

    pub fn checkpoint_date(&self) -> Option<DateTime<Utc>> {
        self.checkpoint_date
    }

    /// The live timer, if any.
    pub fn pending(&self) -> Option<&ScheduledRefresh> {
        self.pending.as_ref()
    }

    /// Record the latest checkpoint (or its absence) and refresh immediately.
    pub fn set_checkpoint(&mut self, checkpoint: Option<&Checkpoint>, display: &mut StatusDisplay) {
        self.checkpoint_date = checkpoint.map(|cp| cp.last_modified);
        debug!(
            event = "core.scheduler.checkpoint_set",
            checkpoint = ?self.checkpoint_date
        );
        self.refresh_cycle(display);
    }

    /// Handle a timer firing reported by the host.
    ///
    /// Returns false when `id` is not the live timer; such firings are
    /// superseded and do nothing.
    pub fn on_timer_fired(&mut self, id: TimerId, display: &mut StatusDisplay) -> bool {
        match self.pending {
            Some(live) if live.id == id => {
                self.pending = None;
                self.refresh_cycle(display);
                true
            }
            _ => {
                debug!(
                    event = "core.scheduler.stale_timer_ignored",
                    timer_id = id.0
                );
                false
            }
        }
    }

    /// Render the checkpoint slot from the stored date and rearm.
    pub fn refresh_cycle(&mut self, display: &mut StatusDisplay) -> CheckpointStatus {
        let Some(date) = self.checkpoint_date else {
            self.cancel_pending();
            info!(event = "core.scheduler.no_checkpoint");
            let status = CheckpointStatus::None;
            display.set_checkpoint_status(&status);
            return status;
        };

        let now = self.clock.now();
        let age_ms = (now - date).num_milliseconds().max(0) as u64;
        let detail = self.formatter.long_date(date);

        let (status, delay) = if age_ms < duration_ms(self.settings.short_form_window) {
            let next = time_until_next_boundary_crossing(age_ms, self.formatter.thresholds());
            let delay = Duration::from_millis(next).saturating_add(self.settings.jitter_slack);
            let human = self.formatter.from_now(date, now);
            (CheckpointStatus::At { human, detail }, delay)
        } else {
            let human = self.formatter.calendar(date, now);
            (
                CheckpointStatus::At { human, detail },
                self.settings.calendar_refresh,
            )
        };

        self.rearm(delay, date);
        display.set_checkpoint_status(&status);
        status
    }

    fn rearm(&mut self, delay: Duration, armed_for: DateTime<Utc>) {
        self.cancel_pending();
        let id = self.timer.arm(delay);
        self.pending = Some(ScheduledRefresh {
            id,
            armed_for,
            delay,
        });
        debug!(
            event = "core.scheduler.rearm_completed",
            timer_id = id.0,
            delay_ms = duration_ms(delay)
        );
    }

    fn cancel_pending(&mut self) {
        if let Some(previous) = self.pending.take() {
            self.timer.cancel(previous.id);
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
