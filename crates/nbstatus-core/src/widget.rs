//! Composition root for the status widget.

use std::rc::Rc;

use nbstatus_config::StatusConfig;
use tracing::info;

use crate::clock::Clock;
use crate::display::{DisplaySurface, StatusDisplay};
use crate::document::{DocumentModel, LocationUpdater};
use crate::events::DocumentEvent;
use crate::formatter::{RelativeThresholds, RelativeTimeFormatter, formatter_for};
use crate::rename::{DialogHost, RenameController};
use crate::scheduler::{CheckpointScheduler, SchedulerSettings};
use crate::sync::EventSyncController;
use crate::timer::{Timer, TimerId};

/// Everything the widget talks to, supplied by the host at construction.
pub struct Collaborators {
    pub document: Rc<dyn DocumentModel>,
    pub surface: Box<dyn DisplaySurface>,
    pub dialogs: Box<dyn DialogHost>,
    pub location: Box<dyn LocationUpdater>,
    pub timer: Box<dyn Timer>,
    pub clock: Box<dyn Clock>,
    /// Defaults to the chrono formatter selected by the config.
    pub formatter: Option<Box<dyn RelativeTimeFormatter>>,
}

/// Document name, rename control, save status, and last-checkpoint display.
pub struct StatusWidget {
    sync: EventSyncController,
    rename: RenameController,
}

impl StatusWidget {
    pub fn new(config: &StatusConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            document,
            surface,
            dialogs,
            location,
            timer,
            clock,
            formatter,
        } = collaborators;

        let formatter = formatter.unwrap_or_else(|| {
            formatter_for(
                config.display.timezone(),
                RelativeThresholds::from_config(&config.thresholds),
            )
        });
        let scheduler = CheckpointScheduler::new(
            formatter,
            clock,
            timer,
            SchedulerSettings::from_config(&config.scheduler),
        );
        let display = StatusDisplay::new(surface, config.messages.clone());
        let rename = RenameController::new(document.clone(), dialogs);
        let sync = EventSyncController::new(document, location, display, scheduler);

        info!(event = "core.widget.created");
        Self { sync, rename }
    }

    pub fn handle_event(&mut self, event: &DocumentEvent) {
        self.sync.handle(event);
    }

    pub fn on_timer_fired(&mut self, id: TimerId) -> bool {
        self.sync.on_timer_fired(id)
    }

    /// Name-click handler: opens the rename dialog.
    pub fn start_rename(&mut self) {
        self.rename.start_rename();
    }

    pub fn rename(&mut self) -> &mut RenameController {
        &mut self.rename
    }

    pub fn scheduler(&self) -> &CheckpointScheduler {
        self.sync.scheduler()
    }
}
