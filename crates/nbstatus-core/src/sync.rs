//! Maps document lifecycle events onto display updates and the scheduler.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::document::{DocumentModel, LocationUpdater, url_join_encode};
use crate::display::StatusDisplay;
use crate::events::DocumentEvent;
use crate::scheduler::CheckpointScheduler;
use crate::timer::TimerId;

/// URL segment under which documents are served.
const NOTEBOOKS_SEGMENT: &str = "notebooks";

/// Applies each [`DocumentEvent`] to the display, title, location, and
/// checkpoint scheduler. Holds no state of its own beyond its collaborators.
pub struct EventSyncController {
    document: Rc<dyn DocumentModel>,
    location: Box<dyn LocationUpdater>,
    display: StatusDisplay,
    scheduler: CheckpointScheduler,
}

impl EventSyncController {
    pub fn new(
        document: Rc<dyn DocumentModel>,
        location: Box<dyn LocationUpdater>,
        display: StatusDisplay,
        scheduler: CheckpointScheduler,
    ) -> Self {
        Self {
            document,
            location,
            display,
            scheduler,
        }
    }

    pub fn scheduler(&self) -> &CheckpointScheduler {
        &self.scheduler
    }

    pub fn handle(&mut self, event: &DocumentEvent) {
        debug!(event = "core.sync.event_received", kind = event.name());

        match event {
            DocumentEvent::NotebookLoaded | DocumentEvent::NotebookSaved => {
                self.update_notebook_name();
                self.update_document_title();
            }
            DocumentEvent::NotebookRenamed => {
                self.update_notebook_name();
                self.update_document_title();
                self.update_address_bar();
            }
            DocumentEvent::SaveFailed => {
                warn!(event = "core.sync.save_failed");
                self.display.set_save_failed();
            }
            DocumentEvent::CheckpointsListed(checkpoints) => {
                self.scheduler
                    .set_checkpoint(checkpoints.first(), &mut self.display);
            }
            DocumentEvent::CheckpointCreated(checkpoint) => {
                self.scheduler
                    .set_checkpoint(Some(checkpoint), &mut self.display);
            }
            DocumentEvent::DirtyChanged { value } => {
                self.display.set_autosaved(*value);
            }
        }
    }

    /// Forward a timer firing to the scheduler.
    pub fn on_timer_fired(&mut self, id: TimerId) -> bool {
        self.scheduler.on_timer_fired(id, &mut self.display)
    }

    fn update_notebook_name(&mut self) {
        let name = self.document.name();
        self.display.set_notebook_name(&name);
    }

    fn update_document_title(&mut self) {
        let name = self.document.name();
        self.display.set_document_title(&name);
    }

    fn update_address_bar(&mut self) {
        let identity = self.document.identity();
        let url = url_join_encode(&[&identity.base_url, NOTEBOOKS_SEGMENT, &identity.path]);
        debug!(event = "core.sync.location_replaced", url = %url);
        self.location.replace_state(&identity.path, &url);
    }
}
