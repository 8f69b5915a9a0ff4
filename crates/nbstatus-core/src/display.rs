//! Status display: setters that render text into named slots.
//!
//! [`StatusDisplay`] holds no widget state; every call writes straight
//! through to the host's [`DisplaySurface`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use nbstatus_config::MessagesConfig;

/// Named display slots owned by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    NotebookName,
    AutosaveStatus,
    CheckpointStatus,
}

/// What the checkpoint slot currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckpointStatus {
    /// No checkpoint has ever been created.
    None,
    /// `human` is the visible text, `detail` the long absolute date.
    At { human: String, detail: String },
}

/// Host rendering surface.
pub trait DisplaySurface {
    fn set_text(&mut self, slot: Slot, text: &str);
    fn set_tooltip(&mut self, slot: Slot, tooltip: &str);
    fn set_window_title(&mut self, title: &str);
}

/// Renders widget status into a [`DisplaySurface`].
pub struct StatusDisplay {
    surface: Box<dyn DisplaySurface>,
    messages: MessagesConfig,
}

impl StatusDisplay {
    pub fn new(surface: Box<dyn DisplaySurface>, messages: MessagesConfig) -> Self {
        Self { surface, messages }
    }

    pub fn set_notebook_name(&mut self, name: &str) {
        self.surface.set_text(Slot::NotebookName, name);
    }

    pub fn set_document_title(&mut self, name: &str) {
        self.surface.set_window_title(name);
    }

    pub fn set_save_status(&mut self, message: &str) {
        self.surface.set_text(Slot::AutosaveStatus, message);
    }

    pub fn set_save_failed(&mut self) {
        let message = self.messages.save_failed().to_string();
        self.set_save_status(&message);
    }

    pub fn set_autosaved(&mut self, dirty: bool) {
        let message = if dirty {
            self.messages.unsaved().to_string()
        } else {
            self.messages.autosaved().to_string()
        };
        self.set_save_status(&message);
    }

    pub fn set_checkpoint_status(&mut self, status: &CheckpointStatus) {
        match status {
            CheckpointStatus::At { human, detail } => {
                let text = format!("{}{}", self.messages.checkpoint_prefix(), human);
                self.surface.set_text(Slot::CheckpointStatus, &text);
                self.surface.set_tooltip(Slot::CheckpointStatus, detail);
            }
            CheckpointStatus::None => {
                let tooltip = self.messages.no_checkpoint_tooltip().to_string();
                self.surface.set_text(Slot::CheckpointStatus, "");
                self.surface.set_tooltip(Slot::CheckpointStatus, &tooltip);
            }
        }
    }
}

#[derive(Debug, Default)]
struct SurfaceState {
    text: HashMap<Slot, String>,
    tooltips: HashMap<Slot, String>,
    window_title: Option<String>,
    revision: u64,
}

/// In-memory surface. Clones share state.
///
/// Used by the terminal host and by tests to read back what was rendered.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, slot: Slot) -> Option<String> {
        self.state.borrow().text.get(&slot).cloned()
    }

    pub fn tooltip(&self, slot: Slot) -> Option<String> {
        self.state.borrow().tooltips.get(&slot).cloned()
    }

    pub fn window_title(&self) -> Option<String> {
        self.state.borrow().window_title.clone()
    }

    /// Incremented on every write that changes a value.
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }
}

impl DisplaySurface for MemorySurface {
    fn set_text(&mut self, slot: Slot, text: &str) {
        let mut state = self.state.borrow_mut();
        if state.text.get(&slot).map(String::as_str) != Some(text) {
            state.text.insert(slot, text.to_string());
            state.revision += 1;
        }
    }

    fn set_tooltip(&mut self, slot: Slot, tooltip: &str) {
        let mut state = self.state.borrow_mut();
        if state.tooltips.get(&slot).map(String::as_str) != Some(tooltip) {
            state.tooltips.insert(slot, tooltip.to_string());
            state.revision += 1;
        }
    }

    fn set_window_title(&mut self, title: &str) {
        let mut state = self.state.borrow_mut();
        if state.window_title.as_deref() != Some(title) {
            state.window_title = Some(title.to_string());
            state.revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> (StatusDisplay, MemorySurface) {
        let surface = MemorySurface::new();
        let display = StatusDisplay::new(Box::new(surface.clone()), MessagesConfig::default());
        (display, surface)
    }

    #[test]
    fn test_set_autosaved() {
        let (mut display, surface) = display();

        display.set_autosaved(true);
        assert_eq!(
            surface.text(Slot::AutosaveStatus).as_deref(),
            Some("(unsaved changes)")
        );

        display.set_autosaved(false);
        assert_eq!(
            surface.text(Slot::AutosaveStatus).as_deref(),
            Some("(autosaved)")
        );
    }

    #[test]
    fn test_save_failed_uses_configured_message() {
        let surface = MemorySurface::new();
        let messages = MessagesConfig {
            save_failed: Some("Could not save".to_string()),
            ..Default::default()
        };
        let mut display = StatusDisplay::new(Box::new(surface.clone()), messages);

        display.set_save_failed();
        assert_eq!(
            surface.text(Slot::AutosaveStatus).as_deref(),
            Some("Could not save")
        );
    }

    #[test]
    fn test_checkpoint_status_rendering() {
        let (mut display, surface) = display();

        display.set_checkpoint_status(&CheckpointStatus::At {
            human: "a few seconds ago".to_string(),
            detail: "Fri, Mar 1, 2024 9:30 AM".to_string(),
        });
        assert_eq!(
            surface.text(Slot::CheckpointStatus).as_deref(),
            Some("Last Checkpoint: a few seconds ago")
        );
        assert_eq!(
            surface.tooltip(Slot::CheckpointStatus).as_deref(),
            Some("Fri, Mar 1, 2024 9:30 AM")
        );

        display.set_checkpoint_status(&CheckpointStatus::None);
        assert_eq!(surface.text(Slot::CheckpointStatus).as_deref(), Some(""));
        assert_eq!(
            surface.tooltip(Slot::CheckpointStatus).as_deref(),
            Some("no-checkpoint")
        );
    }

    #[test]
    fn test_revision_only_moves_on_change() {
        let (mut display, surface) = display();

        display.set_notebook_name("Untitled");
        let rev = surface.revision();
        display.set_notebook_name("Untitled");
        assert_eq!(surface.revision(), rev);

        display.set_document_title("Untitled");
        assert_eq!(surface.revision(), rev + 1);
        assert_eq!(surface.window_title().as_deref(), Some("Untitled"));
    }
}
