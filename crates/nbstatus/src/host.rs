//! Terminal implementations of the widget's collaborators.

use std::cell::RefCell;

use nbstatus_core::{
    DialogHost, DialogSpec, DisplaySurface, DocumentEvent, DocumentIdentity, DocumentModel,
    LocationUpdater, MemorySurface, Slot, WidgetInput,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::color;

const LABEL_WIDTH: usize = 12;

fn labelled(label: &str, value: &str) -> String {
    format!(
        "{}{}",
        color::label(&format!("{:<width$}", label, width = LABEL_WIDTH)),
        value
    )
}

fn slot_label(slot: Slot) -> &'static str {
    match slot {
        Slot::NotebookName => "name",
        Slot::AutosaveStatus => "status",
        Slot::CheckpointStatus => "checkpoint",
    }
}

/// How a slot value is styled on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Name,
    Failure,
    Pending,
    Plain,
}

impl Tone {
    fn paint(self, text: &str) -> String {
        match self {
            Tone::Name => color::name(text),
            Tone::Failure => color::failure(text),
            Tone::Pending => color::pending(text),
            Tone::Plain => text.to_string(),
        }
    }
}

/// Prints each slot to stdout when its value changes.
#[derive(Debug, Clone, Default)]
pub struct TerminalSurface {
    state: MemorySurface,
    save_failed: String,
}

impl TerminalSurface {
    /// `save_failed` is the configured save-failure text, shown as a failure.
    pub fn new(save_failed: &str) -> Self {
        Self {
            state: MemorySurface::new(),
            save_failed: save_failed.to_string(),
        }
    }

    pub fn tone(&self, slot: Slot, text: &str) -> Tone {
        match slot {
            Slot::NotebookName => Tone::Name,
            Slot::AutosaveStatus if text == self.save_failed => Tone::Failure,
            Slot::AutosaveStatus => Tone::Pending,
            Slot::CheckpointStatus => Tone::Plain,
        }
    }

    /// What has been rendered so far.
    pub fn state(&self) -> &MemorySurface {
        &self.state
    }
}

impl DisplaySurface for TerminalSurface {
    fn set_text(&mut self, slot: Slot, text: &str) {
        let before = self.state.revision();
        self.state.set_text(slot, text);
        if self.state.revision() == before {
            return;
        }
        let value = self.tone(slot, text).paint(text);
        println!("{}", labelled(slot_label(slot), &value));
    }

    fn set_tooltip(&mut self, slot: Slot, tooltip: &str) {
        let before = self.state.revision();
        self.state.set_tooltip(slot, tooltip);
        if self.state.revision() != before {
            println!("{}", labelled("", &color::muted(tooltip)));
        }
    }

    fn set_window_title(&mut self, title: &str) {
        let before = self.state.revision();
        self.state.set_window_title(title);
        if self.state.revision() != before {
            println!("{}", labelled("title", &color::name(title)));
        }
    }
}

/// Renders the rename dialog as prompts on stdout.
#[derive(Debug, Default)]
pub struct TerminalDialogs;

impl DialogHost for TerminalDialogs {
    fn open(&mut self, spec: &DialogSpec) {
        let buttons: Vec<&str> = spec.buttons.iter().map(|b| b.label.as_str()).collect();
        println!("{}", labelled("dialog", &color::name(&spec.title)));
        println!("{}", labelled("", &spec.message));
        println!(
            "{}",
            labelled("", &format!("[{}]  {}", spec.input_value, buttons.join(" / ")))
        );
    }

    fn set_message(&mut self, message: &str) {
        println!("{}", labelled("", &color::pending(message)));
    }

    fn close(&mut self) {
        println!("{}", labelled("dialog", &color::muted("closed")));
    }
}

#[derive(Debug, Default)]
pub struct TerminalLocation;

impl LocationUpdater for TerminalLocation {
    fn replace_state(&mut self, _path: &str, url: &str) {
        println!("{}", labelled("location", url));
    }
}

/// In-memory document model.
///
/// A rename updates the identity and then queues `notebook_renamed` behind
/// whatever input the driver is currently handling.
pub struct LocalDocument {
    identity: RefCell<DocumentIdentity>,
    events: UnboundedSender<WidgetInput>,
}

impl LocalDocument {
    pub fn new(identity: DocumentIdentity, events: UnboundedSender<WidgetInput>) -> Self {
        Self {
            identity: RefCell::new(identity),
            events,
        }
    }
}

impl DocumentModel for LocalDocument {
    fn name(&self) -> String {
        self.identity.borrow().name.clone()
    }

    fn identity(&self) -> DocumentIdentity {
        self.identity.borrow().clone()
    }

    fn rename(&self, new_name: &str) {
        {
            let mut identity = self.identity.borrow_mut();
            identity.path = renamed_path(&identity.path, new_name);
            identity.name = new_name.to_string();
            info!(
                event = "host.document.rename_completed",
                name = %identity.name,
                path = %identity.path
            );
        }

        let renamed = WidgetInput::Event(DocumentEvent::NotebookRenamed);
        if self.events.send(renamed).is_err() {
            warn!(event = "host.document.rename_event_dropped");
        }
    }
}

/// Path of the document after renaming it to `new_name`.
///
/// Keeps the directory and the file extension of `path`.
pub fn renamed_path(path: &str, new_name: &str) -> String {
    let (dir, file) = match path.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, path),
    };
    let extension = match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => Some(ext),
        _ => None,
    };

    let file = match extension {
        Some(ext) => format!("{}.{}", new_name, ext),
        None => new_name.to_string(),
    };
    match dir {
        Some(dir) => format!("{}/{}", dir, file),
        None => file,
    }
}
