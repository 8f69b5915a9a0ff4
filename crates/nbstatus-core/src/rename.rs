//! Rename dialog flow.
//!
//! [`RenameController`] opens a modal pre-filled with the current name and
//! validates the candidate on confirm. Invalid input keeps the dialog open
//! with an inline message; valid input is handed to the document model and
//! the dialog closes. The displayed name is not touched here: it updates when
//! the document model later emits `notebook_renamed`.

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::document::{DocumentModel, validate_name};

pub const RENAME_TITLE: &str = "Rename Notebook";
pub const RENAME_PROMPT: &str = "Enter a new notebook name:";
pub const INVALID_NAME_MESSAGE: &str = "Invalid notebook name. Notebook names must have 1 or more \
     characters and can contain any characters except :/\\. Please enter a new notebook name:";
pub const INPUT_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Default,
}

/// What a dialog button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButtonAction {
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogButton {
    pub label: String,
    pub style: ButtonStyle,
    pub action: DialogButtonAction,
}

/// Everything the dialog host needs to render the rename modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSpec {
    pub title: String,
    pub message: String,
    pub input_value: String,
    pub input_size: usize,
    pub buttons: Vec<DialogButton>,
    /// Focus the text input and select its contents once the dialog is shown.
    pub focus_input_on_open: bool,
}

/// Host dialog subsystem.
pub trait DialogHost {
    fn open(&mut self, spec: &DialogSpec);
    fn set_message(&mut self, message: &str);
    fn close(&mut self);
}

/// Result of a dialog action, telling the host whether to close the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResponse {
    KeepOpen,
    Close,
}

/// Keys the rename input reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other(String),
}

/// State of the open rename dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDialog {
    pub input: String,
    pub message: String,
    pub input_focused: bool,
}

/// Drives the rename modal against the document model.
pub struct RenameController {
    document: Rc<dyn DocumentModel>,
    host: Box<dyn DialogHost>,
    dialog: Option<RenameDialog>,
}

impl RenameController {
    pub fn new(document: Rc<dyn DocumentModel>, host: Box<dyn DialogHost>) -> Self {
        Self {
            document,
            host,
            dialog: None,
        }
    }

    pub fn dialog(&self) -> Option<&RenameDialog> {
        self.dialog.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// Open the rename modal pre-filled with the current document name.
    pub fn start_rename(&mut self) {
        let current = self.document.name();
        let spec = DialogSpec {
            title: RENAME_TITLE.to_string(),
            message: RENAME_PROMPT.to_string(),
            input_value: current.clone(),
            input_size: INPUT_SIZE,
            buttons: vec![
                DialogButton {
                    label: "OK".to_string(),
                    style: ButtonStyle::Primary,
                    action: DialogButtonAction::Confirm,
                },
                DialogButton {
                    label: "Cancel".to_string(),
                    style: ButtonStyle::Default,
                    action: DialogButtonAction::Cancel,
                },
            ],
            focus_input_on_open: true,
        };

        self.dialog = Some(RenameDialog {
            input: current,
            message: spec.message.clone(),
            input_focused: spec.focus_input_on_open,
        });
        self.host.open(&spec);
        info!(event = "core.rename.dialog_opened");
    }

    /// Replace the text of the input field.
    pub fn set_input(&mut self, text: &str) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.input = text.to_string();
        }
    }

    pub fn set_input_focus(&mut self, focused: bool) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.input_focused = focused;
        }
    }

    /// Key pressed in the dialog. Returns true if the key was handled.
    ///
    /// Enter in the focused input behaves exactly like clicking OK.
    pub fn key_down(&mut self, key: &Key) -> bool {
        let focused = self.dialog.as_ref().is_some_and(|d| d.input_focused);
        match key {
            Key::Enter if focused => {
                let response = self.confirm();
                debug!(event = "core.rename.enter_confirmed", response = ?response);
                true
            }
            _ => false,
        }
    }

    pub fn click(&mut self, action: DialogButtonAction) -> DialogResponse {
        match action {
            DialogButtonAction::Confirm => self.confirm(),
            DialogButtonAction::Cancel => {
                self.cancel();
                DialogResponse::Close
            }
        }
    }

    /// Validate the candidate name and commit it if acceptable.
    pub fn confirm(&mut self) -> DialogResponse {
        let Some(dialog) = self.dialog.as_mut() else {
            warn!(event = "core.rename.confirm_without_dialog");
            return DialogResponse::Close;
        };

        let candidate = dialog.input.clone();
        if !self.document.is_valid_name(&candidate) {
            let reason = match validate_name(&candidate) {
                Err(e) => e.to_string(),
                Ok(()) => "rejected by document model".to_string(),
            };
            warn!(
                event = "core.rename.validation_failed",
                candidate = %candidate,
                reason = %reason
            );
            dialog.message = INVALID_NAME_MESSAGE.to_string();
            self.host.set_message(INVALID_NAME_MESSAGE);
            return DialogResponse::KeepOpen;
        }

        self.document.rename(&candidate);
        self.dialog = None;
        self.host.close();
        info!(event = "core.rename.rename_requested", name = %candidate);
        DialogResponse::Close
    }

    /// Close the dialog without renaming.
    pub fn cancel(&mut self) {
        if self.dialog.take().is_some() {
            self.host.close();
            debug!(event = "core.rename.cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::document::DocumentIdentity;

    #[derive(Default)]
    struct FakeDocument {
        name: RefCell<String>,
        renames: RefCell<Vec<String>>,
    }

    impl DocumentModel for FakeDocument {
        fn name(&self) -> String {
            self.name.borrow().clone()
        }

        fn identity(&self) -> DocumentIdentity {
            DocumentIdentity {
                name: self.name(),
                ..Default::default()
            }
        }

        fn rename(&self, new_name: &str) {
            self.renames.borrow_mut().push(new_name.to_string());
        }
    }

    #[derive(Default)]
    struct HostLog {
        opened: Vec<DialogSpec>,
        messages: Vec<String>,
        closed: usize,
    }

    #[derive(Clone, Default)]
    struct FakeHost(Rc<RefCell<HostLog>>);

    impl DialogHost for FakeHost {
        fn open(&mut self, spec: &DialogSpec) {
            self.0.borrow_mut().opened.push(spec.clone());
        }

        fn set_message(&mut self, message: &str) {
            self.0.borrow_mut().messages.push(message.to_string());
        }

        fn close(&mut self) {
            self.0.borrow_mut().closed += 1;
        }
    }

    fn controller() -> (RenameController, Rc<FakeDocument>, FakeHost) {
        let document = Rc::new(FakeDocument::default());
        *document.name.borrow_mut() = "Untitled".to_string();
        let host = FakeHost::default();
        let controller = RenameController::new(document.clone(), Box::new(host.clone()));
        (controller, document, host)
    }

    #[test]
    fn test_start_rename_prefills_current_name() {
        let (mut controller, _doc, host) = controller();

        controller.start_rename();

        let log = host.0.borrow();
        assert_eq!(log.opened.len(), 1);
        let spec = &log.opened[0];
        assert_eq!(spec.title, "Rename Notebook");
        assert_eq!(spec.message, "Enter a new notebook name:");
        assert_eq!(spec.input_value, "Untitled");
        assert_eq!(spec.input_size, 25);
        assert!(spec.focus_input_on_open);
        assert_eq!(spec.buttons[0].style, ButtonStyle::Primary);
        assert_eq!(spec.buttons[0].action, DialogButtonAction::Confirm);
        assert_eq!(spec.buttons[1].label, "Cancel");
    }

    #[test]
    fn test_invalid_name_keeps_dialog_open() {
        let (mut controller, doc, host) = controller();
        controller.start_rename();
        controller.set_input("My:Notebook");

        let response = controller.click(DialogButtonAction::Confirm);

        assert_eq!(response, DialogResponse::KeepOpen);
        assert!(controller.is_open());
        assert_eq!(
            controller.dialog().map(|d| d.message.as_str()),
            Some(INVALID_NAME_MESSAGE)
        );
        assert!(doc.renames.borrow().is_empty());
        assert_eq!(host.0.borrow().messages, vec![INVALID_NAME_MESSAGE]);
        assert_eq!(host.0.borrow().closed, 0);
    }

    #[test]
    fn test_valid_name_commits_and_closes() {
        let (mut controller, doc, host) = controller();
        controller.start_rename();
        controller.set_input("Analysis");

        let response = controller.confirm();

        assert_eq!(response, DialogResponse::Close);
        assert!(!controller.is_open());
        assert_eq!(*doc.renames.borrow(), vec!["Analysis".to_string()]);
        assert_eq!(host.0.borrow().closed, 1);
        // The displayed name waits for the renamed event.
        assert_eq!(doc.name(), "Untitled");
    }

    #[test]
    fn test_retry_after_invalid_input() {
        let (mut controller, doc, _host) = controller();
        controller.start_rename();

        controller.set_input("");
        assert_eq!(controller.confirm(), DialogResponse::KeepOpen);
        controller.set_input("ok name");
        assert_eq!(controller.confirm(), DialogResponse::Close);

        assert_eq!(*doc.renames.borrow(), vec!["ok name".to_string()]);
    }

    #[test]
    fn test_enter_in_focused_input_confirms() {
        let (mut controller, doc, _host) = controller();
        controller.start_rename();
        controller.set_input("a/b");

        assert!(controller.key_down(&Key::Enter));
        assert!(controller.is_open());
        assert!(doc.renames.borrow().is_empty());

        controller.set_input("ab");
        assert!(controller.key_down(&Key::Enter));
        assert!(!controller.is_open());
        assert_eq!(*doc.renames.borrow(), vec!["ab".to_string()]);
    }

    #[test]
    fn test_enter_without_focus_is_not_handled() {
        let (mut controller, doc, _host) = controller();
        controller.start_rename();
        controller.set_input_focus(false);

        assert!(!controller.key_down(&Key::Enter));
        assert!(!controller.key_down(&Key::Other("a".to_string())));
        assert!(controller.is_open());
        assert!(doc.renames.borrow().is_empty());
    }

    #[test]
    fn test_cancel_closes_without_rename() {
        let (mut controller, doc, host) = controller();
        controller.start_rename();
        controller.set_input("Other");

        assert_eq!(
            controller.click(DialogButtonAction::Cancel),
            DialogResponse::Close
        );
        assert!(!controller.is_open());
        assert!(doc.renames.borrow().is_empty());
        assert_eq!(host.0.borrow().closed, 1);
    }
}
