//! Shared fakes for nbstatus-core integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use nbstatus_core::rename::DialogSpec;
use nbstatus_core::{
    ChronoFormatter, Clock, Collaborators, DialogHost, DocumentIdentity, DocumentModel,
    LocationUpdater, MemorySurface, StatusConfig, StatusWidget, Timer,
};

pub fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

/// Document model that records renames without applying them.
#[derive(Default)]
pub struct FakeDocument {
    pub identity: RefCell<DocumentIdentity>,
    pub renames: RefCell<Vec<String>>,
}

impl FakeDocument {
    pub fn new(name: &str, path: &str, base_url: &str) -> Rc<Self> {
        Rc::new(Self {
            identity: RefCell::new(DocumentIdentity {
                name: name.to_string(),
                path: path.to_string(),
                base_url: base_url.to_string(),
            }),
            renames: RefCell::new(Vec::new()),
        })
    }

    /// Apply a rename the way the real model would before emitting the event.
    pub fn complete_rename(&self, name: &str, path: &str) {
        let mut identity = self.identity.borrow_mut();
        identity.name = name.to_string();
        identity.path = path.to_string();
    }
}

impl DocumentModel for FakeDocument {
    fn name(&self) -> String {
        self.identity.borrow().name.clone()
    }

    fn identity(&self) -> DocumentIdentity {
        self.identity.borrow().clone()
    }

    fn rename(&self, new_name: &str) {
        self.renames.borrow_mut().push(new_name.to_string());
    }
}

#[derive(Debug, Default)]
pub struct DialogLog {
    pub opened: Vec<DialogSpec>,
    pub messages: Vec<String>,
    pub closed: usize,
}

#[derive(Clone, Default)]
pub struct FakeDialogs(pub Rc<RefCell<DialogLog>>);

impl DialogHost for FakeDialogs {
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

#[derive(Clone, Default)]
pub struct FakeLocation(pub Rc<RefCell<Vec<(String, String)>>>);

impl LocationUpdater for FakeLocation {
    fn replace_state(&mut self, path: &str, url: &str) {
        self.0.borrow_mut().push((path.to_string(), url.to_string()));
    }
}

pub struct Harness {
    pub widget: StatusWidget,
    pub document: Rc<FakeDocument>,
    pub surface: MemorySurface,
    pub dialogs: FakeDialogs,
    pub location: FakeLocation,
}

/// Build a widget around fakes, with the given timer and clock and a UTC formatter.
pub fn harness(timer: Box<dyn Timer>, clock: Box<dyn Clock>) -> Harness {
    let document = FakeDocument::new("Untitled", "work/Untitled.ipynb", "/");
    let surface = MemorySurface::new();
    let dialogs = FakeDialogs::default();
    let location = FakeLocation::default();

    let widget = StatusWidget::new(
        &StatusConfig::default(),
        Collaborators {
            document: document.clone(),
            surface: Box::new(surface.clone()),
            dialogs: Box::new(dialogs.clone()),
            location: Box::new(location.clone()),
            timer,
            clock,
            formatter: Some(Box::new(ChronoFormatter::utc())),
        },
    );

    Harness {
        widget,
        document,
        surface,
        dialogs,
        location,
    }
}
