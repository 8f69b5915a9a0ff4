//! nbstatus-core: notebook save/checkpoint status widget
//!
//! Shows the document name, a rename control, the save/dirty status, and a
//! "last checkpoint" time that stays fresh through a self-rescheduling
//! one-shot timer instead of polling.
//!
//! # Main Entry Points
//!
//! - [`widget`] - Compose the widget from its collaborators
//! - [`scheduler`] - Checkpoint display refresh and boundary math
//! - [`rename`] - Rename dialog flow
//! - [`sync`] - Document event handling
//! - [`driver`] - Current-thread tokio loop hosting a widget

pub mod checkpoint;
pub mod clock;
pub mod display;
pub mod document;
pub mod driver;
pub mod errors;
pub mod events;
pub mod formatter;
pub mod logging;
pub mod rename;
pub mod scheduler;
pub mod sync;
pub mod timer;
pub mod widget;

pub use checkpoint::Checkpoint;
pub use clock::{Clock, ManualClock, SystemClock};
pub use display::{CheckpointStatus, DisplaySurface, MemorySurface, Slot, StatusDisplay};
pub use document::{
    DocumentIdentity, DocumentModel, LocationUpdater, is_valid_name, url_join_encode,
    validate_name,
};
pub use driver::{Driver, LoopTimer, WidgetInput, decode_input, pump_lines};
pub use errors::{DriverError, NameError};
pub use events::DocumentEvent;
pub use formatter::{ChronoFormatter, RelativeThresholds, RelativeTimeFormatter, formatter_for};
pub use rename::{
    DialogButtonAction, DialogHost, DialogResponse, DialogSpec, Key, RenameController,
};
pub use scheduler::{
    CheckpointScheduler, ScheduledRefresh, SchedulerSettings, time_until_next_boundary_crossing,
};
pub use sync::EventSyncController;
pub use timer::{ManualTimer, Timer, TimerId};
pub use widget::{Collaborators, StatusWidget};

// Re-export config types used in the public API
pub use nbstatus_config::{ConfigError, StatusConfig};

pub use logging::init_logging;
