//! Single-threaded event loop hosting a [`StatusWidget`].
//!
//! The loop waits on two sources: the input channel (bus events and dialog
//! interactions, handled in the order sent) and the one deadline held by
//! [`LoopTimer`]. It runs on the current thread; the widget is not `Send`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::errors::DriverError;
use crate::events::DocumentEvent;
use crate::rename::{DialogButtonAction, Key};
use crate::timer::{Timer, TimerId};
use crate::widget::StatusWidget;

/// Everything the driver feeds into the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetInput {
    Event(DocumentEvent),
    StartRename,
    Input(String),
    Key(Key),
    Click(DialogButtonAction),
    Shutdown,
}

/// Deadline used when a delay would overflow the clock.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

#[derive(Debug, Default)]
struct LoopTimerState {
    next_id: u64,
    armed: Option<(TimerId, Instant)>,
}

/// [`Timer`] backed by the driver loop's single sleep.
///
/// Holds at most one deadline; arming replaces it.
#[derive(Debug, Clone, Default)]
pub struct LoopTimer {
    state: Rc<RefCell<LoopTimerState>>,
}

impl LoopTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The armed timer and its deadline.
    pub fn armed(&self) -> Option<(TimerId, Instant)> {
        self.state.borrow().armed
    }

    fn clear(&self, id: TimerId) {
        let mut state = self.state.borrow_mut();
        if state.armed.is_some_and(|(armed, _)| armed == id) {
            state.armed = None;
        }
    }
}

impl Timer for LoopTimer {
    fn arm(&mut self, delay: Duration) -> TimerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        let now = Instant::now();
        let deadline = now.checked_add(delay).unwrap_or(now + FAR_FUTURE);
        state.armed = Some((id, deadline));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.clear(id);
    }
}

/// Runs the widget until `Shutdown` arrives or every sender is dropped.
pub struct Driver {
    widget: StatusWidget,
    timer: LoopTimer,
    inputs: mpsc::UnboundedReceiver<WidgetInput>,
}

impl Driver {
    /// `timer` must be a clone of the timer handed to the widget.
    pub fn new(
        widget: StatusWidget,
        timer: LoopTimer,
        inputs: mpsc::UnboundedReceiver<WidgetInput>,
    ) -> Self {
        Self {
            widget,
            timer,
            inputs,
        }
    }

    /// Drive the loop. Returns the widget once the loop stops.
    pub async fn run(mut self) -> StatusWidget {
        info!(event = "core.driver.run_started");

        loop {
            let armed = self.timer.armed();
            let sleep = async move {
                match armed {
                    Some((_, deadline)) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                input = self.inputs.recv() => match input {
                    Some(WidgetInput::Shutdown) | None => break,
                    Some(input) => self.apply(input),
                },
                () = sleep => {
                    if let Some((id, _)) = armed {
                        self.timer.clear(id);
                        self.widget.on_timer_fired(id);
                    }
                }
            }
        }

        info!(event = "core.driver.run_completed");
        self.widget
    }

    fn apply(&mut self, input: WidgetInput) {
        match input {
            WidgetInput::Event(event) => self.widget.handle_event(&event),
            WidgetInput::StartRename => self.widget.start_rename(),
            WidgetInput::Input(text) => self.widget.rename().set_input(&text),
            WidgetInput::Key(key) => {
                self.widget.rename().key_down(&key);
            }
            WidgetInput::Click(action) => {
                let response = self.widget.rename().click(action);
                debug!(event = "core.driver.dialog_clicked", response = ?response);
            }
            WidgetInput::Shutdown => {}
        }
    }
}

/// JSON-lines input accepted by [`decode_input`]: either a document event or
/// a dialog action.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputLine {
    Event(DocumentEvent),
    Action(ActionLine),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ActionLine {
    Rename,
    Input { text: String },
    Key { key: String },
    Click { button: ButtonName },
    Shutdown,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ButtonName {
    Ok,
    Cancel,
}

/// Decode one JSON input line.
///
/// # Errors
///
/// `DriverError::Decode` when the line is neither an event nor an action.
pub fn decode_input(line: &str) -> Result<WidgetInput, DriverError> {
    let input = match serde_json::from_str::<InputLine>(line)? {
        InputLine::Event(event) => WidgetInput::Event(event),
        InputLine::Action(ActionLine::Rename) => WidgetInput::StartRename,
        InputLine::Action(ActionLine::Input { text }) => WidgetInput::Input(text),
        InputLine::Action(ActionLine::Key { key }) => {
            if key.eq_ignore_ascii_case("enter") {
                WidgetInput::Key(Key::Enter)
            } else {
                WidgetInput::Key(Key::Other(key))
            }
        }
        InputLine::Action(ActionLine::Click { button }) => WidgetInput::Click(match button {
            ButtonName::Ok => DialogButtonAction::Confirm,
            ButtonName::Cancel => DialogButtonAction::Cancel,
        }),
        InputLine::Action(ActionLine::Shutdown) => WidgetInput::Shutdown,
    };
    Ok(input)
}

/// Read JSON lines from `reader` and forward them to the driver.
///
/// Blank lines are skipped and undecodable lines are logged and dropped.
/// Sends `Shutdown` at end of input.
///
/// # Errors
///
/// `DriverError::Io` on read failure, `DriverError::ChannelClosed` if the
/// driver has gone away.
pub async fn pump_lines<R>(
    reader: R,
    sender: mpsc::UnboundedSender<WidgetInput>,
) -> Result<(), DriverError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match decode_input(line) {
            Ok(input) => sender
                .send(input)
                .map_err(|_| DriverError::ChannelClosed)?,
            Err(e) => warn!(event = "core.driver.input_rejected", error = %e),
        }
    }

    sender
        .send(WidgetInput::Shutdown)
        .map_err(|_| DriverError::ChannelClosed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_event_line() {
        let input = decode_input(r#"{"event": "save_failed"}"#).unwrap();
        assert_eq!(input, WidgetInput::Event(DocumentEvent::SaveFailed));
    }

    #[test]
    fn test_decode_action_lines() {
        assert_eq!(
            decode_input(r#"{"action": "rename"}"#).unwrap(),
            WidgetInput::StartRename
        );
        assert_eq!(
            decode_input(r#"{"action": "input", "text": "Draft"}"#).unwrap(),
            WidgetInput::Input("Draft".to_string())
        );
        assert_eq!(
            decode_input(r#"{"action": "key", "key": "Enter"}"#).unwrap(),
            WidgetInput::Key(Key::Enter)
        );
        assert_eq!(
            decode_input(r#"{"action": "click", "button": "cancel"}"#).unwrap(),
            WidgetInput::Click(DialogButtonAction::Cancel)
        );
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_input(r#"{"action": "explode"}"#).unwrap_err();
        assert_eq!(err.error_code(), "DRIVER_DECODE_ERROR");
    }

    #[tokio::test]
    async fn test_pump_lines_skips_bad_input_and_shuts_down() {
        let input = b"{\"event\": \"notebook_saved\"}\n\nnot json\n{\"action\": \"rename\"}\n";
        let (tx, mut rx) = mpsc::unbounded_channel();

        pump_lines(&input[..], tx).await.unwrap();

        assert_eq!(
            rx.recv().await,
            Some(WidgetInput::Event(DocumentEvent::NotebookSaved))
        );
        assert_eq!(rx.recv().await, Some(WidgetInput::StartRename));
        assert_eq!(rx.recv().await, Some(WidgetInput::Shutdown));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_timer_single_deadline() {
        let mut timer = LoopTimer::new();
        let first = timer.arm(Duration::from_secs(10));
        let second = timer.arm(Duration::from_secs(5));

        let (id, deadline) = timer.armed().unwrap();
        assert_eq!(id, second);
        assert_eq!(deadline, Instant::now() + Duration::from_secs(5));

        timer.cancel(first);
        assert!(timer.armed().is_some());
        timer.cancel(second);
        assert!(timer.armed().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_timer_overlong_delay_clamps() {
        let mut timer = LoopTimer::new();
        let id = timer.arm(Duration::MAX);

        let (armed, deadline) = timer.armed().unwrap();
        assert_eq!(armed, id);
        assert_eq!(deadline, Instant::now() + FAR_FUTURE);
    }
}
