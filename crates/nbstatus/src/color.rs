//! Terminal colors for slot output.
//!
//! Respects `NO_COLOR`, `FORCE_COLOR`, and TTY detection through
//! `owo-colors`' `if_supports_color()`, plus the `--no-color` flag.

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

static NO_COLOR_FLAG: AtomicBool = AtomicBool::new(false);

/// Call once from main.rs when `--no-color` is passed.
pub fn set_no_color() {
    NO_COLOR_FLAG.store(true, Ordering::Relaxed);
}

fn no_color() -> bool {
    NO_COLOR_FLAG.load(Ordering::Relaxed)
}

/// Slot labels.
pub fn label(text: &str) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.cyan()).to_string()
}

/// Document name and title.
pub fn name(text: &str) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.bold()).to_string()
}

/// Failure messages, e.g. "Autosave Failed!".
pub fn failure(text: &str) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.red()).to_string()
}

/// Pending state, e.g. unsaved changes or an invalid-name prompt.
pub fn pending(text: &str) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.yellow()).to_string()
}

/// Secondary detail such as tooltips.
pub fn muted(text: &str) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.dimmed()).to_string()
}
