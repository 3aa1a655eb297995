//! Otp Input - Segmented code input component.
//!
//! A row of `value_length` single-character boxes over one authoritative
//! string. The component owns no value state: it reads the signal on every
//! event, feeds the reconciler, writes the reported value back, and applies
//! the navigation command - value commit strictly before focus move, so each
//! interaction is one synchronous step.
//!
//! # Features
//!
//! - Two-way value binding via Signal
//! - Typed digits advance focus; full-length pastes fill and blur
//! - Backspace clears in place, then walks backward over empty boxes
//! - Arrow navigation between boxes
//! - Focus requests clamp to the first unfilled position
//!
//! # Example
//!
//! ```ignore
//! use otp_tui::widget::{otp_input, OtpInputProps};
//! use spark_signals::signal;
//!
//! let code = signal(String::new());
//! let cleanup = otp_input(OtpInputProps {
//!     auto_focus: true,
//!     ..OtpInputProps::new(code.clone(), 6)
//! });
//!
//! // ... event loop ...
//! cleanup();
//! ```

use std::rc::Rc;

use spark_signals::Signal;

use crate::projection::box_value;
use crate::reconcile::handle_event;
use crate::state::focus::{self, FocusCallbacks};
use crate::state::keyboard::{self, KeyboardEvent};
use crate::types::{NavigationCommand, OtpEvent};

use super::types::{BoxHandle, Cleanup, OtpChangeCallback, OtpInputProps};

// =============================================================================
// Component
// =============================================================================

/// Create a segmented code input.
///
/// Returns a cleanup function that unregisters all handlers.
pub fn otp_input(props: OtpInputProps) -> Cleanup {
    let value = props.value.clone();
    let value_length = props.value_length;
    let on_change = props.on_change.clone();
    let boxes: Rc<Vec<Rc<dyn BoxHandle>>> = Rc::new(props.boxes);

    let mut cleanups: Vec<Box<dyn FnOnce()>> = Vec::new();

    // Wire display capabilities to focus transitions: entering a box places
    // its cursor and selects its text, leaving it clears the cursor.
    for (index, handle) in boxes.iter().enumerate() {
        let gained = handle.clone();
        let lost = handle.clone();
        let cleanup = focus::register_callbacks(
            index,
            FocusCallbacks {
                on_focus: Some(Box::new(move || {
                    gained.focus();
                    gained.select_all();
                })),
                on_blur: Some(Box::new(move || lost.blur())),
            },
        );
        cleanups.push(Box::new(cleanup));
    }

    // One keyboard handler per box.
    for index in 0..value_length {
        let value = value.clone();
        let on_change = on_change.clone();
        let boxes = boxes.clone();
        let cleanup = keyboard::on_focused(index, move |event| {
            handle_box_key(index, event, &value, value_length, on_change.as_ref(), &boxes)
        });
        cleanups.push(Box::new(cleanup));
    }

    if props.auto_focus {
        request_focus(0, &value.get(), value_length);
    }

    Box::new(move || {
        focus::blur();
        for cleanup in cleanups {
            cleanup();
        }
        for index in 0..value_length {
            keyboard::cleanup_index(index);
        }
    })
}

/// Request focus for box `index` (mount, host click, programmatic focus).
///
/// The request is clamped to the first empty box at or before `index`, so
/// focus cannot land past an unfilled position.
pub fn request_focus(index: usize, current_value: &str, value_length: usize) {
    let response = handle_event(&OtpEvent::Focus { index }, current_value, value_length);
    if let Some(target) = response.focus_to {
        focus::focus_box(target);
    }
}

// =============================================================================
// Event Handling
// =============================================================================

/// Handle one key press on a focused box. Returns true if consumed.
fn handle_box_key(
    index: usize,
    event: &KeyboardEvent,
    value: &Signal<String>,
    value_length: usize,
    on_change: Option<&OtpChangeCallback>,
    boxes: &[Rc<dyn BoxHandle>],
) -> bool {
    // Chords (ctrl/alt/meta) are not edit payloads; leave them to the host.
    if event.modifiers.is_chord() {
        return false;
    }

    let current = value.get();

    // Key-down path: navigation and selection normalization.
    let key_response = handle_event(
        &OtpEvent::KeyDown {
            index,
            key: event.key.clone(),
        },
        &current,
        value_length,
    );
    if let Some(target) = key_response.select_all {
        if let Some(handle) = boxes.get(target) {
            handle.select_all();
        }
    }
    let moved = key_response.navigation != NavigationCommand::None;
    focus::apply_navigation(key_response.navigation, value_length);

    // The same press may carry an edit payload; downstream classification
    // is by payload length alone.
    let mut edited = false;
    if let Some(payload) = edit_payload(&event.key, &current, value_length, index) {
        let response = handle_event(&OtpEvent::Change { index, payload }, &current, value_length);
        if let Some(next) = response.next_value {
            // Value commits before the focus move.
            value.set(next.clone());
            if let Some(callback) = on_change {
                callback(&next);
            }
            focus::apply_navigation(response.navigation, value_length);
            edited = true;
        }
    }

    edited || moved || key_response.suppress_default
}

/// The edit payload a key press produces for the change path, if any.
///
/// Printable characters and pasted strings pass through verbatim; Backspace
/// on a box that still shows a digit produces the empty deletion payload;
/// named keys produce none.
fn edit_payload(
    key: &str,
    current_value: &str,
    value_length: usize,
    index: usize,
) -> Option<String> {
    match key {
        "" | "ArrowLeft" | "ArrowRight" | "ArrowUp" | "ArrowDown" | "Enter" | "Tab" | "Escape"
        | "Delete" | "Home" | "End" => None,
        "Backspace" => {
            let shown = box_value(current_value, value_length, index);
            (!shown.is_empty()).then(String::new)
        }
        other => Some(other.to_string()),
    }
}

// =============================================================================
// Tests
// =============================================================================
