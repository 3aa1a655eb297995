//! Edit Reconciliation - Classify raw events and decide value + focus.
//!
//! The reconciler is given the current authoritative value on every call and
//! never retains it: value in, value out. Three paths:
//!
//! - `reconcile_change` - a box produced a new edit payload (typed digit,
//!   cleared content, or pasted string, told apart purely by length)
//! - `reconcile_key` - a key went down on a focused box (arrow navigation,
//!   backward deletion through empty boxes)
//! - `reconcile_focus` - focus was requested for a box (gap clamping)
//!
//! `handle_event` dispatches the three paths behind one entry point.
//!
//! Invalid input is absorbed silently: no value report, no navigation,
//! never an error.
//!
//! # Example
//!
//! ```ignore
//! use otp_tui::reconcile::reconcile_change;
//!
//! let result = reconcile_change(1, "5", "7  ", 3);
//! assert_eq!(result.next_value.as_deref(), Some("75 "));
//! ```

use crate::projection::{box_value, project};
use crate::types::{
    ChangeResult, DisplaySlot, EditOutcome, EventResponse, KeyResponse, NavigationCommand,
    OtpEvent,
};

/// The character spliced into the value when a box is cleared.
///
/// A literal space keeps later digits at their positions instead of
/// shifting them left; the projector renders it as an empty slot.
pub const PLACEHOLDER: char = ' ';

// =============================================================================
// Splice
// =============================================================================

/// Replace exactly one character of `value` at `index`, leaving all others
/// unchanged.
///
/// Out-of-range indices are clamped the way string slicing clamps: splicing
/// past the end appends. Char-indexed, so non-ASCII values cannot panic.
pub fn splice(value: &str, index: usize, ch: char) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();
    let cut = index.min(len);

    let mut next = String::with_capacity(value.len() + ch.len_utf8());
    next.extend(&chars[..cut]);
    next.push(ch);
    if index + 1 < len {
        next.extend(&chars[index + 1..]);
    }
    next
}

// =============================================================================
// Change Path
// =============================================================================

/// Reconcile a raw edit payload from the box at `index`.
///
/// The payload is trimmed, then classified by content and length:
///
/// 1. Non-empty input that is not all decimal digits is rejected. The digit
///    test covers the whole payload, so a full-length paste containing any
///    non-digit is rejected here too.
/// 2. Empty input (a deletion) becomes a single [`PLACEHOLDER`] space.
/// 3. Length 1 splices into the value at `index`; a genuine digit issues
///    `FocusNext`, the placeholder issues no navigation. Length equal to
///    `value_length` replaces the whole value and blurs the receiving box.
///    Any other length is a silent no-op.
pub fn reconcile_change(
    index: usize,
    raw_input: &str,
    current_value: &str,
    value_length: usize,
) -> ChangeResult {
    let trimmed = raw_input.trim();
    let is_digits = !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit());

    if !is_digits && !trimmed.is_empty() {
        return ChangeResult::rejected();
    }

    // A deletion is spliced as a placeholder space so the position reads
    // "cleared" without shifting subsequent characters.
    let effective = if is_digits {
        trimmed.to_string()
    } else {
        PLACEHOLDER.to_string()
    };
    let effective_len = effective.chars().count();

    if effective_len == 1 {
        let ch = match effective.chars().next() {
            Some(c) => c,
            None => return ChangeResult::rejected(),
        };
        let next_value = splice(current_value, index, ch);

        if is_digits {
            ChangeResult {
                outcome: EditOutcome::SingleDigitEntered(index, ch),
                next_value: Some(next_value),
                navigation: NavigationCommand::FocusNext(index),
            }
        } else {
            // Clearing via the change path performs no focus move; backing
            // out of an already-empty box is the key path's job.
            ChangeResult {
                outcome: EditOutcome::Cleared(index),
                next_value: Some(next_value),
                navigation: NavigationCommand::None,
            }
        }
    } else if effective_len == value_length {
        // Full-length paste: the payload verbatim becomes the value, and
        // the receiving box gives up focus.
        ChangeResult {
            outcome: EditOutcome::FullReplacement(effective.clone()),
            next_value: Some(effective),
            navigation: NavigationCommand::Blur(index),
        }
    } else {
        // Partial paste (1 < len < value_length, or longer): no-op.
        ChangeResult::rejected()
    }
}

// =============================================================================
// Key Path
// =============================================================================

/// Reconcile a key-down on the box at `index`.
///
/// `current_box_value` is the box's *displayed* content at the moment of
/// key-down (empty string or one digit), not the authoritative value. This
/// path never alters the value; a deletion's value change rides on the
/// paired change event.
pub fn reconcile_key(index: usize, key: &str, current_box_value: &str) -> KeyResponse {
    match key {
        "ArrowRight" | "ArrowDown" => KeyResponse {
            navigation: NavigationCommand::FocusNext(index),
            suppress_default: true,
            select_all: false,
        },
        "ArrowLeft" | "ArrowUp" => KeyResponse {
            navigation: NavigationCommand::FocusPrevious(index),
            suppress_default: true,
            select_all: false,
        },
        _ => {
            // Keep the box's text selected so retyping the same digit still
            // registers as a change.
            let navigation = if key == "Backspace" && current_box_value.is_empty() {
                // Backing out of a box that already shows nothing. A box
                // that still shows a digit must keep focus while the change
                // path clears it.
                NavigationCommand::FocusPrevious(index)
            } else {
                NavigationCommand::None
            };
            KeyResponse {
                navigation,
                suppress_default: false,
                select_all: true,
            }
        }
    }
}

// =============================================================================
// Focus Path
// =============================================================================

/// Clamp a focus request to the first empty box at or before `requested`.
///
/// Scanning from index 0: if an earlier box shows nothing, focus lands
/// there instead, so the user cannot focus past an unfilled position.
pub fn reconcile_focus(requested: usize, slots: &[DisplaySlot]) -> usize {
    for (i, slot) in slots.iter().enumerate().take(requested + 1) {
        if slot.is_empty() {
            return i;
        }
    }
    requested
}

// =============================================================================
// Unified Entry
// =============================================================================

/// Reconcile one raw interaction event against the current value.
///
/// The host applies the response in order: commit `next_value`, then apply
/// `navigation` / `focus_to`, then `select_all` - matching the strict
/// happens-before chain of physical events.
pub fn handle_event(event: &OtpEvent, current_value: &str, value_length: usize) -> EventResponse {
    match event {
        OtpEvent::Change { index, payload } => {
            let result = reconcile_change(*index, payload, current_value, value_length);
            EventResponse {
                next_value: result.next_value,
                navigation: result.navigation,
                ..Default::default()
            }
        }
        OtpEvent::KeyDown { index, key } => {
            let current_box = box_value(current_value, value_length, *index);
            let result = reconcile_key(*index, key, &current_box);
            EventResponse {
                navigation: result.navigation,
                suppress_default: result.suppress_default,
                select_all: result.select_all.then_some(*index),
                ..Default::default()
            }
        }
        OtpEvent::Focus { index } => {
            let slots = project(current_value, value_length);
            let landed = reconcile_focus(*index, &slots);
            EventResponse {
                select_all: Some(landed),
                focus_to: Some(landed),
                ..Default::default()
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
