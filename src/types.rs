//! Core types for otp-tui.
//!
//! These types define the data model the reconciler and widget build on:
//! display slots, edit outcomes, navigation commands, and raw events.

use bitflags::bitflags;

// =============================================================================
// Display Slot
// =============================================================================

/// One single-character position in the code row.
///
/// Slots are always re-derived from the authoritative value, never mutated
/// in place. Anything that is not a decimal digit (including the literal
/// space used as a deletion placeholder) projects to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySlot {
    /// A decimal digit ('0'..='9').
    Digit(char),
    /// No visible character.
    Empty,
}

impl DisplaySlot {
    /// True if the slot shows no character.
    pub fn is_empty(&self) -> bool {
        matches!(self, DisplaySlot::Empty)
    }

    /// The digit, if the slot holds one.
    pub fn as_char(&self) -> Option<char> {
        match self {
            DisplaySlot::Digit(c) => Some(*c),
            DisplaySlot::Empty => None,
        }
    }

    /// The character a renderer paints for this slot.
    pub fn render_char(&self) -> char {
        match self {
            DisplaySlot::Digit(c) => *c,
            DisplaySlot::Empty => ' ',
        }
    }
}

// =============================================================================
// Navigation Command
// =============================================================================

/// Where focus should go after an event is reconciled.
///
/// `Blur` carries the index that should lose focus: after a full-length
/// paste no box retains input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationCommand {
    /// Focus the box after `from` (no-op at the last box).
    FocusNext(usize),
    /// Focus the box before `from` (no-op at box 0).
    FocusPrevious(usize),
    /// Remove focus from box `from`.
    Blur(usize),
    /// Leave focus where it is.
    #[default]
    None,
}

// =============================================================================
// Edit Outcome
// =============================================================================

/// Classification of one raw edit payload against the current value.
///
/// Produced and consumed within a single reconciliation step; never stored.
/// `Rejected` covers every silently-absorbed case: non-digit input,
/// payloads whose length is neither 1 nor the declared length, and
/// full-length payloads that fail the digit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// A single digit was typed into the box at `index`.
    SingleDigitEntered(usize, char),
    /// The box at `index` was cleared (placeholder space spliced in).
    Cleared(usize),
    /// A full-length payload replaced the entire value.
    FullReplacement(String),
    /// The event was ignored: no value report, no navigation.
    Rejected,
}

// =============================================================================
// Raw Events
// =============================================================================

/// A raw interaction event targeting one box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpEvent {
    /// The box at `index` produced a new edit payload (typed character,
    /// cleared content, or pasted string).
    Change { index: usize, payload: String },
    /// A key went down while the box at `index` had focus.
    KeyDown { index: usize, key: String },
    /// Focus was requested for the box at `index` (mount, click, or
    /// programmatic focus).
    Focus { index: usize },
}

// =============================================================================
// Reconciliation Results
// =============================================================================

/// Result of reconciling a change payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeResult {
    /// How the payload was classified.
    pub outcome: EditOutcome,
    /// The value to report to the owner, if the edit was accepted.
    pub next_value: Option<String>,
    /// Focus move to apply after the owner commits the value.
    pub navigation: NavigationCommand,
}

impl ChangeResult {
    /// A silently-absorbed event: no report, no navigation.
    pub fn rejected() -> Self {
        Self {
            outcome: EditOutcome::Rejected,
            next_value: None,
            navigation: NavigationCommand::None,
        }
    }
}

/// Result of reconciling a key-down event.
///
/// The key path never alters the authoritative value; deletions flow
/// through the paired change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyResponse {
    /// Focus move to apply.
    pub navigation: NavigationCommand,
    /// The host should suppress the key's default behavior (arrow
    /// navigation, scrolling).
    pub suppress_default: bool,
    /// The host should select the box's entire text so retyping the same
    /// digit still registers as a change.
    pub select_all: bool,
}

/// Unified response for [`crate::reconcile::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// New authoritative value to commit, if any.
    pub next_value: Option<String>,
    /// Focus move to apply after the value is committed.
    pub navigation: NavigationCommand,
    /// Suppress the event's default behavior.
    pub suppress_default: bool,
    /// Box whose text should be fully selected.
    pub select_all: Option<usize>,
    /// Box that should receive focus (focus path, after gap clamping).
    pub focus_to: Option<usize>,
}

// =============================================================================
// Box State
// =============================================================================

bitflags! {
    /// Packed per-box display state for the render layer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BoxState: u8 {
        /// The box currently has input focus.
        const FOCUSED  = 1 << 0;
        /// The box shows a digit.
        const FILLED   = 1 << 1;
        /// The box's text is selected (a focused box keeps its digit
        /// selected so the next keystroke overwrites it).
        const SELECTED = 1 << 2;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_slot_accessors() {
        assert!(DisplaySlot::Empty.is_empty());
        assert!(!DisplaySlot::Digit('4').is_empty());
        assert_eq!(DisplaySlot::Digit('4').as_char(), Some('4'));
        assert_eq!(DisplaySlot::Empty.as_char(), None);
        assert_eq!(DisplaySlot::Digit('9').render_char(), '9');
        assert_eq!(DisplaySlot::Empty.render_char(), ' ');
    }

    #[test]
    fn test_navigation_default_is_none() {
        assert_eq!(NavigationCommand::default(), NavigationCommand::None);
    }

    #[test]
    fn test_rejected_change_result() {
        let result = ChangeResult::rejected();
        assert_eq!(result.outcome, EditOutcome::Rejected);
        assert!(result.next_value.is_none());
        assert_eq!(result.navigation, NavigationCommand::None);
    }

    #[test]
    fn test_box_state_flags() {
        let state = BoxState::FOCUSED | BoxState::FILLED;
        assert!(state.contains(BoxState::FOCUSED));
        assert!(state.contains(BoxState::FILLED));
        assert!(!state.contains(BoxState::SELECTED));
    }
}
