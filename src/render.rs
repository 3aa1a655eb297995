//! Render Module - Paint the box row.
//!
//! The core never calls into this module; it is one rendering collaborator
//! for hosts that want a ready-made terminal painter. Everything here is
//! derived from the projected slots and the focus signal - no retained
//! display state.

use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{Attribute, Print, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};

use crate::types::{BoxState, DisplaySlot};

// =============================================================================
// Box State Derivation
// =============================================================================

/// Derive the packed display state of one box.
///
/// A focused box that shows a digit is also SELECTED: the widget keeps the
/// focused box's text selected so the next keystroke overwrites it.
pub fn slot_state(slot: &DisplaySlot, index: usize, focused: i32) -> BoxState {
    let mut state = BoxState::empty();
    if !slot.is_empty() {
        state |= BoxState::FILLED;
    }
    if index as i32 == focused {
        state |= BoxState::FOCUSED;
        if state.contains(BoxState::FILLED) {
            state |= BoxState::SELECTED;
        }
    }
    state
}

// =============================================================================
// Painting
// =============================================================================

/// Render the row as plain text, one bracketed cell per box.
///
/// `project("7", 3)` renders as `[7][ ][ ]`.
pub fn render_line(slots: &[DisplaySlot]) -> String {
    let mut line = String::with_capacity(slots.len() * 3);
    for slot in slots {
        line.push('[');
        line.push(slot.render_char());
        line.push(']');
    }
    line
}

/// Paint the row styled at the current cursor line.
///
/// The focused box is drawn reversed, filled boxes bold, empty boxes
/// underlined.
pub fn draw<W: Write>(out: &mut W, slots: &[DisplaySlot], focused: i32) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;

    for (index, slot) in slots.iter().enumerate() {
        let state = slot_state(slot, index, focused);
        let cell = format!(" {} ", slot.render_char());
        let styled = if state.contains(BoxState::FOCUSED) {
            cell.reverse()
        } else if state.contains(BoxState::FILLED) {
            cell.bold()
        } else {
            cell.attribute(Attribute::Underlined)
        };
        queue!(out, PrintStyledContent(styled), Print(" "))?;
    }

    out.flush()
}

// =============================================================================
// Tests
// =============================================================================
