//! Value Projection - Derive display slots from the authoritative value.
//!
//! The owner holds one string; the widget shows N boxes. [`project`] is the
//! pure derivation between the two: it must be recomputed whenever the value
//! or the declared length changes, and it never mutates anything.
//!
//! # Example
//!
//! ```ignore
//! use otp_tui::projection::project;
//! use otp_tui::types::DisplaySlot;
//!
//! let slots = project("7", 3);
//! assert_eq!(slots, vec![
//!     DisplaySlot::Digit('7'),
//!     DisplaySlot::Empty,
//!     DisplaySlot::Empty,
//! ]);
//! ```

use crate::types::DisplaySlot;

/// Project the authoritative value onto exactly `value_length` slots.
///
/// Shorter values pad with empty slots; longer values truncate. A position
/// holding anything other than an ASCII decimal digit projects to
/// [`DisplaySlot::Empty`] - in particular the literal space spliced in by a
/// deletion occupies its position but never renders.
pub fn project(value: &str, value_length: usize) -> Vec<DisplaySlot> {
    let mut chars = value.chars();
    let mut slots = Vec::with_capacity(value_length);

    for _ in 0..value_length {
        match chars.next() {
            Some(c) if c.is_ascii_digit() => slots.push(DisplaySlot::Digit(c)),
            _ => slots.push(DisplaySlot::Empty),
        }
    }

    slots
}

/// The displayed content of one box: the digit as a string, or empty.
///
/// This is what the key-down path compares against when deciding whether a
/// Backspace should move focus backward.
pub fn box_value(value: &str, value_length: usize, index: usize) -> String {
    project(value, value_length)
        .get(index)
        .and_then(|slot| slot.as_char())
        .map(String::from)
        .unwrap_or_default()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_length_is_always_value_length() {
        for (value, len) in [("", 0), ("", 6), ("123", 6), ("1234567890", 4)] {
            assert_eq!(project(value, len).len(), len);
        }
    }

    #[test]
    fn test_short_value_pads_with_empty() {
        let slots = project("7", 3);
        assert_eq!(
            slots,
            vec![DisplaySlot::Digit('7'), DisplaySlot::Empty, DisplaySlot::Empty]
        );
    }

    #[test]
    fn test_long_value_truncates() {
        let slots = project("123456", 3);
        assert_eq!(
            slots,
            vec![
                DisplaySlot::Digit('1'),
                DisplaySlot::Digit('2'),
                DisplaySlot::Digit('3')
            ]
        );
    }

    #[test]
    fn test_non_digit_positions_are_empty() {
        // Placeholder space occupies index 2 without rendering
        let slots = project("12 456", 6);
        assert_eq!(slots[1], DisplaySlot::Digit('2'));
        assert_eq!(slots[2], DisplaySlot::Empty);
        assert_eq!(slots[3], DisplaySlot::Digit('4'));
    }

    #[test]
    fn test_letters_render_empty_but_hold_position() {
        let slots = project("1x3", 3);
        assert_eq!(slots[0], DisplaySlot::Digit('1'));
        assert_eq!(slots[1], DisplaySlot::Empty);
        assert_eq!(slots[2], DisplaySlot::Digit('3'));
    }

    #[test]
    fn test_non_ascii_input_is_safe() {
        // Unicode digits and wide chars are not ASCII digits: empty slots
        let slots = project("٣é9", 3);
        assert_eq!(slots[0], DisplaySlot::Empty);
        assert_eq!(slots[1], DisplaySlot::Empty);
        assert_eq!(slots[2], DisplaySlot::Digit('9'));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(project("90 1", 5), project("90 1", 5));
    }

    #[test]
    fn test_box_value() {
        assert_eq!(box_value("12 456", 6, 1), "2");
        assert_eq!(box_value("12 456", 6, 2), "");
        assert_eq!(box_value("12", 6, 5), "");
        assert_eq!(box_value("12", 6, 99), "");
    }
}
