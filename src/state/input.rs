//! Input Module - Terminal event conversion and polling.
//!
//! Bridges crossterm's event stream to the widget's keyboard dispatch.
//!
//! # API
//!
//! - `convert_key_event` - crossterm KeyEvent to our KeyboardEvent
//! - `poll_event` - non-blocking event check with timeout
//! - `read_event` - blocking event read
//! - `route_event` - dispatch an event to the focused box, then globals
//!
//! A bracketed paste is routed as an ordinary [`KeyboardEvent`] whose `key`
//! is the pasted payload; downstream classification is by payload length
//! only, so no paste-specific channel exists.
//!
//! # Example
//!
//! ```ignore
//! use otp_tui::state::input::{poll_event, route_event};
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         route_event(event);
//!     }
//! }
//! ```

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers, poll, read,
};

use super::focus;
use super::keyboard::{self, KeyState, KeyboardEvent, Modifiers};

// =============================================================================
// Input Event Enum
// =============================================================================

/// Unified event type for the widget.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Keyboard event (key press, release, etc.)
    Key(KeyboardEvent),
    /// Bracketed paste payload.
    Paste(String),
    /// Terminal resize event (new width, height).
    Resize(u16, u16),
    /// No event or unhandled event type.
    None,
}

// =============================================================================
// Key Event Conversion
// =============================================================================

/// Convert a crossterm KeyEvent to our KeyboardEvent.
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        crossterm::event::KeyEventKind::Press => KeyState::Press,
        crossterm::event::KeyEventKind::Repeat => KeyState::Repeat,
        crossterm::event::KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

/// Convert crossterm KeyModifiers to our Modifiers.
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: mods.contains(KeyModifiers::SUPER),
    }
}

// =============================================================================
// Event Polling
// =============================================================================

/// Poll for an event with timeout. Returns None if no event arrived.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    match read()? {
        CrosstermEvent::Key(key) => Ok(InputEvent::Key(convert_key_event(key))),
        CrosstermEvent::Paste(payload) => Ok(InputEvent::Paste(payload)),
        CrosstermEvent::Resize(w, h) => Ok(InputEvent::Resize(w, h)),
        _ => Ok(InputEvent::None),
    }
}

// =============================================================================
// Event Routing
// =============================================================================

/// Route an event to the focused box, falling through to global handlers.
/// Returns true if any handler consumed the event.
pub fn route_event(event: InputEvent) -> bool {
    match event {
        InputEvent::Key(key) => keyboard::dispatch(focus::get_focused_box(), key),
        InputEvent::Paste(payload) => {
            // The payload rides the same channel a keystroke does; length
            // alone tells the reconciler it was a paste.
            keyboard::dispatch(focus::get_focused_box(), KeyboardEvent::new(payload))
        }
        InputEvent::Resize(_, _) => false,
        InputEvent::None => false,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn key_event(code: KeyCode) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_digit_key() {
        let event = convert_key_event(key_event(KeyCode::Char('7')));
        assert_eq!(event.key, "7");
        assert_eq!(event.state, KeyState::Press);
        assert!(!event.modifiers.is_chord());
    }

    #[test]
    fn test_convert_arrow_keys() {
        let arrows = [
            (KeyCode::Up, "ArrowUp"),
            (KeyCode::Down, "ArrowDown"),
            (KeyCode::Left, "ArrowLeft"),
            (KeyCode::Right, "ArrowRight"),
        ];
        for (code, expected) in arrows {
            assert_eq!(convert_key_event(key_event(code)).key, expected);
        }
    }

    #[test]
    fn test_convert_editing_keys() {
        assert_eq!(convert_key_event(key_event(KeyCode::Backspace)).key, "Backspace");
        assert_eq!(convert_key_event(key_event(KeyCode::Delete)).key, "Delete");
        assert_eq!(convert_key_event(key_event(KeyCode::Enter)).key, "Enter");
        assert_eq!(convert_key_event(key_event(KeyCode::Esc)).key, "Escape");
    }

    #[test]
    fn test_convert_modifiers() {
        let event = convert_key_event(CrosstermKeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL | KeyModifiers::SHIFT,
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        });
        assert!(event.modifiers.ctrl);
        assert!(event.modifiers.shift);
        assert!(!event.modifiers.alt);
        assert!(event.modifiers.is_chord());
    }

    #[test]
    fn test_convert_key_states() {
        let states = [
            (crossterm::event::KeyEventKind::Press, KeyState::Press),
            (crossterm::event::KeyEventKind::Repeat, KeyState::Repeat),
            (crossterm::event::KeyEventKind::Release, KeyState::Release),
        ];
        for (kind, expected) in states {
            let event = convert_key_event(CrosstermKeyEvent {
                code: KeyCode::Char('1'),
                modifiers: KeyModifiers::empty(),
                kind,
                state: crossterm::event::KeyEventState::NONE,
            });
            assert_eq!(event.state, expected);
        }
    }

    #[test]
    fn test_route_key_to_focused_box() {
        focus::reset_focus_state();
        keyboard::reset_keyboard_state();

        let seen = Rc::new(Cell::new(false));
        let s = seen.clone();
        let _cleanup = keyboard::on_focused(1, move |event| {
            s.set(event.key == "5");
            true
        });

        focus::focus_box(1);
        assert!(route_event(InputEvent::Key(KeyboardEvent::new("5"))));
        assert!(seen.get());
    }

    #[test]
    fn test_route_paste_as_payload_key() {
        focus::reset_focus_state();
        keyboard::reset_keyboard_state();

        let payload = Rc::new(Cell::new(String::new()));
        let p = payload.clone();
        let _cleanup = keyboard::on_focused(0, move |event| {
            p.set(event.key.clone());
            true
        });

        focus::focus_box(0);
        assert!(route_event(InputEvent::Paste("123456".to_string())));
        assert_eq!(payload.take(), "123456");
    }

    #[test]
    fn test_route_resize_and_none_unconsumed() {
        assert!(!route_event(InputEvent::Resize(80, 24)));
        assert!(!route_event(InputEvent::None));
    }
}
