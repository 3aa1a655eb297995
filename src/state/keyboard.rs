//! Keyboard Module - Event type and handler registry.
//!
//! Holds the last-event signal and the handler registries the widget wires
//! into. Does NOT own stdin (that is the input module's job).
//!
//! # API
//!
//! - `last_event` / `last_key` - reactive last keyboard event
//! - `on(handler)` - subscribe to all keyboard events
//! - `on_focused(i, handler)` - subscribe while box i has focus
//! - `dispatch_focused` / `dispatch_to_handlers` - routing entry points
//!
//! # Example
//!
//! ```ignore
//! use otp_tui::state::keyboard;
//!
//! let cleanup = keyboard::on_focused(0, |event| {
//!     event.key == "Enter" // consume Enter on box 0
//! });
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use spark_signals::{Signal, signal};

// =============================================================================
// Types
// =============================================================================

/// Keyboard modifier state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub fn none() -> Self {
        Self::default()
    }

    /// True if any modifier other than shift is held.
    ///
    /// Shift is part of ordinary typing; ctrl/alt/meta chords are not edit
    /// payloads and are left for the host.
    pub fn is_chord(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Key event state (press, repeat, release).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// A keyboard event.
///
/// `key` is a name ("a", "5", "Backspace", "ArrowLeft") for single presses.
/// A bracketed paste arrives as a multi-character `key` carrying the pasted
/// payload - classification happens downstream purely by length, so the
/// paste needs no channel of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key name or pasted payload.
    pub key: String,
    /// Modifier keys state.
    pub modifiers: Modifiers,
    /// Press/repeat/release state.
    pub state: KeyState,
}

impl KeyboardEvent {
    /// A simple key press.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// A key press with modifiers.
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Box<dyn Fn(&KeyboardEvent) -> bool>;

// =============================================================================
// State
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyboardEvent>> = signal(None);
}

/// Get the last keyboard event.
pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// Get the last key pressed.
pub fn last_key() -> String {
    last_event().map(|e| e.key).unwrap_or_default()
}

/// Update the last-event signal without dispatching.
pub fn update_last_event(event: KeyboardEvent) {
    LAST_EVENT.with(|s| s.set(Some(event)));
}

// =============================================================================
// Handler Registry
// =============================================================================

struct HandlerRegistry {
    global_handlers: Vec<(usize, KeyHandler)>,
    focused_handlers: HashMap<usize, Vec<(usize, KeyHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            global_handlers: Vec::new(),
            focused_handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

// =============================================================================
// Dispatch
// =============================================================================

/// Dispatch an event: focused box first, then global handlers.
/// Returns true if any handler consumed the event.
pub fn dispatch(focused_box: i32, event: KeyboardEvent) -> bool {
    update_last_event(event.clone());

    if event.state != KeyState::Press {
        return false;
    }
    if dispatch_focused(focused_box, &event) {
        return true;
    }
    dispatch_to_handlers(&event)
}

/// Dispatch to the handlers of the focused box only.
pub fn dispatch_focused(focused_box: i32, event: &KeyboardEvent) -> bool {
    if focused_box < 0 || event.state != KeyState::Press {
        return false;
    }

    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        if let Some(handlers) = reg.focused_handlers.get(&(focused_box as usize)) {
            for (_, handler) in handlers {
                if handler(event) {
                    return true;
                }
            }
        }
        false
    })
}

/// Dispatch to global handlers only.
pub fn dispatch_to_handlers(event: &KeyboardEvent) -> bool {
    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        for (_, handler) in &reg.global_handlers {
            if handler(event) {
                return true;
            }
        }
        false
    })
}

// =============================================================================
// Public API
// =============================================================================

/// Subscribe to all keyboard events. Returns a cleanup function.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.global_handlers.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.global_handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Subscribe to events while box `index` has focus. Returns a cleanup
/// function.
pub fn on_focused<F>(index: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.focused_handlers
            .entry(index)
            .or_default()
            .push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.focused_handlers.get_mut(&index) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.focused_handlers.remove(&index);
                }
            }
        });
    }
}

/// Remove all handlers for a box index (component teardown).
pub fn cleanup_index(index: usize) {
    REGISTRY.with(|reg| {
        reg.borrow_mut().focused_handlers.remove(&index);
    });
}

/// True if any handler is registered for the box index.
pub fn has_handlers(index: usize) -> bool {
    REGISTRY.with(|reg| reg.borrow().focused_handlers.contains_key(&index))
}

/// Reset keyboard state (for testing).
pub fn reset_keyboard_state() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.global_handlers.clear();
        reg.focused_handlers.clear();
        reg.next_id = 0;
    });
    LAST_EVENT.with(|s| s.set(None));
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_keyboard_state();
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert!(last_event().is_none());
        assert_eq!(last_key(), "");
    }

    #[test]
    fn test_dispatch_updates_last_event() {
        setup();

        dispatch(-1, KeyboardEvent::new("7"));
        assert_eq!(last_key(), "7");

        dispatch(-1, KeyboardEvent::new("Backspace"));
        assert_eq!(last_key(), "Backspace");
    }

    #[test]
    fn test_focused_handler_receives_only_its_box() {
        setup();

        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let cleanup = on_focused(2, move |_event| {
            c.set(c.get() + 1);
            false
        });

        let event = KeyboardEvent::new("5");
        dispatch_focused(0, &event);
        assert_eq!(count.get(), 0);

        dispatch_focused(2, &event);
        assert_eq!(count.get(), 1);

        cleanup();
        dispatch_focused(2, &event);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_focused_handler_runs_before_global() {
        setup();

        let reached_global = Rc::new(Cell::new(false));
        let rg = reached_global.clone();
        let _g = on(move |_| {
            rg.set(true);
            false
        });

        let _f = on_focused(0, |_| true); // consumes

        let consumed = dispatch(0, KeyboardEvent::new("5"));
        assert!(consumed);
        assert!(!reached_global.get());
    }

    #[test]
    fn test_unconsumed_event_falls_through_to_global() {
        setup();

        let reached_global = Rc::new(Cell::new(false));
        let rg = reached_global.clone();
        let _g = on(move |_| {
            rg.set(true);
            true
        });

        let _f = on_focused(0, |_| false);

        assert!(dispatch(0, KeyboardEvent::new("5")));
        assert!(reached_global.get());
    }

    #[test]
    fn test_only_press_dispatched() {
        setup();

        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let _cleanup = on_focused(0, move |_| {
            c.set(c.get() + 1);
            false
        });

        for state in [KeyState::Press, KeyState::Repeat, KeyState::Release] {
            let event = KeyboardEvent {
                key: "5".to_string(),
                modifiers: Modifiers::none(),
                state,
            };
            dispatch_focused(0, &event);
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_no_focus_no_focused_dispatch() {
        setup();

        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let _cleanup = on_focused(0, move |_| {
            c.set(c.get() + 1);
            false
        });

        assert!(!dispatch_focused(-1, &KeyboardEvent::new("5")));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_cleanup_index_removes_all() {
        setup();

        let _c1 = on_focused(4, |_| false);
        let _c2 = on_focused(4, |_| false);
        assert!(has_handlers(4));

        cleanup_index(4);
        assert!(!has_handlers(4));
    }

    #[test]
    fn test_is_chord() {
        assert!(!Modifiers::none().is_chord());
        assert!(
            !Modifiers {
                shift: true,
                ..Modifiers::none()
            }
            .is_chord()
        );
        assert!(
            Modifiers {
                ctrl: true,
                ..Modifiers::none()
            }
            .is_chord()
        );
    }
}
