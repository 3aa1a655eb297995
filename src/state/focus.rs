//! Focus System - Which box owns the cursor.
//!
//! Tracks the focused box index as a reactive signal and applies the
//! navigation commands the reconciler emits:
//! - `focused_box` signal (-1 when no box is focused)
//! - `focus_box` / `blur` / `apply_navigation`
//! - focus callbacks (on_focus/on_blur) with cleanup
//!
//! # Example
//!
//! ```ignore
//! use otp_tui::state::focus;
//! use otp_tui::types::NavigationCommand;
//!
//! focus::focus_box(0);
//! focus::apply_navigation(NavigationCommand::FocusNext(0), 6);
//! assert_eq!(focus::get_focused_box(), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use spark_signals::{Signal, signal};

use crate::types::NavigationCommand;

// =============================================================================
// Focused Box Signal
// =============================================================================

thread_local! {
    static FOCUSED_BOX: Signal<i32> = signal(-1);
}

/// Get the currently focused box index (-1 if none).
pub fn get_focused_box() -> i32 {
    FOCUSED_BOX.with(|s| s.get())
}

/// Check if any box is focused.
pub fn has_focus() -> bool {
    get_focused_box() >= 0
}

/// Check if a specific box is focused.
pub fn is_focused(index: usize) -> bool {
    get_focused_box() == index as i32
}

// =============================================================================
// Focus Callbacks
// =============================================================================

/// Callbacks fired when a box gains or loses focus.
///
/// This is where a rendering collaborator hooks its display-side effects
/// (cursor placement, select-all on entry).
#[derive(Default)]
pub struct FocusCallbacks {
    pub on_focus: Option<Box<dyn Fn()>>,
    pub on_blur: Option<Box<dyn Fn()>>,
}

thread_local! {
    // Multiple callbacks per box supported (widget wiring + host callback)
    static CALLBACK_REGISTRY: RefCell<HashMap<usize, Vec<(usize, FocusCallbacks)>>> =
        RefCell::new(HashMap::new());
    static NEXT_CALLBACK_ID: RefCell<usize> = const { RefCell::new(0) };
}

/// Register focus callbacks for a box. Returns a cleanup function.
pub fn register_callbacks(index: usize, callbacks: FocusCallbacks) -> impl FnOnce() {
    let id = NEXT_CALLBACK_ID.with(|n| {
        let mut n = n.borrow_mut();
        let id = *n;
        *n += 1;
        id
    });
    CALLBACK_REGISTRY.with(|reg| {
        reg.borrow_mut()
            .entry(index)
            .or_default()
            .push((id, callbacks));
    });

    move || {
        CALLBACK_REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(list) = reg.get_mut(&index) {
                list.retain(|(cb_id, _)| *cb_id != id);
                if list.is_empty() {
                    reg.remove(&index);
                }
            }
        });
    }
}

/// Set focus and fire blur/focus callbacks at the transition.
fn set_focus_with_callbacks(new_index: i32) {
    let old_index = get_focused_box();
    if old_index == new_index {
        return;
    }

    // Fire on_blur for the box losing focus
    if old_index >= 0 {
        CALLBACK_REGISTRY.with(|reg| {
            let reg = reg.borrow();
            if let Some(list) = reg.get(&(old_index as usize)) {
                for (_, callbacks) in list {
                    if let Some(ref on_blur) = callbacks.on_blur {
                        on_blur();
                    }
                }
            }
        });
    }

    FOCUSED_BOX.with(|s| s.set(new_index));

    // Fire on_focus for the box gaining focus
    if new_index >= 0 {
        CALLBACK_REGISTRY.with(|reg| {
            let reg = reg.borrow();
            if let Some(list) = reg.get(&(new_index as usize)) {
                for (_, callbacks) in list {
                    if let Some(ref on_focus) = callbacks.on_focus {
                        on_focus();
                    }
                }
            }
        });
    }
}

// =============================================================================
// Focus Operations
// =============================================================================

/// Focus a specific box.
pub fn focus_box(index: usize) {
    set_focus_with_callbacks(index as i32);
}

/// Clear focus (no box focused).
pub fn blur() {
    set_focus_with_callbacks(-1);
}

/// Apply a navigation command from the reconciler.
///
/// Moves are bounded by the box row: `FocusNext` at the last box and
/// `FocusPrevious` at box 0 are no-ops.
pub fn apply_navigation(command: NavigationCommand, box_count: usize) {
    match command {
        NavigationCommand::FocusNext(from) => {
            if from + 1 < box_count {
                focus_box(from + 1);
            }
        }
        NavigationCommand::FocusPrevious(from) => {
            if from > 0 {
                focus_box(from - 1);
            }
        }
        NavigationCommand::Blur(_) => blur(),
        NavigationCommand::None => {}
    }
}

/// Reset all focus state (for testing).
pub fn reset_focus_state() {
    FOCUSED_BOX.with(|s| s.set(-1));
    CALLBACK_REGISTRY.with(|reg| reg.borrow_mut().clear());
    NEXT_CALLBACK_ID.with(|n| *n.borrow_mut() = 0);
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
        reset_focus_state();
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert_eq!(get_focused_box(), -1);
        assert!(!has_focus());
    }

    #[test]
    fn test_focus_and_blur() {
        setup();

        focus_box(2);
        assert_eq!(get_focused_box(), 2);
        assert!(is_focused(2));
        assert!(!is_focused(0));

        blur();
        assert!(!has_focus());
    }

    #[test]
    fn test_apply_navigation_bounds() {
        setup();

        focus_box(0);
        apply_navigation(NavigationCommand::FocusPrevious(0), 6);
        assert_eq!(get_focused_box(), 0); // no-op at box 0

        focus_box(5);
        apply_navigation(NavigationCommand::FocusNext(5), 6);
        assert_eq!(get_focused_box(), 5); // no-op at last box
    }

    #[test]
    fn test_apply_navigation_moves() {
        setup();

        focus_box(2);
        apply_navigation(NavigationCommand::FocusNext(2), 6);
        assert_eq!(get_focused_box(), 3);

        apply_navigation(NavigationCommand::FocusPrevious(3), 6);
        assert_eq!(get_focused_box(), 2);

        apply_navigation(NavigationCommand::Blur(2), 6);
        assert_eq!(get_focused_box(), -1);

        apply_navigation(NavigationCommand::None, 6);
        assert_eq!(get_focused_box(), -1);
    }

    #[test]
    fn test_focus_callbacks_fire_on_transition() {
        setup();

        let focus_count = Rc::new(Cell::new(0));
        let blur_count = Rc::new(Cell::new(0));

        let fc = focus_count.clone();
        let bc = blur_count.clone();
        let _cleanup = register_callbacks(
            1,
            FocusCallbacks {
                on_focus: Some(Box::new(move || fc.set(fc.get() + 1))),
                on_blur: Some(Box::new(move || bc.set(bc.get() + 1))),
            },
        );

        focus_box(1);
        assert_eq!(focus_count.get(), 1);
        assert_eq!(blur_count.get(), 0);

        // Refocusing the same box fires nothing
        focus_box(1);
        assert_eq!(focus_count.get(), 1);

        focus_box(2);
        assert_eq!(blur_count.get(), 1);

        focus_box(1);
        assert_eq!(focus_count.get(), 2);
    }

    #[test]
    fn test_callback_cleanup_unregisters() {
        setup();

        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let cleanup = register_callbacks(
            0,
            FocusCallbacks {
                on_focus: Some(Box::new(move || c.set(c.get() + 1))),
                on_blur: None,
            },
        );

        focus_box(0);
        assert_eq!(count.get(), 1);

        blur();
        cleanup();

        focus_box(0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_multiple_callbacks_per_box() {
        setup();

        let a = Rc::new(Cell::new(0));
        let b = Rc::new(Cell::new(0));

        let a_clone = a.clone();
        let _c1 = register_callbacks(
            3,
            FocusCallbacks {
                on_focus: Some(Box::new(move || a_clone.set(a_clone.get() + 1))),
                on_blur: None,
            },
        );
        let b_clone = b.clone();
        let _c2 = register_callbacks(
            3,
            FocusCallbacks {
                on_focus: Some(Box::new(move || b_clone.set(b_clone.get() + 1))),
                on_blur: None,
            },
        );

        focus_box(3);
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 1);
    }
}
