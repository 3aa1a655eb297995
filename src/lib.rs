//! # otp-tui
//!
//! Segmented one-time-code input widget for terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity and crossterm for terminal I/O.
//!
//! ## Architecture
//!
//! One authoritative string, owned by the host, drives N single-character
//! boxes. The core is a pure reconciliation state machine:
//!
//! ```text
//! owner value → project → display slots → user event → reconcile
//!     ↑                                                    │
//!     └──────── reported value + navigation command ◄──────┘
//! ```
//!
//! The core never stores the value between calls; every operation takes the
//! current value and reports the next one. Invalid input is absorbed
//! silently - no errors, no value report, no navigation.
//!
//! ## Modules
//!
//! - [`types`] - Display slots, edit outcomes, navigation commands
//! - [`projection`] - Value → slot derivation (pure)
//! - [`reconcile`] - Edit/key/focus classification (pure)
//! - [`state`] - Focus signal, keyboard dispatch, terminal input
//! - [`widget`] - The `otp_input` component
//! - [`render`] - A ready-made terminal painter

pub mod projection;
pub mod reconcile;
pub mod render;
pub mod state;
pub mod types;
pub mod widget;

// Re-export commonly used items
pub use types::*;

pub use projection::{box_value, project};

pub use reconcile::{
    PLACEHOLDER, handle_event, reconcile_change, reconcile_focus, reconcile_key, splice,
};

pub use state::focus::{
    FocusCallbacks, apply_navigation, blur, focus_box, get_focused_box, has_focus, is_focused,
    register_callbacks, reset_focus_state,
};

pub use state::input::{InputEvent, convert_key_event, poll_event, read_event, route_event};

pub use state::keyboard::{
    KeyHandler, KeyState, KeyboardEvent, Modifiers, dispatch as dispatch_keyboard,
    dispatch_focused, last_event, last_key, on as on_keyboard, on_focused, reset_keyboard_state,
};

pub use render::{draw, render_line, slot_state};

pub use widget::{BoxHandle, Cleanup, OtpChangeCallback, OtpInputProps, otp_input, request_focus};
