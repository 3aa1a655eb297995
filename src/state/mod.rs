//! State Module - Runtime state systems behind the widget.
//!
//! - **Focus** - focused box signal, navigation application, callbacks
//! - **Keyboard** - event types, dispatch, handler registry
//! - **Input** - crossterm event conversion, polling, routing

pub mod focus;
pub mod input;
pub mod keyboard;
