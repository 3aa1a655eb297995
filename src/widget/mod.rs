//! Widget Module - The segmented code input component.
//!
//! [`otp_input`] wires the pure reconciler to the runtime state systems:
//! per-box keyboard handlers feed events through
//! [`crate::reconcile::handle_event`], reported values go back into the
//! value signal, and navigation commands drive the focus system.
//!
//! The component holds no value state of its own - the owner's
//! `Signal<String>` is the single source of truth.

mod otp_input;
mod types;

pub use otp_input::{otp_input, request_focus};
pub use types::*;
