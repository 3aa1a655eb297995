//! Widget types - Props, callbacks, and the box capability trait.

use std::rc::Rc;

use spark_signals::Signal;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by the widget.
///
/// Call this to unmount the widget and release its handlers.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

/// Called with the new authoritative value whenever the reconciler reports
/// one (Rc so the callback can be cloned into per-box closures).
pub type OtpChangeCallback = Rc<dyn Fn(&str)>;

// =============================================================================
// Box Capability
// =============================================================================

/// Display-side capabilities of one box.
///
/// The widget decides *which* box index to invoke these on; a rendering
/// collaborator implements what they mean on screen. All three are display
/// effects only and never touch the authoritative value.
pub trait BoxHandle {
    /// Give the box the visible cursor.
    fn focus(&self);
    /// Take the visible cursor away.
    fn blur(&self);
    /// Select the box's entire text so the next keystroke overwrites it.
    fn select_all(&self);
}

// =============================================================================
// Otp Input Props
// =============================================================================

/// Properties for the segmented code input widget.
///
/// # Example
///
/// ```ignore
/// use otp_tui::widget::{otp_input, OtpInputProps};
/// use spark_signals::signal;
///
/// let code = signal(String::new());
/// let cleanup = otp_input(OtpInputProps {
///     auto_focus: true,
///     ..OtpInputProps::new(code.clone(), 6)
/// });
/// ```
pub struct OtpInputProps {
    /// The authoritative value (two-way bound; the widget writes reported
    /// values back, the owner may set it externally).
    pub value: Signal<String>,
    /// Number of boxes; must be > 0.
    pub value_length: usize,
    /// Called after each accepted edit with the reported value.
    pub on_change: Option<OtpChangeCallback>,
    /// Per-box display handles, in box order. Empty means the host renders
    /// purely from the focus signal and projection.
    pub boxes: Vec<Rc<dyn BoxHandle>>,
    /// Focus the first box on mount (gap-clamped).
    pub auto_focus: bool,
}

impl OtpInputProps {
    /// Props with required fields; everything else defaults off.
    pub fn new(value: Signal<String>, value_length: usize) -> Self {
        Self {
            value,
            value_length,
            on_change: None,
            boxes: Vec::new(),
            auto_focus: false,
        }
    }
}
