//! Gesture input for object manipulation
//!
//! Provides:
//! - `GestureState`, the lifecycle shared by every recognizer
//! - `ThresholdGesture`, a pan recognizer that ignores jitter below a
//!   touch-count dependent threshold
//! - `RotationGesture` and `TapGesture`
//! - `PointerTracker`, which turns raw pointer events into recognizer
//!   transitions for hosts that do not have a gesture framework

mod pointer;
mod rotation;
mod state;
mod tap;
mod threshold;

pub use pointer::{GestureUpdate, PointerEvent, PointerId, PointerTracker};
pub use rotation::RotationGesture;
pub use state::GestureState;
pub use tap::TapGesture;
pub use threshold::{ThresholdGesture, Thresholds, MULTI_TOUCH_THRESHOLD, SINGLE_TOUCH_THRESHOLD};

/// The recognizers an interaction is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Pan,
    Rotate,
    Tap,
}

/// Whether two recognizers may be active at the same time.
///
/// Objects can be dragged and rotated in one interaction, so every pair is
/// allowed to run together.
pub fn recognize_simultaneously(_first: GestureKind, _second: GestureKind) -> bool {
    true
}
