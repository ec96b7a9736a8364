//! Recognizer lifecycle

use serde::{Deserialize, Serialize};

/// State of a gesture recognizer. Transitions are driven by the touch
/// source (the host's gesture framework or `PointerTracker`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    /// Waiting for touches that could start the gesture
    #[default]
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GestureState {
    /// `Began` or `Changed`
    pub fn is_active(self) -> bool {
        matches!(self, GestureState::Began | GestureState::Changed)
    }
}
