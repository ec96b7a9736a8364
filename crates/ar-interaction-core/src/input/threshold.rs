//! Pan recognizer gated on a translation threshold

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::GestureState;
use crate::spatial::{ScreenPoint, ScreenRect, ScreenVector};

/// Threshold in view points for single-finger drags
pub const SINGLE_TOUCH_THRESHOLD: f32 = 30.0;

/// Threshold in view points for drags with two or more fingers
pub const MULTI_TOUCH_THRESHOLD: f32 = 60.0;

/// Distances a pan must travel before it is treated as a drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub single_touch: f32,
    pub multi_touch: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            single_touch: SINGLE_TOUCH_THRESHOLD,
            multi_touch: MULTI_TOUCH_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Threshold to use for a gesture with `count` active touches
    pub fn for_touch_count(&self, count: usize) -> f32 {
        match count {
            1 => self.single_touch,
            _ => self.multi_touch,
        }
    }
}

/// A pan gesture that tracks when its translation first exceeds the
/// threshold for the current number of touches.
///
/// Once exceeded, the flag stays set until the state leaves
/// `Began`/`Changed`. The motion that crossed the threshold is discarded:
/// the running translation restarts from zero at that moment.
#[derive(Debug, Clone, Default)]
pub struct ThresholdGesture {
    state: GestureState,
    thresholds: Thresholds,
    threshold_exceeded: bool,
    translation: ScreenVector,
    touches: Vec<ScreenPoint>,
    last_center: Option<ScreenPoint>,
}

impl ThresholdGesture {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Apply a state transition. Leaving `Began`/`Changed` resets the
    /// threshold check and the running translation.
    pub fn set_state(&mut self, state: GestureState) {
        self.state = state;
        if !state.is_active() {
            self.threshold_exceeded = false;
            self.translation = ScreenVector::ZERO;
        }
    }

    pub fn is_threshold_exceeded(&self) -> bool {
        self.threshold_exceeded
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Touches were added or lifted; `touches` is the full active set.
    /// The translation is re-based so the change in touch count does not
    /// register as motion.
    pub fn touches_changed(&mut self, touches: &[ScreenPoint]) {
        self.touches = touches.to_vec();
        self.last_center = bounds_center(touches);
    }

    /// Active touches moved; `touches` is the full active set in touch
    /// index order.
    pub fn touches_moved(&mut self, touches: &[ScreenPoint]) {
        let center = bounds_center(touches);
        if let (Some(previous), Some(current)) = (self.last_center, center) {
            if touches.len() == self.touches.len() {
                self.translation += current - previous;
            }
        }
        self.touches = touches.to_vec();
        self.last_center = center;

        self.check_threshold();
    }

    /// Flag the gesture once the running translation exceeds the threshold
    /// for the current touch count. Only checked while `Began`/`Changed`, so
    /// a recognizer that begins on an already large move must call this
    /// after the transition.
    pub fn check_threshold(&mut self) {
        if !self.state.is_active() || self.threshold_exceeded {
            return;
        }

        let translation_magnitude = self.translation.length();
        let threshold = self.thresholds.for_touch_count(self.touches.len());
        if translation_magnitude > threshold {
            trace!(
                "Pan threshold {} exceeded ({:.1} points, {} touches)",
                threshold,
                translation_magnitude,
                self.touches.len()
            );
            self.threshold_exceeded = true;
            // Only motion past the threshold is reported
            self.set_translation(ScreenVector::ZERO);
        }
    }

    /// Translation accumulated since the last `set_translation`
    pub fn translation(&self) -> ScreenVector {
        self.translation
    }

    /// Overwrite the running translation, typically with zero after it has
    /// been consumed
    pub fn set_translation(&mut self, translation: ScreenVector) {
        self.translation = translation;
    }

    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    pub fn touches(&self) -> &[ScreenPoint] {
        &self.touches
    }

    pub fn location_of_touch(&self, index: usize) -> Option<ScreenPoint> {
        self.touches.get(index).copied()
    }

    /// Center of the bounding box around all active touches
    pub fn center(&self) -> Option<ScreenPoint> {
        bounds_center(&self.touches)
    }
}

fn bounds_center(touches: &[ScreenPoint]) -> Option<ScreenPoint> {
    ScreenRect::from_points(touches).map(|b| b.center())
}
