//! Two-finger rotation recognizer

use std::f32::consts::PI;

use super::GestureState;
use crate::spatial::ScreenPoint;

/// Tracks the change in angle of the line through the first two touches.
///
/// `rotation` is incremental: consumers read it and reset it to zero with
/// `set_rotation(0.0)`. Positive values are clockwise on screen.
#[derive(Debug, Clone, Default)]
pub struct RotationGesture {
    state: GestureState,
    rotation: f32,
    last_angle: Option<f32>,
}

impl RotationGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn set_state(&mut self, state: GestureState) {
        self.state = state;
        if !state.is_active() {
            self.rotation = 0.0;
        }
    }

    /// Radians rotated since the last reset
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    /// Touch count changed; the reference angle restarts from the new pair
    pub fn touches_changed(&mut self, touches: &[ScreenPoint]) {
        self.last_angle = Self::angle(touches);
    }

    pub fn touches_moved(&mut self, touches: &[ScreenPoint]) {
        let Some(angle) = Self::angle(touches) else {
            self.last_angle = None;
            return;
        };
        if let Some(previous) = self.last_angle {
            self.rotation += wrap_angle(angle - previous);
        }
        self.last_angle = Some(angle);
    }

    fn angle(touches: &[ScreenPoint]) -> Option<f32> {
        match touches {
            [first, second, ..] => Some((second.y - first.y).atan2(second.x - first.x)),
            _ => None,
        }
    }
}

/// Map an angle difference into (-PI, PI]
fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = angle;
    while wrapped > PI {
        wrapped -= 2.0 * PI;
    }
    while wrapped <= -PI {
        wrapped += 2.0 * PI;
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_clockwise_rotation_is_positive() {
        let mut gesture = RotationGesture::new();
        gesture.touches_changed(&[ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 0.0)]);
        // Screen y grows downwards, so this is a clockwise quarter turn
        gesture.touches_moved(&[ScreenPoint::new(0.0, 0.0), ScreenPoint::new(0.0, 100.0)]);
        assert!((gesture.rotation() - FRAC_PI_2).abs() < 0.0001);

        gesture.set_rotation(0.0);
        gesture.touches_moved(&[ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 0.0)]);
        assert!((gesture.rotation() + FRAC_PI_2).abs() < 0.0001);
    }

    #[test]
    fn test_wraps_across_half_turn() {
        let mut gesture = RotationGesture::new();
        let pivot = ScreenPoint::ORIGIN;
        gesture.touches_changed(&[pivot, ScreenPoint::new(-100.0, 1.0)]);
        gesture.touches_moved(&[pivot, ScreenPoint::new(-100.0, -1.0)]);
        assert!(gesture.rotation().abs() < 0.05);
    }

    #[test]
    fn test_single_touch_does_not_rotate() {
        let mut gesture = RotationGesture::new();
        gesture.touches_changed(&[ScreenPoint::ORIGIN]);
        gesture.touches_moved(&[ScreenPoint::new(10.0, 10.0)]);
        assert_eq!(gesture.rotation(), 0.0);
    }

    #[test]
    fn test_reset_on_end() {
        let mut gesture = RotationGesture::new();
        gesture.set_state(GestureState::Began);
        gesture.set_rotation(1.0);
        gesture.set_state(GestureState::Ended);
        assert_eq!(gesture.rotation(), 0.0);
    }
}
