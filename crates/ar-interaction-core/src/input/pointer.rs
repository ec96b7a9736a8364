//! Raw pointer events to recognizer transitions
//!
//! Hosts without a platform gesture framework feed `PointerEvent`s here.
//! The tracker owns no gesture state of its own beyond the active touch
//! list; it drives the recognizers passed to `handle` and reports which
//! ones the coordinator should be told about.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{
    recognize_simultaneously, GestureKind, GestureState, RotationGesture, TapGesture,
    ThresholdGesture,
};
use crate::spatial::ScreenPoint;

/// Identifier the host assigns to a finger for the duration of a touch
pub type PointerId = u64;

/// Minimum angle change before a two-finger rotation begins
const ROTATION_SLOP: f32 = 0.02;

/// A raw touch event in view coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        id: PointerId,
        position: ScreenPoint,
    },
    Move {
        id: PointerId,
        position: ScreenPoint,
    },
    Up { id: PointerId },
    /// The platform took the touches away (incoming call, system gesture)
    Cancel,
}

/// A recognizer whose state changed and should be dispatched
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureUpdate {
    Pan,
    Rotate,
    Tap(TapGesture),
}

#[derive(Debug, Clone, Copy)]
struct TapCandidate {
    start: ScreenPoint,
    last: ScreenPoint,
}

/// Converts pointer events into pan, rotation and tap transitions
#[derive(Debug, Clone)]
pub struct PointerTracker {
    /// Active touches in landing order; index order for hit testing
    touches: Vec<(PointerId, ScreenPoint)>,
    tap_slop: f32,
    tap: Option<TapCandidate>,
}

impl PointerTracker {
    /// `tap_slop` is the movement in view points that turns a touch from a
    /// potential tap into a pan
    pub fn new(tap_slop: f32) -> Self {
        Self {
            touches: Vec::new(),
            tap_slop,
            tap: None,
        }
    }

    pub fn active_touches(&self) -> Vec<ScreenPoint> {
        self.touches.iter().map(|(_, position)| *position).collect()
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        pan: &mut ThresholdGesture,
        rotation: &mut RotationGesture,
    ) -> Vec<GestureUpdate> {
        let mut updates = Vec::new();

        match event {
            PointerEvent::Down { id, position } => {
                if self.touches.is_empty() {
                    pan.set_state(GestureState::Possible);
                    rotation.set_state(GestureState::Possible);
                    self.tap = Some(TapCandidate {
                        start: position,
                        last: position,
                    });
                } else {
                    self.tap = None;
                }
                self.touches.retain(|(touch, _)| *touch != id);
                self.touches.push((id, position));

                let points = self.active_touches();
                pan.touches_changed(&points);
                rotation.touches_changed(&points);
            }

            PointerEvent::Move { id, position } => {
                let Some(touch) = self.touches.iter_mut().find(|(touch, _)| *touch == id) else {
                    trace!("Ignoring move for unknown pointer {}", id);
                    return updates;
                };
                touch.1 = position;

                if let Some(tap) = self.tap.as_mut() {
                    tap.last = position;
                    if tap.start.distance(&position) > self.tap_slop {
                        self.tap = None;
                    }
                }

                let points = self.active_touches();
                self.move_pan(&points, pan, rotation, &mut updates);
                self.move_rotation(&points, pan, rotation, &mut updates);
            }

            PointerEvent::Up { id } => {
                let Some(index) = self.touches.iter().position(|(touch, _)| *touch == id) else {
                    return updates;
                };
                self.touches.remove(index);
                let points = self.active_touches();

                if points.is_empty() {
                    if pan.state().is_active() {
                        pan.set_state(GestureState::Ended);
                        updates.push(GestureUpdate::Pan);
                    } else {
                        pan.set_state(GestureState::Failed);
                    }
                    if rotation.state().is_active() {
                        rotation.set_state(GestureState::Ended);
                        updates.push(GestureUpdate::Rotate);
                    }
                    if let Some(tap) = self.tap.take() {
                        updates.push(GestureUpdate::Tap(TapGesture::new(tap.last)));
                    }
                } else {
                    pan.touches_changed(&points);
                    rotation.touches_changed(&points);
                    if points.len() < 2 && rotation.state().is_active() {
                        rotation.set_state(GestureState::Ended);
                        updates.push(GestureUpdate::Rotate);
                    }
                }
            }

            PointerEvent::Cancel => {
                self.touches.clear();
                self.tap = None;
                if pan.state().is_active() {
                    pan.set_state(GestureState::Cancelled);
                    updates.push(GestureUpdate::Pan);
                }
                if rotation.state().is_active() {
                    rotation.set_state(GestureState::Cancelled);
                    updates.push(GestureUpdate::Rotate);
                }
            }
        }

        updates
    }

    fn move_pan(
        &self,
        points: &[ScreenPoint],
        pan: &mut ThresholdGesture,
        rotation: &RotationGesture,
        updates: &mut Vec<GestureUpdate>,
    ) {
        match pan.state() {
            GestureState::Possible => {
                pan.touches_moved(points);
                let allowed = !rotation.state().is_active()
                    || recognize_simultaneously(GestureKind::Pan, GestureKind::Rotate);
                if allowed && pan.translation().length() > self.tap_slop {
                    pan.set_state(GestureState::Began);
                    // A fast first move may already be past the threshold
                    pan.check_threshold();
                    updates.push(GestureUpdate::Pan);
                }
            }
            GestureState::Began | GestureState::Changed => {
                pan.set_state(GestureState::Changed);
                pan.touches_moved(points);
                updates.push(GestureUpdate::Pan);
            }
            _ => {}
        }
    }

    fn move_rotation(
        &self,
        points: &[ScreenPoint],
        pan: &ThresholdGesture,
        rotation: &mut RotationGesture,
        updates: &mut Vec<GestureUpdate>,
    ) {
        if points.len() < 2 {
            return;
        }
        rotation.touches_moved(points);

        match rotation.state() {
            GestureState::Possible => {
                let allowed = !pan.state().is_active()
                    || recognize_simultaneously(GestureKind::Rotate, GestureKind::Pan);
                if allowed && rotation.rotation().abs() > ROTATION_SLOP {
                    rotation.set_state(GestureState::Began);
                    updates.push(GestureUpdate::Rotate);
                }
            }
            GestureState::Began | GestureState::Changed => {
                rotation.set_state(GestureState::Changed);
                updates.push(GestureUpdate::Rotate);
            }
            _ => {}
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::ScreenVector;

    struct Recognizers {
        tracker: PointerTracker,
        pan: ThresholdGesture,
        rotation: RotationGesture,
    }

    impl Recognizers {
        fn new() -> Self {
            Self {
                tracker: PointerTracker::default(),
                pan: ThresholdGesture::default(),
                rotation: RotationGesture::new(),
            }
        }

        fn send(&mut self, event: PointerEvent) -> Vec<GestureUpdate> {
            self.tracker.handle(event, &mut self.pan, &mut self.rotation)
        }
    }

    fn down(id: PointerId, x: f32, y: f32) -> PointerEvent {
        PointerEvent::Down {
            id,
            position: ScreenPoint::new(x, y),
        }
    }

    fn moved(id: PointerId, x: f32, y: f32) -> PointerEvent {
        PointerEvent::Move {
            id,
            position: ScreenPoint::new(x, y),
        }
    }

    #[test]
    fn test_short_touch_is_a_tap() {
        let mut r = Recognizers::new();
        assert!(r.send(down(1, 50.0, 50.0)).is_empty());
        assert!(r.send(moved(1, 53.0, 52.0)).is_empty());
        let updates = r.send(PointerEvent::Up { id: 1 });
        let tap = TapGesture::new(ScreenPoint::new(53.0, 52.0));
        assert_eq!(updates, vec![GestureUpdate::Tap(tap)]);
        assert_eq!(r.pan.state(), GestureState::Failed);
    }

    #[test]
    fn test_drag_begins_changes_and_ends() {
        let mut r = Recognizers::new();
        r.send(down(1, 0.0, 0.0));
        assert_eq!(r.send(moved(1, 15.0, 0.0)), vec![GestureUpdate::Pan]);
        assert_eq!(r.pan.state(), GestureState::Began);

        assert_eq!(r.send(moved(1, 40.0, 0.0)), vec![GestureUpdate::Pan]);
        assert_eq!(r.pan.state(), GestureState::Changed);
        assert!(r.pan.is_threshold_exceeded());

        assert_eq!(r.send(PointerEvent::Up { id: 1 }), vec![GestureUpdate::Pan]);
        assert_eq!(r.pan.state(), GestureState::Ended);
        assert!(!r.pan.is_threshold_exceeded());
    }

    #[test]
    fn test_fast_first_move_crosses_threshold_on_begin() {
        let mut r = Recognizers::new();
        r.send(down(1, 0.0, 0.0));

        assert_eq!(r.send(moved(1, 50.0, 0.0)), vec![GestureUpdate::Pan]);
        assert_eq!(r.pan.state(), GestureState::Began);
        assert!(r.pan.is_threshold_exceeded());
        assert_eq!(r.pan.translation(), ScreenVector::ZERO);

        // Motion past the threshold is kept
        assert_eq!(r.send(moved(1, 70.0, 0.0)), vec![GestureUpdate::Pan]);
        assert_eq!(r.pan.state(), GestureState::Changed);
        assert_eq!(r.pan.translation(), ScreenVector::new(20.0, 0.0));
    }

    #[test]
    fn test_second_finger_cancels_tap_and_rotates() {
        let mut r = Recognizers::new();
        r.send(down(1, 100.0, 100.0));
        r.send(down(2, 200.0, 100.0));
        assert_eq!(r.tracker.active_touches().len(), 2);

        let updates = r.send(moved(2, 100.0, 200.0));
        assert!(updates.contains(&GestureUpdate::Rotate));
        assert_eq!(r.rotation.state(), GestureState::Began);
        assert!(r.rotation.rotation() > 0.0);

        let updates = r.send(PointerEvent::Up { id: 2 });
        assert_eq!(updates, vec![GestureUpdate::Rotate]);
        assert_eq!(r.rotation.state(), GestureState::Ended);

        // No tap once two fingers were down
        let updates = r.send(PointerEvent::Up { id: 1 });
        assert!(!updates.iter().any(|u| matches!(u, GestureUpdate::Tap(_))));
    }

    #[test]
    fn test_cancel_tears_down_active_gestures() {
        let mut r = Recognizers::new();
        r.send(down(1, 0.0, 0.0));
        r.send(moved(1, 50.0, 0.0));
        assert_eq!(r.send(PointerEvent::Cancel), vec![GestureUpdate::Pan]);
        assert_eq!(r.pan.state(), GestureState::Cancelled);
        assert!(r.tracker.active_touches().is_empty());
    }

    #[test]
    fn test_unknown_pointer_is_ignored() {
        let mut r = Recognizers::new();
        assert!(r.send(moved(7, 10.0, 10.0)).is_empty());
        assert!(r.send(PointerEvent::Up { id: 7 }).is_empty());
    }
}
