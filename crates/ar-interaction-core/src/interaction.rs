//! Coordinates gestures with object selection, dragging and rotation
//!
//! Touch events only update a cached screen position for the dragged
//! object. The object itself is moved in `on_frame_tick`, once per rendered
//! frame, so a drag keeps tracking when the camera moves while the finger
//! stays still.
//!
//! All methods take `&mut self`; the coordinator expects a single writer.
//! Hosts that deliver touches and frames on different threads should go
//! through `InteractionSession`.

use tracing::{debug, trace};

use crate::config::InteractionConfig;
use crate::input::{
    recognize_simultaneously, GestureKind, GestureState, RotationGesture, TapGesture,
    ThresholdGesture,
};
use crate::scene::{InteractionHost, ObjectId, SceneView};
use crate::spatial::{ScreenPoint, ScreenRect, ScreenVector};

/// What happened when an object was asked to follow a screen position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateOutcome {
    /// The object was moved
    Applied { smoothed: bool },
    /// Tracking is unavailable; the object keeps its position
    NoCamera,
    /// The screen position did not resolve to a world position
    NoHit,
    /// The host no longer knows the object
    MissingObject,
}

/// How a resolved position is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    /// Continuous drag: damp free-space hits
    Drag,
    /// Discrete placement: always jump
    Place,
}

/// Bridges gesture recognizers to the objects they manipulate
#[derive(Debug, Clone)]
pub struct InteractionCoordinator {
    translate_assuming_infinite_plane: bool,
    /// The object most recently interacted with. Tapping empty space moves it.
    selected_object: Option<ObjectId>,
    /// The object under an active drag or rotation
    tracked_object: Option<ObjectId>,
    /// Screen position the tracked object should follow on the next frame
    current_tracking_position: Option<ScreenPoint>,
}

impl Default for InteractionCoordinator {
    fn default() -> Self {
        Self::new(&InteractionConfig::default())
    }
}

impl InteractionCoordinator {
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            translate_assuming_infinite_plane: config.translate_assuming_infinite_plane,
            selected_object: None,
            tracked_object: None,
            current_tracking_position: None,
        }
    }

    pub fn selected_object(&self) -> Option<ObjectId> {
        self.selected_object
    }

    pub fn tracked_object(&self) -> Option<ObjectId> {
        self.tracked_object
    }

    pub fn current_tracking_position(&self) -> Option<ScreenPoint> {
        self.current_tracking_position
    }

    /// Replace the selection. Does not affect tracking.
    pub fn set_selected_object(&mut self, object: Option<ObjectId>) {
        self.selected_object = object;
    }

    /// Start or stop tracking an object.
    ///
    /// Postconditions: with `Some(id)`, `selected_object() == Some(id)`.
    /// With `None`, the cached tracking position is cleared and the
    /// selection is left alone.
    pub fn set_tracked_object(&mut self, object: Option<ObjectId>) {
        self.tracked_object = object;
        match object {
            Some(id) => self.selected_object = Some(id),
            None => self.current_tracking_position = None,
        }
    }

    /// Pan and rotation may drive the same object at once
    pub fn should_recognize_simultaneously(&self, first: GestureKind, second: GestureKind) -> bool {
        recognize_simultaneously(first, second)
    }

    pub fn on_pan<H>(&mut self, gesture: &mut ThresholdGesture, host: &H)
    where
        H: InteractionHost + ?Sized,
    {
        match gesture.state() {
            GestureState::Began => {
                if let Some(object) = object_interacting(gesture.touches(), host) {
                    debug!("Drag began on {}", object);
                    self.set_tracked_object(Some(object));
                }
            }

            GestureState::Changed if gesture.is_threshold_exceeded() => {
                let Some(object) = self.tracked_object else {
                    return;
                };
                let translation = gesture.translation();

                let current_position = match self.current_tracking_position {
                    Some(position) => position,
                    None => match host.object(object) {
                        Some(scene_object) => host.project_to_screen(scene_object.position()),
                        None => {
                            trace!("{} is gone, ignoring drag sample", object);
                            return;
                        }
                    },
                };

                self.current_tracking_position = Some(current_position + translation);
                gesture.set_translation(ScreenVector::ZERO);
            }

            // Below the threshold: motion is ignored
            GestureState::Changed => {}

            GestureState::Possible
            | GestureState::Ended
            | GestureState::Cancelled
            | GestureState::Failed => {
                if let Some(object) = self.tracked_object {
                    debug!("Drag on {} finished ({:?})", object, gesture.state());
                }
                self.set_tracked_object(None);
            }
        }
    }

    /// Move the tracked object towards the cached screen position. Call once
    /// per rendered frame. Returns `None` when no drag is in progress.
    pub fn on_frame_tick<H>(&mut self, host: &mut H) -> Option<TranslateOutcome>
    where
        H: InteractionHost + ?Sized,
    {
        let object = self.tracked_object?;
        let position = self.current_tracking_position?;
        Some(translate(
            host,
            object,
            position,
            self.translate_assuming_infinite_plane,
            Motion::Drag,
        ))
    }

    /// Rotate the tracked object about its vertical axis.
    ///
    /// The angle is subtracted, which matches the on-screen direction when
    /// the object is viewed from above. Viewed from below the rotation is
    /// inverted; that case is not handled.
    pub fn on_rotate<H>(&mut self, gesture: &mut RotationGesture, host: &mut H)
    where
        H: InteractionHost + ?Sized,
    {
        if gesture.state() != GestureState::Changed {
            return;
        }

        if let Some(id) = self.tracked_object {
            if let Some(object) = host.object_mut(id) {
                let yaw = object.euler_y() - gesture.rotation();
                object.set_euler_y(yaw);
            }
        }

        gesture.set_rotation(0.0);
    }

    /// Select the object under the tap, or teleport the selected object to
    /// the tapped location when nothing is hit.
    pub fn on_tap<H>(&mut self, gesture: &TapGesture, host: &mut H) -> Option<TranslateOutcome>
    where
        H: InteractionHost + ?Sized,
    {
        let location = gesture.location();

        if let Some(tapped) = host.hit_test_object(location) {
            debug!("Selected {}", tapped);
            self.set_selected_object(Some(tapped));
            None
        } else if let Some(object) = self.selected_object {
            let outcome = translate(host, object, location, false, Motion::Place);
            debug!(
                "Teleporting {} to ({:.1}, {:.1}): {:?}",
                object, location.x, location.y, outcome
            );
            Some(outcome)
        } else {
            None
        }
    }
}

/// First object under any touch, in touch index order, falling back to the
/// center of the touches' bounding box.
pub fn object_interacting<S>(touches: &[ScreenPoint], scene: &S) -> Option<ObjectId>
where
    S: SceneView + ?Sized,
{
    touches
        .iter()
        .find_map(|touch| scene.hit_test_object(*touch))
        .or_else(|| {
            let center = ScreenRect::from_points(touches)?.center();
            scene.hit_test_object(center)
        })
}

fn translate<H>(
    host: &mut H,
    object: ObjectId,
    screen_position: ScreenPoint,
    infinite_plane: bool,
    motion: Motion,
) -> TranslateOutcome
where
    H: InteractionHost + ?Sized,
{
    let Some(camera_transform) = host.current_camera_transform() else {
        trace!("No camera transform, skipping move of {}", object);
        return TranslateOutcome::NoCamera;
    };
    let Some(object_position) = host.object(object).map(|o| o.position()) else {
        return TranslateOutcome::MissingObject;
    };
    let Some(hit) = host.world_position(screen_position, object_position, infinite_plane) else {
        trace!(
            "No world position under ({:.1}, {:.1})",
            screen_position.x,
            screen_position.y
        );
        return TranslateOutcome::NoHit;
    };

    // Plane hits are stable; free-space hits jitter and get damped
    let smoothed = match motion {
        Motion::Drag => !hit.is_on_plane,
        Motion::Place => false,
    };

    match host.object_mut(object) {
        Some(scene_object) => {
            scene_object.set_position(hit.position, &camera_transform, smoothed);
            TranslateOutcome::Applied { smoothed }
        }
        None => TranslateOutcome::MissingObject,
    }
}
