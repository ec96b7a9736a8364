//! Capabilities consumed from the rendering and tracking collaborators
//!
//! The coordinator never owns scene objects. It refers to them through
//! `ObjectId` handles and asks the host to query or mutate them.

use std::fmt;

use crate::spatial::{Point3D, ScreenPoint, Transform};

/// Non-owning handle to an object held by the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Identifier of a detected plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

/// A horizontal plane hypothesis reported by the tracking session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneAnchor {
    pub id: AnchorId,
    /// Center of the detected extent; `center.y` is the plane height
    pub center: Point3D,
    /// Full size of the detected extent along X
    pub extent_x: f32,
    /// Full size of the detected extent along Z
    pub extent_z: f32,
}

impl PlaneAnchor {
    pub fn new(id: AnchorId, center: Point3D, extent_x: f32, extent_z: f32) -> Self {
        Self {
            id,
            center,
            extent_x,
            extent_z,
        }
    }

    pub fn height(&self) -> f32 {
        self.center.y
    }

    /// Whether `point` lies over the detected extent, grown by `tolerance`
    /// on every side. Height is ignored.
    pub fn covers(&self, point: Point3D, tolerance: f32) -> bool {
        (point.x - self.center.x).abs() <= self.extent_x / 2.0 + tolerance
            && (point.z - self.center.z).abs() <= self.extent_z / 2.0 + tolerance
    }
}

/// Result of resolving a screen point into the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldHit {
    pub position: Point3D,
    /// Plane that produced the hit, if any
    pub anchor: Option<AnchorId>,
    /// True when the hit came from plane geometry rather than free space
    pub is_on_plane: bool,
}

/// An object placed in the scene
pub trait SceneObject {
    /// Current world position
    fn position(&self) -> Point3D;

    /// Rotation about the object's local vertical axis, in radians
    fn euler_y(&self) -> f32;

    fn set_euler_y(&mut self, radians: f32);

    /// Move to `position`, expressed in world space but applied relative to
    /// the camera pose. With `smoothed`, the object may damp the motion
    /// instead of jumping.
    fn set_position(&mut self, position: Point3D, relative_to: &Transform, smoothed: bool);

    /// A plane was detected or refined; objects may settle onto it
    fn adjust_onto_plane_anchor(&mut self, _anchor: &PlaneAnchor) {}
}

/// Scene queries provided by the rendering collaborator
pub trait SceneView {
    /// Topmost object under a screen point
    fn hit_test_object(&self, point: ScreenPoint) -> Option<ObjectId>;

    fn project_to_screen(&self, position: Point3D) -> ScreenPoint;

    /// Resolve a screen point to a world position. `object_position` helps
    /// disambiguate depth; with `infinite_plane`, detected horizontal
    /// planes are treated as unbounded.
    fn world_position(
        &self,
        screen_position: ScreenPoint,
        object_position: Point3D,
        infinite_plane: bool,
    ) -> Option<WorldHit>;

    fn object(&self, id: ObjectId) -> Option<&dyn SceneObject>;

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut dyn SceneObject>;

    /// Every object currently placed in the scene
    fn loaded_objects(&self) -> Vec<ObjectId>;
}

/// Camera pose from the tracking session
pub trait CameraTracking {
    /// `None` while tracking is unavailable
    fn current_camera_transform(&self) -> Option<Transform>;
}

/// Everything the coordinator needs from its host
pub trait InteractionHost: SceneView + CameraTracking {}

impl<T: SceneView + CameraTracking + ?Sized> InteractionHost for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_covers() {
        let plane = PlaneAnchor::new(AnchorId(1), Point3D::new(1.0, 0.0, 1.0), 2.0, 1.0);
        assert!(plane.covers(Point3D::new(1.9, 5.0, 1.4), 0.0));
        assert!(!plane.covers(Point3D::new(2.1, 0.0, 1.0), 0.0));
        assert!(plane.covers(Point3D::new(2.1, 0.0, 1.0), 0.2));
        assert_eq!(ObjectId(3).to_string(), "object#3");
    }
}
