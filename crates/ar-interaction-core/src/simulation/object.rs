//! Placeable objects for the simulated scene

use std::collections::VecDeque;

use tracing::trace;

use crate::scene::{PlaneAnchor, SceneObject};
use crate::spatial::{Point3D, Quaternion, Transform};

/// Number of recent camera-relative positions averaged while smoothing
const SMOOTHING_WINDOW: usize = 10;

/// Objects closer than this to a plane (meters) settle onto it
const PLANE_SNAP_DISTANCE: f32 = 0.05;

/// Slack around a plane's detected extent when deciding whether an object
/// rests on it
const PLANE_EXTENT_TOLERANCE: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct SimulatedObject {
    name: String,
    position: Point3D,
    yaw: f32,
    recent_positions: VecDeque<Point3D>,
}

impl SimulatedObject {
    pub fn new(name: impl Into<String>, position: Point3D) -> Self {
        Self {
            name: name.into(),
            position,
            yaw: 0.0,
            recent_positions: VecDeque::with_capacity(SMOOTHING_WINDOW),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// World transform of the object (unit scale)
    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.position, Quaternion::from_yaw(self.yaw))
    }
}

impl SceneObject for SimulatedObject {
    fn position(&self) -> Point3D {
        self.position
    }

    fn euler_y(&self) -> f32 {
        self.yaw
    }

    fn set_euler_y(&mut self, radians: f32) {
        self.yaw = radians;
    }

    fn set_position(&mut self, position: Point3D, relative_to: &Transform, smoothed: bool) {
        if !smoothed {
            self.recent_positions.clear();
            self.position = position;
            return;
        }

        let local = relative_to.inverse_transform_point(position);
        self.recent_positions.push_back(local);
        while self.recent_positions.len() > SMOOTHING_WINDOW {
            self.recent_positions.pop_front();
        }

        let average = Point3D::average(&self.recent_positions).unwrap_or(local);
        self.position = relative_to.transform_point(average);
    }

    fn adjust_onto_plane_anchor(&mut self, anchor: &PlaneAnchor) {
        let vertical_distance = (self.position.y - anchor.height()).abs();
        if vertical_distance <= PLANE_SNAP_DISTANCE
            && anchor.covers(self.position, PLANE_EXTENT_TOLERANCE)
        {
            trace!("{} settled onto plane {:?}", self.name, anchor.id);
            self.position.y = anchor.height();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::AnchorId;

    #[test]
    fn test_unsmoothed_jumps() {
        let mut object = SimulatedObject::new("cup", Point3D::ORIGIN);
        let target = Point3D::new(1.0, 0.0, 1.0);
        object.set_position(target, &Transform::identity(), false);
        assert_eq!(object.position(), target);
    }

    #[test]
    fn test_smoothed_averages_recent_positions() {
        let camera = Transform::from_position(Point3D::new(0.0, 1.0, 0.0));
        let mut object = SimulatedObject::new("cup", Point3D::ORIGIN);

        object.set_position(Point3D::new(0.0, 0.0, 1.0), &camera, true);
        object.set_position(Point3D::new(0.0, 0.0, 3.0), &camera, true);
        let middle = Point3D::new(0.0, 0.0, 2.0);
        assert!(object.position().distance(&middle) < 0.0001);

        // A jump clears the history
        object.set_position(Point3D::new(5.0, 0.0, 5.0), &camera, false);
        object.set_position(Point3D::new(5.0, 0.0, 7.0), &camera, true);
        let latest = Point3D::new(5.0, 0.0, 7.0);
        assert!(object.position().distance(&latest) < 0.0001);
    }

    #[test]
    fn test_settles_onto_nearby_plane() {
        let plane = PlaneAnchor::new(AnchorId(1), Point3D::new(0.0, -0.5, 0.0), 1.0, 1.0);

        let mut near = SimulatedObject::new("near", Point3D::new(0.2, -0.47, 0.2));
        near.adjust_onto_plane_anchor(&plane);
        assert_eq!(near.position().y, -0.5);

        let mut above = SimulatedObject::new("above", Point3D::new(0.2, 0.0, 0.2));
        above.adjust_onto_plane_anchor(&plane);
        assert_eq!(above.position().y, 0.0);

        let mut outside = SimulatedObject::new("outside", Point3D::new(2.0, -0.5, 0.0));
        outside.set_euler_y(1.0);
        outside.adjust_onto_plane_anchor(&plane);
        assert_eq!(outside.transform().position, Point3D::new(2.0, -0.5, 0.0));
        assert_eq!(outside.euler_y(), 1.0);
    }
}
