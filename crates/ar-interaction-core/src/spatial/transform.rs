//! Rigid transforms used for camera poses and object placement

use super::{Point3D, Quaternion, Vector3D};

/// Position + rotation + scale. Camera poses reported by the tracking
/// session use unit scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Point3D,
    pub rotation: Quaternion,
    pub scale: Vector3D,
}

impl Transform {
    /// Identity transform (origin, no rotation, unit scale)
    pub fn identity() -> Self {
        Self::from_position_rotation(Point3D::ORIGIN, Quaternion::IDENTITY)
    }

    pub fn from_position(position: Point3D) -> Self {
        Self::from_position_rotation(position, Quaternion::IDENTITY)
    }

    pub fn from_position_rotation(position: Point3D, rotation: Quaternion) -> Self {
        Self {
            position,
            rotation,
            scale: Vector3D::new(1.0, 1.0, 1.0),
        }
    }

    /// A pose at `eye` whose forward axis points at `target` with no roll
    pub fn looking_at(eye: Point3D, target: Point3D) -> Self {
        let direction = (target - eye).normalize();
        if direction.magnitude() < 0.0001 {
            return Self::from_position(eye);
        }
        let yaw = direction.x.atan2(direction.z);
        let pitch = (-direction.y).clamp(-1.0, 1.0).asin();
        Self::from_position_rotation(eye, Quaternion::from_yaw_pitch(yaw, pitch))
    }

    pub fn forward(&self) -> Vector3D {
        self.rotation.forward()
    }

    /// Local space to world space
    pub fn transform_point(&self, local: Point3D) -> Point3D {
        let scaled = Vector3D::new(
            local.x * self.scale.x,
            local.y * self.scale.y,
            local.z * self.scale.z,
        );
        self.position + self.rotation.rotate_vector(scaled)
    }

    /// Rotate a direction into world space (ignores position and scale)
    pub fn transform_direction(&self, direction: Vector3D) -> Vector3D {
        self.rotation.rotate_vector(direction)
    }

    /// World space to local space
    pub fn inverse_transform_point(&self, world: Point3D) -> Point3D {
        let unrotated = self.rotation.inverse().rotate_vector(world - self.position);
        Point3D::new(
            unrotated.x / self.scale.x,
            unrotated.y / self.scale.y,
            unrotated.z / self.scale.z,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looking_at() {
        let eye = Point3D::new(0.0, 1.0, -1.0);
        let t = Transform::looking_at(eye, Point3D::ORIGIN);
        let forward = t.forward();
        let expected = (Point3D::ORIGIN - eye).normalize();
        assert!((forward - expected).magnitude() < 0.0001);
    }

    #[test]
    fn test_round_trip_through_local_space() {
        let t = Transform::looking_at(Point3D::new(2.0, 1.5, -3.0), Point3D::new(0.0, 0.0, 1.0));
        let world = Point3D::new(0.3, -0.2, 0.9);
        let back = t.transform_point(t.inverse_transform_point(world));
        assert!(world.distance(&back) < 0.0001);
    }
}
