//! Unit quaternions for object and camera orientation

use std::ops::Mul;

use super::Vector3D;

/// A rotation in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle_radians` about `axis` (right-hand rule)
    pub fn from_axis_angle(axis: Vector3D, angle_radians: f32) -> Self {
        let half_angle = angle_radians / 2.0;
        let axis = axis.normalize() * half_angle.sin();
        Self::new(axis.x, axis.y, axis.z, half_angle.cos())
    }

    /// Rotation about the vertical axis only
    pub fn from_yaw(yaw_radians: f32) -> Self {
        Self::from_axis_angle(Vector3D::UP, yaw_radians)
    }

    /// Yaw-then-pitch orientation: pitch tilts forward (+Z) towards -Y,
    /// yaw then turns the result about +Y.
    pub fn from_yaw_pitch(yaw_radians: f32, pitch_radians: f32) -> Self {
        Self::from_yaw(yaw_radians) * Self::from_axis_angle(Vector3D::RIGHT, pitch_radians)
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    pub fn inverse(&self) -> Self {
        let mag_sq = self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w;
        if mag_sq > 0.0 {
            let inv_mag_sq = 1.0 / mag_sq;
            Self::new(
                -self.x * inv_mag_sq,
                -self.y * inv_mag_sq,
                -self.z * inv_mag_sq,
                self.w * inv_mag_sq,
            )
        } else {
            Self::IDENTITY
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate_vector(&self, v: Vector3D) -> Vector3D {
        let q_vec = Vector3D::new(self.x, self.y, self.z);
        let uv = q_vec.cross(&v);
        let uuv = q_vec.cross(&uv);
        v + (uv * self.w + uuv) * 2.0
    }

    /// Direction this rotation points the +Z axis
    pub fn forward(&self) -> Vector3D {
        self.rotate_vector(Vector3D::FORWARD)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    /// Hamilton product; `(a * b)` applies `b` first, then `a`
    fn mul(self, rhs: Self) -> Self::Output {
        Quaternion::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn assert_close(a: Vector3D, b: Vector3D) {
        assert!((a - b).magnitude() < 0.0001, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_yaw_turns_forward_to_right() {
        let rotated = Quaternion::from_yaw(PI / 2.0).rotate_vector(Vector3D::FORWARD);
        assert_close(rotated, Vector3D::RIGHT);
    }

    #[test]
    fn test_pitch_looks_down() {
        let forward = Quaternion::from_yaw_pitch(0.0, PI / 2.0).forward();
        assert_close(forward, Vector3D::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_inverse() {
        let q = Quaternion::from_axis_angle(Vector3D::UP, PI / 4.0);
        let result = q * q.inverse();
        assert!((result.w - 1.0).abs() < 0.0001);
        assert!(result.y.abs() < 0.0001);
        assert!((q.magnitude() - 1.0).abs() < 0.0001);
    }
}
