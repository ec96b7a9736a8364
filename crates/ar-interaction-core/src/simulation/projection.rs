//! Pinhole camera model for the simulated scene

use crate::spatial::{Point3D, ScreenPoint, Transform, Vector3D};

/// Perspective projection onto a viewport measured in view points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov: f32,
    /// Near clipping distance in meters
    pub near: f32,
    pub width: f32,
    pub height: f32,
}

impl Projection {
    pub fn perspective(fov_degrees: f32, width: f32, height: f32) -> Self {
        Self {
            fov: fov_degrees.to_radians(),
            near: 0.01,
            width,
            height,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Whether `point` is in front of the camera's near plane
    pub fn is_in_front(&self, point: Point3D, camera: &Transform) -> bool {
        camera.inverse_transform_point(point).z > self.near
    }

    /// Project a world point to view coordinates. Points behind the camera
    /// are clamped to the near plane rather than rejected.
    pub fn project(&self, point: Point3D, camera: &Transform) -> ScreenPoint {
        let local = camera.inverse_transform_point(point);
        let depth = local.z.max(self.near);

        let tan_half_fov = (self.fov / 2.0).tan();
        let x_ndc = local.x / (depth * tan_half_fov * self.aspect());
        let y_ndc = local.y / (depth * tan_half_fov);

        ScreenPoint::new(
            (x_ndc + 1.0) / 2.0 * self.width,
            (1.0 - y_ndc) / 2.0 * self.height,
        )
    }

    /// World-space ray (origin, unit direction) through a view point
    pub fn ray(&self, screen: ScreenPoint, camera: &Transform) -> (Point3D, Vector3D) {
        let x_ndc = screen.x / self.width * 2.0 - 1.0;
        let y_ndc = 1.0 - screen.y / self.height * 2.0;

        let tan_half_fov = (self.fov / 2.0).tan();
        let local = Vector3D::new(
            x_ndc * tan_half_fov * self.aspect(),
            y_ndc * tan_half_fov,
            1.0,
        );

        (camera.position, camera.transform_direction(local).normalize())
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::perspective(60.0, 390.0, 844.0)
    }
}
