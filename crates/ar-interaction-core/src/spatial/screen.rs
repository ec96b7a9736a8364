//! 2D view-space points, deltas and bounds

use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// A location in view coordinates (points, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Distance to another point in view points
    pub fn distance(&self, other: &ScreenPoint) -> f32 {
        (*self - *other).length()
    }
}

/// A displacement in view coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenVector {
    pub dx: f32,
    pub dy: f32,
}

impl ScreenVector {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Euclidean length of the displacement
    pub fn length(&self) -> f32 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }
}

impl Add<ScreenVector> for ScreenPoint {
    type Output = ScreenPoint;

    fn add(self, rhs: ScreenVector) -> Self::Output {
        ScreenPoint::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub for ScreenPoint {
    type Output = ScreenVector;

    fn sub(self, rhs: Self) -> Self::Output {
        ScreenVector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for ScreenVector {
    type Output = ScreenVector;

    fn add(self, rhs: Self) -> Self::Output {
        ScreenVector::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for ScreenVector {
    fn add_assign(&mut self, rhs: Self) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

/// Axis-aligned bounds in view coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// A zero-size rect located at `point`
    pub fn at(point: ScreenPoint) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Smallest rect containing every point, `None` for an empty slice
    pub fn from_points(points: &[ScreenPoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(
            rest.iter()
                .fold(Self::at(*first), |bounds, point| bounds.union_point(*point)),
        )
    }

    /// Grow the rect to include `point`
    pub fn union_point(self, point: ScreenPoint) -> Self {
        Self {
            min: ScreenPoint::new(self.min.x.min(point.x), self.min.y.min(point.y)),
            max: ScreenPoint::new(self.max.x.max(point.x), self.max.y.max(point.y)),
        }
    }

    /// Midpoint of the bounds
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_length() {
        let v = ScreenVector::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_point_offset() {
        let p = ScreenPoint::new(10.0, 20.0) + ScreenVector::new(5.0, -5.0);
        assert_eq!(p, ScreenPoint::new(15.0, 15.0));
        let offset = p - ScreenPoint::new(15.0, 10.0);
        assert_eq!(offset, ScreenVector::new(0.0, 5.0));
    }

    #[test]
    fn test_bounds_center_is_not_the_mean() {
        // Three points clustered on the left should not pull the center
        let points = [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(0.0, 10.0),
            ScreenPoint::new(100.0, 0.0),
        ];
        let bounds = ScreenRect::from_points(&points).unwrap();
        assert_eq!(bounds.center(), ScreenPoint::new(50.0, 5.0));
    }

    #[test]
    fn test_empty_bounds() {
        assert!(ScreenRect::from_points(&[]).is_none());
    }
}
