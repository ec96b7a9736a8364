//! Discrete tap

use crate::spatial::ScreenPoint;

/// A recognized single-finger tap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapGesture {
    location: ScreenPoint,
}

impl TapGesture {
    pub fn new(location: ScreenPoint) -> Self {
        Self { location }
    }

    /// Where the finger was lifted
    pub fn location(&self) -> ScreenPoint {
        self.location
    }
}
