//! ar-interaction-core: touch-driven manipulation of objects in a
//! camera-tracked 3D scene
//!
//! This crate provides:
//! - A pan recognizer that suppresses jitter until a touch-count dependent
//!   threshold is crossed
//! - An interaction coordinator that selects, drags, rotates and places
//!   objects, resolving screen positions into the world once per frame
//! - Narrow traits for the rendering and tracking collaborators
//! - A single-writer session with a command queue for multi-threaded hosts
//! - A simulated scene for development without tracking hardware

pub mod config;
pub mod error;
pub mod input;
pub mod interaction;
pub mod scene;
pub mod session;
pub mod simulation;
pub mod spatial;

// Re-export commonly used types
pub use config::InteractionConfig;
pub use error::ConfigError;
pub use input::{
    GestureState, GestureUpdate, PointerEvent, PointerTracker, RotationGesture, TapGesture,
    ThresholdGesture, Thresholds,
};
pub use interaction::{InteractionCoordinator, TranslateOutcome};
pub use scene::{
    AnchorId, CameraTracking, InteractionHost, ObjectId, PlaneAnchor, SceneObject, SceneView,
    WorldHit,
};
pub use session::{FrameReport, InteractionSession, SessionCommand, SessionHandle};
pub use spatial::{Point3D, Quaternion, ScreenPoint, ScreenVector, Transform, Vector3D};
