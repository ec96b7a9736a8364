//! In-memory tracked scene for development and tests
//!
//! Stands in for the rendering and tracking collaborators: a pinhole
//! camera whose tracking can be switched off, horizontal planes with a
//! finite detected extent, and spherical objects picked within a screen
//! radius of their projected center.

mod object;
mod projection;

use std::collections::BTreeMap;

use tracing::debug;

use crate::scene::{CameraTracking, ObjectId, PlaneAnchor, SceneObject, SceneView, WorldHit};
use crate::spatial::{Point3D, ScreenPoint, Transform};

pub use object::SimulatedObject;
pub use projection::Projection;

/// Default pick radius around an object's projected center, in view points
const DEFAULT_PICK_RADIUS: f32 = 30.0;

#[derive(Debug, Clone)]
pub struct SimulatedScene {
    projection: Projection,
    camera: Transform,
    tracking_available: bool,
    planes: Vec<PlaneAnchor>,
    objects: BTreeMap<ObjectId, SimulatedObject>,
    next_object_id: u64,
    pick_radius: f32,
    /// Resolve misses against free space at the hinted depth
    free_space_hits: bool,
}

impl SimulatedScene {
    pub fn new(projection: Projection, camera: Transform) -> Self {
        Self {
            projection,
            camera,
            tracking_available: true,
            planes: Vec::new(),
            objects: BTreeMap::new(),
            next_object_id: 1,
            pick_radius: DEFAULT_PICK_RADIUS,
            free_space_hits: true,
        }
    }

    pub fn with_pick_radius(mut self, radius: f32) -> Self {
        self.pick_radius = radius;
        self
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn camera(&self) -> Transform {
        self.camera
    }

    /// Move the device. The pose is still used for projection while
    /// tracking is unavailable.
    pub fn set_camera(&mut self, camera: Transform) {
        self.camera = camera;
    }

    pub fn set_tracking_available(&mut self, available: bool) {
        if self.tracking_available != available {
            let change = if available { "restored" } else { "lost" };
            debug!("Simulated tracking {}", change);
        }
        self.tracking_available = available;
    }

    pub fn set_free_space_hits(&mut self, enabled: bool) {
        self.free_space_hits = enabled;
    }

    /// Add a plane, or replace the one with the same id
    pub fn upsert_plane(&mut self, anchor: PlaneAnchor) {
        match self.planes.iter_mut().find(|plane| plane.id == anchor.id) {
            Some(plane) => *plane = anchor,
            None => self.planes.push(anchor),
        }
    }

    pub fn planes(&self) -> &[PlaneAnchor] {
        &self.planes
    }

    pub fn add_object(&mut self, object: SimulatedObject) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        debug!("Loaded {} as {}", object.name(), id);
        self.objects.insert(id, object);
        id
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Option<SimulatedObject> {
        self.objects.remove(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SimulatedObject> {
        self.objects.get(&id)
    }

    /// In front of the camera and projected within the pick radius
    fn is_pickable_at(&self, position: Point3D, point: ScreenPoint) -> bool {
        if !self.projection.is_in_front(position, &self.camera) {
            return false;
        }
        let projected = self.projection.project(position, &self.camera);
        projected.distance(&point) <= self.pick_radius
    }

    fn plane_hit(&self, screen_position: ScreenPoint, infinite_plane: bool) -> Option<WorldHit> {
        let (origin, direction) = self.projection.ray(screen_position, &self.camera);
        if direction.y.abs() < f32::EPSILON {
            return None;
        }

        self.planes
            .iter()
            .filter_map(|plane| {
                let distance = (plane.height() - origin.y) / direction.y;
                if distance <= 0.0 {
                    return None;
                }
                let point = origin + direction * distance;
                if !infinite_plane && !plane.covers(point, 0.0) {
                    return None;
                }
                Some((distance, plane.id, point))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, anchor, position)| WorldHit {
                position,
                anchor: Some(anchor),
                is_on_plane: true,
            })
    }
}

impl SceneView for SimulatedScene {
    fn hit_test_object(&self, point: ScreenPoint) -> Option<ObjectId> {
        let camera = &self.camera;
        self.objects
            .iter()
            .filter(|(_, object)| self.is_pickable_at(object.position(), point))
            .min_by(|(_, a), (_, b)| {
                let da = a.position().distance(&camera.position);
                let db = b.position().distance(&camera.position);
                da.total_cmp(&db)
            })
            .map(|(id, _)| *id)
    }

    fn project_to_screen(&self, position: Point3D) -> ScreenPoint {
        self.projection.project(position, &self.camera)
    }

    fn world_position(
        &self,
        screen_position: ScreenPoint,
        object_position: Point3D,
        infinite_plane: bool,
    ) -> Option<WorldHit> {
        if let Some(hit) = self.plane_hit(screen_position, infinite_plane) {
            return Some(hit);
        }
        if !self.free_space_hits {
            return None;
        }

        // Keep the object at its current distance from the camera
        let (origin, direction) = self.projection.ray(screen_position, &self.camera);
        let distance = origin.distance(&object_position);
        if distance <= self.projection.near {
            return None;
        }
        Some(WorldHit {
            position: origin + direction * distance,
            anchor: None,
            is_on_plane: false,
        })
    }

    fn object(&self, id: ObjectId) -> Option<&dyn SceneObject> {
        self.objects
            .get(&id)
            .map(|object| object as &dyn SceneObject)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut dyn SceneObject> {
        self.objects
            .get_mut(&id)
            .map(|object| object as &mut dyn SceneObject)
    }

    fn loaded_objects(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }
}

impl CameraTracking for SimulatedScene {
    fn current_camera_transform(&self) -> Option<Transform> {
        self.tracking_available.then_some(self.camera)
    }
}
