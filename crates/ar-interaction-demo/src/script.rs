//! Touch scripts replayed against a simulated scene

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use ar_interaction_core::input::{GestureUpdate, PointerId};
use ar_interaction_core::simulation::{Projection, SimulatedObject, SimulatedScene};
use ar_interaction_core::{
    AnchorId, InteractionConfig, InteractionSession, ObjectId, PlaneAnchor, Point3D, PointerEvent,
    SceneObject, SceneView, ScreenPoint, Transform, TranslateOutcome,
};

/// Script used when no `--script` is given
pub const BUILTIN_SCRIPT: &str = include_str!("../scripts/tabletop.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub scene: SceneSetup,
    #[serde(default)]
    pub objects: Vec<ObjectSetup>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Camera and view the scene starts with
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneSetup {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub width: f32,
    pub height: f32,
    pub eye: [f32; 3],
    pub target: [f32; 3],
    /// Screen radius in points around an object's projected center that
    /// still picks it
    pub pick_radius: f32,
    /// Resolve drags that miss every plane into free space
    pub free_space_hits: bool,
}

impl Default for SceneSetup {
    fn default() -> Self {
        Self {
            fov: 60.0,
            width: 390.0,
            height: 844.0,
            eye: [0.0, 1.5, 0.0],
            target: [0.0, 0.0, -1.0],
            pick_radius: 30.0,
            free_space_hits: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectSetup {
    pub name: String,
    pub position: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Down { id: PointerId, x: f32, y: f32 },
    Move { id: PointerId, x: f32, y: f32 },
    Up { id: PointerId },
    Cancel,
    /// Render `count` frames
    Frame {
        #[serde(default = "one_frame")]
        count: u32,
    },
    /// Tracking reports a new or refined plane
    Plane {
        id: u64,
        center: [f32; 3],
        extent_x: f32,
        extent_z: f32,
    },
    /// The host drops an object, possibly mid-drag
    Remove { name: String },
    /// The device moved
    Camera { eye: [f32; 3], target: [f32; 3] },
    Tracking { available: bool },
}

fn one_frame() -> u32 {
    1
}

fn point(values: [f32; 3]) -> Point3D {
    Point3D::new(values[0], values[1], values[2])
}

impl Script {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid touch script")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("In {}", path.display()))
    }

    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_SCRIPT)
    }

    fn build_scene(&self) -> SimulatedScene {
        let setup = &self.scene;
        let mut scene = SimulatedScene::new(
            Projection::perspective(setup.fov, setup.width, setup.height),
            Transform::looking_at(point(setup.eye), point(setup.target)),
        )
        .with_pick_radius(setup.pick_radius);
        scene.set_free_space_hits(setup.free_space_hits);
        for object in &self.objects {
            let position = point(object.position);
            scene.add_object(SimulatedObject::new(object.name.clone(), position));
        }
        scene
    }
}

/// Totals reported once a script finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u32,
    /// Frames that moved the dragged object
    pub moved: u32,
    /// Frames with a drag in progress that left the object in place
    pub skipped: u32,
    /// Taps that placed the selected object
    pub placements: u32,
}

/// Replay `script` and return the final scene for inspection
pub fn run(script: &Script, config: &InteractionConfig) -> Result<(SimulatedScene, RunSummary)> {
    let mut scene = script.build_scene();
    let mut session = InteractionSession::new(config);
    let handle = session.handle();
    let mut summary = RunSummary::default();

    info!(
        "Replaying {} steps with {} objects",
        script.steps.len(),
        script.objects.len()
    );

    for (index, step) in script.steps.iter().enumerate() {
        debug!("Step {}: {:?}", index, step);
        match *step {
            Step::Down { id, x, y } => {
                let event = PointerEvent::Down {
                    id,
                    position: ScreenPoint::new(x, y),
                };
                pointer(&mut session, &mut scene, event, &mut summary);
            }
            Step::Move { id, x, y } => {
                let event = PointerEvent::Move {
                    id,
                    position: ScreenPoint::new(x, y),
                };
                pointer(&mut session, &mut scene, event, &mut summary);
            }
            Step::Up { id } => {
                let event = PointerEvent::Up { id };
                pointer(&mut session, &mut scene, event, &mut summary);
            }
            Step::Cancel => {
                let event = PointerEvent::Cancel;
                pointer(&mut session, &mut scene, event, &mut summary);
            }
            Step::Frame { count } => {
                for _ in 0..count {
                    let report = session.frame(&mut scene);
                    summary.frames += 1;
                    match report.translate {
                        Some(TranslateOutcome::Applied { .. }) => summary.moved += 1,
                        Some(outcome) => {
                            summary.skipped += 1;
                            debug!(
                                "Frame {} kept the object in place: {:?}",
                                summary.frames, outcome
                            );
                        }
                        None => {}
                    }
                }
            }
            Step::Plane {
                id,
                center,
                extent_x,
                extent_z,
            } => {
                let anchor = PlaneAnchor::new(AnchorId(id), point(center), extent_x, extent_z);
                let known = scene.planes().iter().any(|plane| plane.id == anchor.id);
                scene.upsert_plane(anchor);
                // Tracking callbacks arrive off the render thread
                let queued = if known {
                    handle.plane_anchor_updated(anchor)
                } else {
                    handle.plane_anchor_added(anchor)
                };
                if !queued {
                    warn!("Session closed, dropping plane {:?}", anchor.id);
                }
            }
            Step::Remove { ref name } => match find_object(&scene, name) {
                Some(id) => {
                    scene.remove_object(id);
                    info!("Removed {} ({})", name, id);
                }
                None => warn!("No object named {}", name),
            },
            Step::Camera { eye, target } => {
                scene.set_camera(Transform::looking_at(point(eye), point(target)));
            }
            Step::Tracking { available } => {
                if available {
                    info!("Tracking restored");
                } else {
                    warn!("Tracking lost");
                }
                scene.set_tracking_available(available);
            }
        }
    }

    log_objects(&scene);
    info!(
        "Finished: {} frames, {} moved, {} skipped, {} placements",
        summary.frames, summary.moved, summary.skipped, summary.placements
    );
    Ok((scene, summary))
}

fn pointer(
    session: &mut InteractionSession,
    scene: &mut SimulatedScene,
    event: PointerEvent,
    summary: &mut RunSummary,
) {
    let before = session.coordinator().selected_object();
    let position_before = position_of(scene, before);

    let updates = session.handle_pointer(event, scene);
    for update in &updates {
        debug!("Dispatched {:?}", update);
    }

    let selected = session.coordinator().selected_object();
    if selected != before {
        if let Some(id) = selected {
            info!("Selected {}", id);
        }
        return;
    }

    let tapped = updates
        .iter()
        .any(|update| matches!(update, GestureUpdate::Tap(_)));
    let position_after = position_of(scene, selected);
    if tapped && position_after != position_before {
        summary.placements += 1;
    }
}

fn find_object(scene: &SimulatedScene, name: &str) -> Option<ObjectId> {
    scene
        .loaded_objects()
        .into_iter()
        .find(|id| scene.get(*id).is_some_and(|o| o.name() == name))
}

fn position_of(scene: &SimulatedScene, id: Option<ObjectId>) -> Option<Point3D> {
    id.and_then(|id| scene.get(id)).map(|o| o.position())
}

fn log_objects(scene: &SimulatedScene) {
    for id in scene.loaded_objects() {
        if let Some(object) = scene.get(id) {
            let position = object.position();
            info!(
                "{} ({}) at ({:.2}, {:.2}, {:.2}), yaw {:.2} rad",
                object.name(),
                id,
                position.x,
                position.y,
                position.z,
                object.euler_y()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_script_parses() {
        let script = Script::builtin().unwrap();
        assert_eq!(script.objects.len(), 1);
        assert_eq!(script.scene.fov, 90.0);
        assert_eq!(
            script.steps.first(),
            Some(&Step::Plane {
                id: 1,
                center: [0.0, 0.0, 0.0],
                extent_x: 4.0,
                extent_z: 4.0,
            })
        );
        assert_eq!(script.steps.last(), Some(&Step::Frame { count: 2 }));
    }

    #[test]
    fn test_frame_count_defaults_to_one() {
        let script = Script::parse("[[steps]]\naction = \"frame\"\n").unwrap();
        assert_eq!(script.steps, vec![Step::Frame { count: 1 }]);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let error = Script::parse("[[steps]]\naction = \"shake\"\n").unwrap_err();
        assert!(format!("{:#}", error).contains("Invalid touch script"));
    }

    #[test]
    fn test_builtin_script_drags_places_and_rotates() {
        let script = Script::builtin().unwrap();
        let (scene, summary) = run(&script, &InteractionConfig::default()).unwrap();

        let cup = scene.loaded_objects()[0];
        let cup = scene.get(cup).unwrap();
        let position = cup.position();

        // Placed at x = -1, then dragged half a meter right after tracking returned
        assert!((position.x + 0.5).abs() < 0.01, "{:?}", position);
        assert!(position.y.abs() < 0.01, "{:?}", position);
        assert!((position.z.abs() - 1.0).abs() < 0.01, "{:?}", position);
        // A quarter turn clockwise on screen
        assert!(cup.euler_y() < -0.7, "{}", cup.euler_y());

        assert_eq!(summary.frames, 10);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.placements, 1);
    }

    #[test]
    fn test_drag_without_plane_uses_free_space() {
        let script = Script::parse(
            r#"
            [scene]
            fov = 90.0
            width = 400.0
            height = 400.0
            eye = [0.0, 2.0, 0.0]
            target = [0.0, 0.0, 0.0]

            [[objects]]
            name = "balloon"
            position = [0.0, 1.0, 0.0]

            [[steps]]
            action = "down"
            id = 1
            x = 200.0
            y = 200.0

            [[steps]]
            action = "move"
            id = 1
            x = 215.0
            y = 200.0

            [[steps]]
            action = "move"
            id = 1
            x = 250.0
            y = 200.0

            [[steps]]
            action = "frame"
            count = 3
            "#,
        )
        .unwrap();
        let (scene, summary) = run(&script, &InteractionConfig::default()).unwrap();

        assert_eq!(summary.moved, 3);
        let balloon = scene.get(scene.loaded_objects()[0]).unwrap();
        // Stays one meter from the camera
        let camera = scene.camera().position;
        assert!((balloon.position().distance(&camera) - 1.0).abs() < 0.01);
    }

    fn balloon_drag(scene_options: &str) -> Script {
        let content = format!(
            r#"
            [scene]
            fov = 90.0
            width = 400.0
            height = 400.0
            eye = [0.0, 2.0, 0.0]
            target = [0.0, 0.0, 0.0]
            {}

            [[objects]]
            name = "balloon"
            position = [0.0, 1.0, 0.0]

            [[steps]]
            action = "down"
            id = 1
            x = 200.0
            y = 200.0

            [[steps]]
            action = "move"
            id = 1
            x = 215.0
            y = 200.0

            [[steps]]
            action = "move"
            id = 1
            x = 250.0
            y = 200.0

            [[steps]]
            action = "frame"
            count = 3
            "#,
            scene_options
        );
        Script::parse(&content).unwrap()
    }

    #[test]
    fn test_scene_options_reach_the_simulation() {
        let config = InteractionConfig::default();
        let script = balloon_drag("free_space_hits = false");
        let (_, summary) = run(&script, &config).unwrap();
        assert_eq!(summary.moved, 0);
        assert_eq!(summary.skipped, 3);

        // The drag starts 15 points from the balloon, outside a 10 point pick radius
        let script = balloon_drag("pick_radius = 10.0");
        let (_, summary) = run(&script, &config).unwrap();
        assert_eq!(summary.moved, 0);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_refined_plane_and_removed_object() {
        let script = Script::parse(
            r#"
            [scene]
            fov = 90.0
            width = 400.0
            height = 400.0
            eye = [0.0, 2.0, 0.0]
            target = [0.0, 0.0, 0.0]

            [[objects]]
            name = "cup"
            position = [0.0, 0.0, 0.0]

            [[objects]]
            name = "plate"
            position = [1.0, 0.0, 0.0]

            [[steps]]
            action = "plane"
            id = 1
            center = [0.0, 0.0, 0.0]
            extent_x = 4.0
            extent_z = 4.0

            [[steps]]
            action = "plane"
            id = 1
            center = [0.0, 0.03, 0.0]
            extent_x = 4.0
            extent_z = 4.0

            [[steps]]
            action = "frame"

            [[steps]]
            action = "down"
            id = 1
            x = 200.0
            y = 200.0

            [[steps]]
            action = "move"
            id = 1
            x = 215.0
            y = 200.0

            [[steps]]
            action = "move"
            id = 1
            x = 250.0
            y = 200.0

            [[steps]]
            action = "remove"
            name = "cup"

            [[steps]]
            action = "frame"
            "#,
        )
        .unwrap();
        let (scene, summary) = run(&script, &InteractionConfig::default()).unwrap();

        // The dragged cup vanished before the frame could move it
        assert_eq!(summary.skipped, 1);
        assert!(find_object(&scene, "cup").is_none());

        let plate = scene.get(find_object(&scene, "plate").unwrap()).unwrap();
        assert!((plate.position().y - 0.03).abs() < 0.0001);
        assert_eq!(scene.planes().len(), 1);
    }
}
