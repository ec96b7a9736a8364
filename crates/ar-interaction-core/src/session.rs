//! Single-writer front end for the coordinator
//!
//! Touch input and tracking updates may arrive on threads other than the
//! one that renders frames. They are posted through a `SessionHandle` and
//! applied, in order, at the start of the next `frame`. The session is the
//! only code that mutates the coordinator's selection and tracking state.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::InteractionConfig;
use crate::input::{GestureUpdate, PointerEvent, PointerTracker, RotationGesture, ThresholdGesture};
use crate::interaction::{InteractionCoordinator, TranslateOutcome};
use crate::scene::{InteractionHost, PlaneAnchor};

/// Work queued for the session's owning thread
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Pointer(PointerEvent),
    PlaneAnchorAdded(PlaneAnchor),
    PlaneAnchorUpdated(PlaneAnchor),
}

/// Cloneable sender for posting commands from any thread
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    /// Queue a command; `false` once the session has been dropped
    pub fn send(&self, command: SessionCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn pointer(&self, event: PointerEvent) -> bool {
        self.send(SessionCommand::Pointer(event))
    }

    pub fn plane_anchor_added(&self, anchor: PlaneAnchor) -> bool {
        self.send(SessionCommand::PlaneAnchorAdded(anchor))
    }

    pub fn plane_anchor_updated(&self, anchor: PlaneAnchor) -> bool {
        self.send(SessionCommand::PlaneAnchorUpdated(anchor))
    }
}

/// What a call to `frame` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Commands drained from the queue
    pub commands: usize,
    /// Result of moving the tracked object, `None` when nothing is dragged
    pub translate: Option<TranslateOutcome>,
}

/// Owns the coordinator together with its recognizers
pub struct InteractionSession {
    coordinator: InteractionCoordinator,
    pan: ThresholdGesture,
    rotation: RotationGesture,
    pointers: PointerTracker,
    tx: mpsc::UnboundedSender<SessionCommand>,
    rx: mpsc::UnboundedReceiver<SessionCommand>,
}

impl InteractionSession {
    pub fn new(config: &InteractionConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            coordinator: InteractionCoordinator::new(config),
            pan: ThresholdGesture::new(config.thresholds),
            rotation: RotationGesture::new(),
            pointers: PointerTracker::new(config.tap_slop),
            tx,
            rx,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn coordinator(&self) -> &InteractionCoordinator {
        &self.coordinator
    }

    pub fn pan_gesture(&self) -> &ThresholdGesture {
        &self.pan
    }

    pub fn rotation_gesture(&self) -> &RotationGesture {
        &self.rotation
    }

    /// Feed a pointer event on the owning thread and dispatch every
    /// recognizer it updated
    pub fn handle_pointer<H>(&mut self, event: PointerEvent, host: &mut H) -> Vec<GestureUpdate>
    where
        H: InteractionHost + ?Sized,
    {
        let updates = self.pointers.handle(event, &mut self.pan, &mut self.rotation);
        for update in &updates {
            self.dispatch(*update, host);
        }
        updates
    }

    /// Forward one recognizer update to the coordinator
    pub fn dispatch<H>(&mut self, update: GestureUpdate, host: &mut H) -> Option<TranslateOutcome>
    where
        H: InteractionHost + ?Sized,
    {
        match update {
            GestureUpdate::Pan => {
                self.coordinator.on_pan(&mut self.pan, &*host);
                None
            }
            GestureUpdate::Rotate => {
                self.coordinator.on_rotate(&mut self.rotation, host);
                None
            }
            GestureUpdate::Tap(tap) => self.coordinator.on_tap(&tap, host),
        }
    }

    /// Per-frame entry point: apply queued commands, then move the tracked
    /// object
    pub fn frame<H>(&mut self, host: &mut H) -> FrameReport
    where
        H: InteractionHost + ?Sized,
    {
        let mut commands = 0;
        while let Ok(command) = self.rx.try_recv() {
            commands += 1;
            match command {
                SessionCommand::Pointer(event) => {
                    self.handle_pointer(event, host);
                }
                SessionCommand::PlaneAnchorAdded(anchor) => {
                    info!("Surface detected ({:?})", anchor.id);
                    adjust_objects_onto(&anchor, host);
                }
                SessionCommand::PlaneAnchorUpdated(anchor) => {
                    adjust_objects_onto(&anchor, host);
                }
            }
        }

        FrameReport {
            commands,
            translate: self.coordinator.on_frame_tick(host),
        }
    }
}

/// Let every loaded object settle onto a new or refined plane
pub fn adjust_objects_onto<H>(anchor: &PlaneAnchor, host: &mut H)
where
    H: InteractionHost + ?Sized,
{
    let objects = host.loaded_objects();
    debug!("Adjusting {} objects onto {:?}", objects.len(), anchor.id);
    for id in objects {
        if let Some(object) = host.object_mut(id) {
            object.adjust_onto_plane_anchor(anchor);
        }
    }
}
