use glam::Vec3;
use crate::api::types::{ElementInfo, Mode, ObjectId};

/// Requests collaborators make of the scene controller.
/// Only the controller mutates the registry; everything else enqueues.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    /// Spawn an element (from the picker) at a world position.
    AddItem { info: ElementInfo, position: Vec3 },
    /// The renderer moved or re-measured an object.
    UpdateTransform { id: ObjectId, position: Vec3, radius: f32 },
    /// The renderer detected an overlap on its own.
    Collide { ids: Vec<ObjectId> },
    SetMode(Mode),
    SetPickerOpen(bool),
    /// Remove every object.
    Clear,
}

/// Drags and renderer reports collected between two frames, in arrival order.
pub struct CommandQueue {
    commands: Vec<SceneCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: SceneCommand) {
        self.commands.push(command);
    }

    /// Hand the frame's commands to the controller, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
