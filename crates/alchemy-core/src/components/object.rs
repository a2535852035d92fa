use glam::Vec3;
use crate::api::types::{ElementInfo, ObjectId};

/// A draggable object: identity plus the bounding sphere used for collisions.
/// Owned by the registry; the renderer only reports transforms for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggableObject {
    /// Unique identifier, stable for the object's lifetime.
    pub id: ObjectId,
    /// Immutable chemical/visual identity.
    pub info: ElementInfo,
    /// Center of the bounding sphere in world space.
    pub position: Vec3,
    /// Bounding-sphere radius. Non-positive means "not yet measured".
    pub radius: f32,
}

impl DraggableObject {
    /// Create a new object at the origin with a unit radius.
    pub fn new(id: ObjectId, info: ElementInfo) -> Self {
        Self {
            id,
            info,
            position: Vec3::ZERO,
            radius: 1.0,
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.info.symbol
    }

    /// Whether this object can take part in collision tests.
    pub fn is_collidable(&self) -> bool {
        self.radius > 0.0 && self.radius.is_finite()
    }
}
