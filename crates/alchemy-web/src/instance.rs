use bytemuck::{Pod, Zeroable};
use alchemy_core::DraggableObject;

/// Per-object data read by the TypeScript renderer straight out of WASM memory.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ObjectInstance {
    /// Object id (exact for ids below 2^24).
    pub id: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Bounding-sphere radius.
    pub radius: f32,
    /// `ReactionEffect` code of the reaction that produced this object, 0 otherwise.
    pub effect: f32,
    pub _pad: [f32; 2],
}

impl ObjectInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_object(object: &DraggableObject, effect: u32) -> Self {
        Self {
            id: object.id.0 as f32,
            x: object.position.x,
            y: object.position.y,
            z: object.position.z,
            radius: object.radius,
            effect: effect as f32,
            _pad: [0.0; 2],
        }
    }
}

/// Packed instances for every visible object, rebuilt each frame.
pub struct InstanceBuffer {
    instances: Vec<ObjectInstance>,
}

impl InstanceBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: ObjectInstance) {
        self.instances.push(instance);
    }

    pub fn as_slice(&self) -> &[ObjectInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for direct reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}
