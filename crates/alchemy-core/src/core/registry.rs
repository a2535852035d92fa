use glam::Vec3;
use crate::api::types::ObjectId;
use crate::components::object::DraggableObject;

/// Authoritative store of every live draggable object, backed by a flat Vec.
/// Designed for interactive scenes with tens of objects, not thousands.
///
/// Structural changes are crate-private: outside code goes through the
/// scene controller. `revision()` advances on every mutation.
#[derive(Debug, Clone)]
pub struct ObjectRegistry {
    objects: Vec<DraggableObject>,
    revision: u64,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self {
            objects: Vec::with_capacity(64),
            revision: 0,
        }
    }

    /// Create a registry with a specific object capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
            revision: 0,
        }
    }

    /// Add an object. Returns false (and leaves the registry untouched)
    /// if an object with the same id already exists.
    pub(crate) fn insert(&mut self, object: DraggableObject) -> bool {
        if self.contains(object.id) {
            return false;
        }
        self.objects.push(object);
        self.revision += 1;
        true
    }

    /// Remove an object by ID. Returns the removed object if found.
    pub(crate) fn remove(&mut self, id: ObjectId) -> Option<DraggableObject> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        self.revision += 1;
        Some(self.objects.swap_remove(idx))
    }

    /// Overwrite the transform of an existing object.
    pub(crate) fn set_transform(&mut self, id: ObjectId, position: Vec3, radius: f32) -> bool {
        match self.objects.iter_mut().find(|o| o.id == id) {
            Some(obj) => {
                obj.position = position;
                obj.radius = radius;
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Get a reference to an object by ID.
    pub fn get(&self, id: ObjectId) -> Option<&DraggableObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over all objects. Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &DraggableObject> {
        self.objects.iter()
    }

    /// Number of objects in the registry.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Monotonic mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Remove all objects.
    pub(crate) fn clear(&mut self) {
        if !self.objects.is_empty() {
            self.objects.clear();
            self.revision += 1;
        }
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}
