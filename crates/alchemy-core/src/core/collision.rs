//! Bounding-sphere collision detection.
//!
//! Every test is a linear scan over the registry: O(N) per moved object
//! per frame. Scenes hold tens of objects, so no spatial index is kept.
//! For much larger scenes a uniform grid keyed by `floor(pos / cell)`
//! (cell = largest diameter) or a BVH over the spheres would bound the
//! candidate set; results must stay identical to the linear scan.

use std::collections::HashSet;

use crate::api::types::ObjectId;
use crate::components::object::DraggableObject;
use crate::core::registry::ObjectRegistry;

/// Strict overlap test: touching spheres do not collide, and an object
/// with a non-positive radius never collides with anything.
pub fn spheres_overlap(a: &DraggableObject, b: &DraggableObject) -> bool {
    if !a.is_collidable() || !b.is_collidable() {
        return false;
    }
    a.position.distance(b.position) < a.radius + b.radius
}

/// Ids of every object overlapping `moved`, in registry order.
/// Empty if `moved` is not in the registry.
pub fn detect(registry: &ObjectRegistry, moved: ObjectId) -> Vec<ObjectId> {
    let Some(subject) = registry.get(moved) else {
        return Vec::new();
    };
    registry
        .iter()
        .filter(|other| other.id != moved && spheres_overlap(subject, other))
        .map(|other| other.id)
        .collect()
}

/// The moved object followed by everything it overlaps, or `None` when
/// it overlaps nothing.
pub fn collision_set(registry: &ObjectRegistry, moved: ObjectId) -> Option<Vec<ObjectId>> {
    let hits = detect(registry, moved);
    if hits.is_empty() {
        return None;
    }
    let mut set = Vec::with_capacity(hits.len() + 1);
    set.push(moved);
    set.extend(hits);
    Some(set)
}

fn pair_key(a: ObjectId, b: ObjectId) -> (ObjectId, ObjectId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Remembers which pairs overlapped on previous frames so a collision is
/// reported once per contact instead of once per frame.
///
/// A pair re-arms as soon as its spheres separate.
#[derive(Debug, Default, Clone)]
pub struct ContactTracker {
    pairs: HashSet<(ObjectId, ObjectId)>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test `moved` against the registry and update the contact set.
    /// Returns the collision set only if at least one of its pairs is new.
    pub fn observe(&mut self, registry: &ObjectRegistry, moved: ObjectId) -> Option<Vec<ObjectId>> {
        let hits = detect(registry, moved);
        let current: HashSet<_> = hits.iter().map(|&h| pair_key(moved, h)).collect();

        let rising = current.iter().any(|pair| !self.pairs.contains(pair));

        self.pairs
            .retain(|&(a, b)| (a != moved && b != moved) || current.contains(&(a, b)));
        self.pairs.extend(current);

        if rising {
            let mut set = Vec::with_capacity(hits.len() + 1);
            set.push(moved);
            set.extend(hits);
            Some(set)
        } else {
            None
        }
    }

    /// Forget pairs whose objects are no longer in the registry.
    pub fn prune(&mut self, registry: &ObjectRegistry) {
        self.pairs
            .retain(|&(a, b)| registry.contains(a) && registry.contains(b));
    }

    /// Whether the pair is currently recorded as touching.
    pub fn in_contact(&self, a: ObjectId, b: ObjectId) -> bool {
        self.pairs.contains(&pair_key(a, b))
    }

    /// Number of recorded contacts.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::api::types::ElementInfo;

    fn sphere(id: u32, x: f32, radius: f32) -> DraggableObject {
        DraggableObject::new(ObjectId(id), ElementInfo::new("H", "#fff"))
            .with_position(Vec3::new(x, 0.0, 0.0))
            .with_radius(radius)
    }

    fn registry_of(objects: Vec<DraggableObject>) -> ObjectRegistry {
        let mut registry = ObjectRegistry::new();
        for o in objects {
            registry.insert(o);
        }
        registry
    }

    #[test]
    fn tangent_spheres_do_not_collide() {
        let a = sphere(1, 0.0, 1.0);
        let b = sphere(2, 2.0, 1.0);
        assert!(!spheres_overlap(&a, &b));
    }

    #[test]
    fn slightly_closer_than_tangent_collides() {
        let a = sphere(1, 0.0, 1.0);
        let b = sphere(2, 1.999, 1.0);
        assert!(spheres_overlap(&a, &b));
    }

    #[test]
    fn tangent_off_axis_spheres_do_not_collide() {
        let points = [
            (Vec3::new(7.290371, 1.2420695, 4.904938), Vec3::new(9.30143, 9.998634, 8.341512)),
            (Vec3::new(0.1, 0.2, 0.3), Vec3::new(-0.7, 1.3, 2.9)),
            (Vec3::new(-3.3, 4.4, -5.5), Vec3::new(1.25, -0.6, 0.01)),
        ];
        for (p, q) in points {
            // Halving is exact, so the radii sum to the distance bit-for-bit.
            let r = p.distance(q) / 2.0;
            let a = DraggableObject::new(ObjectId(1), ElementInfo::new("H", "#fff"))
                .with_position(p)
                .with_radius(r);
            let b = DraggableObject::new(ObjectId(2), ElementInfo::new("O", "#fff"))
                .with_position(q)
                .with_radius(r);
            assert_eq!(a.radius + b.radius, p.distance(q));
            assert!(!spheres_overlap(&a, &b), "{p} / {q} touch but must not collide");

            let closer = b.clone().with_position(q.lerp(p, 0.01));
            assert!(spheres_overlap(&a, &closer));
        }
    }

    #[test]
    fn zero_radius_never_collides() {
        let a = sphere(1, 0.0, 0.0);
        let b = sphere(2, 0.0, 1.0);
        assert!(!spheres_overlap(&a, &b));
        assert!(!spheres_overlap(&b, &a));
    }

    #[test]
    fn detect_excludes_self_and_far_objects() {
        let registry = registry_of(vec![
            sphere(1, 0.0, 1.0),
            sphere(2, 1.0, 1.0),
            sphere(3, 10.0, 1.0),
        ]);
        assert_eq!(detect(&registry, ObjectId(1)), vec![ObjectId(2)]);
    }

    #[test]
    fn detect_unknown_id_is_empty() {
        let registry = registry_of(vec![sphere(1, 0.0, 1.0)]);
        assert!(detect(&registry, ObjectId(42)).is_empty());
    }

    #[test]
    fn collision_set_leads_with_moved_object() {
        let registry = registry_of(vec![
            sphere(1, 0.0, 1.0),
            sphere(2, 0.5, 1.0),
            sphere(3, -0.5, 1.0),
        ]);
        let set = collision_set(&registry, ObjectId(1)).unwrap();
        assert_eq!(set[0], ObjectId(1));
        assert_eq!(set.len(), 3);
        assert!(collision_set(&registry_of(vec![sphere(1, 0.0, 1.0)]), ObjectId(1)).is_none());
    }

    #[test]
    fn tracker_fires_once_per_contact() {
        let registry = registry_of(vec![sphere(1, 0.0, 1.0), sphere(2, 1.0, 1.0)]);
        let mut tracker = ContactTracker::new();

        assert!(tracker.observe(&registry, ObjectId(1)).is_some());
        assert!(tracker.observe(&registry, ObjectId(1)).is_none());
        // Same contact seen from the other side is not new either.
        assert!(tracker.observe(&registry, ObjectId(2)).is_none());
        assert!(tracker.in_contact(ObjectId(2), ObjectId(1)));
    }

    #[test]
    fn tracker_rearms_after_separation() {
        let mut registry = registry_of(vec![sphere(1, 0.0, 1.0), sphere(2, 1.0, 1.0)]);
        let mut tracker = ContactTracker::new();
        assert!(tracker.observe(&registry, ObjectId(1)).is_some());

        registry.set_transform(ObjectId(1), Vec3::new(-5.0, 0.0, 0.0), 1.0);
        assert!(tracker.observe(&registry, ObjectId(1)).is_none());
        assert!(tracker.is_empty());

        registry.set_transform(ObjectId(1), Vec3::ZERO, 1.0);
        assert!(tracker.observe(&registry, ObjectId(1)).is_some());
    }

    #[test]
    fn tracker_reports_full_set_when_new_partner_joins() {
        let mut registry = registry_of(vec![
            sphere(1, 0.0, 1.0),
            sphere(2, 1.0, 1.0),
            sphere(3, 20.0, 1.0),
        ]);
        let mut tracker = ContactTracker::new();
        tracker.observe(&registry, ObjectId(1));

        registry.set_transform(ObjectId(3), Vec3::new(-1.0, 0.0, 0.0), 1.0);
        let set = tracker.observe(&registry, ObjectId(1)).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains(&ObjectId(2)));
        assert!(set.contains(&ObjectId(3)));
    }

    #[test]
    fn prune_drops_removed_objects() {
        let mut registry = registry_of(vec![sphere(1, 0.0, 1.0), sphere(2, 1.0, 1.0)]);
        let mut tracker = ContactTracker::new();
        tracker.observe(&registry, ObjectId(1));
        assert_eq!(tracker.len(), 1);

        registry.remove(ObjectId(2));
        tracker.prune(&registry);
        assert!(tracker.is_empty());
    }
}
