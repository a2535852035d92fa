//! Where picker spawns land: a fixed distance along the camera's view ray.

use glam::Vec3;

/// World position `distance` units in front of a camera at `camera`
/// looking along `forward`. A degenerate `forward` falls back to -Z.
pub fn spawn_in_front(camera: Vec3, forward: Vec3, distance: f32) -> Vec3 {
    let dir = forward.try_normalize().unwrap_or(Vec3::NEG_Z);
    camera + dir * distance
}
