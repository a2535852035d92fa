pub mod api;
pub mod core;
pub mod components;
pub mod rules;
pub mod systems;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::SceneConfig;
pub use api::controller::SceneController;
pub use api::types::{ElementInfo, Mode, ObjectId, ReactionEffect, SceneEvent, UnknownMode};
pub use components::object::DraggableObject;
pub use core::collision::{collision_set, detect, spheres_overlap, ContactTracker};
pub use core::registry::ObjectRegistry;
pub use input::queue::{CommandQueue, SceneCommand};
pub use rules::{canonical_key, resolve, resolve_symbol, Rule, RuleBook, RuleError, RuleTable};
pub use systems::frame::FrameReport;
pub use systems::reaction::{apply_collision, centroid, ReactionOutcome, Rejection, Synthesis};

pub use glam::Vec3;
