//! Per-frame bookkeeping: which objects moved, which collisions to try,
//! and what came out of the frame.

use crate::api::types::ObjectId;
use crate::core::collision::{collision_set, ContactTracker};
use crate::core::registry::ObjectRegistry;
use crate::systems::reaction::{ReactionOutcome, Synthesis};

/// Summary of one processed frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Objects spawned this frame.
    pub added: Vec<ObjectId>,
    /// Reactions that went through, in the order they were applied.
    pub reactions: Vec<Synthesis>,
    /// Collision sets that produced no reaction.
    pub rejected: usize,
}

impl FrameReport {
    pub fn record(&mut self, outcome: ReactionOutcome) {
        match outcome {
            ReactionOutcome::Synthesized(s) => self.reactions.push(s),
            ReactionOutcome::Rejected(_) => self.rejected += 1,
        }
    }
}

/// Ids moved during a frame, deduplicated, in first-moved order.
#[derive(Debug, Clone, Default)]
pub struct MovedSet {
    ids: Vec<ObjectId>,
}

impl MovedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, id: ObjectId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.ids.iter().copied()
    }
}

/// Collision set for one moved object, honoring the debounce setting.
/// Objects that no longer exist yield nothing.
pub fn next_collision(
    registry: &ObjectRegistry,
    contacts: &mut ContactTracker,
    moved: ObjectId,
    debounce: bool,
) -> Option<Vec<ObjectId>> {
    if !registry.contains(moved) {
        return None;
    }
    if debounce {
        contacts.observe(registry, moved)
    } else {
        collision_set(registry, moved)
    }
}
