//! Turns a detected collision into a registry mutation.
//!
//! A reaction is all-or-nothing: either every participant is removed and
//! exactly one product is inserted, or the registry is left untouched.

use glam::Vec3;

use crate::api::config::SceneConfig;
use crate::api::types::{ElementInfo, Mode, ObjectId, ReactionEffect};
use crate::components::object::DraggableObject;
use crate::core::registry::ObjectRegistry;
use crate::rules::resolver::{canonical_key, resolve};
use crate::rules::table::RuleBook;

/// Why a collision produced no reaction. None of these are surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Fewer than two distinct ids.
    TooFewParticipants,
    /// A participant was already consumed (e.g. by an earlier reaction this frame).
    MissingParticipant(ObjectId),
    /// The participants' symbols have no rule in the active mode.
    NoRule { key: String },
    /// The id allocated for the product is already taken.
    IdInUse(ObjectId),
}

/// A successful reaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub product: ObjectId,
    pub consumed: Vec<ObjectId>,
    pub symbol: String,
    pub effect: ReactionEffect,
    /// Mean of the consumed objects' positions.
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReactionOutcome {
    Synthesized(Synthesis),
    Rejected(Rejection),
}

impl ReactionOutcome {
    pub fn is_synthesized(&self) -> bool {
        matches!(self, Self::Synthesized(_))
    }

    pub fn synthesis(&self) -> Option<&Synthesis> {
        match self {
            Self::Synthesized(s) => Some(s),
            Self::Rejected(_) => None,
        }
    }
}

/// Drop repeated ids, keeping first occurrences in order.
fn distinct(ids: &[ObjectId]) -> Vec<ObjectId> {
    let mut out: Vec<ObjectId> = Vec::with_capacity(ids.len());
    for &id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// Arithmetic mean of positions. Zero for an empty slice.
pub fn centroid(positions: &[Vec3]) -> Vec3 {
    if positions.is_empty() {
        return Vec3::ZERO;
    }
    positions.iter().copied().sum::<Vec3>() / positions.len() as f32
}

/// Resolve the collision of `ids` under `mode` and, on a match, replace
/// the participants with one synthesized object at their centroid.
///
/// The full set must match a rule exactly; subsets are never tried.
/// `alloc_id` is called only once the rule has matched.
pub fn apply_collision(
    registry: &mut ObjectRegistry,
    book: &RuleBook,
    ids: &[ObjectId],
    mode: Mode,
    config: &SceneConfig,
    alloc_id: impl FnOnce() -> ObjectId,
) -> ReactionOutcome {
    let ids = distinct(ids);
    if ids.len() < 2 {
        return ReactionOutcome::Rejected(Rejection::TooFewParticipants);
    }

    let mut symbols = Vec::with_capacity(ids.len());
    let mut positions = Vec::with_capacity(ids.len());
    for &id in &ids {
        match registry.get(id) {
            Some(obj) => {
                symbols.push(obj.info.symbol.clone());
                positions.push(obj.position);
            }
            None => {
                log::debug!("reaction skipped: {} no longer exists", id);
                return ReactionOutcome::Rejected(Rejection::MissingParticipant(id));
            }
        }
    }

    let Some(rule) = resolve(book, &symbols, mode) else {
        return ReactionOutcome::Rejected(Rejection::NoRule {
            key: canonical_key(&symbols),
        });
    };

    let product = alloc_id();
    if registry.contains(product) {
        log::warn!("reaction skipped: allocated id {} already in use", product);
        return ReactionOutcome::Rejected(Rejection::IdInUse(product));
    }

    let position = centroid(&positions);
    for &id in &ids {
        registry.remove(id);
    }

    let info = ElementInfo {
        symbol: rule.product.clone(),
        color: rule.color.clone().unwrap_or_else(|| config.default_color.clone()),
        name: Some(rule.product.clone()),
    };
    registry.insert(
        DraggableObject::new(product, info)
            .with_position(position)
            .with_radius(config.default_radius),
    );

    log::debug!(
        "{} reaction {} -> {} ({}) at {:?}",
        mode,
        canonical_key(&symbols),
        rule.product,
        product,
        position
    );

    ReactionOutcome::Synthesized(Synthesis {
        product,
        consumed: ids,
        symbol: rule.product.clone(),
        effect: rule.effect,
        position,
    })
}
