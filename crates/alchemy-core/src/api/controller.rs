use glam::Vec3;

use crate::api::config::SceneConfig;
use crate::api::types::{ElementInfo, Mode, ObjectId, SceneEvent};
use crate::components::object::DraggableObject;
use crate::core::collision::ContactTracker;
use crate::core::registry::ObjectRegistry;
use crate::input::queue::SceneCommand;
use crate::rules::table::{RuleBook, RuleError};
use crate::systems::frame::{next_collision, FrameReport, MovedSet};
use crate::systems::reaction::{apply_collision, ReactionOutcome};

/// Composition root of the reaction core.
///
/// Owns the registry and the active mode, and is the only thing that
/// mutates either. The renderer reads through `objects()` / `visible_ids()`
/// and writes through `update_transform()` or queued `SceneCommand`s.
pub struct SceneController {
    config: SceneConfig,
    rules: RuleBook,
    registry: ObjectRegistry,
    /// Ids the renderer should mount, in spawn order. Always a subset of the registry.
    visible: Vec<ObjectId>,
    mode: Mode,
    picker_open: bool,
    contacts: ContactTracker,
    events: Vec<SceneEvent>,
    next_id: u32,
}

impl SceneController {
    pub fn new(config: SceneConfig, rules: RuleBook) -> Self {
        Self {
            registry: ObjectRegistry::with_capacity(config.max_objects.min(1024)),
            config,
            rules,
            visible: Vec::new(),
            mode: Mode::default(),
            picker_open: false,
            contacts: ContactTracker::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Controller with the embedded rule tables.
    pub fn with_builtin_rules(config: SceneConfig) -> Result<Self, RuleError> {
        Ok(Self::new(config, RuleBook::builtin()?))
    }

    // -- Structural operations --

    /// Spawn a new object at `position` with the default radius.
    /// Returns `None` once `max_objects` live objects exist.
    pub fn add_item(&mut self, info: ElementInfo, position: Vec3) -> Option<ObjectId> {
        if self.registry.len() >= self.config.max_objects {
            log::warn!(
                "add_item refused: scene already holds {} objects",
                self.registry.len()
            );
            return None;
        }
        let id = next_object_id(&mut self.next_id);
        let symbol = info.symbol.clone();
        let object = DraggableObject::new(id, info)
            .with_position(position)
            .with_radius(self.config.default_radius);
        if !self.registry.insert(object) {
            return None;
        }
        self.visible.push(id);
        log::debug!("added {} ({}) at {:?}", id, symbol, position);
        self.events.push(SceneEvent::Added { id, symbol });
        Some(id)
    }

    /// Record a new transform reported by the renderer for `id`.
    /// Returns false if the object no longer exists.
    pub fn update_transform(&mut self, id: ObjectId, position: Vec3, radius: f32) -> bool {
        self.registry.set_transform(id, position, radius)
    }

    /// Try to react the given objects under the current mode.
    /// Unknown ids or unmatched symbols leave the scene untouched.
    pub fn on_collide(&mut self, ids: &[ObjectId]) -> ReactionOutcome {
        let next_id = &mut self.next_id;
        let outcome = apply_collision(
            &mut self.registry,
            &self.rules,
            ids,
            self.mode,
            &self.config,
            || next_object_id(next_id),
        );

        if let ReactionOutcome::Synthesized(s) = &outcome {
            self.visible.retain(|id| !s.consumed.contains(id));
            self.visible.push(s.product);
            self.contacts.prune(&self.registry);
            log::info!("{} reaction produced {} ({})", self.mode, s.symbol, s.product);
            self.events.push(SceneEvent::Reacted {
                consumed: s.consumed.clone(),
                product: s.product,
                symbol: s.symbol.clone(),
                effect: s.effect,
                position: s.position,
            });
        }
        outcome
    }

    /// Remove every object. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.visible.clear();
        self.contacts.clear();
        self.events.push(SceneEvent::Cleared);
    }

    // -- Session state --

    /// Switch rule tables for future collisions. Existing objects are unaffected.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::info!("mode: {} -> {}", self.mode, mode);
            self.mode = mode;
            self.events.push(SceneEvent::ModeChanged { mode });
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Show or hide the element picker. Spawning works either way.
    pub fn set_picker_open(&mut self, open: bool) {
        if self.picker_open != open {
            self.picker_open = open;
            self.events.push(SceneEvent::PickerToggled { open });
        }
    }

    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    // -- Frame processing --

    /// Run one frame: apply `commands` in order, then test every object
    /// moved this frame for collisions and apply the resulting reactions
    /// one after another.
    pub fn process_frame(&mut self, commands: Vec<SceneCommand>) -> FrameReport {
        let mut report = FrameReport::default();
        let mut moved = MovedSet::new();

        for command in commands {
            match command {
                SceneCommand::AddItem { info, position } => {
                    if let Some(id) = self.add_item(info, position) {
                        report.added.push(id);
                        moved.mark(id);
                    }
                }
                SceneCommand::UpdateTransform { id, position, radius } => {
                    if self.update_transform(id, position, radius) {
                        moved.mark(id);
                    }
                }
                SceneCommand::Collide { ids } => {
                    let outcome = self.on_collide(&ids);
                    report.record(outcome);
                }
                SceneCommand::SetMode(mode) => self.set_mode(mode),
                SceneCommand::SetPickerOpen(open) => self.set_picker_open(open),
                SceneCommand::Clear => self.clear(),
            }
        }

        let debounce = self.config.debounce_contacts;
        for id in moved.iter() {
            let Some(set) = next_collision(&self.registry, &mut self.contacts, id, debounce) else {
                continue;
            };
            let outcome = self.on_collide(&set);
            report.record(outcome);
        }

        report
    }

    // -- Read access for the renderer --

    /// Ids the renderer should currently display.
    pub fn visible_ids(&self) -> &[ObjectId] {
        &self.visible
    }

    /// Visible objects in display order.
    pub fn visible_objects(&self) -> impl Iterator<Item = &DraggableObject> {
        self.visible.iter().filter_map(|id| self.registry.get(*id))
    }

    pub fn object(&self, id: ObjectId) -> Option<&DraggableObject> {
        self.registry.get(id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &DraggableObject> {
        self.registry.iter()
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Notifications since the last drain.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Take all pending notifications.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Hand out the next id. Saturates at `u32::MAX` instead of wrapping,
/// so a live `u32::MAX` object blocks further spawns.
fn next_object_id(next: &mut u32) -> ObjectId {
    let id = ObjectId(*next);
    *next = next.checked_add(1).unwrap_or(u32::MAX);
    id
}

impl Default for SceneController {
    /// Default config with the embedded rules. Falls back to an empty
    /// rule book if the embedded data fails validation.
    fn default() -> Self {
        let rules = RuleBook::builtin().unwrap_or_else(|err| {
            log::error!("builtin rules rejected: {err}");
            RuleBook::empty()
        });
        Self::new(SceneConfig::default(), rules)
    }
}
