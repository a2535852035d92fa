use std::collections::HashMap;

use serde::Serialize;
use alchemy_core::{
    CommandQueue, ElementInfo, FrameReport, Mode, ObjectId, SceneCommand, SceneController,
    SceneEvent, Vec3,
};

use crate::instance::{InstanceBuffer, ObjectInstance};
use crate::spawn::spawn_in_front;

/// What the renderer needs to pick a visual for an object.
#[derive(Debug, Serialize)]
struct ObjectView<'a> {
    id: ObjectId,
    symbol: &'a str,
    color: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

/// Frame-driven wrapper around the scene controller.
///
/// The app keeps one runner in a `thread_local!` and exports free functions
/// via `#[wasm_bindgen]`. Spawns and clears change the registry at once, so
/// JS always holds ids of live objects; drags, collisions and session
/// toggles wait for `tick()`, which also rebuilds the buffers JS reads back.
pub struct PlaygroundRunner {
    controller: SceneController,
    commands: CommandQueue,
    instances: InstanceBuffer,
    objects_json: String,
    events_json: String,
    last_report: FrameReport,
    frame: u64,
}

impl PlaygroundRunner {
    pub fn new(controller: SceneController) -> Self {
        let capacity = controller.config().max_objects;
        Self {
            controller,
            commands: CommandQueue::new(),
            instances: InstanceBuffer::with_capacity(capacity),
            objects_json: String::from("[]"),
            events_json: String::from("[]"),
            last_report: FrameReport::default(),
            frame: 0,
        }
    }

    /// Apply a spawn or clear now; queue anything else for the next tick.
    pub fn push(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::AddItem { info, position } => {
                self.add_item(info, position);
            }
            SceneCommand::Clear => self.clear(),
            other => self.commands.push(other),
        }
    }

    /// Remove every object. Queued drags and collisions for the removed
    /// ids become no-ops when the next tick applies them.
    pub fn clear(&mut self) {
        self.controller.clear();
    }

    /// Spawn immediately so the caller gets the id back. The object is also
    /// queued as moved, so landing on another object reacts next tick.
    pub fn add_item(&mut self, info: ElementInfo, position: Vec3) -> Option<ObjectId> {
        let id = self.controller.add_item(info, position)?;
        let radius = self.controller.config().default_radius;
        self.commands.push(SceneCommand::UpdateTransform { id, position, radius });
        Some(id)
    }

    /// Spawn at the configured standoff distance in front of the camera.
    pub fn spawn_in_front(&mut self, info: ElementInfo, camera: Vec3, forward: Vec3) -> Option<ObjectId> {
        let position = spawn_in_front(camera, forward, self.controller.config().spawn_distance);
        self.add_item(info, position)
    }

    /// Run one frame: apply queued commands, detect and resolve collisions,
    /// then rebuild the instance buffer and JSON snapshots.
    pub fn tick(&mut self) {
        let commands = self.commands.drain();
        self.last_report = self.controller.process_frame(commands);
        let events = self.controller.drain_events();
        self.frame += 1;

        if !self.last_report.reactions.is_empty() {
            log::debug!(
                "frame {}: {} reaction(s)",
                self.frame,
                self.last_report.reactions.len()
            );
        }

        // Effects play once, on the frame the product appears.
        let fresh_effects: HashMap<ObjectId, u32> = events
            .iter()
            .filter_map(|e| match e {
                SceneEvent::Reacted { product, effect, .. } => Some((*product, effect.code())),
                _ => None,
            })
            .collect();

        self.instances.clear();
        let mut views = Vec::with_capacity(self.controller.visible_ids().len());
        for object in self.controller.visible_objects() {
            let effect = fresh_effects.get(&object.id).copied().unwrap_or(0);
            self.instances.push(ObjectInstance::from_object(object, effect));
            views.push(ObjectView {
                id: object.id,
                symbol: &object.info.symbol,
                color: &object.info.color,
                name: object.info.name.as_deref(),
            });
        }

        self.objects_json = to_json(&views);
        self.events_json = to_json(&events);
    }

    // ---- Accessors for JS reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count()
    }

    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }

    /// `[{ id, symbol, color, name? }]` for every visible object, as of the last tick.
    pub fn objects_json(&self) -> &str {
        &self.objects_json
    }

    /// Events produced during the last tick.
    pub fn events_json(&self) -> &str {
        &self.events_json
    }

    pub fn last_report(&self) -> &FrameReport {
        &self.last_report
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn picker_open(&self) -> bool {
        self.controller.picker_open()
    }

    pub fn controller(&self) -> &SceneController {
        &self.controller
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::error!("snapshot serialization failed: {err}");
        String::from("[]")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alchemy_core::SceneConfig;

    fn runner() -> PlaygroundRunner {
        PlaygroundRunner::new(SceneController::default())
    }

    fn info(symbol: &str) -> ElementInfo {
        ElementInfo::new(symbol, "#ffffff")
    }

    #[test]
    fn tick_packs_visible_objects() {
        let mut r = runner();
        let id = r.add_item(info("H"), Vec3::new(1.0, 2.0, 3.0)).unwrap();
        r.tick();
        assert_eq!(r.instance_count(), 1);
        let inst = r.instances().as_slice()[0];
        assert_eq!(inst.id, id.0 as f32);
        assert_eq!((inst.x, inst.y, inst.z), (1.0, 2.0, 3.0));
        assert_eq!(inst.effect, 0.0);
    }

    #[test]
    fn objects_json_lists_symbols() {
        let mut r = runner();
        r.add_item(info("Fe").with_name("Iron"), Vec3::ZERO);
        r.tick();
        let parsed: serde_json::Value = serde_json::from_str(r.objects_json()).unwrap();
        assert_eq!(parsed[0]["symbol"], "Fe");
        assert_eq!(parsed[0]["name"], "Iron");
        assert_eq!(parsed[0]["color"], "#ffffff");
    }

    #[test]
    fn spawning_onto_partner_reacts_next_tick() {
        let mut r = runner();
        r.push(SceneCommand::SetMode(Mode::Reaction));
        r.add_item(info("Na"), Vec3::ZERO);
        r.add_item(info("H2O"), Vec3::new(0.5, 0.0, 0.0));
        r.tick();

        assert_eq!(r.last_report().reactions.len(), 1);
        assert_eq!(r.instance_count(), 1);
        // Explosion code on the product's first frame only.
        assert_eq!(r.instances().as_slice()[0].effect, 1.0);
        let events: serde_json::Value = serde_json::from_str(r.events_json()).unwrap();
        let kinds: Vec<_> = events.as_array().unwrap().iter().map(|e| e["kind"].clone()).collect();
        assert!(kinds.contains(&serde_json::json!("reacted")));

        r.tick();
        assert_eq!(r.instances().as_slice()[0].effect, 0.0);
        assert_eq!(r.events_json(), "[]");
    }

    #[test]
    fn drag_through_queue_triggers_reaction() {
        let mut r = runner();
        let a = r.add_item(info("H"), Vec3::new(-10.0, 0.0, 0.0)).unwrap();
        r.add_item(info("H"), Vec3::new(10.0, 0.0, 0.0));
        r.tick();
        assert!(r.last_report().reactions.is_empty());

        r.push(SceneCommand::UpdateTransform { id: a, position: Vec3::new(9.0, 0.0, 0.0), radius: 1.0 });
        r.tick();
        assert_eq!(r.last_report().reactions[0].symbol, "H2");
        assert_eq!(r.frame(), 2);
    }

    #[test]
    fn spawn_in_front_uses_configured_distance() {
        let config = SceneConfig { spawn_distance: 2.0, ..SceneConfig::default() };
        let mut r = PlaygroundRunner::new(SceneController::with_builtin_rules(config).unwrap());
        let id = r.spawn_in_front(info("C"), Vec3::ZERO, Vec3::X).unwrap();
        assert_eq!(r.controller().object(id).unwrap().position, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn clear_then_spawn_keeps_the_new_object() {
        let mut r = runner();
        let old = r.add_item(info("O"), Vec3::X).unwrap();
        r.push(SceneCommand::Clear);
        let id = r.add_item(info("H"), Vec3::ZERO).unwrap();
        r.tick();

        assert!(r.controller().object(old).is_none());
        assert!(r.controller().object(id).is_some());
        assert_eq!(r.instance_count(), 1);
        assert_eq!(r.instances().as_slice()[0].id, id.0 as f32);
    }

    #[test]
    fn queued_spawn_command_is_applied_in_order() {
        let mut r = runner();
        r.push(SceneCommand::AddItem { info: info("Na"), position: Vec3::ZERO });
        r.push(SceneCommand::Clear);
        r.push(SceneCommand::AddItem { info: info("Cl"), position: Vec3::ZERO });
        r.tick();

        let symbols: Vec<_> = r.controller().visible_objects().map(|o| o.symbol().to_string()).collect();
        assert_eq!(symbols, vec!["Cl"]);
    }

    #[test]
    fn mode_and_picker_apply_on_tick() {
        let mut r = runner();
        r.push(SceneCommand::SetMode(Mode::Reaction));
        r.push(SceneCommand::SetPickerOpen(true));
        assert_eq!(r.mode(), Mode::Creation);
        r.tick();
        assert_eq!(r.mode(), Mode::Reaction);
        assert!(r.picker_open());
    }
}
