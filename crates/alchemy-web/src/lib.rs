pub mod instance;
pub mod runner;
pub mod spawn;

pub use instance::{InstanceBuffer, ObjectInstance};
pub use runner::PlaygroundRunner;
pub use spawn::spawn_in_front;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use alchemy_core::{ElementInfo, Mode, ObjectId, SceneCommand, SceneConfig, SceneController, Vec3};

thread_local! {
    static RUNNER: RefCell<Option<PlaygroundRunner>> = RefCell::new(None);
}

/// Run `f` against the runner, or log and return `None` before init.
fn with_runner<R>(f: impl FnOnce(&mut PlaygroundRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("playground not initialized; call playground_init() first");
                None
            }
        }
    })
}

fn element(symbol: &str, color: &str, name: &str) -> ElementInfo {
    let info = ElementInfo::new(symbol, color);
    if name.is_empty() { info } else { info.with_name(name) }
}

/// Set up logging and the scene. `config_json` may be empty for defaults.
/// Returns false if the rule tables fail validation.
#[wasm_bindgen]
pub fn playground_init(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        SceneConfig::default()
    } else {
        SceneConfig::from_json(config_json).unwrap_or_else(|err| {
            log::warn!("invalid scene config ({err}); using defaults");
            SceneConfig::default()
        })
    };

    let controller = match SceneController::with_builtin_rules(config) {
        Ok(c) => c,
        Err(err) => {
            log::error!("rule tables rejected: {err}");
            return false;
        }
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(PlaygroundRunner::new(controller));
    });
    log::info!("alchemy playground: initialized");
    true
}

#[wasm_bindgen]
pub fn playground_tick() {
    with_runner(|r| r.tick());
}

/// Spawn an element at a world position. Returns its id, or 0 if refused.
#[wasm_bindgen]
pub fn playground_add_item(symbol: &str, color: &str, name: &str, x: f32, y: f32, z: f32) -> u32 {
    with_runner(|r| r.add_item(element(symbol, color, name), Vec3::new(x, y, z)))
        .flatten()
        .map_or(0, |id| id.0)
}

/// Spawn an element in front of the camera. Returns its id, or 0 if refused.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn playground_spawn_in_front(
    symbol: &str,
    color: &str,
    name: &str,
    cam_x: f32,
    cam_y: f32,
    cam_z: f32,
    dir_x: f32,
    dir_y: f32,
    dir_z: f32,
) -> u32 {
    let camera = Vec3::new(cam_x, cam_y, cam_z);
    let forward = Vec3::new(dir_x, dir_y, dir_z);
    with_runner(|r| r.spawn_in_front(element(symbol, color, name), camera, forward))
        .flatten()
        .map_or(0, |id| id.0)
}

#[wasm_bindgen]
pub fn playground_update_transform(id: u32, x: f32, y: f32, z: f32, radius: f32) {
    with_runner(|r| {
        r.push(SceneCommand::UpdateTransform {
            id: ObjectId(id),
            position: Vec3::new(x, y, z),
            radius,
        })
    });
}

/// Report an overlap the renderer found itself.
#[wasm_bindgen]
pub fn playground_collide(ids: &[u32]) {
    let ids: Vec<ObjectId> = ids.iter().copied().map(ObjectId).collect();
    with_runner(|r| r.push(SceneCommand::Collide { ids }));
}

/// Returns false for an unknown mode name.
#[wasm_bindgen]
pub fn playground_set_mode(mode: &str) -> bool {
    match mode.parse::<Mode>() {
        Ok(mode) => with_runner(|r| r.push(SceneCommand::SetMode(mode))).is_some(),
        Err(err) => {
            log::warn!("{err}");
            false
        }
    }
}

#[wasm_bindgen]
pub fn playground_set_picker_open(open: bool) {
    with_runner(|r| r.push(SceneCommand::SetPickerOpen(open)));
}

#[wasm_bindgen]
pub fn playground_clear() {
    with_runner(|r| r.clear());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_instance_floats() -> u32 {
    ObjectInstance::FLOATS as u32
}

#[wasm_bindgen]
pub fn playground_objects_json() -> String {
    with_runner(|r| r.objects_json().to_string()).unwrap_or_else(|| String::from("[]"))
}

#[wasm_bindgen]
pub fn playground_events_json() -> String {
    with_runner(|r| r.events_json().to_string()).unwrap_or_else(|| String::from("[]"))
}

#[wasm_bindgen]
pub fn playground_mode() -> String {
    with_runner(|r| r.mode().to_string()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn playground_picker_open() -> bool {
    with_runner(|r| r.picker_open()).unwrap_or(false)
}
