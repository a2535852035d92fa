use serde::Deserialize;

/// Session configuration for the scene controller.
/// Every field has a default, so a partial JSON object is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Bounding-sphere radius given to spawned and synthesized objects
    /// until the renderer reports the real one (default: 1.0).
    pub default_radius: f32,
    /// Color for synthesized objects whose rule names none (default: white).
    pub default_color: String,
    /// Maximum number of live objects (default: 256).
    pub max_objects: usize,
    /// Fire collisions only on the frame two spheres start overlapping (default: true).
    pub debounce_contacts: bool,
    /// Standoff distance in front of the camera for picker spawns (default: 5.0).
    pub spawn_distance: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            default_radius: 1.0,
            default_color: "#ffffff".to_string(),
            max_objects: 256,
            debounce_contacts: true,
            spawn_distance: 5.0,
        }
    }
}

impl SceneConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
