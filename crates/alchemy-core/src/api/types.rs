use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Unique identifier for a draggable object in the scene.
/// Allocated monotonically by the controller and never reused in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj-{}", self.0)
    }
}

/// Chemical and visual identity of an object.
/// Several objects may share identical info; symbols are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub symbol: String,
    /// CSS-style color string, e.g. `"#ff0000"`.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ElementInfo {
    pub fn new(symbol: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            color: color.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Selects which rule table governs reactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Creation,
    Reaction,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Creation, Mode::Reaction];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::Reaction => "reaction",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode `{0}` (expected `creation` or `reaction`)")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "creation" => Ok(Self::Creation),
            "reaction" => Ok(Self::Reaction),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Visual effect the renderer plays where a reaction happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionEffect {
    #[default]
    None,
    Explosion,
    ToxicGas,
    Lightning,
    Fire,
    Smoke,
}

impl ReactionEffect {
    /// Numeric code used in packed float buffers.
    pub fn code(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Explosion => 1,
            Self::ToxicGas => 2,
            Self::Lightning => 3,
            Self::Fire => 4,
            Self::Smoke => 5,
        }
    }
}

/// Notification emitted by the controller after a registry or session change.
/// The rendering layer drains these once per frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneEvent {
    Added {
        id: ObjectId,
        symbol: String,
    },
    Reacted {
        consumed: Vec<ObjectId>,
        product: ObjectId,
        symbol: String,
        effect: ReactionEffect,
        position: Vec3,
    },
    ModeChanged {
        mode: Mode,
    },
    PickerToggled {
        open: bool,
    },
    Cleared,
}
