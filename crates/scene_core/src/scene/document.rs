//! Scene document model
//!
//! Mirrors the JSON scene file:
//!
//! ```json
//! { "scene": { "id": "...", "name": "...", "gameObjects": [
//!     { "id": "...", "components": {
//!         "<local-key>": { "id": "...", "type": "SpriteComponent",
//!                          "name": "...", "initial_values": { } } } } ] } }
//! ```
//!
//! Component mappings keep document order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// The scene record
    pub scene: SceneRecord,
}

/// A scene and its game objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    /// Scene id; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Scene name
    pub name: String,
    /// Game objects in document order
    #[serde(rename = "gameObjects", default)]
    pub game_objects: Vec<GameObjectRecord>,
}

/// A game object and its components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObjectRecord {
    /// Game object id; used as the entity name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Optional label, preferred over `id` for the entity name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Component records keyed by a per-object local key
    ///
    /// Kept as raw JSON so each record can be validated on its own and
    /// reported with its key.
    #[serde(default)]
    pub components: Map<String, Value>,
}

impl GameObjectRecord {
    /// Label for log and error messages
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unnamed>")
    }
}

/// A single component description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Component id; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Registry tag
    #[serde(rename = "type")]
    pub component_type: String,
    /// Optional label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Variant-specific payload
    #[serde(default)]
    pub initial_values: Value,
}
