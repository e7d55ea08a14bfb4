//! Scene loader
//!
//! Turns a scene document into a [`Scene`], materializing each component
//! through the [`ComponentRegistry`]. Loading is all-or-nothing: the first
//! unknown type or invalid payload aborts the whole load. No I/O happens here;
//! texture bytes are fetched later by each sprite's own `load()`.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::document::{ComponentRecord, GameObjectRecord, SceneDocument};
use super::Scene;
use crate::ecs::{Component, ComponentError, ComponentRegistry, Entity};
use crate::foundation::ids::{IdGenerator, ENTITY_PREFIX, SCENE_PREFIX};

/// Scene loading errors
#[derive(Debug, Error)]
pub enum SceneError {
    /// The payload is not a valid scene document
    #[error("Failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),

    /// The scene file could not be read
    #[error("Failed to read scene file '{path}': {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A component record does not have the expected shape
    #[error("Malformed scene: {0}")]
    Malformed(String),

    /// A component could not be materialized
    #[error("Game object '{game_object}', component '{key}': {source}")]
    Component {
        /// Game object label
        game_object: String,
        /// Local key of the component record
        key: String,
        /// Registry or factory error
        #[source]
        source: ComponentError,
    },
}

/// Input accepted by [`SceneLoader::load`]
#[derive(Debug, Clone)]
pub enum SceneSource<'a> {
    /// Raw JSON text
    Text(&'a str),
    /// Already-parsed JSON
    Value(Value),
    /// Already-typed document
    Document(&'a SceneDocument),
}

impl<'a> From<&'a str> for SceneSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for SceneSource<'_> {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl<'a> From<&'a SceneDocument> for SceneSource<'a> {
    fn from(document: &'a SceneDocument) -> Self {
        Self::Document(document)
    }
}

/// Builds scenes from documents
#[derive(Debug)]
pub struct SceneLoader {
    registry: ComponentRegistry,
}

impl SceneLoader {
    /// Create a loader using `registry` for component construction
    pub fn new(registry: ComponentRegistry) -> Self {
        Self { registry }
    }

    /// Component registry
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Mutable component registry, for registering extra types at startup
    pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    /// Load a scene from text, parsed JSON or a typed document
    pub fn load<'a>(&self, source: impl Into<SceneSource<'a>>) -> Result<Scene, SceneError> {
        match source.into() {
            SceneSource::Text(text) => self.load_str(text),
            SceneSource::Value(value) => self.load_value(value),
            SceneSource::Document(document) => self.load_document(document),
        }
    }

    /// Load a scene from JSON text
    pub fn load_str(&self, text: &str) -> Result<Scene, SceneError> {
        let document: SceneDocument = serde_json::from_str(text)?;
        self.load_document(&document)
    }

    /// Load a scene from parsed JSON
    pub fn load_value(&self, value: Value) -> Result<Scene, SceneError> {
        let document: SceneDocument = serde_json::from_value(value)?;
        self.load_document(&document)
    }

    /// Load a scene from a JSON file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Scene, SceneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.load_str(&text)
    }

    /// Load a scene from a typed document
    pub fn load_document(&self, document: &SceneDocument) -> Result<Scene, SceneError> {
        let record = &document.scene;
        log::info!(
            "Loading scene '{}' ({} game objects)",
            record.name,
            record.game_objects.len()
        );

        let mut entities = Vec::with_capacity(record.game_objects.len());
        for object in &record.game_objects {
            let components = self.materialize(object)?;
            let name = object
                .name
                .clone()
                .or_else(|| object.id.clone())
                .unwrap_or_else(|| IdGenerator::next(ENTITY_PREFIX));
            entities.push(Entity::with_components(name, components));
        }

        let id = non_empty(record.id.as_ref()).unwrap_or_else(|| IdGenerator::next(SCENE_PREFIX));
        let scene = Scene::new(id, record.name.clone(), entities);

        log::info!(
            "Loaded scene '{}': {} entities, {} sprites",
            scene.name(),
            scene.len(),
            scene.sprite_count()
        );
        Ok(scene)
    }

    /// Build every component of one game object, in mapping order
    fn materialize(
        &self,
        object: &GameObjectRecord,
    ) -> Result<Vec<Box<dyn Component>>, SceneError> {
        let mut components = Vec::with_capacity(object.components.len());
        let mut seen = HashSet::new();

        for (key, raw) in &object.components {
            let record = ComponentRecord::deserialize(raw).map_err(|err| {
                SceneError::Malformed(format!(
                    "game object '{}', component '{}': {}",
                    object.label(),
                    key,
                    err
                ))
            })?;

            let mut component = self
                .registry
                .create(&record.component_type, &record.initial_values)
                .map_err(|source| SceneError::Component {
                    game_object: object.label().to_string(),
                    key: key.clone(),
                    source,
                })?;

            if let Some(id) = non_empty(record.id.as_ref()) {
                component.meta_mut().set_id(id);
            }
            if let Some(name) = record.name {
                component.meta_mut().set_name(name);
            }

            if !seen.insert(component.component_type()) {
                log::warn!(
                    "Game object '{}' has more than one {}; '{}' replaces the earlier one",
                    object.label(),
                    component.component_type(),
                    key
                );
            }
            components.push(component);
        }

        Ok(components)
    }
}

impl Default for SceneLoader {
    fn default() -> Self {
        Self::new(ComponentRegistry::with_builtins())
    }
}

fn non_empty(id: Option<&String>) -> Option<String> {
    id.filter(|id| !id.is_empty()).cloned()
}
