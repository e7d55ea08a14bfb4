//! Texture component
//!
//! Holds a resource path and, once [`TextureComponent::load`] has completed,
//! the cached texture handle.

use serde_json::Value;

use super::{fields, required_str, TEXTURE_COMPONENT};
use crate::assets::{ResourceError, ResourceLoader, TextureHandle};
use crate::ecs::{Component, ComponentError, ComponentMeta, ComponentVariant};
use crate::impl_component;

/// A texture resource reference
#[derive(Debug, Clone)]
pub struct TextureComponent {
    meta: ComponentMeta,
    path: String,
    handle: Option<TextureHandle>,
}

impl ComponentVariant for TextureComponent {
    const TYPE: &'static str = TEXTURE_COMPONENT;
}

impl_component!(TextureComponent);

impl TextureComponent {
    /// Create an unloaded texture for `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            meta: ComponentMeta::new(),
            path: path.into(),
            handle: None,
        }
    }

    /// Factory body: build from `{path: string}`
    pub fn from_initial_values(values: &Value) -> Result<Self, ComponentError> {
        let map = fields(TEXTURE_COMPONENT, values)?;
        Ok(Self::new(required_str(TEXTURE_COMPONENT, map, "path")?))
    }

    /// Resource path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether a handle has been cached
    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// Resolve the texture through `loader` and cache the handle
    ///
    /// Later calls return the cached handle without touching the loader.
    /// Failures are returned as-is and nothing is cached, so a later call
    /// retries.
    pub async fn load<L: ResourceLoader>(
        &mut self,
        loader: &L,
    ) -> Result<TextureHandle, ResourceError> {
        if let Some(handle) = &self.handle {
            return Ok(TextureHandle::clone(handle));
        }

        log::debug!("Loading texture '{}' for {}", self.path, self.id());
        let handle = loader.load_texture(&self.path).await?;
        self.handle = Some(TextureHandle::clone(&handle));
        Ok(handle)
    }

    /// Cached handle; `None` until `load()` has completed
    pub fn instance(&self) -> Option<TextureHandle> {
        self.handle.clone()
    }

    /// Cached handle, or [`ResourceError::NotLoaded`] before `load()` has completed
    pub fn handle(&self) -> Result<TextureHandle, ResourceError> {
        self.instance()
            .ok_or_else(|| ResourceError::NotLoaded(self.path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ImageData, MemoryLoader};
    use serde_json::json;

    #[test]
    fn test_from_initial_values() {
        let texture = TextureComponent::from_initial_values(&json!({"path": "hero.png"})).unwrap();
        assert_eq!(texture.path(), "hero.png");
        assert_eq!(texture.component_type(), "TextureComponent");
        assert!(!texture.is_loaded());
    }

    #[test]
    fn test_path_is_required() {
        let err = TextureComponent::from_initial_values(&json!({})).unwrap_err();
        assert_eq!(
            err,
            ComponentError::MissingField {
                component: "TextureComponent",
                field: "path",
            }
        );
        assert!(TextureComponent::from_initial_values(&json!({"path": 12})).is_err());
        assert!(TextureComponent::from_initial_values(&Value::Null).is_err());
    }

    #[test]
    fn test_instance_before_load_is_none() {
        let texture = TextureComponent::new("hero.png");
        assert!(texture.instance().is_none());
        assert!(matches!(
            texture.handle(),
            Err(ResourceError::NotLoaded(path)) if path == "hero.png"
        ));
    }

    #[test]
    fn test_load_caches_handle() {
        let loader = MemoryLoader::new();
        loader.insert("hero.png", ImageData::solid_color(8, 4, [255, 255, 255, 255]));
        let mut texture = TextureComponent::new("hero.png");

        let first = pollster::block_on(texture.load(&loader)).unwrap();
        let second = pollster::block_on(texture.load(&loader)).unwrap();

        assert_eq!(loader.requests(), 1);
        assert!(TextureHandle::ptr_eq(&first, &second));
        assert_eq!(texture.instance().unwrap().width, 8);
    }

    #[test]
    fn test_failed_load_caches_nothing() {
        let loader = MemoryLoader::new();
        let mut texture = TextureComponent::new("missing.png");

        let result = pollster::block_on(texture.load(&loader));
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
        assert!(!texture.is_loaded());
    }
}
