//! Sprite component
//!
//! Composes a transform with a texture reference. Loading the sprite awaits
//! the texture and yields a [`SpriteInstance`] the renderer can draw.

use serde_json::Value;

use super::{fields, required_str, TextureComponent, TransformComponent, SPRITE_COMPONENT};
use crate::assets::{ResourceError, ResourceLoader, TextureHandle};
use crate::ecs::{Component, ComponentError, ComponentMeta, ComponentVariant};
use crate::foundation::math::Vec2;
use crate::impl_component;

/// Renderable handle: geometry plus the loaded texture
#[derive(Debug, Clone)]
pub struct SpriteInstance {
    /// Loaded texture
    pub texture: TextureHandle,
    /// Position in scene units
    pub position: Vec2,
    /// Scale factors
    pub scale: Vec2,
    /// Rotation in radians
    pub rotation: f32,
}

impl SpriteInstance {
    fn new(texture: TextureHandle, transform: &TransformComponent) -> Self {
        Self {
            texture,
            position: transform.position,
            scale: transform.scale,
            rotation: transform.rotation,
        }
    }

    /// On-screen size: texture dimensions times scale
    #[allow(clippy::cast_precision_loss)]
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.texture.width as f32 * self.scale.x,
            self.texture.height as f32 * self.scale.y,
        )
    }
}

/// A textured, positioned quad
#[derive(Debug, Clone)]
pub struct SpriteComponent {
    meta: ComponentMeta,
    transform: TransformComponent,
    texture: TextureComponent,
}

impl ComponentVariant for SpriteComponent {
    const TYPE: &'static str = SPRITE_COMPONENT;
}

impl_component!(SpriteComponent);

impl SpriteComponent {
    /// Create a sprite for `texture_path` with an identity transform
    pub fn new(texture_path: impl Into<String>) -> Self {
        Self {
            meta: ComponentMeta::new(),
            transform: TransformComponent::new(),
            texture: TextureComponent::new(texture_path),
        }
    }

    /// Factory body: transform fields plus `{texture: string}`
    pub fn from_initial_values(values: &Value) -> Result<Self, ComponentError> {
        let map = fields(SPRITE_COMPONENT, values)?;
        let texture_path = required_str(SPRITE_COMPONENT, map, "texture")?;
        let transform = TransformComponent::from_fields(SPRITE_COMPONENT, map)?;
        Ok(Self::new(texture_path).with_transform(transform))
    }

    /// Builder pattern: Set transform
    pub fn with_transform(mut self, transform: TransformComponent) -> Self {
        self.transform = transform;
        self
    }

    /// Sprite geometry
    pub fn transform(&self) -> &TransformComponent {
        &self.transform
    }

    /// Mutable sprite geometry
    pub fn transform_mut(&mut self) -> &mut TransformComponent {
        &mut self.transform
    }

    /// Texture reference
    pub fn texture(&self) -> &TextureComponent {
        &self.texture
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Whether the texture has been loaded
    pub fn is_loaded(&self) -> bool {
        self.texture.is_loaded()
    }

    /// Await the texture and return a renderable handle
    ///
    /// The texture handle is cached; later calls do not hit the loader.
    pub async fn load<L: ResourceLoader>(
        &mut self,
        loader: &L,
    ) -> Result<SpriteInstance, ResourceError> {
        let texture = self.texture.load(loader).await?;
        log::debug!("Sprite {} ready ({})", self.id(), self.texture.path());
        Ok(SpriteInstance::new(texture, &self.transform))
    }

    /// Renderable handle built from the cached texture and current transform
    ///
    /// `None` until `load()` has completed.
    pub fn instance(&self) -> Option<SpriteInstance> {
        self.texture
            .instance()
            .map(|texture| SpriteInstance::new(texture, &self.transform))
    }
}
