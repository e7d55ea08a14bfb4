//! # Scene
//!
//! A scene is the materialized result of loading a scene document: an ordered
//! list of entities plus derived classification views (currently: every
//! sprite) that the rendering subsystem can iterate without scanning all
//! entities.

pub mod document;
pub mod loader;

pub use document::{ComponentRecord, GameObjectRecord, SceneDocument, SceneRecord};
pub use loader::{SceneError, SceneLoader, SceneSource};

use std::collections::HashMap;

use crate::assets::{ResourceError, ResourceLoader};
use crate::ecs::{ComponentVariant, Entity, EntityId, SpriteComponent, SpriteInstance};

/// Non-owning reference to a component inside a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    /// Owning entity
    pub entity: EntityId,
    /// Component tag within that entity
    pub component_type: &'static str,
}

/// Entities of one loaded scene
#[derive(Debug)]
pub struct Scene {
    id: String,
    name: String,
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
    sprites: Vec<ComponentRef>,
}

impl Scene {
    /// Build a scene and derive its classification views
    pub fn new(id: impl Into<String>, name: impl Into<String>, entities: Vec<Entity>) -> Self {
        let index = entities
            .iter()
            .enumerate()
            .map(|(position, entity)| (entity.id(), position))
            .collect();
        let mut scene = Self {
            id: id.into(),
            name: name.into(),
            entities,
            index,
            sprites: Vec::new(),
        };
        scene.refresh_classification();
        scene
    }

    /// Rebuild the classification views from the current entities
    pub fn refresh_classification(&mut self) {
        self.sprites = self
            .entities
            .iter()
            .filter(|entity| entity.has_component(SpriteComponent::TYPE))
            .map(|entity| ComponentRef {
                entity: entity.id(),
                component_type: SpriteComponent::TYPE,
            })
            .collect();
    }

    /// Scene id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entities in document order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity by id
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&position| &self.entities[position])
    }

    /// Mutable entity by id
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let position = *self.index.get(&id)?;
        self.entities.get_mut(position)
    }

    /// First entity with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name() == name)
    }

    /// Sprite classification entries
    pub fn sprite_refs(&self) -> &[ComponentRef] {
        &self.sprites
    }

    /// Number of classified sprites
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Classified sprites, resolved through their owning entities
    pub fn sprites(&self) -> impl Iterator<Item = &SpriteComponent> {
        self.sprites
            .iter()
            .filter_map(|sprite| self.entity(sprite.entity)?.get::<SpriteComponent>())
    }

    /// Load every classified sprite, stopping at the first failure
    pub async fn load_sprites<L: ResourceLoader>(
        &mut self,
        loader: &L,
    ) -> Result<Vec<SpriteInstance>, ResourceError> {
        let mut instances = Vec::with_capacity(self.sprites.len());
        for position in 0..self.sprites.len() {
            let entity = self.sprites[position].entity;
            let Some(sprite) = self
                .entity_mut(entity)
                .and_then(|entity| entity.get_mut::<SpriteComponent>())
            else {
                continue;
            };
            instances.push(sprite.load(loader).await?);
        }
        log::info!("Loaded {} sprite(s) for scene '{}'", instances.len(), self.name);
        Ok(instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ImageData, MemoryLoader};
    use crate::ecs::{Component, TextureComponent, TransformComponent};

    fn sample_scene() -> Scene {
        let mut hero = Entity::new("hero");
        hero.add_component(Box::new(SpriteComponent::new("hero.png")));
        let mut camera = Entity::new("camera");
        camera.add_component(Box::new(TransformComponent::new()));
        let mut villain = Entity::new("villain");
        villain.add_component(Box::new(SpriteComponent::new("villain.png")));
        villain.add_component(Box::new(TextureComponent::new("villain_alt.png")));

        Scene::new("scene_test", "Test", vec![hero, camera, villain])
    }

    #[test]
    fn test_classification_matches_entities() {
        let scene = sample_scene();

        assert_eq!(scene.len(), 3);
        assert_eq!(scene.sprite_count(), 2);
        for sprite_ref in scene.sprite_refs() {
            let entity = scene.entity(sprite_ref.entity).unwrap();
            assert!(entity.has_component(sprite_ref.component_type));
        }

        let paths: Vec<&str> = scene.sprites().map(|sprite| sprite.texture().path()).collect();
        assert_eq!(paths, vec!["hero.png", "villain.png"]);
    }

    #[test]
    fn test_lookup() {
        let scene = sample_scene();
        let camera = scene.find_by_name("camera").unwrap();
        assert_eq!(scene.entity(camera.id()).unwrap().name(), "camera");
        assert!(scene.find_by_name("nobody").is_none());
    }

    #[test]
    fn test_refresh_after_mutation() {
        let mut scene = sample_scene();
        let camera = scene.find_by_name("camera").unwrap().id();
        let hero = scene.find_by_name("hero").unwrap().id();

        scene.entity_mut(hero).unwrap().remove_component(SpriteComponent::TYPE);
        // Stale entry resolves to nothing until the views are rebuilt
        assert_eq!(scene.sprites().count(), 1);

        scene
            .entity_mut(camera)
            .unwrap()
            .add_component(Box::new(SpriteComponent::new("camera.png")));
        scene.refresh_classification();
        assert_eq!(scene.sprite_count(), 2);
        assert_eq!(scene.sprite_refs()[0].entity, camera);
    }

    #[test]
    fn test_load_sprites() {
        let loader = MemoryLoader::new();
        loader.insert("hero.png", ImageData::solid_color(2, 2, [1, 2, 3, 255]));
        loader.insert("villain.png", ImageData::solid_color(4, 4, [3, 2, 1, 255]));
        let mut scene = sample_scene();

        let instances = pollster::block_on(scene.load_sprites(&loader)).unwrap();

        assert_eq!(instances.len(), 2);
        assert!(scene.sprites().all(SpriteComponent::is_loaded));
        // The texture component alongside the sprite is a separate resource
        let villain = scene.find_by_name("villain").unwrap();
        assert!(!villain.get::<TextureComponent>().unwrap().is_loaded());
        assert_eq!(villain.get::<SpriteComponent>().unwrap().entity(), Some(villain.id()));
    }

    #[test]
    fn test_load_sprites_fails_fast() {
        let loader = MemoryLoader::new();
        loader.insert("villain.png", ImageData::solid_color(4, 4, [3, 2, 1, 255]));
        let mut scene = sample_scene();

        let result = pollster::block_on(scene.load_sprites(&loader));
        assert!(matches!(result, Err(ResourceError::NotFound(path)) if path == "hero.png"));
        assert_eq!(loader.requests(), 1);
    }
}
