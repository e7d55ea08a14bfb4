//! Component type registry
//!
//! Maps a type tag to a factory turning a JSON payload into a live component.
//! Populate it at startup; registering a tag twice silently replaces the
//! earlier factory (a warning is logged).

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use super::components::{SpriteComponent, TextureComponent, TransformComponent};
use super::{Component, ComponentError, ComponentVariant};

/// Builds a component from its `initial_values` payload
pub type ComponentFactory = Box<dyn Fn(&Value) -> Result<Box<dyn Component>, ComponentError>>;

/// Tag to factory mapping
#[derive(Default)]
pub struct ComponentRegistry {
    factories: HashMap<String, ComponentFactory>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in Transform, Texture and Sprite factories
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register_variant(TransformComponent::TYPE, TransformComponent::from_initial_values);
        registry.register_variant(TextureComponent::TYPE, TextureComponent::from_initial_values);
        registry.register_variant(SpriteComponent::TYPE, SpriteComponent::from_initial_values);
        registry
    }

    /// Associate `tag` with `factory`
    ///
    /// Returns `true` if an existing factory was replaced.
    pub fn register<F>(&mut self, tag: impl Into<String>, factory: F) -> bool
    where
        F: Fn(&Value) -> Result<Box<dyn Component>, ComponentError> + 'static,
    {
        let tag = tag.into();
        let replaced = self.factories.insert(tag.clone(), Box::new(factory)).is_some();
        if replaced {
            log::warn!("Component type '{}' re-registered; previous factory replaced", tag);
        } else {
            log::debug!("Registered component type '{}'", tag);
        }
        replaced
    }

    /// Register a typed constructor, boxing its output
    pub fn register_variant<T, F>(&mut self, tag: impl Into<String>, constructor: F) -> bool
    where
        T: Component,
        F: Fn(&Value) -> Result<T, ComponentError> + 'static,
    {
        self.register(tag, move |values: &Value| {
            constructor(values).map(|component| Box::new(component) as Box<dyn Component>)
        })
    }

    /// Materialize a component of type `tag` from `values`
    pub fn create(&self, tag: &str, values: &Value) -> Result<Box<dyn Component>, ComponentError> {
        let factory = self
            .factories
            .get(tag)
            .ok_or_else(|| ComponentError::UnknownType(tag.to_string()))?;
        let component = factory(values)?;
        if component.component_type() != tag {
            log::warn!(
                "Factory for '{}' produced a component tagged '{}'",
                tag,
                component.component_type()
            );
        }
        Ok(component)
    }

    /// Whether a factory is registered for `tag`
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// All registered tags, sorted
    pub fn registered_types(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("types", &self.registered_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ComponentMeta;
    use crate::impl_component;
    use serde_json::json;

    #[derive(Debug)]
    struct HealthComponent {
        meta: ComponentMeta,
        hit_points: u64,
    }

    impl ComponentVariant for HealthComponent {
        const TYPE: &'static str = "HealthComponent";
    }

    impl_component!(HealthComponent);

    fn health(values: &Value) -> Result<HealthComponent, ComponentError> {
        Ok(HealthComponent {
            meta: ComponentMeta::new(),
            hit_points: values.get("hp").and_then(Value::as_u64).unwrap_or(100),
        })
    }

    #[test]
    fn test_builtins_produce_matching_tags() {
        let registry = ComponentRegistry::with_builtins();
        let payloads = [
            (TransformComponent::TYPE, json!({"x": 1})),
            (TextureComponent::TYPE, json!({"path": "hero.png"})),
            (SpriteComponent::TYPE, json!({"texture": "hero.png"})),
        ];

        for (tag, values) in payloads {
            let component = registry.create(tag, &values).unwrap();
            assert_eq!(component.component_type(), tag);
        }
        assert_eq!(
            registry.registered_types(),
            vec!["SpriteComponent", "TextureComponent", "TransformComponent"]
        );
    }

    #[test]
    fn test_unknown_type() {
        let registry = ComponentRegistry::with_builtins();
        let err = registry.create("UnknownComponent", &json!({})).unwrap_err();
        assert_eq!(err, ComponentError::UnknownType("UnknownComponent".to_string()));
        assert_eq!(err.to_string(), "Unknown component type 'UnknownComponent'");
    }

    #[test]
    fn test_factory_errors_propagate() {
        let registry = ComponentRegistry::with_builtins();
        let err = registry.create(TextureComponent::TYPE, &json!({})).unwrap_err();
        assert!(matches!(err, ComponentError::MissingField { field: "path", .. }));
    }

    #[test]
    fn test_custom_variant() {
        let mut registry = ComponentRegistry::new();
        assert!(!registry.contains("HealthComponent"));
        assert!(!registry.register_variant(HealthComponent::TYPE, health));

        let component = registry.create("HealthComponent", &json!({"hp": 7})).unwrap();
        assert_eq!(component.downcast_ref::<HealthComponent>().unwrap().hit_points, 7);
    }

    #[test]
    fn test_reregistering_overwrites() {
        let mut registry = ComponentRegistry::with_builtins();
        let replaced = registry.register_variant(TextureComponent::TYPE, |_: &Value| {
            Ok(TextureComponent::new("placeholder.png"))
        });
        assert!(replaced);

        let component = registry.create(TextureComponent::TYPE, &json!({})).unwrap();
        assert_eq!(component.downcast_ref::<TextureComponent>().unwrap().path(), "placeholder.png");
    }
}
