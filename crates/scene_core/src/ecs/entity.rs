//! Entity implementation
//!
//! An entity exclusively owns its components, at most one per type tag.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::{Component, ComponentVariant};
use crate::foundation::ids::EntityId;

/// A named container of components keyed by type tag
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    name: String,
    components: HashMap<&'static str, Box<dyn Component>>,
}

impl Entity {
    /// Create an empty entity with a generated id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::generate(),
            name: name.into(),
            components: HashMap::new(),
        }
    }

    /// Create an entity and attach `components` in order
    ///
    /// Later components replace earlier ones with the same type.
    pub fn with_components(
        name: impl Into<String>,
        components: impl IntoIterator<Item = Box<dyn Component>>,
    ) -> Self {
        let mut entity = Self::new(name);
        for component in components {
            entity.add_component(component);
        }
        entity
    }

    /// Get the entity ID
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Human readable label; not required to be unique
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a component, replacing any existing component of the same type
    pub fn add_component(
        &mut self,
        mut component: Box<dyn Component>,
    ) -> &mut (dyn Component + 'static) {
        component.set_entity(Some(self.id));
        let tag = component.component_type();
        match self.components.entry(tag) {
            Entry::Occupied(mut slot) => {
                let mut previous = slot.insert(component);
                previous.set_entity(None);
                log::trace!("{}: replaced {} '{}'", self.id, tag, previous.id());
                &mut **slot.into_mut()
            }
            Entry::Vacant(slot) => &mut **slot.insert(component),
        }
    }

    /// Component with the given tag, or `None`
    pub fn get_component(&self, tag: &str) -> Option<&(dyn Component + 'static)> {
        self.components.get(tag).map(|component| &**component)
    }

    /// Mutable component with the given tag, or `None`
    pub fn get_component_mut(&mut self, tag: &str) -> Option<&mut (dyn Component + 'static)> {
        self.components.get_mut(tag).map(|component| &mut **component)
    }

    /// Whether a component with the given tag is attached
    pub fn has_component(&self, tag: &str) -> bool {
        self.components.contains_key(tag)
    }

    /// Detach the component with the given tag
    ///
    /// Returns the detached component with its back-reference cleared; a
    /// missing tag is a no-op.
    pub fn remove_component(&mut self, tag: &str) -> Option<Box<dyn Component>> {
        let mut component = self.components.remove(tag)?;
        component.set_entity(None);
        Some(component)
    }

    /// Typed lookup
    pub fn get<T: ComponentVariant>(&self) -> Option<&T> {
        self.get_component(T::TYPE)?.downcast_ref::<T>()
    }

    /// Typed mutable lookup
    pub fn get_mut<T: ComponentVariant>(&mut self) -> Option<&mut T> {
        self.get_component_mut(T::TYPE)?.downcast_mut::<T>()
    }

    /// Tags of every attached component, sorted
    pub fn component_types(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.components.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    /// Iterate over attached components in no particular order
    pub fn components(&self) -> impl Iterator<Item = &(dyn Component + 'static)> {
        self.components.values().map(|component| &**component)
    }

    /// Number of attached components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no component is attached
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
