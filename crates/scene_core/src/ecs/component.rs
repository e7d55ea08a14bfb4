//! Component trait and shared component metadata

use std::any::Any;
use std::fmt;

use thiserror::Error;

use crate::foundation::ids::{EntityId, IdGenerator, COMPONENT_PREFIX};

/// Errors raised while materializing a component from data
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComponentError {
    /// No factory is registered for the tag
    #[error("Unknown component type '{0}'")]
    UnknownType(String),

    /// A required field is absent
    #[error("{component}: missing required field '{field}'")]
    MissingField {
        /// Component type tag
        component: &'static str,
        /// Field name
        field: &'static str,
    },

    /// A field is present but has the wrong shape
    #[error("{component}: field '{field}' must be {expected}")]
    InvalidField {
        /// Component type tag
        component: &'static str,
        /// Field name
        field: &'static str,
        /// Description of the accepted shape
        expected: &'static str,
    },

    /// The payload as a whole is unusable
    #[error("{component}: invalid initial values: {reason}")]
    InvalidPayload {
        /// Component type tag
        component: String,
        /// What was wrong
        reason: String,
    },
}

/// Identity and ownership data every component carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMeta {
    id: String,
    name: Option<String>,
    entity: Option<EntityId>,
}

impl ComponentMeta {
    /// Metadata with a freshly generated id
    pub fn new() -> Self {
        Self {
            id: IdGenerator::next(COMPONENT_PREFIX),
            name: None,
            entity: None,
        }
    }

    /// Component id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replace the component id
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Human readable label, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replace the label
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

impl Default for ComponentMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// A typed unit of data attached to at most one entity
///
/// The entity stores components keyed by [`Component::component_type`], so the
/// tag must be the same for every instance of a variant.
pub trait Component: Any + fmt::Debug {
    /// Immutable variant tag
    fn component_type(&self) -> &'static str;

    /// Shared metadata
    fn meta(&self) -> &ComponentMeta;

    /// Shared metadata, mutable
    fn meta_mut(&mut self) -> &mut ComponentMeta;

    /// Upcast for downcasting to the concrete variant
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete variant
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Component id
    fn id(&self) -> &str {
        self.meta().id()
    }

    /// Owning entity, if attached
    fn entity(&self) -> Option<EntityId> {
        self.meta().entity
    }

    /// Update the owner back-reference. Only `Entity` should call this.
    fn set_entity(&mut self, entity: Option<EntityId>) {
        self.meta_mut().entity = entity;
    }
}

/// A concrete component type with a compile-time tag
pub trait ComponentVariant: Component + Sized {
    /// Tag shared by every instance of this variant
    const TYPE: &'static str;
}

impl dyn Component {
    /// Downcast to a concrete variant
    pub fn downcast_ref<T: ComponentVariant>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast to a concrete variant
    pub fn downcast_mut<T: ComponentVariant>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Implements [`Component`] for a struct with a `meta: ComponentMeta` field
/// and a [`ComponentVariant`] impl.
#[macro_export]
macro_rules! impl_component {
    ($ty:ty) => {
        impl $crate::ecs::Component for $ty {
            fn component_type(&self) -> &'static str {
                <$ty as $crate::ecs::ComponentVariant>::TYPE
            }

            fn meta(&self) -> &$crate::ecs::ComponentMeta {
                &self.meta
            }

            fn meta_mut(&mut self) -> &mut $crate::ecs::ComponentMeta {
                &mut self.meta
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };
}
