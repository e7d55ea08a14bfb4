//! Entity-Component-System implementation
//!
//! Entities own their components directly; components are built from data
//! through the [`ComponentRegistry`].

pub mod entity;
pub mod component;
pub mod registry;
pub mod components;

pub use entity::Entity;
pub use component::{Component, ComponentError, ComponentMeta, ComponentVariant};
pub use registry::{ComponentFactory, ComponentRegistry};
pub use components::{SpriteComponent, SpriteInstance, TextureComponent, TransformComponent};
pub use crate::foundation::ids::EntityId;
