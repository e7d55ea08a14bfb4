//! # Scene Core
//!
//! Runtime core of the editor: an entity-component scene model built from
//! JSON scene documents, plus the event bus engine subsystems use to talk to
//! each other without direct references.
//!
//! ## Features
//!
//! - **Component Registry**: type tag to factory mapping for data-driven construction
//! - **Entities**: exclusive ownership of at most one component per type
//! - **Scene Loading**: all-or-nothing materialization with sprite classification
//! - **Event Bus**: queued and immediate delivery with per-listener failure isolation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_core::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = SceneLoader::default();
//!     let scene = loader.load_file("scenes/level_1.json")?;
//!
//!     let bus = EventBus::new();
//!     bus.on(names::SCENE_LOADED, |event| {
//!         log::info!("scene ready: {:?}", event.text(1));
//!         Ok(())
//!     });
//!     bus.emit(names::SCENE_LOADED, vec![scene.id().into(), scene.name().into()]);
//!
//!     // Once per frame
//!     bus.process_events();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod assets;
pub mod events;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{
            ImageData, ImageLoader, MemoryLoader, ResourceError, ResourceLoader, TextureHandle,
        },
        core::config::{
            ApplicationConfig, AssetConfig, Config, ConfigError, EngineConfig, EventBusConfig,
        },
        ecs::{
            Component, ComponentError, ComponentRegistry, ComponentVariant, Entity, EntityId,
            SpriteComponent, SpriteInstance, TextureComponent, TransformComponent,
        },
        events::{names, Event, EventArg, EventBus, ListenerResult, Subscription},
        foundation::math::Vec2,
        scene::{Scene, SceneError, SceneLoader},
    };
}
