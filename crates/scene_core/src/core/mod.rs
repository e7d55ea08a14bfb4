//! # Core Engine Module
//!
//! Shared configuration for the scene runtime. The individual subsystems
//! (events, scene loading, assets) each read their own section.

pub mod config;

pub use config::{
    ApplicationConfig,
    EngineConfig,
    AssetConfig,
    EventBusConfig,
    Config,
    ConfigError,
};
