//! Asset management system
//!
//! Texture bytes are acquired through a [`ResourceLoader`]. The scene core
//! only defines the contract; components call it from their async `load()`
//! and cache the resulting [`TextureHandle`].

pub mod image_loader;

pub use image_loader::{ImageData, ImageLoader, MemoryLoader};

use std::rc::Rc;
use thiserror::Error;

/// Shared handle to a loaded texture
pub type TextureHandle = Rc<ImageData>;

/// Resource loading errors
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource exists at the given path
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The resource exists but could not be decoded
    #[error("Failed to load '{path}': {reason}")]
    LoadFailed {
        /// Path that was requested
        path: String,
        /// Decoder or IO message
        reason: String,
    },

    /// A handle was requested before `load()` completed
    #[error("Resource not loaded: {0}")]
    NotLoaded(String),
}

/// Backend that turns a resource path into a loaded texture
///
/// Implementations may suspend while fetching bytes. There is no cancellation;
/// a caller that abandons a load simply drops the future.
#[allow(async_fn_in_trait)]
pub trait ResourceLoader {
    /// Load the texture stored at `path`
    async fn load_texture(&self, path: &str) -> Result<TextureHandle, ResourceError>;
}
