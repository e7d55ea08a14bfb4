//! Image loading utilities for texture data
//!
//! Provides PNG loading for the texture system, plus an in-memory loader for
//! embedded resources and tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::assets::{ResourceError, ResourceLoader, TextureHandle};
use crate::core::config::AssetConfig;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (typically 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref).map_err(|e| ResourceError::LoadFailed {
            path: path_ref.display().to_string(),
            reason: e.to_string(),
        })?;

        // Convert to RGBA8 format (standard for GPU upload)
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4, // RGBA
        })
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ResourceError> {
        let img = image::load_from_memory(bytes).map_err(|e| ResourceError::LoadFailed {
            path: "<memory>".to_string(),
            reason: e.to_string(),
        })?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Loaded image {}x{} from memory", width, height);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Loads textures from disk relative to an assets directory
#[derive(Debug, Clone)]
pub struct ImageLoader {
    assets: AssetConfig,
}

impl ImageLoader {
    /// Create a loader resolving paths with the given asset configuration
    pub fn new(assets: AssetConfig) -> Self {
        Self { assets }
    }

    /// Create a loader rooted at `dir`
    pub fn with_root(dir: impl Into<String>) -> Self {
        Self::new(AssetConfig::new().with_assets_dir(dir))
    }

    /// Full path a texture path resolves to
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.assets.resolve(path)
    }
}

impl ResourceLoader for ImageLoader {
    async fn load_texture(&self, path: &str) -> Result<TextureHandle, ResourceError> {
        let full_path = self.resolve(path);
        if !full_path.exists() {
            return Err(ResourceError::NotFound(full_path.display().to_string()));
        }
        ImageData::from_file(&full_path).map(Rc::new)
    }
}

/// Serves textures registered ahead of time
///
/// Counts every request so callers can verify handle caching.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    textures: RefCell<HashMap<String, TextureHandle>>,
    requests: Cell<usize>,
}

impl MemoryLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register image data under a path
    pub fn insert(&self, path: impl Into<String>, image: ImageData) {
        self.textures.borrow_mut().insert(path.into(), Rc::new(image));
    }

    /// Decode encoded image bytes and register them under a path
    pub fn insert_bytes(&self, path: impl Into<String>, bytes: &[u8]) -> Result<(), ResourceError> {
        self.insert(path, ImageData::from_bytes(bytes)?);
        Ok(())
    }

    /// Number of `load_texture` calls served so far
    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

impl ResourceLoader for MemoryLoader {
    async fn load_texture(&self, path: &str) -> Result<TextureHandle, ResourceError> {
        self.requests.set(self.requests.get() + 1);
        self.textures
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(image: &ImageData) -> Vec<u8> {
        let buffer =
            image::RgbaImage::from_raw(image.width, image.height, image.data.clone()).unwrap();
        let mut bytes = std::io::Cursor::new(Vec::new());
        buffer.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.channels, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4); // 4x4 pixels, 4 bytes each

        // Check first pixel is red
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_from_bytes_decodes_png() {
        let original = ImageData::solid_color(3, 2, [10, 20, 30, 255]);
        let decoded = ImageData::from_bytes(&encode_png(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = ImageData::from_bytes(b"not an image");
        assert!(matches!(result, Err(ResourceError::LoadFailed { .. })));
    }

    #[test]
    fn test_image_loader_reads_from_assets_dir() {
        let dir = tempfile::tempdir().unwrap();
        let original = ImageData::solid_color(2, 2, [0, 255, 0, 255]);
        std::fs::write(dir.path().join("hero.png"), encode_png(&original)).unwrap();

        let loader = ImageLoader::with_root(dir.path().to_str().unwrap());
        let handle = pollster::block_on(loader.load_texture("hero.png")).unwrap();
        assert_eq!(*handle, original);

        let missing = pollster::block_on(loader.load_texture("villain.png"));
        assert!(matches!(missing, Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryLoader::new();
        loader.insert("a.png", ImageData::solid_color(1, 1, [0, 0, 0, 255]));

        assert!(pollster::block_on(loader.load_texture("a.png")).is_ok());
        assert!(pollster::block_on(loader.load_texture("b.png")).is_err());
        assert_eq!(loader.requests(), 2);
    }
}
