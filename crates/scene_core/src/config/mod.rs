//! Configuration file handling
//!
//! Settings files are TOML or RON; the format is picked from the file
//! extension. Errors carry the offending path so a host can report which file
//! was wrong.

use std::fmt;
use std::path::{Path, PathBuf};

pub use serde::{Deserialize, Serialize};

/// Supported settings file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Format implied by the extension of `path`, compared case-insensitively
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if extension.eq_ignore_ascii_case("ron") {
            Some(Self::Ron)
        } else {
            None
        }
    }

    fn parse<T: for<'de> Deserialize<'de>>(self, text: &str) -> Result<T, String> {
        match self {
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            Self::Ron => ron::from_str(text).map_err(|e| e.to_string()),
        }
    }

    fn render<T: Serialize>(self, value: &T) -> Result<String, String> {
        match self {
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
                .map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => f.write_str("TOML"),
            Self::Ron => f.write_str("RON"),
        }
    }
}

/// A settings struct stored in a TOML or RON file
///
/// Missing keys fall back to `Default` when the implementor uses
/// `#[serde(default)]`.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Read and parse the file at `path`
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = format_of(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = format.parse(&text).map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            reason,
        })?;
        log::debug!("Loaded {} settings from '{}'", format, path.display());
        Ok(config)
    }

    /// Write this configuration to `path`, in the format its extension names
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let format = format_of(path)?;
        let text = format.render(self).map_err(|reason| ConfigError::Serialize {
            path: path.to_path_buf(),
            format,
            reason,
        })?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn format_of(path: &Path) -> Result<ConfigFormat, ConfigError> {
    ConfigFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The settings file could not be read or written
    #[error("Failed to access settings file '{}': {source}", .path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not valid for its format
    #[error("Failed to parse {format} settings '{}': {reason}", .path.display())]
    Parse {
        /// File path
        path: PathBuf,
        /// Format chosen from the extension
        format: ConfigFormat,
        /// Parser message
        reason: String,
    },

    /// The settings could not be rendered
    #[error("Failed to write {format} settings '{}': {reason}", .path.display())]
    Serialize {
        /// File path
        path: PathBuf,
        /// Format chosen from the extension
        format: ConfigFormat,
        /// Serializer message
        reason: String,
    },

    /// The extension names neither TOML nor RON
    #[error("Unsupported settings format: '{}' (expected .toml or .ron)", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        let format = |path: &str| ConfigFormat::from_path(Path::new(path));
        assert_eq!(format("viewer.toml"), Some(ConfigFormat::Toml));
        assert_eq!(format("dir/viewer.RON"), Some(ConfigFormat::Ron));
        assert_eq!(format("viewer.yaml"), None);
        assert_eq!(format("toml"), None);
    }

    #[test]
    fn test_errors_name_the_file() {
        let err = format_of(Path::new("settings/app.json")).unwrap_err();
        assert!(err.to_string().contains("settings/app.json"));
    }
}
