// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Renderer configuration loaded from RON files.
//!
//! Every field has a default, so a configuration file only needs to name the
//! values it changes:
//!
//! ```
//! use lumen_core::config::RenderConfig;
//! use lumen_core::renderer::FilterType;
//!
//! let config = RenderConfig::from_ron_str("(textures: (filter: Trilinear))").unwrap();
//! assert_eq!(config.textures.filter, FilterType::Trilinear);
//! assert!(config.textures.mipmap);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::renderer::light::LightKind;
use crate::renderer::texture::{FilterType, WrapMode};

/// An error raised while loading a [`RenderConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read configuration file {path}: {source}")]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not valid RON for a [`RenderConfig`].
    #[error("invalid configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// The configuration could not be written back out as RON.
    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] ron::Error),
}

/// Settings applied to textures created by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureDefaults {
    /// The filter quality.
    pub filter: FilterType,
    /// Whether mip chains are generated.
    pub mipmap: bool,
    /// The requested anisotropy. `1.0` disables it.
    pub max_anisotropy: f32,
    /// The S-axis wrap mode. `None` keeps the texture kind's default.
    pub wrap_s: Option<WrapMode>,
    /// The T-axis wrap mode. `None` keeps the texture kind's default.
    pub wrap_t: Option<WrapMode>,
    /// Whether face data is dropped once uploaded.
    pub recycle: bool,
}

impl Default for TextureDefaults {
    fn default() -> Self {
        Self {
            filter: FilterType::Bilinear,
            mipmap: true,
            max_anisotropy: 1.0,
            wrap_s: None,
            wrap_t: None,
            recycle: false,
        }
    }
}

/// Settings used to seed new light sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightDefaults {
    /// The light kind.
    pub kind: LightKind,
    /// The linear RGB color.
    pub color: [f32; 3],
    /// The intensity.
    pub power: f32,
    /// Whether the light follows its owning object's transform.
    pub use_object_transform: bool,
}

impl Default for LightDefaults {
    fn default() -> Self {
        Self {
            kind: LightKind::Directional,
            color: [1.0, 1.0, 1.0],
            power: 0.5,
            use_object_transform: false,
        }
    }
}

/// The top-level renderer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Texture settings.
    pub textures: TextureDefaults,
    /// Light settings.
    pub light: LightDefaults,
}

impl RenderConfig {
    /// Parses a configuration from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&text)?;
        log::debug!("Loaded render configuration from {}", path.display());
        Ok(config)
    }

    /// Writes the configuration as pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RenderConfig::from_ron_str("()").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.light.power, 0.5);
        assert_eq!(config.textures.max_anisotropy, 1.0);
    }

    #[test]
    fn test_partial_config() {
        let text = r#"(
            textures: (
                filter: Nearest,
                wrap_s: Some(MirroredRepeat),
                recycle: true,
            ),
            light: (
                kind: Spot,
                color: (1.0, 0.5, 0.25),
            ),
        )"#;
        let config = RenderConfig::from_ron_str(text).unwrap();
        assert_eq!(config.textures.filter, FilterType::Nearest);
        assert_eq!(config.textures.wrap_s, Some(WrapMode::MirroredRepeat));
        assert_eq!(config.textures.wrap_t, None);
        assert!(config.textures.recycle);
        assert_eq!(config.light.kind, LightKind::Spot);
        assert_eq!(config.light.color, [1.0, 0.5, 0.25]);
        assert_eq!(config.light.power, 0.5);
    }

    #[test]
    fn test_invalid_config_is_a_parse_error() {
        let result = RenderConfig::from_ron_str("(textures: (filter: Bicubic))");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = RenderConfig::load("does/not/exist.ron");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_pretty_output_parses_back() {
        let mut config = RenderConfig::default();
        config.light.kind = LightKind::Point;
        let text = config.to_ron_string().unwrap();
        assert_eq!(RenderConfig::from_ron_str(&text).unwrap(), config);
    }
}
