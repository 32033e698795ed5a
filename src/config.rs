//! User-tunable settings, loadable from JSON.

use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::vectorize::DEFAULT_THRESHOLD;

/// Width in pixels of gallery thumbnails
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 192;

/// Settings for turning an image into an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old files
pub struct DigitizeConfig {
    /// Pixels with luminance below this are ink
    pub threshold: u8,
    /// Background fill of exported documents; `None` leaves them transparent
    #[serde(with = "hex_color::option")]
    pub background: Option<Color32>,
    pub thumbnail_width: u32,
    pub brush: BrushSettings,
}

impl Default for DigitizeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            background: None,
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            brush: BrushSettings::default(),
        }
    }
}

impl DigitizeConfig {
    /// Read a JSON config file; missing fields fall back to defaults
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.thumbnail_width == 0 {
            return Err(ConfigError::Invalid(
                "thumbnail_width must be at least 1".to_owned(),
            ));
        }
        Ok(config)
    }
}

/// Pen used for freehand strokes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    #[serde(with = "hex_color")]
    pub color: Color32,
    pub width: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(0x11, 0x11, 0x11),
            width: 4.0,
        }
    }
}

/// `#rrggbb` / `#rrggbbaa` (de)serialization for colors
pub mod hex_color {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::svg::{color_to_hex, parse_hex_color};

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color_to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hex_color(&s).ok_or_else(|| D::Error::custom(format!("invalid color: {s}")))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            color: &Option<Color32>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match color {
                Some(c) => super::serialize(c, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Color32>, D::Error> {
            let s: Option<String> = Option::deserialize(deserializer)?;
            s.map(|s| parse_hex_color(&s).ok_or_else(|| D::Error::custom(format!("invalid color: {s}"))))
                .transpose()
        }
    }
}
