//! Sketch configuration: canvas size, brush defaults and palette.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::brush::BrushSettings;
use crate::export::DEFAULT_MAP_PATH;
use crate::terrain::{default_bands, BandTable, PaletteError, TerrainBand};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Canvas width in pixels (default: 800).
    pub width: u32,

    /// Canvas height in pixels (default: 700).
    pub height: u32,

    /// Initial slider positions.
    pub brush: BrushSettings,

    /// Terrain bands, lowest first. Must partition [0, 1] into four ranges.
    pub palette: Vec<TerrainBand>,

    /// Where the save key writes the map.
    pub output: String,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 700,
            brush: BrushSettings::default(),
            palette: default_bands(),
            output: DEFAULT_MAP_PATH.to_string(),
        }
    }
}

impl SketchConfig {
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: SketchConfig = serde_json::from_str(&text).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid config: {}", e))
        })?;
        info!(
            path = %path.display(),
            width = config.width,
            height = config.height,
            "loaded config"
        );
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("Serialization failed: {}", e))
        })?;
        fs::write(path, text)
    }

    /// Validated band table built from `palette`.
    pub fn band_table(&self) -> Result<BandTable, PaletteError> {
        BandTable::new(self.palette.clone())
    }

    /// Slider values pulled back into their ranges.
    pub fn brush_settings(&self) -> BrushSettings {
        BrushSettings::new(self.brush.radius, self.brush.sensitivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_canvas() {
        let config = SketchConfig::default();
        assert_eq!((config.width, config.height), (800, 700));
        assert_eq!(config.output, "myMap.png");
        assert_eq!(config.band_table().unwrap(), BandTable::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SketchConfig =
            serde_json::from_str(r#"{ "width": 320, "brush": { "radius": 999 } }"#).unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 700);
        assert_eq!(config.brush.sensitivity, 20);
        assert_eq!(config.brush_settings().radius, 150);
        assert_eq!(config.palette.len(), 4);
    }

    #[test]
    fn test_bad_palette_is_reported() {
        let mut config = SketchConfig::default();
        config.palette.truncate(2);
        assert_eq!(config.band_table(), Err(PaletteError::WrongBandCount(2)));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketch.json");
        let mut config = SketchConfig::default();
        config.width = 256;
        config.palette[1].skew = 0.1;
        config.save(&path).unwrap();
        assert_eq!(SketchConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SketchConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
