//! Terrain bands: height ranges that map a scalar height to a color.
//!
//! The palette is a fixed table of four contiguous bands covering [0, 1].
//! Inside a band the color is a per-channel lerp between the band's two
//! endpoint colors, bent by a parabolic `skew` term so the ramp does not look
//! mechanically linear.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of bands a palette must have.
pub const BAND_COUNT: usize = 4;

const BOUNDARY_EPSILON: f32 = 1e-6;

/// One height range of the palette.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainBand {
    pub name: String,
    pub min_height: f32,
    pub max_height: f32,
    pub min_color: [u8; 3],
    pub max_color: [u8; 3],
    /// Bias of the interpolation curve: positive reaches `max_color` early,
    /// negative holds on to `min_color`. 0 is linear.
    #[serde(default)]
    pub skew: f32,
}

impl TerrainBand {
    pub fn new(
        name: &str,
        min_height: f32,
        max_height: f32,
        min_color: [u8; 3],
        max_color: [u8; 3],
        skew: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            min_height,
            max_height,
            min_color,
            max_color,
            skew,
        }
    }

    /// Color of height `h` inside this band.
    pub fn color_at(&self, h: f32) -> [u8; 3] {
        let f = (h - self.min_height) / (self.max_height - self.min_height);
        // f * (1 - f) vanishes at both ends, so the endpoints stay exact
        let f = (f + self.skew * f * (1.0 - f)).clamp(0.0, 1.0);

        [
            lerp_channel(self.min_color[0], self.max_color[0], f),
            lerp_channel(self.min_color[1], self.max_color[1], f),
            lerp_channel(self.min_color[2], self.max_color[2], f),
        ]
    }
}

fn lerp_channel(a: u8, b: u8, f: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + (b - a) * f).round().clamp(0.0, 255.0) as u8
}

/// Reasons a palette is rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum PaletteError {
    WrongBandCount(usize),
    DoesNotStartAtZero(f32),
    DoesNotEndAtOne(f32),
    EmptyBand { name: String },
    Gap { below: String, above: String },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::WrongBandCount(n) => {
                write!(f, "palette needs exactly {} bands, got {}", BAND_COUNT, n)
            }
            PaletteError::DoesNotStartAtZero(h) => {
                write!(f, "first band starts at {} instead of 0.0", h)
            }
            PaletteError::DoesNotEndAtOne(h) => write!(f, "last band ends at {} instead of 1.0", h),
            PaletteError::EmptyBand { name } => write!(f, "band '{}' has an empty range", name),
            PaletteError::Gap { below, above } => {
                write!(f, "bands '{}' and '{}' are not contiguous", below, above)
            }
        }
    }
}

impl std::error::Error for PaletteError {}

/// The ordered, validated band table.
#[derive(Clone, Debug, PartialEq)]
pub struct BandTable {
    bands: Vec<TerrainBand>,
}

impl BandTable {
    /// Build a table, checking that the bands partition [0, 1].
    pub fn new(bands: Vec<TerrainBand>) -> Result<Self, PaletteError> {
        if bands.len() != BAND_COUNT {
            return Err(PaletteError::WrongBandCount(bands.len()));
        }
        let first = &bands[0];
        if first.min_height.abs() > BOUNDARY_EPSILON {
            return Err(PaletteError::DoesNotStartAtZero(first.min_height));
        }
        let last = &bands[BAND_COUNT - 1];
        if (last.max_height - 1.0).abs() > BOUNDARY_EPSILON {
            return Err(PaletteError::DoesNotEndAtOne(last.max_height));
        }
        for band in &bands {
            if band.max_height <= band.min_height {
                return Err(PaletteError::EmptyBand { name: band.name.clone() });
            }
        }
        for pair in bands.windows(2) {
            if (pair[0].max_height - pair[1].min_height).abs() > BOUNDARY_EPSILON {
                return Err(PaletteError::Gap {
                    below: pair[0].name.clone(),
                    above: pair[1].name.clone(),
                });
            }
        }
        Ok(Self { bands })
    }

    pub fn bands(&self) -> &[TerrainBand] {
        &self.bands
    }

    /// The band whose range contains `h`.
    ///
    /// Ranges are half-open except the last one, which is closed at 1.0.
    /// Heights must already be clamped to [0, 1].
    pub fn classify(&self, h: f32) -> &TerrainBand {
        debug_assert!((0.0..=1.0).contains(&h), "height {} outside [0, 1]", h);
        let last = self.bands.len() - 1;
        self.bands[..last]
            .iter()
            .find(|band| h < band.max_height)
            .unwrap_or(&self.bands[last])
    }

    /// Classify then interpolate.
    pub fn color_for_height(&self, h: f32) -> [u8; 3] {
        let h = h.clamp(0.0, 1.0);
        self.classify(h).color_at(h)
    }

    /// Color of an untouched pixel (height 0.0).
    pub fn base_color(&self) -> [u8; 3] {
        self.bands[0].min_color
    }
}

/// The stock palette: water, sand, grass, trees.
pub fn default_bands() -> Vec<TerrainBand> {
    vec![
        TerrainBand::new("water", 0.0, 0.5, [30, 176, 251], [40, 255, 255], 0.0),
        TerrainBand::new("sand", 0.5, 0.65, [215, 192, 158], [255, 246, 193], 0.3),
        TerrainBand::new("grass", 0.65, 0.9, [118, 239, 124], [2, 166, 155], 0.0),
        TerrainBand::new("trees", 0.9, 1.0, [10, 145, 113], [20, 155, 120], -0.5),
    ]
}

impl Default for BandTable {
    fn default() -> Self {
        Self { bands: default_bands() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_band_boundaries() {
        let table = BandTable::default();
        assert_eq!(table.classify(0.0).name, "water");
        assert_eq!(table.classify(0.4999).name, "water");
        assert_eq!(table.classify(0.5).name, "sand");
        assert_eq!(table.classify(0.65).name, "grass");
        assert_eq!(table.classify(0.9).name, "trees");
        assert_eq!(table.classify(1.0).name, "trees");
    }

    #[test]
    fn test_classify_covers_unit_interval() {
        let table = BandTable::default();
        for i in 0..=1000 {
            let h = i as f32 / 1000.0;
            let band = table.classify(h);
            let inside = h >= band.min_height
                && (h < band.max_height || (band.name == "trees" && h <= band.max_height));
            assert!(inside, "h = {} landed in {}", h, band.name);
        }
    }

    #[test]
    fn test_endpoints_are_exact_for_any_skew() {
        for skew in [-1.0, -0.5, 0.0, 0.3, 1.0] {
            for band in default_bands() {
                let band = TerrainBand { skew, ..band };
                let label = format!("{} skew {}", band.name, skew);
                assert_eq!(band.color_at(band.min_height), band.min_color, "{}", label);
                assert_eq!(band.color_at(band.max_height), band.max_color, "{}", label);
            }
        }
    }

    #[test]
    fn test_linear_midpoint() {
        let water = &default_bands()[0];
        // f = 0.5 -> halfway between (30,176,251) and (40,255,255)
        assert_eq!(water.color_at(0.25), [35, 216, 253]);
    }

    #[test]
    fn test_skew_biases_midpoint() {
        let base = TerrainBand::new("ramp", 0.0, 1.0, [0, 0, 0], [200, 200, 200], 0.0);
        let early = TerrainBand { skew: 0.5, ..base.clone() };
        let late = TerrainBand { skew: -0.5, ..base.clone() };
        // f' = 0.5 +/- 0.5 * 0.25
        assert_eq!(base.color_at(0.5), [100, 100, 100]);
        assert_eq!(early.color_at(0.5), [125, 125, 125]);
        assert_eq!(late.color_at(0.5), [75, 75, 75]);
    }

    #[test]
    fn test_color_for_height_in_tree_band() {
        let table = BandTable::default();
        assert_eq!(table.color_for_height(1.0), [20, 155, 120]);
        assert_eq!(table.color_for_height(0.9), [10, 145, 113]);
        assert_eq!(table.base_color(), [30, 176, 251]);
    }

    #[test]
    fn test_rejects_wrong_band_count() {
        let mut bands = default_bands();
        bands.pop();
        assert_eq!(BandTable::new(bands), Err(PaletteError::WrongBandCount(3)));
    }

    #[test]
    fn test_rejects_gap_between_bands() {
        let mut bands = default_bands();
        bands[2].min_height = 0.7;
        let err = BandTable::new(bands).unwrap_err();
        assert_eq!(
            err,
            PaletteError::Gap { below: "sand".to_string(), above: "grass".to_string() }
        );
        assert!(err.to_string().contains("not contiguous"));
    }

    #[test]
    fn test_rejects_bad_outer_bounds() {
        let mut bands = default_bands();
        bands[0].min_height = 0.1;
        assert!(matches!(BandTable::new(bands), Err(PaletteError::DoesNotStartAtZero(_))));

        let mut bands = default_bands();
        bands[3].max_height = 0.95;
        assert!(matches!(BandTable::new(bands), Err(PaletteError::DoesNotEndAtOne(_))));
    }

    #[test]
    fn test_rejects_empty_band() {
        let mut bands = default_bands();
        bands[1].max_height = 0.5;
        bands[2].min_height = 0.5;
        assert_eq!(
            BandTable::new(bands),
            Err(PaletteError::EmptyBand { name: "sand".to_string() })
        );
    }
}
