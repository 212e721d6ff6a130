use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use tracing::info;

use crate::engine::TerrainEngine;
use crate::terrain::BandTable;
use crate::tilemap::Tilemap;

/// Default file name for a saved map.
pub const DEFAULT_MAP_PATH: &str = "myMap.png";

/// Save the shaded terrain buffer as a PNG.
pub fn export_composite(engine: &TerrainEngine, path: &Path) -> Result<(), image::ImageError> {
    engine.pixels().save(path)?;
    info!(path = %path.display(), "exported map");
    Ok(())
}

/// Render raw heights with the spectral colormap.
/// Heights are already in [0, 1], so no renormalization is applied.
pub fn render_heightmap(heightmap: &Tilemap<f32>) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(heightmap.width as u32, heightmap.height as u32);
    for (x, y, &h) in heightmap.iter() {
        img.put_pixel(x as u32, y as u32, Rgb(spectral_colormap(h.clamp(0.0, 1.0))));
    }
    img
}

/// Export the raw heightmap for debugging.
pub fn export_heightmap(heightmap: &Tilemap<f32>, path: &Path) -> Result<(), image::ImageError> {
    render_heightmap(heightmap).save(path)?;
    info!(path = %path.display(), "exported heightmap");
    Ok(())
}

/// Spectral colormap (matplotlib style): dark blue -> cyan -> green -> yellow -> orange -> red
fn spectral_colormap(t: f32) -> [u8; 3] {
    let colors: [[f32; 3]; 11] = [
        [0.37, 0.31, 0.64],  // Dark blue/purple (low)
        [0.20, 0.53, 0.74],  // Blue
        [0.40, 0.76, 0.65],  // Teal
        [0.67, 0.87, 0.64],  // Light green
        [0.90, 0.96, 0.60],  // Yellow-green
        [1.00, 1.00, 0.75],  // Light yellow / white
        [1.00, 0.88, 0.55],  // Yellow
        [0.99, 0.68, 0.38],  // Light orange
        [0.96, 0.43, 0.26],  // Orange
        [0.84, 0.24, 0.31],  // Red
        [0.62, 0.00, 0.26],  // Dark red (high)
    ];

    let t_scaled = t * 10.0;
    let idx = (t_scaled as usize).min(9);
    let frac = t_scaled - idx as f32;

    let c1 = colors[idx];
    let c2 = colors[idx + 1];

    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}

/// Horizontal gradient of the palette across heights 0..1, with a dark tick
/// at each band boundary along the bottom edge.
pub fn render_band_swatch(bands: &BandTable, width: u32, height: u32) -> RgbImage {
    let width = width.max(2);
    let height = height.max(1);
    let tick_height = (height / 8).max(1);
    let mut img: RgbImage = ImageBuffer::new(width, height);

    for x in 0..width {
        let h = x as f32 / (width - 1) as f32;
        let color = bands.color_for_height(h);
        for y in 0..height {
            img.put_pixel(x, y, Rgb(color));
        }
    }

    for band in &bands.bands()[1..] {
        let x = (band.min_height * (width - 1) as f32).round() as u32;
        for y in height - tick_height..height {
            img.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{Brush, BrushDirection};

    #[test]
    fn test_export_composite_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");

        let mut engine = TerrainEngine::new(40, 30);
        engine.apply_dab(&Brush::new((20.0, 15.0), 8, 0.25, BrushDirection::Raise));
        export_composite(&engine, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (40, 30));
        assert_eq!(&loaded, engine.pixels());
    }

    #[test]
    fn test_heightmap_render_extremes() {
        let mut hm = Tilemap::new_with(2, 1, 0.0f32);
        hm.set(1, 0, 1.0);
        let img = render_heightmap(&hm);
        assert_eq!(img.get_pixel(0, 0).0, spectral_colormap(0.0));
        assert_eq!(img.get_pixel(1, 0).0, spectral_colormap(1.0));
        assert_ne!(img.get_pixel(0, 0), img.get_pixel(1, 0));
    }

    #[test]
    fn test_export_heightmap_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heights.png");
        export_heightmap(&Tilemap::new_with(8, 4, 0.5f32), &path).unwrap();
        assert_eq!(image::open(&path).unwrap().to_rgb8().dimensions(), (8, 4));
    }

    #[test]
    fn test_swatch_ends_match_palette() {
        let bands = BandTable::default();
        let img = render_band_swatch(&bands, 101, 16);
        assert_eq!(img.get_pixel(0, 0).0, bands.base_color());
        assert_eq!(img.get_pixel(100, 0).0, bands.color_for_height(1.0));
        // tick under the water/sand boundary at h = 0.5
        assert_eq!(img.get_pixel(50, 15).0, [0, 0, 0]);
    }
}
