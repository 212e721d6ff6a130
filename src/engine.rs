//! The terrain engine: heightmap, band table and the shaded pixel buffer.
//!
//! `paint` and `resync` are the only mutators. A dab is always a paint
//! followed by a resync over the same disk, and the resync never strays
//! outside that disk's bounding box, so per-sample cost stays O(radius²)
//! whatever the canvas size.

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::brush::{Brush, BrushDirection, BrushSettings};
use crate::terrain::BandTable;
use crate::tilemap::Tilemap;

/// Which tool the pointer is driving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// "Landmass"
    #[default]
    Raise,
    /// "Water"
    Lower,
    Inactive,
}

impl ToolMode {
    pub fn direction(self) -> Option<BrushDirection> {
        match self {
            ToolMode::Raise => Some(BrushDirection::Raise),
            ToolMode::Lower => Some(BrushDirection::Lower),
            ToolMode::Inactive => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolMode::Raise => "Raise landmass",
            ToolMode::Lower => "Lower landmass",
            ToolMode::Inactive => "No tool",
        }
    }
}

/// One frame of input from the pointer-tracking side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Current pointer position in canvas pixels, if the pointer is down.
    pub pointer: Option<(f32, f32)>,
    pub tool: ToolMode,
    pub settings: BrushSettings,
}

/// Inclusive pixel rectangle rewritten by a resync.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

impl Region {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

pub struct TerrainEngine {
    heightmap: Tilemap<f32>,
    pixels: RgbaImage,
    bands: BandTable,
}

impl TerrainEngine {
    /// Flat canvas (height 0.0 everywhere) with the stock palette.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_bands(width, height, BandTable::default())
    }

    pub fn with_bands(width: u32, height: u32, bands: BandTable) -> Self {
        let heightmap = Tilemap::new_with(width as usize, height as usize, 0.0f32);
        let [r, g, b] = bands.base_color();
        let pixels = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));
        Self {
            heightmap,
            pixels,
            bands,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The composite buffer, always current as of the last resync.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn heightmap(&self) -> &Tilemap<f32> {
        &self.heightmap
    }

    pub fn bands(&self) -> &BandTable {
        &self.bands
    }

    pub fn height_at(&self, x: u32, y: u32) -> Option<f32> {
        self.heightmap.try_get(x as i64, y as i64).copied()
    }

    /// Apply one dab to the heightmap. The pixel buffer is not touched.
    pub fn paint(&mut self, brush: &Brush) {
        brush.paint(&mut self.heightmap);
    }

    /// Recolor the disk of `radius` around `center` from the current heights.
    ///
    /// Returns the clipped bounding box, or `None` when it is entirely off
    /// the canvas.
    pub fn resync(&mut self, center: (i64, i64), radius: u32) -> Option<Region> {
        let (cx, cy) = center;
        let r = radius as i64;
        let x_min = cx.saturating_sub(r).max(0);
        let x_max = cx.saturating_add(r).min(self.width() as i64 - 1);
        let y_min = cy.saturating_sub(r).max(0);
        let y_max = cy.saturating_add(r).min(self.height() as i64 - 1);
        if x_min > x_max || y_min > y_max {
            return None;
        }

        let r2 = r * r;
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = x - cx;
                let dy = y - cy;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let h = *self.heightmap.get(x as usize, y as usize);
                let band = self.bands.classify(h);
                let [red, green, blue] = band.color_at(h);
                self.pixels.put_pixel(x as u32, y as u32, Rgba([red, green, blue, 255]));
            }
        }

        Some(Region {
            x_min: x_min as u32,
            y_min: y_min as u32,
            x_max: x_max as u32,
            y_max: y_max as u32,
        })
    }

    /// Paint then resync the same disk.
    pub fn apply_dab(&mut self, brush: &Brush) -> Option<Region> {
        self.paint(brush);
        let region = self.resync((brush.center_x, brush.center_y), brush.radius);
        debug!(
            x = brush.center_x,
            y = brush.center_y,
            radius = brush.radius,
            ?region,
            "dab"
        );
        region
    }

    /// At most one dab per frame: only while the pointer is down with a
    /// paint tool selected.
    pub fn step(&mut self, input: &FrameInput) -> Option<Region> {
        let pointer = input.pointer?;
        let direction = input.tool.direction()?;
        let brush = input.settings.brush_at(pointer, direction);
        self.apply_dab(&brush)
    }
}
