//! Soft circular brush that raises or lowers the heightmap.
//!
//! Each dab adds `sensitivity * falloff` to every pixel of a discrete disk,
//! where the falloff is a raised cosine: 1 at the center, 0 at the rim.
//! Holding the brush over a spot keeps adding dabs, so heights drift toward
//! 0 or 1 with dwell time.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::tilemap::Tilemap;

// =============================================================================
// SLIDER RANGES
// =============================================================================

/// Radius slider range, in pixels.
pub const RADIUS_MIN: u32 = 5;
pub const RADIUS_MAX: u32 = 150;

/// Sensitivity slider range, before scaling.
pub const SENSITIVITY_MIN: u32 = 5;
pub const SENSITIVITY_MAX: u32 = 50;

/// Slider value to per-dab height delta.
pub const SENSITIVITY_SCALE: f32 = 0.005;

/// Whether a dab pushes terrain up or down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushDirection {
    Raise,
    Lower,
}

impl BrushDirection {
    pub fn sign(self) -> f32 {
        match self {
            BrushDirection::Raise => 1.0,
            BrushDirection::Lower => -1.0,
        }
    }
}

/// Slider state owned by the UI; turned into a [`Brush`] per sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    /// Brush radius in pixels (5-150).
    pub radius: u32,
    /// Raw sensitivity slider value (5-50).
    pub sensitivity: u32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            radius: 40,
            sensitivity: 20,
        }
    }
}

impl BrushSettings {
    pub fn new(radius: u32, sensitivity: u32) -> Self {
        Self {
            radius: radius.clamp(RADIUS_MIN, RADIUS_MAX),
            sensitivity: sensitivity.clamp(SENSITIVITY_MIN, SENSITIVITY_MAX),
        }
    }

    /// Per-dab height delta at the brush center.
    pub fn scaled_sensitivity(&self) -> f32 {
        self.sensitivity as f32 * SENSITIVITY_SCALE
    }

    pub fn adjust_radius(&mut self, delta: i32) {
        self.radius = (self.radius as i64 + delta as i64)
            .clamp(RADIUS_MIN as i64, RADIUS_MAX as i64) as u32;
    }

    pub fn adjust_sensitivity(&mut self, delta: i32) {
        self.sensitivity = (self.sensitivity as i64 + delta as i64)
            .clamp(SENSITIVITY_MIN as i64, SENSITIVITY_MAX as i64) as u32;
    }

    /// A brush for one sample at `center`.
    pub fn brush_at(&self, center: (f32, f32), direction: BrushDirection) -> Brush {
        Brush::new(center, self.radius, self.scaled_sensitivity(), direction)
    }
}

/// One dab of the brush. Built per pointer sample and dropped after use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub center_x: i64,
    pub center_y: i64,
    pub radius: u32,
    pub sensitivity: f32,
    pub direction: BrushDirection,
}

impl Brush {
    /// Canvas coordinates are floored to the pixel they fall in.
    pub fn new(
        center: (f32, f32),
        radius: u32,
        sensitivity: f32,
        direction: BrushDirection,
    ) -> Self {
        Self {
            center_x: center.0.floor() as i64,
            center_y: center.1.floor() as i64,
            radius,
            sensitivity,
            direction,
        }
    }

    /// Signed height delta at `dist` pixels from the center.
    pub fn delta_at(&self, dist: f32) -> f32 {
        self.sensitivity * falloff(dist, self.radius) * self.direction.sign()
    }

    /// Integer offsets `(i, j)` of the disk `i² + j² <= r²`.
    pub fn disk_offsets(&self) -> impl Iterator<Item = (i64, i64)> {
        let r = self.radius as i64;
        let r2 = r * r;
        (-r..=r).flat_map(move |j| {
            (-r..=r)
                .filter(move |i| i * i + j * j <= r2)
                .map(move |i| (i, j))
        })
    }

    /// Apply this dab to the heightmap. Pixels off the canvas are skipped.
    ///
    /// The center saturates at the `i64` range for absurd pointer positions,
    /// so offsets are added with saturation too.
    pub fn paint(&self, heightmap: &mut Tilemap<f32>) {
        for (i, j) in self.disk_offsets() {
            let x = self.center_x.saturating_add(i);
            let y = self.center_y.saturating_add(j);
            let Some((x, y)) = heightmap.position(x, y) else {
                continue;
            };
            let dist = ((i * i + j * j) as f32).sqrt();
            let cell = heightmap.get_mut(x, y);
            *cell = (*cell + self.delta_at(dist)).clamp(0.0, 1.0);
        }
    }
}

/// Raised-cosine falloff: 1 at the center, 0 at `radius`, smooth at both.
///
/// A zero radius is a single-pixel dab at full strength.
pub fn falloff(dist: f32, radius: u32) -> f32 {
    if radius == 0 {
        return if dist == 0.0 { 1.0 } else { 0.0 };
    }
    let d = dist / radius as f32;
    if d > 1.0 {
        return 0.0;
    }
    ((d * PI).cos() + 1.0) * 0.5
}
