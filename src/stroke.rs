//! Recorded pointer strokes, replayed headlessly through the engine.
//!
//! A script is the same stream of per-frame samples the interactive viewer
//! produces, written down as JSON:
//!
//! ```json
//! { "samples": [ { "x": 120.0, "y": 80.5, "tool": "raise", "radius": 30 } ] }
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::brush::BrushSettings;
use crate::engine::{FrameInput, TerrainEngine, ToolMode};

/// One frame of recorded pointer input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeSample {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub tool: ToolMode,
    /// Moves the radius slider for this and all later samples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
    /// Moves the sensitivity slider for this and all later samples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeScript {
    pub samples: Vec<StrokeSample>,
}

/// Outcome of a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Samples whose brush bounding box overlapped the canvas. A disk that
    /// only reaches into a corner of its box may still have painted nothing.
    pub dabs: usize,
    /// Samples with no paint tool or a bounding box entirely off the canvas.
    pub skipped: usize,
}

impl StrokeScript {
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let script: StrokeScript = serde_json::from_str(&text).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid stroke script: {}", e))
        })?;
        info!(path = %path.display(), samples = script.samples.len(), "loaded stroke script");
        Ok(script)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("Serialization failed: {}", e))
        })?;
        fs::write(path, text)
    }

    /// Straight line of evenly spaced samples from `from` to `to`.
    pub fn line(from: (f32, f32), to: (f32, f32), steps: usize, tool: ToolMode) -> Self {
        let steps = steps.max(1);
        let samples = (0..=steps)
            .map(|i| {
                let t = i as f32 / steps as f32;
                StrokeSample {
                    x: from.0 + (to.0 - from.0) * t,
                    y: from.1 + (to.1 - from.1) * t,
                    tool,
                    radius: None,
                    sensitivity: None,
                }
            })
            .collect();
        Self { samples }
    }
}

/// Feed every sample through the engine, one dab per sample.
///
/// `settings` carries the slider state in and out, so slider moves recorded
/// in the script persist after the replay.
pub fn replay(
    engine: &mut TerrainEngine,
    script: &StrokeScript,
    settings: &mut BrushSettings,
) -> ReplayStats {
    let mut stats = ReplayStats::default();
    for sample in &script.samples {
        if let Some(radius) = sample.radius {
            *settings = BrushSettings::new(radius, settings.sensitivity);
        }
        if let Some(sensitivity) = sample.sensitivity {
            *settings = BrushSettings::new(settings.radius, sensitivity);
        }

        let input = FrameInput {
            pointer: Some((sample.x, sample.y)),
            tool: sample.tool,
            settings: *settings,
        };
        match engine.step(&input) {
            Some(_) => stats.dabs += 1,
            None => stats.skipped += 1,
        }
    }
    stats
}
