use std::error::Error;
use std::path::Path;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::brush::BrushSettings;
use crate::config::SketchConfig;
use crate::engine::{FrameInput, TerrainEngine, ToolMode};
use crate::export;

const RADIUS_STEP: i32 = 5;
const SENSITIVITY_STEP: i32 = 5;
const PREVIEW_COLOR: u32 = 0x00FF_FFFF;
const HEIGHTMAP_PATH: &str = "heightmap.png";

/// Run the interactive sketch window until Escape or close.
///
/// Hold the left mouse button to paint. 1: raise, 2: lower, 0: no tool,
/// [ and ]: brush size, - and =: sensitivity, S: save map, H: save heightmap.
pub fn run_viewer(mut engine: TerrainEngine, config: &SketchConfig) -> Result<(), Box<dyn Error>> {
    let width = engine.width() as usize;
    let height = engine.height() as usize;

    // Small canvases are scaled up to ~900 pixels on the larger side
    let target_size = 900;
    let scale = if width.max(height) >= target_size {
        1
    } else {
        (target_size / width.max(height).max(1)).max(1)
    };
    let window_width = width * scale;
    let window_height = height * scale;

    let mut settings = config.brush_settings();
    let mut tool = ToolMode::Raise;

    let mut window = Window::new(
        &window_title(tool, &settings),
        window_width,
        window_height,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    println!("Sketch started ({}x{}). Controls:", width, height);
    println!("  Left mouse: paint with the current tool");
    println!("  1: Raise landmass   2: Lower landmass   0: No tool");
    println!("  [ / ]: Brush size   - / =: Sensitivity");
    println!("  S: Save map   H: Save heightmap   Esc: Exit");

    let mut buffer = vec![0u32; window_width * window_height];

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mut title_dirty = false;

        let new_tool = if window.is_key_pressed(Key::Key1, KeyRepeat::No) {
            Some(ToolMode::Raise)
        } else if window.is_key_pressed(Key::Key2, KeyRepeat::No) {
            Some(ToolMode::Lower)
        } else if window.is_key_pressed(Key::Key0, KeyRepeat::No) {
            Some(ToolMode::Inactive)
        } else {
            None
        };
        if let Some(new_tool) = new_tool {
            if new_tool != tool {
                tool = new_tool;
                title_dirty = true;
            }
        }

        let before = settings;
        if window.is_key_pressed(Key::LeftBracket, KeyRepeat::Yes) {
            settings.adjust_radius(-RADIUS_STEP);
        }
        if window.is_key_pressed(Key::RightBracket, KeyRepeat::Yes) {
            settings.adjust_radius(RADIUS_STEP);
        }
        if window.is_key_pressed(Key::Minus, KeyRepeat::Yes) {
            settings.adjust_sensitivity(-SENSITIVITY_STEP);
        }
        if window.is_key_pressed(Key::Equal, KeyRepeat::Yes) {
            settings.adjust_sensitivity(SENSITIVITY_STEP);
        }
        title_dirty |= settings != before;

        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            let path = Path::new(&config.output);
            match export::export_composite(&engine, path) {
                Ok(()) => println!("Saved map to {}", path.display()),
                Err(e) => eprintln!("Failed to save map: {}", e),
            }
        }
        if window.is_key_pressed(Key::H, KeyRepeat::No) {
            let path = Path::new(HEIGHTMAP_PATH);
            match export::export_heightmap(engine.heightmap(), path) {
                Ok(()) => println!("Saved heightmap to {}", path.display()),
                Err(e) => eprintln!("Failed to save heightmap: {}", e),
            }
        }

        if title_dirty {
            window.set_title(&window_title(tool, &settings));
        }

        let cursor = window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(mx, my)| (mx / scale as f32, my / scale as f32));
        let pointer = if window.get_mouse_down(MouseButton::Left) { cursor } else { None };

        engine.step(&FrameInput { pointer, tool, settings });

        // Full blit every frame; only the dab region was recomputed
        blit(&engine, scale, &mut buffer, window_width);
        if let (Some(center), Some(_)) = (cursor, tool.direction()) {
            draw_circle_outline(
                &mut buffer,
                window_width,
                window_height,
                center,
                settings.radius,
                scale,
            );
        }

        window.update_with_buffer(&buffer, window_width, window_height)?;
    }

    Ok(())
}

fn window_title(tool: ToolMode, settings: &BrushSettings) -> String {
    format!(
        "Terrain Sketch - {} | Brush {} | Sensitivity {}",
        tool.label(),
        settings.radius,
        settings.sensitivity
    )
}

/// Copy the engine's pixels into a 0RGB window buffer, scaled up.
fn blit(engine: &TerrainEngine, scale: usize, buffer: &mut [u32], out_width: usize) {
    for (x, y, pixel) in engine.pixels().enumerate_pixels() {
        let [r, g, b, _] = pixel.0;
        let color = ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
        for sy in 0..scale {
            let row = (y as usize * scale + sy) * out_width;
            for sx in 0..scale {
                buffer[row + x as usize * scale + sx] = color;
            }
        }
    }
}

/// Brush preview ring, drawn in window space on the display copy only.
fn draw_circle_outline(
    buffer: &mut [u32],
    width: usize,
    height: usize,
    center: (f32, f32),
    radius: u32,
    scale: usize,
) {
    let cx = center.0 * scale as f32;
    let cy = center.1 * scale as f32;
    let r = (radius as usize * scale) as f32;
    let steps = ((r * std::f32::consts::TAU) as usize).max(16);
    for i in 0..steps {
        let angle = i as f32 / steps as f32 * std::f32::consts::TAU;
        let x = (cx + r * angle.cos()).round();
        let y = (cy + r * angle.sin()).round();
        if x >= 0.0 && y >= 0.0 && (x as usize) < width && (y as usize) < height {
            buffer[y as usize * width + x as usize] = PREVIEW_COLOR;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{Brush, BrushDirection};

    #[test]
    fn test_blit_scales_pixels() {
        let mut engine = TerrainEngine::new(3, 2);
        engine.apply_dab(&Brush::new((2.0, 1.0), 0, 1.0, BrushDirection::Raise));
        let mut buffer = vec![0u32; 6 * 4];
        blit(&engine, 2, &mut buffer, 6);

        let water = (30u32 << 16) | (176 << 8) | 251;
        let [r, g, b] = engine.bands().color_for_height(1.0);
        let trees = ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
        assert_eq!(buffer[0], water);
        assert_eq!(buffer[2 * 6 + 4], trees);
        assert_eq!(buffer[3 * 6 + 5], trees);
        assert_eq!(buffer[3 * 6 + 3], water);
    }

    #[test]
    fn test_preview_ring_is_clipped() {
        let mut buffer = vec![0u32; 20 * 20];
        draw_circle_outline(&mut buffer, 20, 20, (0.0, 0.0), 5, 1);
        assert_eq!(buffer[5], PREVIEW_COLOR);
        assert_eq!(buffer[5 * 20], PREVIEW_COLOR);
        assert_eq!(buffer[0], 0);
    }

    #[test]
    fn test_title_reports_settings() {
        let title = window_title(ToolMode::Lower, &BrushSettings::new(30, 10));
        assert_eq!(title, "Terrain Sketch - Lower landmass | Brush 30 | Sensitivity 10");
    }
}
