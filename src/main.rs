use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;

use terrain_sketch::config::SketchConfig;
use terrain_sketch::engine::TerrainEngine;
use terrain_sketch::stroke::{self, StrokeScript};
use terrain_sketch::{export, viewer};

#[derive(Parser, Debug)]
#[command(name = "terrain_sketch")]
#[command(about = "Paint a terrain map with a soft raise/lower brush")]
struct Args {
    /// Canvas width in pixels (overrides the config file)
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Canvas height in pixels (overrides the config file)
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Sketch configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay a recorded stroke script (JSON) without opening a window
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Where to save the map (default: myMap.png, or the config's output)
    #[arg(short, long)]
    output: Option<String>,

    /// Also save the raw heightmap after a replay
    #[arg(long)]
    heightmap_output: Option<PathBuf>,

    /// Write the effective configuration to a file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SketchConfig::load(path)?,
        None => SketchConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if config.width == 0 || config.height == 0 {
        let size = format!("{}x{}", config.width, config.height);
        return Err(format!("canvas must be non-empty, got {}", size).into());
    }

    if let Some(path) = &args.write_config {
        config.save(path)?;
        println!("Wrote config to {}", path.display());
        return Ok(());
    }

    let bands = config.band_table()?;
    let mut engine = TerrainEngine::with_bands(config.width, config.height, bands);
    println!("Canvas: {}x{}", config.width, config.height);

    match &args.replay {
        Some(script_path) => {
            let script = StrokeScript::load(script_path)?;
            println!("Replaying {} samples...", script.samples.len());

            let mut settings = config.brush_settings();
            let stats = stroke::replay(&mut engine, &script, &mut settings);
            println!("Applied {} dabs ({} samples skipped)", stats.dabs, stats.skipped);

            let output = Path::new(&config.output);
            export::export_composite(&engine, output)?;
            println!("Saved map to {}", output.display());

            if let Some(path) = &args.heightmap_output {
                export::export_heightmap(engine.heightmap(), path)?;
                println!("Saved heightmap to {}", path.display());
            }
        }
        None => viewer::run_viewer(engine, &config)?,
    }

    Ok(())
}
