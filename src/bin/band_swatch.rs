//! Debug tool: render the terrain palette as a gradient strip
//! Optionally takes a sketch config (JSON) to preview a custom palette

use std::error::Error;
use std::path::Path;

use terrain_sketch::config::SketchConfig;
use terrain_sketch::export::render_band_swatch;

const WIDTH: u32 = 512;
const HEIGHT: u32 = 64;

fn main() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => SketchConfig::load(Path::new(&path))?,
        None => SketchConfig::default(),
    };
    let bands = config.band_table()?;

    for band in bands.bands() {
        println!(
            "  {:<6} [{:.2}, {:.2}]  {:?} -> {:?}  skew {:+.2}",
            band.name, band.min_height, band.max_height, band.min_color, band.max_color, band.skew
        );
    }

    let img = render_band_swatch(&bands, WIDTH, HEIGHT);
    img.save("band_swatch.png")?;
    println!("Saved band_swatch.png");

    Ok(())
}
