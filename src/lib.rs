//! Terrain sketching library
//!
//! A brush-painted heightmap shaded into water, sand, grass and tree bands.
//! Re-exports modules for use by binaries and tools.

pub mod brush;
pub mod config;
pub mod engine;
pub mod export;
pub mod stroke;
pub mod terrain;
pub mod tilemap;
pub mod viewer;
