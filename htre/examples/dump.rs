//! Basic example decoding one tile and printing its contents.
//!
//! Run with: cargo run --example dump -- /path/to/tile.htre

use htre::{HtreError, TerrainTile, VersionParams};
use std::env;

fn main() -> Result<(), HtreError> {
    let path = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example dump -- /path/to/tile.htre");
        std::process::exit(1);
    });

    let tile = TerrainTile::from_file(&path)?;
    let params = &tile.parameters;

    println!("Version: {}", tile.version().tag());
    println!("Pitch: {}", params.pitch);
    println!("Max LOD level: {}", params.max_lod_level);
    if let VersionParams::V4 {
        height_format,
        combo_format,
        ..
    } = params.version_params
    {
        println!("Height format: {}", height_format);
        println!("Combo format: {}", combo_format);
    }

    let min = tile.height_map.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = tile
        .height_map
        .iter()
        .cloned()
        .fold(f32::NEG_INFINITY, f32::max);

    println!();
    println!("Height map: {} samples", tile.height_map.len());
    println!("Min elevation: {:.3}m", min);
    println!("Max elevation: {:.3}m", max);

    Ok(())
}
