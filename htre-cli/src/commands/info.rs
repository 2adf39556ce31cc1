use anyhow::{Context, Result};
use htre::{TerrainTile, VersionParams, HEIGHT_MAP_WIDTH};
use std::path::PathBuf;

use super::TileMetadata;

pub fn run(file: PathBuf, json: bool) -> Result<()> {
    let tile = TerrainTile::from_file(&file)
        .with_context(|| format!("Failed to decode {}", file.display()))?;

    if json {
        let metadata = TileMetadata::from(&tile.parameters);
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    let params = &tile.parameters;

    println!("Tile: {}", file.display());
    println!();
    println!("Version: {}", tile.version().tag());
    println!("Pitch: {}", params.pitch);
    println!("Max LOD level: {}", params.max_lod_level);

    if let VersionParams::V4 {
        height_format,
        combo_format,
        lod_coefficients_int,
    } = params.version_params
    {
        println!("Height format: {}", height_format);
        println!("Combo format: {}", combo_format);
        println!("LOD coefficients (int): {:?}", lod_coefficients_int);
    }

    println!("LOD coefficients (float):");
    for chunk in params.lod_coefficients_float.chunks(4) {
        let row: Vec<String> = chunk.iter().map(|v| format!("{:.4}", v)).collect();
        println!("  {}", row.join("  "));
    }

    let min = tile.height_map.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = tile
        .height_map
        .iter()
        .cloned()
        .fold(f32::NEG_INFINITY, f32::max);

    println!();
    println!(
        "Height map: {}x{} samples",
        HEIGHT_MAP_WIDTH, HEIGHT_MAP_WIDTH
    );
    println!("Min elevation: {:.3}m", min);
    println!("Max elevation: {:.3}m", max);

    Ok(())
}
