use anyhow::{Context, Result};
use htre::{HtreError, Rgba, TerrainTile, HEIGHT_MAP_WIDTH, SELECT_MAP_WIDTH};
use image::RgbaImage;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::TileMetadata;

pub fn run(files: Vec<PathBuf>, output_dir: Option<PathBuf>) -> Result<()> {
    let output_dir = output_dir.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );

    let mut extracted = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for path in &files {
        if !path.exists() {
            pb.println(format!("{}: not found, skipping", path.display()));
            skipped += 1;
            pb.inc(1);
            continue;
        }
        if path.extension().map(|e| e != "htre").unwrap_or(true) {
            pb.println(format!("{}: not a .htre file, skipping", path.display()));
            skipped += 1;
            pb.inc(1);
            continue;
        }

        // A failed decode never aborts the batch; report and move on.
        match TerrainTile::from_file(path) {
            Ok(tile) => match write_sidecars(&tile, path, &output_dir) {
                Ok(()) => extracted += 1,
                Err(err) => {
                    pb.println(format!("{}: {:#}", path.display(), err));
                    failed += 1;
                }
            },
            Err(HtreError::UnsupportedVersion { version }) => {
                pb.println(format!(
                    "{}: unsupported version {}, skipping",
                    path.display(),
                    version
                ));
                failed += 1;
            }
            Err(err) => {
                pb.println(format!("{}: {}", path.display(), err));
                failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("done");

    println!("Extracted: {}", extracted);
    if skipped > 0 {
        println!("Skipped: {}", skipped);
    }
    if failed > 0 {
        println!("Failed: {}", failed);
    }

    Ok(())
}

/// Write the four grid artifacts and the JSON metadata for one decoded tile.
fn write_sidecars(tile: &TerrainTile, input: &Path, output_dir: &Path) -> Result<()> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .context("Input filename is not valid UTF-8")?;

    write_raw_heights(
        &tile.height_map,
        &output_dir.join(format!("{}_height_map.r32", stem)),
    )?;
    write_png(
        &tile.material_weight_map,
        HEIGHT_MAP_WIDTH,
        &output_dir.join(format!("{}_material_weight_map.png", stem)),
    )?;
    write_png(
        &tile.material_select_map,
        SELECT_MAP_WIDTH,
        &output_dir.join(format!("{}_material_select_map.png", stem)),
    )?;
    write_png(
        &tile.configuration_ids_map,
        SELECT_MAP_WIDTH,
        &output_dir.join(format!("{}_configuration_ids_map.png", stem)),
    )?;

    let metadata = TileMetadata::from(&tile.parameters);
    let json = serde_json::to_string_pretty(&metadata)?;
    let json_path = output_dir.join(format!("{}.htre.json", stem));
    std::fs::write(&json_path, json)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;

    Ok(())
}

/// Raw little-endian float32 samples, no header.
fn write_raw_heights(heights: &[f32], path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for value in heights {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

fn write_png(pixels: &[Rgba], width: usize, path: &Path) -> Result<()> {
    let mut raw = Vec::with_capacity(pixels.len() * 4);
    for px in pixels {
        raw.extend_from_slice(&[px.r, px.g, px.b, px.a]);
    }

    let img = RgbaImage::from_raw(width as u32, width as u32, raw)
        .context("Pixel buffer does not match image dimensions")?;
    img.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
