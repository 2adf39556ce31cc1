//! HTRE container decoding.
//!
//! This module provides the [`TerrainTile`] record and the reader that
//! assembles it from a seekable byte stream in one fixed pass.

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use memmap2::Mmap;

use crate::blocks::read_quadrant_grid;
use crate::error::Result;
use crate::layout::Version;
use crate::params::{self, TileParameters};
use crate::sample::{self, Rgba};

/// Samples per side of the height map and the material weight map.
pub const HEIGHT_MAP_WIDTH: usize = 64;

/// Pixels per side of the material select map and the configuration ids map.
pub const SELECT_MAP_WIDTH: usize = 2;

/// One fully decoded terrain tile.
///
/// All grids are row-major flat vectors whose length is the square of their
/// declared width. A tile is built in a single pass over its stream and is
/// never mutated afterwards; the caller owns it exclusively and hands it to
/// whatever sinks it wants (image writers, serializers).
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainTile {
    pub parameters: TileParameters,
    /// 64×64 elevation samples in meters.
    pub height_map: Vec<f32>,
    /// 64×64 material weight pixels.
    pub material_weight_map: Vec<Rgba>,
    /// 2×2 material selection pixels.
    pub material_select_map: Vec<Rgba>,
    /// 2×2 configuration id pixels.
    pub configuration_ids_map: Vec<Rgba>,
}

impl TerrainTile {
    /// Decode a tile from a `.htre` file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or memory-mapped, if
    /// its version tag is unknown, or if the stream is too short for the
    /// resolved layout.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;

        // SAFETY: Memory mapping is safe as long as the file is not modified
        // while mapped. We open the file read-only and the mapping does not
        // outlive the decode.
        let mmap = unsafe { Mmap::map(&file)? };

        Self::from_bytes(&mmap)
    }

    /// Decode a tile from an in-memory byte buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(&mut Cursor::new(bytes))
    }

    /// Decode a tile from a seekable byte stream.
    ///
    /// The stream is consumed in a fixed sequence: version tag, scalar
    /// parameters, height map, material weight map (contiguous with the
    /// height map block), material select map, configuration ids map, LOD
    /// coefficients. Every field group offset is absolute from the start of
    /// the stream. The first failed read aborts the decode; no partial tile
    /// is produced.
    pub fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;
        let tag = sample::read_i32(reader)?;
        let version = Version::from_tag(tag)?;
        let layout = version.layout();

        let scalars = params::read_scalar_params(reader, layout)?;

        reader.seek(SeekFrom::Start(layout.height_map))?;
        let height_map = read_quadrant_grid(reader, HEIGHT_MAP_WIDTH, sample::read_height)?;

        // The material weight map starts right after the height map block.
        let material_weight_map = read_quadrant_grid(reader, HEIGHT_MAP_WIDTH, sample::read_pixel)?;

        reader.seek(SeekFrom::Start(layout.material_select_map))?;
        let material_select_map = read_quadrant_grid(reader, SELECT_MAP_WIDTH, sample::read_pixel)?;

        reader.seek(SeekFrom::Start(layout.configuration_ids_map))?;
        let configuration_ids_map = read_quadrant_grid(reader, SELECT_MAP_WIDTH, sample::read_pixel)?;

        let parameters = params::read_lod_coefficients(reader, layout, scalars)?;

        Ok(Self {
            parameters,
            height_map,
            material_weight_map,
            material_select_map,
            configuration_ids_map,
        })
    }

    /// Container version of this tile.
    pub fn version(&self) -> Version {
        self.parameters.version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HtreError;
    use crate::params::VersionParams;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const V3_FILE_LEN: usize = 33536;
    const V4_FILE_LEN: usize = 33600;

    fn put_i32(buf: &mut [u8], offset: usize, value: i32) {
        buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn put_f32(buf: &mut [u8], offset: usize, value: f32) {
        buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn put_pixel(buf: &mut [u8], offset: usize, px: [u8; 4]) {
        buf[offset..offset + 4].copy_from_slice(&px);
    }

    /// Synthetic v3 tile with a few recognizable samples.
    fn v3_tile_bytes() -> Vec<u8> {
        let mut buf = vec![0u8; V3_FILE_LEN];
        put_i32(&mut buf, 0, 3);
        put_i32(&mut buf, 92, 17); // pitch
        put_i32(&mut buf, 204, 5); // max LOD level

        // Height map block at 640. The first two stream samples belong to
        // the top-left quadrant's first column, rows 0 and 1.
        put_f32(&mut buf, 640, 1000.0);
        put_f32(&mut buf, 644, -500.0);

        // Material weight map follows the height map block (640 + 4096*4).
        put_pixel(&mut buf, 17024, [10, 20, 30, 40]);

        // Material select map: one pixel per quadrant, TL BL TR BR.
        put_pixel(&mut buf, 33504, [1, 1, 1, 9]);
        put_pixel(&mut buf, 33508, [2, 2, 2, 9]);
        put_pixel(&mut buf, 33512, [3, 3, 3, 9]);
        put_pixel(&mut buf, 33516, [4, 4, 4, 9]);

        // Configuration ids map.
        put_pixel(&mut buf, 33520, [5, 5, 5, 0]);

        for i in 0..16 {
            put_f32(&mut buf, 33408 + i * 4, i as f32 * 0.5);
        }

        buf
    }

    /// Synthetic v4 tile.
    fn v4_tile_bytes() -> Vec<u8> {
        let mut buf = vec![0u8; V4_FILE_LEN];
        put_i32(&mut buf, 0, 4);
        put_i32(&mut buf, 92, 7); // pitch, aliased by heightFormat
        put_i32(&mut buf, 204, 9); // comboFormat
        put_i32(&mut buf, 268, 6); // max LOD level

        put_f32(&mut buf, 672, 2500.0);
        put_pixel(&mut buf, 17056, [90, 80, 70, 0]);
        put_pixel(&mut buf, 33552, [11, 12, 13, 14]);
        put_pixel(&mut buf, 33568, [21, 22, 23, 24]);

        for i in 0..16 {
            put_f32(&mut buf, 33440 + i * 4, 1.0 + i as f32);
        }
        for i in 0..4 {
            put_i32(&mut buf, 33504 + i * 4, 100 + i as i32);
        }

        buf
    }

    #[test]
    fn test_decode_v3() {
        let tile = TerrainTile::from_bytes(&v3_tile_bytes()).unwrap();

        assert_eq!(tile.version(), Version::V3);
        assert_eq!(tile.parameters.pitch, 17);
        assert_eq!(tile.parameters.max_lod_level, 5);
        assert_eq!(tile.parameters.version_params, VersionParams::V3);
        assert_eq!(tile.parameters.lod_coefficients_float[15], 7.5);

        assert_eq!(tile.height_map.len(), 4096);
        assert_eq!(tile.material_weight_map.len(), 4096);
        assert_eq!(tile.material_select_map.len(), 4);
        assert_eq!(tile.configuration_ids_map.len(), 4);

        // First stream sample is (0,0); the second is (1,0) of the top-left
        // quadrant, one full row down in the flat grid.
        assert_eq!(tile.height_map[0], 1.0);
        assert_eq!(tile.height_map[HEIGHT_MAP_WIDTH], -0.5);

        assert_eq!(
            tile.material_weight_map[0],
            Rgba {
                r: 10,
                g: 20,
                b: 30,
                a: 255
            }
        );

        // Stream order TL, BL, TR, BR lands at flat indices 0, 2, 1, 3.
        let grays: Vec<u8> = tile.material_select_map.iter().map(|px| px.r).collect();
        assert_eq!(grays, vec![1, 3, 2, 4]);
        assert_eq!(tile.configuration_ids_map[0].r, 5);
    }

    #[test]
    fn test_decode_v4() {
        let tile = TerrainTile::from_bytes(&v4_tile_bytes()).unwrap();

        assert_eq!(tile.version(), Version::V4);
        assert_eq!(tile.parameters.pitch, 7);
        assert_eq!(tile.parameters.max_lod_level, 6);
        assert_eq!(
            tile.parameters.version_params,
            VersionParams::V4 {
                height_format: 7,
                combo_format: 9,
                lod_coefficients_int: [100, 101, 102, 103],
            }
        );

        assert_eq!(tile.height_map.len(), 4096);
        assert_eq!(tile.height_map[0], 2.5);
        assert_eq!(tile.material_weight_map[0].r, 90);
        assert_eq!(tile.material_select_map[0].r, 11);
        assert_eq!(tile.configuration_ids_map[0].r, 21);
    }

    #[test]
    fn test_alpha_always_opaque() {
        for bytes in [v3_tile_bytes(), v4_tile_bytes()] {
            let tile = TerrainTile::from_bytes(&bytes).unwrap();
            for grid in [
                &tile.material_weight_map,
                &tile.material_select_map,
                &tile.configuration_ids_map,
            ] {
                assert!(grid.iter().all(|px| px.a == 255));
            }
        }
    }

    #[test]
    fn test_unsupported_version() {
        let mut buf = vec![0u8; V4_FILE_LEN];
        put_i32(&mut buf, 0, 5);

        match TerrainTile::from_bytes(&buf) {
            Err(HtreError::UnsupportedVersion { version }) => assert_eq!(version, 5),
            other => panic!("expected UnsupportedVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_stream() {
        // Cut inside the height map block.
        let bytes = v4_tile_bytes();
        match TerrainTile::from_bytes(&bytes[..1000]) {
            Err(HtreError::Io(err)) => {
                assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof)
            }
            other => panic!("expected Io error, got {:?}", other),
        }

        // Cut between the weight map and the v4 select map block.
        assert!(TerrainTile::from_bytes(&bytes[..33510]).is_err());
    }

    #[test]
    fn test_decode_is_deterministic() {
        let bytes = v4_tile_bytes();
        let first = TerrainTile::from_bytes(&bytes).unwrap();
        let second = TerrainTile::from_bytes(&bytes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&v3_tile_bytes()).unwrap();

        let tile = TerrainTile::from_file(file.path()).unwrap();
        assert_eq!(tile, TerrainTile::from_bytes(&v3_tile_bytes()).unwrap());
    }

    #[test]
    fn test_from_file_missing() {
        let result = TerrainTile::from_file("does-not-exist.htre");
        assert!(matches!(result, Err(HtreError::Io(_))));
    }
}
