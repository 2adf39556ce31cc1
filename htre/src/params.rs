//! Scalar and array tile parameters.
//!
//! The parameter block is split across the stream: pitch, the format ids,
//! and the max LOD level sit near the head, while the LOD coefficients sit
//! past the pixel grids. Extraction therefore happens in two passes, each
//! seeking to the absolute offsets the layout table names.

use std::io::{Read, Seek, SeekFrom};

use crate::error::Result;
use crate::layout::{Layout, Version};
use crate::sample::{read_f32, read_i32};

/// Number of floating-point LOD coefficients in every tile.
pub const LOD_COEFFICIENTS_FLOAT: usize = 16;

/// Number of integer LOD coefficients in a v4 tile.
pub const LOD_COEFFICIENTS_INT: usize = 4;

/// Parameters that exist only in some container versions.
///
/// v3 encodes neither the format ids nor the integer LOD coefficients;
/// their absence is expressed by the variant rather than a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VersionParams {
    V3,
    V4 {
        height_format: i32,
        combo_format: i32,
        lod_coefficients_int: [i32; LOD_COEFFICIENTS_INT],
    },
}

/// The scalar/array parameter block of a decoded tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileParameters {
    /// Geometric pitch of the tile, passed through opaquely.
    pub pitch: i32,
    pub max_lod_level: i32,
    pub lod_coefficients_float: [f32; LOD_COEFFICIENTS_FLOAT],
    pub version_params: VersionParams,
}

impl TileParameters {
    /// Container version this parameter block was decoded from.
    pub fn version(&self) -> Version {
        match self.version_params {
            VersionParams::V3 => Version::V3,
            VersionParams::V4 { .. } => Version::V4,
        }
    }
}

/// Scalar fields read near the head of the stream. The LOD coefficient pass
/// completes them into [`TileParameters`].
pub(crate) struct ScalarParams {
    pitch: i32,
    max_lod_level: i32,
    formats: Option<FormatIds>,
}

struct FormatIds {
    height_format: i32,
    combo_format: i32,
}

/// Read pitch, the format ids where the layout has them, and the max LOD
/// level. Each field sits at its own absolute offset, so every read seeks
/// first.
pub(crate) fn read_scalar_params<R: Read + Seek>(
    reader: &mut R,
    layout: &Layout,
) -> Result<ScalarParams> {
    reader.seek(SeekFrom::Start(layout.pitch))?;
    let pitch = read_i32(reader)?;

    let formats = match &layout.formats {
        Some(offsets) => {
            reader.seek(SeekFrom::Start(offsets.height_format))?;
            let height_format = read_i32(reader)?;
            reader.seek(SeekFrom::Start(offsets.combo_format))?;
            let combo_format = read_i32(reader)?;
            Some(FormatIds {
                height_format,
                combo_format,
            })
        }
        None => None,
    };

    reader.seek(SeekFrom::Start(layout.max_lod_level))?;
    let max_lod_level = read_i32(reader)?;

    Ok(ScalarParams {
        pitch,
        max_lod_level,
        formats,
    })
}

/// Read the LOD coefficient block and assemble the final parameter set:
/// 16 floats always, followed by 4 integers when the scalars carried v4
/// format ids.
pub(crate) fn read_lod_coefficients<R: Read + Seek>(
    reader: &mut R,
    layout: &Layout,
    scalars: ScalarParams,
) -> Result<TileParameters> {
    reader.seek(SeekFrom::Start(layout.lod_coefficients))?;

    let mut lod_coefficients_float = [0.0f32; LOD_COEFFICIENTS_FLOAT];
    for value in &mut lod_coefficients_float {
        *value = read_f32(reader)?;
    }

    let version_params = match scalars.formats {
        None => VersionParams::V3,
        Some(FormatIds {
            height_format,
            combo_format,
        }) => {
            let mut lod_coefficients_int = [0i32; LOD_COEFFICIENTS_INT];
            for value in &mut lod_coefficients_int {
                *value = read_i32(reader)?;
            }
            VersionParams::V4 {
                height_format,
                combo_format,
                lod_coefficients_int,
            }
        }
    };

    Ok(TileParameters {
        pitch: scalars.pitch,
        max_lod_level: scalars.max_lod_level,
        lod_coefficients_float,
        version_params,
    })
}
