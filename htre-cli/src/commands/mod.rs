pub mod extract;
pub mod info;

use htre::{TileParameters, VersionParams};
use serde::Serialize;

/// Serializable view of a tile's parameter block.
///
/// v3 tiles carry no format ids or integer LOD coefficients; those fields
/// serialize as null and an empty array, never as sentinel values.
#[derive(Serialize)]
pub struct TileMetadata {
    version: i32,
    pitch: i32,
    height_format: Option<i32>,
    combo_format: Option<i32>,
    max_lod_level: i32,
    lod_coefficients_float: Vec<f32>,
    lod_coefficients_int: Vec<i32>,
}

impl From<&TileParameters> for TileMetadata {
    fn from(params: &TileParameters) -> Self {
        let (height_format, combo_format, lod_coefficients_int) = match params.version_params {
            VersionParams::V3 => (None, None, Vec::new()),
            VersionParams::V4 {
                height_format,
                combo_format,
                lod_coefficients_int,
            } => (
                Some(height_format),
                Some(combo_format),
                lod_coefficients_int.to_vec(),
            ),
        };

        Self {
            version: params.version().tag(),
            pitch: params.pitch,
            height_format,
            combo_format,
            max_lod_level: params.max_lod_level,
            lod_coefficients_float: params.lod_coefficients_float.to_vec(),
            lod_coefficients_int,
        }
    }
}
