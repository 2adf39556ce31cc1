//! Version tags and the physical byte layout of HTRE containers.
//!
//! Versions 3 and 4 are two independent layouts rather than one layout with
//! a constant shift: pitch and heightFormat share offset 92 in v4, while v3
//! does not encode the format fields at all. Each version therefore gets its
//! own fully enumerated offset table, keeping the on-disk format auditable
//! in one place.

use crate::error::{HtreError, Result};

/// Container format version, read from the 4-byte tag at offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    V3,
    V4,
}

impl Version {
    /// Resolve a version tag read from the stream.
    ///
    /// # Errors
    ///
    /// Returns [`HtreError::UnsupportedVersion`] for any tag other than
    /// 3 or 4. Every later read depends on the layout, so this aborts the
    /// whole decode.
    pub fn from_tag(tag: i32) -> Result<Self> {
        match tag {
            3 => Ok(Version::V3),
            4 => Ok(Version::V4),
            version => Err(HtreError::UnsupportedVersion { version }),
        }
    }

    /// The integer tag stored in the file.
    pub fn tag(self) -> i32 {
        match self {
            Version::V3 => 3,
            Version::V4 => 4,
        }
    }

    /// The byte layout for this version.
    pub fn layout(self) -> &'static Layout {
        match self {
            Version::V3 => &LAYOUT_V3,
            Version::V4 => &LAYOUT_V4,
        }
    }
}

/// Absolute byte offsets, from the start of the stream, of every field group
/// in one container version.
///
/// Field groups are not contiguous; the reader seeks to each offset before
/// reading. The single exception is the material weight map, which starts
/// immediately after the height map block and has no offset of its own.
#[derive(Debug)]
pub struct Layout {
    pub pitch: u64,
    pub max_lod_level: u64,
    pub height_map: u64,
    pub material_select_map: u64,
    pub configuration_ids_map: u64,
    pub lod_coefficients: u64,
    /// Format id offsets; only v4 encodes them.
    pub formats: Option<FormatOffsets>,
}

/// Offsets of the v4-only format id fields.
#[derive(Debug)]
pub struct FormatOffsets {
    pub height_format: u64,
    pub combo_format: u64,
}

pub const LAYOUT_V3: Layout = Layout {
    pitch: 92,
    max_lod_level: 204,
    height_map: 640,
    material_select_map: 33504,
    configuration_ids_map: 33520,
    lod_coefficients: 33408,
    formats: None,
};

/// heightFormat aliases the pitch offset in this version.
pub const LAYOUT_V4: Layout = Layout {
    pitch: 92,
    max_lod_level: 268,
    height_map: 672,
    material_select_map: 33552,
    configuration_ids_map: 33568,
    lod_coefficients: 33440,
    formats: Some(FormatOffsets {
        height_format: 92,
        combo_format: 204,
    }),
};
