//! # HTRE - Terrain Tile Decoder
//!
//! Decoder for the proprietary, versioned HTRE binary terrain-tile
//! container (`.htre` files). One container holds one tile: a 64×64
//! elevation grid, three RGBA pixel grids, and a small parameter block.
//!
//! ## Features
//!
//! - **Two layouts**: container versions 3 and 4, each with its own fully
//!   enumerated byte-offset table
//! - **Decode only**: tiles are read into plain owned records; writing the
//!   format is out of scope
//! - **No shared state**: each decode owns its stream for its whole
//!   duration, so independent tiles can be decoded in parallel by the
//!   caller
//!
//! ## Quick Start
//!
//! ```ignore
//! use htre::{TerrainTile, VersionParams};
//!
//! let tile = TerrainTile::from_file("terrain_00.htre")?;
//! println!("version {}, pitch {}", tile.version().tag(), tile.parameters.pitch);
//!
//! // 64×64 row-major elevation samples, in meters.
//! let center = tile.height_map[32 * htre::HEIGHT_MAP_WIDTH + 32];
//! println!("center elevation: {}m", center);
//!
//! if let VersionParams::V4 { height_format, .. } = tile.parameters.version_params {
//!     println!("height format: {}", height_format);
//! }
//! ```
//!
//! ## Container Format
//!
//! All values are little-endian. The stream starts with a 4-byte integer
//! version tag; every other field sits at an absolute offset chosen by the
//! version's layout table:
//!
//! | field | v3 | v4 |
//! |---|---|---|
//! | pitch | 92 | 92 |
//! | heightFormat | n/a | 92 |
//! | comboFormat | n/a | 204 |
//! | maxLodLevel | 204 | 268 |
//! | height map block | 640 | 672 |
//! | materialSelectMap block | 33504 | 33552 |
//! | configurationIdsMap block | 33520 | 33568 |
//! | LOD coefficients block | 33408 | 33440 |
//!
//! Height samples are f32 millimeter-scale values (decoded to meters);
//! pixels are 4 bytes in R, G, B, A order with the alpha byte discarded in
//! favor of full opacity. Every grid is stored as four quadrant blocks in
//! top-left, bottom-left, top-right, bottom-right order, column-major
//! within each block; see [`blocks::read_quadrant_grid`].

pub mod blocks;
pub mod error;
pub mod layout;
pub mod params;
pub mod sample;
pub mod tile;

// Re-export main types at crate root for convenience
pub use error::{HtreError, Result};
pub use layout::Version;
pub use params::{TileParameters, VersionParams};
pub use sample::Rgba;
pub use tile::{TerrainTile, HEIGHT_MAP_WIDTH, SELECT_MAP_WIDTH};
