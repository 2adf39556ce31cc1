//! Quadrant-interleaved grid reassembly.
//!
//! Every square grid in an HTRE container is stored as four contiguous
//! `(W/2)×(W/2)` blocks, in the order top-left, bottom-left, top-right,
//! bottom-right. Within one block the samples are column-major: each column
//! is stored top to bottom before the next column starts. A block's local
//! (row, col) sample lands at the same (row, col) inside that block's
//! quadrant of the final grid.
//!
//! [`read_quadrant_grid`] undoes this scrambling in a single pass, writing
//! into one flat row-major vector by computed index. The same routine serves
//! the 64-wide height/weight maps and the 2-wide id maps, where each block
//! degenerates to a single sample.

use std::io::Read;

use crate::error::Result;

/// (row, col) of each block's top-left corner in the final grid, in the
/// order the blocks appear on the stream.
fn quadrant_origins(half: usize) -> [(usize, usize); 4] {
    [(0, 0), (half, 0), (0, half), (half, half)]
}

/// Read a `width`×`width` grid stored in the four-quadrant column-major
/// layout, decoding each element with `read_sample`.
///
/// `width` must be even. Performs exactly `width * width` element reads and
/// returns the grid as a row-major flat vector of that length.
///
/// # Errors
///
/// Fails on the first element `read_sample` cannot decode; a truncated
/// stream yields no partial grid.
pub fn read_quadrant_grid<R, T, F>(reader: &mut R, width: usize, mut read_sample: F) -> Result<Vec<T>>
where
    R: Read,
    T: Copy + Default,
    F: FnMut(&mut R) -> Result<T>,
{
    debug_assert!(width % 2 == 0, "grid width must be even");

    let half = width / 2;
    let mut grid = vec![T::default(); width * width];

    for (origin_row, origin_col) in quadrant_origins(half) {
        for col in 0..half {
            for row in 0..half {
                let sample = read_sample(reader)?;
                grid[(origin_row + row) * width + (origin_col + col)] = sample;
            }
        }
    }

    Ok(grid)
}
