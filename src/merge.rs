//! This module contains the line merge, the one piece of the game with real rules to it.

use crate::board::Tile;

/// This function merges a single line of tiles, given in the order they travel toward the edge.
///
/// The line is scanned once from the front. Whenever two neighbouring tiles hold the same value
/// they become one tile of twice that value, and that doubled value is added to the returned score.
/// A merged tile never takes part in a second merge during the same scan, and the scan never goes
/// back, so `[2, 2, 2]` turns into `[4, 2]` and `[2, 2, 2, 2]` into `[4, 4]`.
///
/// Empty cells (zeros) are skipped, so the caller may pass a raw line as well as a dense one. The
/// returned line is dense, keeps the relative order of the surviving tiles, and is never longer
/// than the input.
///
/// Tiles are assumed to be no larger than a 4x4 board can hold (2^17, which `Board::from_grid`
/// enforces), so doubling one never leaves the range of a `u32`.
#[must_use]
pub(crate) fn merge_line(tiles: &[Tile]) -> (Vec<Tile>, u32) {
    let mut merged = Vec::with_capacity(tiles.len());
    let mut gained = 0;
    let mut rest = tiles.iter().copied().filter(|&tile| tile != 0).peekable();

    while let Some(tile) = rest.next() {
        if rest.next_if_eq(&tile).is_some() {
            let doubled = tile * 2;
            gained += doubled;
            merged.push(doubled);
        } else {
            merged.push(tile);
        }
    }

    (merged, gained)
}
