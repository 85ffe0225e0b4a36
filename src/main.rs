//! # slide2048
//!
//! This crate is a terminal rendition of the 2048 puzzle. Tiles sit on a four by four board; every
//! turn the player slides all of them toward one edge, equal neighbours merge into one tile of
//! twice the value, and a new two or four pops up in an empty cell. The aim is to build a 2048
//! tile, though play goes on until no move is left.
//!
//! Use the arrow keys (or `wasd`, or `hjkl`) to move and `q` to quit. Set `RUST_LOG=debug` and
//! redirect stderr to a file to follow every move in the log.

#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use anyhow::Result;
use slide2048::init;

fn main() -> Result<()> {
    init()
}
