//! The library components of the game. They hold the board engine, the input adapter that turns
//! key presses into moves, the renderer that draws a board on any canvas, and the loop that ties
//! them together on a terminal.
//!
//! The starting point of the library is the game.rs file, which contains the main game loop. The
//! board engine in board.rs has no dependency on the terminal at all, so it can be driven and
//! tested on its own with a seeded `fastrand` generator or any other [`Randomness`] source.

#![expect(
    clippy::cargo_common_metadata,
    reason = "The package has not yet been pushed to a remote."
)]

mod board;
mod config;
mod direction;
mod game;
mod input;
mod merge;
mod render;
mod rng;

pub use board::{Board, Grid, InvalidTileError, Tile, SIZE};
pub use direction::{Direction, ParseDirectionError};
pub use game::init;
pub use rng::Randomness;
