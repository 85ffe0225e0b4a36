//! This module holds the direction vocabulary shared by the board engine and the input adapter.
//!
//! Besides naming the four edges tiles can slide toward, a direction knows how to walk a line of
//! the board in travel order, which is what lets the engine run a single line transform for all
//! four moves.

use std::fmt;
use std::str::FromStr;

use crate::board::SIZE;

/// This enum holds the four edges of the board that tiles can be slid toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Tiles travel toward the bottom edge; lines are columns read bottom to top.
    Down,
    /// Tiles travel toward the left edge; lines are rows read left to right.
    Left,
    /// Tiles travel toward the right edge; lines are rows read right to left.
    Right,
    /// Tiles travel toward the top edge; lines are columns read top to bottom.
    Up,
}

impl Direction {
    /// All four directions, in no particular order of preference.
    pub const ALL: [Self; 4] = [Self::Down, Self::Left, Self::Right, Self::Up];

    /// This function maps a position along a line to the board cell it refers to, returned as a
    /// `(row, col)` pair.
    ///
    /// `line` picks the row (left/right) or column (up/down). `step` counts cells from the edge
    /// the tiles travel toward, so step 0 is always the cell a fully compacted line fills first.
    pub(crate) const fn cell(self, line: usize, step: usize) -> (usize, usize) {
        let far = SIZE - 1 - step;

        match self {
            Self::Down => (far, line),
            Self::Left => (line, step),
            Self::Right => (line, far),
            Self::Up => (step, line),
        }
    }

    /// This function returns the lowercase name of the direction.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            _ => Err(ParseDirectionError(input.to_owned())),
        }
    }
}

/// This error is returned when a piece of text names none of the four directions. It keeps the
/// offending input around so the caller can report it back.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("`{0}` is not a direction; expected one of up, down, left or right")]
pub struct ParseDirectionError(String);
