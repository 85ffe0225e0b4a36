//! This module contains the board engine: the grid, the score, and the rules that move tiles.
//!
//! The engine knows nothing about terminals or keys. It takes a [`Direction`] and a source of
//! [`Randomness`], updates itself, and exposes read access for whatever draws it.

use std::fmt;

use crate::direction::Direction;
use crate::merge::merge_line;
use crate::rng::Randomness;

/// The side length of the board.
pub const SIZE: usize = 4;

/// The probability that a freshly spawned tile is a two rather than a four.
const TWO_PROBABILITY: f64 = 0.9;

/// The largest tile a 4x4 board can ever hold.
const MAX_TILE: Tile = 1 << 17;

/// A single cell's value; 0 marks an empty cell, anything else is a power of two.
pub type Tile = u32;

/// The board's cells, indexed as `grid[row][col]` with row 0 at the top.
pub type Grid = [[Tile; SIZE]; SIZE];

/// This struct holds the state of one game session: the grid of tiles and the running score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// The cells, row-major, row 0 at the top.
    grid: Grid,
    /// The sum of every tile produced by a merge so far.
    score: u32,
}

#[expect(
    clippy::indexing_slicing,
    reason = "Every index comes from Direction::cell or an enumerate over the grid, both bounded by SIZE."
)]
impl Board {
    /// This function starts a new session: an empty grid with a score of zero, seeded with the two
    /// opening tiles.
    pub fn new<R: Randomness + ?Sized>(rng: &mut R) -> Self {
        let mut board = Self {
            grid: [[0; SIZE]; SIZE],
            score: 0,
        };
        board.spawn(rng);
        board.spawn(rng);
        log::info!("new board with opening tiles {:?}", board.grid);
        board
    }

    /// This function builds a board from an explicit grid and a score of zero, without spawning
    /// anything. It is the way to set up a known position.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTileError`] for the first cell, in row-major order, that is neither empty
    /// nor a power of two between 2 and 2^17, the largest tile a 4x4 board can hold.
    pub fn from_grid(grid: Grid) -> Result<Self, InvalidTileError> {
        for (row, cells) in grid.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                let valid = value == 0 || ((2..=MAX_TILE).contains(&value) && value.is_power_of_two());
                if !valid {
                    return Err(InvalidTileError { row, col, value });
                }
            }
        }

        Ok(Self { grid, score: 0 })
    }

    /// This function reads the whole grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// This function returns the score accumulated so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// This function reads a single cell, or returns `None` when the position is off the board.
    #[must_use]
    pub fn tile(&self, row: usize, col: usize) -> Option<Tile> {
        self.grid.get(row)?.get(col).copied()
    }

    /// This function returns the value of the largest tile on the board, or 0 on an empty board.
    #[must_use]
    pub fn max_tile(&self) -> Tile {
        self.grid.iter().flatten().copied().max().unwrap_or(0)
    }

    /// This function lists the empty cells as `(row, col)` pairs in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.grid
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|&(_, &tile)| tile == 0)
                    .map(move |(col, _)| (row, col))
            })
            .collect()
    }

    /// This function tells whether some tile has reached the given value.
    #[must_use]
    pub fn reached(&self, target: Tile) -> bool {
        self.max_tile() >= target
    }

    /// This function plays one move.
    ///
    /// Every line parallel to `direction` is slid toward the edge it names, merging equal
    /// neighbours along the way. If any cell ended up with a different value, one new tile is
    /// spawned in a random empty cell and `true` is returned. Otherwise the board, score included,
    /// is left exactly as it was and `false` is returned.
    pub fn shift<R: Randomness + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> bool {
        let before = self.score;
        let moved = self.slide(direction);

        if moved {
            log::debug!(
                "moved {direction}: score {before} -> {}, max tile {}",
                self.score,
                self.max_tile()
            );
            self.spawn(rng);
        } else {
            log::debug!("move {direction} changed nothing");
        }

        moved
    }

    /// This function tells whether the session is over: no empty cell is left and no two
    /// neighbouring cells, in either axis, hold the same value.
    ///
    /// It only looks at neighbours; it does not try the four moves.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        let full = self.grid.iter().flatten().all(|&tile| tile != 0);
        let row_pair = self
            .grid
            .iter()
            .any(|row| row.iter().zip(row.iter().skip(1)).any(|(left, right)| left == right));
        let col_pair = self
            .grid
            .iter()
            .zip(self.grid.iter().skip(1))
            .any(|(upper, lower)| upper.iter().zip(lower).any(|(above, below)| above == below));

        full && !row_pair && !col_pair
    }

    /// Slides and merges every line toward the edge `direction` names, without spawning. Returns
    /// whether any cell changed.
    fn slide(&mut self, direction: Direction) -> bool {
        let mut moved = false;

        for line in 0..SIZE {
            let tiles: Vec<Tile> = (0..SIZE)
                .map(|step| {
                    let (row, col) = direction.cell(line, step);
                    self.grid[row][col]
                })
                .collect();
            let (merged, gained) = merge_line(&tiles);
            self.score += gained;

            for step in 0..SIZE {
                let (row, col) = direction.cell(line, step);
                let value = merged.get(step).copied().unwrap_or(0);
                moved |= self.grid[row][col] != value;
                self.grid[row][col] = value;
            }
        }

        moved
    }

    /// Places a two (or, one time in ten, a four) in an empty cell picked uniformly at random. Does
    /// nothing on a full board.
    fn spawn<R: Randomness + ?Sized>(&mut self, rng: &mut R) {
        let empty = self.empty_cells();
        if empty.is_empty() {
            log::warn!("no empty cell left to spawn into");
            return;
        }

        let Some(&(row, col)) = empty.get(rng.choose(empty.len())) else {
            return;
        };
        let value = if rng.chance(TWO_PROBABILITY) { 2 } else { 4 };
        self.grid[row][col] = value;
        log::debug!("spawned {value} at ({row}, {col})");
    }
}

impl fmt::Display for Board {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            for tile in row {
                write!(formatter, "{tile:>6}")?;
            }
            writeln!(formatter)?;
        }
        write!(formatter, "score {}", self.score)
    }
}

/// This error is returned when a grid handed to [`Board::from_grid`] holds a value no game could
/// produce.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("tile {value} at ({row}, {col}) is neither empty nor a power of two from 2 to {MAX_TILE}")]
pub struct InvalidTileError {
    /// The row of the offending cell.
    row: usize,
    /// The column of the offending cell.
    col: usize,
    /// The value found there.
    value: Tile,
}

#[cfg(test)]
mod tests {
    use fastrand::Rng;
    use proptest::prelude::*;

    use super::*;
    use crate::rng::Scripted;

    /// Counts the non-empty cells of a grid.
    fn occupied(grid: &Grid) -> usize {
        grid.iter().flatten().filter(|&&tile| tile != 0).count()
    }

    /// Sums the tiles of a grid.
    fn total(grid: &Grid) -> u32 {
        grid.iter().flatten().sum()
    }

    #[test]
    fn new_board_opens_with_two_tiles() {
        let mut rng = Rng::with_seed(3);
        for _ in 0..100 {
            let board = Board::new(&mut rng);
            assert_eq!(occupied(board.grid()), 2);
            assert_eq!(board.score(), 0);
            assert!(board
                .grid()
                .iter()
                .flatten()
                .all(|&tile| matches!(tile, 0 | 2 | 4)));
        }
    }

    #[test]
    fn opening_tiles_follow_the_random_source() {
        // The first pick indexes all sixteen cells, the second the fifteen left over.
        let mut rng = Scripted::new(&[5, 14], &[true, false]);
        let board = Board::new(&mut rng);
        assert_eq!(board.tile(1, 1), Some(2));
        assert_eq!(board.tile(3, 3), Some(4));
        assert_eq!(occupied(board.grid()), 2);
    }

    #[test]
    fn merging_a_row_left_spawns_one_tile() {
        let mut board = Board::from_grid([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        // Row 0 keeps three gaps after the merge, so pick 3 lands on (1, 0).
        let mut rng = Scripted::new(&[3], &[true]);

        let moved = board.shift(Direction::Left, &mut rng);
        assert!(moved, "merging a pair must count as a move");
        assert_eq!(board.grid()[0], [4, 0, 0, 0]);
        assert_eq!(board.tile(1, 0), Some(2));
        assert_eq!(board.score(), 4);
        assert_eq!(occupied(board.grid()), 2);
    }

    #[test]
    fn grids_with_impossible_tiles_are_rejected() {
        let too_big = Board::from_grid([[1 << 31, 1 << 31, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(
            too_big,
            Err(InvalidTileError {
                row: 0,
                col: 0,
                value: 1 << 31
            })
        );
        assert!(
            Board::from_grid([[0; 4], [0, 3, 0, 0], [0; 4], [0; 4]]).is_err(),
            "3 is not a power of two"
        );
        assert!(
            Board::from_grid([[0; 4], [0; 4], [0; 4], [0, 0, 0, 1]]).is_err(),
            "1 is below the smallest tile"
        );
    }

    #[test]
    fn largest_possible_tile_can_be_built() {
        let half = MAX_TILE / 2;
        let mut board = Board::from_grid([[half, half, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        assert!(board.shift(Direction::Left, &mut Scripted::new(&[3], &[])));
        assert_eq!(board.grid()[0], [MAX_TILE, 0, 0, 0]);
        assert_eq!(board.score(), MAX_TILE);
        assert!(Board::from_grid(*board.grid()).is_ok(), "a built board must be accepted back");
    }

    #[test]
    fn each_direction_compacts_toward_its_edge() {
        let grid = [[0, 2, 0, 4], [0; 4], [8, 0, 0, 0], [0, 0, 16, 0]];
        for (direction, row0) in [
            (Direction::Left, [2, 4, 0, 0]),
            (Direction::Right, [0, 0, 2, 4]),
        ] {
            let mut board = Board::from_grid(grid).unwrap();
            // Index 2 skips row 0's two gaps and spawns into row 1.
            assert!(board.shift(direction, &mut Scripted::new(&[2], &[])));
            assert_eq!(board.grid()[0], row0, "row 0 after {direction}");
        }

        let mut board = Board::from_grid(grid).unwrap();
        assert!(board.shift(Direction::Up, &mut Scripted::new(&[15], &[])));
        assert_eq!(board.grid()[0], [8, 2, 16, 4]);

        let mut board = Board::from_grid(grid).unwrap();
        assert!(board.shift(Direction::Down, &mut Scripted::new(&[0], &[])));
        assert_eq!(board.grid()[3], [8, 2, 16, 4]);
    }

    #[test]
    fn moving_right_merges_from_the_right_edge() {
        let mut board = Board::from_grid([[2, 2, 2, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        assert!(board.shift(Direction::Right, &mut Scripted::new(&[12], &[])));
        assert_eq!(board.grid()[0], [0, 0, 2, 4]);
        assert_eq!(board.score(), 4);
    }

    #[test]
    fn moving_down_merges_columns() {
        let mut board = Board::from_grid([[4, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 0]]).unwrap();
        assert!(board.shift(Direction::Down, &mut Scripted::new(&[1], &[])));
        let column: Vec<Tile> = board.grid().iter().map(|row| row[0]).collect();
        assert_eq!(column, [0, 0, 8, 8]);
        assert_eq!(board.score(), 16);
    }

    #[test]
    fn blocked_move_leaves_everything_untouched() {
        let grid = [[2, 4, 8, 16], [4, 8, 16, 32], [2, 0, 0, 0], [8, 4, 0, 0]];
        let mut board = Board::from_grid(grid).unwrap();
        let snapshot = board.clone();

        assert!(!board.shift(Direction::Left, &mut Scripted::default()));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn shifting_without_merges_conserves_tiles() {
        let grid = [[0, 2, 0, 4], [8, 0, 16, 0], [0, 0, 0, 32], [64, 0, 0, 0]];
        let mut board = Board::from_grid(grid).unwrap();
        assert!(board.shift(Direction::Right, &mut Scripted::new(&[0], &[false])));
        assert_eq!(total(board.grid()), total(&grid) + 4);
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn game_over_needs_a_full_board_without_equal_neighbours() {
        let stuck = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        assert!(Board::from_grid(stuck).unwrap().is_game_over());

        let mut hole = stuck;
        hole[2][1] = 0;
        assert!(!Board::from_grid(hole).unwrap().is_game_over());

        let mut row_pair = stuck;
        row_pair[3][3] = 4;
        assert!(!Board::from_grid(row_pair).unwrap().is_game_over());

        let mut col_pair = stuck;
        col_pair[1][0] = 2;
        assert!(!Board::from_grid(col_pair).unwrap().is_game_over());
    }

    #[test]
    fn game_over_checks_the_last_row_and_column() {
        let mut grid = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 8]];
        assert!(Board::from_grid(grid).unwrap().is_game_over());
        grid[3][3] = 4;
        assert!(!Board::from_grid(grid).unwrap().is_game_over());
    }

    #[test]
    fn spawned_values_are_mostly_twos() {
        let mut rng = Rng::with_seed(2048);
        let trials: u32 = 20_000;
        let mut fours: u32 = 0;
        for _ in 0..trials {
            let mut board = Board::from_grid([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
            assert!(board.shift(Direction::Right, &mut rng));
            let spawned: Vec<Tile> = board
                .grid()
                .iter()
                .flatten()
                .copied()
                .filter(|&tile| tile != 0)
                .collect();
            if spawned.contains(&4) {
                fours += 1;
            }
        }
        let ratio = f64::from(fours) / f64::from(trials);
        assert!((0.08..0.12).contains(&ratio), "four ratio {ratio} drifted from 0.1");
    }

    #[test]
    fn queries_report_the_grid() {
        let board = Board::from_grid([[0, 0, 0, 0], [0, 128, 0, 0], [0; 4], [0, 0, 0, 2]]).unwrap();
        assert_eq!(board.max_tile(), 128);
        assert!(board.reached(128));
        assert!(!board.reached(256));
        assert_eq!(board.tile(4, 0), None);
        assert_eq!(board.empty_cells().len(), 14);
        assert_eq!(board.empty_cells().first(), Some(&(0, 0)));
    }

    #[test]
    fn display_lists_rows_and_score() {
        let board = Board::from_grid([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2048]]).unwrap();
        let text = board.to_string();
        assert_eq!(text.lines().count(), SIZE + 1);
        assert!(text.ends_with("score 0"), "got {text}");
        assert!(text.contains("2048"), "got {text}");
    }

    /// Strategy for an arbitrary reachable-looking grid of empty cells and powers of two.
    fn grid() -> impl Strategy<Value = Grid> {
        let tile = prop_oneof![3 => Just(0_u32), 2 => (1..=10_u32).prop_map(|exp| 1 << exp)];
        prop::array::uniform4(prop::array::uniform4(tile))
    }

    /// Strategy for one of the four directions.
    fn direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn a_move_is_all_or_nothing(grid in grid(), direction in direction(), seed in any::<u64>()) {
            let mut board = Board::from_grid(grid).unwrap();
            let before = board.clone();
            let moved = board.shift(direction, &mut Rng::with_seed(seed));

            if moved {
                prop_assert_ne!(board.grid(), before.grid());
                let spawned = total(board.grid()) - total(before.grid());
                prop_assert!(spawned == 2 || spawned == 4, "spawned {}", spawned);
            } else {
                prop_assert_eq!(&board, &before);
            }
        }

        #[test]
        fn score_never_decreases(grid in grid(), moves in prop::collection::vec(direction(), 1..40), seed in any::<u64>()) {
            let mut board = Board::from_grid(grid).unwrap();
            let mut rng = Rng::with_seed(seed);
            for direction in moves {
                let before = board.score();
                let _moved = board.shift(direction, &mut rng);
                prop_assert!(board.score() >= before);
                prop_assert!(board
                    .grid()
                    .iter()
                    .flatten()
                    .all(|&tile| tile == 0 || (tile >= 2 && tile.is_power_of_two())));
            }
        }
    }
}
