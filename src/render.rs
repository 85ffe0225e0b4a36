//! This module draws the board. It is split in two halves: a small [`Canvas`] interface with the
//! drawing primitives the game needs, and the [`render`] function that lays out a board on any
//! canvas. [`TermCanvas`] implements the interface on top of a `console` terminal.

use std::io;

use console::{pad_str, style, Alignment, Color, Term};

use crate::board::{Board, Tile, SIZE};

/// Width of a tile, in terminal columns.
const TILE_WIDTH: usize = 8;
/// Height of a tile, in terminal rows.
const TILE_HEIGHT: usize = 3;
/// Blank space around and between tiles.
const GUTTER: usize = 1;
/// Width of the whole board, gutters included.
const BOARD_WIDTH: usize = SIZE * (TILE_WIDTH + GUTTER) + GUTTER;
/// Terminal row the score is written on, right below the grid.
const SCORE_ROW: usize = SIZE * (TILE_HEIGHT + GUTTER) + GUTTER;
/// Terminal row for banners, one blank line below the score.
const BANNER_ROW: usize = SCORE_ROW + 2;

/// Background colors for tiles 2 through 2048, in order. Larger tiles reuse the last one.
const PALETTE: [u8; 11] = [227, 154, 72, 152, 74, 73, 216, 209, 203, 222, 220];
/// Background color of an empty cell.
const EMPTY_FILL: u8 = 181;

/// This struct holds a rectangle of terminal cells, measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rect {
    /// The leftmost column.
    pub(crate) x: usize,
    /// The topmost row.
    pub(crate) y: usize,
    /// The number of columns covered.
    pub(crate) width: usize,
    /// The number of rows covered.
    pub(crate) height: usize,
}

/// This struct holds the two colors a tile is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Paint {
    /// The background of the rectangle.
    pub(crate) fill: Color,
    /// The color of the text on top of it.
    pub(crate) ink: Color,
}

/// This enum holds the message, if any, shown below the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Banner {
    /// No more moves are possible.
    GameOver,
    /// Nothing to announce; clears whatever was there before.
    Hidden,
    /// The target tile has just appeared on the board.
    Reached(Tile),
}

impl Banner {
    /// This function returns the text of the banner; the hidden banner has none.
    #[must_use]
    pub(crate) fn text(self) -> String {
        match self {
            Self::GameOver => "Game Over".to_owned(),
            Self::Hidden => String::new(),
            Self::Reached(target) => format!("You reached {target}! Keep going"),
        }
    }
}

/// This trait holds the drawing primitives the renderer needs. Anything able to paint a colored
/// rectangle with some text on it and write a couple of status lines can show the game.
pub(crate) trait Canvas {
    /// This function paints `rect` with `paint.fill` and centers `text` in it using `paint.ink`.
    /// An empty `text` paints the rectangle only.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the underlying output.
    fn draw_tile(&mut self, rect: Rect, paint: Paint, text: &str) -> io::Result<()>;

    /// This function replaces the score line with `text`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the underlying output.
    fn draw_score(&mut self, text: &str) -> io::Result<()>;

    /// This function replaces the banner line with `text`; an empty `text` clears it.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the underlying output.
    fn draw_banner(&mut self, text: &str) -> io::Result<()>;
}

/// This function returns the rectangle the cell at `(row, col)` occupies on screen.
#[must_use]
pub(crate) const fn tile_rect(row: usize, col: usize) -> Rect {
    Rect {
        x: GUTTER + col * (TILE_WIDTH + GUTTER),
        y: GUTTER + row * (TILE_HEIGHT + GUTTER),
        width: TILE_WIDTH,
        height: TILE_HEIGHT,
    }
}

/// This function picks the colors for a tile value. Twos and fours get dark text, everything
/// larger light text, and an empty cell gets the neutral fill.
#[must_use]
pub(crate) fn tile_paint(value: Tile) -> Paint {
    if value == 0 {
        return Paint {
            fill: Color::Color256(EMPTY_FILL),
            ink: Color::Black,
        };
    }

    // 2 is the first entry, so the exponent minus one indexes the palette.
    let slot = usize::try_from(value.trailing_zeros().saturating_sub(1)).unwrap_or(usize::MAX);
    let fill = PALETTE
        .get(slot)
        .or_else(|| PALETTE.last())
        .copied()
        .map_or(Color::White, Color::Color256);
    let ink = if value <= 4 { Color::Black } else { Color::White };

    Paint { fill, ink }
}

/// This function draws a whole frame: every cell of `board`, its score, and the given banner.
///
/// # Errors
///
/// Returns the first error the canvas reports.
pub(crate) fn render<C: Canvas + ?Sized>(board: &Board, banner: Banner, canvas: &mut C) -> io::Result<()> {
    for (row, cells) in board.grid().iter().enumerate() {
        for (col, &value) in cells.iter().enumerate() {
            let text = if value == 0 {
                String::new()
            } else {
                value.to_string()
            };
            canvas.draw_tile(tile_rect(row, col), tile_paint(value), &text)?;
        }
    }

    canvas.draw_score(&format!("Score: {}", board.score()))?;
    canvas.draw_banner(&banner.text())
}

/// This struct draws on a `console` terminal by moving the cursor to each rectangle and writing
/// styled, padded text over it.
pub(crate) struct TermCanvas<'term> {
    /// The terminal every primitive writes to.
    term: &'term Term,
}

impl<'term> TermCanvas<'term> {
    /// This function wraps a terminal. It does not clear it; the caller decides when a fresh
    /// screen is needed.
    #[must_use]
    pub(crate) const fn new(term: &'term Term) -> Self {
        Self { term }
    }

    /// Writes `text` centered across the board's width on terminal row `y`, erasing what was
    /// there.
    fn write_line_at(&self, y: usize, text: &str) -> io::Result<()> {
        self.term.move_cursor_to(0, y)?;
        self.term.clear_line()?;
        self.term
            .write_str(&pad_str(text, BOARD_WIDTH, Alignment::Center, None))
    }
}

impl Canvas for TermCanvas<'_> {
    fn draw_tile(&mut self, rect: Rect, paint: Paint, text: &str) -> io::Result<()> {
        let middle = rect.height / 2;

        for offset in 0..rect.height {
            let content = if offset == middle { text } else { "" };
            let padded = pad_str(content, rect.width, Alignment::Center, None);
            self.term.move_cursor_to(rect.x, rect.y + offset)?;
            self.term.write_str(&format!(
                "{}",
                style(padded).bg(paint.fill).fg(paint.ink).bold()
            ))?;
        }

        Ok(())
    }

    fn draw_score(&mut self, text: &str) -> io::Result<()> {
        self.write_line_at(SCORE_ROW, &format!("{}", style(text).bold()))
    }

    fn draw_banner(&mut self, text: &str) -> io::Result<()> {
        self.write_line_at(BANNER_ROW, &format!("{}", style(text).bold().red()))
    }
}
