//! The game module contains the top-level loop that ties the board engine, the input adapter and
//! the renderer together.
//!
//! It holds the `init()` function that sets up logging, the terminal and the random source before
//! running sessions one after the other, as well as the per-session state that decides which
//! banner to show and when the session stops accepting moves.

use std::thread;

use anyhow::Result;
use console::{style, Term};

use crate::board::{Board, Tile};
use crate::config::Config;
use crate::input::{play_again, read_command, Command};
use crate::render::{render, Banner, TermCanvas};
use crate::rng::{session_rng, Randomness};

/// This struct holds one game session: the board being played plus the little bit of bookkeeping
/// the loop needs on top of it.
pub(crate) struct Session {
    /// The board being played.
    board: Board,
    /// The tile value that counts as winning.
    target: Tile,
    /// Set once the target banner has been shown, so it only shows once.
    celebrated: bool,
}

impl Session {
    /// This function starts a session with a freshly seeded board.
    pub(crate) fn new<R: Randomness + ?Sized>(target: Tile, rng: &mut R) -> Self {
        Self::with_board(Board::new(rng), target)
    }

    /// This function starts a session from a board that is already set up.
    pub(crate) const fn with_board(board: Board, target: Tile) -> Self {
        Self {
            board,
            target,
            celebrated: false,
        }
    }

    /// This function returns the board being played.
    pub(crate) const fn board(&self) -> &Board {
        &self.board
    }

    /// This function tells whether the session has ended because no move is left.
    pub(crate) fn is_over(&self) -> bool {
        self.board.is_game_over()
    }

    /// This function picks the banner for the next frame. The target banner is handed out once,
    /// on the first frame where the target tile is on the board.
    pub(crate) fn banner(&mut self) -> Banner {
        if self.is_over() {
            Banner::GameOver
        } else if !self.celebrated && self.board.reached(self.target) {
            self.celebrated = true;
            log::info!("reached {} with score {}", self.target, self.board.score());
            Banner::Reached(self.target)
        } else {
            Banner::Hidden
        }
    }

    /// This function applies one command and tells whether the session goes on. Moves are refused
    /// once the session is over.
    pub(crate) fn handle<R: Randomness + ?Sized>(&mut self, command: Command, rng: &mut R) -> bool {
        match command {
            Command::Quit => false,
            Command::Shift(_) if self.is_over() => false,
            Command::Shift(direction) => {
                let _moved = self.board.shift(direction, rng);
                true
            }
        }
    }
}

/// Initializes logging, the terminal and the random source, and then runs game sessions until
/// the player is done. This is a `main()` function of sorts though it is still called from
/// main.rs.
///
/// # Errors
///
/// The function may return any one of the following errors:
///
/// - `log::SetLoggerError`, if a logger was already installed
/// - `io::Error`, from reading keys or drawing on the terminal
/// - `dialoguer::Error`, from the play-again prompt
pub fn init() -> Result<()> {
    env_logger::try_init()?;

    let config = Config::from_args();
    let term = Term::stdout();
    let mut rng = session_rng(config.seed);
    log::info!("starting with {config:?}");

    term.set_title("2048");
    term.hide_cursor()?;

    let outcome = run(&term, &config, &mut rng);

    // the cursor comes back even when a session failed half-way through
    term.show_cursor()?;
    outcome
}

/// This function runs sessions back to back, reporting each one's result, until the player quits
/// or declines another round.
fn run<R: Randomness + ?Sized>(term: &Term, config: &Config, rng: &mut R) -> Result<()> {
    loop {
        let (session, quit) = play(term, config, rng)?;
        let board = session.board();

        term.clear_screen()?;
        term.write_line(&format!(
            "{} {}, highest tile {}",
            style("Final score").bold(),
            style(board.score()).bold().cyan(),
            style(board.max_tile()).bold().cyan()
        ))?;
        log::info!("session ended:\n{board}");

        if quit || !config.replay || !play_again(term)? {
            term.write_line(&format!("{}", style("Thanks for playing").bold()))?;
            break Ok(());
        }
    }
}

/// This function plays a single session on the terminal: draw, read one command, apply it, and
/// again, until the player quits or no move is left. Returns the finished session along with
/// whether the player quit on purpose.
fn play<R: Randomness + ?Sized>(
    term: &Term,
    config: &Config,
    rng: &mut R,
) -> Result<(Session, bool)> {
    let mut session = Session::new(config.target, rng);
    let mut canvas = TermCanvas::new(term);

    term.clear_screen()?;

    loop {
        let banner = session.banner();
        render(session.board(), banner, &mut canvas)?;

        if session.is_over() {
            log::info!("no moves left with score {}", session.board().score());
            thread::sleep(config.game_over_delay);
            break Ok((session, false));
        }

        let command = read_command(term)?;
        if !session.handle(command, rng) {
            break Ok((session, true));
        }
    }
}
