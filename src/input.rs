//! This module contains everything related to taking input from the player. Raw key presses are
//! read through `console` and translated into [`Command`]s, so the rest of the game never sees a
//! key code; the end-of-session question goes through `dialoguer`.

use anyhow::Result;
use console::{style, Key, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::direction::Direction;

/// This enum holds what a key press can ask the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// Leave the current session, the terminal equivalent of closing the window.
    Quit,
    /// Slide every tile toward one edge.
    Shift(Direction),
}

/// This function translates a key press into a command. The arrow keys, `wasd` and `hjkl` move
/// tiles, `q` and Escape quit, and every other key is ignored by returning `None`.
#[must_use]
pub(crate) const fn translate(key: &Key) -> Option<Command> {
    match *key {
        Key::ArrowDown | Key::Char('s' | 'j') => Some(Command::Shift(Direction::Down)),
        Key::ArrowLeft | Key::Char('a' | 'h') => Some(Command::Shift(Direction::Left)),
        Key::ArrowRight | Key::Char('d' | 'l') => Some(Command::Shift(Direction::Right)),
        Key::ArrowUp | Key::Char('w' | 'k') => Some(Command::Shift(Direction::Up)),
        Key::Escape | Key::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

/// This function blocks until the player presses a key that means something to the game, and
/// returns the matching command. Unbound keys are skipped.
pub(crate) fn read_command(term: &Term) -> Result<Command> {
    loop {
        let key = term.read_key()?;

        if let Some(command) = translate(&key) {
            break Ok(command);
        }

        log::trace!("ignored key {key:?}");
    }
}

/// This function asks the player whether they want to start another session once the current one
/// has ended. Enter accepts the default, which is to play again.
pub(crate) fn play_again(term: &Term) -> Result<bool> {
    let again = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{}", style("Play another round?").bold()))
        .default(true)
        .interact_on(term)?;

    Ok(again)
}
