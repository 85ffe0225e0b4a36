//! This module holds the command-line interface of the game and the plain configuration value it
//! produces. Every option can also be set through an environment variable.

use std::time::Duration;

use clap::Parser;

use crate::board::Tile;

/// This struct holds the command-line arguments as parsed by clap. It uses the derive attribute
/// and field attributes for each option, with an environment variable as a fallback.
#[derive(Parser, Debug)]
#[command(name = "slide2048", version, about)]
#[command(next_line_help = true)]
struct Cli {
    /// Seed for the tile spawner.
    ///
    /// Two sessions started with the same seed and played with the same keys unfold exactly the
    /// same way. Without a seed every session is different.
    #[arg(long, env = "SLIDE2048_SEED", value_name = "SEED")]
    seed: Option<u64>,
    /// The tile value that counts as winning; 2048 by default.
    ///
    /// Reaching it shows a message once, and play goes on until no move is left. It must be a
    /// power of two no smaller than 4.
    #[arg(long, env = "SLIDE2048_TARGET", value_name = "TILE")]
    #[arg(default_value_t = 2048, value_parser = verify_target)]
    target: Tile,
    /// How long the game-over screen stays up before the session ends, in milliseconds.
    #[arg(long, env = "SLIDE2048_GAME_OVER_DELAY", value_name = "MILLIS")]
    #[arg(default_value_t = 2000)]
    game_over_delay: u64,
    /// Exit once the first session ends instead of offering another round.
    #[arg(long)]
    no_replay: bool,
}

/// This struct holds the settings a game session runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    /// Seed for the tile spawner; `None` picks a fresh one.
    pub(crate) seed: Option<u64>,
    /// The tile value that counts as winning.
    pub(crate) target: Tile,
    /// Pause between showing the game-over banner and ending the session.
    pub(crate) game_over_delay: Duration,
    /// Whether to offer another round once a session ends.
    pub(crate) replay: bool,
}

impl Config {
    /// This function reads the configuration from the process arguments and environment. On a bad
    /// argument, or on `--help`/`--version`, clap prints its message and exits the process.
    #[must_use]
    pub(crate) fn from_args() -> Self {
        Cli::parse().into()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            target: 2048,
            game_over_delay: Duration::from_millis(2000),
            replay: true,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            seed: cli.seed,
            target: cli.target,
            game_over_delay: Duration::from_millis(cli.game_over_delay),
            replay: !cli.no_replay,
        }
    }
}

/// This function serves as a value parser for the `target` option. It accepts only powers of two
/// from 4 upward, since a target of 2 would be met by the opening tiles.
fn verify_target(input: &str) -> Result<Tile, String> {
    let target: Tile = input
        .trim()
        .parse()
        .map_err(|err| format!("`{input}` is not a tile value: {err}"))?;

    if target >= 4 && target.is_power_of_two() {
        Ok(target)
    } else {
        Err(format!("`{target}` is not a power of two of at least 4"))
    }
}
