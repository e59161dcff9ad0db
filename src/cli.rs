/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{str::FromStr, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use crate::{Controller, Layout, Square, DEFAULT_MAX_PLIES};

/// Default time the computer waits before playing each of its moves, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 500;

/// Startup configuration for the engine.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Who plays Red.
    #[arg(long, default_value = "human")]
    pub red: Controller,

    /// Who plays White.
    #[arg(long, default_value = "human")]
    pub white: Controller,

    /// How long the computer waits before each of its moves, in milliseconds.
    ///
    /// Any command received during this delay is handled first.
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Seed for the automated player, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Name of a built-in layout to start from.
    #[arg(long, conflicts_with = "layout")]
    pub preset: Option<String>,

    /// A 64-symbol layout to start from. Whitespace is ignored.
    #[arg(long)]
    pub layout: Option<Layout>,

    /// Maximum level of log events written to stderr.
    #[arg(long, default_value = "warn")]
    pub log_level: Level,

    /// A command to execute on startup, before reading from stdin.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// The layout games start from, as selected by `--preset` or `--layout`.
    pub fn starting_layout(&self) -> Result<Layout> {
        match (&self.preset, self.layout) {
            (Some(name), _) => Layout::preset(name),
            (None, Some(layout)) => Ok(layout),
            (None, None) => Ok(Layout::standard()),
        }
    }

    #[inline(always)]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// A command to be sent to the engine.
#[derive(Debug, Clone, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<ENGINE COMMAND>")
)]
pub enum EngineCommand {
    /// Play automated moves immediately until a human-controlled side is to move.
    Auto,

    /// Click on a cell: select one of your pieces, or move the selected piece there.
    Click { square: Square },

    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Quit the engine.
    #[command(alias = "quit")]
    Exit,

    /// Print the current board as a 64-symbol layout.
    Layout,

    /// Shows all legal moves in the current position, or for a specific piece.
    Moves {
        square: Option<Square>,

        /// If set, moves will be sorted by origin and destination.
        ///
        /// By default, moves are listed in generation order.
        #[arg(short, long, default_value = "false")]
        sort: bool,
    },

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Move the piece on `from` to `to`, if that is a legal move.
    #[command(alias = "move")]
    Play { from: Square, to: Square },

    /// Change who controls each side.
    Players { red: Controller, white: Controller },

    /// Start a new game.
    ///
    /// Without arguments, the game restarts from the layout it was last reset to.
    #[command(alias = "new")]
    Reset {
        /// Name of a built-in layout.
        #[arg(short, long, conflicts_with = "layout")]
        preset: Option<String>,

        /// A 64-symbol layout. Rows may be given as separate words.
        #[arg(short, long, num_args = 1..)]
        layout: Vec<String>,
    },

    /// Play a series of computer-vs-computer games from the current starting layout, and print the results.
    Series {
        /// Number of games to play.
        games: usize,

        /// Games still running after this many moves are abandoned.
        #[arg(short, long, default_value_t = DEFAULT_MAX_PLIES)]
        max_plies: usize,

        /// Seed for the automated player. Defaults to the engine's seed, if any.
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },

    /// Print whose turn it is, or who won.
    Status,
}

impl EngineCommand {
    /// Resolves the arguments of a `reset` command into the layout to load, if one was given.
    pub(crate) fn reset_layout(preset: Option<&str>, layout: &[String]) -> Result<Option<Layout>> {
        if let Some(name) = preset {
            return Layout::preset(name).map(Some);
        }

        if layout.is_empty() {
            return Ok(None);
        }

        let layout = layout
            .concat()
            .parse()
            .context("Failed to parse layout for reset")?;

        Ok(Some(layout))
    }
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    /// Attempt to parse an [`EngineCommand`] from a whitespace-separated string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LAYOUT_PROMOTION;

    #[test]
    fn test_parse_commands() {
        assert!(matches!(
            "d".parse::<EngineCommand>(),
            Ok(EngineCommand::Display)
        ));

        let Ok(EngineCommand::Play { from, to }) = "play 2,2 3,3".parse::<EngineCommand>() else {
            panic!("Failed to parse play command");
        };
        assert_eq!(from, Square::new(2, 2));
        assert_eq!(to, Square::new(3, 3));

        let Ok(EngineCommand::Players { red, white }) =
            "players human computer".parse::<EngineCommand>()
        else {
            panic!("Failed to parse players command");
        };
        assert_eq!(red, Controller::Human);
        assert_eq!(white, Controller::Computer);

        let Ok(EngineCommand::Series {
            games,
            max_plies,
            seed,
        }) = "series 10 --seed 4".parse::<EngineCommand>()
        else {
            panic!("Failed to parse series command");
        };
        assert_eq!(games, 10);
        assert_eq!(max_plies, DEFAULT_MAX_PLIES);
        assert_eq!(seed, Some(4));

        assert!("play 2,2".parse::<EngineCommand>().is_err());
        assert!("click 9,9".parse::<EngineCommand>().is_err());
        assert!("fly".parse::<EngineCommand>().is_err());
    }

    #[test]
    fn test_reset_layout_arguments() {
        let Ok(EngineCommand::Reset { preset, layout }) =
            "reset --preset promotion".parse::<EngineCommand>()
        else {
            panic!("Failed to parse reset command");
        };
        let expected: Layout = LAYOUT_PROMOTION.parse().unwrap();
        let resolved = EngineCommand::reset_layout(preset.as_deref(), &layout).unwrap();
        assert_eq!(resolved, Some(expected));

        // Rows given as separate words
        let rows = LAYOUT_PROMOTION
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let Ok(EngineCommand::Reset { preset, layout }) =
            format!("reset -l {rows}").parse::<EngineCommand>()
        else {
            panic!("Failed to parse reset command with a layout");
        };
        let resolved = EngineCommand::reset_layout(preset.as_deref(), &layout).unwrap();
        assert_eq!(resolved, Some(expected));

        let Ok(EngineCommand::Reset { preset, layout }) = "reset".parse::<EngineCommand>() else {
            panic!("Failed to parse bare reset command");
        };
        assert_eq!(
            EngineCommand::reset_layout(preset.as_deref(), &layout).unwrap(),
            None
        );

        assert!(EngineCommand::reset_layout(Some("nonexistent"), &[]).is_err());
        assert!(EngineCommand::reset_layout(None, &["r.w".to_string()]).is_err());
    }

    #[test]
    fn test_startup_options() {
        let cli = Cli::try_parse_from([
            "checkers",
            "--white",
            "computer",
            "--preset",
            "king-loop",
            "--delay-ms",
            "0",
            "perft",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.red, Controller::Human);
        assert_eq!(cli.white, Controller::Computer);
        assert_eq!(cli.delay(), Duration::ZERO);
        assert_eq!(cli.log_level, Level::WARN);
        assert_eq!(cli.command, ["perft", "3"]);
        assert_eq!(
            cli.starting_layout().unwrap(),
            Layout::preset("king-loop").unwrap()
        );

        let cli = Cli::try_parse_from(["checkers"]).unwrap();
        assert_eq!(cli.starting_layout().unwrap(), Layout::standard());
        assert_eq!(cli.delay(), Duration::from_millis(DEFAULT_DELAY_MS));
        assert!(cli.command.is_empty());
    }
}
