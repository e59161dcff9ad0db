/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::AddAssign};

use tracing::{debug, info};

use crate::{Color, Controller, Layout, RandomPlayer, Session};

/// Default number of moves after which an automated game is abandoned.
///
/// There is no draw rule, so two kings can otherwise chase each other forever.
pub const DEFAULT_MAX_PLIES: usize = 400;

/// How a single automated game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameResult {
    Won(Color),

    /// The game was abandoned after reaching the ply limit.
    Unfinished,
}

/// Results of a series of automated games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SeriesTally {
    pub red_wins: usize,
    pub white_wins: usize,
    pub unfinished: usize,
}

impl SeriesTally {
    /// Total number of games tallied.
    #[inline(always)]
    pub const fn games(&self) -> usize {
        self.red_wins + self.white_wins + self.unfinished
    }

    /// Number of games won by `color`.
    #[inline(always)]
    pub const fn wins(&self, color: Color) -> usize {
        match color {
            Color::Red => self.red_wins,
            Color::White => self.white_wins,
        }
    }
}

impl AddAssign<GameResult> for SeriesTally {
    fn add_assign(&mut self, result: GameResult) {
        match result {
            GameResult::Won(Color::Red) => self.red_wins += 1,
            GameResult::Won(Color::White) => self.white_wins += 1,
            GameResult::Unfinished => self.unfinished += 1,
        }
    }
}

impl fmt::Display for SeriesTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: red {}, white {}, unfinished {}",
            self.games(),
            self.red_wins,
            self.white_wins,
            self.unfinished
        )
    }
}

/// Plays one computer-vs-computer game on `session` until it ends or `max_plies` moves have been applied.
///
/// The session is left in whatever state the game finished in.
pub fn play_out(session: &mut Session, max_plies: usize) -> GameResult {
    while session.plies() < max_plies {
        if let Some(winner) = session.winner() {
            return GameResult::Won(winner);
        }

        if session.play_automated_move().is_none() {
            break;
        }
    }

    // The final move may have ended the game
    session
        .winner()
        .map_or(GameResult::Unfinished, GameResult::Won)
}

/// Plays `games` computer-vs-computer games from `layout`, one after the other, and tallies the results.
///
/// With a `seed`, the whole series is reproducible.
///
/// # Example
/// ```
/// # use checkers::*;
/// let tally = run_series(&Layout::standard(), 3, 400, Some(1));
/// assert_eq!(tally.games(), 3);
/// ```
pub fn run_series(
    layout: &Layout,
    games: usize,
    max_plies: usize,
    seed: Option<u64>,
) -> SeriesTally {
    let player = match seed {
        Some(seed) => RandomPlayer::seeded(seed),
        None => RandomPlayer::new(),
    };

    let mut session = Session::new(layout)
        .with_controllers(Controller::Computer, Controller::Computer)
        .with_player(player);

    let mut tally = SeriesTally::default();
    for game in 1..=games {
        let result = play_out(&mut session, max_plies);
        debug!(
            game,
            plies = session.plies(),
            ?result,
            "Automated game finished"
        );
        tally += result;
        session.reset(layout);
    }

    info!("Series complete. {tally}");
    tally
}
