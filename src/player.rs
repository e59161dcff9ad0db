/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::bail;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::trace;

use crate::Move;

/// Who decides the moves for one side of the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Controller {
    /// Moves arrive from outside the engine, such as clicks or typed commands.
    #[default]
    Human,

    /// Moves are chosen by the session's automated [`Player`].
    Computer,
}

impl Controller {
    #[inline(always)]
    pub const fn is_computer(&self) -> bool {
        matches!(self, Self::Computer)
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Computer => "computer",
        }
    }
}

impl FromStr for Controller {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "h" => Ok(Self::Human),
            "computer" | "cpu" | "c" => Ok(Self::Computer),
            _ => bail!("Controller must be either \"human\" or \"computer\". Got {s:?}"),
        }
    }
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A policy for choosing one move out of the current legal move set.
///
/// Implementors are handed moves that have already been filtered for mandatory captures and forced continuations,
/// so any returned move is playable as-is.
pub trait Player: Send {
    /// Select exactly one of `moves`.
    ///
    /// # Panics
    /// If `moves` is empty. Callers must check for a finished game first.
    fn select(&mut self, moves: &[Move]) -> Move;
}

/// Picks uniformly at random among the legal moves.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    /// Creates a [`RandomPlayer`] seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a [`RandomPlayer`] whose choices are reproducible for a given `seed`.
    ///
    /// # Example
    /// ```
    /// # use checkers::*;
    /// let moves = legal_moves(&Board::default(), Color::Red);
    /// let a = RandomPlayer::seeded(7).select(&moves);
    /// let b = RandomPlayer::seeded(7).select(&moves);
    /// assert_eq!(a, b);
    /// ```
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn select(&mut self, moves: &[Move]) -> Move {
        // No randomness needed
        if let [only] = moves {
            return *only;
        }

        let Some(&mv) = moves.choose(&mut self.rng) else {
            panic!("Cannot select a move from an empty move set");
        };
        trace!(%mv, "selected at random from {} moves", moves.len());
        mv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{legal_moves, Board, Color, Square};

    #[test]
    fn test_single_move_is_deterministic() {
        let only = Move::shift(Square::new(0, 0), Square::new(1, 1));
        let mut player = RandomPlayer::new();
        for _ in 0..100 {
            assert_eq!(player.select(&[only]), only);
        }
    }

    #[test]
    fn test_selection_comes_from_set() {
        let moves = legal_moves(&Board::default(), Color::Red);
        let mut player = RandomPlayer::seeded(42);
        for _ in 0..100 {
            assert!(moves.contains(&player.select(&moves)));
        }
    }

    #[test]
    fn test_seeded_players_agree() {
        let moves = legal_moves(&Board::default(), Color::Red);
        let mut first = RandomPlayer::seeded(7);
        let mut second = RandomPlayer::seeded(7);
        for _ in 0..100 {
            assert_eq!(first.select(&moves), second.select(&moves));
        }
    }

    #[test]
    fn test_all_moves_reachable() {
        let moves = legal_moves(&Board::default(), Color::Red);
        let mut player = RandomPlayer::seeded(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            seen.insert(player.select(&moves));
        }
        assert_eq!(seen.len(), moves.len());
    }

    #[test]
    #[should_panic]
    fn test_empty_set_panics() {
        RandomPlayer::new().select(&[]);
    }

    #[test]
    fn test_controller_parsing() {
        assert_eq!("Computer".parse::<Controller>().unwrap(), Controller::Computer);
        assert_eq!("h".parse::<Controller>().unwrap(), Controller::Human);
        assert!("robot".parse::<Controller>().is_err());
    }
}
