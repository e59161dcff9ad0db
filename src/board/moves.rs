/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::Square;

/// Maximum possible number of moves available to one side in a given position.
///
/// Layouts may put a piece on any of the 64 cells, and each piece has at most four diagonals.
pub const MAX_NUM_MOVES: usize = 256;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// A candidate transition of a single piece.
///
/// A move with no captured cell is a *shift*: one diagonal step onto an empty cell.
/// A move with a captured cell is a *capture*: a two-cell diagonal jump over the piece on `captured`.
///
/// Moves are derived data; they are regenerated from the board whenever they are needed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
    captured: Option<Square>,
}

impl Move {
    /// Creates a new shift from `from` to `to`.
    ///
    /// # Example
    /// ```
    /// # use checkers::{Move, Square};
    /// let mv = Move::shift(Square::new(2, 2), Square::new(3, 3));
    /// assert!(!mv.is_capture());
    /// assert_eq!(mv.to_string(), "2,2-3,3");
    /// ```
    #[inline(always)]
    pub const fn shift(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captured: None,
        }
    }

    /// Creates a new capture from `from` to `to`, jumping over `captured`.
    ///
    /// # Example
    /// ```
    /// # use checkers::{Move, Square};
    /// let mv = Move::capture(Square::new(1, 1), Square::new(3, 3), Square::new(2, 2));
    /// assert!(mv.is_capture());
    /// assert_eq!(mv.to_string(), "1,1x3,3");
    /// ```
    #[inline(always)]
    pub const fn capture(from: Square, to: Square, captured: Square) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
        }
    }

    /// The cell the moving piece starts on.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The cell the moving piece lands on.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The cell of the piece being jumped, if this is a capture.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Square> {
        self.captured
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns `true` if this move goes from `from` to `to`, regardless of what (if anything) it captures.
    #[inline(always)]
    pub fn connects(&self, from: Square, to: Square) -> bool {
        self.from == from && self.to == to
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{sep}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.captured {
            Some(captured) => write!(f, "{self} (captures {captured})"),
            None => write!(f, "{self}"),
        }
    }
}
