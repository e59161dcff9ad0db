/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Context, Result};

/// Represents a single cell on an `8x8` checkers board.
///
/// Internally encoded as `x + y * 8`, so the indices of each cell are given as follows:
/// ```text
/// 7| 56 57 58 59 60 61 62 63
/// 6| 48 49 50 51 52 53 54 55
/// 5| 40 41 42 43 44 45 46 47
/// 4| 32 33 34 35 36 37 38 39
/// 3| 24 25 26 27 28 29 30 31
/// 2| 16 17 18 19 20 21 22 23
/// 1|  8  9 10 11 12 13 14 15
/// 0|  0  1  2  3  4  5  6  7
///  +------------------------
///     0  1  2  3  4  5  6  7
/// ```
///
/// Row `0` is Red's back row and row `7` is White's back row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    /// Number of cells on the board.
    pub const COUNT: usize = 64;

    /// Number of cells along either edge of the board.
    pub const SIZE: u8 = 8;

    /// Largest coordinate along either axis.
    pub const MAX: u8 = Self::SIZE - 1;

    /// Creates a new [`Square`] from its `x` (column) and `y` (row) coordinates.
    ///
    /// # Panics
    /// If either coordinate is greater than `7`. Out-of-range coordinates are a programming error.
    ///
    /// # Example
    /// ```
    /// # use checkers::Square;
    /// let sq = Square::new(3, 4);
    /// assert_eq!(sq.x(), 3);
    /// assert_eq!(sq.y(), 4);
    /// assert_eq!(sq.index(), 35);
    /// ```
    #[inline(always)]
    pub const fn new(x: u8, y: u8) -> Self {
        assert!(
            x <= Self::MAX && y <= Self::MAX,
            "Square coordinates must be between [0,7]"
        );
        Self(x + y * Self::SIZE)
    }

    /// Creates a new [`Square`] from user-supplied coordinates, returning an error if they are off the board.
    ///
    /// # Example
    /// ```
    /// # use checkers::Square;
    /// assert!(Square::try_new(7, 7).is_ok());
    /// assert!(Square::try_new(8, 0).is_err());
    /// ```
    #[inline(always)]
    pub fn try_new(x: u8, y: u8) -> Result<Self> {
        if x > Self::MAX || y > Self::MAX {
            bail!("Square coordinates must be between [0,7]. Got ({x}, {y})");
        }

        Ok(Self::new(x, y))
    }

    /// Creates a new [`Square`] from an index in `[0,63]`.
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::COUNT {
            bail!("Square index must be between [0,63]. Got {index}");
        }

        Ok(Self(index as u8))
    }

    /// An iterator over all cells on the board, starting at `(0, 0)` and moving along each row.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    /// The column of this [`Square`].
    #[inline(always)]
    pub const fn x(&self) -> u8 {
        self.0 % Self::SIZE
    }

    /// The row of this [`Square`].
    #[inline(always)]
    pub const fn y(&self) -> u8 {
        self.0 / Self::SIZE
    }

    /// Returns this [`Square`] as a `usize`, suitable for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if this is one of the playable (dark) cells, where `x + y` is even.
    ///
    /// # Example
    /// ```
    /// # use checkers::Square;
    /// assert!(Square::new(0, 0).is_dark());
    /// assert!(!Square::new(1, 0).is_dark());
    /// ```
    #[inline(always)]
    pub const fn is_dark(&self) -> bool {
        (self.x() + self.y()) % 2 == 0
    }

    /// Offsets this [`Square`] by the provided deltas, returning [`None`] if the result would leave the board.
    ///
    /// # Example
    /// ```
    /// # use checkers::Square;
    /// let sq = Square::new(0, 0);
    /// assert_eq!(sq.offset(1, 1), Some(Square::new(1, 1)));
    /// assert_eq!(sq.offset(-1, 1), None);
    /// assert_eq!(Square::new(7, 7).offset(0, 1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, dx: i8, dy: i8) -> Option<Self> {
        let Some(x) = self.x().checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y().checked_add_signed(dy) else {
            return None;
        };

        if x > Self::MAX || y > Self::MAX {
            return None;
        }

        Some(Self(x + y * Self::SIZE))
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Parses a [`Square`] from a pair of coordinates in the form `"x,y"`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let Some((x, y)) = s.trim().split_once(',') else {
            bail!("Square must be given as \"x,y\". Got {s:?}");
        };

        let x = x
            .trim()
            .parse::<u8>()
            .with_context(|| format!("Invalid x coordinate in {s:?}"))?;
        let y = y
            .trim()
            .parse::<u8>()
            .with_context(|| format!("Invalid y coordinate in {s:?}"))?;

        Self::try_new(x, y)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x(), self.y())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        // Test the four corners
        let bottom_left = Square::new(0, 0);
        assert_eq!(bottom_left.index(), 0);
        assert_eq!(bottom_left.to_string(), "0,0");

        let top_right = Square::new(7, 7);
        assert_eq!(top_right.index(), 63);
        assert_eq!((top_right.x(), top_right.y()), (7, 7));

        let top_left = Square::new(0, 7);
        assert_eq!(top_left.index(), 56);
    }

    #[test]
    fn test_parsing() {
        assert_eq!("3,4".parse::<Square>().unwrap(), Square::new(3, 4));
        assert_eq!(" 0 , 7 ".parse::<Square>().unwrap(), Square::new(0, 7));

        assert!("8,0".parse::<Square>().is_err());
        assert!("34".parse::<Square>().is_err());
        assert!("a,1".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
    }

    #[test]
    fn test_offsets_respect_edges() {
        let left_edge = Square::new(0, 3);
        assert_eq!(left_edge.offset(-1, 1), None);
        assert_eq!(left_edge.offset(1, 1), Some(Square::new(1, 4)));

        let right_edge = Square::new(7, 3);
        assert_eq!(right_edge.offset(1, -1), None);
        assert_eq!(right_edge.offset(-2, -2), Some(Square::new(5, 1)));

        assert_eq!(Square::new(3, 6).offset(1, 2), None);
        assert_eq!(Square::new(3, 1).offset(-1, -2), None);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        let _ = Square::new(8, 0);
    }

    #[test]
    fn test_indexing() {
        let mut board = [0; 64];
        board[Square::new(3, 4)] = u8::MAX;
        assert_eq!(board[35], u8::MAX);
    }

    #[test]
    fn test_iter_order() {
        let squares = Square::iter().collect::<Vec<_>>();
        assert_eq!(squares.len(), Square::COUNT);
        assert_eq!(squares[0], Square::new(0, 0));
        assert_eq!(squares[8], Square::new(0, 1));
        assert_eq!(squares[63], Square::new(7, 7));
    }
}
