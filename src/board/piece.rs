/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Neg},
};

use anyhow::{bail, Result};

use super::Square;

/// Represents the color of a player or piece on a checkers board.
///
/// Red always moves first, and therefore [`Color`] defaults to [`Color::Red`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    Red,
    White,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with Red.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Red, Self::White]
    }

    /// Returns this [`Color`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use checkers::Color;
    /// assert_eq!(Color::Red.opponent(), Color::White);
    /// assert_eq!(Color::White.opponent(), Color::Red);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::Red => Self::White,
            Self::White => Self::Red,
        }
    }

    /// Returns this [`Color`] as a `usize`, suitable for indexing into lists.
    ///
    /// Will be `0` for Red, `1` for White.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The change in `y` when a piece of this [`Color`] moves towards the opponent's back row.
    ///
    /// # Example
    /// ```
    /// # use checkers::Color;
    /// assert_eq!(Color::Red.forward(), 1);
    /// assert_eq!(Color::White.forward(), -1);
    /// ```
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::Red => 1,
            Self::White => -1,
        }
    }

    /// The row on which a Man of this [`Color`] is promoted to a King.
    ///
    /// # Example
    /// ```
    /// # use checkers::Color;
    /// assert_eq!(Color::Red.promotion_row(), 7);
    /// assert_eq!(Color::White.promotion_row(), 0);
    /// ```
    #[inline(always)]
    pub const fn promotion_row(&self) -> u8 {
        match self {
            Self::Red => Square::MAX,
            Self::White => 0,
        }
    }

    /// The row this [`Color`] starts from, which is the opponent's promotion row.
    #[inline(always)]
    pub const fn home_row(&self) -> u8 {
        self.opponent().promotion_row()
    }

    /// Fetches a human-readable name for this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::White => "white",
        }
    }

    /// Parses a [`Color`] from its layout character (`'r'` or `'w'`, case-insensitive).
    #[inline(always)]
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'r' | 'R' => Ok(Self::Red),
            'w' | 'W' => Ok(Self::White),
            _ => bail!("Color must be either 'r' or 'w' (case-insensitive). Found {c:?}"),
        }
    }
}

impl Neg for Color {
    type Output = Self;
    /// Negating [`Color::Red`] yields [`Color::White`] and vice versa.
    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

impl<T> Index<Color> for [T; Color::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Color> for [T; Color::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The rank of a piece: an unpromoted Man or a promoted King.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    #[default]
    Man,
    King,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 2;

    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Man => "man",
            Self::King => "king",
        }
    }
}

/// A stable handle to a [`Piece`] stored inside a [`Board`](super::Board).
///
/// Handles stay valid across captures and resets, since captured pieces are deactivated rather than dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    /// Returns this handle as a `usize`, suitable for indexing into the piece arena.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A single checkers piece.
///
/// The [`Color`] of a piece never changes. Its [`PieceKind`] only ever changes from Man to King during play,
/// and is only reverted when a deactivated piece is reused for a new layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,

    /// The cell this piece occupies, or [`None`] if it has been taken out of play.
    square: Option<Square>,
}

impl Piece {
    /// Creates a new, deactivated [`Piece`].
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            square: None,
        }
    }

    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// The cell this piece currently occupies, if it is in play.
    #[inline(always)]
    pub const fn square(&self) -> Option<Square> {
        self.square
    }

    /// Returns `true` if this piece is currently on the board.
    #[inline(always)]
    pub const fn is_active(&self) -> bool {
        self.square.is_some()
    }

    /// Promotes this piece to a King.
    #[inline(always)]
    pub fn promote(&mut self) {
        self.kind = PieceKind::King;
    }

    /// Reverts this piece to the provided kind. Only used when a deactivated piece is reused.
    #[inline(always)]
    pub(crate) fn reset_kind(&mut self, kind: PieceKind) {
        debug_assert!(!self.is_active(), "Only deactivated pieces may be reset");
        self.kind = kind;
    }

    #[inline(always)]
    pub(crate) fn set_square(&mut self, square: Option<Square>) {
        self.square = square;
    }

    /// Converts this piece to its layout character.
    ///
    /// Men are lowercase, Kings are uppercase.
    ///
    /// # Example
    /// ```
    /// # use checkers::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::new(Color::Red, PieceKind::Man).char(), 'r');
    /// assert_eq!(Piece::new(Color::White, PieceKind::King).char(), 'W');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        match (self.color, self.kind) {
            (Color::Red, PieceKind::Man) => 'r',
            (Color::Red, PieceKind::King) => 'R',
            (Color::White, PieceKind::Man) => 'w',
            (Color::White, PieceKind::King) => 'W',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}
