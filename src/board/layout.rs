/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::{Color, PieceKind, Square};

/// Layout string for the standard starting position.
pub const LAYOUT_STANDARD: &str = ".w.w.w.w\n\
                                   w.w.w.w.\n\
                                   .w.w.w.w\n\
                                   ........\n\
                                   ........\n\
                                   r.r.r.r.\n\
                                   .r.r.r.r\n\
                                   r.r.r.r.\n";

/// Red can open with a double capture.
pub const LAYOUT_DOUBLE_CAPTURE: &str = ".......w\n\
                                         ........\n\
                                         ........\n\
                                         ....w...\n\
                                         .....r..\n\
                                         ..w.....\n\
                                         .r......\n\
                                         ........\n";

/// A lone Red man one step from promotion.
pub const LAYOUT_PROMOTION: &str = "........\n\
                                    r.w.w...\n\
                                    .w......\n\
                                    ........\n\
                                    ........\n\
                                    ........\n\
                                    ........\n\
                                    ........\n";

/// A Red king that can capture all four White men in a single loop.
pub const LAYOUT_KING_LOOP: &str = "........\n\
                                    ....R...\n\
                                    ...w.w..\n\
                                    ........\n\
                                    ...w.w..\n\
                                    ........\n\
                                    ........\n\
                                    ........\n";

/// Named layouts that can be loaded by name.
pub const PRESETS: [(&str, &str); 4] = [
    ("standard", LAYOUT_STANDARD),
    ("double-capture", LAYOUT_DOUBLE_CAPTURE),
    ("promotion", LAYOUT_PROMOTION),
    ("king-loop", LAYOUT_KING_LOOP),
];

/// A description of which piece (if any) sits on every cell of the board.
///
/// Layouts are written as 64 symbols, 8 rows of 8, from the top of the board (row `7`, White's back row)
/// down to the bottom (row `0`, Red's back row). Within a row, symbols run from `x = 0` to `x = 7`.
///
/// | Symbol | Meaning     |
/// |--------|-------------|
/// | `.`    | empty       |
/// | `r`    | Red man     |
/// | `w`    | White man   |
/// | `R`    | Red king    |
/// | `W`    | White king  |
///
/// Whitespace (including newlines) is ignored when parsing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout([Option<(Color, PieceKind)>; Square::COUNT]);

impl Layout {
    /// A layout with no pieces on it.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self([None; Square::COUNT])
    }

    /// The standard starting position: twelve men per side on the dark cells of the three rows nearest each player.
    ///
    /// # Example
    /// ```
    /// # use checkers::{Layout, Square, Color, PieceKind};
    /// let layout = Layout::standard();
    /// assert_eq!(layout.get(Square::new(0, 0)), Some((Color::Red, PieceKind::Man)));
    /// assert_eq!(layout.get(Square::new(1, 7)), Some((Color::White, PieceKind::Man)));
    /// assert_eq!(layout.get(Square::new(1, 3)), None);
    /// ```
    pub fn standard() -> Self {
        let mut layout = Self::empty();
        for square in Square::iter().filter(Square::is_dark) {
            let color = match square.y() {
                0..=2 => Color::Red,
                5..=7 => Color::White,
                _ => continue,
            };
            layout.set(square, Some((color, PieceKind::Man)));
        }
        layout
    }

    /// Fetch one of the named layouts in [`PRESETS`].
    ///
    /// # Example
    /// ```
    /// # use checkers::Layout;
    /// assert_eq!(Layout::preset("standard").unwrap(), Layout::standard());
    /// assert!(Layout::preset("nonsense").is_err());
    /// ```
    pub fn preset(name: &str) -> Result<Self> {
        let Some((_, layout)) = PRESETS.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)) else {
            let names = PRESETS.map(|(n, _)| n).join(", ");
            bail!("Unknown layout {name:?}. Expected one of: {names}");
        };

        layout.parse()
    }

    /// Fetch the piece described at `square`.
    #[inline(always)]
    pub fn get(&self, square: Square) -> Option<(Color, PieceKind)> {
        self.0[square]
    }

    /// Set the piece described at `square`.
    #[inline(always)]
    pub fn set(&mut self, square: Square, piece: Option<(Color, PieceKind)>) {
        self.0[square] = piece;
    }

    /// An iterator over every occupied cell in this layout, in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Color, PieceKind)> + '_ {
        Square::iter().filter_map(|square| {
            let (color, kind) = self.get(square)?;
            Some((square, color, kind))
        })
    }

    /// Converts a layout symbol into the piece it describes.
    fn from_symbol(symbol: char) -> Result<Option<(Color, PieceKind)>> {
        let kind = if symbol.is_ascii_uppercase() {
            PieceKind::King
        } else {
            PieceKind::Man
        };

        match symbol {
            '.' => Ok(None),
            'r' | 'R' | 'w' | 'W' => Ok(Some((Color::from_char(symbol)?, kind))),
            _ => bail!("Layout symbols must be one of '.', 'r', 'w', 'R', 'W'. Found {symbol:?}"),
        }
    }

    /// Converts an optional piece into its layout symbol.
    const fn symbol(piece: Option<(Color, PieceKind)>) -> char {
        match piece {
            None => '.',
            Some((Color::Red, PieceKind::Man)) => 'r',
            Some((Color::Red, PieceKind::King)) => 'R',
            Some((Color::White, PieceKind::Man)) => 'w',
            Some((Color::White, PieceKind::King)) => 'W',
        }
    }
}

impl FromStr for Layout {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let symbols = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<Vec<_>>();

        if symbols.len() != Square::COUNT {
            bail!(
                "Layout must contain exactly {} symbols. Got {}",
                Square::COUNT,
                symbols.len()
            );
        }

        let mut layout = Self::empty();
        for (i, symbol) in symbols.into_iter().enumerate() {
            // The first row written is the top of the board
            let x = (i % Square::SIZE as usize) as u8;
            let y = Square::MAX - (i / Square::SIZE as usize) as u8;
            layout.set(Square::new(x, y), Self::from_symbol(symbol)?);
        }

        Ok(layout)
    }
}

impl Default for Layout {
    #[inline(always)]
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..Square::SIZE).rev() {
            for x in 0..Square::SIZE {
                write!(f, "{}", Self::symbol(self.get(Square::new(x, y))))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
