/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{Color, Layout, Piece, PieceId, PieceKind, Square};

/// Represents all pieces and their locations on a checkers board.
///
/// Pieces live in an arena and are referred to by [`PieceId`] handles.
/// Every cell stores the handle of its occupant, and every active piece stores the cell it occupies.
/// All mutations go through [`Board::place`], [`Board::remove`], and [`Board::move_piece`], which keep both sides in agreement.
///
/// Captured pieces are deactivated rather than dropped, and are reused by [`Board::spawn`] when a new layout is loaded.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// The occupant of every cell, if any.
    cells: [Option<PieceId>; Square::COUNT],

    /// Every piece ever created for this board, active or not.
    pieces: Vec<Piece>,
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use checkers::{Board, Color};
    /// let board = Board::new();
    /// assert_eq!(board.pieces_of(Color::Red).count(), 0);
    /// ```
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            cells: [None; Square::COUNT],
            pieces: Vec::with_capacity(24),
        }
    }

    /// Constructs a [`Board`] holding the pieces described by `layout`.
    ///
    /// # Example
    /// ```
    /// # use checkers::{Board, Color, Layout, PieceKind};
    /// let board = Board::from_layout(&Layout::standard());
    /// assert_eq!(board.count(Color::Red, PieceKind::Man), 12);
    /// assert_eq!(board.count(Color::White, PieceKind::Man), 12);
    /// ```
    pub fn from_layout(layout: &Layout) -> Self {
        let mut board = Self::new();
        board.load(layout);
        board
    }

    /// Deactivates every piece and re-populates the board from `layout`, reusing deactivated pieces where possible.
    pub fn load(&mut self, layout: &Layout) {
        self.clear();
        for (square, color, kind) in layout.iter() {
            self.spawn(color, kind, square);
        }
    }

    /// Fetch the [`Piece`] behind the provided handle.
    ///
    /// # Panics
    /// If `id` was not issued by this board.
    #[inline(always)]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// Fetch the handle of the piece occupying `square`, if there is one.
    #[inline(always)]
    pub fn occupant_at(&self, square: Square) -> Option<PieceId> {
        self.cells[square]
    }

    /// Fetch the [`Piece`] occupying `square`, if there is one.
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.occupant_at(square).map(|id| self.piece(id))
    }

    /// Returns `true` if there is no piece on `square`.
    #[inline(always)]
    pub fn is_empty(&self, square: Square) -> bool {
        self.cells[square].is_none()
    }

    /// Returns the cell that the piece behind `id` occupies.
    ///
    /// # Panics
    /// If the piece is not currently on the board.
    #[inline(always)]
    pub fn square_of(&self, id: PieceId) -> Square {
        match self.piece(id).square() {
            Some(square) => square,
            None => panic!("Piece {id:?} is not on the board"),
        }
    }

    /// Places the (deactivated) piece behind `id` on `square`, activating it.
    ///
    /// # Panics
    /// If `square` is occupied, or if the piece is already on the board.
    pub fn place(&mut self, id: PieceId, square: Square) {
        assert!(
            self.is_empty(square),
            "Cannot place a piece on occupied square {square:?}"
        );
        assert!(
            !self.piece(id).is_active(),
            "Piece {id:?} is already on the board"
        );

        self.pieces[id.index()].set_square(Some(square));
        self.cells[square] = Some(id);
    }

    /// Removes the piece occupying `square` from play, returning its handle.
    ///
    /// # Panics
    /// If `square` is empty.
    pub fn remove(&mut self, square: Square) -> PieceId {
        let Some(id) = self.cells[square].take() else {
            panic!("Cannot remove a piece from empty square {square:?}");
        };

        self.pieces[id.index()].set_square(None);
        id
    }

    /// Moves the piece behind `id` from its current cell onto `to`.
    ///
    /// Captured pieces are not removed by this; use [`Board::remove`].
    ///
    /// # Panics
    /// If the piece is not on the board, or if `to` is occupied.
    pub fn move_piece(&mut self, id: PieceId, to: Square) {
        let from = self.square_of(id);
        assert!(
            self.is_empty(to),
            "Cannot move {from:?} onto occupied square {to:?}"
        );

        self.cells[from] = None;
        self.cells[to] = Some(id);
        self.pieces[id.index()].set_square(Some(to));
    }

    /// Promotes the piece behind `id` to a King.
    #[inline(always)]
    pub fn promote(&mut self, id: PieceId) {
        self.pieces[id.index()].promote();
    }

    /// Puts a piece of the given color and kind onto `square`, returning its handle.
    ///
    /// A deactivated piece of the same color is reused if one exists; otherwise a new one is created.
    ///
    /// # Panics
    /// If `square` is occupied.
    pub fn spawn(&mut self, color: Color, kind: PieceKind, square: Square) -> PieceId {
        let reusable = self
            .pieces
            .iter()
            .position(|p| !p.is_active() && p.color() == color);

        let id = match reusable {
            Some(index) => {
                self.pieces[index].reset_kind(kind);
                PieceId(index as u8)
            }
            None => {
                let id = PieceId(self.pieces.len() as u8);
                self.pieces.push(Piece::new(color, kind));
                id
            }
        };

        self.place(id, square);
        id
    }

    /// Deactivates every piece on the board.
    pub fn clear(&mut self) {
        for square in Square::iter() {
            if !self.is_empty(square) {
                self.remove(square);
            }
        }
    }

    /// An iterator over the handles of all active pieces of `color`, in scan order (row `0` first).
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = PieceId> + '_ {
        Square::iter()
            .filter_map(|square| self.occupant_at(square))
            .filter(move |&id| self.piece(id).color() == color)
    }

    /// Number of active pieces of the provided color and kind.
    ///
    /// # Example
    /// ```
    /// # use checkers::{Board, Color, Layout, PieceKind};
    /// let layout: Layout = "........\n....R...\n...w.w..\n........\n...w.w..\n........\n........\n........".parse().unwrap();
    /// let board = Board::from_layout(&layout);
    /// assert_eq!(board.count(Color::Red, PieceKind::King), 1);
    /// assert_eq!(board.count(Color::White, PieceKind::Man), 4);
    /// ```
    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.pieces_of(color)
            .filter(|&id| self.piece(id).kind() == kind)
            .count()
    }

    /// Snapshot the current contents of the board as a [`Layout`].
    pub fn to_layout(&self) -> Layout {
        let mut layout = Layout::empty();
        for square in Square::iter() {
            if let Some(piece) = self.piece_at(square) {
                layout.set(square, Some((piece.color(), piece.kind())));
            }
        }
        layout
    }
}

impl Default for Board {
    /// Standard starting position for checkers.
    #[inline(always)]
    fn default() -> Self {
        Self::from_layout(&Layout::standard())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..Square::SIZE).rev() {
            write!(f, "{y}|")?;
            for x in 0..Square::SIZE {
                let occupant = self
                    .piece_at(Square::new(x, y))
                    .map(Piece::char)
                    .unwrap_or('.');
                write!(f, " {occupant}")?;
            }
            writeln!(f)?;
        }
        write!(f, " +")?;
        for _ in 0..Square::SIZE {
            write!(f, "--")?;
        }
        write!(f, "\n  ")?;
        for x in 0..Square::SIZE {
            write!(f, " {x}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        for color in Color::all() {
            writeln!(
                f,
                "{color:>5}: {} men, {} kings",
                self.count(color, PieceKind::Man),
                self.count(color, PieceKind::King)
            )?;
        }
        write!(f, "Arena: {} pieces", self.pieces.len())
    }
}
