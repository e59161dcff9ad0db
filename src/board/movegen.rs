/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Board, Color, Move, MoveList, Piece, PieceId, Square};

/// Horizontal components of the two diagonals in any vertical direction.
const FILE_DELTAS: [i8; 2] = [-1, 1];

/// The vertical directions a piece may travel in, forwards first.
///
/// Men only travel towards the opponent's back row. Kings may also travel backwards.
#[inline(always)]
fn row_deltas(piece: &Piece) -> impl Iterator<Item = i8> {
    let forward = piece.color().forward();
    let backward = piece.is_king().then_some(-forward);
    std::iter::once(forward).chain(backward)
}

/// All diagonal `(dx, dy)` unit steps available to `piece`.
#[inline(always)]
fn diagonals(piece: &Piece) -> impl Iterator<Item = (i8, i8)> {
    row_deltas(piece).flat_map(|dy| FILE_DELTAS.map(|dx| (dx, dy)))
}

/// Generates all shifts (non-capturing, single diagonal steps onto empty cells) for the piece behind `id`.
///
/// # Panics
/// If the piece is not on the board.
///
/// # Example
/// ```
/// # use checkers::*;
/// let board = Board::default();
/// let id = board.occupant_at(Square::new(2, 2)).unwrap();
/// let shifts = shift_moves(&board, id);
/// assert_eq!(shifts.len(), 2);
/// assert!(shifts.iter().all(|mv| !mv.is_capture()));
/// ```
pub fn shift_moves(board: &Board, id: PieceId) -> MoveList {
    let from = board.square_of(id);
    let piece = board.piece(id);

    diagonals(piece)
        .filter_map(|(dx, dy)| from.offset(dx, dy))
        .filter(|&to| board.is_empty(to))
        .map(|to| Move::shift(from, to))
        .collect()
}

/// Generates all captures for the piece behind `id`.
///
/// A capture requires an opposing piece on the adjacent diagonal cell, and an empty, on-board landing cell directly beyond it.
///
/// # Panics
/// If the piece is not on the board.
pub fn capture_moves(board: &Board, id: PieceId) -> MoveList {
    let from = board.square_of(id);
    let piece = board.piece(id);

    diagonals(piece)
        .filter_map(|(dx, dy)| {
            let over = from.offset(dx, dy)?;
            let to = from.offset(2 * dx, 2 * dy)?;
            let victim = board.piece_at(over)?;

            (victim.color() != piece.color() && board.is_empty(to))
                .then(|| Move::capture(from, to, over))
        })
        .collect()
}

/// Generates every legal move for `color`, enforcing mandatory captures.
///
/// Pieces are examined in scan order. Each piece's captures are collected, and its shifts are collected only while
/// no capture has been found yet. If any capture exists once every piece has been examined, only captures are returned.
///
/// # Example
/// ```
/// # use checkers::*;
/// let board = Board::default();
/// let moves = legal_moves(&board, Color::Red);
/// assert_eq!(moves.len(), 7);
/// ```
pub fn legal_moves(board: &Board, color: Color) -> MoveList {
    let mut captures = MoveList::new();
    let mut shifts = MoveList::new();

    for id in board.pieces_of(color) {
        captures.extend(capture_moves(board, id));

        if captures.is_empty() {
            shifts.extend(shift_moves(board, id));
        }
    }

    // Shifts gathered before the first capture was found are discarded here
    if captures.is_empty() {
        shifts
    } else {
        captures
    }
}

/// Generates every legal move for `color` that starts on `square`.
pub fn legal_moves_from(board: &Board, color: Color, square: Square) -> MoveList {
    legal_moves(board, color)
        .into_iter()
        .filter(|mv| mv.from() == square)
        .collect()
}

/// Returns `true` if the piece behind `id` has at least one capture available.
#[inline(always)]
pub fn can_capture(board: &Board, id: PieceId) -> bool {
    !capture_moves(board, id).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Layout, PieceKind, LAYOUT_DOUBLE_CAPTURE};

    fn board(layout: &str) -> Board {
        Board::from_layout(&layout.parse::<Layout>().unwrap())
    }

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y)
    }

    #[test]
    fn test_standard_opening_moves() {
        let board = Board::default();
        let mut moves = legal_moves(&board, Color::Red).to_vec();
        moves.sort();

        let mut expected = vec![
            Move::shift(sq(0, 2), sq(1, 3)),
            Move::shift(sq(2, 2), sq(1, 3)),
            Move::shift(sq(2, 2), sq(3, 3)),
            Move::shift(sq(4, 2), sq(3, 3)),
            Move::shift(sq(4, 2), sq(5, 3)),
            Move::shift(sq(6, 2), sq(5, 3)),
            Move::shift(sq(6, 2), sq(7, 3)),
        ];
        expected.sort();
        assert_eq!(moves, expected);

        // White's front row mirrors this
        assert_eq!(legal_moves(&board, Color::White).len(), 7);
    }

    #[test]
    fn test_men_only_move_forward() {
        let mut board = Board::new();
        let red = board.spawn(Color::Red, PieceKind::Man, sq(3, 3));
        let white = board.spawn(Color::White, PieceKind::Man, sq(6, 6));

        let red_moves = shift_moves(&board, red);
        assert!(red_moves.iter().all(|mv| mv.to().y() == 4));
        assert_eq!(red_moves.len(), 2);

        let white_moves = shift_moves(&board, white);
        assert!(white_moves.iter().all(|mv| mv.to().y() == 5));
        assert_eq!(white_moves.len(), 2);
    }

    #[test]
    fn test_kings_move_both_ways() {
        let mut board = Board::new();
        let king = board.spawn(Color::White, PieceKind::King, sq(3, 3));
        assert_eq!(shift_moves(&board, king).len(), 4);

        // Edges restrict which neighbours exist
        let mut board = Board::new();
        let corner = board.spawn(Color::Red, PieceKind::King, sq(0, 0));
        assert_eq!(
            shift_moves(&board, corner).to_vec(),
            vec![Move::shift(sq(0, 0), sq(1, 1))]
        );

        // A man on its promotion row has nowhere left to go
        let mut board = Board::new();
        let stuck = board.spawn(Color::Red, PieceKind::Man, sq(3, 7));
        assert!(shift_moves(&board, stuck).is_empty());
    }

    #[test]
    fn test_capture_requirements() {
        let mut board = Board::new();
        let red = board.spawn(Color::Red, PieceKind::Man, sq(2, 2));
        board.spawn(Color::White, PieceKind::Man, sq(3, 3));
        board.spawn(Color::Red, PieceKind::Man, sq(1, 3));

        // Can jump the opposing piece, but never a friendly one
        assert_eq!(
            capture_moves(&board, red).to_vec(),
            vec![Move::capture(sq(2, 2), sq(4, 4), sq(3, 3))]
        );

        // Blocking the landing cell removes the capture
        board.spawn(Color::White, PieceKind::Man, sq(4, 4));
        assert!(capture_moves(&board, red).is_empty());
    }

    #[test]
    fn test_capture_landing_must_be_on_board() {
        let mut board = Board::new();
        let red = board.spawn(Color::Red, PieceKind::Man, sq(1, 5));
        board.spawn(Color::White, PieceKind::Man, sq(0, 6));
        board.spawn(Color::White, PieceKind::Man, sq(2, 6));

        // Jumping (0, 6) would leave the board; jumping (2, 6) lands on (3, 7)
        assert_eq!(
            capture_moves(&board, red).to_vec(),
            vec![Move::capture(sq(1, 5), sq(3, 7), sq(2, 6))]
        );
    }

    #[test]
    fn test_men_never_capture_backwards() {
        let mut board = Board::new();
        let red = board.spawn(Color::Red, PieceKind::Man, sq(3, 3));
        board.spawn(Color::White, PieceKind::Man, sq(2, 2));
        assert!(capture_moves(&board, red).is_empty());

        board.promote(red);
        assert_eq!(
            capture_moves(&board, red).to_vec(),
            vec![Move::capture(sq(3, 3), sq(1, 1), sq(2, 2))]
        );
    }

    #[test]
    fn test_mandatory_capture_discards_earlier_shifts() {
        // The red man at (1, 1) is scanned first and has shifts, but the man at (5, 3) can capture
        let layout = "........\n\
                      ........\n\
                      ........\n\
                      ....w...\n\
                      .....r..\n\
                      ........\n\
                      .r......\n\
                      ........";
        let board = board(layout);
        let moves = legal_moves(&board, Color::Red);
        assert_eq!(
            moves.to_vec(),
            vec![Move::capture(sq(5, 3), sq(3, 5), sq(4, 4))]
        );
    }

    #[test]
    fn test_double_capture_layout() {
        let board = board(LAYOUT_DOUBLE_CAPTURE);
        let moves = legal_moves(&board, Color::Red);
        assert_eq!(
            moves.to_vec(),
            vec![
                Move::capture(sq(1, 1), sq(3, 3), sq(2, 2)),
                Move::capture(sq(5, 3), sq(3, 5), sq(4, 4)),
            ]
        );
        assert!(moves.iter().all(Move::is_capture));
        assert_eq!(legal_moves_from(&board, Color::Red, sq(1, 1)).len(), 1);
        assert!(legal_moves_from(&board, Color::Red, sq(2, 2)).is_empty());
    }

    #[test]
    fn test_no_pieces_means_no_moves() {
        let board = Board::new();
        assert!(legal_moves(&board, Color::Red).is_empty());
        assert!(legal_moves(&board, Color::White).is_empty());
    }
}
