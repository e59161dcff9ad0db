/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use tracing::{debug, trace};

use crate::{can_capture, capture_moves, legal_moves, Board, Color, Move, MoveList, PieceId};

/// Whose move it is, and whether they are in the middle of a capture chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnState {
    /// The side to move may play any of its legal moves.
    AwaitingMove(Color),

    /// The side to move has just captured with this piece and must keep capturing with it.
    ForcedContinuation(Color, PieceId),
}

impl TurnState {
    /// The [`Color`] whose move it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        match self {
            Self::AwaitingMove(color) | Self::ForcedContinuation(color, _) => *color,
        }
    }

    /// The piece locked into a capture chain, if any.
    #[inline(always)]
    pub const fn forced_piece(&self) -> Option<PieceId> {
        match self {
            Self::AwaitingMove(_) => None,
            Self::ForcedContinuation(_, id) => Some(*id),
        }
    }
}

impl Default for TurnState {
    /// Red moves first.
    #[inline(always)]
    fn default() -> Self {
        Self::AwaitingMove(Color::Red)
    }
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingMove(color) => write!(f, "{color} to move"),
            Self::ForcedContinuation(color, _) => write!(f, "{color} to continue capturing"),
        }
    }
}

/// The result of applying a single [`Move`] through a [`TurnController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The move that was applied.
    pub mv: Move,

    /// The piece that moved.
    pub piece: PieceId,

    /// The piece that was captured, if any. It is no longer on the board.
    pub captured: Option<PieceId>,

    /// Whether the moving piece was promoted to a King by this move.
    pub promoted: bool,

    /// The turn state after the move.
    pub next: TurnState,
}

impl MoveOutcome {
    /// Returns `true` if the move ended the mover's turn.
    #[inline(always)]
    pub const fn turn_passed(&self) -> bool {
        matches!(self.next, TurnState::AwaitingMove(_))
    }
}

/// The state machine deciding whose turn it is.
///
/// This is the only thing that changes the side to move or locks a piece into a capture chain.
/// It holds no board of its own; every operation is given the [`Board`] it should act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TurnController {
    state: TurnState,
}

impl TurnController {
    /// Creates a new [`TurnController`] with Red to move.
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`TurnController`] in the provided state.
    #[inline(always)]
    pub const fn with_state(state: TurnState) -> Self {
        Self { state }
    }

    #[inline(always)]
    pub const fn state(&self) -> TurnState {
        self.state
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.state.side_to_move()
    }

    #[inline(always)]
    pub const fn forced_piece(&self) -> Option<PieceId> {
        self.state.forced_piece()
    }

    /// Returns to the initial state, with Red to move.
    #[inline(always)]
    pub fn reset(&mut self) {
        self.state = TurnState::default();
    }

    /// The set of moves that may be played right now.
    ///
    /// While awaiting a move, this is every legal move of the side to move.
    /// During a forced continuation, it is only the captures of the chained piece.
    pub fn legal_moves(&self, board: &Board) -> MoveList {
        match self.state {
            TurnState::AwaitingMove(color) => legal_moves(board, color),
            TurnState::ForcedContinuation(color, id) => {
                debug_assert!(
                    board.piece(id).is_active() && board.piece(id).color() == color,
                    "Forced piece {id:?} must be a {color} piece on the board"
                );
                capture_moves(board, id)
            }
        }
    }

    /// Returns `true` if `mv` is in the current legal move set.
    #[inline(always)]
    pub fn is_legal(&self, board: &Board, mv: Move) -> bool {
        self.legal_moves(board).contains(&mv)
    }

    /// Applies `mv` to `board` and advances the turn.
    ///
    /// 1. The piece on `mv.from()` is moved to `mv.to()`, and any captured piece is removed.
    /// 2. A Man that lands on its promotion row is crowned, and the turn always passes, even if the new King could capture again.
    /// 3. Otherwise, the turn passes after a shift, or after a capture with no further captures available.
    /// 4. Otherwise, the same side must continue capturing with the same piece.
    ///
    /// `mv` must come from [`TurnController::legal_moves`]; this does not re-validate it outside of debug builds.
    ///
    /// # Panics
    /// If there is no piece on `mv.from()`.
    pub fn apply(&mut self, board: &mut Board, mv: Move) -> MoveOutcome {
        debug_assert!(self.is_legal(board, mv), "Move {mv} is not legal");

        let mover = self.side_to_move();
        let Some(id) = board.occupant_at(mv.from()) else {
            panic!("No piece on {:?} to move", mv.from());
        };

        board.move_piece(id, mv.to());
        let captured = mv.captured().map(|square| board.remove(square));

        let promoted = mv.to().y() == mover.promotion_row() && !board.piece(id).is_king();
        let next = if promoted {
            board.promote(id);
            debug!(%mv, "{mover} man promoted to king");
            TurnState::AwaitingMove(mover.opponent())
        } else if !mv.is_capture() || !can_capture(board, id) {
            TurnState::AwaitingMove(mover.opponent())
        } else {
            debug!(%mv, "{mover} must continue capturing from {}", mv.to());
            TurnState::ForcedContinuation(mover, id)
        };

        trace!(%mv, ?captured, "{mover} moved; {next}");
        self.state = next;

        MoveOutcome {
            mv,
            piece: id,
            captured,
            promoted,
            next,
        }
    }
}
