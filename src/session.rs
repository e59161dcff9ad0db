/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::{
    Board, Color, Controller, Layout, Move, MoveList, MoveOutcome, PieceId, Player, RandomPlayer,
    Square, TurnController, TurnState,
};

/// Whether a game is still being played, and who won if it isn't.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    Ongoing,

    /// The side to move had no legal moves, so their opponent won.
    Won(Color),
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => write!(f, "in progress"),
            Self::Won(color) => write!(f, "{color} wins"),
        }
    }
}

/// What happened in response to a click on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A piece belonging to the side to move was selected.
    Selected(Square),

    /// The selected piece was moved onto the clicked cell.
    Moved(MoveOutcome),

    /// The click did not correspond to a selection or a legal move. Nothing changed.
    Rejected,
}

/// A single game of checkers.
///
/// Owns the [`Board`] and [`TurnController`], validates every move request against the current legal move set,
/// and drives the automated [`Player`] for computer-controlled sides.
///
/// Input layers talk to a session through [`Session::click`], [`Session::apply_selection`], or [`Session::apply_move`].
/// Renderers read from it through [`Session::board`], [`Session::turn_state`], and [`Session::status`].
pub struct Session {
    board: Board,
    turn: TurnController,

    /// Who plays each side.
    controllers: [Controller; Color::COUNT],

    /// The policy used for computer-controlled sides.
    player: Box<dyn Player>,

    /// The piece most recently selected by a click, if any.
    selected: Option<PieceId>,

    /// Number of moves applied since the last reset. Each capture in a chain counts as one.
    plies: usize,
}

impl Session {
    /// Creates a new [`Session`] on `layout`, with both sides human-controlled and Red to move.
    pub fn new(layout: &Layout) -> Self {
        Self {
            board: Board::from_layout(layout),
            turn: TurnController::new(),
            controllers: [Controller::Human; Color::COUNT],
            player: Box::new(RandomPlayer::new()),
            selected: None,
            plies: 0,
        }
    }

    /// Replaces the automated player's move-selection policy.
    pub fn with_player(mut self, player: impl Player + 'static) -> Self {
        self.player = Box::new(player);
        self
    }

    /// Sets who controls each side.
    pub fn with_controllers(mut self, red: Controller, white: Controller) -> Self {
        self.controllers = [red, white];
        self
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub const fn turn_state(&self) -> TurnState {
        self.turn.state()
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.turn.side_to_move()
    }

    /// The piece locked into a capture chain, if any.
    #[inline(always)]
    pub const fn forced_piece(&self) -> Option<PieceId> {
        self.turn.forced_piece()
    }

    /// The piece currently selected for click-to-move, if any.
    #[inline(always)]
    pub const fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    /// Number of moves applied since the last reset.
    #[inline(always)]
    pub const fn plies(&self) -> usize {
        self.plies
    }

    #[inline(always)]
    pub const fn controller(&self, color: Color) -> Controller {
        self.controllers[color.index()]
    }

    pub fn set_controller(&mut self, color: Color, controller: Controller) {
        debug!("{color} is now controlled by {controller}");
        self.controllers[color] = controller;
    }

    /// Returns `true` if the side to move is computer-controlled.
    #[inline(always)]
    pub fn is_computer_to_move(&self) -> bool {
        self.controller(self.side_to_move()).is_computer()
    }

    /// The moves that may be played right now, including mandatory-capture and forced-continuation restrictions.
    #[inline(always)]
    pub fn legal_moves(&self) -> MoveList {
        self.turn.legal_moves(&self.board)
    }

    /// Returns `true` if the side to move has no legal moves.
    #[inline(always)]
    pub fn is_terminal(&self) -> bool {
        self.legal_moves().is_empty()
    }

    /// The winner of the game, if it has ended.
    #[inline(always)]
    pub fn winner(&self) -> Option<Color> {
        self.is_terminal().then(|| self.side_to_move().opponent())
    }

    #[inline(always)]
    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(color) => GameStatus::Won(color),
            None => GameStatus::Ongoing,
        }
    }

    /// Applies `mv` on behalf of a human player, if it is in the current legal move set.
    ///
    /// If it is not, or if the side to move is computer-controlled, an error is returned and nothing changes.
    ///
    /// # Example
    /// ```
    /// # use checkers::*;
    /// let mut session = Session::new(&Layout::standard());
    /// let backwards = Move::shift(Square::new(2, 2), Square::new(1, 1));
    /// assert!(session.apply_move(backwards).is_err());
    ///
    /// let forwards = Move::shift(Square::new(2, 2), Square::new(3, 3));
    /// let outcome = session.apply_move(forwards).unwrap();
    /// assert!(outcome.turn_passed());
    /// assert_eq!(session.side_to_move(), Color::White);
    /// ```
    pub fn apply_move(&mut self, mv: Move) -> Result<MoveOutcome> {
        if self.is_computer_to_move() {
            bail!(
                "{} is controlled by the computer ({})",
                self.side_to_move(),
                self.turn.state()
            );
        }

        self.apply_legal_move(mv)
    }

    /// Applies `mv` if it is in the current legal move set, regardless of who controls the side to move.
    fn apply_legal_move(&mut self, mv: Move) -> Result<MoveOutcome> {
        if !self.turn.is_legal(&self.board, mv) {
            bail!("{mv} is not a legal move ({})", self.turn.state());
        }

        let outcome = self.turn.apply(&mut self.board, mv);
        self.plies += 1;

        // A piece in the middle of a chain stays selected
        self.selected = outcome.next.forced_piece();

        Ok(outcome)
    }

    /// Applies the legal move that goes from `from` to `to`, if there is one.
    ///
    /// Captures are identified by their endpoints alone, so callers never need to name the captured cell.
    pub fn apply_selection(&mut self, from: Square, to: Square) -> Result<MoveOutcome> {
        let Some(mv) = self
            .legal_moves()
            .into_iter()
            .find(|mv| mv.connects(from, to))
        else {
            bail!(
                "There is no legal move from {from} to {to} ({})",
                self.turn.state()
            );
        };

        self.apply_move(mv)
    }

    /// Routes a click on `square`.
    ///
    /// Clicking a piece of the side to move selects it. During a forced continuation, only the chained piece can be selected.
    /// Any other click is treated as a request to move the selected piece onto `square`.
    /// Clicks are ignored while a computer-controlled side is to move.
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        if self.is_computer_to_move() {
            return ClickOutcome::Rejected;
        }

        if let Some(id) = self.board.occupant_at(square) {
            let own_piece = self.board.piece(id).color() == self.side_to_move();
            let allowed = self.forced_piece().map_or(true, |forced| forced == id);

            return if own_piece && allowed {
                self.selected = Some(id);
                ClickOutcome::Selected(square)
            } else {
                ClickOutcome::Rejected
            };
        }

        let Some(selected) = self.selected else {
            return ClickOutcome::Rejected;
        };

        match self.apply_selection(self.board.square_of(selected), square) {
            Ok(outcome) => ClickOutcome::Moved(outcome),
            Err(err) => {
                debug!("Rejected click on {square}: {err}");
                ClickOutcome::Rejected
            }
        }
    }

    /// Deactivates every piece, loads `layout`, and returns to Red to move.
    pub fn reset(&mut self, layout: &Layout) {
        self.board.load(layout);
        self.turn.reset();
        self.selected = None;
        self.plies = 0;
        info!("Session reset");
    }

    /// Plays a single move for the automated player, if the side to move is computer-controlled and has a move.
    pub fn play_automated_move(&mut self) -> Option<MoveOutcome> {
        if !self.is_computer_to_move() {
            return None;
        }

        let moves = self.legal_moves();
        if moves.is_empty() {
            return None;
        }

        let mv = self.player.select(&moves);
        debug!(%mv, "{} (computer) plays", self.side_to_move());
        self.apply_legal_move(mv).ok()
    }

    /// Plays automated moves until a human-controlled side is to move or the game ends, returning how many were played.
    ///
    /// Forced continuations are played out as part of the same loop.
    /// If both sides are computer-controlled, this plays the game to completion.
    pub fn run_automated_turn(&mut self) -> usize {
        let mut played = 0;
        while self.play_automated_move().is_some() {
            played += 1;
        }
        played
    }
}

impl Default for Session {
    /// A session on the standard layout.
    fn default() -> Self {
        Self::new(&Layout::standard())
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f)?;
        for color in Color::all() {
            writeln!(f, "{color:>5}: {}", self.controller(color))?;
        }

        match self.status() {
            GameStatus::Ongoing => write!(f, "{}", self.turn.state())?,
            status => write!(f, "Game over: {status}")?,
        }

        if let Some(forced) = self.forced_piece() {
            write!(f, " with the piece on {}", self.board.square_of(forced))?;
        }

        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("board", &self.board)
            .field("turn", &self.turn)
            .field("controllers", &self.controllers)
            .field("selected", &self.selected)
            .field("plies", &self.plies)
            .finish_non_exhaustive()
    }
}
