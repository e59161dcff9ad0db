/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use checkers::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn sq(x: u8, y: u8) -> Square {
    Square::new(x, y)
}

fn session(layout: &str) -> Session {
    Session::new(&layout.parse::<Layout>().unwrap())
}

/// Builds a random position with up to `pieces` pieces on dark cells.
fn random_board(rng: &mut StdRng, pieces: usize) -> Board {
    let mut layout = Layout::empty();
    for _ in 0..pieces {
        let square = Square::iter()
            .filter(Square::is_dark)
            .nth(rng.gen_range(0..32))
            .unwrap();

        let color = if rng.gen_bool(0.5) {
            Color::Red
        } else {
            Color::White
        };
        let kind = if rng.gen_bool(0.25) {
            PieceKind::King
        } else {
            PieceKind::Man
        };

        layout.set(square, Some((color, kind)));
    }

    Board::from_layout(&layout)
}

/// Whether any piece of `color` has an opposing neighbor with an empty cell beyond it, checked cell by cell.
fn has_capture_by_inspection(board: &Board, color: Color) -> bool {
    Square::iter().any(|from| {
        let Some(piece) = board.piece_at(from) else {
            return false;
        };
        if piece.color() != color {
            return false;
        }

        let forward = color.forward();
        let rows = if piece.is_king() {
            vec![forward, -forward]
        } else {
            vec![forward]
        };

        rows.iter().any(|&dy| {
            [-1, 1].into_iter().any(|dx| {
                let (Some(over), Some(to)) = (from.offset(dx, dy), from.offset(2 * dx, 2 * dy))
                else {
                    return false;
                };
                board.piece_at(over).is_some_and(|p| p.color() != color) && board.is_empty(to)
            })
        })
    })
}

#[test]
fn test_captures_exist_exactly_when_a_jump_is_open() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for _ in 0..500 {
        let pieces = rng.gen_range(1..=24);
        let board = random_board(&mut rng, pieces);

        for color in Color::all() {
            let moves = legal_moves(&board, color);
            let expected = has_capture_by_inspection(&board, color);
            assert_eq!(
                moves.iter().any(Move::is_capture),
                expected,
                "Capture detection mismatch for {color} on\n{board}"
            );

            // Mandatory capture: never a mix of shifts and captures
            if expected {
                assert!(moves.iter().all(Move::is_capture), "{color} on\n{board}");
            }
        }
    }
}

#[test]
fn test_standard_opening_moves() {
    let session = Session::default();
    let moves = session.legal_moves();

    assert_eq!(moves.len(), 7);
    for mv in &moves {
        assert!(!mv.is_capture());
        assert_eq!(mv.from().y(), 2, "{mv} does not start on Red's front row");
        assert_eq!(mv.to().y(), 3);
        assert_eq!(mv.from().x().abs_diff(mv.to().x()), 1);
    }
}

#[test]
fn test_double_capture_scenario() {
    let mut session = session(LAYOUT_DOUBLE_CAPTURE);
    let white_before = session.board().count(Color::White, PieceKind::Man);

    // The lone red man nearest the bottom jumps the white man ahead of it
    let outcome = session.apply_selection(sq(1, 1), sq(3, 3)).unwrap();
    assert_eq!(outcome.mv.captured(), Some(sq(2, 2)));
    assert!(session.board().is_empty(sq(1, 1)));
    assert!(session.board().is_empty(sq(2, 2)));
    assert_eq!(session.board().occupant_at(sq(3, 3)), Some(outcome.piece));
    assert_eq!(
        session.board().count(Color::White, PieceKind::Man),
        white_before - 1
    );

    // A second capture remains, so the turn stays with Red
    assert!(!outcome.turn_passed());
    assert_eq!(session.side_to_move(), Color::Red);
    assert_eq!(
        session.turn_state(),
        TurnState::ForcedContinuation(Color::Red, outcome.piece)
    );

    // Other red pieces are locked out, with no state change
    let before = session.board().clone();
    assert!(session.apply_selection(sq(5, 3), sq(3, 5)).is_err());
    assert!(session.apply_selection(sq(5, 3), sq(6, 4)).is_err());
    assert_eq!(session.board(), &before);

    let outcome = session.apply_selection(sq(3, 3), sq(5, 5)).unwrap();
    assert!(outcome.turn_passed());
    assert_eq!(session.turn_state(), TurnState::AwaitingMove(Color::White));
    assert_eq!(
        session.board().count(Color::White, PieceKind::Man),
        white_before - 2
    );
}

#[test]
fn test_promotion_ends_turn_despite_further_captures() {
    let mut session = session(
        "........\n\
         ..w.w...\n\
         .r......\n\
         ........\n\
         ........\n\
         ........\n\
         ........\n\
         ........",
    );

    let outcome = session.apply_selection(sq(1, 5), sq(3, 7)).unwrap();
    assert!(outcome.promoted);
    assert!(outcome.turn_passed());
    assert_eq!(session.side_to_move(), Color::White);
    assert_eq!(session.board().count(Color::Red, PieceKind::King), 1);

    // The new king could jump (4, 6) if it were still Red's turn
    assert!(can_capture(session.board(), outcome.piece));
}

#[test]
fn test_terminal_position_and_reset() {
    let mut session = session(
        "........\n\
         ........\n\
         ........\n\
         ........\n\
         ........\n\
         ..w.....\n\
         .w......\n\
         r.......",
    );

    assert!(session.is_terminal());
    assert_eq!(session.winner(), Some(Color::White));
    assert_eq!(session.status(), GameStatus::Won(Color::White));
    assert!(session.apply_selection(sq(0, 0), sq(1, 1)).is_err());

    let layout = Layout::preset("promotion").unwrap();
    session.reset(&layout);
    assert_eq!(session.turn_state(), TurnState::AwaitingMove(Color::Red));
    assert_eq!(session.board().to_layout(), layout);
    assert_eq!(session.status(), GameStatus::Ongoing);
}

#[test]
fn test_single_move_selection_is_deterministic() {
    let mut session = session(LAYOUT_PROMOTION);
    let moves = session.legal_moves();
    assert_eq!(moves.len(), 1);

    let mut player = RandomPlayer::new();
    for _ in 0..50 {
        assert_eq!(player.select(&moves), moves[0]);
    }

    session.set_controller(Color::Red, Controller::Computer);
    let outcome = session.play_automated_move().unwrap();
    assert_eq!(outcome.mv, moves[0]);
}

#[test]
fn test_computer_vs_computer_plays_to_completion() {
    let mut session = session(LAYOUT_KING_LOOP)
        .with_controllers(Controller::Computer, Controller::Computer)
        .with_player(RandomPlayer::seeded(21));

    assert_eq!(session.run_automated_turn(), 4);
    assert!(session.is_terminal());
    assert_eq!(session.winner(), Some(Color::Red));
}

#[test]
fn test_automated_turn_stops_for_humans() {
    let mut session = Session::default()
        .with_controllers(Controller::Human, Controller::Computer)
        .with_player(RandomPlayer::seeded(2));

    // Nothing to do while a human is to move
    assert_eq!(session.run_automated_turn(), 0);

    session.apply_selection(sq(2, 2), sq(3, 3)).unwrap();
    assert!(session.run_automated_turn() >= 1);
    assert_eq!(session.side_to_move(), Color::Red);
}

#[test]
fn test_random_games_keep_board_consistent() {
    let mut session = Session::default()
        .with_controllers(Controller::Computer, Controller::Computer)
        .with_player(RandomPlayer::seeded(1234));

    while !session.is_terminal() && session.plies() < DEFAULT_MAX_PLIES {
        let outcome = session.play_automated_move().unwrap();

        // Every active piece sits on a dark cell that points back at it
        for color in Color::all() {
            for id in session.board().pieces_of(color) {
                let square = session.board().square_of(id);
                assert!(square.is_dark());
                assert_eq!(session.board().occupant_at(square), Some(id));
            }
        }

        if let Some(captured) = outcome.captured {
            assert!(!session.board().piece(captured).is_active());
        }
    }
}

#[test]
fn test_click_to_move() {
    let mut session = Session::default();

    assert_eq!(session.click(sq(2, 2)), ClickOutcome::Selected(sq(2, 2)));
    let ClickOutcome::Moved(outcome) = session.click(sq(1, 3)) else {
        panic!("Expected (2, 2) to move to (1, 3)");
    };
    assert_eq!(outcome.mv, Move::shift(sq(2, 2), sq(1, 3)));

    // White's turn: a red piece can no longer be selected
    assert_eq!(session.click(sq(1, 3)), ClickOutcome::Rejected);
    assert_eq!(session.click(sq(1, 5)), ClickOutcome::Selected(sq(1, 5)));
}
