/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use crate::{Board, TurnController};

/// Perform a perft at the specified depth, counting the number of reachable game states (nodes).
///
/// Each individual capture in a chain counts as one ply, so a forced continuation is a node of its own.
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// If you do *not* want to use bulk counting, use [`perft_generic`].
///
/// # Example
/// ```
/// # use checkers::*;
/// assert_eq!(perft(&Board::default(), &TurnController::new(), 3), 302);
/// ```
#[inline(always)]
pub fn perft(board: &Board, turn: &TurnController, depth: usize) -> u64 {
    perft_generic::<true, false>(board, turn, depth)
}

/// Perform a splitperft at the specified depth, printing the number of nodes reachable after each move available at the root.
#[inline(always)]
pub fn splitperft(board: &Board, turn: &TurnController, depth: usize) -> u64 {
    perft_generic::<true, true>(board, turn, depth)
}

/// Generic version of [`perft`] that allows you to specify whether to perform bulk counting and splitperft.
///
/// If `BULK` is set to `true`, this will perform bulk counting.
/// If `SPLIT` is set to `true`, this will perform a splitperft.
pub fn perft_generic<const BULK: bool, const SPLIT: bool>(
    board: &Board,
    turn: &TurnController,
    depth: usize,
) -> u64 {
    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && !SPLIT && depth == 1 {
        return turn.legal_moves(board).len() as u64;
    }
    // Recursion limit; return 1, since we're fathoming this node.
    else if depth == 0 {
        return 1;
    }

    turn.legal_moves(board).into_iter().fold(0, |nodes, mv| {
        let mut board = board.clone();
        let mut turn = *turn;
        turn.apply(&mut board, mv);

        let new_nodes = perft_generic::<BULK, false>(&board, &turn, depth - 1);

        if SPLIT {
            println!("{mv}\t{new_nodes}");
        }

        nodes + new_nodes
    })
}

/// Runs a perft (or splitperft, if `SPLIT` is set) and prints the node count, elapsed time, and nodes per second.
pub fn print_perft<const SPLIT: bool>(board: &Board, turn: &TurnController, depth: usize) -> u64 {
    let now = Instant::now();
    let nodes = perft_generic::<true, SPLIT>(board, turn, depth);
    let elapsed = now.elapsed();

    let nps = nodes as f64 / elapsed.as_secs_f64();
    if SPLIT {
        println!();
    }
    println!("Nodes:\t{nodes}");
    println!("Time:\t{elapsed:.1?}");
    println!("NPS:\t{:.0}", nps);

    nodes
}
