/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Board geometry, pieces, layouts, and move generation.
mod board;

/// Command-line arguments and engine commands.
mod cli;

/// The interactive engine loop and user input handling.
mod engine;

/// Counting the legal move tree, for validating move generation.
mod perft;

/// Move-selection policies for computer-controlled sides.
mod player;

/// Automated computer-vs-computer matches.
mod series;

/// A single game: the board, whose turn it is, and who plays each side.
mod session;

/// The turn state machine, including forced capture chains.
mod turn;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use perft::*;
pub use player::*;
pub use series::*;
pub use session::*;
pub use turn::*;
