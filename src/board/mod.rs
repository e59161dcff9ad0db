/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Symbolic encodings of whole-board piece placements.
mod layout;

/// Move generation: shifts, captures, and mandatory-capture aggregation.
mod movegen;

/// The [`Move`] type and the fixed-capacity [`MoveList`].
mod moves;

/// Colors, piece kinds, and the pieces themselves.
mod piece;

/// The arena-backed [`Board`].
mod position;

/// Cells and coordinates.
mod square;

pub use layout::*;
pub use movegen::*;
pub use moves::*;
pub use piece::*;
pub use position::*;
pub use square::*;
