/*
  Skewer, a time-bounded chess search engine.
  Derived from Fiddler, a UCI-compatible chess engine.
  Copyright (C) 2022 The Fiddler Authors (see AUTHORS.md file)

  Skewer is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Skewer is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Performance testing, or "perft." Perft is used for verifying the correctness
//! of move generation and of the make-move process.

use super::{
    board::FenError,
    movegen::{get_moves, ALL},
    Board,
};

/// Count the leaf nodes of the legal move tree from a position, to a given
/// depth.
///
/// # Errors
///
/// This function will return an `Err` if `fen` is not a legal board.
pub fn perft(fen: &str, depth: u8) -> Result<u64, FenError> {
    let b = Board::from_fen(fen)?;
    Ok(perft_search(&b, depth))
}

/// The core search algorithm for perft.
fn perft_search(b: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = get_moves::<ALL>(b);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut total = 0;
    for m in moves {
        let mut bcopy = *b;
        bcopy.make_move(m);
        debug_assert_eq!(bcopy.hash, bcopy.fresh_hash());
        total += perft_search(&bcopy, depth - 1);
    }

    total
}
