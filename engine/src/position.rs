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

//! The position contract which the search operates over.
//!
//! The search never looks inside a board representation directly. Instead it
//! asks a `Position` for legal moves, plays and takes back moves in stack
//! order, and reads off the few facts it needs for evaluation and caching.

use skewer_base::{
    movegen::{ALL, CAPTURES},
    Color, Game, Move, Piece, Square,
};

/// A mutable chess position which can be searched.
///
/// `make_move` and `undo_move` must be called in matching nested order, and
/// `undo_move` must restore the exact prior state, including the key.
pub trait Position {
    /// Get the legal moves in this position. If `captures_only` is set, only
    /// capturing moves are returned.
    fn legal_moves(&self, captures_only: bool) -> Vec<Move>;

    /// Play a legal move.
    fn make_move(&mut self, m: Move);

    /// Take back `m`, which must be the most recently played move.
    fn undo_move(&mut self, m: Move);

    /// Is the player to move in check?
    fn is_in_check(&self) -> bool;

    /// Is this position drawn by rule (repetition, the 50 move rule,
    /// insufficient material, or stalemate)?
    fn is_draw(&self) -> bool;

    /// Get a hash key which identifies this position for caching.
    fn key(&self) -> u64;

    /// Get the color of the player to move.
    fn player_to_move(&self) -> Color;

    /// Get the piece (and its color) standing on a square, if any.
    fn piece_at(&self, sq: Square) -> Option<(Color, Piece)>;
}

impl Position for Game {
    fn legal_moves(&self, captures_only: bool) -> Vec<Move> {
        match captures_only {
            true => self.get_moves::<CAPTURES>(),
            false => self.get_moves::<ALL>(),
        }
    }

    #[inline(always)]
    fn make_move(&mut self, m: Move) {
        Game::make_move(self, m);
    }

    #[inline(always)]
    fn undo_move(&mut self, m: Move) {
        let undone = self.undo();
        assert_eq!(undone, Ok(m), "undo_move out of order");
    }

    #[inline(always)]
    fn is_in_check(&self) -> bool {
        self.board().is_king_checked()
    }

    #[inline(always)]
    fn is_draw(&self) -> bool {
        self.is_drawn()
    }

    #[inline(always)]
    fn key(&self) -> u64 {
        self.board().hash
    }

    #[inline(always)]
    fn player_to_move(&self) -> Color {
        self.board().player_to_move
    }

    #[inline(always)]
    fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.board().piece_at(sq)
    }
}
