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

//! Full chess games, including history and metadata.

use super::{
    board::FenError,
    movegen::{get_moves, has_moves, is_legal, GenMode},
    Board, Move,
};

use nohash_hasher::IntMap;

use std::{
    default::Default,
    fmt::{Display, Formatter},
};

use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
/// The ways in which an operation on a `Game` can fail.
pub enum GameError {
    /// There was no move to undo.
    #[error("no moves to undo")]
    NoHistory,
    /// The move given is not legal in the current position.
    #[error("illegal move {0} given")]
    IllegalMove(Move),
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// A struct containing game information, which unlike a `Board`, knows about
/// its history and can do things like repetition timing.
///
/// Moves are applied by copying the current board onto a history stack, so
/// undoing a move restores the previous state exactly.
pub struct Game {
    /// The current state of the board.
    board: Board,
    /// The sequence of board states before the current one, in order. The
    /// first element is the starting position of the game.
    history: Vec<Board>,
    /// The list, in order, of all moves made in the game.
    /// They should all be valid moves.
    /// The length of `moves` is always equal to the length of `history`.
    moves: Vec<Move>,
    /// Stores the number of times a position has been reached in the course of
    /// this game.
    /// It is used for three-move-rule draws.
    /// The keys are the Zobrist hashes of the boards previously visited.
    repetitions: IntMap<u64, u8>,
}

impl Game {
    #[must_use]
    /// Construct a new `Game` in the conventional chess starting position.
    pub fn new() -> Game {
        Game::from_board(Board::default())
    }

    #[must_use]
    /// Construct a new `Game` starting from the given board, with no
    /// history.
    pub fn from_board(board: Board) -> Game {
        Game {
            board,
            history: Vec::new(),
            moves: Vec::new(),
            repetitions: IntMap::from_iter([(board.hash, 1)]),
        }
    }

    /// Construct a new `Game` using the Forsyth-Edwards notation
    /// description of its position.
    ///
    /// # Errors
    ///
    /// This function will return an `Err` if the FEN string is invalid.
    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        Ok(Game::from_board(Board::from_fen(fen)?))
    }

    /// Empty out the history of this game completely, but leave the original
    /// start state of the board.
    pub fn clear(&mut self) {
        if let Some(&start) = self.history.first() {
            self.board = start;
        }
        self.history.clear();
        self.moves.clear();
        self.repetitions.clear();
        self.repetitions.insert(self.board.hash, 1);
    }

    /// Make a move, assuming said move is legal.
    ///
    /// Making an illegal move will not panic, but will leave the game in an
    /// inconsistent state. It is recommended to only call `make_move` with
    /// moves that were already validated.
    pub fn make_move(&mut self, m: Move) {
        let mut new_board = self.board;
        new_board.make_move(m);
        *self.repetitions.entry(new_board.hash).or_insert(0) += 1;
        self.history.push(self.board);
        self.moves.push(m);
        self.board = new_board;
    }

    /// Attempt to play a move, which may or may not be legal.
    ///
    /// # Errors
    ///
    /// This function will return `Err(GameError::IllegalMove)` if `m` is not
    /// legal, leaving the game unchanged.
    pub fn try_move(&mut self, m: Move) -> Result<(), GameError> {
        if is_legal(m, &self.board) {
            self.make_move(m);
            Ok(())
        } else {
            Err(GameError::IllegalMove(m))
        }
    }

    /// Undo the most recent move. The move inside the `Ok` variant will be
    /// the most recent move played.
    ///
    /// # Errors
    ///
    /// This function will return an `Err` if the history of this game has no
    /// more positions left to undo.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        let m_removed = self.moves.pop().ok_or(GameError::NoHistory)?;
        let b_restored = self.history.pop().ok_or(GameError::NoHistory)?;
        if let Some(num_reps) = self.repetitions.get_mut(&self.board.hash) {
            *num_reps -= 1;
            if *num_reps == 0 {
                self.repetitions.remove(&self.board.hash);
            }
        }
        self.board = b_restored;

        Ok(m_removed)
    }

    #[inline(always)]
    #[must_use]
    /// Get the position representing the current state of the game.
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    /// Detect how the game has ended.
    /// There are three possible return values:
    ///
    /// * `None`: the game is not over.
    /// * `Some(false)`: the game is over and is drawn.
    /// * `Some(true)`: the game is over by checkmate.
    pub fn end_state(&self) -> Option<bool> {
        if !has_moves(&self.board) {
            return Some(self.board.is_king_checked());
        }

        if self.is_drawn() {
            return Some(false);
        }

        None
    }

    #[must_use]
    /// Has the current position occurred at least three times in this game?
    pub fn drawn_by_repetition(&self) -> bool {
        self.repetitions.get(&self.board.hash).copied().unwrap_or(0) >= 3
    }

    #[must_use]
    /// Is the current position a draw? This covers threefold repetition, the
    /// 50 move rule, insufficient material, and stalemate.
    pub fn is_drawn(&self) -> bool {
        self.drawn_by_repetition()
            || self.board.halfmove_clock >= 100
            || self.board.is_insufficient_material()
            || (!self.board.is_king_checked() && !has_moves(&self.board))
    }

    #[must_use]
    /// Get the legal moves in this position.
    pub fn get_moves<const M: GenMode>(&self) -> Vec<Move> {
        get_moves::<M>(&self.board)
    }

    // no need for `is_empty` since history should always be nonempty
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    /// Get the number of total positions in this history of this game.
    pub fn len(&self) -> usize {
        self.history.len() + 1
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for m in &self.moves {
            write!(f, "{m} ")?;
        }

        Ok(())
    }
}
