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

//! Shared data types and the reference position implementation used by the
//! Skewer engine: a mailbox board, legal move generation, Zobrist hashing,
//! and games with history.

// Many module elements are re-exported to make names more ergonomic to access.

mod board;
pub use board::{Board, FenError, START_FEN};

mod castling;
pub use castling::CastleRights;

mod color;
pub use color::Color;

mod direction;
pub use direction::Direction;

mod game;
pub use game::{Game, GameError};

pub mod movegen;

mod moves;
pub use moves::Move;

pub mod perft;

mod piece;
pub use piece::Piece;

mod square;
pub use square::Square;

mod zobrist;
