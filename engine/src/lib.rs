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

//! The Skewer search core.
//!
//! Given a position (anything implementing [`Position`]) and a clock,
//! [`Engine::choose_move`] runs an iterative deepening negamax search with
//! alpha-beta pruning, quiescence, a transposition table, and killer move
//! ordering, and answers with the best move found in time.

// Many module elements are re-exported to make names more ergonomic to access.

/// Configuration of searches.
pub mod config;
pub use config::SearchConfig;

/// The iterative deepening controller.
mod engine;
pub use engine::{Engine, EngineError};

/// Evaluations, from centipawns to mates.
mod eval;
pub use eval::Eval;

/// Static evaluation of positions.
pub mod evaluate;

/// Limits which cut a search short.
pub mod limit;
pub use limit::SearchLimit;

/// Move ordering and killer moves.
pub mod pick;

/// The contract between the search and the positions it searches.
mod position;
pub use position::Position;

/// Piece-square tables, packed eight signed bytes to a word.
pub mod pst;

/// Fixed-depth negamax and quiescence search.
pub mod search;
pub use search::{SearchError, SearchInfo, SearchResult};

/// Clocks and time allotment.
pub mod time;
pub use time::{Clock, Timer};

/// The transposition table.
pub mod transposition;
pub use transposition::TTable;
