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

//! Configuration of searches.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Configuration options for a search.
pub struct SearchConfig {
    /// The deepest iteration which iterative deepening will attempt. Killer
    /// moves are tracked for each depth up to this one.
    pub max_depth: u8,
    /// Log base 2 of the number of entries in the transposition table.
    pub tt_capacity_log2: u8,
    /// The number of moves which the remaining time is expected to last for.
    pub moves_to_go: u64,
    /// The fraction of the increment (as `1 / increment_divisor`) which is
    /// spent on every move.
    pub increment_divisor: u64,
    /// The number of plies from the root at which checking moves are ordered
    /// ahead of captures. Detecting a check costs a make and unmake for every
    /// candidate, so it is only worthwhile near the root. Zero disables check
    /// ordering.
    pub check_ordering_plies: u8,
}

impl SearchConfig {
    #[must_use]
    pub const fn new() -> SearchConfig {
        SearchConfig {
            max_depth: 20,
            tt_capacity_log2: 20,
            moves_to_go: 40,
            increment_divisor: 3,
            check_ordering_plies: 2,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig::new()
    }
}
