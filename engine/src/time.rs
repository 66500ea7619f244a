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

//! Time management heuristics and decision making.
//!
//! In a match, a chess engine is usually given a budget of time for the entire
//! game, and it is the engine's duty to decide how much to use when making each
//! move. For now, Skewer rations time to itself indiscriminately: a fixed
//! share of the remaining time, plus part of the increment.

use std::{cmp::min, time::Instant};

use crate::SearchConfig;

/// A source of clock readings for the player to move.
pub trait Clock {
    /// The time left on the player's clock at the start of this move, in
    /// milliseconds.
    fn remaining_ms(&self) -> u64;

    /// The time added to the player's clock after each move, in
    /// milliseconds.
    fn increment_ms(&self) -> u64;

    /// The time spent so far on this move, in milliseconds.
    fn elapsed_ms(&self) -> u64;
}

#[derive(Clone, Copy, Debug)]
/// A wall-clock timer for a single move, started when it is created.
pub struct Timer {
    /// The instant at which thinking on this move started.
    start: Instant,
    /// The time remaining on the clock when the move started.
    remaining_ms: u64,
    /// The increment per move.
    increment_ms: u64,
}

impl Timer {
    #[must_use]
    /// Start a timer for a move, given the state of the player's clock.
    pub fn new(remaining_ms: u64, increment_ms: u64) -> Timer {
        Timer {
            start: Instant::now(),
            remaining_ms,
            increment_ms,
        }
    }
}

impl Clock for Timer {
    fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    fn increment_ms(&self) -> u64 {
        self.increment_ms
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[must_use]
/// Decide how much time to search a position, given the time remaining.
///
/// `remaining` is the remaining time that the player has, measured in
/// milliseconds.
///
/// `increment` is the time increment that the player will get after they
/// play a move, measured in milliseconds.
///
/// The budget is `remaining / moves_to_go + increment / increment_divisor`,
/// but never more than 90% of the remaining time.
pub fn get_search_time(remaining: u64, increment: u64, config: &SearchConfig) -> u64 {
    let share = remaining.checked_div(config.moves_to_go).unwrap_or(remaining)
        + increment.checked_div(config.increment_divisor).unwrap_or(0);
    min(share, remaining / 10 * 9 + remaining % 10 * 9 / 10)
}
