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

//! Search limiting.
//!
//! A `SearchLimit` is polled at the top of every node of a search. Once the
//! deadline passes, the poll fails and the search unwinds.

use crate::{search::SearchError, time::Clock};

#[derive(Clone, Copy)]
/// A limit on how long a search may run.
pub struct SearchLimit<'a> {
    /// The clock for this move, or `None` if the search is untimed.
    clock: Option<&'a dyn Clock>,
    /// The number of milliseconds after which the search is over.
    budget_ms: u64,
}

impl<'a> SearchLimit<'a> {
    #[must_use]
    /// Create a new `SearchLimit` which will never stop.
    pub fn new() -> SearchLimit<'a> {
        SearchLimit {
            clock: None,
            budget_ms: u64::MAX,
        }
    }

    #[must_use]
    /// Create a `SearchLimit` which stops once `clock` reports more than
    /// `budget_ms` milliseconds elapsed on this move.
    pub fn timed(clock: &'a dyn Clock, budget_ms: u64) -> SearchLimit<'a> {
        SearchLimit {
            clock: Some(clock),
            budget_ms,
        }
    }

    #[inline]
    #[must_use]
    /// Get the time elapsed on this move, in milliseconds. Untimed searches
    /// always report zero.
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.map_or(0, |clock| clock.elapsed_ms())
    }

    #[inline]
    #[must_use]
    /// Poll whether the search is over.
    pub fn is_over(&self) -> bool {
        self.elapsed_ms() > self.budget_ms
    }

    #[inline]
    /// Poll the limit, failing with a timeout if the search is over.
    ///
    /// # Errors
    ///
    /// This function will return `Err(SearchError::Timeout)` if the budget
    /// has been used up.
    pub fn check(&self) -> Result<(), SearchError> {
        match self.is_over() {
            true => Err(SearchError::Timeout),
            false => Ok(()),
        }
    }
}

impl Default for SearchLimit<'_> {
    fn default() -> Self {
        SearchLimit::new()
    }
}
