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

//! Transposition tables.
//!
//! A transposition table is a large hash-map from hashkeys of board positions
//! to useful information about each position. If the same position is
//! reached through multiple lines, the engine can reuse its old evaluation,
//! and the best move found last time is a good first guess for ordering.
//!
//! Skewer's table is a fixed-size array indexed by the low bits of the key.
//! Every store overwrites its slot unconditionally, even if the slot held a
//! deeper search of a different position. Keys are checked on every probe,
//! so an overwritten or colliding entry is never returned for the wrong
//! position. The retrieved move must still be checked for legality before it
//! is played, since two positions can share a full key.

use skewer_base::Move;

use crate::Eval;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// How a stored score relates to the true value of its position.
pub enum Bound {
    /// The slot has never been written.
    Invalid,
    /// The score is the exact value of the position.
    Exact,
    /// The score is a lower bound (the search failed high).
    Lower,
    /// The score is an upper bound (the search failed low).
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// An entry in the transposition table.
pub struct TTEntry {
    /// The hash key of the position this entry describes.
    pub key: u64,
    /// The score of the position, from the perspective of the player to move.
    pub score: Eval,
    /// The depth to which this entry was searched.
    pub depth: u8,
    /// The best move in the position when this entry was searched. Will be
    /// `Move::NULL` when there are no moves.
    pub best_move: Move,
    /// How `score` bounds the value of the position.
    pub bound: Bound,
}

impl TTEntry {
    /// An entry which has never been written.
    pub const EMPTY: TTEntry = TTEntry {
        key: 0,
        score: Eval::DRAW,
        depth: 0,
        best_move: Move::NULL,
        bound: Bound::Invalid,
    };
}

#[derive(Clone, Debug)]
/// A table which stores transposition data. It behaves much like a hash-map
/// from positions to table entries, except that an "old" element is evicted
/// whenever another one takes its place.
pub struct TTable {
    /// List of all entries in the transposition table. The length of `entries`
    /// must always be a power of two.
    entries: Vec<TTEntry>,
    /// The mask for retrieving entries from the table.
    mask: u64,
}

impl TTable {
    /// Create a transposition table with a fixed capacity. The capacity is
    /// *not* the number of entries, but rather log_2 of the number of entries.
    ///
    /// # Panics
    ///
    /// This function will panic if `capacity_log2` is large enough to cause
    /// overflow.
    #[must_use]
    pub fn with_capacity(capacity_log2: u8) -> TTable {
        let n_entries = 1usize << capacity_log2;
        TTable {
            entries: vec![TTEntry::EMPTY; n_entries],
            mask: (n_entries - 1) as u64,
        }
    }

    #[inline(always)]
    /// Get the slot index of a key.
    fn slot(&self, key: u64) -> usize {
        (key & self.mask) as usize
    }

    #[must_use]
    /// Get a copy of the entry stored for `key`, if one exists. Returns
    /// `None` if the slot is empty or belongs to a different position.
    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        let entry = self.entries[self.slot(key)];
        (entry.bound != Bound::Invalid && entry.key == key).then_some(entry)
    }

    #[must_use]
    /// Get the best move stored for `key`, if one exists.
    pub fn best_move(&self, key: u64) -> Option<Move> {
        self.probe(key)
            .map(|entry| entry.best_move)
            .filter(|&m| m != Move::NULL)
    }

    /// Write an entry into the slot for `entry.key`, replacing whatever was
    /// there.
    pub fn store(&mut self, entry: TTEntry) {
        let idx = self.slot(entry.key);
        self.entries[idx] = entry;
    }

    /// Construct and store an entry.
    pub fn save(&mut self, key: u64, score: Eval, depth: u8, best_move: Move, bound: Bound) {
        self.store(TTEntry {
            key,
            score,
            depth,
            best_move,
            bound,
        });
    }

    #[must_use]
    /// Get an estimate of the fill rate proportion of this transposition table
    /// out of 1000.
    pub fn fill_rate_permill(&self) -> u16 {
        // take a sample of the first 1000 entries
        // if the size is lower than 1000, we will visit some entries twice,
        // but I guess that's OK since it's meant to just be a rough
        // estimate.
        let num_full = (0..1000u64)
            .filter(|&idx| self.entries[(idx & self.mask) as usize].bound != Bound::Invalid)
            .count();
        num_full as u16
    }

    /// Clear all entries in the table.
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
    }
}
