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

//! Representation of player colors.

use std::ops::Not;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// An enum representing the possible colors that a piece or player can be.
pub enum Color {
    /// The white player, a.k.a. the first player to move in a game.
    White = 0,
    /// The black player, a.k.a. the second player to move in a game.
    Black = 1,
}

impl Color {
    /// Both colors, in index order.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline(always)]
    #[must_use]
    /// Get the index of this color, for use in lookup tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    #[must_use]
    /// Get the number of ranks that a pawn of the given color moves forward
    /// in a single step.
    pub const fn pawn_step(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    #[inline(always)]
    #[must_use]
    /// Get the rank (0-indexed) on which pawns of this color promote.
    pub const fn pawn_promote_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline(always)]
    #[must_use]
    /// Get the rank (0-indexed) on which pawns of this color start the game.
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    #[inline(always)]
    #[must_use]
    /// Get the rank (0-indexed) on which this color's king and rooks start.
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl Not for Color {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}
