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

//! Directions, which are steps between squares on the board.

use std::ops::{Add, Neg};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A difference between two squares, measured in ranks and files. Stepping
/// by a `Direction` may leave the board, so `Square::offset` returns an
/// `Option`.
pub struct Direction {
    /// The number of ranks moved "north" (toward Black's side).
    pub rank_step: i8,
    /// The number of files moved "east" (toward the h-file).
    pub file_step: i8,
}

impl Direction {
    /// A `Direction` which does not move.
    pub const NODIR: Direction = Direction::new(0, 0);

    /// A `Direction` corresponding to a move "north" from White's point of
    /// view.
    pub const NORTH: Direction = Direction::new(1, 0);

    /// A `Direction` corresponding to a move "east" from White's point of view.
    pub const EAST: Direction = Direction::new(0, 1);

    /// A `Direction` corresponding to a move "south" from White's point of
    /// view.
    pub const SOUTH: Direction = Direction::new(-1, 0);

    /// A `Direction` corresponding to a move "west" from White's point of view.
    pub const WEST: Direction = Direction::new(0, -1);

    /* Composite directions */

    pub const NORTHWEST: Direction = Direction::new(1, -1);
    pub const NORTHEAST: Direction = Direction::new(1, 1);
    pub const SOUTHEAST: Direction = Direction::new(-1, 1);
    pub const SOUTHWEST: Direction = Direction::new(-1, -1);

    /* Knight directions */

    pub const NNW: Direction = Direction::new(2, -1);
    pub const NNE: Direction = Direction::new(2, 1);
    pub const ENE: Direction = Direction::new(1, 2);
    pub const ESE: Direction = Direction::new(-1, 2);
    pub const SSE: Direction = Direction::new(-2, 1);
    pub const SSW: Direction = Direction::new(-2, -1);
    pub const WSW: Direction = Direction::new(-1, -2);
    pub const WNW: Direction = Direction::new(1, -2);

    /// The directions that a rook can move, along only one step.
    pub const ROOK_DIRECTIONS: [Direction; 4] = [
        Direction::NORTH,
        Direction::SOUTH,
        Direction::EAST,
        Direction::WEST,
    ];

    /// The directions that a bishop can move, along only one step.
    pub const BISHOP_DIRECTIONS: [Direction; 4] = [
        Direction::NORTHWEST,
        Direction::NORTHEAST,
        Direction::SOUTHWEST,
        Direction::SOUTHEAST,
    ];

    /// The steps that a knight can make.
    pub const KNIGHT_STEPS: [Direction; 8] = [
        Direction::NNW,
        Direction::NNE,
        Direction::ENE,
        Direction::ESE,
        Direction::SSE,
        Direction::SSW,
        Direction::WSW,
        Direction::WNW,
    ];

    /// The steps that a king can make.
    pub const KING_STEPS: [Direction; 8] = [
        Direction::NORTH,
        Direction::NORTHEAST,
        Direction::EAST,
        Direction::SOUTHEAST,
        Direction::SOUTH,
        Direction::SOUTHWEST,
        Direction::WEST,
        Direction::NORTHWEST,
    ];

    #[inline(always)]
    #[must_use]
    /// Create a new Direction based on how far it moves in rank and file.
    pub const fn new(rank_step: i8, file_step: i8) -> Direction {
        Direction {
            rank_step,
            file_step,
        }
    }
}

impl Neg for Direction {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Direction::new(-self.rank_step, -self.file_step)
    }
}

impl Add<Direction> for Direction {
    type Output = Self;
    fn add(self, rhs: Direction) -> Self::Output {
        Direction::new(
            self.rank_step + rhs.rank_step,
            self.file_step + rhs.file_step,
        )
    }
}
