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

//! Squares, which are positions on a board.

use super::Direction;

use std::{
    convert::TryFrom,
    fmt::{Display, Formatter},
};

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// A square: one of 64 spots on a `Board` that a `Piece` can occupy.
///
/// Internally, `Square`s are represented as a single integer to maintain a
/// small size. From MSB to LSB, each square is composed of:
/// * 2 unused bits
/// * 3 bits for the rank
/// * 3 bits for the file
pub enum Square {
    A1 = 0,
    B1 = 1,
    C1 = 2,
    D1 = 3,
    E1 = 4,
    F1 = 5,
    G1 = 6,
    H1 = 7,
    A2 = 8,
    B2 = 9,
    C2 = 10,
    D2 = 11,
    E2 = 12,
    F2 = 13,
    G2 = 14,
    H2 = 15,
    A3 = 16,
    B3 = 17,
    C3 = 18,
    D3 = 19,
    E3 = 20,
    F3 = 21,
    G3 = 22,
    H3 = 23,
    A4 = 24,
    B4 = 25,
    C4 = 26,
    D4 = 27,
    E4 = 28,
    F4 = 29,
    G4 = 30,
    H4 = 31,
    A5 = 32,
    B5 = 33,
    C5 = 34,
    D5 = 35,
    E5 = 36,
    F5 = 37,
    G5 = 38,
    H5 = 39,
    A6 = 40,
    B6 = 41,
    C6 = 42,
    D6 = 43,
    E6 = 44,
    F6 = 45,
    G6 = 46,
    H6 = 47,
    A7 = 48,
    B7 = 49,
    C7 = 50,
    D7 = 51,
    E7 = 52,
    F7 = 53,
    G7 = 54,
    H7 = 55,
    A8 = 56,
    B8 = 57,
    C8 = 58,
    D8 = 59,
    E8 = 60,
    F8 = 61,
    G8 = 62,
    H8 = 63,
}

impl Square {
    /// Every square on the board, in index order.
    pub const ALL: [Square; 64] = [
        Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
        Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
        Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
        Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
        Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
        Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
        Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
        Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8,
    ];

    #[inline(always)]
    #[must_use]
    /// Create a Square from the given rank and file. The ranks run from 0 to 7
    /// (instead of 1 through 8), and the files run from A to H. Out-of-range
    /// coordinates are wrapped onto the board.
    pub const fn new(rank: u8, file: u8) -> Square {
        Square::ALL[(((rank & 7) << 3) | (file & 7)) as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get the integer representing the rank (0 -> 1, ...) of this square.
    pub const fn rank(self) -> u8 {
        self as u8 >> 3
    }

    #[inline(always)]
    #[must_use]
    /// Get the integer representing the file (0 -> A, ...) of this square.
    pub const fn file(self) -> u8 {
        self as u8 & 7
    }

    #[inline(always)]
    #[must_use]
    /// Get the index of this square, for use in lookup tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    /// Step from this square in a direction, returning `None` if the step
    /// would leave the board.
    pub const fn offset(self, dir: Direction) -> Option<Square> {
        let rank = self.rank() as i8 + dir.rank_step;
        let file = self.file() as i8 + dir.file_step;
        if 0 <= rank && rank < 8 && 0 <= file && file < 8 {
            Some(Square::new(rank as u8, file as u8))
        } else {
            None
        }
    }

    #[must_use]
    /// Get the square reflected across the board's horizontal midline.
    pub const fn flip_rank(self) -> Square {
        Square::new(7 - self.rank(), self.file())
    }

    /// Convert an algebraic string (such as "e7") to a square.
    ///
    /// # Errors
    ///
    /// This function will return an `Err` if `s` does not name a square.
    pub fn from_algebraic(s: &str) -> Result<Square, String> {
        let mut chars = s.chars();
        let (Some(file_chr), Some(rank_chr), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(format!("square name `{s}` must be two characters long"));
        };
        let file = match file_chr {
            'a'..='h' => file_chr as u8 - b'a',
            _ => return Err(format!("illegal file `{file_chr}` in square name")),
        };
        let rank = match rank_chr {
            '1'..='8' => rank_chr as u8 - b'1',
            _ => return Err(format!("illegal rank `{rank_chr}` in square name")),
        };
        Ok(Square::new(rank, file))
    }
}

impl TryFrom<u8> for Square {
    type Error = &'static str;

    #[inline(always)]
    fn try_from(value: u8) -> Result<Square, Self::Error> {
        Square::ALL
            .get(value as usize)
            .copied()
            .ok_or("input value for square is out of range")
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}
