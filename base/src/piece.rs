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

//! Pieces, which contain no information about their color or current square.

use std::fmt::{Display, Formatter, Result};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
/// The type of a piece. This contains no information about the location of a
/// piece, or of its color.
///
/// The ordering of this enumeration follows conventional piece value, from
/// pawn up to king. Evaluation tables are keyed on `index() + 1`, so the
/// ordering must not change.
pub enum Piece {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    /// Total number of piece types.
    pub const NUM_TYPES: usize = 6;

    /// Array containing all piece types.
    pub const ALL_TYPES: [Piece; Piece::NUM_TYPES] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// The piece types a pawn may promote to, most valuable first.
    pub const PROMOTE_TYPES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    #[inline(always)]
    #[must_use]
    /// Get the index of this piece, for use in lookup tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    /// Get the piece with the given index, if one exists.
    pub const fn from_index(idx: usize) -> Option<Piece> {
        if idx < Piece::NUM_TYPES {
            Some(Piece::ALL_TYPES[idx])
        } else {
            None
        }
    }

    #[must_use]
    /// Get the FEN code of this piece as an uppercase character.
    pub const fn code(self) -> char {
        match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        }
    }

    #[must_use]
    /// Given a FEN character, convert it to a piece type. Must be uppercase.
    pub const fn from_code(c: char) -> Option<Piece> {
        match c {
            'P' => Some(Piece::Pawn),
            'N' => Some(Piece::Knight),
            'B' => Some(Piece::Bishop),
            'R' => Some(Piece::Rook),
            'Q' => Some(Piece::Queen),
            'K' => Some(Piece::King),
            _ => None,
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test that every piece survives a trip through its FEN code.
    fn code_round_trip() {
        for pt in Piece::ALL_TYPES {
            assert_eq!(Piece::from_code(pt.code()), Some(pt));
        }
        assert_eq!(Piece::from_code('x'), None);
    }

    #[test]
    /// Test that indices follow piece value order.
    fn indices() {
        assert_eq!(Piece::Pawn.index(), 0);
        assert_eq!(Piece::King.index(), 5);
        assert_eq!(Piece::from_index(4), Some(Piece::Queen));
        assert_eq!(Piece::from_index(6), None);
    }
}
