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

//! Piece-square tables.
//!
//! A piece-square table gives a bonus (or penalty) to a piece depending on
//! the square it stands on. The tables here are authored from White's point
//! of view and are symmetric across the board's vertical midline, so only
//! the queenside half of the board (files a through d) is stored.
//!
//! Each of the 32 stored squares holds one `u64` word, which packs eight
//! signed bytes. Byte `t - 1` (counting from the least significant byte)
//! holds the value for table `t`:
//!
//! | `t` | table                  |
//! |-----|------------------------|
//! | 1   | pawn                   |
//! | 2   | knight                 |
//! | 3   | bishop                 |
//! | 4   | rook                   |
//! | 5   | queen                  |
//! | 6   | king (middlegame)      |
//! | 7   | king (endgame)         |
//! | 8   | pawn (endgame)         |

use skewer_base::{Color, Piece, Square};

/// The packed tables, indexed by `[rank][file]` with rank 0 being White's
/// back rank and file 0 being the a-file.
const PACKED_TABLES: [[u64; 4]; 8] = [
    [0xFFCE_13EB_EBEB_CE00, 0xFFD8_1DF5_EBF5_D800, 0xFFE1_FFF5_EBF5_E200, 0xFFEB_FFFB_09F5_E200],
    [0xFFE1_F5F5_FAF5_D805, 0xFFEB_EC00_0004_EC0A, 0xFFF5_EC00_0000_000A, 0xFFFF_EBFF_FFFF_FFEC],
    [0x09E1_F5F5_FAF5_E1FB, 0x09F5_EC00_0009_FFFB, 0x0A13_EC05_000A_09F6, 0x0A1D_EC05_000A_0F00],
    [0x13E1_EBFA_FAF5_E200, 0x13F5_E200_0000_0500, 0x141D_E205_000A_0F00, 0x1427_D805_000A_1414],
    [0x1DE1_E1FF_FAF5_E205, 0x1DF5_D800_0005_0005, 0x1E1D_D805_0005_0F0A, 0x1E27_CE05_000A_1419],
    [0x27E1_E1F5_FAF5_E20A, 0x27F5_D805_0000_050A, 0x2813_D805_0005_0A14, 0x281D_CE05_000A_0F1E],
    [0x31E1_E1F6_04F5_D832, 0x31E1_D800_09FF_EC32, 0x31FF_D805_0A00_0032, 0x31FF_CE00_0A00_0532],
    [0xFFCD_E1EB_FFEB_CE00, 0xFFE1_D7F5_FFF5_D800, 0xFFE1_D7F5_FFF5_E200, 0xFFE1_CDFA_FFF5_E200],
];

/// The table number holding endgame king values.
const KING_ENDGAME_TABLE: usize = 7;

/// The table number holding endgame pawn values.
const PAWN_ENDGAME_TABLE: usize = 8;

#[must_use]
/// Get the table number to use for a piece, given whether the game is in its
/// endgame phase. Only pawns and kings have separate endgame tables.
pub const fn table_index(pt: Piece, endgame: bool) -> usize {
    match (pt, endgame) {
        (Piece::Pawn, true) => PAWN_ENDGAME_TABLE,
        (Piece::King, true) => KING_ENDGAME_TABLE,
        _ => pt.index() + 1,
    }
}

#[must_use]
/// Decode the value of table `table` (in `1..=8`) for a piece of color
/// `color` on `sq`, in centipawns from White's point of view.
///
/// Files e through h mirror onto files d through a. Black reads the table
/// with its ranks flipped, and the result is negated so that a good square
/// for Black is a negative value.
pub fn decode(table: usize, color: Color, sq: Square) -> i32 {
    debug_assert!((1..=8).contains(&table));
    let file = match sq.file() {
        f @ 0..=3 => f,
        f => 7 - f,
    };
    let rank = match color {
        Color::White => sq.rank(),
        Color::Black => 7 - sq.rank(),
    };
    let word = PACKED_TABLES[rank as usize][file as usize];
    let value = i32::from(((word >> (8 * (table - 1))) & 0xFF) as u8 as i8);
    match color {
        Color::White => value,
        Color::Black => -value,
    }
}

#[must_use]
/// Get the piece-square value of a piece on a square, in centipawns from
/// White's point of view.
pub fn value(pt: Piece, color: Color, sq: Square, endgame: bool) -> i32 {
    decode(table_index(pt, endgame), color, sq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test some hand-decoded values from the tables.
    fn known_values() {
        // pawn on d2 is discouraged from staying home
        assert_eq!(decode(1, Color::White, Square::D2), -20);
        // pawn on the seventh rank is nearly promoted
        assert_eq!(decode(1, Color::White, Square::A7), 50);
        // knight in the corner
        assert_eq!(decode(2, Color::White, Square::A1), -50);
        // knight in the center
        assert_eq!(decode(2, Color::White, Square::D4), 20);
        // endgame king in the corner
        assert_eq!(decode(7, Color::White, Square::A1), -50);
        // endgame pawn on the seventh rank
        assert_eq!(decode(8, Color::White, Square::A7), 49);
    }

    #[test]
    /// Test that the tables are mirrored across the vertical midline.
    fn file_mirroring() {
        for table in 1..=8 {
            for rank in 0..8 {
                for file in 0..4 {
                    assert_eq!(
                        decode(table, Color::White, Square::new(rank, file)),
                        decode(table, Color::White, Square::new(rank, 7 - file))
                    );
                }
            }
        }
    }

    #[test]
    /// Test that Black's values are White's values, flipped in rank and sign.
    fn color_mirroring() {
        for table in 1..=8 {
            for sq in Square::ALL {
                assert_eq!(
                    decode(table, Color::Black, sq.flip_rank()),
                    -decode(table, Color::White, sq)
                );
            }
        }
    }

    #[test]
    /// Test that pawns and kings switch tables in the endgame while other
    /// pieces do not.
    fn endgame_tables() {
        assert_eq!(table_index(Piece::Pawn, false), 1);
        assert_eq!(table_index(Piece::Pawn, true), 8);
        assert_eq!(table_index(Piece::King, false), 6);
        assert_eq!(table_index(Piece::King, true), 7);
        assert_eq!(table_index(Piece::Queen, true), 5);
    }
}
