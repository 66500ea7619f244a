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

//! Castling rights management.

use super::{Color, Square};

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A simple struct to store a piece's castling rights.
/// The internal bits are used to represent castling rights.
/// From MSB to LSB:
/// * 4 unused bits
/// * Black queenside castling
/// * Black kingside castling
/// * White queenside castling
/// * White kingside castling
pub struct CastleRights(pub u8);

impl CastleRights {
    /// A `CastleRights` where all rights are available.
    pub const ALL_RIGHTS: CastleRights = CastleRights(15);

    /// A `CastleRights` where no rights are available.
    pub const NO_RIGHTS: CastleRights = CastleRights(0);

    /// Create a `CastleRights` for kingside castling on one side.
    #[inline(always)]
    #[must_use]
    pub const fn king_castle(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(1),
            Color::Black => CastleRights(4),
        }
    }

    /// Create a `CastleRights` for queenside castling on one side.
    #[inline(always)]
    #[must_use]
    pub const fn queen_castle(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(2),
            Color::Black => CastleRights(8),
        }
    }

    #[must_use]
    /// Get the full rights for one color.
    pub const fn color_rights(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(3),
            Color::Black => CastleRights(12),
        }
    }

    #[must_use]
    /// Get the rights which are lost when a piece moves from or onto `sq`.
    /// Only the king and rook home squares affect castling.
    pub const fn touched_by(sq: Square) -> CastleRights {
        match sq {
            Square::A1 => CastleRights(2),
            Square::E1 => CastleRights(3),
            Square::H1 => CastleRights(1),
            Square::A8 => CastleRights(8),
            Square::E8 => CastleRights(12),
            Square::H8 => CastleRights(4),
            _ => CastleRights::NO_RIGHTS,
        }
    }

    #[inline(always)]
    #[must_use]
    /// Can the given color legally castle kingside?
    pub fn is_kingside_castle_legal(self, color: Color) -> bool {
        self & CastleRights::king_castle(color) != CastleRights::NO_RIGHTS
    }

    #[inline(always)]
    #[must_use]
    /// Can the given color legally castle queenside?
    pub fn is_queenside_castle_legal(self, color: Color) -> bool {
        self & CastleRights::queen_castle(color) != CastleRights::NO_RIGHTS
    }

    #[must_use]
    /// Parse the castling field of a FEN string. Returns `None` if `s`
    /// contains anything other than `KQkq` (in any subset) or a lone `-`.
    pub fn from_fen_field(s: &str) -> Option<CastleRights> {
        if s == "-" {
            return Some(CastleRights::NO_RIGHTS);
        }
        let mut rights = CastleRights::NO_RIGHTS;
        for c in s.chars() {
            rights |= match c {
                'K' => CastleRights::king_castle(Color::White),
                'Q' => CastleRights::queen_castle(Color::White),
                'k' => CastleRights::king_castle(Color::Black),
                'q' => CastleRights::queen_castle(Color::Black),
                _ => return None,
            };
        }
        Some(rights)
    }

    #[must_use]
    /// Write these rights as the castling field of a FEN string.
    pub fn to_fen_field(self) -> String {
        let mut s = String::new();
        for (c, color, kingside) in [
            ('K', Color::White, true),
            ('Q', Color::White, false),
            ('k', Color::Black, true),
            ('q', Color::Black, false),
        ] {
            let legal = match kingside {
                true => self.is_kingside_castle_legal(color),
                false => self.is_queenside_castle_legal(color),
            };
            if legal {
                s.push(c);
            }
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }
}

impl BitOr<CastleRights> for CastleRights {
    type Output = CastleRights;
    #[inline(always)]
    fn bitor(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }
}

impl BitOrAssign<CastleRights> for CastleRights {
    #[inline(always)]
    fn bitor_assign(&mut self, other: CastleRights) {
        self.0 |= other.0;
    }
}

impl BitAnd<CastleRights> for CastleRights {
    type Output = CastleRights;
    #[inline(always)]
    fn bitand(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & other.0)
    }
}

impl BitAndAssign<CastleRights> for CastleRights {
    #[inline(always)]
    fn bitand_assign(&mut self, other: CastleRights) {
        self.0 &= other.0;
    }
}

impl Not for CastleRights {
    type Output = CastleRights;
    #[inline(always)]
    fn not(self) -> CastleRights {
        CastleRights(self.0 ^ 15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test that moving a king removes both of its rights, and moving a rook
    /// removes only the rights on its side.
    fn touched_squares() {
        let mut rights = CastleRights::ALL_RIGHTS;
        rights &= !CastleRights::touched_by(Square::H1);
        assert!(!rights.is_kingside_castle_legal(Color::White));
        assert!(rights.is_queenside_castle_legal(Color::White));
        rights &= !CastleRights::touched_by(Square::E8);
        assert_eq!(rights, CastleRights::queen_castle(Color::White));
    }

    #[test]
    /// Test that FEN castling fields are parsed and written back verbatim.
    fn fen_fields() {
        for field in ["KQkq", "Kq", "-", "k"] {
            let rights = CastleRights::from_fen_field(field).unwrap();
            assert_eq!(rights.to_fen_field(), field);
        }
        assert!(CastleRights::from_fen_field("KX").is_none());
    }
}
