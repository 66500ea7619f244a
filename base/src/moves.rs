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

//! Moves, which describe a single ply of play.

use super::{Piece, Square};

use std::fmt::{Debug, Display, Formatter};

#[derive(Copy, Clone, Hash, PartialEq, Eq)]
/// The information of one move, containing its from- and to-squares, as well
/// as the pieces involved. Carrying the moving and captured pieces lets the
/// search classify a move without looking at the board again.
///
/// Internally, moves are represented as packed structures in a single
/// unsigned 32-bit integer. From LSB to MSB:
/// * 6 bits: the from-square
/// * 6 bits: the to-square
/// * 3 bits: the moving piece
/// * 3 bits: the captured piece (7 if nothing was captured)
/// * 3 bits: the promotion type (7 if there is no promotion)
/// * 2 bits: flags (normal, castle, or en passant)
pub struct Move(u32);

impl Move {
    /// A sentinel value for a move which is illegal, or otherwise
    /// inexpressible. Move generation can never produce it, since its from-
    /// and to-squares are equal.
    pub const NULL: Move = Move(u32::MAX);

    /// The value of a piece field when no piece is present.
    const NO_PIECE: u32 = 7;

    /// The shift of the flag bits.
    const FLAG_SHIFT: u32 = 21;

    /// The flag bits representing a move which is a castle.
    const CASTLE_FLAG: u32 = 1;

    /// The flag bits representing a move which is en passant.
    const EN_PASSANT_FLAG: u32 = 2;

    #[inline(always)]
    #[must_use]
    /// Make a new `Move` for a piece. Assumes that all the inputs are valid.
    const fn new(
        from_square: Square,
        to_square: Square,
        mover: Piece,
        capturee: Option<Piece>,
        promote_type: Option<Piece>,
        flag: u32,
    ) -> Move {
        let capture_bits = match capturee {
            Some(p) => p as u32,
            None => Move::NO_PIECE,
        };
        let promote_bits = match promote_type {
            Some(p) => p as u32,
            None => Move::NO_PIECE,
        };
        Move(
            from_square as u32
                | (to_square as u32) << 6
                | (mover as u32) << 12
                | capture_bits << 15
                | promote_bits << 18
                | flag << Move::FLAG_SHIFT,
        )
    }

    #[inline(always)]
    #[must_use]
    /// Create a `Move` with no promotion type, which may or may not capture.
    pub const fn normal(
        from_square: Square,
        to_square: Square,
        mover: Piece,
        capturee: Option<Piece>,
    ) -> Move {
        Move::new(from_square, to_square, mover, capturee, None, 0)
    }

    #[inline(always)]
    #[must_use]
    /// Create a pawn `Move` with the given promotion type. The promote type
    /// must not be a pawn or a king.
    pub const fn promoting(
        from_square: Square,
        to_square: Square,
        capturee: Option<Piece>,
        promote_type: Piece,
    ) -> Move {
        Move::new(
            from_square,
            to_square,
            Piece::Pawn,
            capturee,
            Some(promote_type),
            0,
        )
    }

    #[inline(always)]
    #[must_use]
    /// Create a king `Move` which is tagged as a castling move.
    pub const fn castling(from_square: Square, to_square: Square) -> Move {
        Move::new(
            from_square,
            to_square,
            Piece::King,
            None,
            None,
            Move::CASTLE_FLAG,
        )
    }

    #[inline(always)]
    #[must_use]
    /// Create a pawn `Move` which is tagged as an en passant capture.
    pub const fn en_passant(from_square: Square, to_square: Square) -> Move {
        Move::new(
            from_square,
            to_square,
            Piece::Pawn,
            Some(Piece::Pawn),
            None,
            Move::EN_PASSANT_FLAG,
        )
    }

    #[inline(always)]
    #[must_use]
    /// Get the square that a piece moves from to execute this move.
    pub const fn from_square(self) -> Square {
        Square::ALL[(self.0 & 63) as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get the target square of this move.
    pub const fn to_square(self) -> Square {
        Square::ALL[((self.0 >> 6) & 63) as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get the type of the piece making this move.
    pub const fn mover(self) -> Piece {
        match Piece::from_index(((self.0 >> 12) & 7) as usize) {
            Some(p) => p,
            None => Piece::King,
        }
    }

    #[inline(always)]
    #[must_use]
    /// Get the type of the piece captured by this move, if any.
    pub const fn capturee(self) -> Option<Piece> {
        Piece::from_index(((self.0 >> 15) & 7) as usize)
    }

    #[inline(always)]
    #[must_use]
    /// Get the promotion type of this move, if any.
    pub const fn promote_type(self) -> Option<Piece> {
        Piece::from_index(((self.0 >> 18) & 7) as usize)
    }

    #[inline(always)]
    #[must_use]
    /// Determine whether this move captures a piece.
    pub const fn is_capture(self) -> bool {
        self.capturee().is_some()
    }

    #[inline(always)]
    #[must_use]
    /// Determine whether this move is a promotion.
    pub const fn is_promotion(self) -> bool {
        self.promote_type().is_some()
    }

    #[inline(always)]
    #[must_use]
    /// Determine whether this move is marked as a castle.
    pub const fn is_castle(self) -> bool {
        self.0 != Move::NULL.0 && (self.0 >> Move::FLAG_SHIFT) & 3 == Move::CASTLE_FLAG
    }

    #[inline(always)]
    #[must_use]
    /// Determine whether this move is marked as an en passant capture.
    pub const fn is_en_passant(self) -> bool {
        self.0 != Move::NULL.0 && (self.0 >> Move::FLAG_SHIFT) & 3 == Move::EN_PASSANT_FLAG
    }

    #[must_use]
    /// Convert this move to its UCI (long algebraic) form, such as `e7e8q`.
    pub fn to_uci(self) -> String {
        if self == Move::NULL {
            return "0000".into();
        }
        match self.promote_type() {
            Some(p) => format!(
                "{}{}{}",
                self.from_square(),
                self.to_square(),
                p.code().to_ascii_lowercase()
            ),
            None => format!("{}{}", self.from_square(), self.to_square()),
        }
    }

    #[inline(always)]
    #[must_use]
    /// Get the raw bits of this move.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if *self == Move::NULL {
            return write!(f, "Move::NULL");
        }
        write!(f, "{} {}", self.mover(), self.to_uci())?;
        if let Some(victim) = self.capturee() {
            write!(f, " x{victim}")?;
        }
        if self.is_castle() {
            write!(f, " [castle]")?;
        }
        if self.is_en_passant() {
            write!(f, " [e.p.]")?;
        }
        Ok(())
    }
}
