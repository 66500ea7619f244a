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

//! Evaluations, which are the scores attached to positions during search.

use skewer_base::Color;

use std::{
    fmt::{Display, Formatter},
    ops::Neg,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
/// A measurement of how good a position is, in centipawns, from the
/// perspective of some player. Positive values are good for that player.
///
/// Checkmates are scored beyond `Eval::MATE` in magnitude. A side which is
/// mated with `d` plies of search left over scores `-(MATE + d)`, so the
/// search prefers faster wins and slower losses.
///
/// # Examples
///
/// ```
/// use skewer_engine::Eval;
/// let mate_eval = -Eval::mated(3);
/// let draw_eval = Eval::DRAW;
/// assert!(mate_eval > draw_eval);
/// assert!(-Eval::mated(3) > -Eval::mated(1));
/// ```
pub struct Eval(f64);

impl Eval {
    /// An evaluation which is smaller than every other evaluation.
    pub const MIN: Eval = Eval(f64::NEG_INFINITY);

    /// An evaluation which is larger than every other evaluation.
    pub const MAX: Eval = Eval(f64::INFINITY);

    /// The evaluation of a drawn position.
    pub const DRAW: Eval = Eval(0.);

    /// The magnitude at which evaluations are considered mates.
    pub const MATE: f64 = 100_000.;

    #[inline(always)]
    #[must_use]
    /// Construct an `Eval` with the given value in centipawns.
    pub const fn centipawns(x: f64) -> Eval {
        Eval(x)
    }

    #[inline(always)]
    #[must_use]
    /// Get the evaluation of a position in which the player to move has been
    /// checkmated, with `depth_left` plies of nominal search depth remaining.
    pub fn mated(depth_left: u8) -> Eval {
        Eval(-Eval::MATE - f64::from(depth_left))
    }

    #[inline(always)]
    #[must_use]
    /// Is this evaluation a mate (i.e. a non-normal evaluation)?
    pub fn is_mate(self) -> bool {
        self.0.is_finite() && self.0.abs() >= Eval::MATE
    }

    #[inline(always)]
    #[must_use]
    /// Get the value in centipawns of this evaluation.
    pub const fn centipawn_val(self) -> f64 {
        self.0
    }

    #[inline(always)]
    #[must_use]
    /// Put this evaluation into the perspective of the given player, given
    /// that it is currently from White's perspective.
    pub fn in_perspective(self, player: Color) -> Eval {
        match player {
            Color::White => self,
            Color::Black => -self,
        }
    }

    #[inline(always)]
    #[must_use]
    /// Get the larger of two evaluations.
    pub fn max(self, other: Eval) -> Eval {
        if other > self {
            other
        } else {
            self
        }
    }

    #[inline(always)]
    #[must_use]
    /// Get the smaller of two evaluations.
    pub fn min(self, other: Eval) -> Eval {
        if other < self {
            other
        } else {
            self
        }
    }
}

impl Display for Eval {
    /// Mates print as `+M<n>` or `-M<n>`, where `n` is the nominal search
    /// depth that was left over when the mate was found. It is not the
    /// number of moves to mate: a larger `n` means a quicker mate.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_mate() {
            let sign = if self.0 > 0. { '+' } else { '-' };
            write!(f, "{sign}M{:.0}", self.0.abs() - Eval::MATE)
        } else if self.0 == 0. {
            write!(f, "0.00")
        } else {
            write!(f, "{:+.2}", self.0 / 100.)
        }
    }
}

impl Neg for Eval {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self::Output {
        Eval(-self.0)
    }
}
