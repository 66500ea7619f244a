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

//! Static evaluation of positions.
//!
//! A position is scored by summing material and piece-square values over the
//! whole board. Once few enough pieces remain, pawns and kings switch over to
//! their endgame tables, and the tempo bonus for the side to move is dropped.

use skewer_base::{Color, Piece, Square};

use crate::{pst, Eval, Position};

/// The number of non-pawn, non-king pieces below which a position is
/// considered an endgame.
pub const ENDGAME_THRESHOLD: usize = 7;

/// The bonus, in centipawns, for being the side to move outside of the
/// endgame.
pub const TEMPO_BONUS: i32 = 10;

#[inline(always)]
#[must_use]
/// Get the material value of a piece type, in centipawns. Kings are never
/// traded, so they have no material value.
pub const fn piece_value(pt: Piece) -> i32 {
    match pt {
        Piece::Pawn => 100,
        Piece::Knight => 320,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 0,
    }
}

#[must_use]
/// Determine whether a position is in its endgame phase.
pub fn is_endgame(pos: &impl Position) -> bool {
    let num_officers = Square::ALL
        .iter()
        .filter(|&&sq| {
            matches!(
                pos.piece_at(sq),
                Some((_, Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen))
            )
        })
        .count();
    num_officers < ENDGAME_THRESHOLD
}

#[must_use]
/// Evaluate a position statically, from the perspective of `perspective`.
/// Positive values are good for `perspective`.
///
/// Squares are visited in a fixed order and all terms are integers, so the
/// result is exactly reproducible for a given position.
pub fn evaluate(pos: &impl Position, perspective: Color) -> Eval {
    let endgame = is_endgame(pos);

    let mut score = 0;
    for sq in Square::ALL {
        let Some((color, pt)) = pos.piece_at(sq) else {
            continue;
        };
        let material = match color {
            Color::White => piece_value(pt),
            Color::Black => -piece_value(pt),
        };
        score += material + pst::value(pt, color, sq, endgame);
    }

    if !endgame {
        score += match pos.player_to_move() {
            Color::White => TEMPO_BONUS,
            Color::Black => -TEMPO_BONUS,
        };
    }

    Eval::centipawns(f64::from(score)).in_perspective(perspective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skewer_base::Game;

    /// Evaluate a FEN from both perspectives and check that the results are
    /// mirror images, returning White's evaluation.
    fn symmetric_helper(fen: &str) -> Eval {
        let g = Game::from_fen(fen).unwrap();
        let white = evaluate(&g, Color::White);
        let black = evaluate(&g, Color::Black);
        assert_eq!(white, -black);
        white
    }

    #[test]
    /// Test that the start position is balanced, apart from the tempo bonus.
    fn start_position_balanced() {
        let ev = symmetric_helper(skewer_base::START_FEN);
        assert_eq!(ev, Eval::centipawns(f64::from(TEMPO_BONUS)));
    }

    #[test]
    /// Test that evaluations from the two perspectives always negate each
    /// other.
    fn perspective_symmetry() {
        for fen in [
            "r1bq1b1r/ppp2kpp/2n5/3np3/2B5/8/PPPP1PPP/RNBQK2R w KQ - 0 7",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 0 1",
        ] {
            symmetric_helper(fen);
        }
    }

    #[test]
    /// Test that an extra queen is worth about a queen.
    fn material_advantage() {
        let ev = symmetric_helper("3qk3/8/8/8/8/8/8/3QK2Q w - - 0 1");
        assert!(ev > Eval::centipawns(800.));
    }

    #[test]
    /// Test that a color-flipped position evaluates to the negation of the
    /// original, once the side to move is also flipped.
    fn color_flip() {
        let original = Game::from_fen("4k3/3p4/8/8/4N3/8/3P4/R3K3 w - - 0 1").unwrap();
        let flipped = Game::from_fen("r3k3/3p4/8/4n3/8/8/3P4/4K3 b - - 0 1").unwrap();
        assert_eq!(
            evaluate(&original, Color::White),
            evaluate(&flipped, Color::Black)
        );
    }

    #[test]
    /// Test the game phase detection.
    fn endgame_detection() {
        let start = Game::new();
        assert!(!is_endgame(&start));
        let rook_ending = Game::from_fen("4k3/pppr4/8/8/8/8/PPPR4/4K3 w - - 0 1").unwrap();
        assert!(is_endgame(&rook_ending));
    }

    #[test]
    /// Test that the endgame king table rewards centralization.
    fn endgame_king_centralization() {
        let central = Game::from_fen("8/8/8/3K4/8/8/8/k7 w - - 0 1").unwrap();
        let corner = Game::from_fen("8/8/8/8/8/8/8/K6k w - - 0 1").unwrap();
        assert!(evaluate(&central, Color::White) > evaluate(&corner, Color::White));
    }
}
