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

//! Zobrist hashing for positions.
//!
//! Every feature of a position which matters for search (piece placement,
//! side to move, castling rights, and the en passant file) is assigned a
//! random 64-bit key, and a position's hash is the XOR of the keys of its
//! features. This lets a `Board` update its hash incrementally as moves are
//! made.

use super::{CastleRights, Color, Piece, Square};

use once_cell::sync::Lazy;

/// The seed for the key generator. Fixing it makes hashes reproducible
/// between runs.
const ZOBRIST_SEED: u64 = 0x5EED_C0DE_F1DD_1E55;

/// The full set of Zobrist keys.
struct ZobristKeys {
    /// Keys for each piece of each color on each square.
    squares: [[[u64; 64]; Piece::NUM_TYPES]; 2],
    /// Keys for each combination of castling rights.
    castle: [u64; 16],
    /// Keys for the file of the en passant square.
    en_passant: [u64; 8],
    /// Key which is present when Black is to move.
    black_to_move: u64,
}

static KEYS: Lazy<ZobristKeys> = Lazy::new(|| {
    let rng = fastrand::Rng::with_seed(ZOBRIST_SEED);
    let mut keys = ZobristKeys {
        squares: [[[0; 64]; Piece::NUM_TYPES]; 2],
        castle: [0; 16],
        en_passant: [0; 8],
        black_to_move: rng.u64(..),
    };
    for color_keys in &mut keys.squares {
        for piece_keys in color_keys.iter_mut() {
            for key in piece_keys.iter_mut() {
                *key = rng.u64(..);
            }
        }
    }
    for key in &mut keys.castle {
        *key = rng.u64(..);
    }
    for key in &mut keys.en_passant {
        *key = rng.u64(..);
    }
    keys
});

#[inline(always)]
/// Get the key for a piece of the given color standing on `sq`.
pub fn square_key(sq: Square, pt: Piece, color: Color) -> u64 {
    KEYS.squares[color.index()][pt.index()][sq.index()]
}

#[inline(always)]
/// Get the key for a set of castling rights.
pub fn castle_key(rights: CastleRights) -> u64 {
    KEYS.castle[(rights.0 & 15) as usize]
}

#[inline(always)]
/// Get the key for an en passant square. There is no key when no en passant
/// capture is available.
pub fn ep_key(ep_square: Option<Square>) -> u64 {
    match ep_square {
        Some(sq) => KEYS.en_passant[sq.file() as usize],
        None => 0,
    }
}

#[inline(always)]
/// Get the key for the player to move.
pub fn player_key(player: Color) -> u64 {
    match player {
        Color::White => 0,
        Color::Black => KEYS.black_to_move,
    }
}
