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

//! Generation and verification of legal moves in a position.
//!
//! Moves are first generated pseudo-legally by walking the mailbox, then
//! filtered by playing each one on a copy of the board and checking whether
//! the mover's king is left in check.

use super::{Board, Color, Direction, Move, Piece, Square};

/// The types of move generation. These are used in const generics, as enums are
/// not supported in const generics.
pub type GenMode = u8;

/// The mode identifier for `get_moves()` to generate all legal moves.
pub const ALL: GenMode = 0;
/// The mode identifier for `get_moves()` to generate captures only (including
/// en passant and capturing promotions).
pub const CAPTURES: GenMode = 1;

#[must_use]
/// Get all the legal moves on a board of the given mode, in a fixed
/// generation order (by from-square, then by direction).
pub fn get_moves<const M: GenMode>(b: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(match M {
        ALL => 48,
        _ => 8,
    });
    pseudo_legal_moves::<M>(b, &mut moves);
    moves.retain(|&m| leaves_king_safe(b, m));
    moves
}

#[must_use]
/// Determine whether the player to move has any legal moves at all. Stops at
/// the first legal move found.
pub fn has_moves(b: &Board) -> bool {
    let mut moves = Vec::with_capacity(48);
    pseudo_legal_moves::<ALL>(b, &mut moves);
    moves.into_iter().any(|m| leaves_king_safe(b, m))
}

#[must_use]
/// Determine whether any given move is legal, given a position in which it
/// could be played. The move must carry the correct mover, capture, and flag
/// information to be considered legal.
pub fn is_legal(m: Move, b: &Board) -> bool {
    get_moves::<ALL>(b).contains(&m)
}

#[must_use]
/// Find the legal move on `b` whose UCI form is `uci`, if there is one.
pub fn find_move(b: &Board, uci: &str) -> Option<Move> {
    get_moves::<ALL>(b).into_iter().find(|m| m.to_uci() == uci)
}

#[must_use]
/// Determine whether a square is attacked by the pieces of a given color.
pub fn is_square_attacked_by(board: &Board, sq: Square, color: Color) -> bool {
    let holds = |target: Option<Square>, pieces: &[Piece]| match target.and_then(|t| board.piece_at(t)) {
        Some((c, pt)) => c == color && pieces.contains(&pt),
        None => false,
    };

    // pawns attack diagonally forward, so look one rank backward from `sq`
    let back = -color.pawn_step();
    if holds(sq.offset(Direction::new(back, -1)), &[Piece::Pawn])
        || holds(sq.offset(Direction::new(back, 1)), &[Piece::Pawn])
    {
        return true;
    }

    if Direction::KNIGHT_STEPS
        .iter()
        .any(|&d| holds(sq.offset(d), &[Piece::Knight]))
    {
        return true;
    }

    if Direction::KING_STEPS
        .iter()
        .any(|&d| holds(sq.offset(d), &[Piece::King]))
    {
        return true;
    }

    let rook_like = [Piece::Rook, Piece::Queen];
    let bishop_like = [Piece::Bishop, Piece::Queen];
    Direction::ROOK_DIRECTIONS
        .iter()
        .any(|&d| holds(first_occupied(board, sq, d), &rook_like))
        || Direction::BISHOP_DIRECTIONS
            .iter()
            .any(|&d| holds(first_occupied(board, sq, d), &bishop_like))
}

/// Walk from `sq` in `dir` and get the first occupied square, if any.
fn first_occupied(board: &Board, sq: Square, dir: Direction) -> Option<Square> {
    let mut cur = sq;
    while let Some(next) = cur.offset(dir) {
        if board.piece_at(next).is_some() {
            return Some(next);
        }
        cur = next;
    }
    None
}

/// Determine whether playing `m` on `b` leaves the mover's own king safe.
fn leaves_king_safe(b: &Board, m: Move) -> bool {
    let player = b.player_to_move;
    let mut after = *b;
    after.make_move(m);
    !is_square_attacked_by(&after, after.king_square(player), !player)
}

/// Generate the pseudo-legal moves of the player to move. These may leave the
/// king in check.
fn pseudo_legal_moves<const M: GenMode>(b: &Board, moves: &mut Vec<Move>) {
    let player = b.player_to_move;
    for sq in Square::ALL {
        let pt = match b.piece_at(sq) {
            Some((color, pt)) if color == player => pt,
            _ => continue,
        };
        match pt {
            Piece::Pawn => pawn_assistant::<M>(b, sq, moves),
            Piece::Knight => step_assistant::<M>(b, sq, pt, &Direction::KNIGHT_STEPS, moves),
            Piece::Bishop => slide_assistant::<M>(b, sq, pt, &Direction::BISHOP_DIRECTIONS, moves),
            Piece::Rook => slide_assistant::<M>(b, sq, pt, &Direction::ROOK_DIRECTIONS, moves),
            Piece::Queen => {
                slide_assistant::<M>(b, sq, pt, &Direction::ROOK_DIRECTIONS, moves);
                slide_assistant::<M>(b, sq, pt, &Direction::BISHOP_DIRECTIONS, moves);
            }
            Piece::King => {
                step_assistant::<M>(b, sq, pt, &Direction::KING_STEPS, moves);
                if M == ALL {
                    castles(b, moves);
                }
            }
        }
    }
}

/// Generate the moves of a piece which moves by single steps (a knight or
/// king).
fn step_assistant<const M: GenMode>(
    b: &Board,
    from: Square,
    pt: Piece,
    steps: &[Direction],
    moves: &mut Vec<Move>,
) {
    for &dir in steps {
        let Some(to) = from.offset(dir) else {
            continue;
        };
        match b.piece_at(to) {
            None => {
                if M == ALL {
                    moves.push(Move::normal(from, to, pt, None));
                }
            }
            Some((color, victim)) => {
                if color != b.player_to_move {
                    moves.push(Move::normal(from, to, pt, Some(victim)));
                }
            }
        }
    }
}

/// Generate the moves of a sliding piece along the given rays.
fn slide_assistant<const M: GenMode>(
    b: &Board,
    from: Square,
    pt: Piece,
    dirs: &[Direction],
    moves: &mut Vec<Move>,
) {
    for &dir in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dir) {
            match b.piece_at(to) {
                None => {
                    if M == ALL {
                        moves.push(Move::normal(from, to, pt, None));
                    }
                }
                Some((color, victim)) => {
                    if color != b.player_to_move {
                        moves.push(Move::normal(from, to, pt, Some(victim)));
                    }
                    break;
                }
            }
            cur = to;
        }
    }
}

/// Generate the moves of a pawn: pushes, double pushes, captures, en passant,
/// and promotions.
fn pawn_assistant<const M: GenMode>(b: &Board, from: Square, moves: &mut Vec<Move>) {
    let player = b.player_to_move;
    let forward = Direction::new(player.pawn_step(), 0);

    if M == ALL {
        if let Some(one) = from.offset(forward) {
            if b.piece_at(one).is_none() {
                push_pawn_move(player, from, one, None, moves);
                if from.rank() == player.pawn_start_rank() {
                    if let Some(two) = one.offset(forward) {
                        if b.piece_at(two).is_none() {
                            moves.push(Move::normal(from, two, Piece::Pawn, None));
                        }
                    }
                }
            }
        }
    }

    for file_step in [-1, 1] {
        let Some(to) = from.offset(Direction::new(player.pawn_step(), file_step)) else {
            continue;
        };
        match b.piece_at(to) {
            Some((color, victim)) if color != player => {
                push_pawn_move(player, from, to, Some(victim), moves);
            }
            None if b.en_passant_square == Some(to) => moves.push(Move::en_passant(from, to)),
            _ => (),
        }
    }
}

/// Add a pawn move to `moves`, expanding it into all four promotions if it
/// lands on the last rank.
fn push_pawn_move(
    player: Color,
    from: Square,
    to: Square,
    capturee: Option<Piece>,
    moves: &mut Vec<Move>,
) {
    if to.rank() == player.pawn_promote_rank() {
        for pt in Piece::PROMOTE_TYPES {
            moves.push(Move::promoting(from, to, capturee, pt));
        }
    } else {
        moves.push(Move::normal(from, to, Piece::Pawn, capturee));
    }
}

/// Generate the castling moves of the player to move. The king may not castle
/// out of, through, or into check.
fn castles(b: &Board, moves: &mut Vec<Move>) {
    let player = b.player_to_move;
    let rank = player.back_rank();
    let king_sq = Square::new(rank, 4);
    if b.king_square(player) != king_sq || b.is_king_checked() {
        return;
    }

    let rook_home = |file: u8| b.piece_at(Square::new(rank, file)) == Some((player, Piece::Rook));
    let clear = |files: &[u8]| {
        files
            .iter()
            .all(|&file| b.piece_at(Square::new(rank, file)).is_none())
    };
    let safe = |files: &[u8]| {
        files
            .iter()
            .all(|&file| !is_square_attacked_by(b, Square::new(rank, file), !player))
    };

    if b.castle_rights.is_kingside_castle_legal(player)
        && rook_home(7)
        && clear(&[5, 6])
        && safe(&[5, 6])
    {
        moves.push(Move::castling(king_sq, Square::new(rank, 6)));
    }
    if b.castle_rights.is_queenside_castle_legal(player)
        && rook_home(0)
        && clear(&[1, 2, 3])
        && safe(&[2, 3])
    {
        moves.push(Move::castling(king_sq, Square::new(rank, 2)));
    }
}
