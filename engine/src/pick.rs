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

//! Move ordering.
//!
//! Alpha-beta search prunes the most when the best move is searched first.
//! Each candidate move is given a priority, and moves are handed out lazily
//! in order of decreasing priority, so that work spent sorting is saved when
//! an early move causes a cutoff.
//!
//! From highest to lowest, the priorities are:
//!
//! 1. The best move stored in the transposition table.
//! 2. Moves which give check (only near the root, since detecting a check
//!    requires making the move).
//! 3. Captures, by most-valuable-victim, least-valuable-attacker.
//! 4. The two killer moves for this depth.
//! 5. Promotions, by the value of the promoted piece.
//! 6. Everything else, in generation order.

use std::mem::swap;

use skewer_base::{Move, Piece};

use crate::{evaluate::piece_value, Position};

/// The priority of the transposition table move.
const TT_MOVE_PRIORITY: i32 = 1_000_000;

/// The priority of a checking move.
const CHECK_PRIORITY: i32 = 100_000;

/// The base priority of a capture, before MVV-LVA adjustment.
const CAPTURE_PRIORITY: i32 = 10_000;

/// The priority of the most recent killer move.
const FIRST_KILLER_PRIORITY: i32 = 5_001;

/// The priority of the older killer move.
const SECOND_KILLER_PRIORITY: i32 = 5_000;

/// The base priority of a promotion, before adding the promoted piece's
/// value.
const PROMOTION_PRIORITY: i32 = 1_000;

#[derive(Clone, Debug, PartialEq, Eq)]
/// The killer moves of a search: for each depth, the two most recent quiet
/// moves which caused a beta cutoff at that depth.
pub struct KillerTable {
    /// The killers at each depth. Slot 0 is the newer killer. Empty slots
    /// hold `Move::NULL`.
    slots: Vec<[Move; 2]>,
}

impl KillerTable {
    #[must_use]
    /// Create an empty killer table which tracks depths `0..=max_depth`.
    pub fn new(max_depth: u8) -> KillerTable {
        KillerTable {
            slots: vec![[Move::NULL; 2]; usize::from(max_depth) + 1],
        }
    }

    #[inline(always)]
    #[must_use]
    /// Get the killers at a depth. Depths past the end of the table have no
    /// killers.
    pub fn get(&self, depth: u8) -> [Move; 2] {
        self.slots
            .get(usize::from(depth))
            .copied()
            .unwrap_or([Move::NULL; 2])
    }

    /// Record a move which caused a cutoff at `depth`, pushing the previous
    /// newest killer into the second slot.
    pub fn record(&mut self, depth: u8, m: Move) {
        if let Some(slot) = self.slots.get_mut(usize::from(depth)) {
            if slot[0] != m {
                slot[1] = slot[0];
                slot[0] = m;
            }
        }
    }

    /// Forget every killer move.
    pub fn clear(&mut self) {
        self.slots.fill([Move::NULL; 2]);
    }
}

#[inline(always)]
/// Get the rank of a piece for MVV-LVA, from 1 (pawn) to 6 (king).
fn mvv_lva_rank(pt: Piece) -> i32 {
    pt.index() as i32 + 1
}

/// Compute the ordering priority of a move.
///
/// `pos` is only modified temporarily, when `check_ordering` is set and the
/// move must be made to see whether it gives check.
pub fn priority(
    pos: &mut impl Position,
    m: Move,
    tt_move: Option<Move>,
    killers: [Move; 2],
    check_ordering: bool,
) -> i32 {
    if tt_move == Some(m) {
        return TT_MOVE_PRIORITY;
    }

    if check_ordering {
        pos.make_move(m);
        let gives_check = pos.is_in_check();
        pos.undo_move(m);
        if gives_check {
            return CHECK_PRIORITY;
        }
    }

    if let Some(victim) = m.capturee() {
        return CAPTURE_PRIORITY + 10 * mvv_lva_rank(victim) - mvv_lva_rank(m.mover());
    }

    if m == killers[0] {
        return FIRST_KILLER_PRIORITY;
    }
    if m == killers[1] {
        return SECOND_KILLER_PRIORITY;
    }

    if let Some(pt) = m.promote_type() {
        return PROMOTION_PRIORITY + piece_value(pt);
    }

    0
}

#[derive(Clone, Debug)]
/// A lazy sorter of moves. The picker yields every move it was given
/// exactly once, in order of decreasing priority.
pub struct MovePicker {
    /// The moves and their priorities. Entries before `index` have already
    /// been yielded.
    buffer: Vec<(Move, i32)>,
    /// The index of the next move to give.
    index: usize,
}

impl MovePicker {
    /// Construct a `MovePicker` over a set of legal moves in `pos`.
    pub fn new(
        pos: &mut impl Position,
        moves: Vec<Move>,
        tt_move: Option<Move>,
        killers: [Move; 2],
        check_ordering: bool,
    ) -> MovePicker {
        let buffer = moves
            .into_iter()
            .map(|m| (m, priority(pos, m, tt_move, killers, check_ordering)))
            .collect();
        MovePicker { buffer, index: 0 }
    }
}

/// Search through `moves` until we find the best move, sorting as we go. After
/// this function terminates, `moves[idx]` will contain the best-rated move of
/// the input moves from idx to the end. Requires that 0 <= `idx` <
/// `moves.len()`.
fn select_best(moves: &mut [(Move, i32)], idx: usize) -> (Move, i32) {
    let mut best_entry = moves[idx];
    for entry in moves.iter_mut().skip(idx + 1) {
        // selection sort is slower if we need to see every move,
        // but often we don't due to beta cutoff
        if entry.1 > best_entry.1 {
            swap(entry, &mut best_entry);
        }
    }
    moves[idx] = best_entry;

    best_entry
}

impl Iterator for MovePicker {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if self.index >= self.buffer.len() {
            return None;
        }
        let (m, _) = select_best(&mut self.buffer, self.index);
        self.index += 1;
        Some(m)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.buffer.len() - self.index;
        (n, Some(n))
    }
}

#[must_use]
/// Order a set of moves, highest priority first.
pub fn order_moves(
    pos: &mut impl Position,
    moves: Vec<Move>,
    tt_move: Option<Move>,
    killers: [Move; 2],
    check_ordering: bool,
) -> Vec<Move> {
    MovePicker::new(pos, moves, tt_move, killers, check_ordering).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skewer_base::{Game, Square};

    /// Find the legal move with the given UCI string in a game.
    fn uci(g: &Game, s: &str) -> Move {
        skewer_base::movegen::find_move(g.board(), s).unwrap()
    }

    #[test]
    /// Test that the picker yields every move exactly once.
    fn picker_is_permutation() {
        let mut g = Game::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
        let moves = g.legal_moves(false);
        let mut ordered = order_moves(&mut g, moves.clone(), None, [Move::NULL; 2], true);
        assert_eq!(ordered.len(), moves.len());
        ordered.sort_by_key(|m| m.value());
        let mut sorted = moves;
        sorted.sort_by_key(|m| m.value());
        assert_eq!(ordered, sorted);
    }

    #[test]
    /// Test that the transposition move comes first, even ahead of captures.
    fn tt_move_first() {
        let mut g = Game::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2")
            .unwrap();
        let tt_move = uci(&g, "a2a3");
        let moves = g.legal_moves(false);
        let ordered = order_moves(&mut g, moves, Some(tt_move), [Move::NULL; 2], false);
        assert_eq!(ordered[0], tt_move);
        // then the only capture
        assert_eq!(ordered[1], uci(&g, "e4d5"));
    }

    #[test]
    /// Test that a pawn taking a queen is searched before a queen taking a
    /// pawn.
    fn mvv_lva() {
        let mut g = Game::from_fen("4k3/8/8/3q4/4P3/8/8/3QK3 w - - 0 1").unwrap();
        let pawn_takes_queen = uci(&g, "e4d5");
        let queen_takes_queen = uci(&g, "d1d5");
        let quiet = uci(&g, "e1e2");
        let p = |g: &mut Game, m| priority(g, m, None, [Move::NULL; 2], false);
        assert!(p(&mut g, pawn_takes_queen) > p(&mut g, queen_takes_queen));
        assert!(p(&mut g, queen_takes_queen) > p(&mut g, quiet));
    }

    #[test]
    /// Test the placement of killers relative to captures, promotions, and
    /// quiet moves.
    fn killers_between_captures_and_promotions() {
        let mut g = Game::from_fen("1n2k3/P7/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let capture_promote = uci(&g, "a7b8q");
        let promote = uci(&g, "a7a8q");
        let underpromote = uci(&g, "a7a8n");
        let killer = uci(&g, "h1h5");
        let quiet = uci(&g, "h1h4");
        let killers = [killer, Move::NULL];
        let p = |g: &mut Game, m| priority(g, m, None, killers, false);
        assert!(p(&mut g, capture_promote) > p(&mut g, killer));
        assert!(p(&mut g, killer) > p(&mut g, promote));
        assert!(p(&mut g, promote) > p(&mut g, underpromote));
        assert!(p(&mut g, underpromote) > p(&mut g, quiet));
    }

    #[test]
    /// Test that checking moves are ordered first only when check ordering
    /// is on.
    fn check_ordering() {
        let fen = "4k3/8/8/8/8/8/3n4/R3K3 w - - 0 1";
        let mut g = Game::from_fen(fen).unwrap();
        let check = uci(&g, "a1a8");
        let capture = uci(&g, "e1d2");
        assert!(capture.is_capture());
        let with = |g: &mut Game, m| priority(g, m, None, [Move::NULL; 2], true);
        let without = |g: &mut Game, m| priority(g, m, None, [Move::NULL; 2], false);
        assert_eq!(with(&mut g, check), CHECK_PRIORITY);
        assert_eq!(without(&mut g, check), 0);
        // making and undoing the move leaves the game as it was
        assert_eq!(g.board(), Game::from_fen(fen).unwrap().board());
        assert!(with(&mut g, check) > with(&mut g, capture));
    }

    #[test]
    /// Test that killers shift down when a new one is recorded, and that
    /// recording the same killer twice does not evict the older one.
    fn killer_shifting() {
        let a = Move::normal(Square::G1, Square::F3, Piece::Knight, None);
        let b = Move::normal(Square::B1, Square::C3, Piece::Knight, None);
        let mut killers = KillerTable::new(4);
        killers.record(2, a);
        assert_eq!(killers.get(2), [a, Move::NULL]);
        killers.record(2, b);
        assert_eq!(killers.get(2), [b, a]);
        killers.record(2, b);
        assert_eq!(killers.get(2), [b, a]);
        // other depths are unaffected
        assert_eq!(killers.get(1), [Move::NULL; 2]);
        // out of range depths are ignored
        killers.record(200, a);
        assert_eq!(killers.get(200), [Move::NULL; 2]);
        killers.clear();
        assert_eq!(killers.get(2), [Move::NULL; 2]);
    }
}
