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

//! Negamax alpha-beta search with a quiescence extension.
//!
//! The search is fail-soft at full-depth nodes and fail-hard in quiescence.
//! Results of full-depth nodes are cached in the transposition table, which
//! also supplies the first move to try at each node. Cancellation is
//! cooperative: every node polls the search limit and unwinds with
//! `SearchError::Timeout` once time is up, taking back each move on the way
//! out so that the position is left exactly as it was given.

use skewer_base::{Color, Move};
use thiserror::Error;

use crate::{
    config::SearchConfig,
    evaluate::evaluate,
    limit::SearchLimit,
    pick::{KillerTable, MovePicker},
    transposition::{Bound, TTable},
    Eval, Position,
};

/// The deepest ply at which quiescence will search every evasion from
/// check. Past this ply, a quiescence node in check only searches captures,
/// so that perpetual checks cannot recurse forever.
pub const MAX_EVASION_PLY: u8 = 64;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
/// The types of errors which can occur during a search.
pub enum SearchError {
    /// This search failed due to timeout.
    #[error("search timed out")]
    Timeout,
}

/// The result of performing a search. The `Ok` version contains data on the
/// search, while the `Err` version contains a reason why the search failed.
pub type SearchResult = Result<SearchInfo, SearchError>;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Information about the result of a completed search.
pub struct SearchInfo {
    /// The best move found, read back from the transposition table. This is
    /// `Move::NULL` if the root entry was lost to a collision.
    pub best_move: Move,
    /// The evaluation of the root, from the perspective of the player to
    /// move.
    pub eval: Eval,
    /// The depth searched to.
    pub depth: u8,
    /// The number of nodes (both full-depth and quiescence) visited.
    pub nodes: u64,
    /// The number of transposition table hits.
    pub tt_hits: u64,
}

/// Search `pos` to a fixed depth.
///
/// `ttable` and `killers` carry information between searches, and are
/// updated by this one.
///
/// `limit` is polled at every node, and the search fails with
/// `SearchError::Timeout` once it is over. On failure, everything written to
/// the table so far is kept, but the position is restored.
pub fn search<P: Position>(
    pos: &mut P,
    depth: u8,
    ttable: &mut TTable,
    killers: &mut KillerTable,
    config: &SearchConfig,
    limit: SearchLimit,
) -> SearchResult {
    let root_key = pos.key();
    let player = pos.player_to_move();
    let mut searcher = Searcher::new(pos, ttable, killers, config, limit);

    let eval = searcher.negamax(depth, 0, Eval::MIN, Eval::MAX, player)?;
    let (nodes, tt_hits) = (searcher.nodes, searcher.tt_hits);

    let best_move = ttable
        .best_move(root_key)
        .filter(|m| pos.legal_moves(false).contains(m))
        .unwrap_or(Move::NULL);

    Ok(SearchInfo {
        best_move,
        eval,
        depth,
        nodes,
        tt_hits,
    })
}

/// The state of a single fixed-depth search.
pub struct Searcher<'a, P: Position> {
    /// The position being searched. Moves are made and taken back on it in
    /// stack order.
    pos: &'a mut P,
    /// The transposition table.
    ttable: &'a mut TTable,
    /// The killer moves, indexed by depth remaining.
    killers: &'a mut KillerTable,
    /// The configuration of this search.
    config: &'a SearchConfig,
    /// The limit which may cut this search short.
    limit: SearchLimit<'a>,
    /// The number of nodes visited.
    pub nodes: u64,
    /// The number of transposition table hits.
    pub tt_hits: u64,
}

impl<'a, P: Position> Searcher<'a, P> {
    /// Construct a new `Searcher` over a position.
    pub fn new(
        pos: &'a mut P,
        ttable: &'a mut TTable,
        killers: &'a mut KillerTable,
        config: &'a SearchConfig,
        limit: SearchLimit<'a>,
    ) -> Searcher<'a, P> {
        Searcher {
            pos,
            ttable,
            killers,
            config,
            limit,
            nodes: 0,
            tt_hits: 0,
        }
    }

    /// Evaluate the position with `depth_left` plies of full-width search
    /// remaining, followed by quiescence.
    ///
    /// `ply` is the distance from the root. The root never reports a draw by
    /// rule, since it must still choose a move.
    ///
    /// `color` is the player to move, and the result is from their
    /// perspective. Scores outside of `(alpha, beta)` are bounds.
    ///
    /// # Errors
    ///
    /// This function returns `SearchError::Timeout` if the search limit ran
    /// out. The position is restored before the error is returned.
    pub fn negamax(
        &mut self,
        depth_left: u8,
        ply: u8,
        mut alpha: Eval,
        mut beta: Eval,
        color: Color,
    ) -> Result<Eval, SearchError> {
        self.limit.check()?;
        self.nodes += 1;

        let moves = self.pos.legal_moves(false);
        if moves.is_empty() {
            return Ok(match self.pos.is_in_check() {
                true => Eval::mated(depth_left),
                false => Eval::DRAW,
            });
        }

        if ply > 0 && self.pos.is_draw() {
            return Ok(Eval::DRAW);
        }

        if depth_left == 0 {
            return self.quiesce(ply, alpha, beta, color);
        }

        let key = self.pos.key();
        let mut tt_move = None;
        if let Some(entry) = self.ttable.probe(key) {
            self.tt_hits += 1;
            if entry.best_move != Move::NULL {
                tt_move = Some(entry.best_move);
            }
            if entry.depth >= depth_left {
                match entry.bound {
                    Bound::Exact => return Ok(entry.score),
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                    Bound::Invalid => (),
                }
                if alpha >= beta {
                    return Ok(entry.score);
                }
            }
        }

        // the window that children are actually searched with
        let alpha_searched = alpha;
        let beta_searched = beta;

        let picker = MovePicker::new(
            &mut *self.pos,
            moves,
            tt_move,
            self.killers.get(depth_left),
            ply < self.config.check_ordering_plies,
        );

        let mut best_score = Eval::MIN;
        let mut best_move = Move::NULL;
        for m in picker {
            self.pos.make_move(m);
            let result = self.negamax(depth_left - 1, ply + 1, -beta, -alpha, !color);
            self.pos.undo_move(m);
            let score = -result?;

            if score > best_score {
                best_score = score;
                best_move = m;
            }
            alpha = alpha.max(best_score);
            if alpha >= beta {
                if !m.is_capture() {
                    self.killers.record(depth_left, m);
                }
                break;
            }
        }

        let bound = if best_score <= alpha_searched {
            Bound::Upper
        } else if best_score >= beta_searched {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.ttable.save(key, best_score, depth_left, best_move, bound);

        Ok(best_score)
    }

    /// Search only tactical moves (captures, or evasions when in check)
    /// until the position is quiet, then evaluate it.
    ///
    /// # Errors
    ///
    /// This function returns `SearchError::Timeout` if the search limit ran
    /// out. The position is restored before the error is returned.
    pub fn quiesce(
        &mut self,
        ply: u8,
        mut alpha: Eval,
        beta: Eval,
        color: Color,
    ) -> Result<Eval, SearchError> {
        self.limit.check()?;
        self.nodes += 1;

        let evading = self.pos.is_in_check() && ply < MAX_EVASION_PLY;
        let moves = self.pos.legal_moves(!evading);
        if evading && moves.is_empty() {
            return Ok(Eval::mated(0));
        }

        let stand_pat = evaluate(&*self.pos, color);
        alpha = alpha.max(stand_pat);
        if alpha >= beta {
            return Ok(beta);
        }

        let picker = MovePicker::new(&mut *self.pos, moves, None, [Move::NULL; 2], false);
        for m in picker {
            self.pos.make_move(m);
            let result = self.quiesce(ply.saturating_add(1), -beta, -alpha, !color);
            self.pos.undo_move(m);
            let score = -result?;

            alpha = alpha.max(score);
            if alpha >= beta {
                return Ok(beta);
            }
        }

        Ok(alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skewer_base::{movegen::find_move, Game};

    /// Search a position to a fixed depth with a fresh table and no time
    /// limit.
    fn search_helper(fen: &str, depth: u8) -> SearchInfo {
        let mut g = Game::from_fen(fen).unwrap();
        let config = SearchConfig::default();
        let mut ttable = TTable::with_capacity(16);
        let mut killers = KillerTable::new(config.max_depth);
        let info = search(
            &mut g,
            depth,
            &mut ttable,
            &mut killers,
            &config,
            SearchLimit::new(),
        )
        .unwrap();
        // the search leaves the game untouched
        assert_eq!(g, Game::from_fen(fen).unwrap());
        info
    }

    /// A full-width quiescence search with no pruning.
    fn reference_quiesce(g: &mut Game, ply: u8, color: Color) -> Eval {
        let evading = g.is_in_check() && ply < MAX_EVASION_PLY;
        let moves = g.legal_moves(!evading);
        if evading && moves.is_empty() {
            return Eval::mated(0);
        }
        let mut best = evaluate(&*g, color);
        for m in moves {
            g.make_move(m);
            best = best.max(-reference_quiesce(g, ply + 1, !color));
            g.undo_move(m);
        }
        best
    }

    /// A full-width negamax search with no pruning and no table.
    fn reference_negamax(g: &mut Game, depth_left: u8, ply: u8, color: Color) -> Eval {
        let moves = g.legal_moves(false);
        if moves.is_empty() {
            return match g.is_in_check() {
                true => Eval::mated(depth_left),
                false => Eval::DRAW,
            };
        }
        if ply > 0 && g.is_draw() {
            return Eval::DRAW;
        }
        if depth_left == 0 {
            return reference_quiesce(g, ply, color);
        }
        let mut best = Eval::MIN;
        for m in moves {
            g.make_move(m);
            best = best.max(-reference_negamax(g, depth_left - 1, ply + 1, !color));
            g.undo_move(m);
        }
        best
    }

    /// Check that the pruned search gets the same score as full-width
    /// search, and that its move is one of the moves achieving that score.
    fn reference_helper(fen: &str, depth: u8) {
        let info = search_helper(fen, depth);
        let mut g = Game::from_fen(fen).unwrap();
        let player = g.player_to_move();
        assert_eq!(info.eval, reference_negamax(&mut g, depth, 0, player));

        assert!(g.legal_moves(false).contains(&info.best_move));
        g.make_move(info.best_move);
        let move_score = -reference_negamax(&mut g, depth - 1, 1, !player);
        assert_eq!(move_score, info.eval);
    }

    #[test]
    /// Test that the pruned search agrees with full-width search from the
    /// start position. Deeper start searches leave full-width quiescence too
    /// many captures to get through.
    fn matches_reference_start() {
        for depth in 1..=2 {
            reference_helper(skewer_base::START_FEN, depth);
        }
    }

    #[test]
    /// Test that the pruned search agrees with full-width search in small
    /// endgames with captures available.
    fn matches_reference_tactical() {
        reference_helper("4k3/8/3p4/2p2r2/3P4/2N5/8/4K3 b - - 0 1", 3);
        reference_helper("8/5k2/8/3p4/8/2P5/4K3/3R4 w - - 0 1", 3);
    }

    #[test]
    /// Test that the pruned search agrees with full-width search in an
    /// endgame with a forced mate on the board.
    fn matches_reference_endgame() {
        for depth in 3..=4 {
            reference_helper("k7/8/2K5/8/8/8/8/7R w - - 0 1", depth);
        }
    }

    #[test]
    /// Test that a mate in one is found and scored by its depth.
    fn mate_in_1() {
        let fen = "3k4/R7/1R6/5K2/8/8/8/8 w - - 0 1";
        let g = Game::from_fen(fen).unwrap();
        let info = search_helper(fen, 2);
        assert_eq!(info.best_move, find_move(g.board(), "b6b8").unwrap());
        assert_eq!(info.eval, -Eval::mated(1));
        assert!(info.eval.is_mate());
    }

    #[test]
    /// Test that a faster mate scores higher than a slower one.
    fn faster_mate_scores_higher() {
        // mate in one: Rh8#
        let fast = search_helper("k7/8/1K6/8/8/8/8/7R w - - 0 1", 4);
        // mate in two: Kb6 Kb8 Rh8#
        let slow = search_helper("k7/8/2K5/8/8/8/8/7R w - - 0 1", 4);
        assert_eq!(fast.eval, -Eval::mated(3));
        assert_eq!(slow.eval, -Eval::mated(1));
        assert!(fast.eval > slow.eval);
    }

    #[test]
    /// Test that the side being mated sees a mated score.
    fn being_mated() {
        let fen = "k7/8/1K6/8/8/8/8/7R b - - 0 1";
        let g = Game::from_fen(fen).unwrap();
        let info = search_helper(fen, 3);
        assert_eq!(info.best_move, find_move(g.board(), "a8b8").unwrap());
        assert_eq!(info.eval, Eval::mated(1));
    }

    #[test]
    /// Test that the side to move prefers being mated later: a root which is
    /// already checkmated scores below one which is mated in two plies.
    fn mated_sooner_scores_lower() {
        let mated_now = search_helper(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            3,
        );
        let mated_later = search_helper("k7/8/1K6/8/8/8/8/7R b - - 0 1", 3);
        assert_eq!(mated_now.eval, Eval::mated(3));
        assert_eq!(mated_now.best_move, Move::NULL);
        assert_eq!(mated_later.eval, Eval::mated(1));
        assert!(mated_now.eval < mated_later.eval);
    }

    #[test]
    /// Test that an exact table entry for the root, searched at least as
    /// deep as requested, is returned without expanding any children.
    fn exact_entry_short_circuits() {
        let mut g = Game::new();
        let config = SearchConfig::default();
        let mut ttable = TTable::with_capacity(16);
        let mut killers = KillerTable::new(config.max_depth);
        let e4 = find_move(g.board(), "e2e4").unwrap();
        ttable.save(g.key(), Eval::centipawns(37.), 5, e4, Bound::Exact);

        let info = search(
            &mut g,
            3,
            &mut ttable,
            &mut killers,
            &config,
            SearchLimit::new(),
        )
        .unwrap();
        assert_eq!(info.eval, Eval::centipawns(37.));
        assert_eq!(info.best_move, e4);
        assert_eq!(info.nodes, 1);
        assert_eq!(info.tt_hits, 1);
    }

    #[test]
    /// Test that an exact entry from a shallower search is only used for
    /// ordering, and the score is searched again.
    fn shallow_entry_is_searched() {
        let fresh = search_helper(skewer_base::START_FEN, 3);

        let mut g = Game::new();
        let config = SearchConfig::default();
        let mut ttable = TTable::with_capacity(16);
        let mut killers = KillerTable::new(config.max_depth);
        let e4 = find_move(g.board(), "e2e4").unwrap();
        ttable.save(g.key(), Eval::centipawns(37.), 2, e4, Bound::Exact);

        let info = search(
            &mut g,
            3,
            &mut ttable,
            &mut killers,
            &config,
            SearchLimit::new(),
        )
        .unwrap();
        assert!(info.nodes > 1);
        assert_eq!(info.eval, fresh.eval);
    }

    #[test]
    /// Test that stored bounds which close the search window cut the node
    /// off with the stored score.
    fn bound_cutoffs() {
        let mut g = Game::new();
        let key = g.key();
        let config = SearchConfig::default();
        let mut ttable = TTable::with_capacity(16);
        let mut killers = KillerTable::new(config.max_depth);
        let alpha = Eval::centipawns(-100.);
        let beta = Eval::centipawns(100.);

        // a lower bound at or above beta fails high
        ttable.save(key, Eval::centipawns(500.), 4, Move::NULL, Bound::Lower);
        let mut searcher = Searcher::new(
            &mut g,
            &mut ttable,
            &mut killers,
            &config,
            SearchLimit::new(),
        );
        let eval = searcher.negamax(3, 0, alpha, beta, Color::White).unwrap();
        assert_eq!(eval, Eval::centipawns(500.));
        assert_eq!(searcher.nodes, 1);

        // an upper bound at or below alpha fails low
        ttable.save(key, Eval::centipawns(-500.), 4, Move::NULL, Bound::Upper);
        let mut searcher = Searcher::new(
            &mut g,
            &mut ttable,
            &mut killers,
            &config,
            SearchLimit::new(),
        );
        let eval = searcher.negamax(3, 0, alpha, beta, Color::White).unwrap();
        assert_eq!(eval, Eval::centipawns(-500.));
        assert_eq!(searcher.nodes, 1);

        // the game was never touched
        assert_eq!(g, Game::new());
    }

    #[test]
    /// Test that a stalemated root scores as a draw.
    fn stalemate_root() {
        let mut g = Game::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1").unwrap();
        let config = SearchConfig::default();
        let mut ttable = TTable::with_capacity(8);
        let mut killers = KillerTable::new(config.max_depth);
        let mut searcher = Searcher::new(
            &mut g,
            &mut ttable,
            &mut killers,
            &config,
            SearchLimit::new(),
        );
        let eval = searcher
            .negamax(3, 0, Eval::MIN, Eval::MAX, Color::Black)
            .unwrap();
        assert_eq!(eval, Eval::DRAW);
    }

    #[test]
    /// Test that the search wins a hanging queen.
    fn takes_free_queen() {
        let fen = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1";
        let g = Game::from_fen(fen).unwrap();
        let info = search_helper(fen, 2);
        assert_eq!(info.best_move, find_move(g.board(), "e4d5").unwrap());
        assert!(info.eval > Eval::centipawns(50.));
    }
}
