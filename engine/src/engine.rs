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

//! The iterative deepening controller.
//!
//! An `Engine` owns everything that persists between searches: its
//! configuration, the transposition table, and the killer moves. Given a
//! position and a clock, it searches to successively greater depths until
//! half of its time budget is spent, and answers with the best move of the
//! deepest search that finished.

use log::{debug, info};
use skewer_base::Move;
use thiserror::Error;

use crate::{
    config::SearchConfig,
    limit::SearchLimit,
    pick::KillerTable,
    search::{search, SearchError, SearchResult},
    time::{get_search_time, Clock},
    transposition::TTable,
    Position,
};

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
/// The ways in which choosing a move can fail.
pub enum EngineError {
    /// The position has no legal moves, so there is nothing to choose.
    #[error("no legal moves in position")]
    NoLegalMoves,
}

#[derive(Clone, Debug)]
/// A chess engine which chooses moves under time control.
pub struct Engine {
    /// The configuration of the search, controlling the search parameters.
    config: SearchConfig,
    /// The transposition table, kept between searches.
    ttable: TTable,
    /// The killer moves, indexed by depth remaining.
    killers: KillerTable,
}

impl Engine {
    #[must_use]
    /// Construct a new engine with an empty transposition table.
    pub fn new(config: SearchConfig) -> Engine {
        Engine {
            ttable: TTable::with_capacity(config.tt_capacity_log2),
            killers: KillerTable::new(config.max_depth),
            config,
        }
    }

    #[must_use]
    /// Get the configuration of this engine.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[must_use]
    /// Get the transposition table of this engine.
    pub fn ttable(&self) -> &TTable {
        &self.ttable
    }

    /// Forget everything learned from previous searches.
    pub fn clear(&mut self) {
        self.ttable.clear();
        self.killers.clear();
    }

    /// Choose a move to play in `pos`, spending time according to `clock`.
    ///
    /// The position is searched with iterative deepening until half of the
    /// time budget is used, or the maximum depth is reached. If a search
    /// times out partway through, its results are discarded and the move
    /// from the last completed depth is used. If no depth completes, the
    /// first legal move is played.
    ///
    /// `pos` is returned to its original state once this function is done.
    ///
    /// # Errors
    ///
    /// This function returns `EngineError::NoLegalMoves` if `pos` has no
    /// legal moves.
    pub fn choose_move(
        &mut self,
        pos: &mut impl Position,
        clock: &dyn Clock,
    ) -> Result<Move, EngineError> {
        let moves = pos.legal_moves(false);
        let mut best_move = *moves.first().ok_or(EngineError::NoLegalMoves)?;
        if moves.len() == 1 {
            info!("playing {best_move} (only move)");
            return Ok(best_move);
        }

        let budget = get_search_time(clock.remaining_ms(), clock.increment_ms(), &self.config);
        let limit = SearchLimit::timed(clock, budget);

        let mut depth = 1;
        while limit.elapsed_ms() < budget / 2 && depth <= self.config.max_depth {
            match self.search_limited(pos, depth, limit) {
                Ok(search_info) => {
                    if search_info.best_move != Move::NULL {
                        best_move = search_info.best_move;
                    }
                    debug!(
                        "depth {depth}: {best_move} [{}] nodes {} hashfull {}",
                        search_info.eval,
                        search_info.nodes,
                        self.ttable.fill_rate_permill(),
                    );
                }
                Err(SearchError::Timeout) => {
                    debug!("depth {depth} timed out after {}ms", limit.elapsed_ms());
                    break;
                }
            }
            depth += 1;
        }

        info!(
            "playing {best_move} after {}ms of {budget}ms",
            limit.elapsed_ms()
        );
        Ok(best_move)
    }

    /// Search `pos` to a fixed depth with no time limit.
    ///
    /// # Errors
    ///
    /// This function never times out, but keeps the `Result` of a limited
    /// search for uniformity.
    pub fn search_to_depth(&mut self, pos: &mut impl Position, depth: u8) -> SearchResult {
        self.search_limited(pos, depth, SearchLimit::new())
    }

    /// Search `pos` to a fixed depth under a limit.
    fn search_limited(
        &mut self,
        pos: &mut impl Position,
        depth: u8,
        limit: SearchLimit,
    ) -> SearchResult {
        search(
            pos,
            depth,
            &mut self.ttable,
            &mut self.killers,
            &self.config,
            limit,
        )
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Timer;
    use skewer_base::{movegen::find_move, Game};

    /// Build an engine with a small table, for speed of allocation.
    fn small_engine() -> Engine {
        Engine::new(SearchConfig {
            tt_capacity_log2: 16,
            ..SearchConfig::default()
        })
    }

    #[test]
    /// Test that a depth 1 search from the start position gives a legal move
    /// and a roughly even score.
    fn start_depth_1() {
        let mut g = Game::new();
        let mut engine = small_engine();
        let info = engine.search_to_depth(&mut g, 1).unwrap();
        assert!(g.legal_moves(false).contains(&info.best_move));
        assert!(info.eval.centipawn_val().abs() < 100.);
        assert_eq!(info.depth, 1);
        assert!(info.nodes > 20);
    }

    #[test]
    /// Test that the engine plays mate in one when given time to think.
    fn plays_mate_in_1() {
        let mut g = Game::from_fen("3k4/R7/1R6/5K2/8/8/8/8 w - - 0 1").unwrap();
        let mut engine = small_engine();
        let m = engine.choose_move(&mut g, &Timer::new(10_000, 0)).unwrap();
        assert_eq!(m, find_move(g.board(), "b6b8").unwrap());
    }

    #[test]
    /// Test that a position with exactly one legal move is answered without
    /// searching.
    fn only_move() {
        let mut g = Game::from_fen("2k5/4R3/8/5K2/3R4/8/8/8 b - - 2 2").unwrap();
        assert_eq!(g.legal_moves(false).len(), 1);
        let mut engine = small_engine();
        let m = engine.choose_move(&mut g, &Timer::new(10_000, 0)).unwrap();
        assert_eq!(m, find_move(g.board(), "c8b8").unwrap());
        assert_eq!(engine.ttable().fill_rate_permill(), 0);
    }

    #[test]
    /// Test that a position with no legal moves is an error rather than a
    /// panic.
    fn no_legal_moves() {
        // fool's mate
        let mut g =
            Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let mut engine = small_engine();
        assert_eq!(
            engine.choose_move(&mut g, &Timer::new(10_000, 0)),
            Err(EngineError::NoLegalMoves)
        );
    }

    #[test]
    /// Test that with no time at all, the engine still gives a legal move.
    fn zero_budget() {
        let mut g = Game::new();
        let mut engine = small_engine();
        let m = engine.choose_move(&mut g, &Timer::new(0, 0)).unwrap();
        assert!(g.legal_moves(false).contains(&m));
        assert_eq!(g, Game::new());
    }

    #[test]
    /// Test that the engine stops thinking close to its time budget, and
    /// leaves the position as it found it.
    fn respects_budget() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let mut g = Game::from_fen(fen).unwrap();
        let mut engine = small_engine();
        // 2000 / 40 = 50ms budget
        let timer = Timer::new(2_000, 0);
        let m = engine.choose_move(&mut g, &timer).unwrap();
        assert!(timer.elapsed_ms() < 50 + 250);
        assert!(g.legal_moves(false).contains(&m));
        assert_eq!(g, Game::from_fen(fen).unwrap());
    }

    #[test]
    /// Test that repeating a search after clearing the engine gives the same
    /// move and score.
    fn deterministic_after_clear() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut g = Game::from_fen(fen).unwrap();
        let mut engine = small_engine();
        let first = engine.search_to_depth(&mut g, 3).unwrap();
        engine.clear();
        let second = engine.search_to_depth(&mut g, 3).unwrap();
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.eval, second.eval);
        assert_eq!(first.nodes, second.nodes);
    }

    #[test]
    /// Test that searching positions from random games always gives a legal
    /// move and restores the game.
    fn random_playouts() {
        let mut rng = fastrand::Rng::with_seed(12345);
        let mut engine = small_engine();
        for _ in 0..5 {
            let mut g = Game::new();
            for _ in 0..30 {
                let moves = g.legal_moves(false);
                if moves.is_empty() || g.is_draw() {
                    break;
                }
                let before = g.clone();
                let info = engine.search_to_depth(&mut g, 2).unwrap();
                assert!(moves.contains(&info.best_move));
                assert_eq!(g, before);
                g.make_move(moves[rng.usize(..moves.len())]);
            }
        }
    }
}
