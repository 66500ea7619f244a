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

//! State representations of boards, which contain board state (such as piece
//! positions), but neither history nor meta-information about a game.

use super::{
    movegen::is_square_attacked_by, zobrist, CastleRights, Color, Direction, Move, Piece, Square,
};

use std::{
    default::Default,
    fmt::{Display, Formatter},
};

use thiserror::Error;

/// The FEN of the conventional starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
/// The ways in which a FEN string can fail to describe a board.
pub enum FenError {
    #[error("expected at least 4 fields in FEN, found {0}")]
    MissingFields(usize),
    #[error("expected 8 ranks in FEN, found {0}")]
    RankCount(usize),
    #[error("rank {0} of FEN does not describe exactly 8 squares")]
    BadRank(usize),
    #[error("illegal piece character `{0}` in FEN")]
    BadPiece(char),
    #[error("illegal player to move `{0}` in FEN")]
    BadPlayer(String),
    #[error("illegal castling rights `{0}` in FEN")]
    BadCastleRights(String),
    #[error("illegal en passant square `{0}` in FEN")]
    BadEnPassant(String),
    #[error("illegal move counter `{0}` in FEN")]
    BadCounter(String),
    #[error("each side must have exactly one king")]
    KingCount,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// A representation of a position. Does not handle the repetition of
/// positions, which is the job of a `Game`.
pub struct Board {
    /// The piece (and its color) on each square, indexed by square.
    squares: [Option<(Color, Piece)>; 64],
    /// The squares of the White and Black kings, respectively.
    king_squares: [Square; 2],
    /// The color of the player to move.
    pub player_to_move: Color,
    /// The square which can be moved to by a pawn in en passant. Will be
    /// `None` unless a pawn moved two squares in the previous move and landed
    /// beside an enemy pawn.
    pub en_passant_square: Option<Square>,
    /// The rights of this piece for castling.
    pub castle_rights: CastleRights,
    /// The number of plies since the last capture or pawn move.
    pub halfmove_clock: u16,
    /// The number of the current full move, starting at 1 and incremented
    /// after Black moves.
    pub fullmove_number: u16,
    /// A saved internal hash. If the board is valid, the this value must ALWAYS
    /// be equal to the output of `Board.fresh_hash()`.
    pub hash: u64,
}

impl Board {
    /// Create an empty board with no pieces or castle rights.
    fn empty() -> Board {
        let mut board = Board {
            squares: [None; 64],
            king_squares: [Square::E1, Square::E8],
            player_to_move: Color::White,
            en_passant_square: None,
            castle_rights: CastleRights::NO_RIGHTS,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        };
        board.recompute_hash();
        board
    }

    /// Create a Board populated from some FEN and load it. The halfmove and
    /// fullmove counters may be omitted. An en passant square is only kept if
    /// a pawn of the player to move could capture there.
    ///
    /// # Errors
    ///
    /// This function will return an `Err` describing the first problem found
    /// if the FEN is malformed.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::MissingFields(fields.len()));
        }
        let mut board = Board::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        let mut king_counts = [0u8; 2];
        // FEN lists ranks from 8 down to 1
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file = 0u8;
            for chr in rank_str.chars() {
                if let Some(skip) = chr.to_digit(10) {
                    file += skip as u8;
                    if file > 8 {
                        return Err(FenError::BadRank(rank as usize + 1));
                    }
                    continue;
                }
                let pt = Piece::from_code(chr.to_ascii_uppercase()).ok_or(FenError::BadPiece(chr))?;
                let color = match chr.is_ascii_uppercase() {
                    true => Color::White,
                    false => Color::Black,
                };
                if file >= 8 {
                    return Err(FenError::BadRank(rank as usize + 1));
                }
                let sq = Square::new(rank, file);
                board.add_piece(sq, pt, color);
                if pt == Piece::King {
                    king_counts[color.index()] += 1;
                    board.king_squares[color.index()] = sq;
                }
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRank(rank as usize + 1));
            }
        }
        if king_counts != [1, 1] {
            return Err(FenError::KingCount);
        }

        board.player_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            s => return Err(FenError::BadPlayer(s.into())),
        };

        board.castle_rights = CastleRights::from_fen_field(fields[2])
            .ok_or_else(|| FenError::BadCastleRights(fields[2].into()))?;

        // an en passant square with no pawn able to capture is dropped
        board.en_passant_square = match fields[3] {
            "-" => None,
            s => Some(Square::from_algebraic(s).map_err(|_| FenError::BadEnPassant(s.into()))?),
        }
        .filter(|&ep_sq| {
            ep_sq
                .offset(Direction::new((!board.player_to_move).pawn_step(), 0))
                .is_some_and(|pawn_sq| board.is_ep_capturable(pawn_sq, board.player_to_move))
        });

        if let Some(s) = fields.get(4) {
            board.halfmove_clock = s.parse().map_err(|_| FenError::BadCounter((*s).into()))?;
        }
        if let Some(s) = fields.get(5) {
            board.fullmove_number = s.parse().map_err(|_| FenError::BadCounter((*s).into()))?;
        }

        board.recompute_hash();
        Ok(board)
    }

    #[must_use]
    /// Write this board as a FEN string, including the move counters.
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8).rev() {
            let mut empties = 0;
            for file in 0..8 {
                match self.piece_at(Square::new(rank, file)) {
                    None => empties += 1,
                    Some((color, pt)) => {
                        if empties > 0 {
                            placement.push_str(&empties.to_string());
                            empties = 0;
                        }
                        placement.push(match color {
                            Color::White => pt.code(),
                            Color::Black => pt.code().to_ascii_lowercase(),
                        });
                    }
                }
            }
            if empties > 0 {
                placement.push_str(&empties.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let player = match self.player_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant_square
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        format!(
            "{placement} {player} {} {ep} {} {}",
            self.castle_rights.to_fen_field(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    #[inline(always)]
    #[must_use]
    /// Get the piece and color on a square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.squares[sq.index()]
    }

    #[inline(always)]
    #[must_use]
    /// Get the square of the king of the given color.
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline(always)]
    #[must_use]
    /// Is the player to move in check?
    pub fn is_king_checked(&self) -> bool {
        is_square_attacked_by(
            self,
            self.king_square(self.player_to_move),
            !self.player_to_move,
        )
    }

    #[must_use]
    /// Determine whether neither side has enough material left to deliver
    /// checkmate. A lone king, or a king with a single minor piece against a
    /// lone king, cannot mate.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        for (_, pt) in self.squares.iter().flatten() {
            match pt {
                Piece::King => (),
                Piece::Knight | Piece::Bishop => minors += 1,
                Piece::Pawn | Piece::Rook | Piece::Queen => return false,
            }
        }
        minors <= 1
    }

    /// Apply the given move to the board. Will assume the move is legal
    /// (unlike `Game::try_move()`). The hash, castling rights, en passant
    /// square, and move counters are all updated.
    pub fn make_move(&mut self, m: Move) {
        let player = self.player_to_move;
        let from_sq = m.from_square();
        let to_sq = m.to_square();
        let mover = m.mover();

        // remove the old aspects of the hash before they change
        self.hash ^= zobrist::ep_key(self.en_passant_square);
        self.hash ^= zobrist::castle_key(self.castle_rights);

        if m.is_en_passant() {
            self.remove_piece(Square::new(from_sq.rank(), to_sq.file()));
        } else if m.is_capture() {
            self.remove_piece(to_sq);
        }
        self.remove_piece(from_sq);
        self.add_piece(to_sq, m.promote_type().unwrap_or(mover), player);

        if m.is_castle() {
            let rank = player.back_rank();
            let (rook_from, rook_to) = match to_sq.file() {
                6 => (Square::new(rank, 7), Square::new(rank, 5)),
                _ => (Square::new(rank, 0), Square::new(rank, 3)),
            };
            self.remove_piece(rook_from);
            self.add_piece(rook_to, Piece::Rook, player);
        }

        self.en_passant_square = None;
        if mover == Piece::Pawn
            && from_sq.rank().abs_diff(to_sq.rank()) == 2
            && self.is_ep_capturable(to_sq, !player)
        {
            self.en_passant_square = Some(Square::new(
                (from_sq.rank() + to_sq.rank()) / 2,
                from_sq.file(),
            ));
        }
        if mover == Piece::King {
            self.king_squares[player.index()] = to_sq;
        }

        self.castle_rights &= !(CastleRights::touched_by(from_sq) | CastleRights::touched_by(to_sq));

        self.halfmove_clock = match mover == Piece::Pawn || m.is_capture() {
            true => 0,
            false => self.halfmove_clock.saturating_add(1),
        };
        if player == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.player_to_move = !player;
        self.hash ^= zobrist::player_key(Color::Black);
        self.hash ^= zobrist::ep_key(self.en_passant_square);
        self.hash ^= zobrist::castle_key(self.castle_rights);
    }

    /// Determine whether a pawn of color `capturer` stands beside `pawn_sq`,
    /// where it could take a pawn which just moved there en passant.
    fn is_ep_capturable(&self, pawn_sq: Square, capturer: Color) -> bool {
        [Direction::EAST, Direction::WEST].into_iter().any(|dir| {
            pawn_sq.offset(dir).and_then(|sq| self.piece_at(sq)) == Some((capturer, Piece::Pawn))
        })
    }

    /// Remove whatever piece is on `sq`, updating the hash.
    fn remove_piece(&mut self, sq: Square) {
        if let Some((color, pt)) = self.squares[sq.index()].take() {
            self.hash ^= zobrist::square_key(sq, pt, color);
        }
    }

    /// Place a piece on an empty square, updating the hash.
    fn add_piece(&mut self, sq: Square, pt: Piece, color: Color) {
        self.squares[sq.index()] = Some((color, pt));
        self.hash ^= zobrist::square_key(sq, pt, color);
    }

    /// Recompute the Zobrist hash of this board and set it to the saved hash
    /// value.
    pub fn recompute_hash(&mut self) {
        self.hash = self.fresh_hash();
    }

    #[must_use]
    /// Compute the hash value of this board from scratch.
    pub fn fresh_hash(&self) -> u64 {
        let mut hash = 0;
        for sq in Square::ALL {
            if let Some((color, pt)) = self.piece_at(sq) {
                hash ^= zobrist::square_key(sq, pt, color);
            }
        }
        hash ^= zobrist::player_key(self.player_to_move);
        hash ^= zobrist::ep_key(self.en_passant_square);
        hash ^= zobrist::castle_key(self.castle_rights);
        hash
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let chr = match self.piece_at(Square::new(rank, file)) {
                    Some((Color::White, pt)) => pt.code(),
                    Some((Color::Black, pt)) => pt.code().to_ascii_lowercase(),
                    None => '.',
                };
                write!(f, "{chr}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Board {
        let mut board = Board::empty();
        let back_row = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for color in Color::ALL {
            for (file, pt) in back_row.into_iter().enumerate() {
                board.add_piece(Square::new(color.back_rank(), file as u8), pt, color);
                board.add_piece(
                    Square::new(color.pawn_start_rank(), file as u8),
                    Piece::Pawn,
                    color,
                );
            }
        }
        board.castle_rights = CastleRights::ALL_RIGHTS;
        board.recompute_hash();
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test that the default board is the same as the start position FEN.
    fn start_fen() {
        assert_eq!(Board::from_fen(START_FEN).unwrap(), Board::default());
        assert_eq!(Board::default().to_fen(), START_FEN);
    }

    #[test]
    /// Test that FENs survive a round trip through a `Board`.
    fn fen_round_trip() {
        for fen in [
            START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 12 40",
        ] {
            assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    /// Test that malformed FENs are rejected with the right reasons.
    fn bad_fens() {
        assert_eq!(Board::from_fen("8/8/8 w"), Err(FenError::MissingFields(2)));
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8 w - -"),
            Err(FenError::RankCount(7))
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 x - -"),
            Err(FenError::BadPlayer("x".into()))
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K2 w - -"),
            Err(FenError::BadRank(1))
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/8 w - -"),
            Err(FenError::KingCount)
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4KX2 w - -"),
            Err(FenError::BadPiece('X'))
        );
    }

    #[test]
    /// Test that playing e4 moves the pawn and keeps the hash consistent.
    /// No black pawn can capture, so there is no en passant square.
    fn play_e4() {
        let mut b = Board::default();
        b.make_move(Move::normal(Square::E2, Square::E4, Piece::Pawn, None));
        assert_eq!(b.piece_at(Square::E4), Some((Color::White, Piece::Pawn)));
        assert_eq!(b.piece_at(Square::E2), None);
        assert_eq!(b.en_passant_square, None);
        assert_eq!(b.player_to_move, Color::Black);
        assert_eq!(b.hash, b.fresh_hash());
        assert_eq!(
            b.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    /// Test that a double push beside an enemy pawn sets the en passant
    /// square.
    fn double_push_beside_enemy_pawn() {
        let mut b =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/8/3p4/8/PPPPPPPP/RNBQKBNR w KQkq - 0 3").unwrap();
        b.make_move(Move::normal(Square::E2, Square::E4, Piece::Pawn, None));
        assert_eq!(b.en_passant_square, Some(Square::E3));
        assert_eq!(b.hash, b.fresh_hash());
        assert_eq!(Board::from_fen(&b.to_fen()).unwrap(), b);
    }

    #[test]
    /// Test that a FEN en passant square which no pawn can use is dropped,
    /// so that the hash matches the same position reached without it.
    fn useless_fen_en_passant() {
        let with_ep =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        let without_ep =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
        assert_eq!(with_ep.en_passant_square, None);
        assert_eq!(with_ep, without_ep);
    }

    #[test]
    /// Test that an en passant capture removes the captured pawn.
    fn en_passant() {
        let mut b =
            Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        b.make_move(Move::en_passant(Square::E5, Square::F6));
        assert_eq!(b.piece_at(Square::F5), None);
        assert_eq!(b.piece_at(Square::F6), Some((Color::White, Piece::Pawn)));
        assert_eq!(b.hash, b.fresh_hash());
    }

    #[test]
    /// Test that castling kingside moves the rook and removes White's rights.
    fn white_kingside_castle() {
        let mut b =
            Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        b.make_move(Move::castling(Square::E1, Square::G1));
        assert_eq!(b.piece_at(Square::F1), Some((Color::White, Piece::Rook)));
        assert_eq!(b.piece_at(Square::H1), None);
        assert_eq!(b.king_square(Color::White), Square::G1);
        assert_eq!(
            b.castle_rights,
            CastleRights::color_rights(Color::Black)
        );
        assert_eq!(b.hash, b.fresh_hash());
    }

    #[test]
    /// Test that capturing a rook on its home square removes the rook's
    /// castling rights.
    fn no_castle_after_capture() {
        let mut b = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        b.make_move(Move::normal(Square::A1, Square::A8, Piece::Rook, Some(Piece::Rook)));
        assert!(!b.castle_rights.is_queenside_castle_legal(Color::White));
        assert!(!b.castle_rights.is_queenside_castle_legal(Color::Black));
        assert!(b.castle_rights.is_kingside_castle_legal(Color::Black));
        assert_eq!(b.hash, b.fresh_hash());
    }

    #[test]
    /// Test that a promotion replaces the pawn with the promoted piece.
    fn white_promote_queen() {
        let mut b = Board::from_fen("8/P3k3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        b.make_move(Move::promoting(Square::A7, Square::A8, None, Piece::Queen));
        assert_eq!(b.piece_at(Square::A8), Some((Color::White, Piece::Queen)));
        assert_eq!(b.halfmove_clock, 0);
        assert_eq!(b.hash, b.fresh_hash());
    }

    #[test]
    /// Test the insufficient material rule on some simple endings.
    fn insufficient_material() {
        let two_kings = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(two_kings.is_insufficient_material());
        let knight = Board::from_fen("4k3/8/8/8/8/8/8/4KN2 w - - 0 1").unwrap();
        assert!(knight.is_insufficient_material());
        let rook = Board::from_fen("4k3/8/8/8/8/8/8/4KR2 w - - 0 1").unwrap();
        assert!(!rook.is_insufficient_material());
        assert!(!Board::default().is_insufficient_material());
    }
}
