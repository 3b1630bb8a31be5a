//! Classical static evaluator, used whenever no NNUE network is loaded.
//!
//! Follows the same shape a classical hand-tuned evaluator always takes: sum a handful of
//! independently-scored terms (material imbalance, piece-square placement, pawn structure,
//! mobility, king safety, threats) as midgame/endgame `Score` pairs, then taper the pair down
//! to a single `Value` by the game phase before applying the small set of output-scaling steps
//! every evaluator needs (tempo, fifty-move decay, a sane clamp).

#[allow(unused_imports)]
use talon::{Board, BitBoard, SQ, Rank, File, Player, Piece, PieceType};
#[allow(unused_imports)]
use talon::types::mono_traits::*;
use talon::types::score::*;
use talon::types::masks::*;
use talon::helper::prelude::*;

use crate::consts::MATE_IN_MAX_PLY;
use crate::tables::pawn_table::{PawnEntry, PawnTable};
use crate::tables::material::{MaterialEntry,Material};

/// A small side-to-move bonus, applied after everything else has been tapered -- matches the
/// NNUE path's own `TEMPO` constant (`nnue::network::TEMPO`).
const TEMPO: i32 = 20;

const KNIGHT_MOBILITY: [Score; 9] = [
    Score(-62, -79), Score(-53, -57), Score(-12, -31), Score(-4, -17), Score(3, 7),
    Score(13, 17), Score(22, 23), Score(28, 27), Score(33, 25),
];

const BISHOP_MOBILITY: [Score; 14] = [
    Score(-47, -58), Score(-21, -32), Score(12, -5), Score(23, 10), Score(33, 22),
    Score(41, 32), Score(47, 40), Score(51, 46), Score(55, 50), Score(58, 53),
    Score(60, 55), Score(62, 56), Score(64, 57), Score(65, 58),
];

const ROOK_MOBILITY: [Score; 15] = [
    Score(-58, -76), Score(-27, -18), Score(-15, 14), Score(-10, 41), Score(-5, 60),
    Score(-2, 77), Score(7, 86), Score(16, 95), Score(20, 104), Score(24, 110),
    Score(28, 116), Score(31, 121), Score(34, 124), Score(36, 126), Score(38, 128),
];

const QUEEN_MOBILITY: [Score; 28] = [
    Score(-39, -36), Score(-21, -15), Score(3, 8), Score(4, 18), Score(15, 34),
    Score(21, 48), Score(27, 53), Score(31, 64), Score(35, 68), Score(38, 73),
    Score(40, 76), Score(41, 78), Score(44, 80), Score(45, 82), Score(46, 84),
    Score(47, 86), Score(48, 87), Score(48, 88), Score(49, 89), Score(49, 90),
    Score(50, 91), Score(50, 91), Score(50, 92), Score(50, 92), Score(50, 93),
    Score(50, 93), Score(50, 93), Score(50, 93),
];

/// Flat bonus for a piece attacking a square occupied by a strictly more valuable enemy piece,
/// keyed by the attacker's relative value (`PieceType::value`); pawns (1) attacking knights or
/// bishops (3) score more than a rook (5) attacking a queen (8).
const STRONG_ATTACK: Score = Score(22, 12);

/// Bonus/penalty ramping with the number of enemy pieces bearing on our king ring, capped at 3.
const KING_ATTACKERS: [Score; 4] = [Score(0, 0), Score(-12, -6), Score(-35, -18), Score(-70, -35)];

const ROOK_SAFE_CHECK: Score = Score(-85, -35);
const QUEEN_SAFE_CHECK: Score = Score(-65, -65);
const BISHOP_SAFE_CHECK: Score = Score(-45, -15);
const KNIGHT_SAFE_CHECK: Score = Score(-60, -20);

/// Penalty for each square next to our king that two or more enemy pieces both bear on.
const DOUBLE_ATTACKED_KING_RING: Score = Score(-8, -4);

pub struct Evaluation<'a> {
    board: &'a Board,
    pawn_entry: &'a mut PawnEntry,
    material_entry: &'a mut MaterialEntry,
    king_ring: [BitBoard; PLAYER_CNT],
    mobility_area: [BitBoard; PLAYER_CNT],
    mobility: [Score; PLAYER_CNT],
    /// Squares each player's pieces attack, indexed by `PieceType as usize` (`PieceType::All`
    /// holds the union across every piece type for that player).
    attacked_by: [[BitBoard; PIECE_TYPE_CNT]; PLAYER_CNT],
    /// Squares attacked by two or more of a player's pieces.
    attacked_by2: [BitBoard; PLAYER_CNT],
    /// Count of the opponent's pieces bearing on a player's king ring, indexed by the king
    /// owner (so `king_attackers_count[W]` is how many Black pieces threaten the White king).
    king_attackers_count: [u8; PLAYER_CNT],
    king_attackers_weight: [i32; PLAYER_CNT],
    king_adjacent_zone_attacks_count: [i32; PLAYER_CNT],
}

impl <'a> Evaluation <'a> {
    pub fn evaluate(board: &Board, pawn_table: &mut PawnTable, material: &mut Material) -> Value {
        let pawn_entry = { pawn_table.probe(&board) };
        let material_entry = { material.probe(&board) };

        let mut eval = Evaluation {
            board,
            pawn_entry,
            material_entry,
            king_ring: [BitBoard(0); PLAYER_CNT],
            mobility_area: [BitBoard(0); PLAYER_CNT],
            mobility: [Score(0,0); PLAYER_CNT],
            attacked_by: [[BitBoard(0); PIECE_TYPE_CNT];PLAYER_CNT],
            attacked_by2: [BitBoard(0) ;PLAYER_CNT],
            king_attackers_count: [0; PLAYER_CNT],
            king_attackers_weight: [0; PLAYER_CNT],
            king_adjacent_zone_attacks_count: [0; PLAYER_CNT],
        };

        eval.value()
    }

    /// Prints the board and its static evaluation (from White's perspective) to stdout, for the
    /// UCI driver's `eval` debug command.
    pub fn trace(board: &Board) {
        let mut pawn_table = PawnTable::new();
        let mut material = Material::new();
        let value = Evaluation::evaluate(board, &mut pawn_table, &mut material);
        let white_relative = if board.turn() == Player::White { value } else { -value };
        println!("{}", board);
        println!("Static evaluation: {} (White's perspective, centipawns)", white_relative);
    }

    fn value(&mut self) -> Value {
        self.king_ring[Player::White as usize] = king_moves(self.board.king_sq(Player::White));
        self.king_ring[Player::Black as usize] = king_moves(self.board.king_sq(Player::Black));

        self.init_pawn_attacks::<WhiteType>();
        self.init_pawn_attacks::<BlackType>();

        self.mobility_area[Player::White as usize] = self.mobility_area_for::<WhiteType>();
        self.mobility_area[Player::Black as usize] = self.mobility_area_for::<BlackType>();

        self.minor_and_major_terms::<WhiteType>(PieceType::N);
        self.minor_and_major_terms::<BlackType>(PieceType::N);
        self.minor_and_major_terms::<WhiteType>(PieceType::B);
        self.minor_and_major_terms::<BlackType>(PieceType::B);
        self.minor_and_major_terms::<WhiteType>(PieceType::R);
        self.minor_and_major_terms::<BlackType>(PieceType::R);
        self.minor_and_major_terms::<WhiteType>(PieceType::Q);
        self.minor_and_major_terms::<BlackType>(PieceType::Q);

        let mut score = self.material_entry.score() + self.pawn_entry.pawns_score();
        score += self.psqt_score();
        score += self.mobility[Player::White as usize] - self.mobility[Player::Black as usize];
        score += self.threats::<WhiteType>() - self.threats::<BlackType>();
        score += self.king_danger::<WhiteType>() - self.king_danger::<BlackType>();

        let phase = self.material_entry.phase as i32;
        let mg = score.mg() as i32;
        let eg = score.eg() as i32;
        let mut v = (mg * phase + eg * (PHASE_MID_GAME_I32 - phase)) / PHASE_MID_GAME_I32;

        // Everything above is White-relative (every per-square / per-player term is added for
        // White and subtracted for Black); flip once here rather than conditionally, so the
        // result is always side-to-move-relative regardless of magnitude.
        if self.board.turn() == Player::Black {
            v = -v;
        }

        v = v * (208 - self.board.rule_50() as i32) / 208;
        v += TEMPO;

        let mate_limit = MATE_IN_MAX_PLY - 1;
        v.clamp(-mate_limit, mate_limit) as Value
    }

    /// Sum of `psq(piece, square)` over every occupied square -- White-relative base material
    /// plus positional placement bonus, mirroring the per-player material imbalance term.
    fn psqt_score(&self) -> Score {
        let mut score = Score::ZERO;
        for sq in self.board.get_occupied() {
            let piece_type = match self.board.piece_at_sq(sq) {
                Some(pt) => pt,
                None => continue,
            };
            let owner = self
                .board
                .player_at_sq(sq)
                .expect("occupied square has an owner");
            let piece = Piece::make(owner, piece_type).expect("valid piece/player pair");
            score += psq(piece, sq);
        }
        score
    }

    fn init_pawn_attacks<P: PlayerTrait>(&mut self) {
        let us = P::player() as usize;
        let attacks = self.pawn_entry.pawn_attacks(P::player());
        self.attacked_by[us][PieceType::P as usize] = attacks;
        self.attacked_by[us][PieceType::All as usize] = attacks;
    }

    /// Squares a piece's mobility is actually scored over: not blocked/undeveloped own pawns,
    /// not our own king, and not a square the opponent's pawns attack.
    fn mobility_area_for<P: PlayerTrait>(&self) -> BitBoard {
        let low_ranks: BitBoard = if P::player() == Player::White {
            BitBoard(RANK_2 | RANK_3)
        } else {
            BitBoard(RANK_6 | RANK_7)
        };
        let blocked_or_undeveloped = self.board.piece_bb(P::player(), PieceType::P)
            & P::shift_down(self.board.get_occupied() | low_ranks);

        !(blocked_or_undeveloped
            | self.board.piece_bb(P::player(), PieceType::K)
            | self.pawn_entry.pawn_attacks(P::opp_player()))
    }

    /// Scores mobility and records attacked squares / king-ring pressure for every piece of
    /// `piece_type` belonging to `P::player()`. Called for knights, then bishops, then rooks,
    /// then queens, for each color in turn, so that by the time rooks are scored both colors'
    /// knight and bishop attacks are already known (needed to exclude squares the opponent's
    /// minors defend from rook mobility, and so on for queens).
    fn minor_and_major_terms<P: PlayerTrait>(&mut self, piece_type: PieceType) {
        let us = P::player() as usize;
        let them = P::opp_player() as usize;
        let occupied = self.board.get_occupied();

        let excluded = match piece_type {
            PieceType::N | PieceType::B => self.attacked_by[them][PieceType::P as usize],
            PieceType::R => {
                self.attacked_by[them][PieceType::P as usize]
                    | self.attacked_by[them][PieceType::N as usize]
                    | self.attacked_by[them][PieceType::B as usize]
            }
            PieceType::Q => {
                self.attacked_by[them][PieceType::P as usize]
                    | self.attacked_by[them][PieceType::N as usize]
                    | self.attacked_by[them][PieceType::B as usize]
                    | self.attacked_by[them][PieceType::R as usize]
            }
            _ => BitBoard(0),
        };

        let mobility_bonus: &[Score] = match piece_type {
            PieceType::N => &KNIGHT_MOBILITY,
            PieceType::B => &BISHOP_MOBILITY,
            PieceType::R => &ROOK_MOBILITY,
            PieceType::Q => &QUEEN_MOBILITY,
            _ => &[],
        };

        let mut piece_attacks = BitBoard(0);

        for sq in self.board.piece_bb(P::player(), piece_type) {
            let raw_attacks = match piece_type {
                PieceType::N => knight_moves(sq),
                PieceType::B => bishop_moves(occupied, sq),
                PieceType::R => rook_moves(occupied, sq),
                PieceType::Q => queen_moves(occupied, sq),
                _ => BitBoard(0),
            };

            self.attacked_by2[us] |= piece_attacks & raw_attacks;
            piece_attacks |= raw_attacks;

            let mobility = raw_attacks & !occupied & !excluded & self.mobility_area[us];
            self.mobility[us] += mobility_bonus[mobility.count_bits() as usize];

            if (raw_attacks & self.king_ring[them]).is_not_empty() {
                self.king_attackers_count[them] += 1;
                self.king_attackers_weight[them] += piece_type.value() as i32;
                self.king_adjacent_zone_attacks_count[them] +=
                    (raw_attacks & self.king_ring[them]).count_bits() as i32;
            }
        }

        self.attacked_by[us][piece_type as usize] = piece_attacks;
        self.attacked_by[us][PieceType::All as usize] |= piece_attacks;
    }

    /// Bonus for each of `P::player()`'s pieces that attacks a strictly more valuable enemy
    /// piece -- a pawn forking two minors, a minor eyeing a rook, a rook eyeing the queen.
    fn threats<P: PlayerTrait>(&self) -> Score {
        let us = P::player() as usize;
        let mut score = Score::ZERO;

        for &pt in &[PieceType::P, PieceType::N, PieceType::B, PieceType::R, PieceType::Q] {
            for target_sq in self.attacked_by[us][pt as usize] {
                let target_pt = match self.board.piece_at_sq(target_sq) {
                    Some(t) => t,
                    None => continue,
                };
                if self.board.player_at_sq(target_sq) != Some(P::opp_player()) {
                    continue;
                }
                if target_pt.value() > pt.value() {
                    score += STRONG_ATTACK;
                }
            }
        }

        score
    }

    /// Pawn shelter/storm (via the pawn hash table), king-ring attacker pressure, and safe
    /// checks against `P::player()`'s king -- a penalty-shaped term, more negative the more
    /// dangerous the position is for that player's king.
    fn king_danger<P: PlayerTrait>(&mut self) -> Score {
        let us = P::player() as usize;
        let them = P::opp_player() as usize;
        let ksq = self.board.king_sq(P::player());

        let mut score = self.pawn_entry.king_safety::<P>(self.board, ksq);

        score += KING_ATTACKERS[self.king_attackers_count[us].min(3) as usize];

        let danger = self.king_attackers_weight[us] + 2 * self.king_adjacent_zone_attacks_count[us];
        score += Score(-(danger / 4) as Value, -(danger / 8) as Value);

        let double_attacked_ring =
            (self.attacked_by2[them] & self.king_ring[us]).count_bits() as i32;
        score += DOUBLE_ATTACKED_KING_RING * double_attacked_ring;

        let occupied = self.board.get_occupied();
        let our_attacks = self.attacked_by[us][PieceType::All as usize];
        let their_attacks = self.attacked_by[them][PieceType::All as usize];
        let their_occupied = self.board.get_occupied_player(P::opp_player());

        let weak = their_attacks & !our_attacks;
        let safe = !their_occupied & (!our_attacks | (weak & their_attacks));

        let mut claimed = BitBoard(0);

        if self.board.count_piece(P::opp_player(), PieceType::R) > 0 {
            let checks = safe & self.attacked_by[them][PieceType::R as usize] & rook_moves(occupied, ksq);
            if checks.is_not_empty() {
                score += ROOK_SAFE_CHECK;
                claimed |= checks;
            }
        }

        if self.board.count_piece(P::opp_player(), PieceType::Q) > 0 {
            let checks = safe & self.attacked_by[them][PieceType::Q as usize] & queen_moves(occupied, ksq) & !claimed;
            if checks.is_not_empty() {
                score += QUEEN_SAFE_CHECK;
                claimed |= checks;
            }
        }

        if self.board.count_piece(P::opp_player(), PieceType::B) > 0 {
            let checks = safe & self.attacked_by[them][PieceType::B as usize] & bishop_moves(occupied, ksq) & !claimed;
            if checks.is_not_empty() {
                score += BISHOP_SAFE_CHECK;
            }
        }

        if self.board.count_piece(P::opp_player(), PieceType::N) > 0 {
            let checks = safe & self.attacked_by[them][PieceType::N as usize] & knight_moves(ksq);
            if checks.is_not_empty() {
                score += KNIGHT_SAFE_CHECK;
            }
        }

        score
    }
}

const PHASE_MID_GAME_I32: i32 = crate::tables::material::PHASE_MID_GAME as i32;
