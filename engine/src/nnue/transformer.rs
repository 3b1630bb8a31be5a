//! The feature transformer: turns a position into a pair of 1024-wide accumulators, one per
//! perspective, and keeps them updated incrementally as moves are made and unmade.
//!
//! `Board` doesn't store this accumulator itself (see [`talon::board::accumulator`]) -- it only
//! records, per ply, which
//! piece squares changed. This module owns both the weights and the accumulator values they
//! produce, and threads the accumulator through the search stack the same way the rest of
//! `talon_engine` threads its own per-ply state (see `search::stack`).

use talon::types::sq::NO_SQ;
use talon::{Board, Piece, PieceType, Player, SQ};

use super::features::{feature_index, FEATURE_DIM};

/// Width of the per-perspective accumulator.
pub const ACCUMULATOR_SIZE: usize = 1024;
/// Number of PSQT output buckets blended against the layered network's output.
pub const PSQT_BUCKETS: usize = 8;

/// One ply's worth of incrementally maintained transformer output, one row per perspective
/// (`0` = White, `1` = Black -- matches [`talon::Player`]'s discriminant order).
#[derive(Clone)]
pub struct Accumulator {
    pub accumulation: [[i16; ACCUMULATOR_SIZE]; 2],
    pub psqt_accumulation: [[i32; PSQT_BUCKETS]; 2],
}

impl Accumulator {
    pub fn blank() -> Accumulator {
        Accumulator {
            accumulation: [[0; ACCUMULATOR_SIZE]; 2],
            psqt_accumulation: [[0; PSQT_BUCKETS]; 2],
        }
    }
}

/// Quantized weights of the feature transformer, loaded whole from an NNUE weights file.
pub struct Transformer {
    pub biases: Vec<i16>,
    /// Row-major, `FEATURE_DIM` rows of `ACCUMULATOR_SIZE` columns each.
    pub weights: Vec<i16>,
    /// Row-major, `FEATURE_DIM` rows of `PSQT_BUCKETS` columns each.
    pub psqts: Vec<i32>,
}

impl Transformer {
    pub fn zeroed() -> Transformer {
        Transformer {
            biases: vec![0; ACCUMULATOR_SIZE],
            weights: vec![0; FEATURE_DIM * ACCUMULATOR_SIZE],
            psqts: vec![0; FEATURE_DIM * PSQT_BUCKETS],
        }
    }

    fn add_feature(&self, acc: &mut Accumulator, idx: usize, feature: usize) {
        let row = feature * ACCUMULATOR_SIZE;
        for i in 0..ACCUMULATOR_SIZE {
            acc.accumulation[idx][i] += self.weights[row + i];
        }
        let prow = feature * PSQT_BUCKETS;
        for b in 0..PSQT_BUCKETS {
            acc.psqt_accumulation[idx][b] += self.psqts[prow + b];
        }
    }

    fn remove_feature(&self, acc: &mut Accumulator, idx: usize, feature: usize) {
        let row = feature * ACCUMULATOR_SIZE;
        for i in 0..ACCUMULATOR_SIZE {
            acc.accumulation[idx][i] -= self.weights[row + i];
        }
        let prow = feature * PSQT_BUCKETS;
        for b in 0..PSQT_BUCKETS {
            acc.psqt_accumulation[idx][b] -= self.psqts[prow + b];
        }
    }

    /// Recomputes one perspective's accumulator row from scratch by walking every occupied
    /// square. Needed whenever that perspective's own king moves, since the king bucket the
    /// whole row is keyed on changes with it.
    pub fn refresh(&self, board: &Board, perspective: Player, acc: &mut Accumulator) {
        let idx = perspective as usize;
        acc.accumulation[idx].copy_from_slice(&self.biases);
        acc.psqt_accumulation[idx] = [0; PSQT_BUCKETS];

        let king_sq = board.king_sq(perspective);
        for sq in 0u8..64 {
            let square = SQ(sq);
            if let Some(piece_type) = board.piece_at_sq(square) {
                let owner = board.player_at_sq(square).expect("occupied square has an owner");
                let piece = Piece::make(owner, piece_type).expect("valid piece/player pair");
                let own = owner == perspective;
                let feature = feature_index(perspective, king_sq, piece, square, own);
                self.add_feature(acc, idx, feature);
            }
        }
    }

    /// Updates one perspective's accumulator row incrementally from `prev`, using the
    /// [`talon::DirtyPiece`] delta `board` recorded for its last move. Falls back to
    /// [`Transformer::refresh`] when that perspective's own king was the piece that moved.
    pub fn update(&self, board: &Board, perspective: Player, prev: &Accumulator, acc: &mut Accumulator) {
        let idx = perspective as usize;
        let own_king = Piece::make(perspective, PieceType::K).expect("king always exists");

        if board.dirty_piece().moves_king(own_king) {
            self.refresh(board, perspective, acc);
            return;
        }

        acc.accumulation[idx] = prev.accumulation[idx];
        acc.psqt_accumulation[idx] = prev.psqt_accumulation[idx];

        let king_sq = board.king_sq(perspective);
        for delta in board.dirty_piece().iter() {
            if delta.piece == Piece::None {
                continue;
            }
            let own = delta.piece.player_lossy() == perspective;
            if delta.from != NO_SQ {
                let feature = feature_index(perspective, king_sq, delta.piece, delta.from, own);
                self.remove_feature(acc, idx, feature);
            }
            if delta.to != NO_SQ {
                let feature = feature_index(perspective, king_sq, delta.piece, delta.to, own);
                self.add_feature(acc, idx, feature);
            }
        }
    }
}
