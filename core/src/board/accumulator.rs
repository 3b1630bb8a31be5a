//! Per-move NNUE feature-delta bookkeeping.
//!
//! `Board` records, in every [`super::board_state::BoardState`] it creates, which pieces moved
//! and where. That's the only NNUE-related state the core crate owns: the feature-transformer
//! weights that turn a [`DirtyPiece`] delta into an accumulator update, and the accumulator
//! itself, live in `talon_engine::nnue`, since they depend on a network file the core crate has
//! no business owning and are only ever read in the strict make/unmake order a search already
//! follows.

use crate::types::sq::{SQ, NO_SQ};
use crate::types::Piece;

/// Describes how a single piece's board presence changed across a move, expressed as a
/// feature-list delta rather than a board delta: `from == NO_SQ` means the piece was created
/// (a pawn promoting into its promotion piece), `to == NO_SQ` means the piece vanished
/// (captured, or a pawn that just promoted away).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceDelta {
    pub piece: Piece,
    pub from: SQ,
    pub to: SQ,
}

impl PieceDelta {
    pub const fn blank() -> PieceDelta {
        PieceDelta { piece: Piece::None, from: NO_SQ, to: NO_SQ }
    }
}

/// A move touches at most three distinct piece identities once captures and promotions are
/// accounted for (the moved/promoted piece, a captured piece, and -- only for castling -- the
/// rook). The common case only ever moves two pieces; the third slot exists only so a
/// promotion-that-captures doesn't have to special-case a full refresh.
pub const MAX_DIRTY_PIECES: usize = 3;

#[derive(Clone, Copy, Debug)]
pub struct DirtyPiece {
    pub pieces: [PieceDelta; MAX_DIRTY_PIECES],
    pub count: u8,
}

impl DirtyPiece {
    pub const fn none() -> DirtyPiece {
        DirtyPiece {
            pieces: [PieceDelta::blank(); MAX_DIRTY_PIECES],
            count: 0,
        }
    }

    pub fn push(&mut self, piece: Piece, from: SQ, to: SQ) {
        debug_assert!((self.count as usize) < MAX_DIRTY_PIECES);
        self.pieces[self.count as usize] = PieceDelta { piece, from, to };
        self.count += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceDelta> {
        self.pieces[..self.count as usize].iter()
    }

    /// True when this move changed the square of the given piece's own king -- the one case
    /// where that perspective's feature bucket itself moves and an incremental update isn't
    /// enough; the evaluator must refresh the whole accumulator column from scratch.
    pub fn moves_king(&self, king: Piece) -> bool {
        self.iter().any(|d| d.piece == king && d.from != NO_SQ)
    }
}
