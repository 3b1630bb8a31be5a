//! HalfKA-style feature indexing.
//!
//! A feature is keyed by `(own king bucket, relative piece identity, oriented piece square)`.
//! Every piece on the board -- including the side's own king -- contributes one feature per
//! perspective, which is what distinguishes "HalfKA" from the narrower "HalfKP" scheme that
//! drops the own king.
//!
//! The board is oriented per perspective before indexing so the feature space only needs to
//! cover one color's-worth of king positions: ranks are flipped for Black, and files are
//! mirrored so the perspective's king always lands on the e-to-h half of the board. That halves
//! the number of king buckets from 64 to 32 for free.

use talon::{Piece, PieceType, Player, SQ};

/// One king-relative "own" or "enemy" piece identity, plus the king itself -- 5 piece kinds
/// per side plus the (shared) king slot.
const PIECE_KINDS: usize = 11;
const SQUARES: usize = 64;
/// 4 files (e..h after mirroring) * 8 ranks.
const KING_BUCKETS: usize = 32;

/// Total input dimension of the feature transformer, `32 * 11 * 64`.
pub const FEATURE_DIM: usize = KING_BUCKETS * PIECE_KINDS * SQUARES;

const PS_PAWN: usize = 0;
const PS_KNIGHT: usize = SQUARES;
const PS_BISHOP: usize = 2 * SQUARES;
const PS_ROOK: usize = 3 * SQUARES;
const PS_QUEEN: usize = 4 * SQUARES;
const PS_KING: usize = 5 * SQUARES;
/// Enemy pieces occupy the mirrored half of the 11-slot block (king is shared, since whichever
/// perspective we're in, "the" king bucket is already keyed off its own color).
const PS_ENEMY_OFFSET: usize = 5 * SQUARES + SQUARES;

fn piece_block(kind: PieceType, own: bool) -> usize {
    let base = match kind {
        PieceType::P => PS_PAWN,
        PieceType::N => PS_KNIGHT,
        PieceType::B => PS_BISHOP,
        PieceType::R => PS_ROOK,
        PieceType::Q => PS_QUEEN,
        PieceType::K => return PS_KING,
        PieceType::None | PieceType::All => unreachable!("no feature for an empty square"),
    };
    if own { base } else { base + PS_ENEMY_OFFSET }
}

/// Re-expresses `sq` as seen from `perspective`: ranks flip for Black so both colors "look
/// the same way" up the board.
fn flip_for_perspective(sq: u8, perspective: Player) -> u8 {
    if perspective == Player::Black { sq ^ 56 } else { sq }
}

/// Squares strictly forward of, and to the left of, the king's own file after the color flip
/// above are mirrored, so the king bucket table only has to cover the kingside half.
fn king_bucket(king_sq_oriented: u8) -> usize {
    let rank = (king_sq_oriented / 8) as usize;
    let file = (king_sq_oriented % 8) as usize;
    debug_assert!(file >= 4, "king square should already be mirrored onto the e-h files");
    rank * 4 + (file - 4)
}

/// Computes the feature index of `piece` standing on `piece_sq`, given the perspective's own
/// king on `king_sq`, both in absolute board coordinates.
///
/// `own` is true when `piece`'s color matches `perspective`.
pub fn feature_index(perspective: Player, king_sq: SQ, piece: Piece, piece_sq: SQ, own: bool) -> usize {
    let kind = piece.type_of();
    let k = flip_for_perspective(king_sq.0, perspective);
    let mirror = (k % 8) < 4;
    let k = if mirror { k ^ 7 } else { k };

    let mut s = flip_for_perspective(piece_sq.0, perspective);
    if mirror {
        s ^= 7;
    }

    let bucket = king_bucket(k);
    bucket * PIECE_KINDS * SQUARES + piece_block(kind, own) + s as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_index_stays_in_bounds() {
        for king_sq in 0u8..64 {
            for piece_sq in 0u8..64 {
                for &kind in &[PieceType::P, PieceType::N, PieceType::B, PieceType::R, PieceType::Q, PieceType::K] {
                    for &own in &[true, false] {
                        let piece = Piece::make(Player::White, kind).unwrap();
                        let idx = feature_index(Player::White, SQ(king_sq), piece, SQ(piece_sq), own);
                        assert!(idx < FEATURE_DIM);
                        let idx = feature_index(Player::Black, SQ(king_sq), piece, SQ(piece_sq), own);
                        assert!(idx < FEATURE_DIM);
                    }
                }
            }
        }
    }

    #[test]
    fn own_and_enemy_pawns_land_in_disjoint_blocks() {
        let king_sq = SQ(4);
        let piece_sq = SQ(12);
        let white_pawn = Piece::make(Player::White, PieceType::P).unwrap();
        let own_idx = feature_index(Player::White, king_sq, white_pawn, piece_sq, true);
        let enemy_idx = feature_index(Player::White, king_sq, white_pawn, piece_sq, false);
        assert_ne!(own_idx, enemy_idx);
    }
}
