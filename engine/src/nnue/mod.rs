//! HalfKA-style NNUE evaluation.
//!
//! Follows the idioms the rest of this crate already uses for its other lookup tables
//! (`tables::pawn_table`, `tables::material`): plain structs of fixed-size arrays, loaded once
//! and probed many times.
//!
//! `talon::Board` only carries the [`talon::DirtyPiece`] delta of its last move; the
//! accumulator these deltas update, and the weights that interpret them, live entirely in this
//! module (see [`transformer`] for why).

pub mod features;
pub mod layers;
pub mod network;
pub mod transformer;

pub use network::{NnueError, NnueNetwork};
pub use transformer::Accumulator;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::RwLock;

use lazy_static;
use talon::{Board, Player};
use talon::types::score::Value;

use crate::tables::material::Material;
use crate::tables::pawn_table::PawnTable;

lazy_static! {
    static ref NETWORK: RwLock<Option<NnueNetwork>> = RwLock::new(None);
}

/// Loads a network file into the global slot `evaluate` reads from. An error here leaves
/// whatever was previously loaded (or the classical fallback, if nothing was) in place.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<(), NnueError> {
    let path = path.as_ref();
    let file = BufReader::new(File::open(path)?);
    let net = NnueNetwork::load(file)?;
    *NETWORK.write().unwrap() = Some(net);
    tracing::info!(path = %path.display(), "NNUE network installed");
    Ok(())
}

/// Drops the loaded network, reverting evaluation to the classical evaluator.
pub fn unload() {
    *NETWORK.write().unwrap() = None;
}

pub fn is_loaded() -> bool {
    NETWORK.read().unwrap().is_some()
}

/// Evaluates `board`, using the loaded NNUE network when one is present and falling back to
/// the classical evaluator otherwise (classical only runs when NNUE weights are absent).
///
/// `slot` is the calling ply's own accumulator cell (a search stack frame's worth of storage);
/// `parent` is the previous ply's already-computed accumulator, or `None` at the root / whenever
/// nothing has been computed yet. When a network is loaded and a parent accumulator is
/// available, each perspective is advanced with [`transformer::Transformer::update`] from
/// `board`'s recorded [`talon::DirtyPiece`] delta rather than recomputed from scratch; `update`
/// itself falls back to a full [`transformer::Transformer::refresh`] for whichever perspective's
/// own king just moved. With no parent (or no network), both perspectives are refreshed.
pub fn evaluate(
    board: &Board,
    pawn_table: &mut PawnTable,
    material: &mut Material,
    parent: Option<&Accumulator>,
    slot: &mut Option<Box<Accumulator>>,
) -> Value {
    let guard = NETWORK.read().unwrap();
    match &*guard {
        Some(net) => {
            let mut acc = slot.take().unwrap_or_else(|| Box::new(Accumulator::blank()));
            for perspective in [Player::White, Player::Black] {
                match parent {
                    Some(prev) => net.transformer.update(board, perspective, prev, &mut acc),
                    None => net.transformer.refresh(board, perspective, &mut acc),
                }
            }
            let value = net.evaluate(board, &acc);
            *slot = Some(acc);
            value
        }
        None => {
            *slot = None;
            crate::search::eval::Evaluation::evaluate(board, pawn_table, material)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talon::Board;

    #[test]
    fn refresh_then_incremental_update_agree() {
        let transformer = transformer::Transformer::zeroed();
        let mut board = Board::start_pos();

        let mut white_acc = Accumulator::blank();
        transformer.refresh(&board, talon::Player::White, &mut white_acc);
        let mut black_acc = Accumulator::blank();
        transformer.refresh(&board, talon::Player::Black, &mut black_acc);

        let moves = board.generate_moves();
        let mv = moves.get(0).expect("start position has legal moves");
        board.apply_move(*mv);

        let mut white_incremental = Accumulator::blank();
        transformer.update(&board, talon::Player::White, &white_acc, &mut white_incremental);
        let mut white_refreshed = Accumulator::blank();
        transformer.refresh(&board, talon::Player::White, &mut white_refreshed);

        assert_eq!(
            white_incremental.accumulation[talon::Player::White as usize],
            white_refreshed.accumulation[talon::Player::White as usize]
        );
    }

    #[test]
    fn zeroed_network_evaluates_to_tempo_only_bonus_on_empty_accumulator() {
        let net = NnueNetwork::zeroed();
        let board = Board::start_pos();
        let acc = Accumulator::blank();
        let score = net.evaluate(&board, &acc);
        assert_eq!(score, 20);
    }
}
