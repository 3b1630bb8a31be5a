extern crate talon;
extern crate talon_engine;

use talon::Board;
use talon_engine::engine::TalonSearcher;
use talon_engine::time::uci_timer::PreLimits;

pub fn get_move(fen: String, depth: u16) -> String {
    let mut limit = PreLimits::blank();
    limit.depth = Some(depth);
    let board = Board::new_from_fen(fen.as_str()).unwrap();
    let mut s = TalonSearcher::init(false);

    s.search(&board, &limit);
    let bit_move = s.await_move();

    bit_move.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let result = get_move(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string(),
            6,
        );
        assert_eq!(result, "e2e4");
    }
}
