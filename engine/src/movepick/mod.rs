mod pick;

use talon::board::movegen::{Legal, MoveGen};
use talon::types::mono_traits::{CapturesGenType, EvasionsGenType, QuietsGenType};
use talon::{BitMove, Board, PieceType, ScoringMove, SQ};

use crate::tables::butterfly::ButterflyHistory;
use crate::tables::capture_piece_history::CapturePieceToHistory;
use crate::tables::continuation::PieceToHistory;

use self::pick::{MainStage, QStage};

fn capture_score(board: &Board, m: BitMove, capture_history: &CapturePieceToHistory) -> i32 {
    let moved = board.moved_piece(m);
    let captured = if m.is_en_passant() {
        PieceType::P
    } else {
        board.piece_at_sq(m.get_dest()).unwrap_or(PieceType::None)
    };
    let mvv = talon::helper::prelude::piecetype_value(captured, false) * 16;
    mvv - talon::helper::prelude::piecetype_value(moved.type_of(), false)
        + capture_history[(moved, m.get_dest(), captured)] as i32
}

fn quiet_score(
    board: &Board,
    m: BitMove,
    main_history: &ButterflyHistory,
    cont_hists: &[*const PieceToHistory; 4],
) -> i32 {
    let moved = board.moved_piece(m);
    let mut score = main_history[(board.turn(), m)] as i32;
    for &ch in cont_hists.iter() {
        if !ch.is_null() {
            unsafe {
                score += (*ch)[(moved, m.get_dest())] as i32;
            }
        }
    }
    score
}

fn sort_descending(moves: &mut Vec<ScoringMove>) {
    moves.sort_unstable_by(|a, b| b.score().cmp(&a.score()));
}

/// Hands out moves for the main search: the transposition-table move first, then
/// captures that do not lose material (ordered by MVV-LVA plus capture history), the two
/// killer moves, the countermove, quiet moves ordered by combined history score, and finally
/// captures that do lose material.
pub struct MovePicker {
    stage: MainStage,
    tt_move: BitMove,
    killers: [BitMove; 2],
    counter_move: BitMove,
    good_captures: Vec<ScoringMove>,
    good_idx: usize,
    bad_captures: Vec<ScoringMove>,
    bad_idx: usize,
    quiets: Vec<ScoringMove>,
    quiet_idx: usize,

    // quiescence-search state
    qstage: QStage,
    qsearch: bool,
    q_captures: Vec<ScoringMove>,
    q_idx: usize,
}

impl MovePicker {
    pub fn main_search(
        board: &Board,
        _depth: i16,
        main_history: &ButterflyHistory,
        capture_history: &CapturePieceToHistory,
        cont_hists: *const [*const PieceToHistory; 4],
        mut ttm: BitMove,
        killers: [BitMove; 2],
        counter_move: BitMove,
    ) -> Self {
        assert!(!board.in_check());

        if ttm == BitMove::null() || !board.pseudo_legal_move(ttm) {
            ttm = BitMove::null();
        }

        let cont_hists: &[*const PieceToHistory; 4] = unsafe { &*cont_hists };

        let captures = MoveGen::generate::<Legal, CapturesGenType>(board);
        let mut good_captures: Vec<ScoringMove> = Vec::with_capacity(captures.len());
        let mut bad_captures: Vec<ScoringMove> = Vec::new();
        for &m in captures.iter() {
            if m == ttm {
                continue;
            }
            let score = capture_score(board, m, capture_history);
            if board.see_ge(m, 0) {
                good_captures.push(ScoringMove::new_score(m, score as i16));
            } else {
                bad_captures.push(ScoringMove::new_score(m, score as i16));
            }
        }
        sort_descending(&mut good_captures);
        sort_descending(&mut bad_captures);

        let mut killer1 = killers[0];
        let mut killer2 = killers[1];
        if killer1 == ttm || !board.pseudo_legal_move(killer1) || board.is_capture(killer1) {
            killer1 = BitMove::null();
        }
        if killer2 == ttm
            || killer2 == killer1
            || !board.pseudo_legal_move(killer2)
            || board.is_capture(killer2)
        {
            killer2 = BitMove::null();
        }

        let mut counter = counter_move;
        if counter == ttm
            || counter == killer1
            || counter == killer2
            || counter == BitMove::null()
            || !board.pseudo_legal_move(counter)
            || board.is_capture(counter)
        {
            counter = BitMove::null();
        }

        let quiets_list = MoveGen::generate::<Legal, QuietsGenType>(board);
        let mut quiets: Vec<ScoringMove> = Vec::with_capacity(quiets_list.len());
        for &m in quiets_list.iter() {
            if m == ttm || m == killer1 || m == killer2 || m == counter {
                continue;
            }
            let score = quiet_score(board, m, main_history, cont_hists);
            quiets.push(ScoringMove::new_score(m, score as i16));
        }
        sort_descending(&mut quiets);

        let stage = if ttm == BitMove::null() {
            MainStage::GoodCaptures
        } else {
            MainStage::TtMove
        };

        MovePicker {
            stage,
            tt_move: ttm,
            killers: [killer1, killer2],
            counter_move: counter,
            good_captures,
            good_idx: 0,
            bad_captures,
            bad_idx: 0,
            quiets,
            quiet_idx: 0,
            qstage: QStage::Done,
            qsearch: false,
            q_captures: Vec::new(),
            q_idx: 0,
        }
    }

    /// Hands out moves for quiescence search: the transposition-table move, then
    /// every pseudo-legal capture (and, when `recapture_sq` is given, only captures landing
    /// on that square), ordered by MVV-LVA/capture history.
    pub fn qsearch(
        board: &Board,
        _rev_depth: i16,
        mut ttm: BitMove,
        _main_history: &ButterflyHistory,
        capture_history: &CapturePieceToHistory,
        recapture_sq: SQ,
    ) -> Self {
        if ttm == BitMove::null() || !board.pseudo_legal_move(ttm) {
            ttm = BitMove::null();
        }

        let raw: talon::MoveList = if board.in_check() {
            MoveGen::generate::<Legal, EvasionsGenType>(board)
        } else {
            MoveGen::generate::<Legal, CapturesGenType>(board)
        };

        let mut q_captures: Vec<ScoringMove> = Vec::with_capacity(raw.len());
        for &m in raw.iter() {
            if m == ttm {
                continue;
            }
            if recapture_sq.is_okay() && !board.in_check() && m.get_dest() != recapture_sq {
                continue;
            }
            let score = capture_score(board, m, capture_history);
            q_captures.push(ScoringMove::new_score(m, score as i16));
        }
        sort_descending(&mut q_captures);

        let stage = if ttm == BitMove::null() {
            QStage::Captures
        } else {
            QStage::TtMove
        };

        MovePicker {
            stage: MainStage::Done,
            tt_move: ttm,
            killers: [BitMove::null(); 2],
            counter_move: BitMove::null(),
            good_captures: Vec::new(),
            good_idx: 0,
            bad_captures: Vec::new(),
            bad_idx: 0,
            quiets: Vec::new(),
            quiet_idx: 0,
            qstage: stage,
            qsearch: true,
            q_captures,
            q_idx: 0,
        }
    }

    pub fn next(&mut self, skip_quiets: bool) -> Option<BitMove> {
        if self.qsearch {
            return self.next_qsearch();
        }

        loop {
            match self.stage {
                MainStage::TtMove => {
                    self.stage.incr();
                    return Some(self.tt_move);
                }
                MainStage::GoodCaptures => {
                    if self.good_idx < self.good_captures.len() {
                        let m = self.good_captures[self.good_idx].bitmove();
                        self.good_idx += 1;
                        return Some(m);
                    }
                    self.stage.incr();
                }
                MainStage::KillerOne => {
                    self.stage.incr();
                    if self.killers[0] != BitMove::null() && !skip_quiets {
                        return Some(self.killers[0]);
                    }
                }
                MainStage::KillerTwo => {
                    self.stage.incr();
                    if self.killers[1] != BitMove::null() && !skip_quiets {
                        return Some(self.killers[1]);
                    }
                }
                MainStage::CounterMove => {
                    self.stage.incr();
                    if self.counter_move != BitMove::null() && !skip_quiets {
                        return Some(self.counter_move);
                    }
                }
                MainStage::Quiets => {
                    if skip_quiets {
                        self.stage.incr();
                        continue;
                    }
                    if self.quiet_idx < self.quiets.len() {
                        let m = self.quiets[self.quiet_idx].bitmove();
                        self.quiet_idx += 1;
                        return Some(m);
                    }
                    self.stage.incr();
                }
                MainStage::BadCaptures => {
                    if self.bad_idx < self.bad_captures.len() {
                        let m = self.bad_captures[self.bad_idx].bitmove();
                        self.bad_idx += 1;
                        return Some(m);
                    }
                    self.stage.incr();
                }
                MainStage::Done => return None,
            }
        }
    }

    fn next_qsearch(&mut self) -> Option<BitMove> {
        loop {
            match self.qstage {
                QStage::TtMove => {
                    self.qstage.incr();
                    return Some(self.tt_move);
                }
                QStage::Captures => {
                    if self.q_idx < self.q_captures.len() {
                        let m = self.q_captures[self.q_idx].bitmove();
                        self.q_idx += 1;
                        return Some(m);
                    }
                    self.qstage.incr();
                }
                QStage::Done => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::butterfly::ButterflyHistory;
    use crate::tables::capture_piece_history::CapturePieceToHistory;
    use crate::tables::continuation::PieceToHistory;
    use crate::tables::StatBoard;

    #[test]
    fn main_search_yields_tt_move_first() {
        let board = Board::start_pos();
        let main_hist = ButterflyHistory::new();
        let cap_hist = CapturePieceToHistory::new();
        let cont_hists: [*const PieceToHistory; 4] =
            [std::ptr::null(), std::ptr::null(), std::ptr::null(), std::ptr::null()];
        let ttm = BitMove::make_quiet(SQ(12), SQ(28)); // e2e4
        let mut picker = MovePicker::main_search(
            &board,
            4,
            &main_hist,
            &cap_hist,
            &cont_hists as *const _,
            ttm,
            [BitMove::null(), BitMove::null()],
            BitMove::null(),
        );
        assert_eq!(picker.next(false), Some(ttm));
    }

    #[test]
    fn qsearch_yields_only_captures() {
        let board = Board::new_from_fen(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
        )
        .unwrap();
        let main_hist = ButterflyHistory::new();
        let cap_hist = CapturePieceToHistory::new();
        let mut picker = MovePicker::qsearch(
            &board,
            0,
            BitMove::null(),
            &main_hist,
            &cap_hist,
            SQ::NO_SQ,
        );
        while let Some(m) = picker.next(false) {
            assert!(board.is_capture(m));
        }
    }
}
