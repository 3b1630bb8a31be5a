//! Time Management calculations for the searcher.
//!
//! Translates a UCI `go` time control into a soft limit (stop at the top of the next
//! iterative-deepening depth once exceeded) and a hard limit (abandon mid-search). Uses a
//! handful of fixed formulas rather than a move-importance curve fit: they are simple enough
//! that hard-coding them beats exposing another page of undocumented tuning constants.

use chrono;

use super::uci_timer::UCITimer;
use talon::Player;

use std::cell::UnsafeCell;
use std::time::Instant;

// TODO: These should be made into UCIOptions
const MIN_THINKING_TIME: i64 = 20;
const MOVE_OVERHEAD: i64 = 100;

pub struct TimeManager {
    ideal_time: UnsafeCell<i64>,
    maximum_time: UnsafeCell<i64>,
    start: UnsafeCell<Instant>,
}

unsafe impl Sync for TimeManager {}

impl TimeManager {
    pub fn uninitialized() -> TimeManager {
        TimeManager {
            ideal_time: UnsafeCell::new(0),
            maximum_time: UnsafeCell::new(0),
            start: UnsafeCell::new(Instant::now()),
        }
    }

    pub fn start_timer(&self, start: Instant) {
        unsafe {
            let self_start = self.start.get();
            *self_start = start;
        }
    }

    /// Computes soft/hard budgets from a `wtime`/`btime`(/`movestogo`) time control.
    ///
    /// `movetime` and other fixed limits bypass this entirely (`Searcher::check_time` reads
    /// `Limits::use_movetime` directly, so soft == hard == the requested value there).
    pub fn init(&self, start: Instant, timer: &UCITimer, turn: Player, _ply: u16) {
        let opponent = (turn as usize) ^ 1;
        let my_time = timer.time_msec[turn as usize].max(0);
        let my_inc = timer.inc_msec[turn as usize].max(0);
        let opp_time = timer.time_msec[opponent].max(0);

        // Non-zero only when we hold a time edge over the opponent; scales with the gap so a
        // large lead lets us spend a little more per move without ever dominating the budget.
        let enemy_low_time_bonus = if my_time > opp_time {
            (my_time - opp_time) / 8
        } else {
            0
        };

        let (soft, hard) = if timer.moves_to_go > 0 {
            let moves_to_go = timer.moves_to_go as i64;
            let mut hard = my_time / moves_to_go + my_inc / 2 + enemy_low_time_bonus;
            if moves_to_go == 1 {
                hard /= 2;
            }
            (hard / 2, hard)
        } else {
            let hard = my_time / 4 + my_inc / 2 + enemy_low_time_bonus;
            (hard / 12, hard)
        };

        let hard = (hard - MOVE_OVERHEAD).max(MIN_THINKING_TIME);
        let soft = soft.max(MIN_THINKING_TIME).min(hard);

        unsafe {
            let self_start = self.start.get();
            let self_ideal = self.ideal_time.get();
            let self_max = self.maximum_time.get();
            *self_start = start;
            *self_ideal = soft;
            *self_max = hard;
        }
    }

    pub fn start(&self) -> Instant {
        unsafe { *self.start.get() }
    }

    pub fn elapsed(&self) -> i64 {
        let start = self.start();
        chrono::Duration::from_std(start.elapsed())
            .unwrap()
            .num_milliseconds()
    }

    #[inline(always)]
    pub fn maximum_time(&self) -> i64 {
        unsafe { *self.maximum_time.get() }
    }

    #[inline(always)]
    pub fn ideal_time(&self) -> i64 {
        unsafe { *self.ideal_time.get() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wtime_only_scales_with_remaining_and_increment() {
        let timer = UCITimer {
            time_msec: [120_000, 100_000],
            inc_msec: [6_000, 0],
            moves_to_go: 0,
        };
        let time_man = TimeManager::uninitialized();
        time_man.init(Instant::now(), &timer, Player::White, 0);
        let hard = time_man.maximum_time();
        let soft = time_man.ideal_time();
        // hard ~= 120000/4 + 3000 + bonus(20000/8=2500) - overhead(100) = 35400
        assert_eq!(hard, 120_000 / 4 + 3_000 + 2_500 - MOVE_OVERHEAD);
        assert!(soft <= hard);
        assert!(soft > 0);
    }

    #[test]
    fn movestogo_one_halves_hard_limit() {
        let timer = UCITimer {
            time_msec: [10_000, 10_000],
            inc_msec: [0, 0],
            moves_to_go: 1,
        };
        let time_man = TimeManager::uninitialized();
        time_man.init(Instant::now(), &timer, Player::White, 0);
        // hard = (10000/1 + 0 + 0) / 2 - overhead
        assert_eq!(time_man.maximum_time(), 10_000 / 2 - MOVE_OVERHEAD);
    }

    #[test]
    fn no_time_edge_means_no_bonus() {
        let timer = UCITimer {
            time_msec: [30_000, 30_000],
            inc_msec: [0, 0],
            moves_to_go: 0,
        };
        let time_man = TimeManager::uninitialized();
        time_man.init(Instant::now(), &timer, Player::White, 0);
        assert_eq!(time_man.maximum_time(), 30_000 / 4 - MOVE_OVERHEAD);
    }
}
