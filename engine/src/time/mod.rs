//! Translating UCI time controls into search budgets.
//!
//! `uci_timer` models the `go` command's time-control parameters (`PreLimits` ->
//! `Limits`/`LimitsType`); `time_management` turns a `wtime`/`btime`(/`movestogo`) control into
//! the soft/hard millisecond budgets `Searcher::search_root`/`check_time` poll against.

pub mod time_management;
pub mod uci_timer;

use time_management::TimeManager;

lazy_static! {
    static ref TIMER: TimeManager = TimeManager::uninitialized();
}

/// Returns access to the global time manager shared by every search thread.
#[inline(always)]
pub fn timer() -> &'static TimeManager {
    &TIMER
}
