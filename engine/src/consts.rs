//! Constant values and static structures.
use lazy_static;

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use talon::tools::tt::TranspositionTable;
use talon::types::score::MATE;
//use time::time_management::TimeManager;

pub const MAX_PLY: u16 = 126;
pub const THREAD_STACK_SIZE: usize = MAX_PLY as usize + 7;
pub const MAX_THREADS: usize = 256;

/// Scores at or above this are a forced mate found within `MAX_PLY` -- `value_to_tt`/
/// `value_from_tt` shift a stored mate score by the searching ply so it stays correct
/// however deep in the tree the position that produced it is re-probed from.
pub const MATE_IN_MAX_PLY: i32 = MATE as i32 - MAX_PLY as i32;
pub const MATED_IN_MAX_PLY: i32 = -(MATE as i32) + MAX_PLY as i32;

pub const DEFAULT_TT_SIZE: usize = 256;

pub const PAWN_TABLE_SIZE: usize = 16384;
pub const MATERIAL_TABLE_SIZE: usize = 8192;

static INITALIZED: AtomicBool = AtomicBool::new(false);

/// Whether search output (`info ...`, `bestmove ...`) is printed to stdout. Disabled by tests
/// and by embedders driving the engine as a library rather than a UCI binary.
pub static USE_STDOUT: AtomicBool = AtomicBool::new(true);
/// Global Timer
//pub static TIMER: TimeManager = TimeManager::uninitialized();
//pub static TT_TABLE: TranspositionTable = unsafe {TranspositionTable::uninitialized()};
//pub static mut POSITION: Board = unsafe {Board::uninitialized()};

lazy_static! {
    pub static ref TT_TABLE: TranspositionTable = TranspositionTable::new(DEFAULT_TT_SIZE);
}

/// Returns access to the global transposition table.
#[inline(always)]
pub fn tt() -> &'static TranspositionTable {
    &TT_TABLE
}

pub fn init_globals() {
    if !INITALIZED.swap(true, Ordering::SeqCst) {
//        unsafe {
            lazy_static::initialize(&TT_TABLE);
//            POSITION.uninitialized_init();
//        }
    }
}

pub trait PVNode {
    fn is_pv() -> bool;
}

pub struct PV {}
pub struct NonPV {}

impl PVNode for PV {
    fn is_pv() -> bool {
        true
    }
}

impl PVNode for NonPV {
    fn is_pv() -> bool {
        false
    }
}

pub trait CheckState {
    fn in_check() -> bool;
}


pub struct InCheck {}
pub struct NoCheck {}

impl CheckState for InCheck {
    fn in_check() -> bool { true}
}

impl CheckState for NoCheck {
    fn in_check() -> bool { false}
}

//
//#[cfg(test)]
//mod tests {
//    use super::*;
//    #[test]
//    fn test_da() {
//        init_globals();
//
//    }
//}