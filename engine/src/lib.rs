//! Lazy-SMP search, NNUE evaluation, and the UCI driver for the Talon chess engine.
//!
//! This crate is not intended to be used by other crates as a dependency, as it's mostly useful as a direct
//! executable.
//!
//! If you are interested in using the direct chess library functions (the boards, move generation, etc), please
//! checkout the core library, `talon`.
//!

#![allow(dead_code)]

extern crate num_cpus;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
extern crate rand;
extern crate talon;
extern crate chrono;
extern crate byteorder;

pub mod endgame;
pub mod threadpool;
pub mod sync;
pub mod time;
pub mod consts;
pub mod uci;
pub mod root_moves;
pub mod movepick;
pub mod tables;
pub mod nnue;
pub mod engine;
pub mod search;

pub use consts::*;