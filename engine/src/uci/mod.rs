//! The UCI text protocol surface: option storage and command-line parsing.
//!
//! The command dispatch loop itself lives in `engine::TalonSearcher::uci` -- this module only
//! owns the pieces that are pure parsing/state (`OptionsMap`, `parse_time`, the position/FEN
//! readers) so they can be unit tested without a running thread pool.

pub mod options;
pub mod parse;
