//! Board representation, move generation, and classical evaluation for the Talon chess engine.
//!
//! This package is separated into two parts. Firstly, the board representation & associated functions
//! (the current crate, `talon`), and secondly, the lazy-SMP search and UCI driver built on top of
//! these foundations, `talon_engine`.
//!
//! # Usage
//!
//! This crate is used by adding `talon` to the dependencies in your project's `Cargo.toml`.
//!
//! # Safety
//!
//! While generally a safe library, talon was built with a focus of speed in mind. Usage of methods must be followed
//! carefully, as there are many possible ways to `panic` unexpectedly. Methods with the ability to panic will be
//! documented as such.
//!
//! # Examples
//!
//! You can create a [`Board`] with the starting position like so:
//!
//! ```ignore
//! use talon::Board;
//! let board = Board::start_pos();
//! ```
//!
//! Generating a list of moves (Contained inside a [`MoveList`]) can be done with:
//!
//! ```ignore
//! let list = board.generate_moves();
//! ```
//!
//! Applying and undoing moves is simple:
//!
//! ```ignore
//! let mut board = Board::start_pos();
//! let list = board.generate_moves();
//!
//! for mov in list.iter() {
//!     board.apply_move(*mov);
//!     println!("{}",board.get_fen());
//!     board.undo_move();
//! }
//! ```
//!
//! Using fen strings is also supported:
//!
//! ```ignore
//! let start_position = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
//! let board = Board::from_fen(start_position).unwrap();
//! ```
//!
//! [`MoveList`]: core/move_list/struct.MoveList.html
//! [`Board`]: board/struct.Board.html

#![allow(dead_code)]

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
extern crate rand;

pub mod types;
pub mod board;
pub mod helper;
pub mod tools;

pub use board::Board;
pub use types::piece_move::{BitMove,ScoringMove};
pub use types::move_list::{MoveList,ScoringMoveList};
pub use types::sq::SQ;
pub use types::bitboard::BitBoard;
pub use helper::Helper;
pub use types::{Player, Piece, PieceType, Rank, File};
pub use board::accumulator::{DirtyPiece, PieceDelta};
