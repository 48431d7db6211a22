//! Core game-state engine - pure, deterministic, and testable
//!
//! This crate contains the whole simulation: board, piece catalog, collision
//! detection, merge-on-lock, line clearing, rotation with wall kicks, and the
//! gravity tick. It has **zero dependencies** on UI, networking, or I/O:
//!
//! - **Deterministic**: same seed produces the same piece sequence
//! - **Synchronous**: every operation is a total function over board/piece
//!   state; illegal moves are rejected, never raised as errors
//! - **Single session**: all mutable state lives on one [`Game`] value owned
//!   by the host - no process-wide globals
//!
//! # Module structure
//!
//! - [`board`]: 12x20 grid of locked cells with row scanning and clearing
//! - [`catalog`]: the 7 fixed shape templates and the random spawn policy
//! - [`engine`]: the [`Game`] session - tick, commands, lock, reset
//! - [`rng`]: seeded LCG backing the spawn policy
//! - [`snapshot`]: read-only state copies for the render collaborator
//!
//! # Game rules
//!
//! One gravity step per second; move/rotate/soft-drop commands validated
//! against the board before committing; full rows clear bottom-up with a
//! doubling per-pass award (10, 20, 40, ...); a blocked spawn clears the
//! board, zeroes the score, and records a single game-over event - the
//! session keeps running on the fresh board.
//!
//! # Example
//!
//! ```
//! use blockfall_core::Game;
//! use blockfall_types::Command;
//!
//! let mut game = Game::new(12345);
//! game.apply(Command::MoveLeft);
//! game.apply(Command::Rotate);
//!
//! // One second of elapsed time triggers a gravity step.
//! game.tick(1000);
//! ```

pub mod board;
pub mod catalog;
pub mod engine;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::Board;
pub use catalog::{Shape, TEMPLATES, TEMPLATE_COUNT};
pub use engine::{collides, merge, Game, Piece};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, PieceSnapshot};
