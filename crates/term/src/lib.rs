//! Terminal rendering for the game.
//!
//! The view layer is split in two: `game_view` turns a snapshot into a byte
//! buffer of queued terminal commands (pure apart from the encoding, so it
//! can be unit-tested), and `renderer` owns the terminal session and flushes
//! those buffers. Full redraw every frame; the board is small enough that
//! diffing is not worth the state.

pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use game_view::GameView;
pub use renderer::TerminalRenderer;
