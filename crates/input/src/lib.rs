//! Keyboard input handling.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
