//! Shared types and constants.
//!
//! Pure data with no external dependencies, usable from the core engine,
//! the renderer, and the input layer alike.
//!
//! # Board dimensions
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Timing
//!
//! Gravity advances the active piece one row every `DROP_INTERVAL_MS`
//! (1000 ms), accumulated from frame deltas. The host loop runs at a fixed
//! `TICK_MS` timestep and feeds elapsed time into the engine.

/// Board width in cells (12 columns).
pub const BOARD_WIDTH: u8 = 12;

/// Board height in cells (20 rows).
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval for the host loop in milliseconds (~60 FPS).
pub const TICK_MS: u32 = 16;

/// Gravity interval in milliseconds (one row per second).
pub const DROP_INTERVAL_MS: u32 = 1000;

/// Number of colors in the piece palette.
pub const COLOR_COUNT: u8 = 7;

/// Piece palette as RGB triples, indexed by color index.
pub const PALETTE: [(u8, u8, u8); COLOR_COUNT as usize] = [
    (0xFF, 0x0D, 0x72),
    (0x0D, 0xC2, 0xFF),
    (0x0D, 0xFF, 0x72),
    (0xF5, 0x38, 0xFF),
    (0xFF, 0x8E, 0x0D),
    (0xFF, 0xE1, 0x38),
    (0x38, 0x77, 0xFF),
];

/// Points awarded for the first full row found in a single clearing pass.
/// Each further row found in the same pass doubles the award (10, 20, 40, ...).
pub const BASE_ROW_SCORE: u32 = 10;

/// A cell on the game board.
///
/// - `None`: empty cell
/// - `Some(c)`: cell locked by a piece with color index `c` (0..`COLOR_COUNT`)
pub type Cell = Option<u8>;

/// Discrete input commands accepted by the engine.
///
/// Each command is an atomic, immediately-validated mutation of the active
/// piece; a colliding move is reverted and the piece does not move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move the active piece one column left.
    MoveLeft,
    /// Move the active piece one column right.
    MoveRight,
    /// Move the active piece one row down; locks the piece on collision.
    SoftDrop,
    /// Rotate the active piece, resolving wall kicks.
    Rotate,
}

impl Command {
    /// Parse a command from its string name (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotate" => Some(Command::Rotate),
            _ => None,
        }
    }

    /// Convert to the camelCase string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
        }
    }
}

/// One-shot event recorded by the engine when a spawn position collides.
///
/// The engine has already cleared the board and reset its own score counter
/// by the time the host observes this, so the final score value rides on the
/// event for the persistence collaborator's benefit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
}
