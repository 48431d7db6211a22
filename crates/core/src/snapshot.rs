//! Read-only state copies for the render collaborator.
//!
//! The renderer consumes the board grid in integer form (0 = empty, color
//! index + 1 otherwise) plus the active and lookahead pieces. Snapshots are
//! plain `Copy` data so a host can take one per frame without touching the
//! session again.

use blockfall_types::{BOARD_HEIGHT, BOARD_WIDTH};

use crate::catalog::{Shape, TEMPLATES};
use crate::engine::Piece;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSnapshot {
    pub shape: Shape,
    pub color: u8,
    pub x: i8,
    pub y: i8,
}

impl From<&Piece> for PieceSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            shape: value.shape,
            color: value.color,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: PieceSnapshot,
    pub next: PieceSnapshot,
    pub score: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let placeholder = PieceSnapshot {
            shape: TEMPLATES[0],
            color: 0,
            x: 0,
            y: 0,
        };
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: placeholder,
            next: placeholder,
            score: 0,
        }
    }
}
