//! GameView: encodes a `core::GameSnapshot` as terminal commands.
//!
//! Composition (board plus active piece) is a pure function over the
//! snapshot so it can be unit-tested; the encoding just walks the composed
//! grid and queues crossterm commands into a caller-owned buffer.

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use blockfall_core::{GameSnapshot, PieceSnapshot};
use blockfall_types::{BOARD_HEIGHT, BOARD_WIDTH, PALETTE};

/// A lightweight terminal view for the falling-block game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Encode a full-frame redraw into `out`.
    ///
    /// `banner` is drawn centered over the board when present.
    pub fn encode_into(
        &self,
        snap: &GameSnapshot,
        banner: Option<&str>,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        let grid = compose_grid(snap);
        let board_px_w = BOARD_WIDTH as u16 * self.cell_w;

        out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border(out, board_px_w)?;

        for y in 0..BOARD_HEIGHT as u16 {
            out.queue(cursor::MoveTo(1, 1 + y))?;
            let mut current: Option<u8> = None;
            for x in 0..BOARD_WIDTH as usize {
                let v = grid[y as usize][x];
                if v == 0 {
                    out.queue(ResetColor)?;
                    current = None;
                    for _ in 0..self.cell_w {
                        out.queue(Print(' '))?;
                    }
                } else {
                    if current != Some(v) {
                        out.queue(SetForegroundColor(palette_color(v - 1)))?;
                        current = Some(v);
                    }
                    for _ in 0..self.cell_w {
                        out.queue(Print('█'))?;
                    }
                }
            }
        }
        out.queue(ResetColor)?;

        self.draw_side_panel(out, snap, board_px_w)?;

        if let Some(text) = banner {
            self.draw_banner(out, board_px_w, text)?;
        }

        Ok(())
    }

    fn draw_border(&self, out: &mut Vec<u8>, board_px_w: u16) -> Result<()> {
        let w = board_px_w + 2;
        let h = BOARD_HEIGHT as u16 + 2;

        out.queue(ResetColor)?;
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(Print('┌'))?;
        for _ in 0..w - 2 {
            out.queue(Print('─'))?;
        }
        out.queue(Print('┐'))?;

        for y in 1..h - 1 {
            out.queue(cursor::MoveTo(0, y))?;
            out.queue(Print('│'))?;
            out.queue(cursor::MoveTo(w - 1, y))?;
            out.queue(Print('│'))?;
        }

        out.queue(cursor::MoveTo(0, h - 1))?;
        out.queue(Print('└'))?;
        for _ in 0..w - 2 {
            out.queue(Print('─'))?;
        }
        out.queue(Print('┘'))?;
        Ok(())
    }

    fn draw_side_panel(&self, out: &mut Vec<u8>, snap: &GameSnapshot, board_px_w: u16) -> Result<()> {
        let panel_x = board_px_w + 4;

        out.queue(ResetColor)?;
        out.queue(cursor::MoveTo(panel_x, 1))?;
        out.queue(Print("SCORE"))?;
        out.queue(cursor::MoveTo(panel_x, 2))?;
        out.queue(Print(snap.score))?;

        out.queue(cursor::MoveTo(panel_x, 4))?;
        out.queue(Print("NEXT"))?;
        self.draw_preview(out, &snap.next, panel_x, 5)?;
        out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_preview(
        &self,
        out: &mut Vec<u8>,
        piece: &PieceSnapshot,
        panel_x: u16,
        panel_y: u16,
    ) -> Result<()> {
        out.queue(SetForegroundColor(palette_color(piece.color)))?;
        for (dx, dy) in piece.shape.filled_cells() {
            let px = panel_x + dx as u16 * self.cell_w;
            let py = panel_y + dy as u16;
            out.queue(cursor::MoveTo(px, py))?;
            for _ in 0..self.cell_w {
                out.queue(Print('█'))?;
            }
        }
        Ok(())
    }

    fn draw_banner(&self, out: &mut Vec<u8>, board_px_w: u16, text: &str) -> Result<()> {
        let text_w = text.chars().count() as u16;
        let x = 1 + (board_px_w.saturating_sub(text_w)) / 2;
        let y = 1 + BOARD_HEIGHT as u16 / 2;
        out.queue(ResetColor)?;
        out.queue(cursor::MoveTo(x, y))?;
        out.queue(Print(text))?;
        Ok(())
    }
}

/// Board grid with the active piece overlaid, in integer form
/// (0 = empty, color index + 1 otherwise). Cells above the top edge are
/// clipped.
pub fn compose_grid(
    snap: &GameSnapshot,
) -> [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize] {
    let mut grid = snap.board;
    for (dx, dy) in snap.active.shape.filled_cells() {
        let x = snap.active.x + dx;
        let y = snap.active.y + dy;
        if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
            grid[y as usize][x as usize] = snap.active.color + 1;
        }
    }
    grid
}

fn palette_color(color_index: u8) -> Color {
    let (r, g, b) = PALETTE[color_index as usize % PALETTE.len()];
    Color::Rgb { r, g, b }
}
