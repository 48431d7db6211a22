//! Engine module - the game session
//!
//! Ties the board, the piece catalog, and the RNG together into one [`Game`]
//! value: gravity ticks, validated move/rotate commands, merge-on-lock, line
//! clearing, and reset-on-overflow. The session object owns all mutable
//! state; the host drives it with [`Game::tick`] and [`Game::apply`] and
//! reads it back through accessors or [`Game::snapshot`].

use blockfall_types::{Command, GameOver, BASE_ROW_SCORE, BOARD_HEIGHT, BOARD_WIDTH, DROP_INTERVAL_MS};

use crate::board::Board;
use crate::catalog::{random_template, Shape};
use crate::rng::SimpleRng;
use crate::snapshot::{GameSnapshot, PieceSnapshot};

/// The active falling piece: a shape matrix tagged with a palette color and
/// a top-left board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub shape: Shape,
    pub color: u8,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Spawn a new piece: uniformly random template and color, horizontally
    /// centered, at the top row.
    pub fn spawn(rng: &mut SimpleRng) -> Self {
        let (shape, color) = random_template(rng);
        Self {
            shape,
            color,
            x: spawn_x(shape.width()),
            y: 0,
        }
    }

    /// Check this piece against the board; see [`collides`].
    pub fn collides(&self, board: &Board) -> bool {
        collides(board, self)
    }
}

/// Horizontal spawn position for a shape of the given width (centered).
fn spawn_x(shape_width: u8) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape_width / 2) as i8
}

/// Collision detection: true if any filled shape cell maps outside the
/// board's columns, at or below the bottom row, or onto an occupied cell.
///
/// Rows above the top (`y < 0`) are tolerated so freshly spawned or kicked
/// pieces may overhang the visible board. A shape with no filled cells is
/// always colliding (fail-safe: the degenerate state can never be committed).
pub fn collides(board: &Board, piece: &Piece) -> bool {
    if piece.shape.is_empty() {
        return true;
    }

    for (dx, dy) in piece.shape.filled_cells() {
        let x = piece.x + dx;
        let y = piece.y + dy;

        if x < 0 || x >= BOARD_WIDTH as i8 {
            return true;
        }
        if y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            continue;
        }
        if board.is_occupied(x, y) {
            return true;
        }
    }

    false
}

/// Merge (lock): write the piece's color index into every board cell
/// covered by a filled shape cell. Callers must have verified the position
/// does not collide; cells above the top row are skipped.
pub fn merge(board: &mut Board, piece: &Piece) {
    for (dx, dy) in piece.shape.filled_cells() {
        board.set(piece.x + dx, piece.y + dy, Some(piece.color));
    }
}

/// One game session: board, score, active and lookahead piece, and the RNG
/// feeding the spawn policy.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Piece,
    next: Piece,
    score: u32,
    rng: SimpleRng,
    drop_timer_ms: u32,
    /// Pending game-over event, taken by the host.
    game_over: Option<GameOver>,
}

impl Game {
    /// Create a new session with the given RNG seed.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let active = Piece::spawn(&mut rng);
        let next = Piece::spawn(&mut rng);

        Self {
            board: Board::new(),
            active,
            next,
            score: 0,
            rng,
            drop_timer_ms: 0,
            game_over: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, for hosts that pre-seed a scenario and for
    /// tests. Gameplay itself only mutates the board through lock/clear.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Take the pending game-over event, if any. The event is recorded at
    /// most once per blocked spawn; taking it clears the slot.
    pub fn take_game_over(&mut self) -> Option<GameOver> {
        self.game_over.take()
    }

    /// Advance wall-clock time. Accumulates frame deltas and performs one
    /// gravity step per elapsed `DROP_INTERVAL_MS`. Returns true when a
    /// gravity step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms < DROP_INTERVAL_MS {
            return false;
        }
        self.drop_timer_ms = 0;
        self.gravity_step();
        true
    }

    /// One gravity step: move down, or lock at the last valid position.
    fn gravity_step(&mut self) {
        self.active.y += 1;
        if self.active.collides(&self.board) {
            self.active.y -= 1;
            self.lock_active();
        }
    }

    /// Apply a discrete input command. Returns true if the active piece
    /// changed (for soft-drop, true means the piece moved down; false means
    /// it locked instead).
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.try_shift(-1),
            Command::MoveRight => self.try_shift(1),
            Command::SoftDrop => self.soft_drop(),
            Command::Rotate => self.rotate(),
        }
    }

    /// Tentatively shift horizontally; revert exactly that delta on collision.
    fn try_shift(&mut self, dx: i8) -> bool {
        self.active.x += dx;
        if self.active.collides(&self.board) {
            self.active.x -= dx;
            return false;
        }
        true
    }

    /// Soft drop: one row down, locking through the same sequence as
    /// gravity when the move collides.
    fn soft_drop(&mut self) -> bool {
        self.active.y += 1;
        if self.active.collides(&self.board) {
            self.active.y -= 1;
            self.lock_active();
            return false;
        }
        true
    }

    /// Rotate the active piece, resolving collisions with horizontal kicks.
    ///
    /// Kicks are cumulative offsets following the alternating sequence
    /// +1, -2, +3, -4, ... (`offset = -(offset + signum(offset))`). Once the
    /// offset exceeds the rotated shape's width the rotation is abandoned:
    /// original shape and horizontal position are restored, the vertical
    /// position is left unchanged.
    pub fn rotate(&mut self) -> bool {
        let original_shape = self.active.shape;
        let original_x = self.active.x;
        let rotated = original_shape.rotated();

        self.active.shape = rotated;
        let mut offset: i8 = 1;
        while self.active.collides(&self.board) {
            self.active.x += offset;
            offset = -(offset + offset.signum());
            if offset > rotated.width() as i8 {
                self.active.shape = original_shape;
                self.active.x = original_x;
                return false;
            }
        }
        true
    }

    /// Lock the active piece and run the post-lock sequence. Order matters:
    /// merge, then spawn (which tests for overflow against the pre-clear
    /// board), then line clearing.
    fn lock_active(&mut self) {
        merge(&mut self.board, &self.active);
        self.piece_reset();
        self.remove_rows();
    }

    /// Promote the lookahead piece to active and refill the lookahead. A
    /// colliding spawn position is the sole termination condition: the board
    /// is cleared, the score resets to 0, and one game-over event is
    /// recorded. The session keeps running on the fresh board.
    fn piece_reset(&mut self) {
        self.active = self.next;
        self.next = Piece::spawn(&mut self.rng);

        if self.active.collides(&self.board) {
            let final_score = self.score;
            self.board.clear();
            self.score = 0;
            self.drop_timer_ms = 0;
            self.game_over = Some(GameOver { score: final_score });
        }
    }

    /// Clear full rows bottom-up and award the doubling per-pass score.
    ///
    /// The scan bound excludes the topmost row (`y > 0`): a full top row is
    /// never clearable. That boundary is pinned by a test.
    fn remove_rows(&mut self) {
        let mut base: u32 = 1;
        let mut y = (BOARD_HEIGHT - 1) as usize;

        while y > 0 {
            if self.board.is_row_full(y) {
                self.board.remove_row(y);
                self.score += base * BASE_ROW_SCORE;
                base *= 2;
                // A new row shifted into index y; re-examine it.
            } else {
                y -= 1;
            }
        }
    }

    /// Write the render-facing state into an existing snapshot.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = PieceSnapshot::from(&self.active);
        out.next = PieceSnapshot::from(&self.next);
        out.score = self.score;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TEMPLATES;

    fn piece_at(template: usize, x: i8, y: i8) -> Piece {
        Piece {
            shape: TEMPLATES[template],
            color: 2,
            x,
            y,
        }
    }

    #[test]
    fn test_new_game() {
        let game = Game::new(12345);

        assert_eq!(game.score(), 0);
        assert_eq!(game.board().occupied_count(), 0);
        assert_eq!(game.active().y, 0);
    }

    #[test]
    fn test_spawn_is_centered() {
        // I template (width 4): floor(12/2) - floor(4/2) = 4
        assert_eq!(spawn_x(4), 4);
        // O template (width 2): 6 - 1 = 5
        assert_eq!(spawn_x(2), 5);
        // 3-wide templates: 6 - 1 = 5
        assert_eq!(spawn_x(3), 5);
    }

    #[test]
    fn test_same_seed_same_piece_sequence() {
        let a = Game::new(777);
        let b = Game::new(777);

        assert_eq!(a.active(), b.active());
        assert_eq!(a.next_piece(), b.next_piece());
    }

    #[test]
    fn test_collides_out_of_column_bounds() {
        let board = Board::new();

        let left = piece_at(1, -1, 0);
        assert!(collides(&board, &left));

        let right = piece_at(1, (BOARD_WIDTH - 1) as i8, 0);
        assert!(collides(&board, &right));
    }

    #[test]
    fn test_collides_below_bottom() {
        let board = Board::new();
        let piece = piece_at(1, 4, (BOARD_HEIGHT - 1) as i8);
        assert!(collides(&board, &piece));
    }

    #[test]
    fn test_rows_above_top_are_tolerated() {
        let board = Board::new();
        // O piece with its top row above the board.
        let piece = piece_at(1, 4, -1);
        assert!(!collides(&board, &piece));
    }

    #[test]
    fn test_collides_on_occupied_cell() {
        let mut board = Board::new();
        board.set(4, 1, Some(0));

        let piece = piece_at(1, 4, 0);
        assert!(collides(&board, &piece));
    }

    #[test]
    fn test_empty_shape_always_collides() {
        let board = Board::new();
        let degenerate = Piece {
            shape: Shape::from_rows([[0]]),
            color: 0,
            x: 4,
            y: 4,
        };
        assert!(collides(&board, &degenerate));
    }

    #[test]
    fn test_merge_writes_color_and_preserves_count() {
        let mut board = Board::new();
        board.set(0, 0, Some(5));

        let piece = piece_at(1, 4, 10);
        assert!(!collides(&board, &piece));

        let before = board.occupied_count();
        merge(&mut board, &piece);

        assert_eq!(board.occupied_count(), before + 4);
        assert_eq!(board.get(4, 10), Some(Some(2)));
        assert_eq!(board.get(5, 11), Some(Some(2)));
        // Pre-existing cell untouched.
        assert_eq!(board.get(0, 0), Some(Some(5)));
    }

    #[test]
    fn test_colliding_move_leaves_position_unchanged() {
        let mut game = Game::new(12345);

        // Walk the piece into the left wall.
        for _ in 0..BOARD_WIDTH {
            game.apply(Command::MoveLeft);
        }
        let at_wall = *game.active();

        assert!(!game.apply(Command::MoveLeft));
        assert_eq!(*game.active(), at_wall);
    }

    #[test]
    fn test_tick_accumulates_to_gravity() {
        let mut game = Game::new(12345);
        let y0 = game.active().y;

        assert!(!game.tick(400));
        assert!(!game.tick(400));
        assert_eq!(game.active().y, y0);

        assert!(game.tick(400));
        assert_eq!(game.active().y, y0 + 1);
    }

    #[test]
    fn test_soft_drop_moves_or_locks() {
        let mut game = Game::new(12345);
        let y0 = game.active().y;

        assert!(game.apply(Command::SoftDrop));
        assert_eq!(game.active().y, y0 + 1);

        // Drop until it locks; the board then holds the merged cells.
        while game.apply(Command::SoftDrop) {}
        assert_eq!(game.board().occupied_count(), 4);
        // Lookahead was promoted to a fresh spawn.
        assert_eq!(game.active().y, 0);
    }

    #[test]
    fn test_rotate_at_left_wall_kicks_or_restores() {
        let mut game = Game::new(12345);
        for _ in 0..BOARD_WIDTH {
            game.apply(Command::MoveLeft);
        }

        let before = *game.active();
        let rotated = game.rotate();

        if rotated {
            assert!(game.active().x >= 0);
            assert!(!game.active().collides(game.board()));
        } else {
            assert_eq!(*game.active(), before);
        }
    }

    #[test]
    fn test_failed_rotation_keeps_vertical_position() {
        let mut game = Game::new(12345);
        // Box the piece in completely so no kick can succeed.
        let active = *game.active();
        for x in 0..BOARD_WIDTH as i8 {
            for dy in 0..4 {
                let row = active.y + dy;
                let covered = active
                    .shape
                    .filled_cells()
                    .into_iter()
                    .any(|(fx, fy)| active.x + fx == x && active.y + fy == row);
                if !covered {
                    game.board_mut().set(x, row, Some(0));
                }
            }
        }

        let before = *game.active();
        if !game.rotate() {
            assert_eq!(game.active().shape, before.shape);
            assert_eq!(game.active().x, before.x);
            assert_eq!(game.active().y, before.y);
        }
    }

    #[test]
    fn test_single_row_clear_scores_ten() {
        let mut game = Game::new(1);
        let bottom = (BOARD_HEIGHT - 1) as i8;
        for x in 0..BOARD_WIDTH as i8 {
            game.board_mut().set(x, bottom, Some(0));
        }
        game.board_mut().set(0, bottom - 1, Some(1));

        game.remove_rows();

        assert_eq!(game.score(), 10);
        assert!(!game.board().is_row_full((BOARD_HEIGHT - 1) as usize));
        // The marker above the cleared row shifted down by one.
        assert_eq!(game.board().get(0, bottom), Some(Some(1)));
    }

    #[test]
    fn test_double_row_clear_scores_thirty() {
        let mut game = Game::new(1);
        let h = BOARD_HEIGHT as i8;
        for x in 0..BOARD_WIDTH as i8 {
            game.board_mut().set(x, h - 1, Some(0));
            game.board_mut().set(x, h - 2, Some(3));
        }

        game.remove_rows();

        // 10 for the first row, 20 for the second: 30, not 2 x 10.
        assert_eq!(game.score(), 30);
        assert_eq!(game.board().occupied_count(), 0);
    }

    #[test]
    fn test_full_top_row_survives_scan() {
        let mut game = Game::new(1);
        for x in 0..BOARD_WIDTH as i8 {
            game.board_mut().set(x, 0, Some(0));
        }

        game.remove_rows();

        // Scan bound excludes row 0: the full top row is not clearable.
        assert!(game.board().is_row_full(0));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_blocked_spawn_clears_board_and_raises_once() {
        let mut game = Game::new(12345);
        game.score = 120;

        // Fill everything below the top rows so the next spawn collides
        // after the active piece locks.
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                game.board_mut().set(x, y, Some(0));
            }
        }

        game.piece_reset();

        let event = game.take_game_over();
        assert_eq!(event, Some(GameOver { score: 120 }));
        // Exactly one event per blocked spawn.
        assert_eq!(game.take_game_over(), None);

        assert_eq!(game.score(), 0);
        assert_eq!(game.board().occupied_count(), 0);
        // The session keeps running: a fresh active piece is in place.
        assert!(!game.active().collides(game.board()));
    }

    #[test]
    fn test_gravity_lock_merges_at_last_valid_position() {
        let mut game = Game::new(12345);
        let color = game.active().color;

        // Run gravity until the first piece locks.
        while game.board().occupied_count() == 0 {
            game.tick(DROP_INTERVAL_MS);
        }

        assert_eq!(game.board().occupied_count(), 4);
        assert!(game
            .board()
            .cells()
            .iter()
            .any(|cell| *cell == Some(color)));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = Game::new(12345);
        game.board_mut().set(0, 19, Some(4));

        let snap = game.snapshot();
        assert_eq!(snap.board[19][0], 5);
        assert_eq!(snap.score, game.score());
        assert_eq!(snap.active.x, game.active().x);
        assert_eq!(snap.next.color, game.next_piece().color);
    }
}
