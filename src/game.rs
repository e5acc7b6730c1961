//! Core game state and logic

use crate::bag::{Bag, PieceQueue, QUEUE_LEN};
use crate::board::{BOARD_WIDTH, Board, Cell};
use crate::piece::{MoveDirection, PieceController};
use crate::srs::ShapeTables;
use crate::tetromino::{RotationDirection, Shape};
use std::sync::Arc;
use tracing::{debug, info};

/// Commands the game can process, one per step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    HardDrop,
    Hold,
    /// Replace the active piece with the next queued one
    ForceRespawn,
    Quit,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// A locked piece left blocks in the hidden buffer rows
    ToppedOut,
    /// A new piece found no open position
    SpawnBlocked,
    Quit,
}

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver(EndReason),
}

/// Outcome of a single [`Game::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// The command changed the game (a failed move or rotation is not)
    pub accepted: bool,
    /// A piece was locked into the board
    pub locked: bool,
    /// Rows removed after the lock
    pub lines_cleared: usize,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    controller: PieceController,
    queue: PieceQueue,
    state: GameState,
    lines_cleared: u64,
    pieces_locked: u64,
}

impl Game {
    /// Create a new game with an entropy-seeded bag
    pub fn new(tables: Arc<ShapeTables>) -> Self {
        Self::with_bag(tables, Bag::new())
    }

    /// Create a new game with a fixed seed
    pub fn with_seed(tables: Arc<ShapeTables>, seed: u64) -> Self {
        Self::with_bag(tables, Bag::with_seed(seed))
    }

    fn with_bag(tables: Arc<ShapeTables>, bag: Bag) -> Self {
        let mut game = Self {
            board: Board::new(),
            controller: PieceController::new(tables),
            queue: PieceQueue::new(bag),
            state: GameState::Playing,
            lines_cleared: 0,
            pieces_locked: 0,
        };
        game.spawn_next();
        game
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn has_ended(&self) -> bool {
        matches!(self.state, GameState::GameOver(_))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Visible rows only, top to bottom
    pub fn visible_board(&self) -> Vec<[Cell; BOARD_WIDTH]> {
        self.board.visible_rows().map(|(_, row)| *row).collect()
    }

    pub fn active_shape(&self) -> Option<Shape> {
        self.controller.active().map(|piece| piece.shape)
    }

    pub fn active_cells(&self) -> Option<[(i32, i32); 4]> {
        self.controller.active_cells()
    }

    pub fn ghost_cells(&self) -> Option<[(i32, i32); 4]> {
        self.controller.ghost_cells(&self.board)
    }

    pub fn hold(&self) -> Option<Shape> {
        self.controller.held()
    }

    /// Get preview of next pieces
    pub fn preview(&self) -> [Shape; QUEUE_LEN] {
        self.queue.preview()
    }

    pub fn lines_cleared(&self) -> u64 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u64 {
        self.pieces_locked
    }

    /// Apply one command and resolve everything it triggers
    pub fn step(&mut self, command: Command) -> StepReport {
        if self.has_ended() {
            return StepReport::default();
        }

        let mut report = StepReport::default();
        match command {
            Command::MoveLeft => {
                report.accepted = self.controller.move_piece(MoveDirection::Left, &self.board);
            }
            Command::MoveRight => {
                report.accepted = self.controller.move_piece(MoveDirection::Right, &self.board);
            }
            Command::SoftDrop => {
                // Resting pieces lock on a failed soft drop
                report.accepted = true;
                if !self.controller.move_piece(MoveDirection::Down, &self.board)
                    && self.controller.lock(&mut self.board).is_some()
                {
                    self.after_lock(&mut report);
                }
            }
            Command::RotateCw => {
                report.accepted = self
                    .controller
                    .rotate(RotationDirection::Clockwise, &self.board);
            }
            Command::RotateCcw => {
                report.accepted = self
                    .controller
                    .rotate(RotationDirection::CounterClockwise, &self.board);
            }
            Command::HardDrop => {
                if let Some(distance) = self.controller.hard_drop(&mut self.board) {
                    debug!("Hard drop of {} rows", distance);
                    report.accepted = true;
                    self.after_lock(&mut report);
                }
            }
            Command::Hold => {
                report.accepted = true;
                if !self.controller.hold(&self.board, &mut self.queue) {
                    self.end(EndReason::SpawnBlocked);
                }
            }
            Command::ForceRespawn => {
                report.accepted = true;
                self.spawn_next();
            }
            Command::Quit => {
                report.accepted = true;
                self.end(EndReason::Quit);
            }
        }
        report
    }

    /// Loss check, line clear and respawn following a lock
    fn after_lock(&mut self, report: &mut StepReport) {
        report.locked = true;
        self.pieces_locked += 1;

        if self.board.is_topped_out() {
            self.end(EndReason::ToppedOut);
            return;
        }

        let full_rows = self.board.find_full_rows();
        if !full_rows.is_empty() {
            debug!("Clearing rows {:?}", full_rows);
            self.board.collapse_rows(&full_rows);
            report.lines_cleared = full_rows.len();
            self.lines_cleared += full_rows.len() as u64;
        }

        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        let shape = self.queue.dequeue();
        if !self.controller.spawn(shape, &self.board) {
            self.end(EndReason::SpawnBlocked);
        }
    }

    fn end(&mut self, reason: EndReason) {
        info!(
            "Game over ({:?}) after {} pieces, {} lines",
            reason, self.pieces_locked, self.lines_cleared
        );
        self.state = GameState::GameOver(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BUFFER_HEIGHT, TOTAL_HEIGHT, VISIBLE_HEIGHT};
    use crate::piece::SPAWN_ROW;

    const BOTTOM: i32 = TOTAL_HEIGHT as i32 - 1;

    fn game() -> Game {
        Game::with_seed(Arc::new(ShapeTables::new()), 1234)
    }

    /// Replace the active piece with `shape` at the spawn anchor
    fn force(game: &mut Game, shape: Shape) {
        assert!(game.controller.spawn(shape, &game.board));
    }

    #[test]
    fn test_new_game_has_active_piece_and_full_queue() {
        let game = game();
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.active_cells().is_some());
        assert_eq!(game.preview().len(), QUEUE_LEN);
        assert_eq!(game.hold(), None);
        assert_eq!(game.visible_board().len(), VISIBLE_HEIGHT);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = game();
        let mut b = game();
        for _ in 0..20 {
            assert_eq!(a.active_shape(), b.active_shape());
            assert_eq!(a.preview(), b.preview());
            a.step(Command::ForceRespawn);
            b.step(Command::ForceRespawn);
        }
    }

    #[test]
    fn test_first_piece_comes_off_the_queue() {
        let tables = Arc::new(ShapeTables::new());
        let mut reference = Bag::with_seed(77);
        let game = Game::with_seed(tables, 77);
        assert_eq!(game.active_shape(), Some(reference.draw_one()));
        let upcoming: Vec<_> = (0..QUEUE_LEN).map(|_| reference.draw_one()).collect();
        assert_eq!(game.preview().to_vec(), upcoming);
    }

    #[test]
    fn test_failed_move_is_not_accepted() {
        let mut game = game();
        force(&mut game, Shape::O);
        while game.step(Command::MoveLeft).accepted {}
        let cells = game.active_cells();
        let report = game.step(Command::MoveLeft);
        assert!(!report.accepted);
        assert_eq!(game.active_cells(), cells);
    }

    #[test]
    fn test_soft_drop_locks_when_resting() {
        let mut game = game();
        force(&mut game, Shape::O);
        let mut locked = false;
        for _ in 0..TOTAL_HEIGHT {
            let report = game.step(Command::SoftDrop);
            if report.locked {
                locked = true;
                break;
            }
        }
        assert!(locked);
        assert_eq!(game.pieces_locked(), 1);
        assert_eq!(game.board().get(BOTTOM, 4), Some(Cell::Filled(Shape::O)));
        assert!(game.active_cells().is_some());
    }

    #[test]
    fn test_square_completes_bottom_row() {
        let mut game = game();
        for col in 0..BOARD_WIDTH as i32 {
            if col != 4 && col != 5 {
                game.board.set(BOTTOM, col, Cell::Filled(Shape::I));
            }
        }
        force(&mut game, Shape::O);

        // Lock by hand first to observe the full row before collapse
        let mut board = game.board.clone();
        let mut ctl = game.controller.clone();
        ctl.hard_drop(&mut board);
        assert_eq!(board.find_full_rows(), vec![BOTTOM as usize]);

        let report = game.step(Command::HardDrop);
        assert!(report.locked);
        assert_eq!(report.lines_cleared, 1);
        assert_eq!(game.lines_cleared(), 1);
        // The square's upper half dropped into the bottom row
        assert_eq!(game.board().get(BOTTOM, 4), Some(Cell::Filled(Shape::O)));
        assert_eq!(game.board().get(BOTTOM, 5), Some(Cell::Filled(Shape::O)));
        assert!(game.board().get(BOTTOM, 0).unwrap().is_empty());
        assert!(game.board().get(BOTTOM - 1, 4).unwrap().is_empty());
    }

    #[test]
    fn test_hold_scenario() {
        let mut game = game();
        force(&mut game, Shape::T);

        let front = game.preview()[0];
        assert!(game.step(Command::Hold).accepted);
        assert_eq!(game.hold(), Some(Shape::T));
        assert_eq!(game.active_shape(), Some(front));

        game.step(Command::MoveLeft);
        game.step(Command::SoftDrop);
        assert!(game.step(Command::Hold).accepted);
        assert_eq!(game.active_shape(), Some(Shape::T));
        assert_eq!(game.hold(), Some(front));
        let expected = crate::piece::Piece::new(Shape::T, game.controller.tables());
        assert_eq!(game.active_cells(), Some(expected.cells));
    }

    #[test]
    fn test_unlimited_hold_swaps() {
        let mut game = game();
        force(&mut game, Shape::S);
        game.step(Command::Hold);
        let other = game.active_shape().unwrap();
        let preview = game.preview();
        for i in 0..6 {
            game.step(Command::Hold);
            let expected = if i % 2 == 0 { Shape::S } else { other };
            assert_eq!(game.active_shape(), Some(expected));
        }
        // Swapping never touches the queue
        assert_eq!(game.preview(), preview);
    }

    #[test]
    fn test_force_respawn_takes_queue_front() {
        let mut game = game();
        let front = game.preview()[0];
        let report = game.step(Command::ForceRespawn);
        assert!(report.accepted);
        assert_eq!(game.active_shape(), Some(front));
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_quit_ends_game_and_freezes_state() {
        let mut game = game();
        assert!(game.step(Command::Quit).accepted);
        assert_eq!(game.state(), GameState::GameOver(EndReason::Quit));
        let cells = game.active_cells();
        let report = game.step(Command::HardDrop);
        assert_eq!(report, StepReport::default());
        assert_eq!(game.active_cells(), cells);
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_lock_in_buffer_tops_out() {
        let mut game = game();
        // A stack reaching up to the spawn row forces the next piece to
        // spawn and lock partly inside the buffer
        for row in SPAWN_ROW..TOTAL_HEIGHT as i32 {
            game.board.set(row, 0, Cell::Filled(Shape::L));
            for col in 2..BOARD_WIDTH as i32 {
                game.board.set(row, col, Cell::Filled(Shape::L));
            }
        }
        force(&mut game, Shape::O);
        let report = game.step(Command::HardDrop);
        assert!(report.locked);
        assert_eq!(game.state(), GameState::GameOver(EndReason::ToppedOut));
        assert!(game.board().is_loss(BUFFER_HEIGHT));
    }

    #[test]
    fn test_stacking_eventually_ends() {
        let mut game = game();
        for _ in 0..200 {
            if game.has_ended() {
                break;
            }
            game.step(Command::HardDrop);
        }
        assert!(game.has_ended());
        assert!(!game.step(Command::HardDrop).accepted);
    }
}
