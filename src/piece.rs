//! Active falling piece logic

use crate::bag::PieceQueue;
use crate::board::Board;
use crate::srs::ShapeTables;
use crate::tetromino::{Facing, RotationDirection, Shape};
use std::sync::Arc;
use tracing::{debug, trace};

/// Board row of the top edge of a freshly spawned piece's 4x4 box
pub const SPAWN_ROW: i32 = 4;
/// Board column of the left edge of a freshly spawned piece's 4x4 box
pub const SPAWN_COL: i32 = 3;

/// Single-step translations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// (row, col) offset of one step
    fn offset(self) -> (i32, i32) {
        match self {
            MoveDirection::Left => (0, -1),
            MoveDirection::Right => (0, 1),
            MoveDirection::Down => (1, 0),
        }
    }
}

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub shape: Shape,
    /// Current rotation state
    pub facing: Facing,
    /// Absolute (row, col) of all 4 blocks, in shape-table cell order
    pub cells: [(i32, i32); 4],
}

impl Piece {
    /// Create a piece at the spawn anchor, facing North
    pub fn new(shape: Shape, tables: &ShapeTables) -> Self {
        let offsets = tables.offsets(shape, Facing::North);
        Self {
            shape,
            facing: Facing::North,
            cells: offsets.map(|(dr, dc)| (SPAWN_ROW + dr, SPAWN_COL + dc)),
        }
    }

    /// Cells translated by (rows, cols)
    pub fn shifted(&self, rows: i32, cols: i32) -> [(i32, i32); 4] {
        self.cells.map(|(r, c)| (r + rows, c + cols))
    }
}

/// Owns the active piece and the hold slot, and validates every change to
/// them against the board
#[derive(Debug, Clone)]
pub struct PieceController {
    tables: Arc<ShapeTables>,
    active: Option<Piece>,
    hold: Option<Shape>,
    /// Which wall kick the last successful rotation used (0 = no kick)
    last_kick: Option<usize>,
}

impl PieceController {
    pub fn new(tables: Arc<ShapeTables>) -> Self {
        Self {
            tables,
            active: None,
            hold: None,
            last_kick: None,
        }
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn active_cells(&self) -> Option<[(i32, i32); 4]> {
        self.active.as_ref().map(|piece| piece.cells)
    }

    pub fn held(&self) -> Option<Shape> {
        self.hold
    }

    pub fn last_kick(&self) -> Option<usize> {
        self.last_kick
    }

    pub fn tables(&self) -> &ShapeTables {
        &self.tables
    }

    /// Place `shape` at the spawn anchor, raising it one row at a time while
    /// it overlaps locked cells
    ///
    /// Returns false, leaving no active piece, if the piece would have to
    /// rise past the top of the board.
    pub fn spawn(&mut self, shape: Shape, board: &Board) -> bool {
        self.last_kick = None;
        let mut piece = Piece::new(shape, &self.tables);
        let mut raised = 0;

        while !board.are_positions_open(&piece.cells) {
            if piece.cells.iter().any(|&(row, _)| row <= 0) {
                debug!("No room to spawn {}", shape);
                self.active = None;
                return false;
            }
            piece.cells = piece.shifted(-1, 0);
            raised += 1;
        }

        if raised > 0 {
            debug!("Spawned {} raised by {} rows", shape, raised);
        } else {
            trace!("Spawned {}", shape);
        }
        self.active = Some(piece);
        true
    }

    /// Try to shift the piece one step, returns true if successful
    pub fn move_piece(&mut self, direction: MoveDirection, board: &Board) -> bool {
        let Some(piece) = &mut self.active else {
            return false;
        };

        let (dr, dc) = direction.offset();
        let candidate = piece.shifted(dr, dc);
        if board.are_positions_open(&candidate) {
            piece.cells = candidate;
            true
        } else {
            false
        }
    }

    /// Try to rotate, using SRS wall kicks
    ///
    /// Kicks are tried in table order and the first open placement wins.
    pub fn rotate(&mut self, direction: RotationDirection, board: &Board) -> bool {
        let Some(piece) = &mut self.active else {
            return false;
        };

        let deltas = self.tables.rotation_deltas(piece.shape, piece.facing, direction);
        let kicks = self.tables.wall_kicks(piece.shape, piece.facing, direction);

        for (kick_idx, &(kick_row, kick_col)) in kicks.iter().enumerate() {
            let candidate: [(i32, i32); 4] = std::array::from_fn(|i| {
                let (row, col) = piece.cells[i];
                (row + deltas[i].0 + kick_row, col + deltas[i].1 + kick_col)
            });

            if board.are_positions_open(&candidate) {
                piece.cells = candidate;
                piece.facing = piece.facing.rotated(direction);
                self.last_kick = Some(kick_idx);
                if kick_idx > 0 {
                    trace!("{} rotated to {:?} with kick {}", piece.shape, piece.facing, kick_idx);
                }
                return true;
            }
        }

        false
    }

    /// Write the active piece into the board, returning it
    pub fn lock(&mut self, board: &mut Board) -> Option<Piece> {
        let piece = self.active.take()?;
        board.lock_piece(&piece.cells, piece.shape);
        debug!("Locked {} at {:?}", piece.shape, piece.cells);
        Some(piece)
    }

    /// Hard drop - move down as far as possible, lock, and return distance dropped
    pub fn hard_drop(&mut self, board: &mut Board) -> Option<u32> {
        self.active.as_ref()?;

        let mut distance = 0;
        while self.move_piece(MoveDirection::Down, board) {
            distance += 1;
        }
        self.lock(board)?;
        Some(distance)
    }

    /// Stash the active shape, bringing in the held shape (or the next queued
    /// one when the slot is empty) at the spawn anchor
    ///
    /// Swapping is not limited per piece. Returns false if there is no active
    /// piece or the incoming piece cannot spawn.
    pub fn hold(&mut self, board: &Board, queue: &mut PieceQueue) -> bool {
        let Some(current) = self.active.take() else {
            return false;
        };

        let incoming = match self.hold.replace(current.shape) {
            Some(held) => held,
            None => queue.dequeue(),
        };
        trace!("Hold {} for {}", current.shape, incoming);
        self.spawn(incoming, board)
    }

    /// Get the ghost piece cells (where the piece would land)
    pub fn ghost_cells(&self, board: &Board) -> Option<[(i32, i32); 4]> {
        let piece = self.active.as_ref()?;
        let mut drop = 0;
        while board.are_positions_open(&piece.shifted(drop + 1, 0)) {
            drop += 1;
        }
        Some(piece.shifted(drop, 0))
    }
}
