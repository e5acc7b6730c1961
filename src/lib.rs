//! Falling-block rules engine
//!
//! Board, SRS rotation with wall kicks, 7-bag randomizer and a
//! command-driven game session. Rendering and input polling live outside
//! the engine; [`Game`] takes one [`Command`] at a time and exposes
//! read-only state after each step.

pub mod bag;
pub mod board;
pub mod game;
pub mod input;
pub mod piece;
pub mod settings;
pub mod srs;
pub mod tetromino;

pub use bag::{Bag, PieceQueue, QUEUE_LEN};
pub use board::{BOARD_WIDTH, BUFFER_HEIGHT, Board, Cell, TOTAL_HEIGHT, VISIBLE_HEIGHT};
pub use game::{Command, EndReason, Game, GameState, StepReport};
pub use piece::{MoveDirection, Piece, PieceController};
pub use srs::ShapeTables;
pub use tetromino::{Facing, RotationDirection, Shape};
