//! Property tests for the session transition loop.
//!
//! Invariants covered:
//! - The active piece always sits on open, in-bounds cells while playing.
//! - Rejected moves and rotations leave the piece and board untouched.
//! - Every aligned run of 7 draws from a bag is a permutation of the shapes.
//! - The preview queue always holds exactly five shapes and feeds spawns in
//!   order.
//! - Once a game ends no command changes anything.

use proptest::prelude::*;
use srs_tetris::{
    BOARD_WIDTH, Bag, Command, Game, QUEUE_LEN, Shape, ShapeTables, TOTAL_HEIGHT,
};
use std::collections::HashSet;
use std::sync::Arc;

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => Just(Command::MoveLeft),
        4 => Just(Command::MoveRight),
        4 => Just(Command::SoftDrop),
        3 => Just(Command::RotateCw),
        3 => Just(Command::RotateCcw),
        2 => Just(Command::HardDrop),
        1 => Just(Command::Hold),
        1 => Just(Command::ForceRespawn),
    ]
}

fn assert_active_piece_fits(game: &Game) {
    let cells = game.active_cells().expect("playing game has an active piece");
    for (row, col) in cells {
        assert!((0..TOTAL_HEIGHT as i32).contains(&row));
        assert!((0..BOARD_WIDTH as i32).contains(&col));
        assert!(game.board().is_cell_open(row, col));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn active_piece_never_overlaps_board(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 1..400),
    ) {
        let mut game = Game::with_seed(Arc::new(ShapeTables::new()), seed);
        for command in commands {
            let board_before = game.board().clone();
            let cells_before = game.active_cells();

            let report = game.step(command);

            if game.has_ended() {
                break;
            }
            assert_active_piece_fits(&game);
            prop_assert_eq!(game.preview().len(), QUEUE_LEN);

            if !report.accepted {
                prop_assert_eq!(game.active_cells(), cells_before);
                prop_assert_eq!(game.board(), &board_before);
            }
            if !report.locked {
                prop_assert_eq!(report.lines_cleared, 0);
            }
        }
    }

    #[test]
    fn bag_windows_are_permutations(seed in any::<u64>(), bags in 1usize..12) {
        let mut bag = Bag::with_seed(seed);
        for _ in 0..bags {
            let window: HashSet<Shape> = (0..7).map(|_| bag.draw_one()).collect();
            prop_assert_eq!(window.len(), 7);
        }
    }

    #[test]
    fn respawns_follow_the_preview(seed in any::<u64>(), steps in 1usize..40) {
        let mut game = Game::with_seed(Arc::new(ShapeTables::new()), seed);
        for _ in 0..steps {
            let front = game.preview()[0];
            let rest = game.preview();
            game.step(Command::ForceRespawn);
            prop_assert_eq!(game.active_shape(), Some(front));
            prop_assert_eq!(&game.preview()[..QUEUE_LEN - 1], &rest[1..]);
        }
    }

    #[test]
    fn ended_game_ignores_commands(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 1..50),
    ) {
        let mut game = Game::with_seed(Arc::new(ShapeTables::new()), seed);
        game.step(Command::Quit);
        let board = game.board().clone();
        let cells = game.active_cells();
        let hold = game.hold();
        for command in commands {
            prop_assert!(!game.step(command).accepted);
        }
        prop_assert_eq!(game.board(), &board);
        prop_assert_eq!(game.active_cells(), cells);
        prop_assert_eq!(game.hold(), hold);
    }
}
