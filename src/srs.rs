//! Super Rotation System (SRS) tables
//!
//! SRS defines the wall kicks attempted when rotating a piece.
//! If a rotation would cause collision, these offsets are tried in order.
//! [`ShapeTables`] bundles the per-cell rotation deltas (derived from the
//! shape offsets) with the kick data, built once and shared.

use crate::tetromino::{Facing, RotationDirection, Shape};

type Deltas = [(i32, i32); 4];

/// Precomputed rotation data for every (shape, facing, direction)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTables {
    deltas: [[[Deltas; 2]; 4]; Shape::COUNT],
}

impl Default for ShapeTables {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTables {
    /// Derive the rotation delta table from the shape offsets
    pub fn new() -> Self {
        let mut deltas = [[[[(0, 0); 4]; 2]; 4]; Shape::COUNT];

        for shape in Shape::all() {
            for facing in Facing::all() {
                let from = shape.offsets(facing);
                for direction in RotationDirection::all() {
                    let to = shape.offsets(facing.rotated(direction));
                    let slot = &mut deltas[shape.index()][facing.index()][direction.index()];
                    for (i, delta) in slot.iter_mut().enumerate() {
                        *delta = (to[i].0 - from[i].0, to[i].1 - from[i].1);
                    }
                }
            }
        }

        tracing::debug!("Derived SRS rotation deltas for {} shapes", Shape::COUNT);
        Self { deltas }
    }

    /// Cell offsets of `shape` at `facing`
    pub fn offsets(&self, shape: Shape, facing: Facing) -> [(i32, i32); 4] {
        shape.offsets(facing)
    }

    /// Per-cell (row, col) deltas moving each cell from `facing` to the
    /// facing reached by rotating in `direction`
    pub fn rotation_deltas(
        &self,
        shape: Shape,
        facing: Facing,
        direction: RotationDirection,
    ) -> [(i32, i32); 4] {
        self.deltas[shape.index()][facing.index()][direction.index()]
    }

    /// Kick candidates to try, in order
    pub fn wall_kicks(
        &self,
        shape: Shape,
        facing: Facing,
        direction: RotationDirection,
    ) -> [(i32, i32); 5] {
        get_wall_kicks(shape, facing, direction)
    }
}

/// Get wall kick offsets for a rotation attempt
/// Returns 5 (row_offset, col_offset) pairs to try
pub fn get_wall_kicks(
    shape: Shape,
    from: Facing,
    direction: RotationDirection,
) -> [(i32, i32); 5] {
    match shape {
        Shape::O => {
            // O piece doesn't visibly rotate, but the first attempt still runs
            [(0, 0); 5]
        }
        Shape::I => i_piece_kicks(from, direction),
        _ => jlstz_kicks(from, direction),
    }
}

/// Wall kicks for J, L, S, T, Z pieces
/// Standard SRS with row-down coordinate system (row offsets negated from the usual y-up tables)
fn jlstz_kicks(from: Facing, direction: RotationDirection) -> [(i32, i32); 5] {
    use Facing::*;
    use RotationDirection::*;

    // Kicks are (row_offset, col_offset) where row+ is down, col+ is right
    match (from, direction) {
        // 0→R
        (North, Clockwise) => [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
        // R→0
        (East, CounterClockwise) => [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
        // R→2
        (East, Clockwise) => [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
        // 2→R
        (South, CounterClockwise) => [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
        // 2→L
        (South, Clockwise) => [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
        // L→2
        (West, CounterClockwise) => [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
        // L→0
        (West, Clockwise) => [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
        // 0→L
        (North, CounterClockwise) => [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
    }
}

/// Wall kicks for I piece (different from other pieces)
/// Standard SRS with row-down coordinate system (row offsets negated from the usual y-up tables)
fn i_piece_kicks(from: Facing, direction: RotationDirection) -> [(i32, i32); 5] {
    use Facing::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0→R
        (North, Clockwise) => [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
        // R→0
        (East, CounterClockwise) => [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
        // R→2
        (East, Clockwise) => [(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
        // 2→R
        (South, CounterClockwise) => [(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
        // 2→L
        (South, Clockwise) => [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
        // L→2
        (West, CounterClockwise) => [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
        // L→0
        (West, Clockwise) => [(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
        // 0→L
        (North, CounterClockwise) => [(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
    }
}
