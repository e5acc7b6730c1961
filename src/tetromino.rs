//! Tetromino definitions and shapes
//!
//! All 7 standard tetrominoes with their four SRS orientations. Offsets are
//! (row, col) inside a 4x4 bounding box, row increasing downward.

use std::fmt;

/// The 7 tetromino types, in canonical bag order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    O, // square
    I, // long bar
    T,
    L,
    J,
    S,
    Z,
}

impl Shape {
    /// Number of distinct shapes
    pub const COUNT: usize = 7;

    /// All shapes in canonical enumeration order
    pub fn all() -> [Shape; 7] {
        [
            Shape::O,
            Shape::I,
            Shape::T,
            Shape::L,
            Shape::J,
            Shape::S,
            Shape::Z,
        ]
    }

    /// Position of this shape in [`Shape::all`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-letter tag, used by text views and logs
    pub fn letter(self) -> char {
        match self {
            Shape::O => 'O',
            Shape::I => 'I',
            Shape::T => 'T',
            Shape::L => 'L',
            Shape::J => 'J',
            Shape::S => 'S',
            Shape::Z => 'Z',
        }
    }

    /// Get the cell offsets for this shape at a given facing
    pub fn offsets(self, facing: Facing) -> [(i32, i32); 4] {
        SHAPE_OFFSETS[self.index()][facing.index()]
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// Cell index i of one facing maps to cell index i of the next; rotation
// deltas are derived per index from this table, so the ordering matters.
//
// T North:  .T..   East: .T..
//           TTT.         .TT.
//           ....         .T..
const SHAPE_OFFSETS: [[[(i32, i32); 4]; 4]; 7] = [
    // O
    [
        [(0, 1), (0, 2), (1, 2), (1, 1)],
        [(0, 1), (0, 2), (1, 2), (1, 1)],
        [(0, 1), (0, 2), (1, 2), (1, 1)],
        [(0, 1), (0, 2), (1, 2), (1, 1)],
    ],
    // I
    [
        [(1, 0), (1, 1), (1, 2), (1, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(2, 3), (2, 2), (2, 1), (2, 0)],
        [(3, 1), (2, 1), (1, 1), (0, 1)],
    ],
    // T
    [
        [(1, 1), (1, 0), (0, 1), (1, 2)],
        [(1, 1), (0, 1), (2, 1), (1, 2)],
        [(1, 1), (2, 1), (1, 0), (1, 2)],
        [(1, 1), (0, 1), (1, 0), (2, 1)],
    ],
    // L
    [
        [(1, 1), (1, 0), (0, 2), (1, 2)],
        [(1, 1), (0, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 0), (1, 0), (1, 2)],
        [(1, 1), (0, 0), (0, 1), (2, 1)],
    ],
    // J
    [
        [(1, 1), (1, 0), (0, 0), (1, 2)],
        [(1, 1), (0, 1), (0, 2), (2, 1)],
        [(1, 1), (1, 0), (1, 2), (2, 2)],
        [(1, 1), (0, 1), (2, 0), (2, 1)],
    ],
    // S
    [
        [(1, 1), (1, 0), (0, 1), (0, 2)],
        [(1, 1), (0, 1), (1, 2), (2, 2)],
        [(1, 1), (2, 0), (2, 1), (1, 2)],
        [(1, 1), (0, 0), (1, 0), (2, 1)],
    ],
    // Z
    [
        [(1, 1), (0, 0), (0, 1), (1, 2)],
        [(1, 1), (0, 2), (1, 2), (2, 1)],
        [(1, 1), (1, 0), (2, 1), (2, 2)],
        [(1, 1), (0, 1), (1, 0), (2, 0)],
    ],
];

/// Orientation states (using SRS naming convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    #[default]
    North, // Spawn state
    East,  // Clockwise from North
    South, // 180 from North
    West,  // Counter-clockwise from North
}

impl Facing {
    pub fn all() -> [Facing; 4] {
        [Facing::North, Facing::East, Facing::South, Facing::West]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(self) -> Facing {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(self) -> Facing {
        match self {
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
            Facing::East => Facing::North,
        }
    }

    /// Facing reached by rotating once in `direction`
    pub fn rotated(self, direction: RotationDirection) -> Facing {
        match direction {
            RotationDirection::Clockwise => self.cw(),
            RotationDirection::CounterClockwise => self.ccw(),
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub fn all() -> [RotationDirection; 2] {
        [RotationDirection::Clockwise, RotationDirection::CounterClockwise]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> RotationDirection {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}
