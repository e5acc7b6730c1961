//! 7-bag randomizer for piece generation
//!
//! Tetris uses a "7-bag" system where all 7 pieces are shuffled,
//! then dealt out before reshuffling. This prevents long droughts.
//! [`PieceQueue`] keeps a fixed five-piece preview fed from the bag.

use crate::tetromino::Shape;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of upcoming pieces kept in the preview queue
pub const QUEUE_LEN: usize = 5;

/// The 7-bag piece randomizer
#[derive(Debug, Clone)]
pub struct Bag {
    /// Shapes not yet drawn from the current bag, by canonical index
    remaining: [bool; Shape::COUNT],
    rng: ChaCha8Rng,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Create a bag seeded from entropy
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a bag with a fixed seed, for reproducible sequences
    pub fn with_seed(seed: u64) -> Self {
        Self {
            remaining: [true; Shape::COUNT],
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Number of shapes left before the next refill
    pub fn remaining(&self) -> usize {
        self.remaining.iter().filter(|&&left| left).count()
    }

    /// Draw one shape, refilling the bag first if it is exhausted
    pub fn draw_one(&mut self) -> Shape {
        if self.remaining() == 0 {
            self.refill();
        }

        let count = self.remaining();
        let mut pick = self.rng.gen_range(0..count);

        // pick-th shape still in the bag, in canonical order
        for (index, shape) in Shape::all().into_iter().enumerate() {
            if !self.remaining[index] {
                continue;
            }
            if pick == 0 {
                self.remaining[index] = false;
                return shape;
            }
            pick -= 1;
        }

        unreachable!("pick is always below the remaining count")
    }

    /// Put all 7 shapes back
    fn refill(&mut self) {
        tracing::trace!("Refilling 7-bag");
        self.remaining = [true; Shape::COUNT];
    }
}

/// Fixed-length preview of upcoming pieces, refilled one-for-one from a bag
#[derive(Debug, Clone)]
pub struct PieceQueue {
    slots: [Shape; QUEUE_LEN],
    /// Index of the front of the queue
    head: usize,
    bag: Bag,
}

impl PieceQueue {
    /// Create a queue and fill every slot from `bag`
    pub fn new(mut bag: Bag) -> Self {
        let slots = std::array::from_fn(|_| bag.draw_one());
        Self {
            slots,
            head: 0,
            bag,
        }
    }

    /// Take the front shape and draw a replacement onto the back
    pub fn dequeue(&mut self) -> Shape {
        let front = self.slots[self.head];
        self.slots[self.head] = self.bag.draw_one();
        self.head = (self.head + 1) % QUEUE_LEN;
        front
    }

    /// Shape that the next [`PieceQueue::dequeue`] returns
    pub fn peek(&self) -> Shape {
        self.slots[self.head]
    }

    /// Upcoming shapes, front first
    pub fn preview(&self) -> [Shape; QUEUE_LEN] {
        std::array::from_fn(|i| self.slots[(self.head + i) % QUEUE_LEN])
    }
}
