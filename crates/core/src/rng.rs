//! RNG module - seeded 7-bag mino generation
//!
//! Each bag holds one mino of every kind in shuffled order; a new bag is
//! shuffled once the current one is used up. A seed fully determines the piece
//! sequence.

use crate::types::MinoKind;

/// Seeded xorshift32 generator.
///
/// The state is never zero, so the sequence never gets stuck; seed 0 is
/// replaced by a fixed nonzero value.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    const ZERO_SEED: u32 = 0x9E37_79B9;

    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { Self::ZERO_SEED } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Value in `0..bound`, scaled from the full 32-bit range. `bound` must
    /// be nonzero.
    pub fn next_range(&mut self, bound: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(bound)) >> 32) as u32
    }

    /// Shuffle in place, walking down from the last slot
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let mut remaining = items.len();
        while remaining > 1 {
            let pick = self.next_range(remaining as u32) as usize;
            remaining -= 1;
            items.swap(remaining, pick);
        }
    }
}

/// 7-bag mino source
#[derive(Debug, Clone)]
pub struct MinoBag {
    bag: [MinoKind; 7],
    next: usize,
    rng: SimpleRng,
}

impl MinoBag {
    pub fn new(seed: u32) -> Self {
        Self {
            bag: MinoKind::ALL,
            // start exhausted so the first draw shuffles
            next: MinoKind::ALL.len(),
            rng: SimpleRng::new(seed),
        }
    }

    /// Take the next kind, shuffling a fresh bag when needed
    pub fn draw(&mut self) -> MinoKind {
        if self.next >= self.bag.len() {
            self.bag = MinoKind::ALL;
            self.rng.shuffle(&mut self.bag);
            self.next = 0;
        }
        let kind = self.bag[self.next];
        self.next += 1;
        kind
    }

}

impl Default for MinoBag {
    fn default() -> Self {
        Self::new(1)
    }
}
