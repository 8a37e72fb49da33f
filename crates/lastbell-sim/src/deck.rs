//! Shuffled draw pile over a content pool.

use rand::seq::SliceRandom;
use rand::Rng;

/// Yields each entry once in random order, then reshuffles.
#[derive(Debug, Clone)]
pub struct ContentDeck<T> {
    pool: Vec<T>,
    pile: Vec<usize>,
}

impl<T: Clone> ContentDeck<T> {
    pub fn new(pool: Vec<T>) -> Self {
        Self {
            pool,
            pile: Vec::new(),
        }
    }

    /// Next entry, or `None` only when the pool itself is empty.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        if self.pile.is_empty() {
            self.pile = (0..self.pool.len()).collect();
            self.pile.shuffle(rng);
        }
        let idx = self.pile.pop()?;
        self.pool.get(idx).cloned()
    }

    /// Entries left before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.pile.len()
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }
}
