use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, Rank, Suit};

/// The pool of undrawn cards. A fresh shoe holds the 52 canonical
/// rank and suit combinations; `draw` depletes it and an exhausted
/// shoe replenishes itself without surfacing an event.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Shoe {
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Deterministic shoe. The same seed yields the same draw order.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        let mut shoe = Self {
            cards: Vec::with_capacity(52),
            rng,
        };
        shoe.replenish();
        shoe
    }

    fn replenish(&mut self) {
        self.cards.clear();
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                self.cards.push(Card::new(rank, suit));
            }
        }
    }

    /// Remove and return one uniformly-random card, replenishing first
    /// if the shoe is empty.
    pub fn draw_one(&mut self) -> Card {
        if self.cards.is_empty() {
            self.replenish();
        }
        let pick = self.rng.gen_range(0..self.cards.len());
        self.cards.swap_remove(pick)
    }

    /// Draw `n` cards without replacement. A shoe holding fewer than
    /// `n` cards is replenished to the full 52 before drawing.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        if self.cards.len() < n {
            self.replenish();
        }
        (0..n).map(|_| self.draw_one()).collect()
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Shoe {
    fn default() -> Self {
        Self::new()
    }
}
