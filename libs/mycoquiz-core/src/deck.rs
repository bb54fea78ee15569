//! Deck manager: the active card sequence and the cursor into it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::DeckError;
use crate::types::Card;

/// Return a uniformly random permutation of `items`.
///
/// Fisher-Yates: walk from the last index down to 1, swapping each slot with
/// a uniformly chosen slot at or below it.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Owns the active deck and its position.
///
/// Position is always inside `0..len` while the deck is non-empty.
#[derive(Debug)]
pub struct DeckManager {
    cards: Vec<Card>,
    position: usize,
    rng: StdRng,
}

impl Default for DeckManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckManager {
    /// Create an empty deck seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create an empty deck with a deterministic shuffle order.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            cards: Vec::new(),
            position: 0,
            rng,
        }
    }

    /// Replace the deck with a shuffled copy of `cards` and rewind.
    ///
    /// An empty `cards` leaves the current deck untouched.
    pub fn load(&mut self, cards: &[Card]) -> Result<(), DeckError> {
        if cards.is_empty() {
            return Err(DeckError::EmptyLoad);
        }
        self.cards = shuffle(cards, &mut self.rng);
        self.position = 0;
        tracing::debug!(cards = self.cards.len(), "deck loaded");
        Ok(())
    }

    /// Shuffle with this deck's random source.
    pub fn shuffle(&mut self, cards: &[Card]) -> Vec<Card> {
        shuffle(cards, &mut self.rng)
    }

    /// Move to the next card, wrapping after the last. Returns the new current card.
    pub fn advance(&mut self) -> Option<&Card> {
        if self.cards.is_empty() {
            return None;
        }
        self.position = (self.position + 1) % self.cards.len();
        self.current()
    }

    /// Reshuffle the cards already held and rewind. Nothing is refetched.
    pub fn restart(&mut self) -> &[Card] {
        if !self.cards.is_empty() {
            self.cards = shuffle(&self.cards, &mut self.rng);
            self.position = 0;
            tracing::debug!(cards = self.cards.len(), "deck restarted");
        }
        &self.cards
    }

    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
