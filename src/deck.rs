use std::collections::VecDeque;

use rand::SeedableRng;
use rand::seq::SliceRandom;

use crate::card::{Card, CardId, full_deck};

/// The stock: cards not yet dealt, or recycled from the talon.
///
/// The pool is shuffled once when it is built; `acquire` then hands cards
/// out from the front and `release` appends to the back, so a recycled talon
/// is drawn again in the order it was laid down.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// A full 54-card deck shuffled with the OS entropy source.
    pub fn shuffled() -> Self {
        let mut rng = rand::rngs::SmallRng::from_os_rng();
        let mut cards = full_deck();
        cards.shuffle(&mut rng);
        Self::from_cards(cards)
    }

    /// A full 54-card deck shuffled from a specific seed (reproducible games).
    pub fn seeded(seed: u64) -> Self {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
        let mut cards = full_deck();
        cards.shuffle(&mut rng);
        Self::from_cards(cards)
    }

    /// A deck that hands out `cards` in the given order (for testing).
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck {
            cards: cards.into(),
        }
    }

    /// Remove and return the next card, or `None` once the pool is empty.
    pub fn acquire(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Return a card to the back of the pool, face down.
    pub fn release(&mut self, mut card: Card) {
        card.face_up = false;
        self.cards.push_back(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
