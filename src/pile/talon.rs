use log::warn;

use super::Source;
use crate::card::{Card, CardId};
use crate::deck::Deck;

/// The waste pile. Cards arrive face up from the stock and only ever leave
/// from the top; nothing can be dropped here.
#[derive(Debug, Clone, Default)]
pub struct Talon {
    cards: Vec<Card>,
}

impl Talon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Push a card drawn from the stock.
    pub fn add(&mut self, mut card: Card) {
        card.face_up = true;
        self.cards.push(card);
    }

    /// Pop `id` if it is the top card. Anything else is a caller bug.
    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        if self.cards.last().map(Card::id) != Some(id) {
            warn!("talon remove of non-top card {} ignored", id.label());
            debug_assert!(false, "Talon::remove called with a card that is not on top");
            return None;
        }
        self.cards.pop()
    }

    /// Move every card back into the stock, bottom card first.
    pub fn release_into(&mut self, deck: &mut Deck) {
        for card in self.cards.drain(..) {
            deck.release(card);
        }
    }
}

impl Source for Talon {
    fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }

    fn movable_cards(&self) -> &[Card] {
        let start = self.cards.len().saturating_sub(1);
        &self.cards[start..]
    }
}
