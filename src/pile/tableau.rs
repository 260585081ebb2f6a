use log::debug;

use super::{Highlight, PlayDirection, Sink, Source};
use crate::card::{Card, CardId};

/// One of the seven build columns, bottom card first.
///
/// Face-down cards always form a prefix of the column; the face-up suffix is
/// the movable run.
#[derive(Debug, Clone, Default)]
pub struct Tableau {
    cards: Vec<Card>,
    highlight: Highlight,
}

impl Tableau {
    pub fn new() -> Self {
        Self::default()
    }

    /// A column holding `cards` exactly as given (for testing).
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Tableau {
            cards,
            highlight: Highlight::None,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn face_down_count(&self) -> usize {
        self.cards.iter().take_while(|c| !c.face_up).count()
    }

    /// Does the face-down prefix invariant hold?
    pub fn is_well_formed(&self) -> bool {
        let split = self.face_down_count();
        self.cards[split..].iter().all(|c| c.face_up)
    }

    /// Turn the top card face up if it is face down. Returns the card that
    /// was flipped.
    pub fn reveal_top(&mut self) -> Option<CardId> {
        let top = self.cards.last_mut().filter(|c| !c.face_up)?;
        top.face_up = true;
        Some(top.id())
    }

    /// Reverse the face-up run in place, leaving the face-down prefix alone.
    /// Called on every column when the play direction flips.
    pub fn reverse_order(&mut self) {
        let split = self.face_down_count();
        self.cards[split..].reverse();
    }
}

impl Source for Tableau {
    fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }

    fn movable_cards(&self) -> &[Card] {
        &self.cards[self.face_down_count()..]
    }
}

impl Sink for Tableau {
    fn can_accept(&self, card: &Card, direction: PlayDirection) -> bool {
        let Some(top) = self.cards.last() else {
            return card.is_wild() || card.rank == direction.tableau_anchor();
        };

        if top.is_wild() || card.is_wild() {
            return true;
        }

        let alternates = top.suit.parity() != card.suit.parity();
        let follows = match direction {
            PlayDirection::Normal => top.rank.value() == card.rank.value() + 1,
            PlayDirection::Reversed => top.rank.value() + 1 == card.rank.value(),
        };
        debug!(
            "tableau check {} onto {}: alternates={} follows={}",
            card.id().label(),
            top.id().label(),
            alternates,
            follows
        );
        alternates && follows
    }

    fn highlight(&self) -> Highlight {
        self.highlight
    }

    fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }
}
