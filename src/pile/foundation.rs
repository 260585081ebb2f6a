use log::debug;

use super::{Highlight, PlayDirection, Sink, Source};
use crate::card::{Card, Suit};

/// Cards in a completed foundation pile.
pub const FOUNDATION_SIZE: usize = 13;

/// A single-suit completion pile.
#[derive(Debug, Clone)]
pub struct Foundation {
    suit: Suit,
    cards: Vec<Card>,
    highlight: Highlight,
}

impl Foundation {
    pub fn new(suit: Suit) -> Self {
        Foundation {
            suit,
            cards: Vec::with_capacity(FOUNDATION_SIZE),
            highlight: Highlight::None,
        }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == FOUNDATION_SIZE
    }
}

impl Source for Foundation {
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

impl Sink for Foundation {
    fn can_accept(&self, card: &Card, direction: PlayDirection) -> bool {
        if card.is_wild() || card.suit != self.suit {
            return false;
        }

        let accepted = match self.cards.last() {
            None => card.rank == direction.foundation_base(),
            Some(top) => match direction {
                PlayDirection::Normal => top.rank.value() + 1 == card.rank.value(),
                PlayDirection::Reversed => top.rank.value() == card.rank.value() + 1,
            },
        };
        debug!(
            "foundation {:?} check {}: {}",
            self.suit,
            card.id().label(),
            accepted
        );
        accepted
    }

    fn highlight(&self) -> Highlight {
        self.highlight
    }

    fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Rank;

    fn up(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit).face_up()
    }

    #[test]
    fn empty_pile_takes_its_base_rank() {
        let pile = Foundation::new(Suit::Clubs);
        assert!(pile.can_accept(&up(Rank::Ace, Suit::Clubs), PlayDirection::Normal));
        assert!(!pile.can_accept(&up(Rank::King, Suit::Clubs), PlayDirection::Normal));
        assert!(pile.can_accept(&up(Rank::King, Suit::Clubs), PlayDirection::Reversed));
        assert!(!pile.can_accept(&up(Rank::Ace, Suit::Clubs), PlayDirection::Reversed));
        assert!(!pile.can_accept(&up(Rank::Ace, Suit::Spades), PlayDirection::Normal));
    }

    #[test]
    fn hearts_on_five_takes_six_only() {
        let mut pile = Foundation::new(Suit::Hearts);
        for &rank in &Rank::STANDARD[..5] {
            pile.drop_card(up(rank, Suit::Hearts));
        }

        let normal = PlayDirection::Normal;
        assert!(pile.can_accept(&up(Rank::Six, Suit::Hearts), normal));
        assert!(!pile.can_accept(&up(Rank::Six, Suit::Diamonds), normal));
        assert!(!pile.can_accept(&up(Rank::Seven, Suit::Hearts), normal));
        assert!(pile.can_accept(&up(Rank::Four, Suit::Hearts), PlayDirection::Reversed));
    }

    #[test]
    fn wild_is_never_accepted() {
        let pile = Foundation::new(Suit::Diamonds);
        let joker = up(Rank::Wild, Suit::RedJoker);
        assert!(!pile.can_accept(&joker, PlayDirection::Normal));
        assert!(!pile.can_accept(&joker, PlayDirection::Reversed));
    }

    #[test]
    fn top_card_is_movable_and_pile_completes_at_thirteen() {
        let mut pile = Foundation::new(Suit::Spades);
        assert!(pile.movable_cards().is_empty());

        for &rank in &Rank::STANDARD {
            assert!(pile.can_accept(&up(rank, Suit::Spades), PlayDirection::Normal));
            pile.drop_card(up(rank, Suit::Spades));
        }
        assert!(pile.is_complete());
        assert_eq!(pile.movable_cards()[0].rank, Rank::King);
    }
}
