//! Card containers and the capabilities they expose to the drag protocol.
//!
//! Every container is a `Source` (cards can be lifted out of it); tableau
//! columns and foundation piles are also a `Sink` (cards can be dropped on
//! them). The talon is a source only.

mod foundation;
mod tableau;
mod talon;

pub use foundation::Foundation;
pub use tableau::Tableau;
pub use talon::Talon;

use serde::{Deserialize, Serialize};

use crate::card::{Card, CardId, Rank};

/// Number of tableau columns.
pub const NUM_TABLEAUS: usize = 7;
/// Number of foundation piles (one per playable suit).
pub const NUM_FOUNDATIONS: usize = 4;

/// Addresses one container on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerId {
    Talon,
    Foundation(usize),
    Tableau(usize),
}

impl ContainerId {
    /// Can cards be dropped here?
    pub fn is_sink(self) -> bool {
        !matches!(self, ContainerId::Talon)
    }

    /// Every container, in the order `Board::find_container_of` scans them.
    pub fn all() -> impl Iterator<Item = ContainerId> {
        std::iter::once(ContainerId::Talon)
            .chain((0..NUM_FOUNDATIONS).map(ContainerId::Foundation))
            .chain((0..NUM_TABLEAUS).map(ContainerId::Tableau))
    }

    /// Every drop-capable container.
    pub fn sinks() -> impl Iterator<Item = ContainerId> {
        Self::all().filter(|id| id.is_sink())
    }

    pub fn label(self) -> String {
        match self {
            ContainerId::Talon => "w".to_string(),
            ContainerId::Foundation(i) => format!("f{}", i),
            ContainerId::Tableau(i) => format!("t{}", i),
        }
    }
}

/// Which way sequences build. Flipped by the reverse trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayDirection {
    #[default]
    Normal,
    Reversed,
}

impl PlayDirection {
    pub fn toggled(self) -> Self {
        match self {
            PlayDirection::Normal => PlayDirection::Reversed,
            PlayDirection::Reversed => PlayDirection::Normal,
        }
    }

    /// The only standard rank an empty tableau column accepts.
    pub fn tableau_anchor(self) -> Rank {
        match self {
            PlayDirection::Normal => Rank::King,
            PlayDirection::Reversed => Rank::Ace,
        }
    }

    /// The rank every foundation pile starts from.
    pub fn foundation_base(self) -> Rank {
        match self {
            PlayDirection::Normal => Rank::Ace,
            PlayDirection::Reversed => Rank::King,
        }
    }
}

/// Hover feedback shown on a sink while a drag is over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Accept,
    Reject,
}

/// A container cards can be lifted from.
///
/// Movable cards are always a suffix of `cards()`, so lifting, restoring and
/// removing share one implementation over the backing vector.
pub trait Source {
    fn cards(&self) -> &[Card];

    fn cards_mut(&mut self) -> &mut Vec<Card>;

    /// The cards a player may currently pick up.
    fn movable_cards(&self) -> &[Card];

    fn top(&self) -> Option<&Card> {
        self.cards().last()
    }

    fn contains(&self, id: CardId) -> bool {
        self.cards().iter().any(|c| c.id() == id)
    }

    fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards().iter().position(|c| c.id() == id)
    }

    fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards_mut().iter_mut().find(|c| c.id() == id)
    }

    /// Detach `id` together with every card above it. Returns the index the
    /// run started at, or `None` if `id` is not movable here.
    fn lift(&mut self, id: CardId) -> Option<(usize, Vec<Card>)> {
        let first_movable = self.cards().len() - self.movable_cards().len();
        let index = self.position_of(id).filter(|&i| i >= first_movable)?;
        Some((index, self.cards_mut().split_off(index)))
    }

    /// Put `cards` back starting at `index` (clamped to the current length),
    /// keeping their order.
    fn restore(&mut self, index: usize, cards: Vec<Card>) {
        let stack = self.cards_mut();
        let index = index.min(stack.len());
        stack.splice(index..index, cards);
    }

    /// Remove `id` wherever it sits.
    fn remove_anywhere(&mut self, id: CardId) -> Option<Card> {
        let index = self.position_of(id)?;
        Some(self.cards_mut().remove(index))
    }
}

/// A container cards can be dropped on.
pub trait Sink: Source {
    fn can_accept(&self, card: &Card, direction: PlayDirection) -> bool;

    fn drop_card(&mut self, card: Card) {
        self.cards_mut().push(card);
    }

    fn highlight(&self) -> Highlight;

    fn set_highlight(&mut self, highlight: Highlight);
}
