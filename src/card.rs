use serde::{Deserialize, Serialize};

/// Total number of cards in play at the start of a game.
pub const DECK_SIZE: usize = 54;

/// Suits, in the order that defines colour parity: even indices are red,
/// odd indices are black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Diamonds,
    Spades,
    Hearts,
    Clubs,
    BlackJoker,
    RedJoker,
}

impl Suit {
    /// The four suits that own a foundation pile, in foundation order.
    pub const PLAYABLE: [Suit; 4] = [Suit::Diamonds, Suit::Spades, Suit::Hearts, Suit::Clubs];

    pub fn index(self) -> usize {
        match self {
            Suit::Diamonds => 0,
            Suit::Spades => 1,
            Suit::Hearts => 2,
            Suit::Clubs => 3,
            Suit::BlackJoker => 4,
            Suit::RedJoker => 5,
        }
    }

    /// Colour parity used by the tableau alternation rule.
    pub fn parity(self) -> usize {
        self.index() % 2
    }

    pub fn is_joker(self) -> bool {
        matches!(self, Suit::BlackJoker | Suit::RedJoker)
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts | Suit::RedJoker)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Diamonds => "♦",
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Clubs => "♣",
            Suit::BlackJoker => "★",
            Suit::RedJoker => "☆",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    /// Joker rank; stacks on anything in the tableau, never on a foundation.
    Wild,
}

impl Rank {
    /// The thirteen standard ranks, Ace first.
    pub const STANDARD: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_wild(self) -> bool {
        self == Rank::Wild
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Wild => "W",
        }
    }
}

/// The immutable identity of a card. No two cards in a game share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId {
    pub rank: Rank,
    pub suit: Suit,
}

impl CardId {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        CardId { rank, suit }
    }

    pub fn label(self) -> String {
        if self.rank.is_wild() {
            self.suit.symbol().to_string()
        } else {
            format!("{}{}", self.rank.label(), self.suit.symbol())
        }
    }
}

/// What the player sees when looking at a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Back,
    /// A face-up reverse trigger shows its own back-like image.
    TriggerBack,
    /// Face-up wild cards show only their suit.
    SuitOnly(Suit),
    Face(Rank, Suit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub face_up: bool,
    pub reverse_trigger: bool,
}

impl Card {
    /// A face-down, ordinary card.
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card {
            rank,
            suit,
            face_up: false,
            reverse_trigger: false,
        }
    }

    pub fn face_up(mut self) -> Self {
        self.face_up = true;
        self
    }

    pub fn id(&self) -> CardId {
        CardId::new(self.rank, self.suit)
    }

    pub fn is_wild(&self) -> bool {
        self.rank.is_wild()
    }

    pub fn face(&self) -> CardFace {
        match (self.face_up, self.reverse_trigger, self.rank) {
            (false, _, _) => CardFace::Back,
            (true, true, _) => CardFace::TriggerBack,
            (true, false, Rank::Wild) => CardFace::SuitOnly(self.suit),
            (true, false, rank) => CardFace::Face(rank, self.suit),
        }
    }

    pub fn label(&self) -> String {
        match self.face() {
            CardFace::Back => "##".to_string(),
            CardFace::TriggerBack => "<>".to_string(),
            CardFace::SuitOnly(suit) => suit.symbol().to_string(),
            CardFace::Face(_, _) => self.id().label(),
        }
    }
}

/// All 54 cards, face down, in a fixed order. The red joker carries the
/// reverse trigger.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);

    for &suit in &Suit::PLAYABLE {
        for &rank in &Rank::STANDARD {
            deck.push(Card::new(rank, suit));
        }
    }

    deck.push(Card::new(Rank::Wild, Suit::BlackJoker));
    deck.push(Card {
        reverse_trigger: true,
        ..Card::new(Rank::Wild, Suit::RedJoker)
    });

    debug_assert_eq!(deck.len(), DECK_SIZE, "Deck must have exactly 54 cards");
    deck
}
