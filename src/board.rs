use log::{debug, info, warn};

use crate::card::{Card, CardId, Suit};
use crate::deck::Deck;
use crate::event::Event;
use crate::history::{MoveHistory, MoveRecord};
use crate::pile::{
    ContainerId, Foundation, Highlight, NUM_FOUNDATIONS, NUM_TABLEAUS, PlayDirection, Sink,
    Source, Tableau, Talon,
};

/// Cards moved from the stock to the talon per click.
pub const DRAW_COUNT: usize = 3;
/// Talon recycles allowed before an empty-stock click loses the game.
pub const MAX_RELOADS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// What a click on the stock did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockClick {
    Dealt(usize),
    /// The talon went back into the stock; carries the new warning level.
    Reloaded(u8),
    Lost,
    /// The game is over; nothing happened.
    Ignored,
}

/// The game board: the single source of truth for all game state.
#[derive(Debug, Clone)]
pub struct Board {
    /// The stock.
    pub deck: Deck,
    pub talon: Talon,
    /// One pile per playable suit, in `Suit::PLAYABLE` order.
    pub foundations: [Foundation; NUM_FOUNDATIONS],
    /// 7 tableau columns; index 0 is leftmost.
    pub tableaus: [Tableau; NUM_TABLEAUS],
    direction: PlayDirection,
    reloads: u8,
    status: GameStatus,
    trigger_consumed: bool,
    history: MoveHistory,
    events: Vec<Event>,
}

impl Board {
    // -------------------------------------------------------------------------
    // Construction / Dealing
    // -------------------------------------------------------------------------

    /// Deal a fresh game, shuffled from `seed` when one is given.
    pub fn new(seed: Option<u64>) -> Self {
        let deck = match seed {
            Some(seed) => Deck::seeded(seed),
            None => Deck::shuffled(),
        };
        Self::from_deck(deck)
    }

    /// A table with every container empty (for building test layouts).
    pub fn empty() -> Self {
        Board {
            deck: Deck::default(),
            talon: Talon::new(),
            foundations: Suit::PLAYABLE.map(Foundation::new),
            tableaus: std::array::from_fn(|_| Tableau::new()),
            direction: PlayDirection::Normal,
            reloads: 0,
            status: GameStatus::Playing,
            trigger_consumed: false,
            history: MoveHistory::new(),
            events: Vec::new(),
        }
    }

    /// Deal the standard triangle from `deck`: column `i` gets `i` face-down
    /// cards and one face-up card. Whatever is left stays in the stock.
    pub fn from_deck(deck: Deck) -> Self {
        let mut board = Board {
            deck,
            ..Self::empty()
        };

        for col in 0..NUM_TABLEAUS {
            for _ in 0..=col {
                let Some(mut card) = board.deck.acquire() else {
                    break;
                };
                card.face_up = false;
                board.tableaus[col].drop_card(card);
            }
            board.tableaus[col].reveal_top();
        }

        info!("dealt new game, {} cards left in stock", board.deck.len());
        board
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    pub fn is_reversed(&self) -> bool {
        self.direction == PlayDirection::Reversed
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Once won or lost, every container is frozen.
    pub fn is_frozen(&self) -> bool {
        self.status != GameStatus::Playing
    }

    /// Stock-reload warning level, 0 to 3.
    pub fn reload_level(&self) -> u8 {
        self.reloads.min(MAX_RELOADS)
    }

    pub fn trigger_consumed(&self) -> bool {
        self.trigger_consumed
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.is_frozen() && self.history.can_undo()
    }

    /// Take every notification queued since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn source(&self, id: ContainerId) -> Option<&dyn Source> {
        match id {
            ContainerId::Talon => Some(&self.talon as &dyn Source),
            ContainerId::Foundation(i) => self.foundations.get(i).map(|f| f as &dyn Source),
            ContainerId::Tableau(i) => self.tableaus.get(i).map(|t| t as &dyn Source),
        }
    }

    pub fn source_mut(&mut self, id: ContainerId) -> Option<&mut dyn Source> {
        match id {
            ContainerId::Talon => Some(&mut self.talon as &mut dyn Source),
            ContainerId::Foundation(i) => {
                self.foundations.get_mut(i).map(|f| f as &mut dyn Source)
            }
            ContainerId::Tableau(i) => self.tableaus.get_mut(i).map(|t| t as &mut dyn Source),
        }
    }

    pub fn sink(&self, id: ContainerId) -> Option<&dyn Sink> {
        match id {
            ContainerId::Talon => None,
            ContainerId::Foundation(i) => self.foundations.get(i).map(|f| f as &dyn Sink),
            ContainerId::Tableau(i) => self.tableaus.get(i).map(|t| t as &dyn Sink),
        }
    }

    pub fn sink_mut(&mut self, id: ContainerId) -> Option<&mut dyn Sink> {
        match id {
            ContainerId::Talon => None,
            ContainerId::Foundation(i) => self.foundations.get_mut(i).map(|f| f as &mut dyn Sink),
            ContainerId::Tableau(i) => self.tableaus.get_mut(i).map(|t| t as &mut dyn Sink),
        }
    }

    /// Every card still in play: stock, talon, foundations, then tableaus.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.deck.iter().copied().collect();
        for id in ContainerId::all() {
            if let Some(source) = self.source(id) {
                cards.extend_from_slice(source.cards());
            }
        }
        cards
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Is `card` at the top of some container's movable run?
    pub fn is_movable(&self, card: CardId) -> bool {
        ContainerId::all().any(|id| {
            self.source(id)
                .is_some_and(|s| s.movable_cards().iter().any(|c| c.id() == card))
        })
    }

    /// The container currently holding `card`, if any. Stock cards and cards
    /// in flight belong to no container.
    pub fn find_container_of(&self, card: CardId) -> Option<ContainerId> {
        ContainerId::all().find(|&id| self.source(id).is_some_and(|s| s.contains(card)))
    }

    /// Would `dest` take `card` under the current play direction?
    pub fn can_accept(&self, dest: ContainerId, card: &Card) -> bool {
        self.sink(dest)
            .is_some_and(|s| s.can_accept(card, self.direction))
    }

    /// All four foundations hold a full suit.
    pub fn has_won(&self) -> bool {
        self.foundations.iter().all(Foundation::is_complete)
    }

    pub fn set_highlight(&mut self, id: ContainerId, highlight: Highlight) {
        if let Some(sink) = self.sink_mut(id) {
            sink.set_highlight(highlight);
        }
    }

    pub fn clear_highlights(&mut self) {
        for id in ContainerId::sinks() {
            self.set_highlight(id, Highlight::None);
        }
    }

    // -------------------------------------------------------------------------
    // Move Execution
    // -------------------------------------------------------------------------

    /// Detach `card` and the run above it from its container.
    /// Returns the source, the index the run started at, and the cards.
    pub(crate) fn lift(
        &mut self,
        card: CardId,
    ) -> Result<(ContainerId, usize, Vec<Card>), &'static str> {
        if self.is_frozen() {
            return Err("The game is over");
        }
        let source = self
            .find_container_of(card)
            .ok_or("That card is not on the table")?;
        let (index, cards) = self
            .source_mut(source)
            .and_then(|s| s.lift(card))
            .ok_or("That card cannot be moved")?;
        debug!("lifted {} card(s) from {}", cards.len(), source.label());
        Ok((source, index, cards))
    }

    /// Put lifted cards back where they came from.
    pub(crate) fn restore(&mut self, source: ContainerId, index: usize, cards: Vec<Card>) {
        if let Some(src) = self.source_mut(source) {
            src.restore(index, cards);
        }
    }

    /// Drop lifted cards on `dest`, reveal the card they uncovered, and record
    /// the move. Legality has already been checked by the caller.
    pub(crate) fn commit_move(
        &mut self,
        source: ContainerId,
        source_index: usize,
        dest: ContainerId,
        cards: Vec<Card>,
    ) -> Option<MoveRecord> {
        if self.sink(dest).is_none() {
            self.restore(source, source_index, cards);
            return None;
        }

        let ids: Vec<CardId> = cards.iter().map(Card::id).collect();
        if let Some(sink) = self.sink_mut(dest) {
            for card in cards {
                sink.drop_card(card);
            }
        }

        let flipped = match source {
            ContainerId::Tableau(i) => self.tableaus[i].reveal_top(),
            _ => None,
        };
        if let Some(card) = flipped {
            self.events.push(Event::CardFlipped {
                card,
                face_up: true,
            });
        }

        let record = MoveRecord {
            cards: ids,
            source,
            source_index,
            dest,
            flipped,
        };
        info!(
            "moved {} card(s) {} -> {}",
            record.cards.len(),
            source.label(),
            dest.label()
        );
        self.record_move(record.clone());

        if matches!(dest, ContainerId::Foundation(_)) {
            self.check_win();
        }
        Some(record)
    }

    /// Push a completed move onto the undo stack. Containers are not touched.
    pub fn record_move(&mut self, record: MoveRecord) {
        self.history.push(record);
    }

    /// Reverse the most recent move. Returns `false` when there is nothing to
    /// undo or the game is over.
    pub fn undo(&mut self) -> bool {
        if self.is_frozen() {
            return false;
        }
        let Some(record) = self.history.pop() else {
            return false;
        };

        if let Some(flipped) = record.flipped {
            let turned = self
                .source_mut(record.source)
                .and_then(|s| s.card_mut(flipped))
                .map(|card| card.face_up = false)
                .is_some();
            if turned {
                self.events.push(Event::CardFlipped {
                    card: flipped,
                    face_up: false,
                });
            }
        }

        let mut cards = Vec::with_capacity(record.cards.len());
        for &id in record.cards.iter().rev() {
            match self.source_mut(record.dest).and_then(|d| d.remove_anywhere(id)) {
                Some(card) => cards.push(card),
                None => warn!("undo: {} no longer in {}", id.label(), record.dest.label()),
            }
        }
        cards.reverse();
        self.restore(record.source, record.source_index, cards);

        info!(
            "undid move {} -> {}",
            record.source.label(),
            record.dest.label()
        );
        true
    }

    // -------------------------------------------------------------------------
    // Reverse Mode
    // -------------------------------------------------------------------------

    /// Flip the play direction and reverse every column's face-up run.
    pub fn toggle_reverse_mode(&mut self) {
        self.direction = self.direction.toggled();
        for col in self.tableaus.iter_mut() {
            col.reverse_order();
        }
        info!("play direction is now {:?}", self.direction);
        self.events.push(Event::ModeToggled {
            direction: self.direction,
        });
    }

    /// Play the face-up reverse trigger: toggle the mode, then take the card
    /// out of the game for good. Returns `false` if `card` is not a face-up
    /// trigger the player can reach (top of the talon, or in a column's
    /// face-up run).
    pub fn activate_reverse_trigger(&mut self, card: CardId) -> bool {
        if self.is_frozen() {
            return false;
        }
        let Some(container) = self.find_container_of(card) else {
            return false;
        };
        let playable = self
            .source(container)
            .and_then(|s| s.cards().iter().find(|c| c.id() == card))
            .is_some_and(|c| c.reverse_trigger && c.face_up);
        if !playable || !self.is_movable(card) {
            return false;
        }

        self.toggle_reverse_mode();
        match container {
            ContainerId::Talon => {
                self.talon.remove(card);
            }
            _ => {
                if let Some(src) = self.source_mut(container) {
                    src.remove_anywhere(card);
                }
            }
        }
        if let ContainerId::Tableau(i) = container {
            if let Some(exposed) = self.tableaus[i].reveal_top() {
                self.events.push(Event::CardFlipped {
                    card: exposed,
                    face_up: true,
                });
            }
        }
        self.trigger_consumed = true;
        info!("reverse trigger consumed from {}", container.label());
        true
    }

    // -------------------------------------------------------------------------
    // Stock
    // -------------------------------------------------------------------------

    /// Click the stock. Deals up to three cards while the stock has any; on
    /// an empty stock, recycles the talon up to three times and loses on the
    /// fourth click.
    pub fn click_stock(&mut self) -> StockClick {
        if self.is_frozen() {
            return StockClick::Ignored;
        }

        if !self.deck.is_empty() {
            let mut count = 0;
            while count < DRAW_COUNT {
                let Some(card) = self.deck.acquire() else {
                    break;
                };
                self.talon.add(card);
                count += 1;
            }
            debug!("dealt {} card(s) to the talon", count);
            self.events.push(Event::Dealt { count });
            return StockClick::Dealt(count);
        }

        self.reloads += 1;
        if self.reloads > MAX_RELOADS {
            self.status = GameStatus::Lost;
            info!("stock exhausted after {} reloads, game lost", MAX_RELOADS);
            self.events.push(Event::Lost);
            return StockClick::Lost;
        }

        self.talon.release_into(&mut self.deck);
        info!("stock reloaded, warning level {}", self.reloads);
        self.events.push(Event::StockReloaded {
            level: self.reloads,
        });
        StockClick::Reloaded(self.reloads)
    }

    // -------------------------------------------------------------------------
    // Win Condition
    // -------------------------------------------------------------------------

    fn check_win(&mut self) {
        if self.status == GameStatus::Playing && self.has_won() {
            self.status = GameStatus::Won;
            info!("all foundations complete, game won");
            self.events.push(Event::Won);
        }
    }
}
