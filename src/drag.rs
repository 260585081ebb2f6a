//! The drag/drop protocol: Idle → Dragging → {Committed, Cancelled} → Idle.
//!
//! Lifted cards leave their source container when the drag starts and are
//! held here until the drag ends, so they can never be resolved as a drop
//! target themselves.

use log::debug;

use crate::board::Board;
use crate::card::{Card, CardId};
use crate::history::MoveRecord;
use crate::pile::{ContainerId, Highlight};

/// What the pointer is over, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Container(ContainerId),
    Card(CardId),
}

/// An active drag.
#[derive(Debug, Clone)]
pub struct Drag {
    cards: Vec<Card>,
    source: ContainerId,
    source_index: usize,
    hovered: Option<ContainerId>,
}

impl Drag {
    /// The lifted cards, bottom of the run first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn source(&self) -> ContainerId {
        self.source
    }

    pub fn hovered(&self) -> Option<ContainerId> {
        self.hovered
    }
}

#[derive(Debug, Clone, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Drag),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Committed(MoveRecord),
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    state: DragState,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn drag(&self) -> Option<&Drag> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Cards currently in flight (empty when idle).
    pub fn in_flight(&self) -> &[Card] {
        match self.drag() {
            Some(drag) => drag.cards(),
            None => &[],
        }
    }

    /// Lift `card` (and, in a tableau, everything above it). Returns the
    /// number of cards lifted.
    pub fn begin_drag(&mut self, board: &mut Board, card: CardId) -> Result<usize, &'static str> {
        if self.is_dragging() {
            return Err("A drag is already in progress");
        }
        if !board.is_movable(card) {
            return Err("That card cannot be moved");
        }

        let (source, source_index, cards) = board.lift(card)?;
        let count = cards.len();
        debug!("drag started from {} with {} card(s)", source.label(), count);
        self.state = DragState::Dragging(Drag {
            cards,
            source,
            source_index,
            hovered: None,
        });
        Ok(count)
    }

    /// Resolve what the pointer is over to a container that could take the
    /// drag. The drag's own source never qualifies.
    pub fn find_drop_target(&self, board: &Board, target: PointerTarget) -> Option<ContainerId> {
        let container = match target {
            PointerTarget::Container(id) => id,
            PointerTarget::Card(card) => board.find_container_of(card)?,
        };
        if board.sink(container).is_none() {
            return None;
        }
        match self.drag() {
            Some(drag) if drag.source == container => None,
            _ => Some(container),
        }
    }

    /// Pointer moved. Updates hover highlighting when the target changes and
    /// returns whether the current target would accept the drag.
    pub fn hover(&mut self, board: &mut Board, target: Option<PointerTarget>) -> Option<bool> {
        let resolved = target.and_then(|t| self.find_drop_target(board, t));
        let DragState::Dragging(drag) = &mut self.state else {
            return None;
        };
        let first = drag.cards[0];

        if drag.hovered != resolved {
            if let Some(old) = drag.hovered {
                board.set_highlight(old, Highlight::None);
            }
            if let Some(new) = resolved {
                let highlight = if board.can_accept(new, &first) {
                    Highlight::Accept
                } else {
                    Highlight::Reject
                };
                board.set_highlight(new, highlight);
            }
            drag.hovered = resolved;
        }

        resolved.map(|t| board.can_accept(t, &first))
    }

    /// Pointer released: commit onto the hovered target if it accepts,
    /// otherwise cancel.
    pub fn end_drag(&mut self, board: &mut Board) -> Result<DropOutcome, &'static str> {
        match self.drag().map(Drag::hovered) {
            None => Err("No drag in progress"),
            Some(Some(target)) => self.commit_drop(board, target),
            Some(None) => self.cancel_drop(board),
        }
    }

    /// Drop the dragged cards on `target`. An illegal target cancels the drag.
    pub fn commit_drop(
        &mut self,
        board: &mut Board,
        target: ContainerId,
    ) -> Result<DropOutcome, &'static str> {
        let DragState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return Err("No drag in progress");
        };

        let legal = target != drag.source && board.can_accept(target, &drag.cards[0]);
        let outcome = if legal {
            match board.commit_move(drag.source, drag.source_index, target, drag.cards) {
                Some(record) => DropOutcome::Committed(record),
                None => DropOutcome::Cancelled,
            }
        } else {
            debug!("drop on {} rejected", target.label());
            board.restore(drag.source, drag.source_index, drag.cards);
            DropOutcome::Cancelled
        };

        board.clear_highlights();
        Ok(outcome)
    }

    /// Put the dragged cards back where they were.
    pub fn cancel_drop(&mut self, board: &mut Board) -> Result<DropOutcome, &'static str> {
        let DragState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return Err("No drag in progress");
        };
        debug!("drag from {} cancelled", drag.source.label());
        board.restore(drag.source, drag.source_index, drag.cards);
        board.clear_highlights();
        Ok(DropOutcome::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use crate::pile::{Sink, Source, Tableau};

    fn up(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit).face_up()
    }

    fn down(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn layout() -> Board {
        let mut board = Board::empty();
        board.tableaus[0] = Tableau::from_cards(vec![
            down(Rank::Two, Suit::Clubs),
            up(Rank::Nine, Suit::Spades),
            up(Rank::Eight, Suit::Diamonds),
        ]);
        board.tableaus[1] = Tableau::from_cards(vec![up(Rank::Ten, Suit::Hearts)]);
        board
    }

    #[test]
    fn only_one_drag_at_a_time() {
        let mut board = layout();
        let mut drag = DragCoordinator::new();
        let nine = CardId::new(Rank::Nine, Suit::Spades);

        assert_eq!(drag.begin_drag(&mut board, nine), Ok(2));
        assert!(drag.is_dragging());
        assert!(drag.begin_drag(&mut board, CardId::new(Rank::Ten, Suit::Hearts)).is_err());
    }

    #[test]
    fn buried_card_cannot_be_lifted() {
        let mut board = layout();
        let mut drag = DragCoordinator::new();
        let two = CardId::new(Rank::Two, Suit::Clubs);
        assert!(drag.begin_drag(&mut board, two).is_err());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn hover_highlights_and_clears_on_change() {
        let mut board = layout();
        let mut drag = DragCoordinator::new();
        drag.begin_drag(&mut board, CardId::new(Rank::Nine, Suit::Spades))
            .unwrap();

        let accepts = drag.hover(&mut board, Some(PointerTarget::Container(ContainerId::Tableau(1))));
        assert_eq!(accepts, Some(true));
        assert_eq!(board.tableaus[1].highlight(), Highlight::Accept);

        let accepts = drag.hover(&mut board, Some(PointerTarget::Container(ContainerId::Tableau(2))));
        assert_eq!(accepts, Some(false));
        assert_eq!(board.tableaus[1].highlight(), Highlight::None);
        assert_eq!(board.tableaus[2].highlight(), Highlight::Reject);

        drag.cancel_drop(&mut board).unwrap();
        assert!(ContainerId::sinks().all(|id| board.sink(id).unwrap().highlight() == Highlight::None));
    }

    #[test]
    fn source_and_talon_are_never_targets() {
        let mut board = layout();
        let mut drag = DragCoordinator::new();
        drag.begin_drag(&mut board, CardId::new(Rank::Eight, Suit::Diamonds))
            .unwrap();

        let over_source = PointerTarget::Container(ContainerId::Tableau(0));
        assert_eq!(drag.find_drop_target(&board, over_source), None);
        let over_talon = PointerTarget::Container(ContainerId::Talon);
        assert_eq!(drag.find_drop_target(&board, over_talon), None);
        let over_flying = PointerTarget::Card(CardId::new(Rank::Eight, Suit::Diamonds));
        assert_eq!(drag.find_drop_target(&board, over_flying), None);
    }

    #[test]
    fn release_over_accepting_target_commits_and_reveals() {
        let mut board = layout();
        let mut drag = DragCoordinator::new();
        drag.begin_drag(&mut board, CardId::new(Rank::Nine, Suit::Spades))
            .unwrap();
        drag.hover(&mut board, Some(PointerTarget::Card(CardId::new(Rank::Ten, Suit::Hearts))));

        let outcome = drag.end_drag(&mut board).unwrap();
        let DropOutcome::Committed(record) = outcome else {
            panic!("expected a committed drop");
        };
        assert_eq!(record.source, ContainerId::Tableau(0));
        assert_eq!(record.dest, ContainerId::Tableau(1));
        assert_eq!(record.flipped, Some(CardId::new(Rank::Two, Suit::Clubs)));

        assert_eq!(board.tableaus[1].len(), 3);
        assert!(board.tableaus[0].cards()[0].face_up);
        assert_eq!(board.history().len(), 1);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn release_with_no_target_restores_order() {
        let mut board = layout();
        let before = board.tableaus[0].cards().to_vec();
        let mut drag = DragCoordinator::new();
        drag.begin_drag(&mut board, CardId::new(Rank::Nine, Suit::Spades))
            .unwrap();
        assert_eq!(board.tableaus[0].len(), 1);
        assert_eq!(drag.in_flight().len(), 2);

        assert_eq!(drag.end_drag(&mut board), Ok(DropOutcome::Cancelled));
        assert_eq!(board.tableaus[0].cards(), before.as_slice());
        assert!(board.history().is_empty());
        assert!(drag.in_flight().is_empty());
    }

    #[test]
    fn illegal_commit_is_a_cancel() {
        let mut board = layout();
        let mut drag = DragCoordinator::new();
        drag.begin_drag(&mut board, CardId::new(Rank::Eight, Suit::Diamonds))
            .unwrap();
        let outcome = drag.commit_drop(&mut board, ContainerId::Foundation(0));
        assert_eq!(outcome, Ok(DropOutcome::Cancelled));
        assert_eq!(board.tableaus[0].len(), 3);
        assert!(board.drain_events().is_empty());
    }

    #[test]
    fn end_drag_without_drag_is_rejected() {
        let mut board = layout();
        let mut drag = DragCoordinator::new();
        assert!(drag.end_drag(&mut board).is_err());
        assert!(drag.cancel_drop(&mut board).is_err());
        assert_eq!(drag.hover(&mut board, None), None);
    }
}
