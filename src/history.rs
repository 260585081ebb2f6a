use crate::card::CardId;
use crate::pile::ContainerId;

/// One completed move, stored as plain values so later moves cannot alias it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Moved cards in lift order (bottom of the run first).
    pub cards: Vec<CardId>,
    pub source: ContainerId,
    /// Index in the source the first card occupied before the move; card `i`
    /// sat at `source_index + i`.
    pub source_index: usize,
    pub dest: ContainerId,
    /// The tableau card the move exposed and turned face up, if any.
    pub flipped: Option<CardId>,
}

/// The undo stack.
#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn record(rank: Rank) -> MoveRecord {
        MoveRecord {
            cards: vec![CardId::new(rank, Suit::Clubs)],
            source: ContainerId::Talon,
            source_index: 0,
            dest: ContainerId::Tableau(0),
            flipped: None,
        }
    }

    #[test]
    fn pops_in_reverse_push_order() {
        let mut history = MoveHistory::new();
        assert!(!history.can_undo());
        assert!(history.pop().is_none());

        history.push(record(Rank::Ace));
        history.push(record(Rank::Two));
        assert_eq!(history.len(), 2);

        assert_eq!(history.pop(), Some(record(Rank::Two)));
        assert_eq!(history.pop(), Some(record(Rank::Ace)));
        assert!(history.is_empty());
    }
}
