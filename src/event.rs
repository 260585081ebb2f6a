use serde::{Deserialize, Serialize};

use crate::card::CardId;
use crate::pile::PlayDirection;

/// Notifications the board queues for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Up to three cards moved from the stock to the talon.
    Dealt { count: usize },
    CardFlipped { card: CardId, face_up: bool },
    ModeToggled { direction: PlayDirection },
    /// The talon was recycled into an empty stock; `level` is the warning
    /// level (1 to 3).
    StockReloaded { level: u8 },
    Won,
    Lost,
}
