//! Klondike solitaire with a reversible ruleset.
//!
//! The rules engine (`board`, `pile`, `drag`, `history`) is independent of
//! any front end; `game`, `command` and `renderer` wire it to a terminal.

pub mod board;
pub mod card;
pub mod command;
pub mod deck;
pub mod drag;
pub mod event;
pub mod game;
pub mod history;
pub mod pile;
pub mod renderer;

pub use board::{Board, GameStatus, StockClick};
pub use card::{Card, CardId, Rank, Suit};
pub use drag::{DragCoordinator, DropOutcome, PointerTarget};
pub use event::Event;
pub use pile::{ContainerId, PlayDirection};
