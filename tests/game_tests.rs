//! The text session, driven line by line with a recording renderer.

use std::time::Duration;

use revsol::board::{Board, GameStatus};
use revsol::card::{Card, Rank, Suit};
use revsol::drag::Drag;
use revsol::event::Event;
use revsol::game::Game;
use revsol::pile::{PlayDirection, Tableau};
use revsol::renderer::Renderer;

#[derive(Debug, Default)]
struct Recording {
    renders: usize,
    infos: Vec<String>,
    errors: Vec<String>,
    events: Vec<Event>,
    wins: usize,
    losses: usize,
}

impl Renderer for Recording {
    fn render(&mut self, _board: &Board, _drag: Option<&Drag>, _elapsed: Duration) {
        self.renders += 1;
    }

    fn info(&mut self, msg: &str) {
        self.infos.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn event(&mut self, event: &Event) {
        self.events.push(event.clone());
    }

    fn help(&mut self) {}

    fn win(&mut self) {
        self.wins += 1;
    }

    fn lose(&mut self) {
        self.losses += 1;
    }
}

fn up(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit).face_up()
}

fn layout() -> Board {
    let mut board = Board::empty();
    board.tableaus[0] = Tableau::from_cards(vec![
        Card::new(Rank::Two, Suit::Clubs),
        up(Rank::Nine, Suit::Spades),
        up(Rank::Eight, Suit::Diamonds),
    ]);
    board.tableaus[1] = Tableau::from_cards(vec![up(Rank::Ten, Suit::Hearts)]);
    board
}

#[test]
fn move_command_runs_the_whole_drag() {
    let mut game = Game::new(layout(), Recording::default());
    assert!(!game.execute("mv t0:1 t1"));

    assert_eq!(game.board().tableaus[1].len(), 3);
    assert!(game.renderer().errors.is_empty());
    assert!(matches!(
        game.renderer().events.as_slice(),
        [Event::CardFlipped { face_up: true, .. }]
    ));

    assert!(!game.execute("undo"));
    assert_eq!(game.board().tableaus[0].len(), 3);
    assert_eq!(game.board().tableaus[1].len(), 1);

    game.execute("undo");
    assert_eq!(game.renderer().errors, vec!["Nothing to undo.".to_string()]);
}

#[test]
fn illegal_move_is_reported_and_undone() {
    let mut game = Game::new(layout(), Recording::default());
    game.execute("mv t0 f0");
    assert_eq!(game.renderer().errors, vec!["Illegal move".to_string()]);
    assert_eq!(game.board().tableaus[0].len(), 3);
    assert!(!game.board().can_undo());
}

#[test]
fn step_by_step_drag() {
    let mut game = Game::new(layout(), Recording::default());
    game.execute("lift t0:1");
    assert!(game.drag().is_dragging());
    assert_eq!(game.drag().in_flight().len(), 2);

    game.execute("draw");
    assert_eq!(game.renderer().errors.len(), 1);

    game.execute("hover t3");
    assert_eq!(
        game.renderer().infos.last().map(String::as_str),
        Some("Target would reject the drop.")
    );
    game.execute("hover t1");
    assert_eq!(
        game.renderer().infos.last().map(String::as_str),
        Some("Target would accept the drop.")
    );
    game.execute("drop");

    assert!(!game.drag().is_dragging());
    assert_eq!(game.board().tableaus[1].len(), 3);
}

#[test]
fn cancel_returns_the_cards() {
    let mut game = Game::new(layout(), Recording::default());
    game.execute("lift t0:1");
    game.execute("cancel");
    assert!(!game.drag().is_dragging());
    assert_eq!(game.board().tableaus[0].len(), 3);

    game.execute("cancel");
    assert_eq!(game.renderer().errors.len(), 1);
}

#[test]
fn stock_escalation_ends_in_a_loss() {
    let mut game = Game::new(Board::empty(), Recording::default());
    for _ in 0..4 {
        game.execute("d");
    }
    assert_eq!(game.board().status(), GameStatus::Lost);
    assert_eq!(game.renderer().losses, 1);
    assert_eq!(
        game.renderer().events,
        vec![
            Event::StockReloaded { level: 1 },
            Event::StockReloaded { level: 2 },
            Event::StockReloaded { level: 3 },
            Event::Lost,
        ]
    );

    game.execute("mv t0 t1");
    assert_eq!(
        game.renderer().errors.last().map(String::as_str),
        Some("The game is over. Type 'new' to play again.")
    );

    game.execute("new");
    assert_eq!(game.board().status(), GameStatus::Playing);
    assert_eq!(game.board().reload_level(), 0);
}

#[test]
fn trigger_command_needs_a_face_up_trigger() {
    let mut board = Board::empty();
    board.tableaus[2] = Tableau::from_cards(vec![Card {
        reverse_trigger: true,
        ..up(Rank::Wild, Suit::RedJoker)
    }]);
    let mut game = Game::new(board, Recording::default());

    game.execute("trigger");
    assert!(game.board().is_reversed());
    assert!(game.renderer().events.contains(&Event::ModeToggled {
        direction: PlayDirection::Reversed
    }));

    game.execute("trigger");
    assert_eq!(
        game.renderer().errors,
        vec!["The reverse trigger is not face up on the table.".to_string()]
    );
}

#[test]
fn quit_and_parse_errors() {
    let mut game = Game::new(Board::empty(), Recording::default());
    assert!(!game.execute("fly t0"));
    assert_eq!(game.renderer().errors.len(), 1);
    assert_eq!(game.renderer().renders, 0);
    assert!(game.execute("quit"));
}

#[test]
fn oversized_depth_is_rejected() {
    let mut board = Board::empty();
    board.tableaus[0] = Tableau::from_cards(vec![up(Rank::Nine, Suit::Spades)]);
    board.tableaus[1] = Tableau::from_cards(vec![up(Rank::Ten, Suit::Hearts)]);
    let mut game = Game::new(board, Recording::default());

    game.execute("mv t0:18446744073709551615 t1");
    assert_eq!(
        game.renderer().errors,
        vec!["There is no card there".to_string()]
    );
    assert_eq!(game.board().tableaus[0].len(), 1);
    assert_eq!(game.board().tableaus[1].len(), 1);
    assert!(!game.drag().is_dragging());
}

#[test]
fn trigger_command_ignores_a_buried_talon_trigger() {
    let mut board = Board::empty();
    board.talon.add(Card {
        reverse_trigger: true,
        ..up(Rank::Wild, Suit::RedJoker)
    });
    for rank in [Rank::Ace, Rank::Two, Rank::Three] {
        board.talon.add(up(rank, Suit::Clubs));
    }
    let mut game = Game::new(board, Recording::default());

    game.execute("trigger");
    assert!(!game.board().is_reversed());
    assert_eq!(game.board().talon.len(), 4);
    assert_eq!(
        game.renderer().errors,
        vec!["The reverse trigger is not face up on the table.".to_string()]
    );
}
