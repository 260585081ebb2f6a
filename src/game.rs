use std::io::{self, BufRead, Write};
use std::time::Instant;

use log::debug;

use crate::board::{Board, StockClick};
use crate::card::CardId;
use crate::command::{Command, Spot, parse_command};
use crate::drag::{DragCoordinator, DropOutcome, PointerTarget};
use crate::event::Event;
use crate::renderer::Renderer;

/// One play session.  `renderer` is injected so the engine stays
/// renderer-agnostic.
pub struct Game<R: Renderer> {
    board: Board,
    drag: DragCoordinator,
    renderer: R,
    started: Instant,
}

impl<R: Renderer> Game<R> {
    /// Deal a game, reproducible when `seed` is given.
    pub fn init(seed: Option<u64>, renderer: R) -> Self {
        Self::new(Board::new(seed), renderer)
    }

    pub fn new(board: Board, renderer: R) -> Self {
        Game {
            board,
            drag: DragCoordinator::new(),
            renderer,
            started: Instant::now(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn drag(&self) -> &DragCoordinator {
        &self.drag
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run the interactive game loop until the player quits or stdin closes.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        self.render();

        loop {
            print!("> ");
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF
                break;
            }

            if self.execute(&line) {
                break;
            }
        }
        Ok(())
    }

    /// Parse and apply one line of input, then report and redraw.
    /// Returns `true` if the game should exit.
    pub fn execute(&mut self, line: &str) -> bool {
        let cmd = match parse_command(line) {
            Ok(cmd) => cmd,
            Err(e) => {
                self.renderer.error(&e);
                return false;
            }
        };
        debug!("command: {:?}", cmd);

        if self.handle(cmd) {
            return true;
        }
        self.flush_events();
        self.render();
        false
    }

    fn render(&mut self) {
        let elapsed = self.started.elapsed();
        self.renderer
            .render(&self.board, self.drag.drag(), elapsed);
    }

    fn flush_events(&mut self) {
        for event in self.board.drain_events() {
            self.renderer.event(&event);
            match event {
                Event::Won => self.renderer.win(),
                Event::Lost => self.renderer.lose(),
                _ => {}
            }
        }
    }

    /// Dispatch a command.  Returns `true` if the game should exit.
    fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Quit => {
                self.renderer.info("Thanks for playing. Goodbye!");
                return true;
            }
            Command::Help => self.renderer.help(),
            Command::NewGame => {
                self.board = Board::new(None);
                self.drag = DragCoordinator::new();
                self.started = Instant::now();
                self.renderer.info("A new game has been dealt.");
            }
            _ if self.board.is_frozen() => {
                self.renderer
                    .error("The game is over. Type 'new' to play again.");
            }
            Command::Lift(spot) => {
                if let Err(e) = self.lift(spot) {
                    self.renderer.error(e);
                }
            }
            Command::Hover(target) => {
                if !self.drag.is_dragging() {
                    self.renderer.error("Nothing is being dragged.");
                    return false;
                }
                let pointer = target.map(PointerTarget::Container);
                match self.drag.hover(&mut self.board, pointer) {
                    Some(true) => self.renderer.info("Target would accept the drop."),
                    Some(false) => self.renderer.info("Target would reject the drop."),
                    None => self.renderer.info("Not over a drop target."),
                }
            }
            Command::Drop => match self.drag.end_drag(&mut self.board) {
                Ok(DropOutcome::Committed(_)) => {}
                Ok(DropOutcome::Cancelled) => self.renderer.error("Illegal move"),
                Err(e) => self.renderer.error(e),
            },
            Command::Cancel => {
                if let Err(e) = self.drag.cancel_drop(&mut self.board) {
                    self.renderer.error(e);
                }
            }
            _ if self.drag.is_dragging() => {
                self.renderer
                    .error("Finish the current drag first (drop or cancel).");
            }
            Command::Move { src, dst } => {
                if let Err(e) = self.lift(src) {
                    self.renderer.error(e);
                    return false;
                }
                self.drag
                    .hover(&mut self.board, Some(PointerTarget::Container(dst)));
                match self.drag.end_drag(&mut self.board) {
                    Ok(DropOutcome::Committed(_)) => {}
                    Ok(DropOutcome::Cancelled) => self.renderer.error("Illegal move"),
                    Err(e) => self.renderer.error(e),
                }
            }
            Command::Draw => match self.board.click_stock() {
                StockClick::Ignored => self.renderer.error("The stock cannot be used now."),
                StockClick::Dealt(_) | StockClick::Reloaded(_) | StockClick::Lost => {}
            },
            Command::Trigger => {
                let played = self
                    .reachable_trigger()
                    .is_some_and(|id| self.board.activate_reverse_trigger(id));
                if !played {
                    self.renderer
                        .error("The reverse trigger is not face up on the table.");
                }
            }
            Command::Undo => {
                if !self.board.undo() {
                    self.renderer.error("Nothing to undo.");
                }
            }
        }
        false
    }

    fn lift(&mut self, spot: Spot) -> Result<usize, &'static str> {
        let card = self.card_at(spot)?;
        self.drag.begin_drag(&mut self.board, card)
    }

    /// The card `spot.depth` below the top of `spot.container`.
    fn card_at(&self, spot: Spot) -> Result<CardId, &'static str> {
        let cards = self
            .board
            .source(spot.container)
            .map(|s| s.cards())
            .ok_or("No such pile")?;
        let index = spot
            .depth
            .checked_add(1)
            .and_then(|n| cards.len().checked_sub(n))
            .ok_or("There is no card there")?;
        Ok(cards[index].id())
    }

    fn reachable_trigger(&self) -> Option<CardId> {
        self.board
            .all_cards()
            .into_iter()
            .find(|c| c.reverse_trigger && c.face_up && self.board.is_movable(c.id()))
            .map(|c| c.id())
    }
}
