use std::time::Duration;

use crossterm::style::{StyledContent, Stylize};

use crate::board::{Board, MAX_RELOADS};
use crate::card::{Card, CardFace, Suit};
use crate::drag::Drag;
use crate::event::Event;
use crate::pile::{ContainerId, Highlight, NUM_TABLEAUS, PlayDirection, Sink, Source};

/// Trait that abstracts the presentation layer.
///
/// The engine never calls it; `Game` does, after each command, so the rules
/// stay independent of how they are shown.
pub trait Renderer {
    /// Render the full table, including any cards in flight.
    fn render(&mut self, board: &Board, drag: Option<&Drag>, elapsed: Duration);
    /// Display an informational message.
    fn info(&mut self, msg: &str);
    /// Display an error message.
    fn error(&mut self, msg: &str);
    /// React to a notification from the board.
    fn event(&mut self, event: &Event);
    /// Display the help text.
    fn help(&mut self);
    /// Display the win screen.
    fn win(&mut self);
    /// Display the loss screen.
    fn lose(&mut self);
}

// ---------------------------------------------------------------------------
// CLI Renderer
// ---------------------------------------------------------------------------

/// A plain-terminal renderer styled with crossterm.
#[derive(Debug, Default)]
pub struct CliRenderer;

impl CliRenderer {
    pub fn new() -> Self {
        CliRenderer
    }

    fn card_str(&self, card: &Card) -> String {
        let label = format!("{:>3}", card.label());
        let styled: StyledContent<String> = match card.face() {
            CardFace::Back => label.dark_blue(),
            CardFace::TriggerBack => label.magenta().bold(),
            CardFace::SuitOnly(_) => label.magenta(),
            CardFace::Face(_, suit) if suit.is_red() => label.red(),
            CardFace::Face(_, _) => label.grey(),
        };
        format!("[{}]", styled)
    }

    fn slot_label(&self, board: &Board, id: ContainerId) -> String {
        let label = id.label();
        match board.sink(id).map(|s| s.highlight()) {
            Some(Highlight::Accept) => format!("{}", label.on_dark_green()),
            Some(Highlight::Reject) => format!("{}", label.on_dark_red()),
            _ => label,
        }
    }

    fn empty_slot(&self, suit: Option<Suit>) -> String {
        match suit {
            Some(suit) => format!("[ {} ]", suit.symbol()),
            None => "[   ]".to_string(),
        }
    }
}

fn clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

impl Renderer for CliRenderer {
    fn render(&mut self, board: &Board, drag: Option<&Drag>, elapsed: Duration) {
        println!();

        // ---- Status line ----
        let mode = match board.direction() {
            PlayDirection::Normal => "NORMAL".to_string(),
            PlayDirection::Reversed => format!("{}", "REVERSED".magenta().bold()),
        };
        let warning = match board.reload_level() {
            0 => "-".to_string(),
            level => format!("{}", format!("{}/{}", level, MAX_RELOADS).yellow()),
        };
        println!(
            "  MODE: {}   RELOADS: {}   TIME: {}   MOVES: {}",
            mode,
            warning,
            clock(elapsed),
            board.history().len()
        );
        println!();

        // ---- Top row: stock | talon | foundations ----
        if board.deck.is_empty() {
            print!("  STOCK: {}  ", self.empty_slot(None));
        } else {
            print!("  STOCK: [{:>3}]  ", board.deck.len());
        }

        print!("  {}: ", self.slot_label(board, ContainerId::Talon));
        let talon = board.talon.cards();
        if talon.is_empty() {
            print!("{} ", self.empty_slot(None));
        }
        for card in &talon[talon.len().saturating_sub(3)..] {
            print!("{}", self.card_str(card));
        }

        print!("    ");
        for (i, pile) in board.foundations.iter().enumerate() {
            let slot = match pile.top() {
                Some(card) => self.card_str(card),
                None => self.empty_slot(Some(pile.suit())),
            };
            print!(
                "{}:{} ",
                self.slot_label(board, ContainerId::Foundation(i)),
                slot
            );
        }
        println!();

        // ---- Column indices header ----
        println!();
        print!("        ");
        for i in 0..NUM_TABLEAUS {
            print!(" {:^5} ", self.slot_label(board, ContainerId::Tableau(i)));
        }
        println!();

        // ---- Tableau ----
        let max_len = board.tableaus.iter().map(|c| c.len()).max().unwrap_or(0);
        for row in 0..max_len {
            print!("  {:>3}:  ", row);
            for col in &board.tableaus {
                match col.cards().get(row) {
                    Some(card) => print!(" {} ", self.card_str(card)),
                    None => print!("   ..  "),
                }
            }
            println!();
        }

        // ---- In flight ----
        if let Some(drag) = drag {
            println!();
            print!("  IN HAND (from {}): ", drag.source().label());
            for card in drag.cards() {
                print!("{}", self.card_str(card));
            }
            if let Some(target) = drag.hovered() {
                print!("  over {}", target.label());
            }
            println!();
        }

        println!();
    }

    fn info(&mut self, msg: &str) {
        println!("{} {}", "[INFO]".cyan(), msg);
    }

    fn error(&mut self, msg: &str) {
        println!("{} {}", "[ERR ]".red(), msg);
    }

    fn event(&mut self, event: &Event) {
        match event {
            Event::Dealt { count } => self.info(&format!("Dealt {} card(s) to the talon.", count)),
            Event::CardFlipped { card, face_up: true } => {
                self.info(&format!("Turned over {}.", card.label()))
            }
            Event::CardFlipped { card, face_up: false } => {
                self.info(&format!("Turned {} face down again.", card.label()))
            }
            Event::ModeToggled { direction } => match direction {
                PlayDirection::Reversed => {
                    self.info("Reverse mode! Build up on the tableau, down on the foundations.")
                }
                PlayDirection::Normal => self.info("Back to normal mode."),
            },
            Event::StockReloaded { level } => println!(
                "{} Stock reloaded ({}/{}). One more empty stock after the last reload loses.",
                "[WARN]".yellow(),
                level,
                MAX_RELOADS
            ),
            Event::Won | Event::Lost => {}
        }
    }

    fn help(&mut self) {
        println!(
            r#"
╔══════════════════════════════════════════════════════════════╗
║          Reverse Klondike – CLI Help                         ║
╠══════════════════════════════════════════════════════════════╣
║  GOAL: Build all four suits on the foundations.              ║
║                                                              ║
║  RULES:                                                      ║
║    · Tableau: alternate colours, one rank lower each card.   ║
║      Empty columns take a King. Jokers go anywhere there.    ║
║    · Foundations build by suit from Ace to King.             ║
║    · The stock deals 3 at a time. It can be reloaded from    ║
║      the talon 3 times; the next empty click loses.          ║
║    · Playing the joker marked <> turns on reverse mode:      ║
║      tableau builds up, empty columns take an Ace, and       ║
║      foundations build down from King.                       ║
╠══════════════════════════════════════════════════════════════╣
║  COMMANDS (case-insensitive):                                ║
║                                                              ║
║  draw | d                Click the stock                     ║
║  mv  <src> <dst>         Move a card or run                  ║
║  mv  t<n>:<N> <dst>      Move a run starting N below the top ║
║  lift <src>              Start dragging                      ║
║  hover <dst> | hover -   Point the drag at a pile / nowhere  ║
║  drop                    Release the drag                    ║
║  cancel                  Put dragged cards back              ║
║  trigger | rev           Play the reverse trigger            ║
║  undo                    Undo last move                      ║
║  new                     Start a new random game             ║
║  quit                    Exit                                ║
║  help | h | ?            Show this help                      ║
║                                                              ║
║  Locations: w = talon, f0-f3 = foundations, t0-t6 = columns  ║
╠══════════════════════════════════════════════════════════════╣
║  Example: mv t4:2 t6  →  move top 3 cards of t4 onto t6      ║
╚══════════════════════════════════════════════════════════════╝
"#
        );
    }

    fn win(&mut self) {
        println!(
            "\n{}\n  Congratulations! You solved it!  Type 'new' for another game.\n",
            "  ★ ★ ★   Y O U   W I N   ★ ★ ★".yellow().bold()
        );
    }

    fn lose(&mut self) {
        println!(
            "\n{}\n  The stock ran out for good.  Type 'new' for another game.\n",
            "  ✸ ✸ ✸   B O O M   ✸ ✸ ✸".red().bold()
        );
    }
}
