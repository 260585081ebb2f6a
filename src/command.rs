use crate::pile::{ContainerId, NUM_FOUNDATIONS, NUM_TABLEAUS};

/// A card picked out by its container and its depth from the top
/// (0 = top card). Only tableau columns have depth beyond 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spot {
    pub container: ContainerId,
    pub depth: usize,
}

/// All commands a player can issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Click the stock.
    Draw,
    /// Lift a card, carry it over `dst` and release.
    Move { src: Spot, dst: ContainerId },
    /// Start a drag.
    Lift(Spot),
    /// Point at a container, or at nothing.
    Hover(Option<ContainerId>),
    /// Release the current drag.
    Drop,
    /// Abandon the current drag.
    Cancel,
    /// Click the face-up reverse trigger card.
    Trigger,
    Undo,
    Quit,
    NewGame,
    Help,
}

/// Parse a single line of text input into a `Command`.
///
/// Syntax reference (case-insensitive):
/// ```text
/// d | draw                -- Click the stock (deal 3 / reload talon)
/// mv <src> <dst>          -- Move a card or run and release it
/// lift <src>              -- Start a drag
/// hover <dst> | hover -   -- Point at a container / at nothing
/// drop                    -- Release the drag
/// cancel                  -- Put the dragged cards back
/// trigger | rev           -- Play the reverse trigger
/// undo                    -- Undo last move
/// new                     -- New game
/// quit | q                -- Quit
/// help | h | ?            -- Help
///
/// Locations: w (talon), f0..f3 (foundations), t0..t6 (tableau),
///            t<n>:<depth> (card <depth> below the top of column n)
/// ```
pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }

    let tokens: Vec<&str> = input.split_whitespace().collect();
    let cmd = tokens[0].to_lowercase();

    match cmd.as_str() {
        "d" | "draw" => Ok(Command::Draw),
        "mv" | "m" => {
            if tokens.len() < 3 {
                return Err("Usage: mv <src[:<depth>]> <dst>".to_string());
            }
            Ok(Command::Move {
                src: parse_spot(tokens[1])?,
                dst: parse_container(tokens[2])?,
            })
        }
        "lift" | "l" => {
            if tokens.len() < 2 {
                return Err("Usage: lift <src[:<depth>]>".to_string());
            }
            Ok(Command::Lift(parse_spot(tokens[1])?))
        }
        "hover" => {
            if tokens.len() < 2 {
                return Err("Usage: hover <dst> | hover -".to_string());
            }
            if tokens[1] == "-" {
                return Ok(Command::Hover(None));
            }
            Ok(Command::Hover(Some(parse_container(tokens[1])?)))
        }
        "drop" => Ok(Command::Drop),
        "cancel" | "c" => Ok(Command::Cancel),
        "trigger" | "rev" => Ok(Command::Trigger),
        "undo" | "u" => Ok(Command::Undo),
        "new" | "n" => Ok(Command::NewGame),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "help" | "h" | "?" => Ok(Command::Help),
        _ => Err(format!("Unknown command '{}'. Type 'help' for help.", tokens[0])),
    }
}

fn parse_spot(s: &str) -> Result<Spot, String> {
    let Some((container_part, depth_part)) = s.split_once(':') else {
        return Ok(Spot {
            container: parse_container(s)?,
            depth: 0,
        });
    };

    let container = parse_container(container_part)?;
    let depth: usize = depth_part
        .parse()
        .map_err(|_| format!("'{}' is not a valid depth", depth_part))?;
    if depth > 0 && !matches!(container, ContainerId::Tableau(_)) {
        return Err("Only tableau columns can be picked below the top card".to_string());
    }
    Ok(Spot { container, depth })
}

fn parse_container(s: &str) -> Result<ContainerId, String> {
    let s = s.to_lowercase();
    if s == "w" || s == "talon" {
        return Ok(ContainerId::Talon);
    }

    let mut chars = s.chars();
    let kind = chars.next();
    let n: usize = chars
        .as_str()
        .parse()
        .map_err(|_| format!("'{}' is not a valid location (w, f0-f3, t0-t6)", s))?;
    match kind {
        Some('f') if n < NUM_FOUNDATIONS => Ok(ContainerId::Foundation(n)),
        Some('t') if n < NUM_TABLEAUS => Ok(ContainerId::Tableau(n)),
        Some('f') => Err(format!(
            "Foundation index {} out of range (0–{})",
            n,
            NUM_FOUNDATIONS - 1
        )),
        Some('t') => Err(format!(
            "Column index {} out of range (0–{})",
            n,
            NUM_TABLEAUS - 1
        )),
        _ => Err(format!("'{}' is not a valid location (w, f0-f3, t0-t6)", s)),
    }
}
