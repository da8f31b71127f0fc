//! CSI command parser.
//!
//! Parses incoming CSI protocol commands from raw text into structured
//! `Command` variants that the engine main loop can dispatch on.

use crate::board::geometry::Coord;

/// A parsed server-to-engine CSI command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Initialize the CSI protocol handshake.
    Csi,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game from the current options.
    NewGame,

    /// Apply the phase-appropriate placement at a board coordinate.
    Place { coord: Coord },

    /// Query (and store) the hover preview at a board coordinate.
    Preview { coord: Coord },

    /// Clear the stored hover preview.
    CursorClear,

    /// Toggle heatmap visibility.
    Heatmap,

    /// Print the one-line state notation.
    State,

    /// Print the final score as a JSON line.
    Score,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "csi" => Some(Command::Csi),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "heatmap" => Some(Command::Heatmap),
        "state" => Some(Command::State),
        "score" => Some(Command::Score),

        "setoption" => parse_setoption(&tokens),
        "place" => parse_coord_command(&tokens, "place").map(|coord| Command::Place { coord }),
        "preview" => {
            parse_coord_command(&tokens, "preview").map(|coord| Command::Preview { coord })
        }
        "cursor" => parse_cursor(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    // Minimum: setoption name <id>
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    // Find the "value" keyword to split name from value.
    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                eprintln!("malformed setoption: empty name");
                return None;
            }
            let name = name_parts.join(" ");
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name, value)
        }
        None => {
            let name = tokens[2..].join(" ");
            (name, None)
        }
    };

    Some(Command::SetOption { name, value })
}

/// Parses `<cmd> <x> <y>` where both arguments are finite numbers. Board
/// containment is not checked here; the engine treats off-board coordinates
/// as no-ops per the move rules.
fn parse_coord_command(tokens: &[&str], cmd: &str) -> Option<Coord> {
    if tokens.len() != 3 {
        eprintln!("malformed {}: expected '{} <x> <y>'", cmd, cmd);
        return None;
    }
    let x = match tokens[1].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            eprintln!("invalid {} coordinate: '{}'", cmd, tokens[1]);
            return None;
        }
    };
    let y = match tokens[2].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            eprintln!("invalid {} coordinate: '{}'", cmd, tokens[2]);
            return None;
        }
    };
    Some(Coord::new(x, y))
}

/// Parses `cursor clear`.
fn parse_cursor(tokens: &[&str]) -> Option<Command> {
    if tokens.len() == 2 && tokens[1] == "clear" {
        Some(Command::CursorClear)
    } else {
        eprintln!("malformed cursor: expected 'cursor clear'");
        None
    }
}
