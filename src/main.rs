//! Counterspy -- a spy-placement game engine implementing the CSI protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! following the CSI (CounterSpy Interface) convention.

use std::io::{self, BufRead};

use counterspy::engine::Engine;
use counterspy::protocol::parser::{parse_command, Command};

/// Runs the main CSI protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Csi => {
                engine.handle_csi(&mut out);
            }
            Command::IsReady => {
                engine.handle_isready(&mut out);
            }
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
            }
            Command::NewGame => {
                if let Err(e) = engine.new_game() {
                    eprintln!("newgame: {}", e);
                }
            }
            Command::Place { coord } => {
                engine.handle_place(coord, &mut out);
            }
            Command::Preview { coord } => {
                engine.handle_preview(coord, &mut out);
            }
            Command::CursorClear => {
                engine.handle_cursor_clear();
            }
            Command::Heatmap => {
                engine.handle_heatmap(&mut out);
            }
            Command::State => {
                engine.handle_state(&mut out);
            }
            Command::Score => {
                engine.handle_score(&mut out);
            }
            Command::Quit => {
                break;
            }
        }
    }
}
