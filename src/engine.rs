//! Engine state management.
//!
//! Holds the current game and the option map between commands, and turns
//! parsed CSI commands into calls against the move engine. All protocol
//! output goes through a `W: Write` so tests can capture it.

use std::collections::HashMap;
use std::io::Write;
use std::str::FromStr;

use crate::board::geometry::Coord;
use crate::board::state::{Game, Phase, Settings, SettingsError};
use crate::protocol::notation::{encode_state, format_preview};
use crate::resolve::{apply_move, preview_cursor, toggle_heatmap, update_cursor, Move};

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: Option<Game>,
    pub options: HashMap<String, String>,
}

impl Engine {
    /// Creates a new engine with no game in progress.
    pub fn new() -> Self {
        Engine {
            game: None,
            options: HashMap::new(),
        }
    }

    /// Sets an engine option. Options are read when the next game starts.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        match value {
            Some(v) => {
                self.options.insert(name, v);
            }
            None => {
                self.options.insert(name, String::new());
            }
        }
    }

    /// Starts a new game from the current options, replacing any game in
    /// progress. Fails without touching the current game if an option is
    /// malformed or out of its domain.
    pub fn new_game(&mut self) -> Result<(), SettingsError> {
        let settings = self.build_settings()?;
        settings.validate()?;
        self.game = Some(Game::new(settings));
        Ok(())
    }

    /// Builds settings from the option map, starting from defaults.
    fn build_settings(&self) -> Result<Settings, SettingsError> {
        let mut settings = Settings::default();
        if let Some(seed) = self.parse_option::<u64>("Seed")? {
            settings.seed = seed;
        }
        if let Some(members) = self.parse_option::<usize>("Members")? {
            settings.num_members = members;
        }
        if let Some(spies) = self.parse_option::<usize>("Spies")? {
            settings.num_spies = spies;
        }
        if let Some(devices) = self.parse_option::<usize>("Devices")? {
            settings.num_devices = devices;
        }
        if let Some(radius) = self.parse_option::<f64>("SpyRadius")? {
            settings.spy_radius = radius;
        }
        if let Some(radius) = self.parse_option::<f64>("DeviceRadius")? {
            settings.device_radius = radius;
        }
        Ok(settings)
    }

    /// Parses one option if present.
    fn parse_option<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, SettingsError> {
        match self.options.get(name) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
                SettingsError::InvalidValue {
                    name,
                    value: raw.clone(),
                }
            }),
        }
    }

    /// Handles the CSI handshake: writes id, options, protocol_version, and
    /// csiok.
    pub fn handle_csi<W: Write>(&self, out: &mut W) {
        writeln!(out, "id name counterspy").unwrap();
        writeln!(out, "id author counterspy").unwrap();
        writeln!(out, "option name Seed type spin default 1 min 0 max 4294967295").unwrap();
        writeln!(out, "option name Members type spin default 12 min 1 max 64").unwrap();
        writeln!(out, "option name Spies type spin default 5 min 1 max 32").unwrap();
        writeln!(out, "option name Devices type spin default 5 min 1 max 32").unwrap();
        writeln!(out, "option name SpyRadius type spin default 10 min 1 max 100").unwrap();
        writeln!(
            out,
            "option name DeviceRadius type spin default 10 min 1 max 100"
        )
        .unwrap();
        writeln!(out, "protocol_version 1").unwrap();
        writeln!(out, "csiok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        writeln!(out, "readyok").unwrap();
        out.flush().unwrap();
    }

    /// Handles `place <x> <y>`: applies the phase-appropriate move and
    /// prints the resulting state line. Rejected moves still print the
    /// (unchanged) state, since rejection is a legal no-op, not an error.
    pub fn handle_place<W: Write>(&mut self, coord: Coord, out: &mut W) {
        let game = match &self.game {
            Some(g) => g,
            None => {
                eprintln!("place: no game started");
                return;
            }
        };

        let mv = match &game.phase {
            Phase::GoodPlacement(_) => Move::PlaceSpy(coord),
            Phase::EvilPlacement(_) => Move::PlaceDevice(coord),
            Phase::Complete(_) => Move::PlaceSpy(coord),
        };
        let next = apply_move(game, mv);
        writeln!(out, "state {}", encode_state(&next)).unwrap();
        out.flush().unwrap();
        self.game = Some(next);
    }

    /// Handles `preview <x> <y>`: prints what a placement at the coordinate
    /// would reach and stores it as the hover preview.
    pub fn handle_preview<W: Write>(&mut self, coord: Coord, out: &mut W) {
        let game = match &self.game {
            Some(g) => g,
            None => {
                eprintln!("preview: no game started");
                return;
            }
        };

        let preview = preview_cursor(game, coord);
        let next = update_cursor(game, Some(coord));
        match preview {
            Some(preview) => writeln!(out, "preview {}", format_preview(&preview)).unwrap(),
            None => writeln!(out, "preview none").unwrap(),
        }
        out.flush().unwrap();
        self.game = Some(next);
    }

    /// Handles `cursor clear`.
    pub fn handle_cursor_clear(&mut self) {
        if let Some(game) = self.game.take() {
            self.game = Some(update_cursor(&game, None));
        }
    }

    /// Handles `heatmap`: flips visibility and reports the new setting.
    pub fn handle_heatmap<W: Write>(&mut self, out: &mut W) {
        let game = match &self.game {
            Some(g) => g,
            None => {
                eprintln!("heatmap: no game started");
                return;
            }
        };
        let next = toggle_heatmap(game);
        let setting = if next.show_heatmap { "on" } else { "off" };
        writeln!(out, "heatmap {}", setting).unwrap();
        out.flush().unwrap();
        self.game = Some(next);
    }

    /// Handles `state`: prints the one-line notation of the current game.
    pub fn handle_state<W: Write>(&self, out: &mut W) {
        match &self.game {
            Some(game) => {
                writeln!(out, "state {}", encode_state(game)).unwrap();
                out.flush().unwrap();
            }
            None => eprintln!("state: no game started"),
        }
    }

    /// Handles `score`: prints the final score snapshot as a JSON line once
    /// the game is complete, `score pending` before that.
    pub fn handle_score<W: Write>(&self, out: &mut W) {
        let game = match &self.game {
            Some(g) => g,
            None => {
                eprintln!("score: no game started");
                return;
            }
        };
        match &game.phase {
            Phase::Complete(complete) => {
                let json = serde_json::to_string(&complete.score).unwrap();
                writeln!(out, "score {}", json).unwrap();
            }
            _ => writeln!(out, "score pending").unwrap(),
        }
        out.flush().unwrap();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
