//! Game state representation.
//!
//! Holds the complete snapshot of a game at a point in time: the fixed
//! member set, the current phase with its phase-specific data, and the
//! read-only settings the game was created with.
//!
//! The three phases are an explicit sum type so only one variant's data
//! exists at a time and move handling stays exhaustive. Transitions replace
//! whole phase values; nothing is mutated in place after creation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::entity::{CursorPreview, Device, EvilMember, MemberId, Spy, SpyId};
use crate::board::geometry::BOARD_SIZE;
use crate::generate::generate_evil_members;
use crate::heatmap::{member_sources, Heatmap, HEATMAP_SIZE};

/// Read-only configuration a game is created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Seed for member generation. Same seed, same hidden board.
    pub seed: u64,
    /// Number of evil members to generate.
    pub num_members: usize,
    /// Radius within which a spy covers members.
    pub spy_radius: f64,
    /// Radius within which a device detects spies.
    pub device_radius: f64,
    /// Spy placements available to GOOD.
    pub num_spies: usize,
    /// Device placements available to EVIL.
    pub num_devices: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            seed: 1,
            num_members: 12,
            spy_radius: 10.0,
            device_radius: 10.0,
            num_spies: 5,
            num_devices: 5,
        }
    }
}

/// Errors raised when building settings from protocol options.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{name} must be at least 1")]
    ZeroCount { name: &'static str },

    #[error("{name} must be a positive, finite number")]
    InvalidRadius { name: &'static str },

    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

impl Settings {
    /// Checks domain bounds on every field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.num_members == 0 {
            return Err(SettingsError::ZeroCount { name: "Members" });
        }
        if self.num_spies == 0 {
            return Err(SettingsError::ZeroCount { name: "Spies" });
        }
        if self.num_devices == 0 {
            return Err(SettingsError::ZeroCount { name: "Devices" });
        }
        if !(self.spy_radius.is_finite() && self.spy_radius > 0.0) {
            return Err(SettingsError::InvalidRadius { name: "SpyRadius" });
        }
        if !(self.device_radius.is_finite() && self.device_radius > 0.0) {
            return Err(SettingsError::InvalidRadius { name: "DeviceRadius" });
        }
        Ok(())
    }
}

/// GOOD is placing spies.
#[derive(Debug, Clone, PartialEq)]
pub struct GoodPhase {
    pub heatmap: Heatmap,
    pub cursor: Option<CursorPreview>,
    /// Spies placed so far, in placement order.
    pub spies: Vec<Spy>,
    /// Members covered by at least one placed spy. A member covered by
    /// several spies appears once.
    pub included: BTreeSet<MemberId>,
    /// Summed value of `included`.
    pub total_value: u32,
}

/// EVIL is placing devices.
#[derive(Debug, Clone, PartialEq)]
pub struct EvilPhase {
    pub heatmap: Heatmap,
    pub cursor: Option<CursorPreview>,
    /// Devices placed so far, in placement order.
    pub devices: Vec<Device>,
    /// All spies, fixed at the moment this phase began.
    pub spies: Vec<Spy>,
    /// Spies detected by at least one device. The undetected spies are the
    /// complement within `spies`, so the two always partition the set.
    pub detected: BTreeSet<SpyId>,
    /// GOOD's total value frozen at the moment this phase began.
    pub good_initial_score: u32,
}

impl EvilPhase {
    /// Spies not yet detected by any device.
    pub fn undetected(&self) -> impl Iterator<Item = &Spy> + '_ {
        self.spies.iter().filter(|s| !self.detected.contains(&s.id))
    }

    pub fn undetected_count(&self) -> usize {
        self.spies.len() - self.detected.len()
    }
}

/// Immutable scoring snapshot taken when the game completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalScore {
    /// GOOD's covered value when the EVIL phase began.
    pub good_initial_score: u32,
    /// Spies detected over the whole EVIL phase.
    pub spies_found: usize,
    /// Members still covered by an undetected spy at game end.
    pub included_members: BTreeSet<MemberId>,
    /// Summed value of `included_members`.
    pub good_final_score: u32,
}

/// Terminal phase: the final EVIL-phase data plus the score snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletePhase {
    pub evil: EvilPhase,
    pub score: FinalScore,
}

/// The game phase, carrying the data that exists only in that phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    GoodPlacement(GoodPhase),
    EvilPlacement(EvilPhase),
    Complete(CompletePhase),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::GoodPlacement(_) => "good",
            Phase::EvilPlacement(_) => "evil",
            Phase::Complete(_) => "complete",
        }
    }

    /// Single-character abbreviation used by the state notation.
    pub const fn notation_char(&self) -> char {
        match self {
            Phase::GoodPlacement(_) => 'g',
            Phase::EvilPlacement(_) => 'e',
            Phase::Complete(_) => 'c',
        }
    }
}

/// The root aggregate: settings, the fixed member set, the display-only
/// heatmap toggle, and the current phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub settings: Settings,
    pub members: Vec<EvilMember>,
    pub show_heatmap: bool,
    pub phase: Phase,
}

impl Game {
    /// Starts a new game in the GOOD placement phase: members generated from
    /// the seed, initial heatmap over the members at the spy radius.
    pub fn new(settings: Settings) -> Game {
        let members = generate_evil_members(BOARD_SIZE, settings.num_members, settings.seed);
        let heatmap = Heatmap::compute(settings.spy_radius, HEATMAP_SIZE, &member_sources(&members));
        Game {
            settings,
            members,
            show_heatmap: false,
            phase: Phase::GoodPlacement(GoodPhase {
                heatmap,
                cursor: None,
                spies: Vec::new(),
                included: BTreeSet::new(),
                total_value: 0,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geometry::Coord;

    #[test]
    fn new_game_starts_in_good_phase() {
        let game = Game::new(Settings::default());
        match &game.phase {
            Phase::GoodPlacement(good) => {
                assert!(good.spies.is_empty());
                assert!(good.included.is_empty());
                assert_eq!(good.total_value, 0);
                assert!(good.cursor.is_none());
            }
            other => panic!("expected GoodPlacement, got {}", other.name()),
        }
        assert!(!game.show_heatmap);
        assert_eq!(game.members.len(), Settings::default().num_members);
    }

    #[test]
    fn new_game_heatmap_covers_grid() {
        let game = Game::new(Settings::default());
        let Phase::GoodPlacement(good) = &game.phase else {
            panic!("expected GoodPlacement");
        };
        assert_eq!(good.heatmap.cells.len(), HEATMAP_SIZE * HEATMAP_SIZE);
        assert_eq!(good.heatmap.resolution, HEATMAP_SIZE);
    }

    #[test]
    fn new_game_is_deterministic_per_seed() {
        let settings = Settings {
            seed: 99,
            ..Settings::default()
        };
        let a = Game::new(settings.clone());
        let b = Game::new(settings);
        assert_eq!(a, b);
    }

    #[test]
    fn default_settings_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_counts() {
        for field in ["members", "spies", "devices"] {
            let mut settings = Settings::default();
            match field {
                "members" => settings.num_members = 0,
                "spies" => settings.num_spies = 0,
                _ => settings.num_devices = 0,
            }
            assert!(settings.validate().is_err(), "{} = 0 should fail", field);
        }
    }

    #[test]
    fn validate_rejects_bad_radii() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let settings = Settings {
                spy_radius: radius,
                ..Settings::default()
            };
            assert!(settings.validate().is_err());
            let settings = Settings {
                device_radius: radius,
                ..Settings::default()
            };
            assert!(settings.validate().is_err());
        }
    }

    #[test]
    fn undetected_is_complement_of_detected() {
        let spies = vec![
            Spy {
                id: 0,
                coord: Coord::new(1.0, 1.0),
            },
            Spy {
                id: 1,
                coord: Coord::new(2.0, 2.0),
            },
            Spy {
                id: 2,
                coord: Coord::new(3.0, 3.0),
            },
        ];
        let mut detected = BTreeSet::new();
        detected.insert(1);
        let evil = EvilPhase {
            heatmap: Heatmap::compute(1.0, 1, &[]),
            cursor: None,
            devices: Vec::new(),
            spies,
            detected,
            good_initial_score: 0,
        };

        let undetected: Vec<SpyId> = evil.undetected().map(|s| s.id).collect();
        assert_eq!(undetected, vec![0, 2]);
        assert_eq!(evil.undetected_count(), 2);
    }

    #[test]
    fn phase_notation_chars() {
        let game = Game::new(Settings::default());
        assert_eq!(game.phase.notation_char(), 'g');
        assert_eq!(game.phase.name(), "good");
    }
}
