//! Board representation and game-state types.
//!
//! Contains the core data structures for coordinates, placed entities,
//! phases, and the overall game state.

pub mod entity;
pub mod geometry;
pub mod state;

pub use entity::{CursorPreview, Device, EvilMember, MemberId, Spy, SpyId};
pub use geometry::{distance, within_board, within_radius, Coord, BOARD_SIZE};
pub use state::{
    CompletePhase, EvilPhase, FinalScore, Game, GoodPhase, Phase, Settings, SettingsError,
};
