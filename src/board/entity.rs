//! Entities placed on or hidden in the board.
//!
//! Evil members are fixed at game start; spies and devices are appended by
//! the two placement phases and never mutated afterwards. Stable ids assigned
//! at creation are what the deduplicated scoring sets are keyed on.

use super::geometry::Coord;

/// Stable identity of an evil member, assigned in generation order.
pub type MemberId = u32;

/// Stable identity of a spy, assigned in placement order.
pub type SpyId = u32;

/// A hidden high-value target. The full set is fixed for the game's
/// lifetime; nothing ever mutates or removes one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvilMember {
    pub id: MemberId,
    pub coord: Coord,
    /// Point value scored when covered by an undetected spy. Always >= 1.
    pub value: u32,
}

/// A detection point placed by GOOD during its placement phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spy {
    pub id: SpyId,
    pub coord: Coord,
}

/// A counter-detection point placed by EVIL during its placement phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Device {
    pub coord: Coord,
}

/// What a placement at the hovered coordinate would currently reach.
///
/// Recomputed on every hover update and cleared whenever the cursor leaves
/// the board or the phase data changes; never persisted across moves.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPreview {
    pub coord: Coord,
    /// Members within the phase radius of `coord`.
    pub members: Vec<MemberId>,
    /// Undetected spies within the device radius of `coord`. Empty during
    /// the GOOD phase, where only members are in reach.
    pub spies: Vec<SpyId>,
    /// Summed value of everything reached: member values plus 1 per spy.
    pub total_value: u32,
}
