//! Move resolution.
//!
//! Applies a single placement move to the current phase, enforcing legality
//! and producing the next phase, including the two transition side effects:
//! the EVIL-phase heatmap recomputation and the terminal score snapshot.
//!
//! Every function here is total. An illegal or mistimed move (wrong move
//! kind for the phase, exhausted budget, off-board coordinate, finished
//! game) returns the input game unchanged rather than an error; the state
//! machine treats "impossible move" as "no move".

use std::collections::BTreeSet;

use crate::board::entity::{CursorPreview, Device, MemberId, Spy, SpyId};
use crate::board::geometry::{within_board, within_radius, Coord, BOARD_SIZE};
use crate::board::state::{CompletePhase, EvilPhase, FinalScore, Game, GoodPhase, Phase};
use crate::heatmap::{member_and_spy_sources, Heatmap, HEATMAP_SIZE};

/// A placement move issued by the interaction layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Move {
    PlaceSpy(Coord),
    PlaceDevice(Coord),
}

/// Applies `mv` to `game`, returning the resulting game.
///
/// Whole-value replacement: the input is never mutated, and a rejected move
/// returns a structurally equal clone of the input.
pub fn apply_move(game: &Game, mv: Move) -> Game {
    match (&game.phase, mv) {
        (Phase::GoodPlacement(good), Move::PlaceSpy(coord)) => place_spy(game, good, coord),
        (Phase::EvilPlacement(evil), Move::PlaceDevice(coord)) => place_device(game, evil, coord),
        _ => game.clone(),
    }
}

/// Members of `game` strictly within `radius` of any coordinate yielded by
/// `centers`, deduplicated by member id.
fn covered_members<'a>(
    game: &Game,
    radius: f64,
    centers: impl Iterator<Item = &'a Coord>,
) -> BTreeSet<MemberId> {
    let mut covered = BTreeSet::new();
    for center in centers {
        for member in &game.members {
            if within_radius(*center, radius, member.coord) {
                covered.insert(member.id);
            }
        }
    }
    covered
}

/// Summed value of the members whose ids appear in `ids`.
fn member_value_sum(game: &Game, ids: &BTreeSet<MemberId>) -> u32 {
    game.members
        .iter()
        .filter(|m| ids.contains(&m.id))
        .map(|m| m.value)
        .sum()
}

/// GOOD places a spy. Appends it, recomputes the covered-member set and
/// running total, and transitions to the EVIL phase when the spy budget is
/// spent.
fn place_spy(game: &Game, good: &GoodPhase, coord: Coord) -> Game {
    if !within_board(BOARD_SIZE, coord) || good.spies.len() >= game.settings.num_spies {
        return game.clone();
    }

    let mut spies = good.spies.clone();
    spies.push(Spy {
        id: spies.len() as SpyId,
        coord,
    });

    let included = covered_members(
        game,
        game.settings.spy_radius,
        spies.iter().map(|s| &s.coord),
    );
    let total_value = member_value_sum(game, &included);

    let phase = if spies.len() == game.settings.num_spies {
        // Budget spent: the transition happens in the same call that placed
        // the final spy. The heatmap now also counts the spies themselves,
        // as value-1 sources at the spy radius.
        let sources = member_and_spy_sources(&game.members, &spies);
        let heatmap = Heatmap::compute(game.settings.spy_radius, HEATMAP_SIZE, &sources);
        Phase::EvilPlacement(EvilPhase {
            heatmap,
            cursor: None,
            devices: Vec::new(),
            spies,
            detected: BTreeSet::new(),
            good_initial_score: total_value,
        })
    } else {
        Phase::GoodPlacement(GoodPhase {
            heatmap: good.heatmap.clone(),
            cursor: None,
            spies,
            included,
            total_value,
        })
    };

    Game {
        phase,
        ..game.clone()
    }
}

/// EVIL places a device. Appends it, moves newly reached spies from
/// undetected to detected, and completes the game when the device budget is
/// spent or no undetected spies remain.
fn place_device(game: &Game, evil: &EvilPhase, coord: Coord) -> Game {
    if !within_board(BOARD_SIZE, coord)
        || evil.devices.len() >= game.settings.num_devices
        || evil.undetected_count() == 0
    {
        return game.clone();
    }

    let mut devices = evil.devices.clone();
    devices.push(Device { coord });

    let mut detected = evil.detected.clone();
    for spy in &evil.spies {
        if within_radius(coord, game.settings.device_radius, spy.coord) {
            detected.insert(spy.id);
        }
    }

    let next = EvilPhase {
        heatmap: evil.heatmap.clone(),
        cursor: None,
        devices,
        spies: evil.spies.clone(),
        detected,
        good_initial_score: evil.good_initial_score,
    };

    // The phase ends when either arm of the disjunction holds, so EVIL can
    // finish early by detecting every spy before its budget runs out.
    let phase = if next.devices.len() == game.settings.num_devices || next.undetected_count() == 0
    {
        Phase::Complete(complete(game, next))
    } else {
        Phase::EvilPlacement(next)
    };

    Game {
        phase,
        ..game.clone()
    }
}

/// Takes the terminal score snapshot: members still covered by an
/// undetected spy, their summed value, and the detected-spy count.
fn complete(game: &Game, evil: EvilPhase) -> CompletePhase {
    let included_members = covered_members(
        game,
        game.settings.spy_radius,
        evil.undetected().map(|s| &s.coord),
    );
    let good_final_score = member_value_sum(game, &included_members);
    let score = FinalScore {
        good_initial_score: evil.good_initial_score,
        spies_found: evil.detected.len(),
        included_members,
        good_final_score,
    };
    CompletePhase { evil, score }
}

/// Read-only hover query: what a placement at `coord` would currently
/// reach, under the active phase's radius. Absent off the board and in the
/// terminal phase.
///
/// Uses the same radius primitive as placement, so the preview always
/// agrees with what an actual move at `coord` would yield.
pub fn preview_cursor(game: &Game, coord: Coord) -> Option<CursorPreview> {
    if !within_board(BOARD_SIZE, coord) {
        return None;
    }
    match &game.phase {
        Phase::GoodPlacement(_) => {
            let members: Vec<MemberId> = game
                .members
                .iter()
                .filter(|m| within_radius(coord, game.settings.spy_radius, m.coord))
                .map(|m| m.id)
                .collect();
            let ids: BTreeSet<MemberId> = members.iter().copied().collect();
            Some(CursorPreview {
                coord,
                total_value: member_value_sum(game, &ids),
                members,
                spies: Vec::new(),
            })
        }
        Phase::EvilPlacement(evil) => {
            let members: Vec<MemberId> = game
                .members
                .iter()
                .filter(|m| within_radius(coord, game.settings.device_radius, m.coord))
                .map(|m| m.id)
                .collect();
            let spies: Vec<SpyId> = evil
                .undetected()
                .filter(|s| within_radius(coord, game.settings.device_radius, s.coord))
                .map(|s| s.id)
                .collect();
            let ids: BTreeSet<MemberId> = members.iter().copied().collect();
            let total_value = member_value_sum(game, &ids) + spies.len() as u32;
            Some(CursorPreview {
                coord,
                members,
                spies,
                total_value,
            })
        }
        Phase::Complete(_) => None,
    }
}

/// Stores (or clears, for `None` and off-board coordinates) the hover
/// preview in the current phase's data. No effect on a completed game.
pub fn update_cursor(game: &Game, coord: Option<Coord>) -> Game {
    let cursor = coord.and_then(|c| preview_cursor(game, c));
    let phase = match &game.phase {
        Phase::GoodPlacement(good) => Phase::GoodPlacement(GoodPhase {
            cursor,
            ..good.clone()
        }),
        Phase::EvilPlacement(evil) => Phase::EvilPlacement(EvilPhase {
            cursor,
            ..evil.clone()
        }),
        Phase::Complete(_) => return game.clone(),
    };
    Game {
        phase,
        ..game.clone()
    }
}

/// Flips the heatmap display flag. Display-only: no effect on scoring or
/// the state machine.
pub fn toggle_heatmap(game: &Game) -> Game {
    Game {
        show_heatmap: !game.show_heatmap,
        ..game.clone()
    }
}
