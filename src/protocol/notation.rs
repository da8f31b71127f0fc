//! Compact one-line state notation.
//!
//! The engine prints the current game as a single line after each applied
//! move, so a driving process can track the session without a structured
//! channel. Encode-only: games are never reconstructed from notation.
//!
//! Format: `<phase_char>/<spies>/<devices>/<score>`
//!
//! - phase char: `g` (GOOD placing), `e` (EVIL placing), `c` (complete)
//! - spies, devices: comma-separated `x:y` pairs in placement order, `-`
//!   when empty; coordinates printed with two decimals
//! - score: `t<total>` while GOOD places, `i<initial>,d<detected>` while
//!   EVIL places, `i<initial>,f<found>,s<final>` when complete

use std::fmt::Write as _;

use crate::board::entity::CursorPreview;
use crate::board::geometry::Coord;
use crate::board::state::{Game, Phase};

/// Encodes the game as a single notation line.
pub fn encode_state(game: &Game) -> String {
    let mut out = String::new();
    out.push(game.phase.notation_char());
    out.push('/');

    match &game.phase {
        Phase::GoodPlacement(good) => {
            push_coords(&mut out, good.spies.iter().map(|s| s.coord));
            out.push_str("/-/");
            let _ = write!(out, "t{}", good.total_value);
        }
        Phase::EvilPlacement(evil) => {
            push_coords(&mut out, evil.spies.iter().map(|s| s.coord));
            out.push('/');
            push_coords(&mut out, evil.devices.iter().map(|d| d.coord));
            out.push('/');
            let _ = write!(
                out,
                "i{},d{}",
                evil.good_initial_score,
                evil.detected.len()
            );
        }
        Phase::Complete(complete) => {
            push_coords(&mut out, complete.evil.spies.iter().map(|s| s.coord));
            out.push('/');
            push_coords(&mut out, complete.evil.devices.iter().map(|d| d.coord));
            out.push('/');
            let _ = write!(
                out,
                "i{},f{},s{}",
                complete.score.good_initial_score,
                complete.score.spies_found,
                complete.score.good_final_score
            );
        }
    }

    out
}

/// Formats a cursor preview for the `preview` response line.
///
/// Example: `members 0,3 spies 1 value 13`. Empty id lists print as `-`.
pub fn format_preview(preview: &CursorPreview) -> String {
    let members = join_ids(preview.members.iter().copied());
    let spies = join_ids(preview.spies.iter().copied());
    format!(
        "members {} spies {} value {}",
        members, spies, preview.total_value
    )
}

fn push_coords(out: &mut String, coords: impl Iterator<Item = Coord>) {
    let mut any = false;
    for (i, coord) in coords.enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{:.2}:{:.2}", coord.x, coord.y);
        any = true;
    }
    if !any {
        out.push('-');
    }
}

fn join_ids(ids: impl Iterator<Item = u32>) -> String {
    let joined = ids.map(|id| id.to_string()).collect::<Vec<_>>().join(",");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}
