//! Seeded initial-state generation.
//!
//! Draws the hidden evil members for a new game. Generation is a pure
//! function of `(board_size, count, seed)`: the same inputs always produce
//! the same coordinates and values, which is what makes games reproducible
//! and the rules tests deterministic.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::entity::EvilMember;
use crate::board::geometry::Coord;

/// Values handed to the first members in draw order; everyone after the
/// list gets value 1. Truncated when fewer members are generated than the
/// list is long.
pub const SPECIAL_VALUES: [u32; 5] = [9, 8, 7, 6, 5];

/// Generates `count` evil members at uniformly random coordinates in
/// `[0, board_size)²`, seeded so the sequence is reproducible.
pub fn generate_evil_members(board_size: f64, count: usize, seed: u64) -> Vec<EvilMember> {
    let mut rng = SmallRng::seed_from_u64(seed);
    sample_members(board_size, count, &mut rng)
}

/// Draws members from any random source.
///
/// Kept generic over `Rng` so the seeded generator is a thin wrapper and
/// swapping the PRNG touches exactly one place. Member ids equal the draw
/// index, which also fixes which members receive the special values.
pub fn sample_members(board_size: f64, count: usize, rng: &mut impl Rng) -> Vec<EvilMember> {
    let mut members = Vec::with_capacity(count);
    for i in 0..count {
        let x = rng.gen_range(0.0..board_size);
        let y = rng.gen_range(0.0..board_size);
        let value = SPECIAL_VALUES.get(i).copied().unwrap_or(1);
        members.push(EvilMember {
            id: i as u32,
            coord: Coord::new(x, y),
            value,
        });
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geometry::{within_board, BOARD_SIZE};

    #[test]
    fn same_seed_same_members() {
        let a = generate_evil_members(BOARD_SIZE, 10, 42);
        let b = generate_evil_members(BOARD_SIZE, 10, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate_evil_members(BOARD_SIZE, 10, 42);
        let b = generate_evil_members(BOARD_SIZE, 10, 43);
        assert_ne!(a, b);
    }

    #[test]
    fn members_land_on_the_board() {
        for seed in 0..20 {
            let members = generate_evil_members(BOARD_SIZE, 30, seed);
            assert!(members.iter().all(|m| within_board(BOARD_SIZE, m.coord)));
        }
    }

    #[test]
    fn special_values_then_ones() {
        let members = generate_evil_members(BOARD_SIZE, 7, 7);
        let values: Vec<u32> = members.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![9, 8, 7, 6, 5, 1, 1]);
    }

    #[test]
    fn special_values_truncate_below_list_length() {
        let members = generate_evil_members(BOARD_SIZE, 3, 7);
        let values: Vec<u32> = members.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![9, 8, 7]);
    }

    #[test]
    fn ids_follow_draw_order() {
        let members = generate_evil_members(BOARD_SIZE, 6, 1);
        let ids: Vec<u32> = members.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate_evil_members(BOARD_SIZE, 0, 1).is_empty());
    }
}
