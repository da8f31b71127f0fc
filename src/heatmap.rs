//! Heatmap computation.
//!
//! Discretizes the board into a square grid and, for each cell, sums the
//! value of every source point strictly within a radius of the cell center.
//! The grid is recomputed whole at game start and at each phase transition
//! rather than updated incrementally, because the source set itself changes
//! (members only, then members plus placed spies).

use rayon::prelude::*;

use crate::board::entity::{EvilMember, Spy};
use crate::board::geometry::{within_radius, Coord};

/// Grid resolution (cells per axis). One cell per board unit at the default
/// board size.
pub const HEATMAP_SIZE: usize = 100;

/// A value-emitting point feeding the heatmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Source {
    pub coord: Coord,
    pub value: u32,
}

impl Source {
    /// A member emits its point value.
    pub fn from_member(member: &EvilMember) -> Source {
        Source {
            coord: member.coord,
            value: member.value,
        }
    }

    /// A placed spy emits value 1 in the EVIL-phase recomputation.
    pub fn from_spy(spy: &Spy) -> Source {
        Source {
            coord: spy.coord,
            value: 1,
        }
    }
}

/// A computed density field over the board.
///
/// `cells` is row-major: `index = cy * resolution + cx`. `min` and `max` are
/// always the true extrema of `cells`; they are computed together with the
/// grid and never updated independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub cells: Vec<u32>,
    pub resolution: usize,
    pub min: u32,
    pub max: u32,
}

impl Heatmap {
    /// Computes the full grid: each cell samples its center
    /// `(cx + 0.5, cy + 0.5)` and sums the value of every source strictly
    /// within `radius` of it.
    ///
    /// Cells are independent reads over the source slice, so they are
    /// evaluated in parallel; the collected output is identical to the
    /// sequential row-major order.
    pub fn compute(radius: f64, resolution: usize, sources: &[Source]) -> Heatmap {
        let cells: Vec<u32> = (0..resolution * resolution)
            .into_par_iter()
            .map(|idx| {
                let cx = idx % resolution;
                let cy = idx / resolution;
                let center = Coord::new(cx as f64 + 0.5, cy as f64 + 0.5);
                sources
                    .iter()
                    .filter(|s| within_radius(center, radius, s.coord))
                    .map(|s| s.value)
                    .sum()
            })
            .collect();

        let min = cells.iter().copied().min().unwrap_or(0);
        let max = cells.iter().copied().max().unwrap_or(0);

        Heatmap {
            cells,
            resolution,
            min,
            max,
        }
    }

    /// Value of the cell at column `cx`, row `cy`.
    pub fn at(&self, cx: usize, cy: usize) -> u32 {
        self.cells[cy * self.resolution + cx]
    }
}

/// Builds the source set for the initial (GOOD-phase) heatmap: members only.
pub fn member_sources(members: &[EvilMember]) -> Vec<Source> {
    members.iter().map(Source::from_member).collect()
}

/// Builds the source set for the EVIL-phase heatmap: members plus placed
/// spies as value-1 points.
pub fn member_and_spy_sources(members: &[EvilMember], spies: &[Spy]) -> Vec<Source> {
    let mut sources = member_sources(members);
    sources.extend(spies.iter().map(Source::from_spy));
    sources
}
