//! Counterspy engine library.
//!
//! Exposes the board model, seeded generation, heatmap engine, move
//! resolution, and protocol modules for use by integration tests and the
//! binary entry point.

pub mod board;
pub mod engine;
pub mod generate;
pub mod heatmap;
pub mod protocol;
pub mod resolve;
