//! CSI protocol handling.
//!
//! This module implements parsing and serialization for the CSI (CounterSpy
//! Interface) protocol: the command parser for the main loop and the compact
//! one-line state notation the engine prints after moves.

pub mod notation;
pub mod parser;

pub use notation::{encode_state, format_preview};
pub use parser::{parse_command, Command};
