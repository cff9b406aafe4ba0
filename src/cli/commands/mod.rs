//! CLI command implementations.

pub mod group;
pub mod parse;
pub mod preview;
