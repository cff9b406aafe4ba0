//! Canonical filename and directory generation.

pub mod filename;
pub mod folder;
