//! Media Renamer Library
//!
//! A library for identifying TV shows, movies, anime and music from messy
//! filenames and rendering canonical, Plex-compatible names.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
