//! Media-related data models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Media type enum.
///
/// Assigned during parsing; the resolver may revise it when confidence
/// is low, the formatter dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    TvShow,
    Movie,
    Anime,
    Music,
    Special,
    Unknown,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::TvShow => write!(f, "tv_show"),
            MediaType::Movie => write!(f, "movie"),
            MediaType::Anime => write!(f, "anime"),
            MediaType::Music => write!(f, "music"),
            MediaType::Special => write!(f, "special"),
            MediaType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Kind of special episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialType {
    Special,
    Ova,
    MovieSpecial,
}

impl SpecialType {
    /// Keyword used when rendering a special without a season-0 ordinal.
    pub fn keyword(&self) -> &'static str {
        match self {
            SpecialType::Special => "Special",
            SpecialType::Ova => "OVA",
            SpecialType::MovieSpecial => "Movie",
        }
    }
}

/// Result of special-episode detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialInfo {
    pub special_type: SpecialType,
    /// Ordinal of the special, when the filename carries one.
    pub number: Option<u16>,
}

/// Structured interpretation of one media filename.
///
/// Created by the name parser, optionally enriched by the title matcher,
/// finalized by the resolver and consumed read-only by the formatter.
///
/// Invariants: at most one of `show_name` / `movie_name` / `artist` is set,
/// consistent with `media_type`; `episode_numbers` is strictly increasing;
/// when `special_type` is set, `episode_numbers` holds at most the special's
/// ordinal and `season` is 0 or absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedName {
    /// Source string, never mutated.
    pub original_filename: String,
    /// Detected media type.
    pub media_type: MediaType,
    /// Show name (TV shows, anime, specials).
    pub show_name: Option<String>,
    /// Movie title.
    pub movie_name: Option<String>,
    /// Artist name (music).
    pub artist: Option<String>,
    /// Season number; 0 is reserved for specials.
    pub season: Option<u16>,
    /// Episode numbers, strictly increasing. More than one entry signals a
    /// multi-episode file.
    pub episode_numbers: Vec<u16>,
    /// Episode titles aligned positionally with `episode_numbers` when
    /// known, empty otherwise.
    pub episode_titles: Vec<String>,
    /// Special episode tag, mutually exclusive with regular numbering.
    pub special_type: Option<SpecialType>,
    /// Release year.
    pub year: Option<u16>,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Auxiliary fields not promoted to first-class status
    /// (quality, release group, album/track/disc for music, ...).
    pub extra: HashMap<String, String>,
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Unknown
    }
}

impl ParsedName {
    /// Fallback result for filenames no pattern recognized.
    pub fn unknown(filename: &str) -> Self {
        ParsedName {
            original_filename: filename.to_string(),
            media_type: MediaType::Unknown,
            confidence: 0.0,
            ..Default::default()
        }
    }

    /// The display name, whichever of show/movie/artist is set.
    pub fn display_name(&self) -> Option<&str> {
        self.show_name
            .as_deref()
            .or(self.movie_name.as_deref())
            .or(self.artist.as_deref())
    }

    /// Whether this file bundles more than one episode.
    pub fn is_multi_episode(&self) -> bool {
        self.episode_numbers.len() > 1
    }
}

/// Result of comparing a parsed fragment against one external metadata
/// record. Ephemeral; produced and consumed within a single match operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Provider-side identifier.
    pub source_id: String,
    /// Canonical title according to the provider.
    pub title: String,
    /// Release/first-air year, when known.
    pub year: Option<u16>,
    /// Text similarity against the query that produced this candidate.
    pub similarity_score: f32,
    /// Media type according to the provider.
    pub media_type: MediaType,
}

/// Final output of the formatter: a sanitized file name plus a suggested
/// directory structure. Regenerable any number of times from the same input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedName {
    /// Sanitized file name, including the original extension if one existed.
    pub file_name: String,
    /// Suggested directory, e.g. `Show Name/Season 01`.
    pub directory: Option<PathBuf>,
}

/// Corroborating signal derived from a file's directory context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathHint {
    /// Season implied by a `Season XX` (or `Specials`) directory.
    pub season: Option<u16>,
    /// Show or artist name implied by the directory layout.
    pub show_name: Option<String>,
}
