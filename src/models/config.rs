//! Configuration model.
//!
//! All scoring weights and thresholds live here as named, documented values
//! so tests can override them and assert monotonicity instead of chasing
//! scattered literals.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Confidence bonus for movies that carry a parseable year.
pub const DEFAULT_MOVIE_YEAR_BONUS: f32 = 0.05;
/// Confidence penalty for TV-type filenames with no season information.
pub const DEFAULT_MISSING_SEASON_PENALTY: f32 = 0.10;
/// Confidence bonus when a `Season XX` directory corroborates the parse.
pub const DEFAULT_PATH_HINT_BONUS: f32 = 0.05;
/// Confidence below which a result is flagged for manual review.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f32 = 0.5;
/// Weight of title similarity vs. pattern confidence in the resolver blend.
pub const DEFAULT_TITLE_MATCH_PRIORITY: f32 = 0.6;
/// Minimum similarity for a metadata candidate to be auto-accepted.
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.8;
/// Maximum number of episodes an `E01-Exx` range may expand to. Larger
/// ranges are treated as anomalous input, not expanded.
pub const DEFAULT_MAX_EPISODE_RANGE: u16 = 50;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filename rendering options.
    pub naming: NamingConfig,
    /// Parser confidence weights.
    pub scoring: ScoringConfig,
    /// Metadata/segment matching thresholds.
    pub matching: MatchingConfig,
    /// Episode detection bounds.
    pub detector: DetectorConfig,
}

/// How colons in titles are rewritten for the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColonStyle {
    /// `Show: Title` becomes `Show - Title`.
    DashSpace,
    /// `Show: Title` becomes `Show_ Title`.
    Underscore,
}

/// Filename rendering options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Colon replacement strategy.
    pub colon_style: ColonStyle,
    /// Always render multi-episode files in the concatenated `E01+E02` form,
    /// even when the episode numbers are sequential. The explicit request
    /// wins over auto-detected sequentiality.
    pub force_concatenated: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            colon_style: ColonStyle::DashSpace,
            force_concatenated: false,
        }
    }
}

/// Parser confidence weights.
///
/// Increasing pattern specificity must never decrease confidence; the
/// weights are additive on top of each rule's base confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Bonus when a movie filename carries a plausible year.
    pub movie_year_bonus: f32,
    /// Penalty when a TV filename yields no season.
    pub missing_season_penalty: f32,
    /// Bonus when the directory context corroborates the parsed season.
    pub path_hint_bonus: f32,
    /// Results below this confidence need manual review before applying.
    pub acceptance_threshold: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            movie_year_bonus: DEFAULT_MOVIE_YEAR_BONUS,
            missing_season_penalty: DEFAULT_MISSING_SEASON_PENALTY,
            path_hint_bonus: DEFAULT_PATH_HINT_BONUS,
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
        }
    }
}

/// Metadata/segment matching thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Weight of title similarity vs. pattern confidence when the resolver
    /// blends competing candidates.
    pub title_match_priority: f32,
    /// Minimum similarity below which a candidate is not auto-accepted.
    pub match_threshold: f32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            title_match_priority: DEFAULT_TITLE_MATCH_PRIORITY,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

/// Episode detection bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Maximum size of an expanded episode range.
    pub max_episode_range: u16,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_episode_range: DEFAULT_MAX_EPISODE_RANGE,
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("media_renamer")
}

/// Load configuration from file, falling back to defaults.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    if config_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&config_path) {
            match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Ignoring invalid config file {:?}: {}", config_path, e);
                }
            }
        }
    }

    Config::default()
}
