//! Filename pattern registry.
//!
//! An ordered set of matching rules per media type. Each rule is a regular
//! expression with named capture groups plus a base confidence reflecting its
//! specificity (an exact `S01E01` scores higher than an ambiguous `1x01`).
//! The registry is constructed once at startup and treated as immutable
//! afterwards; matching never short-circuits so the caller can pick the
//! highest-confidence interpretation.

use crate::models::media::MediaType;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Named capture groups extracted by a matching rule.
pub type ExtractedFields = HashMap<String, String>;

/// One filename-matching rule. Immutable once registered.
#[derive(Debug)]
pub struct PatternRule {
    /// Media type this rule recognizes.
    pub media_type: MediaType,
    /// Lower priority is tried first; ties keep registration order.
    pub priority: u8,
    /// Base confidence contribution for a match (0.0 - 1.0).
    pub base_confidence: f32,
    /// Short identifier for logging.
    pub name: &'static str,
    regex: Regex,
}

impl PatternRule {
    /// Compile a rule. Panics on an invalid pattern, which is a programmer
    /// error: all rules are literals known at build time.
    pub fn new(
        media_type: MediaType,
        priority: u8,
        base_confidence: f32,
        name: &'static str,
        pattern: &str,
    ) -> Self {
        let regex = Regex::new(pattern).expect("pattern rules must be valid regexes");
        Self {
            media_type,
            priority,
            base_confidence,
            name,
            regex,
        }
    }

    /// Try this rule against a filename stem, returning the named capture
    /// groups on success.
    pub fn extract(&self, name: &str) -> Option<ExtractedFields> {
        self.regex.captures(name).map(|caps| self.fields(&caps))
    }

    fn fields(&self, caps: &Captures<'_>) -> ExtractedFields {
        let mut fields = ExtractedFields::new();
        for group in self.regex.capture_names().flatten() {
            if let Some(m) = caps.name(group) {
                if !m.as_str().is_empty() {
                    fields.insert(group.to_string(), m.as_str().to_string());
                }
            }
        }
        fields
    }
}

/// Append-only list of pattern rules, ordered per media type by priority
/// then registration order.
#[derive(Debug, Default)]
pub struct PatternRegistry {
    rules: Vec<PatternRule>,
}

impl PatternRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry populated with the built-in rules.
    pub fn with_default_rules() -> Self {
        let mut registry = Self::new();
        for rule in default_rules() {
            registry.register(rule);
        }
        registry
    }

    /// Add a rule. Rules are never removed or reordered after registration.
    pub fn register(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    /// Try every rule of the given media type in priority order and return
    /// all matches with their extracted fields. No short-circuiting: the
    /// caller picks the highest-confidence interpretation. Overlapping
    /// matches are resolved by priority, not match length.
    pub fn match_all<'a>(
        &'a self,
        media_type: MediaType,
        name: &str,
    ) -> Vec<(&'a PatternRule, ExtractedFields)> {
        let mut candidates: Vec<&PatternRule> = self
            .rules
            .iter()
            .filter(|r| r.media_type == media_type)
            .collect();
        // Stable sort keeps registration order within equal priorities.
        candidates.sort_by_key(|r| r.priority);

        candidates
            .into_iter()
            .filter_map(|rule| rule.extract(name).map(|fields| (rule, fields)))
            .collect()
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Built-in rules for the supported media types.
///
/// Confidence values mirror pattern specificity: explicit `S01E01` markers
/// beat `1x01`, which beats verbose or loosely separated forms.
fn default_rules() -> Vec<PatternRule> {
    vec![
        // --- TV shows ---
        // Canonical dash format, including our own formatter output:
        // "Show Name - S01E05 - Episode Title"
        PatternRule::new(
            MediaType::TvShow,
            0,
            0.95,
            "tv_dash",
            r"^(?P<show>.+?)\s+-\s+[Ss](?P<season>\d{1,2})[Ee](?P<episode>\d{1,4})(?:[Ee]\d{1,4}|[-+][Ee]?\d{1,4})*\s+-\s+(?P<title>.+)$",
        ),
        // Range form: Show.S01E01-E03.Title
        PatternRule::new(
            MediaType::TvShow,
            1,
            0.9,
            "tv_range",
            r"^(?P<show>.+?)[. _-]+[Ss](?P<season>\d{1,2})[Ee](?P<episode>\d{1,4})(?:\s*-\s*[Ee]\d{1,4}|-\d{1,3})(?:[. _-]+(?P<title>.+))?$",
        ),
        // Standard scene format: Show.Name.S01E05(.E06...).Title
        PatternRule::new(
            MediaType::TvShow,
            2,
            0.95,
            "tv_standard",
            r"^(?P<show>.+?)[. _-]+[Ss](?P<season>\d{1,2})[Ee](?P<episode>\d{1,4})(?P<multi>(?:[+&, ]?[Ee]\d{1,4})*)(?:[. _-]+(?P<title>.+))?$",
        ),
        // 1x05 format
        PatternRule::new(
            MediaType::TvShow,
            3,
            0.85,
            "tv_x",
            r"^(?P<show>.+?)[. _-]+(?P<season>\d{1,2})x(?P<episode>\d{1,4})(?:-\d{1,4})?(?:[. _-]+(?P<title>.+))?$",
        ),
        // Verbose "Season 1 Episode 2" format
        PatternRule::new(
            MediaType::TvShow,
            4,
            0.8,
            "tv_verbose",
            r"^(?P<show>.+?)[. _-]+[Ss]eason[. _-]+(?P<season>\d{1,2})[. _-]+[Ee]pisode[. _-]+(?P<episode>\d{1,4})(?:[. _-]+(?P<title>.+))?$",
        ),
        // Period-separated S01.E05 format
        PatternRule::new(
            MediaType::TvShow,
            5,
            0.8,
            "tv_period",
            r"^(?P<show>.+?)[. _-]+[Ss](?P<season>\d{1,2})\.[Ee](?P<episode>\d{1,4})(?:[. _-]+(?P<title>.+))?$",
        ),
        // --- Movies ---
        PatternRule::new(
            MediaType::Movie,
            0,
            0.95,
            "movie_paren_year",
            r"^(?P<title>.+?)\s*\((?P<year>\d{4})\)",
        ),
        PatternRule::new(
            MediaType::Movie,
            1,
            0.9,
            "movie_bracket_year",
            r"^(?P<title>.+?)\s*\[(?P<year>\d{4})\]",
        ),
        PatternRule::new(
            MediaType::Movie,
            2,
            0.85,
            "movie_sep_year",
            r"^(?P<title>.+?)[. _-]+(?P<year>(?:18|19|20)\d{2})(?:[. _-].*)?$",
        ),
        // --- Anime ---
        // Fansub format: [Group] Show Name - 05v2 [720p]
        PatternRule::new(
            MediaType::Anime,
            0,
            0.9,
            "anime_episode",
            r"^\[(?P<group>[^\]]+)\]\s*(?P<show>.+?)\s*-\s*(?P<episode>\d{1,4})(?:v(?P<version>\d))?\s*(?:\[|\(|$)",
        ),
        // [Group] Show Name - OVA2 [1080p]
        PatternRule::new(
            MediaType::Anime,
            1,
            0.85,
            "anime_special",
            r"^\[(?P<group>[^\]]+)\]\s*(?P<show>.+?)\s*-\s*(?:OVA|Special|Movie)\s*(?P<special_number>\d{0,3})",
        ),
        // Loose fallback: bracketed group, title, trailing number
        PatternRule::new(
            MediaType::Anime,
            2,
            0.6,
            "anime_loose",
            r"^\[[^\]]+\]\s*(?P<show>.+?)\s*-\s*(?P<episode>\d{1,4})",
        ),
        // --- Music ---
        // Artist - Album - 01 - Track Title
        PatternRule::new(
            MediaType::Music,
            0,
            0.85,
            "music_full",
            r"^(?P<artist>.+?)\s+-\s+(?P<album>.+?)\s+-\s+(?P<track>\d{1,3})\s+-\s+(?P<title>.+)$",
        ),
        // 01 - Track Title (artist comes from directory context)
        PatternRule::new(
            MediaType::Music,
            1,
            0.6,
            "music_track",
            r"^(?P<track>\d{1,3})\s*-\s*(?P<title>.+)$",
        ),
    ]
}
