//! Filename parser.
//!
//! Orchestrates the pattern registry and the episode segment detector to
//! turn one messy filename into a structured [`ParsedName`] with a
//! confidence score. Parsing never fails: input no pattern recognizes comes
//! back as `MediaType::Unknown` with zero confidence, so callers can decide
//! whether to fall back to metadata- or LLM-assisted inference.

use crate::core::detector::{
    detect_multi_episode_bounded, detect_special, split_title_segments,
};
use crate::core::patterns::{ExtractedFields, PatternRegistry, PatternRule};
use crate::models::config::{DetectorConfig, ScoringConfig};
use crate::models::media::{MediaType, ParsedName, PathHint, SpecialType};
use crate::utils::text::{clean_name, extract_disc_identifier, strip_quality};
use chrono::Datelike;
use regex::Regex;
use std::path::Path;

/// Base confidence for filenames recognized only by a bare special keyword
/// (no structural pattern matched).
const SPECIAL_KEYWORD_CONFIDENCE: f32 = 0.7;

/// Earliest plausible media year (the first film recordings).
const MIN_PLAUSIBLE_YEAR: u16 = 1878;

/// Audio extensions routed to the music rules.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "m4a", "aac", "ogg", "opus", "wav", "wma"];

/// Filename parser over a shared, already-populated pattern registry.
pub struct NameParser<'a> {
    registry: &'a PatternRegistry,
    scoring: ScoringConfig,
    detector: DetectorConfig,
}

impl<'a> NameParser<'a> {
    /// Create a parser with default scoring weights.
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self::with_config(registry, ScoringConfig::default(), DetectorConfig::default())
    }

    /// Create a parser with custom weights, mainly for tests asserting
    /// scoring monotonicity.
    pub fn with_config(
        registry: &'a PatternRegistry,
        scoring: ScoringConfig,
        detector: DetectorConfig,
    ) -> Self {
        Self {
            registry,
            scoring,
            detector,
        }
    }

    /// Parse a single filename, optionally corroborated by directory
    /// context. Never fails.
    pub fn parse(&self, filename: &str, path_hint: Option<&PathHint>) -> ParsedName {
        let path = Path::new(filename);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| filename.to_string());
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());

        let (clean_stem, quality) = strip_quality(&stem);

        // Pick the best interpretation across media types: within one media
        // type the first match wins (priority order); across types the
        // higher base confidence wins, earlier types keeping ties.
        let mut best: Option<(&PatternRule, ExtractedFields)> = None;
        for media_type in self.media_type_order(extension.as_deref()) {
            if let Some((rule, fields)) =
                self.registry.match_all(media_type, &clean_stem).into_iter().next()
            {
                let better = match &best {
                    None => true,
                    Some((best_rule, _)) => rule.base_confidence > best_rule.base_confidence,
                };
                if better {
                    best = Some((rule, fields));
                }
            }
        }

        let mut parsed = match best {
            Some((rule, fields)) => {
                tracing::debug!("'{}' matched rule {}", filename, rule.name);
                self.interpret(rule, &fields, &clean_stem, filename, path_hint)
            }
            None => self.keyword_special_fallback(&clean_stem, filename),
        };

        if let Some(q) = quality {
            parsed.extra.insert("quality".to_string(), q);
        }

        parsed
    }

    /// Media types to try, most specific first. Audio extensions only make
    /// sense as music; video extensions never do.
    fn media_type_order(&self, extension: Option<&str>) -> Vec<MediaType> {
        match extension {
            Some(ext) if AUDIO_EXTENSIONS.contains(&ext) => vec![MediaType::Music],
            Some(_) => vec![MediaType::Anime, MediaType::TvShow, MediaType::Movie],
            None => vec![
                MediaType::Anime,
                MediaType::TvShow,
                MediaType::Movie,
                MediaType::Music,
            ],
        }
    }

    fn interpret(
        &self,
        rule: &PatternRule,
        fields: &ExtractedFields,
        clean_stem: &str,
        filename: &str,
        path_hint: Option<&PathHint>,
    ) -> ParsedName {
        let mut parsed = ParsedName {
            original_filename: filename.to_string(),
            media_type: rule.media_type,
            confidence: rule.base_confidence,
            ..Default::default()
        };

        match rule.media_type {
            MediaType::TvShow => self.interpret_tv(&mut parsed, fields, clean_stem),
            MediaType::Movie => self.interpret_movie(&mut parsed, fields),
            MediaType::Anime => self.interpret_anime(&mut parsed, rule, fields, clean_stem),
            MediaType::Music => self.interpret_music(&mut parsed, fields, filename, path_hint),
            MediaType::Special | MediaType::Unknown => {}
        }

        // Directory context corroboration
        if let Some(hint) = path_hint {
            if hint.season.is_some() && hint.season == parsed.season {
                parsed.confidence += self.scoring.path_hint_bonus;
            }
        }

        parsed.confidence = parsed.confidence.clamp(0.0, 1.0);
        parsed
    }

    fn interpret_tv(&self, parsed: &mut ParsedName, fields: &ExtractedFields, clean_stem: &str) {
        parsed.show_name = fields.get("show").map(|s| clean_name(s));
        parsed.season = fields.get("season").and_then(|s| s.parse().ok());

        let mut episodes =
            detect_multi_episode_bounded(clean_stem, self.detector.max_episode_range);
        if episodes.is_empty() {
            if let Some(ep) = fields.get("episode").and_then(|e| e.parse().ok()) {
                episodes.push(ep);
            }
        }
        parsed.episode_numbers = episodes;

        if let Some(title) = fields.get("title").map(|t| clean_name(t)) {
            self.assign_titles(parsed, title);
        }

        if parsed.season.is_none() {
            parsed.confidence -= self.scoring.missing_season_penalty;
        }

        // Season 0 marks a special
        if parsed.season == Some(0) {
            let info = detect_special(clean_stem);
            parsed.media_type = MediaType::Special;
            parsed.special_type = Some(
                info.map(|i| i.special_type)
                    .unwrap_or(SpecialType::Special),
            );
            parsed.episode_numbers.truncate(1);
        }
    }

    fn interpret_movie(&self, parsed: &mut ParsedName, fields: &ExtractedFields) {
        parsed.movie_name = fields.get("title").map(|s| clean_name(s));
        parsed.year = fields.get("year").and_then(|y| y.parse().ok());

        if let Some(year) = parsed.year {
            let max_year = chrono::Utc::now().year() as u16 + 2;
            if year < MIN_PLAUSIBLE_YEAR || year > max_year {
                tracing::warn!("Implausible year {} in '{}'", year, parsed.original_filename);
                parsed.year = None;
                parsed.confidence *= 0.5;
            } else {
                parsed.confidence += self.scoring.movie_year_bonus;
            }
        }
    }

    fn interpret_anime(
        &self,
        parsed: &mut ParsedName,
        rule: &PatternRule,
        fields: &ExtractedFields,
        clean_stem: &str,
    ) {
        parsed.show_name = fields.get("show").map(|s| clean_name(s));
        if let Some(group) = fields.get("group") {
            parsed
                .extra
                .insert("release_group".to_string(), group.clone());
        }
        if let Some(version) = fields.get("version") {
            parsed.extra.insert("version".to_string(), version.clone());
        }

        if rule.name == "anime_special" {
            let info = detect_special(clean_stem);
            parsed.media_type = MediaType::Special;
            parsed.special_type = Some(info.map(|i| i.special_type).unwrap_or(SpecialType::Ova));
            let number = fields
                .get("special_number")
                .and_then(|n| n.parse::<u16>().ok())
                .or(info.and_then(|i| i.number));
            parsed.episode_numbers = number.into_iter().collect();
        } else if let Some(ep) = fields.get("episode").and_then(|e| e.parse().ok()) {
            parsed.episode_numbers = vec![ep];
        }
    }

    fn interpret_music(
        &self,
        parsed: &mut ParsedName,
        fields: &ExtractedFields,
        filename: &str,
        path_hint: Option<&PathHint>,
    ) {
        let artist = fields
            .get("artist")
            .map(|s| clean_name(s))
            .or_else(|| path_hint.and_then(|h| h.show_name.clone()));

        // Without an artist the music invariant cannot hold; treat as
        // unrecognized rather than fabricating one.
        let Some(artist) = artist else {
            *parsed = ParsedName::unknown(filename);
            return;
        };
        parsed.artist = Some(artist);

        if let Some(album) = fields.get("album") {
            parsed.extra.insert("album".to_string(), clean_name(album));
        }
        if let Some(track) = fields.get("track").and_then(|t| t.parse::<u16>().ok()) {
            parsed.extra.insert("track".to_string(), track.to_string());
        }
        if let Some(title) = fields.get("title") {
            parsed.extra.insert("title".to_string(), clean_name(title));
        }
        if let Some(disc) = extract_disc_identifier(filename) {
            parsed.extra.insert("disc".to_string(), disc);
        }
    }

    /// Distribute an episode title over the episode numbers. Multi-episode
    /// titles split on segment separators when the counts line up; otherwise
    /// the raw title is kept as auxiliary data.
    fn assign_titles(&self, parsed: &mut ParsedName, title: String) {
        if parsed.episode_numbers.len() <= 1 {
            parsed.episode_titles = vec![title];
            return;
        }
        let segments = split_title_segments(&title);
        if segments.len() == parsed.episode_numbers.len() {
            parsed.episode_titles = segments;
        } else {
            parsed.extra.insert("title".to_string(), title);
        }
    }

    /// Last resort for names with no structural pattern: a bare special
    /// keyword ("Show.Special.1") still identifies the file.
    fn keyword_special_fallback(&self, clean_stem: &str, filename: &str) -> ParsedName {
        let Some(info) = detect_special(clean_stem) else {
            return ParsedName::unknown(filename);
        };

        let show = Regex::new(r"(?i)[\s._-]*\b(?:specials?|ovas?|movie|film)\b.*$")
            .ok()
            .map(|re| clean_name(&re.replace(clean_stem, "")))
            .filter(|s| !s.is_empty());

        ParsedName {
            original_filename: filename.to_string(),
            media_type: MediaType::Special,
            show_name: show,
            special_type: Some(info.special_type),
            episode_numbers: info.number.into_iter().collect(),
            confidence: SPECIAL_KEYWORD_CONFIDENCE,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser_fixture() -> PatternRegistry {
        PatternRegistry::with_default_rules()
    }

    #[test]
    fn test_parse_standard_tv() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("Show.Name.S01E05.Episode.Title.mp4", None);

        assert_eq!(parsed.media_type, MediaType::TvShow);
        assert_eq!(parsed.show_name.as_deref(), Some("Show Name"));
        assert_eq!(parsed.season, Some(1));
        assert_eq!(parsed.episode_numbers, vec![5]);
        assert_eq!(parsed.episode_titles, vec!["Episode Title".to_string()]);
        assert!(parsed.confidence > 0.9);
    }

    #[test]
    fn test_parse_multi_episode() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("Show.S01E01E02E03.mkv", None);

        assert_eq!(parsed.media_type, MediaType::TvShow);
        assert_eq!(parsed.episode_numbers, vec![1, 2, 3]);
        assert!(parsed.is_multi_episode());
    }

    #[test]
    fn test_parse_movie_with_year() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("The Matrix (1999).mkv", None);

        assert_eq!(parsed.media_type, MediaType::Movie);
        assert_eq!(parsed.movie_name.as_deref(), Some("The Matrix"));
        assert_eq!(parsed.year, Some(1999));
        // Year bonus applies
        assert!(parsed.confidence > 0.95);
    }

    #[test]
    fn test_implausible_year_dropped() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("Fake Movie (3019).mkv", None);

        assert_eq!(parsed.media_type, MediaType::Movie);
        assert!(parsed.year.is_none());
        assert!(parsed.confidence < 0.95);
    }

    #[test]
    fn test_parse_anime_fansub() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("[SubGroup] Cool Show - 12 [720p].mkv", None);

        assert_eq!(parsed.media_type, MediaType::Anime);
        assert_eq!(parsed.show_name.as_deref(), Some("Cool Show"));
        assert_eq!(parsed.episode_numbers, vec![12]);
        assert_eq!(parsed.extra.get("release_group").map(String::as_str), Some("SubGroup"));
    }

    #[test]
    fn test_parse_anime_ova() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("[SubGroup] Cool Show - OVA2 [1080p].mkv", None);

        assert_eq!(parsed.media_type, MediaType::Special);
        assert_eq!(parsed.special_type, Some(SpecialType::Ova));
        assert_eq!(parsed.episode_numbers, vec![2]);
    }

    #[test]
    fn test_parse_music_full() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("Artist - Album - 03 - Song Title.mp3", None);

        assert_eq!(parsed.media_type, MediaType::Music);
        assert_eq!(parsed.artist.as_deref(), Some("Artist"));
        assert_eq!(parsed.extra.get("album").map(String::as_str), Some("Album"));
        assert_eq!(parsed.extra.get("track").map(String::as_str), Some("3"));
        assert_eq!(parsed.extra.get("title").map(String::as_str), Some("Song Title"));
    }

    #[test]
    fn test_music_track_needs_artist_context() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);

        // No artist anywhere: unknown
        let parsed = parser.parse("03 - Song Title.mp3", None);
        assert_eq!(parsed.media_type, MediaType::Unknown);

        // Artist from the directory context
        let hint = PathHint {
            season: None,
            show_name: Some("Artist".to_string()),
        };
        let parsed = parser.parse("03 - Song Title.mp3", Some(&hint));
        assert_eq!(parsed.media_type, MediaType::Music);
        assert_eq!(parsed.artist.as_deref(), Some("Artist"));
    }

    #[test]
    fn test_unparseable_is_unknown_not_error() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("random garbage here.bin", None);

        assert_eq!(parsed.media_type, MediaType::Unknown);
        assert_eq!(parsed.confidence, 0.0);
    }

    #[test]
    fn test_season_zero_becomes_special() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("Show.S00E01.Special.mp4", None);

        assert_eq!(parsed.media_type, MediaType::Special);
        assert_eq!(parsed.special_type, Some(SpecialType::Special));
        assert_eq!(parsed.episode_numbers, vec![1]);
    }

    #[test]
    fn test_keyword_special_fallback() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("Show.Special.1.mp4", None);

        assert_eq!(parsed.media_type, MediaType::Special);
        assert_eq!(parsed.show_name.as_deref(), Some("Show"));
        assert_eq!(parsed.special_type, Some(SpecialType::Special));
        assert_eq!(parsed.episode_numbers, vec![1]);
    }

    #[test]
    fn test_missing_season_penalty() {
        // A registered rule may capture only an episode; the parse then
        // loses the documented penalty relative to its base confidence.
        let mut registry = PatternRegistry::new();
        registry.register(PatternRule::new(
            MediaType::TvShow,
            0,
            0.9,
            "tv_episode_only",
            r"^(?P<show>.+?)[. _-]+[Ee]pisode[. _-]+(?P<episode>\d{1,4})$",
        ));
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("Show.Episode.7.mp4", None);

        assert_eq!(parsed.media_type, MediaType::TvShow);
        assert_eq!(parsed.season, None);
        assert_eq!(parsed.episode_numbers, vec![7]);
        let expected = 0.9 - ScoringConfig::default().missing_season_penalty;
        assert!((parsed.confidence - expected).abs() < 1e-6);
    }

    #[test]
    fn test_path_hint_bonus() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);

        let bare = parser.parse("Show.S02E03.mkv", None);
        let hint = PathHint {
            season: Some(2),
            show_name: None,
        };
        let corroborated = parser.parse("Show.S02E03.mkv", Some(&hint));

        assert!(corroborated.confidence > bare.confidence);
    }

    #[test]
    fn test_quality_stripped_into_extra() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("Breaking.Bad.S01E01.720p.HDTV.x264.mkv", None);

        assert_eq!(parsed.show_name.as_deref(), Some("Breaking Bad"));
        assert_eq!(parsed.extra.get("quality").map(String::as_str), Some("720p"));
        // Quality tokens never leak into titles
        assert!(parsed
            .episode_titles
            .iter()
            .all(|t| !t.to_lowercase().contains("720p")));
    }

    #[test]
    fn test_specificity_monotonicity() {
        // A more specific pattern (S01E05) must never score below a less
        // specific one (1x05) for equivalent content.
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);

        let specific = parser.parse("Show.S01E05.mkv", None);
        let ambiguous = parser.parse("Show.1x05.mkv", None);
        assert!(specific.confidence >= ambiguous.confidence);
    }

    #[test]
    fn test_aligned_multi_episode_titles() {
        let registry = parser_fixture();
        let parser = NameParser::new(&registry);
        let parsed = parser.parse("Show Name - S01E01-E02 - First Part & Second Part.mkv", None);

        assert_eq!(parsed.episode_numbers, vec![1, 2]);
        assert_eq!(
            parsed.episode_titles,
            vec!["First Part".to_string(), "Second Part".to_string()]
        );
    }
}
