//! Filename generator.
//!
//! Renders a [`ParsedName`] into its canonical, Plex-compatible filename.
//! Rendering is deterministic: the same parse always produces the same name.
//! Formatter output parses back to an equivalent structure, though not to
//! the original bytes (sanitization is lossy).

use crate::generators::folder::suggest_directory;
use crate::models::config::NamingConfig;
use crate::models::media::{FormattedName, MediaType, ParsedName, SpecialType};
use crate::utils::text::sanitize_component;
use crate::{Error, Result};
use std::path::Path;

/// Render the canonical filename for a parse.
///
/// Fails with [`Error::TemplateField`] when a field the media type's
/// template requires is absent; everything else degrades gracefully
/// (missing titles and years are simply omitted).
pub fn format_name(parsed: &ParsedName, naming: &NamingConfig) -> Result<FormattedName> {
    let stem = match parsed.media_type {
        MediaType::TvShow => format_tv(parsed, naming)?,
        MediaType::Special => format_special(parsed, naming)?,
        MediaType::Movie => format_movie(parsed, naming)?,
        MediaType::Music => format_music(parsed, naming)?,
        MediaType::Anime => format_tv(parsed, naming)?,
        MediaType::Unknown => {
            return Err(Error::TemplateField {
                media_type: MediaType::Unknown,
                field: "media_type",
            })
        }
    };

    let file_name = match extension_of(&parsed.original_filename) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    };

    Ok(FormattedName {
        file_name,
        directory: suggest_directory(parsed, naming),
    })
}

fn format_tv(parsed: &ParsedName, naming: &NamingConfig) -> Result<String> {
    let show = require(parsed, parsed.show_name.as_deref(), "show_name")?;
    let show = sanitize_component(show, naming.colon_style);

    // Anime without an explicit season defaults to season 1.
    let season = match parsed.season {
        Some(s) => s,
        None if parsed.media_type == MediaType::Anime => 1,
        None => {
            return Err(Error::TemplateField {
                media_type: parsed.media_type,
                field: "season",
            })
        }
    };
    if parsed.episode_numbers.is_empty() {
        return Err(Error::TemplateField {
            media_type: parsed.media_type,
            field: "episode_numbers",
        });
    }

    let span = episode_span(&parsed.episode_numbers, naming.force_concatenated);
    let mut stem = format!("{show} - S{season:02}{span}");

    if let Some(title) = joined_titles(parsed, naming) {
        stem.push_str(" - ");
        stem.push_str(&title);
    }
    Ok(stem)
}

fn format_special(parsed: &ParsedName, naming: &NamingConfig) -> Result<String> {
    let show = require(parsed, parsed.show_name.as_deref(), "show_name")?;
    let show = sanitize_component(show, naming.colon_style);
    let special_type = parsed.special_type.unwrap_or(SpecialType::Special);

    let marker = match parsed.episode_numbers.first() {
        Some(number) => format!("S00E{number:02}"),
        None => special_type.keyword().to_string(),
    };

    let mut stem = format!("{show} - {marker}");
    if let Some(title) = joined_titles(parsed, naming) {
        stem.push_str(" - ");
        stem.push_str(&title);
    }
    Ok(stem)
}

fn format_movie(parsed: &ParsedName, naming: &NamingConfig) -> Result<String> {
    let title = require(parsed, parsed.movie_name.as_deref(), "movie_name")?;
    let title = sanitize_component(title, naming.colon_style);

    Ok(match parsed.year {
        Some(year) => format!("{title} ({year})"),
        None => title,
    })
}

fn format_music(parsed: &ParsedName, naming: &NamingConfig) -> Result<String> {
    // Artist is required for the directory; the filename itself needs the
    // track title.
    require(parsed, parsed.artist.as_deref(), "artist")?;
    let title = require(parsed, parsed.extra.get("title").map(String::as_str), "title")?;
    let title = sanitize_component(title, naming.colon_style);

    let track = parsed
        .extra
        .get("track")
        .and_then(|t| t.parse::<u16>().ok());

    Ok(match track {
        Some(track) => format!("{track:02} - {title}"),
        None => title,
    })
}

/// Render episode numbers as a marker span.
///
/// A single episode renders as `E05`. A sequential run collapses to a range
/// (`E05-E07`) unless concatenated form is forced; anything else lists every
/// number (`E01+E03+E05`) so no episode is ever silently dropped.
fn episode_span(numbers: &[u16], force_concatenated: bool) -> String {
    if numbers.len() == 1 {
        return format!("E{:02}", numbers[0]);
    }

    let sequential = numbers.windows(2).all(|w| w[1] == w[0] + 1);
    if sequential && !force_concatenated {
        let first = numbers[0];
        let last = numbers[numbers.len() - 1];
        return format!("E{first:02}-E{last:02}");
    }

    let parts: Vec<String> = numbers.iter().map(|n| format!("E{n:02}")).collect();
    parts.join("+")
}

/// Join per-episode titles with " & ", or fall back to the single combined
/// title kept in the auxiliary data.
fn joined_titles(parsed: &ParsedName, naming: &NamingConfig) -> Option<String> {
    if !parsed.episode_titles.is_empty() {
        let joined = parsed
            .episode_titles
            .iter()
            .map(|t| sanitize_component(t, naming.colon_style))
            .collect::<Vec<_>>()
            .join(" & ");
        return Some(joined);
    }
    parsed
        .extra
        .get("title")
        .map(|t| sanitize_component(t, naming.colon_style))
}

fn require<'a>(parsed: &ParsedName, value: Option<&'a str>, field: &'static str) -> Result<&'a str> {
    value.ok_or(Error::TemplateField {
        media_type: parsed.media_type,
        field,
    })
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tv(show: &str, season: u16, episodes: &[u16], titles: &[&str]) -> ParsedName {
        ParsedName {
            original_filename: "input.mp4".to_string(),
            media_type: MediaType::TvShow,
            show_name: Some(show.to_string()),
            season: Some(season),
            episode_numbers: episodes.to_vec(),
            episode_titles: titles.iter().map(|t| t.to_string()).collect(),
            confidence: 0.95,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_episode() {
        let parsed = tv("Show Name", 1, &[5], &["Episode Title"]);
        let formatted = format_name(&parsed, &NamingConfig::default()).unwrap();
        assert_eq!(formatted.file_name, "Show Name - S01E05 - Episode Title.mp4");
    }

    #[test]
    fn test_single_episode_no_title() {
        let parsed = tv("Show Name", 1, &[5], &[]);
        let formatted = format_name(&parsed, &NamingConfig::default()).unwrap();
        assert_eq!(formatted.file_name, "Show Name - S01E05.mp4");
    }

    #[test]
    fn test_sequential_range() {
        let parsed = tv("Show", 1, &[5, 6, 7], &[]);
        let formatted = format_name(&parsed, &NamingConfig::default()).unwrap();
        assert_eq!(formatted.file_name, "Show - S01E05-E07.mp4");
    }

    #[test]
    fn test_non_sequential_concatenated() {
        let parsed = tv("Show", 1, &[1, 3, 5], &[]);
        let formatted = format_name(&parsed, &NamingConfig::default()).unwrap();
        assert_eq!(formatted.file_name, "Show - S01E01+E03+E05.mp4");
    }

    #[test]
    fn test_forced_concatenation() {
        let naming = NamingConfig {
            force_concatenated: true,
            ..Default::default()
        };
        let parsed = tv("Show", 1, &[5, 6, 7], &[]);
        let formatted = format_name(&parsed, &naming).unwrap();
        assert_eq!(formatted.file_name, "Show - S01E05+E06+E07.mp4");
    }

    #[test]
    fn test_multi_episode_titles_joined() {
        let parsed = tv("Show", 1, &[1, 2], &["First Part", "Second Part"]);
        let formatted = format_name(&parsed, &NamingConfig::default()).unwrap();
        assert_eq!(
            formatted.file_name,
            "Show - S01E01-E02 - First Part & Second Part.mp4"
        );
    }

    #[test]
    fn test_colon_in_show_name() {
        let parsed = tv("Show: The Return", 1, &[1], &[]);
        let formatted = format_name(&parsed, &NamingConfig::default()).unwrap();
        assert_eq!(formatted.file_name, "Show - The Return - S01E01.mp4");

        let underscore = NamingConfig {
            colon_style: crate::models::config::ColonStyle::Underscore,
            ..Default::default()
        };
        let formatted = format_name(&parsed, &underscore).unwrap();
        assert_eq!(formatted.file_name, "Show_ The Return - S01E01.mp4");
    }

    #[test]
    fn test_movie_with_and_without_year() {
        let mut parsed = ParsedName {
            original_filename: "input.mkv".to_string(),
            media_type: MediaType::Movie,
            movie_name: Some("The Matrix".to_string()),
            year: Some(1999),
            ..Default::default()
        };
        let formatted = format_name(&parsed, &NamingConfig::default()).unwrap();
        assert_eq!(formatted.file_name, "The Matrix (1999).mkv");
        assert_eq!(
            formatted.directory.as_deref(),
            Some(Path::new("The Matrix (1999)"))
        );

        parsed.year = None;
        let formatted = format_name(&parsed, &NamingConfig::default()).unwrap();
        assert_eq!(formatted.file_name, "The Matrix.mkv");
    }

    #[test]
    fn test_special_with_number() {
        let parsed = ParsedName {
            original_filename: "input.mp4".to_string(),
            media_type: MediaType::Special,
            show_name: Some("Show".to_string()),
            special_type: Some(SpecialType::Special),
            episode_numbers: vec![3],
            ..Default::default()
        };
        let formatted = format_name(&parsed, &NamingConfig::default()).unwrap();
        assert_eq!(formatted.file_name, "Show - S00E03.mp4");
    }

    #[test]
    fn test_special_keyword_only() {
        let parsed = ParsedName {
            original_filename: "input.mkv".to_string(),
            media_type: MediaType::Special,
            show_name: Some("Show".to_string()),
            special_type: Some(SpecialType::Ova),
            ..Default::default()
        };
        let formatted = format_name(&parsed, &NamingConfig::default()).unwrap();
        assert_eq!(formatted.file_name, "Show - OVA.mkv");
    }

    #[test]
    fn test_music_track() {
        let mut parsed = ParsedName {
            original_filename: "input.mp3".to_string(),
            media_type: MediaType::Music,
            artist: Some("Artist".to_string()),
            ..Default::default()
        };
        parsed.extra.insert("album".to_string(), "Album".to_string());
        parsed.extra.insert("track".to_string(), "3".to_string());
        parsed
            .extra
            .insert("title".to_string(), "Song Title".to_string());

        let formatted = format_name(&parsed, &NamingConfig::default()).unwrap();
        assert_eq!(formatted.file_name, "03 - Song Title.mp3");
        assert_eq!(
            formatted.directory.as_deref(),
            Some(Path::new("Artist/Album"))
        );
    }

    #[test]
    fn test_missing_required_field_is_error() {
        let parsed = ParsedName {
            original_filename: "input.mp4".to_string(),
            media_type: MediaType::TvShow,
            season: Some(1),
            episode_numbers: vec![1],
            ..Default::default()
        };
        let err = format_name(&parsed, &NamingConfig::default()).unwrap_err();
        assert!(matches!(err, Error::TemplateField { field: "show_name", .. }));
    }

    #[test]
    fn test_unknown_media_type_is_error() {
        let parsed = ParsedName::unknown("whatever.bin");
        assert!(format_name(&parsed, &NamingConfig::default()).is_err());
    }

    #[test]
    fn test_deterministic() {
        let parsed = tv("Show", 2, &[4], &["Title"]);
        let a = format_name(&parsed, &NamingConfig::default()).unwrap();
        let b = format_name(&parsed, &NamingConfig::default()).unwrap();
        assert_eq!(a, b);
    }
}
