//! Integration tests for the parse-then-format pipeline.
//!
//! The formatter's output must itself parse back to an equivalent
//! structure, so generated names survive being re-scanned later.

use media_renamer::core::parser::NameParser;
use media_renamer::core::patterns::PatternRegistry;
use media_renamer::generators::filename::format_name;
use media_renamer::models::config::NamingConfig;
use media_renamer::models::media::{MediaType, ParsedName};
use std::path::Path;

fn parse(name: &str) -> ParsedName {
    let registry = PatternRegistry::with_default_rules();
    let parser = NameParser::new(&registry);
    parser.parse(name, None)
}

fn rename(name: &str) -> String {
    format_name(&parse(name), &NamingConfig::default())
        .unwrap()
        .file_name
}

#[test]
fn test_scene_name_to_plex_name() {
    assert_eq!(
        rename("Show.Name.S01E05.Episode.Title.mp4"),
        "Show Name - S01E05 - Episode Title.mp4"
    );
}

#[test]
fn test_quality_tokens_dropped() {
    assert_eq!(
        rename("Breaking.Bad.S01E01.Pilot.720p.HDTV.x264.mkv"),
        "Breaking Bad - S01E01 - Pilot.mkv"
    );
}

#[test]
fn test_multi_episode_range_name() {
    assert_eq!(rename("Show.S01E01-E03.mkv"), "Show - S01E01-E03.mkv");
}

#[test]
fn test_movie_name() {
    assert_eq!(rename("The.Matrix.1999.mkv"), "The Matrix (1999).mkv");
}

#[test]
fn test_round_trip_tv() {
    let original = parse("Show.Name.S02E07.The.Title.mkv");
    let formatted = format_name(&original, &NamingConfig::default()).unwrap();
    let reparsed = parse(&formatted.file_name);

    assert_eq!(reparsed.media_type, MediaType::TvShow);
    assert_eq!(reparsed.show_name, original.show_name);
    assert_eq!(reparsed.season, original.season);
    assert_eq!(reparsed.episode_numbers, original.episode_numbers);
    assert_eq!(reparsed.episode_titles, original.episode_titles);
}

#[test]
fn test_round_trip_multi_episode_titles() {
    let original = parse("Show Name - S01E01-E02 - First Part & Second Part.mkv");
    let formatted = format_name(&original, &NamingConfig::default()).unwrap();
    let reparsed = parse(&formatted.file_name);

    assert_eq!(reparsed.episode_numbers, vec![1, 2]);
    assert_eq!(
        reparsed.episode_titles,
        vec!["First Part".to_string(), "Second Part".to_string()]
    );
    // Formatting is idempotent once the name is canonical
    let reformatted = format_name(&reparsed, &NamingConfig::default()).unwrap();
    assert_eq!(reformatted.file_name, formatted.file_name);
}

#[test]
fn test_round_trip_digit_leading_title() {
    // A title starting with a number must not grow extra episodes
    let original = parse("Show Name - S01E05 - 7 Days.mkv");
    assert_eq!(original.episode_numbers, vec![5]);
    assert_eq!(original.episode_titles, vec!["7 Days".to_string()]);

    let formatted = format_name(&original, &NamingConfig::default()).unwrap();
    assert_eq!(formatted.file_name, "Show Name - S01E05 - 7 Days.mkv");

    let reparsed = parse(&formatted.file_name);
    assert_eq!(reparsed.episode_numbers, vec![5]);
    assert_eq!(reparsed.episode_titles, original.episode_titles);
}

#[test]
fn test_round_trip_movie() {
    let original = parse("Blade Runner [1982].mkv");
    let formatted = format_name(&original, &NamingConfig::default()).unwrap();
    let reparsed = parse(&formatted.file_name);

    assert_eq!(reparsed.media_type, MediaType::Movie);
    assert_eq!(reparsed.movie_name, original.movie_name);
    assert_eq!(reparsed.year, original.year);
}

#[test]
fn test_round_trip_special() {
    let original = parse("Show.S00E03.mkv");
    let formatted = format_name(&original, &NamingConfig::default()).unwrap();
    assert_eq!(formatted.file_name, "Show - S00E03.mkv");

    let reparsed = parse(&formatted.file_name);
    assert_eq!(reparsed.media_type, MediaType::Special);
    assert_eq!(reparsed.episode_numbers, vec![3]);
}

#[test]
fn test_directory_suggestions() {
    let formatted = format_name(&parse("Show.S03E01.mkv"), &NamingConfig::default()).unwrap();
    assert_eq!(
        formatted.directory.as_deref(),
        Some(Path::new("Show/Season 03"))
    );

    let formatted = format_name(&parse("The.Matrix.1999.mkv"), &NamingConfig::default()).unwrap();
    assert_eq!(
        formatted.directory.as_deref(),
        Some(Path::new("The Matrix (1999)"))
    );
}

#[test]
fn test_unknown_input_cannot_be_formatted() {
    let parsed = parse("complete nonsense here");
    assert!(format_name(&parsed, &NamingConfig::default()).is_err());
}
