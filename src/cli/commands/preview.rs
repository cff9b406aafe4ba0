//! Preview command implementation.
//!
//! Scans a directory, parses every media file and shows the rename each one
//! would get. Nothing is written; low-confidence results are flagged for
//! manual review instead of silently applied.

use crate::core::matcher::match_segments;
use crate::core::parser::NameParser;
use crate::core::patterns::PatternRegistry;
use crate::core::resolver::{resolve, Candidate};
use crate::core::scanner;
use crate::generators::filename::format_name;
use crate::models::config::Config;
use crate::models::media::{MatchCandidate, MediaType, ParsedName};
use crate::services::llm::SegmentSuggester;
use crate::services::metadata::MetadataProvider;
use crate::services::ollama::OllamaClient;
use crate::services::tvmaze::TvMazeClient;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Preview renames for every media file under a directory.
pub async fn preview(path: &Path, lookup: bool, llm: bool, config: &Config) -> Result<()> {
    let scan = scanner::scan_directory(path)?;
    if scan.files.is_empty() {
        println!("No media files found.");
        return Ok(());
    }

    let registry = PatternRegistry::with_default_rules();
    let parser = NameParser::with_config(&registry, config.scoring.clone(), config.detector.clone());
    let tvmaze = lookup.then(TvMazeClient::new);
    let suggester = llm.then(OllamaClient::new);

    let mut renames = 0usize;
    let mut needs_review = 0usize;

    for file in &scan.files {
        let hint = scanner::path_hint(&file.path);
        let mut parsed = parser.parse(&file.filename, Some(&hint));

        if let Some(client) = &tvmaze {
            if matches!(parsed.media_type, MediaType::TvShow | MediaType::Anime) {
                match refine_with_metadata(client, parsed.clone(), config).await {
                    Ok(refined) => parsed = refined,
                    Err(e) => {
                        tracing::warn!("Metadata lookup failed for '{}': {}", file.filename, e);
                    }
                }
            }
        }

        if let Some(client) = &suggester {
            if parsed.is_multi_episode() && parsed.episode_titles.is_empty() {
                fill_titles_from_llm(client, &mut parsed).await;
            }
        }

        let reviewable = parsed.confidence < config.scoring.acceptance_threshold;
        match format_name(&parsed, &config.naming) {
            Ok(formatted) if !reviewable => {
                renames += 1;
                println!(
                    "{} {} {}",
                    file.filename,
                    "->".dimmed(),
                    formatted.file_name.green()
                );
                if let Some(dir) = &formatted.directory {
                    println!("   {} {}", "in".dimmed(), dir.display().to_string().dimmed());
                }
            }
            Ok(formatted) => {
                needs_review += 1;
                println!(
                    "{} {} {} {}",
                    file.filename,
                    "->".dimmed(),
                    formatted.file_name.yellow(),
                    format!("(needs review, confidence {:.2})", parsed.confidence).yellow()
                );
            }
            Err(e) => {
                needs_review += 1;
                println!(
                    "{} {} {}",
                    file.filename,
                    "->".dimmed(),
                    format!("unresolved ({e})").red()
                );
            }
        }
    }

    println!();
    println!(
        "{} files scanned, {} renames ready, {} need review",
        scan.files.len(),
        renames,
        needs_review
    );
    Ok(())
}

/// Re-anchor a parse on the best metadata candidate and let the resolver
/// decide between the raw parse and the refined one.
async fn refine_with_metadata(
    client: &TvMazeClient,
    parsed: ParsedName,
    config: &Config,
) -> Result<ParsedName> {
    let Some(show) = parsed.show_name.clone() else {
        return Ok(parsed);
    };

    let found = client.search(&show, parsed.media_type).await?;
    let best = found.into_iter().max_by(|a, b| {
        a.similarity_score
            .partial_cmp(&b.similarity_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let Some(best) = best else {
        return Ok(parsed);
    };

    let mut refined = parsed.clone();
    refined.show_name = Some(best.title.clone());

    if let Some(season) = parsed.season {
        if !parsed.episode_numbers.is_empty() {
            match client.season_episodes(&best.source_id, season).await {
                Ok(records) if !records.is_empty() => {
                    if parsed.episode_titles.is_empty() {
                        // Fill titles directly by episode number.
                        let titles: Vec<String> = parsed
                            .episode_numbers
                            .iter()
                            .filter_map(|n| {
                                records.iter().find(|r| r.number == *n).map(|r| r.title.clone())
                            })
                            .collect();
                        if titles.len() == parsed.episode_numbers.len() {
                            refined.episode_titles = titles;
                        }
                    } else {
                        // Replace parsed segment titles with their canonical
                        // spelling where a confident match exists.
                        let candidates: Vec<MatchCandidate> = records
                            .iter()
                            .map(|r| MatchCandidate {
                                source_id: r.number.to_string(),
                                title: r.title.clone(),
                                year: None,
                                similarity_score: 0.0,
                                media_type: parsed.media_type,
                            })
                            .collect();
                        let assignment = match_segments(
                            &parsed.episode_titles,
                            &candidates,
                            config.matching.match_threshold,
                        );
                        refined.episode_titles = parsed
                            .episode_titles
                            .iter()
                            .enumerate()
                            .map(|(i, title)| match assignment[i] {
                                Some(j) => candidates[j].title.clone(),
                                None => title.clone(),
                            })
                            .collect();
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Episode listing failed for '{}': {}", best.title, e),
            }
        }
    }

    let fallback = ParsedName::unknown(&parsed.original_filename);
    let raw = Candidate::from_parse(parsed);
    let refined = Candidate {
        parsed: refined,
        title_similarity: best.similarity_score,
    };

    Ok(resolve(
        vec![raw, refined],
        config.matching.title_match_priority,
        config.matching.match_threshold,
    )
    .unwrap_or(fallback))
}

/// Fill missing anthology segment titles from the LLM, validating the count.
async fn fill_titles_from_llm(client: &OllamaClient, parsed: &mut ParsedName) {
    let expected = parsed.episode_numbers.len();
    match client
        .suggest_segments(&parsed.original_filename, expected)
        .await
    {
        Ok(titles) if titles.len() == expected => {
            tracing::debug!("LLM supplied {} segment titles", titles.len());
            parsed.episode_titles = titles;
        }
        Ok(titles) => {
            tracing::warn!(
                "LLM returned {} titles, expected {}; ignoring",
                titles.len(),
                expected
            );
        }
        Err(e) => tracing::warn!("LLM suggestion failed: {}", e),
    }
}
