//! Parse command implementation.

use crate::core::parser::NameParser;
use crate::core::patterns::PatternRegistry;
use crate::core::scanner;
use crate::models::config::Config;
use crate::models::media::ParsedName;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Parse filenames and print the structured interpretation.
pub fn parse_names(names: &[String], json: bool, config: &Config) -> Result<()> {
    let registry = PatternRegistry::with_default_rules();
    let parser = NameParser::with_config(
        &registry,
        config.scoring.clone(),
        config.detector.clone(),
    );

    let mut results: Vec<ParsedName> = Vec::new();
    for name in names {
        let path = Path::new(name);
        // An existing path contributes directory context; a bare name is
        // parsed as-is.
        let hint = path.exists().then(|| scanner::path_hint(path));
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| name.clone());

        results.push(parser.parse(&filename, hint.as_ref()));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for parsed in &results {
        print_summary(parsed, config.scoring.acceptance_threshold);
    }
    Ok(())
}

fn print_summary(parsed: &ParsedName, acceptance_threshold: f32) {
    println!("{}", parsed.original_filename.bold());
    println!("  type:       {}", parsed.media_type);
    println!("  name:       {}", parsed.display_name().unwrap_or("-"));
    if let Some(season) = parsed.season {
        println!("  season:     {season}");
    }
    if !parsed.episode_numbers.is_empty() {
        let eps: Vec<String> = parsed.episode_numbers.iter().map(u16::to_string).collect();
        println!("  episodes:   {}", eps.join(", "));
    }
    if !parsed.episode_titles.is_empty() {
        println!("  titles:     {}", parsed.episode_titles.join(" / "));
    }
    if let Some(year) = parsed.year {
        println!("  year:       {year}");
    }
    for (key, value) in &parsed.extra {
        println!("  {key}: {value}");
    }

    let confidence = format!("{:.2}", parsed.confidence);
    if parsed.confidence < acceptance_threshold {
        println!("  confidence: {} {}", confidence.yellow(), "(needs review)".yellow());
    } else {
        println!("  confidence: {}", confidence.green());
    }
    println!();
}
