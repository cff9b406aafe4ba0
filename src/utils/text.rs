//! Text normalization helpers shared by the parser, matcher and formatter.

use crate::models::config::ColonStyle;
use regex::Regex;

/// Replace dot/underscore word separators with spaces and collapse runs of
/// whitespace. Used on show/movie names extracted from scene-style filenames.
pub fn clean_name(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| match c {
            '.' | '_' => ' ',
            _ => c,
        })
        .collect();
    collapse_whitespace(&replaced)
}

/// Collapse repeated whitespace and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_space = true;
    for c in s.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Lowercase, strip punctuation and collapse whitespace for similarity
/// comparisons. Apostrophes are dropped so "Daniel's" and "Daniels" compare
/// equal.
pub fn normalize_title(s: &str) -> String {
    let stripped: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else if c == '\'' {
                '\0' // marker, removed below
            } else {
                ' '
            }
        })
        .filter(|&c| c != '\0')
        .collect();
    collapse_whitespace(&stripped)
}

/// Sanitize one filename component for the filesystem.
///
/// Reserved characters are stripped, colons rewritten per configuration,
/// apostrophes preserved, whitespace collapsed. Lossy by design; feeding a
/// sanitized name back through the parser recovers an equivalent structure
/// but not necessarily the original bytes.
pub fn sanitize_component(s: &str, colon_style: ColonStyle) -> String {
    let mut replaced = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            ':' => match colon_style {
                ColonStyle::DashSpace => replaced.push_str(" - "),
                ColonStyle::Underscore => replaced.push('_'),
            },
            '<' | '>' | '"' | '/' | '\\' | '|' | '?' | '*' => {}
            _ => replaced.push(c),
        }
    }
    collapse_whitespace(&replaced)
        .trim_matches('.')
        .trim()
        .to_string()
}

/// Quality/source/codec tokens that belong to the release, not the title.
const QUALITY_PATTERNS: &[&str] = &[
    r"\b\d{3,4}p\b",
    r"\b(?:HDTV|WEB-?DL|WEBRip|BluRay|BRRip|DVDRip)\b",
    r"\b(?:x264|x265|H\.?264|H\.?265|HEVC|XviD)\b",
    r"\b(?:4K|2160p|UHD)\b",
    r"\b(?:AAC|AC3|DTS|TrueHD|FLAC)(?:[\s.]?\d\.\d)?\b",
    r"\b(?:10bit|8bit|HDR)\b",
    r"\b(?:PROPER|REPACK|INTERNAL)\b",
];

/// Strip quality tokens from a filename stem.
///
/// Returns the cleaned stem and the first quality token found, so the parser
/// can keep it as auxiliary information without it polluting titles.
pub fn strip_quality(stem: &str) -> (String, Option<String>) {
    let mut cleaned = stem.to_string();
    let mut quality: Option<String> = None;

    for pattern in QUALITY_PATTERNS {
        if let Ok(re) = Regex::new(&format!("(?i){pattern}")) {
            if let Some(m) = re.find(&cleaned) {
                if quality.is_none() {
                    quality = Some(m.as_str().to_string());
                }
                cleaned = re.replace_all(&cleaned, "").to_string();
            }
        }
    }

    // Drop the separator debris the removed tokens leave behind.
    let cleaned = cleaned
        .trim_end_matches(['.', '-', '_', ' ', '['])
        .to_string();
    (cleaned, quality)
}

/// Extract a disc/part identifier from a filename.
///
/// Detects patterns like cd1, disc2, part1, dvd2 and returns the identifier
/// in lowercase (e.g. "cd1").
pub fn extract_disc_identifier(filename: &str) -> Option<String> {
    let filename_lower = filename.to_lowercase();

    let patterns = [
        r"[_\s\-\.](cd|disc|disk|dvd|part)(\d+)",
        r"\b(cd|disc|disk|dvd|part)(\d+)\.[a-z0-9]+$",
    ];

    for pattern in &patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(caps) = re.captures(&filename_lower) {
                if let (Some(prefix), Some(num)) = (caps.get(1), caps.get(2)) {
                    return Some(format!("{}{}", prefix.as_str(), num.as_str()));
                }
            }
        }
    }

    None
}
