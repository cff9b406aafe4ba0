//! Episode segment detection.
//!
//! Identifies multi-episode markers (`E01E02`, `E01-E03`, `01x02-03`,
//! textual connectors), special/OVA/movie markers, and season-pack
//! groupings from filenames. All functions are pure and never fail on
//! weird input; anomalies degrade to bounded results.

use crate::models::config::DEFAULT_MAX_EPISODE_RANGE;
use crate::models::media::{SpecialInfo, SpecialType};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Detect all episode numbers referenced by a filename.
///
/// Returns one entry for a single episode, several for multi-episode files,
/// and an empty list when no episode marker is present. The result is
/// de-duplicated and strictly increasing.
pub fn detect_multi_episode(filename: &str) -> Vec<u16> {
    detect_multi_episode_bounded(filename, DEFAULT_MAX_EPISODE_RANGE)
}

/// Like [`detect_multi_episode`] with an explicit range bound.
///
/// Ranges implying more than `max_range` episodes (e.g. `S01E01-E9999`) are
/// treated as a single anomalous number rather than expanded, and
/// non-monotonic sequences collapse to their first episode.
pub fn detect_multi_episode_bounded(filename: &str, max_range: u16) -> Vec<u16> {
    // SxxE episode cluster: adjacent E tokens, connector-separated E tokens,
    // or a tight E-less range end ("S01E01-03"). A connector surrounded by
    // whitespace requires the E prefix, otherwise a digit-leading episode
    // title ("... - 7 Days") would be read as a range end.
    if let Ok(cluster_re) = Regex::new(
        r"(?i)s\d{1,2}\s*\.?\s*e\d{1,4}(?:\s*e\d{1,4}|\s*(?:-|to|&|\+|,)\s*e\d{1,4}|-\d{1,3})*",
    ) {
        if let Some(m) = cluster_re.find(filename) {
            let episodes = parse_episode_cluster(m.as_str(), max_range);
            if !episodes.is_empty() {
                return finalize(episodes);
            }
        }
    }

    // 1x05 or 01x02-03 format
    if let Ok(x_re) = Regex::new(r"(?i)\b\d{1,2}x(\d{1,4})(?:\s*-\s*(\d{1,4}))?") {
        if let Some(caps) = x_re.captures(filename) {
            let start: u16 = match caps[1].parse() {
                Ok(n) => n,
                Err(_) => return Vec::new(),
            };
            if let Some(end) = caps.get(2).and_then(|m| m.as_str().parse::<u16>().ok()) {
                return finalize(expand_range(start, end, max_range));
            }
            return vec![start];
        }
    }

    // Verbose "Episode 5"
    if let Ok(verbose_re) = Regex::new(r"(?i)episode\s*(\d{1,4})") {
        if let Some(caps) = verbose_re.captures(filename) {
            if let Ok(n) = caps[1].parse::<u16>() {
                return vec![n];
            }
        }
    }

    Vec::new()
}

/// Tokenize an `SxxEyy...` cluster into episode numbers, expanding ranges.
fn parse_episode_cluster(cluster: &str, max_range: u16) -> Vec<u16> {
    // Skip the leading season marker so its digits are not read as episodes.
    let body = match Regex::new(r"(?i)^s\d{1,2}\s*\.?\s*") {
        Ok(re) => re.replace(cluster, "").to_string(),
        Err(_) => cluster.to_string(),
    };

    let token_re = match Regex::new(r"(?i)e?(\d{1,4})|(-|to|&|\+|,)") {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    let mut episodes: Vec<u16> = Vec::new();
    let mut range_pending = false;

    for caps in token_re.captures_iter(&body) {
        if let Some(num) = caps.get(1) {
            let n: u16 = match num.as_str().parse() {
                Ok(n) => n,
                Err(_) => continue,
            };
            if range_pending {
                range_pending = false;
                if let Some(&start) = episodes.last() {
                    episodes.pop();
                    episodes.extend(expand_range(start, n, max_range));
                    continue;
                }
            }
            episodes.push(n);
        } else if let Some(sep) = caps.get(2) {
            // Only hyphen and "to" denote ranges; & + , list single episodes.
            let sep = sep.as_str().to_lowercase();
            range_pending = sep == "-" || sep == "to";
        }
    }

    episodes
}

/// Expand an inclusive episode range with a sanity bound.
///
/// A reversed range or one wider than `max_range` is anomalous input; it
/// yields just the starting number instead of erroring or exploding.
fn expand_range(start: u16, end: u16, max_range: u16) -> Vec<u16> {
    if end < start || (end - start) as u32 + 1 > max_range as u32 {
        tracing::warn!(
            "Anomalous episode range {}-{}, keeping {} only",
            start,
            end,
            start
        );
        return vec![start];
    }
    (start..=end).collect()
}

/// De-duplicate preserving order, then require a strictly increasing
/// sequence; violations collapse to the first episode.
fn finalize(mut episodes: Vec<u16>) -> Vec<u16> {
    let mut seen = std::collections::HashSet::new();
    episodes.retain(|e| seen.insert(*e));

    if episodes.windows(2).any(|w| w[1] <= w[0]) {
        tracing::warn!("Non-monotonic episode sequence {:?}, keeping first", episodes);
        return episodes.into_iter().take(1).collect();
    }
    episodes
}

/// Special-episode patterns, tried in order. Each pairs a regex (optional
/// ordinal in group 1) with the special type it denotes.
const SPECIAL_PATTERNS: &[(&str, SpecialType)] = &[
    (r"(?i)s00e(\d{1,4})", SpecialType::Special),
    (r"(?i)\bspecials?[\s._-]*(\d{0,4})", SpecialType::Special),
    (r"(?i)\bovas?[\s._-]*(\d{0,4})", SpecialType::Ova),
    (r"(?i)\b(?:movie|film)[\s._-]*(\d{0,4})", SpecialType::MovieSpecial),
];

/// Detect a special/OVA/movie marker in a filename.
///
/// Returns `None` when no marker is present; never errors.
pub fn detect_special(filename: &str) -> Option<SpecialInfo> {
    // A standalone ".1." style number can supply the ordinal when the
    // keyword itself carries none ("Show.Special.1.mp4").
    let standalone_number = Regex::new(r"\.(\d{1,4})\.")
        .ok()
        .and_then(|re| re.captures(filename))
        .and_then(|caps| caps[1].parse::<u16>().ok());

    for (pattern, special_type) in SPECIAL_PATTERNS {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(_) => continue,
        };
        if let Some(caps) = re.captures(filename) {
            let number = caps
                .get(1)
                .filter(|m| !m.as_str().is_empty())
                .and_then(|m| m.as_str().parse::<u16>().ok())
                .or(standalone_number);

            tracing::debug!(
                "Special marker in '{}': {:?} number {:?}",
                filename,
                special_type,
                number
            );
            return Some(SpecialInfo {
                special_type: *special_type,
                number,
            });
        }
    }

    None
}

/// Split a combined episode title into per-segment titles.
///
/// Anthology releases join segment titles with "&", "+", commas or "and".
/// A title with no separator comes back as a single segment. Callers should
/// only trust the split when the segment count lines up with the episode
/// count.
pub fn split_title_segments(title: &str) -> Vec<String> {
    let re = match Regex::new(r"\s+&\s+|\s*,\s+|\s+\+\s+|\s+and\s+") {
        Ok(re) => re,
        Err(_) => return vec![title.to_string()],
    };
    re.split(title)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Detect the season number a filename refers to, if any.
pub fn detect_season(filename: &str) -> Option<u16> {
    if let Ok(re) = Regex::new(r"(?i)\bs(\d{1,2})\s*\.?\s*e\d{1,4}") {
        if let Some(caps) = re.captures(filename) {
            return caps[1].parse().ok();
        }
    }
    if let Ok(re) = Regex::new(r"(?i)\b(\d{1,2})x\d{1,4}\b") {
        if let Some(caps) = re.captures(filename) {
            return caps[1].parse().ok();
        }
    }
    if let Ok(re) = Regex::new(r"(?i)\bseason[\s._-]*(\d{1,2})") {
        if let Some(caps) = re.captures(filename) {
            return caps[1].parse().ok();
        }
    }
    None
}

/// Partition season-pack files into `Season {N}` / `Specials` / `Unknown`
/// groups. Every input file lands in exactly one group; input order is
/// preserved within each group.
pub fn group_season_pack(files: &[PathBuf]) -> BTreeMap<String, Vec<PathBuf>> {
    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

    for file in files {
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let label = match detect_season(&filename) {
            Some(0) => "Specials".to_string(),
            Some(season) => format!("Season {season}"),
            None => {
                if detect_special(&filename).is_some() {
                    "Specials".to_string()
                } else {
                    "Unknown".to_string()
                }
            }
        };

        groups.entry(label).or_default().push(file.clone());
    }

    groups
}
