//! Confidence-based conflict resolution.
//!
//! When several interpretations of one filename compete (pattern parse,
//! metadata-driven reinterpretation, LLM suggestion), the resolver blends
//! title similarity with pattern confidence and picks the best candidate.
//! Sub-threshold winners are returned with a capped confidence rather than
//! forced to unknown: callers decide whether such results require manual
//! confirmation before applying.

use crate::models::media::{MediaType, ParsedName};

/// One competing interpretation of a filename.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The structured parse.
    pub parsed: ParsedName,
    /// Similarity of the parse's title against external metadata, 0.0 when
    /// no metadata lookup happened for this candidate.
    pub title_similarity: f32,
}

impl Candidate {
    /// Candidate backed only by pattern matching.
    pub fn from_parse(parsed: ParsedName) -> Self {
        Self {
            parsed,
            title_similarity: 0.0,
        }
    }
}

/// Pick the best interpretation among competing candidates.
///
/// The blended score is
/// `title_match_priority * title_similarity + (1 - title_match_priority) * pattern_confidence`.
/// Ties break toward higher pattern confidence, then toward a known media
/// type. A winner below `match_threshold` keeps its identity but has its
/// confidence capped at the winning score.
///
/// Returns `None` only for an empty candidate list.
pub fn resolve(
    candidates: Vec<Candidate>,
    title_match_priority: f32,
    match_threshold: f32,
) -> Option<ParsedName> {
    if candidates.len() == 1 {
        return candidates.into_iter().next().map(|c| c.parsed);
    }

    let mut best: Option<(f32, Candidate)> = None;
    for candidate in candidates {
        let score = blended_score(&candidate, title_match_priority);
        let replace = match &best {
            None => true,
            Some((best_score, best_candidate)) => {
                if score > *best_score {
                    true
                } else if score < *best_score {
                    false
                } else {
                    beats_on_tie(&candidate, best_candidate)
                }
            }
        };
        if replace {
            best = Some((score, candidate));
        }
    }

    let (winning_score, winner) = best?;
    let mut parsed = winner.parsed;

    if winning_score < match_threshold {
        tracing::debug!(
            "Winning score {:.2} below threshold {:.2} for '{}', capping confidence",
            winning_score,
            match_threshold,
            parsed.original_filename
        );
        parsed.confidence = parsed.confidence.min(winning_score);
    }

    Some(parsed)
}

fn blended_score(candidate: &Candidate, title_match_priority: f32) -> f32 {
    title_match_priority * candidate.title_similarity
        + (1.0 - title_match_priority) * candidate.parsed.confidence
}

fn beats_on_tie(challenger: &Candidate, incumbent: &Candidate) -> bool {
    if challenger.parsed.confidence != incumbent.parsed.confidence {
        return challenger.parsed.confidence > incumbent.parsed.confidence;
    }
    challenger.parsed.media_type != MediaType::Unknown
        && incumbent.parsed.media_type == MediaType::Unknown
}
