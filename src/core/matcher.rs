//! Segment-to-episode title matching.
//!
//! Anthology files bundle several narratively distinct segments whose titles
//! must be mapped onto consecutive episode records from metadata. Matching
//! is a greedy assignment over pairwise Jaro-Winkler similarity: stable,
//! deterministic and close enough to optimal for the small N (typically <= 6
//! segments) involved.

use crate::models::media::MatchCandidate;
use crate::utils::text::normalize_title;

/// Case-insensitive, punctuation-normalized similarity between two titles,
/// in [0.0, 1.0].
pub fn title_similarity(a: &str, b: &str) -> f32 {
    strsim::jaro_winkler(&normalize_title(a), &normalize_title(b)) as f32
}

/// Assign segment titles to metadata candidates.
///
/// Returns one entry per segment: the index of the assigned candidate, or
/// `None` when no candidate reached `match_threshold`. Each candidate is
/// assigned at most once. The globally highest-similarity pair is taken
/// first, both sides removed, and the process repeats until either list is
/// exhausted.
pub fn match_segments(
    segment_titles: &[String],
    candidates: &[MatchCandidate],
    match_threshold: f32,
) -> Vec<Option<usize>> {
    let mut assignment: Vec<Option<usize>> = vec![None; segment_titles.len()];
    if segment_titles.is_empty() || candidates.is_empty() {
        return assignment;
    }

    // All pairs at or above the threshold, best first. Ties break toward
    // lower indices so the result is deterministic.
    let mut pairs: Vec<(f32, usize, usize)> = Vec::new();
    for (i, segment) in segment_titles.iter().enumerate() {
        for (j, candidate) in candidates.iter().enumerate() {
            let score = title_similarity(segment, &candidate.title);
            if score >= match_threshold {
                pairs.push((score, i, j));
            }
        }
    }
    pairs.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });

    let mut candidate_used = vec![false; candidates.len()];
    for (score, i, j) in pairs {
        if assignment[i].is_some() || candidate_used[j] {
            continue;
        }
        tracing::debug!(
            "Matched segment '{}' to '{}' (score {:.2})",
            segment_titles[i],
            candidates[j].title,
            score
        );
        assignment[i] = Some(j);
        candidate_used[j] = true;
    }

    assignment
}
