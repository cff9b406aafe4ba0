//! LLM-assisted suggestion abstraction.

use crate::Result;

/// A source of best-effort suggestions for filenames pattern matching
/// cannot settle. Suggestions are advisory; callers must validate counts
/// and never trust them over structural evidence.
pub trait SegmentSuggester {
    /// Suggest per-segment episode titles for an anthology filename.
    ///
    /// `expected` is the number of episode segments the detector found;
    /// implementations should aim for exactly that many titles but may
    /// return fewer or more, which callers treat as a failed suggestion.
    async fn suggest_segments(&self, filename: &str, expected: usize) -> Result<Vec<String>>;
}
