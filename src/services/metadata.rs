//! Metadata provider abstraction.
//!
//! A provider turns a parsed title into ranked [`MatchCandidate`]s and
//! supplies episode records for title verification. Providers are expected
//! to be side-effect free beyond network access; all ranking happens in the
//! resolver.

use crate::models::media::{MatchCandidate, MediaType};
use crate::Result;

/// One episode as known to a metadata source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRecord {
    pub season: u16,
    pub number: u16,
    pub title: String,
    pub air_date: Option<String>,
}

/// A remote source of show/movie metadata.
pub trait MetadataProvider {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Search for titles matching a query. Results come back in provider
    /// order with `similarity_score` filled against the query.
    async fn search(&self, query: &str, media_type: MediaType) -> Result<Vec<MatchCandidate>>;

    /// Fetch a single episode by season and number.
    async fn episode(
        &self,
        series_id: &str,
        season: u16,
        number: u16,
    ) -> Result<Option<EpisodeRecord>>;

    /// Fetch every episode of one season, in episode order.
    async fn season_episodes(&self, series_id: &str, season: u16) -> Result<Vec<EpisodeRecord>>;
}
