//! TVMaze API client.
//!
//! TVMaze is keyless, which makes it the default metadata source. Only the
//! search and episode endpoints are used.

use crate::core::matcher::title_similarity;
use crate::models::media::{MatchCandidate, MediaType};
use crate::services::metadata::{EpisodeRecord, MetadataProvider};
use crate::{Error, Result};
use serde::Deserialize;

const TVMAZE_BASE_URL: &str = "https://api.tvmaze.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// TVMaze API client.
pub struct TvMazeClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    show: Show,
}

#[derive(Debug, Deserialize)]
struct Show {
    id: u64,
    name: String,
    premiered: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Episode {
    season: u16,
    number: Option<u16>,
    name: String,
    airdate: Option<String>,
}

impl TvMazeClient {
    /// Create a client against the public TVMaze API.
    pub fn new() -> Self {
        Self::with_base_url(TVMAZE_BASE_URL)
    }

    /// Create a client against a custom base URL, mainly for tests.
    pub fn with_base_url(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn candidate_from_show(show: Show, query: &str) -> MatchCandidate {
        let year = show
            .premiered
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse::<u16>().ok());

        MatchCandidate {
            source_id: show.id.to_string(),
            similarity_score: title_similarity(query, &show.name),
            title: show.name,
            year,
            media_type: MediaType::TvShow,
        }
    }

    fn record_from_episode(episode: Episode) -> Option<EpisodeRecord> {
        Some(EpisodeRecord {
            season: episode.season,
            number: episode.number?,
            title: episode.name,
            air_date: episode.airdate,
        })
    }
}

impl Default for TvMazeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataProvider for TvMazeClient {
    fn name(&self) -> &'static str {
        "tvmaze"
    }

    async fn search(&self, query: &str, media_type: MediaType) -> Result<Vec<MatchCandidate>> {
        if media_type != MediaType::TvShow && media_type != MediaType::Anime {
            return Err(Error::MetadataSearch(format!(
                "tvmaze has no {media_type} data"
            )));
        }

        let url = format!(
            "{}/search/shows?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        tracing::debug!("TVMaze search: {}", url);

        let items: Vec<SearchItem> = self.client.get(&url).send().await?.json().await?;
        Ok(items
            .into_iter()
            .map(|item| Self::candidate_from_show(item.show, query))
            .collect())
    }

    async fn episode(
        &self,
        series_id: &str,
        season: u16,
        number: u16,
    ) -> Result<Option<EpisodeRecord>> {
        let url = format!(
            "{}/shows/{}/episodebynumber?season={}&number={}",
            self.base_url, series_id, season, number
        );

        let resp = self.client.get(&url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let episode: Episode = resp.json().await?;
        Ok(Self::record_from_episode(episode))
    }

    async fn season_episodes(&self, series_id: &str, season: u16) -> Result<Vec<EpisodeRecord>> {
        let url = format!("{}/shows/{}/episodes", self.base_url, series_id);

        let episodes: Vec<Episode> = self.client.get(&url).send().await?.json().await?;
        Ok(episodes
            .into_iter()
            .filter(|e| e.season == season)
            .filter_map(Self::record_from_episode)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_year_from_premiered() {
        let show = Show {
            id: 82,
            name: "Game of Thrones".to_string(),
            premiered: Some("2011-04-17".to_string()),
        };
        let candidate = TvMazeClient::candidate_from_show(show, "Game of Thrones");
        assert_eq!(candidate.source_id, "82");
        assert_eq!(candidate.year, Some(2011));
        assert!(candidate.similarity_score > 0.99);
    }

    #[test]
    fn test_candidate_without_premiere_date() {
        let show = Show {
            id: 1,
            name: "Unaired Pilot".to_string(),
            premiered: None,
        };
        let candidate = TvMazeClient::candidate_from_show(show, "Something Else");
        assert_eq!(candidate.year, None);
        assert!(candidate.similarity_score < 0.9);
    }

    #[test]
    fn test_numberless_episode_skipped() {
        // TVMaze uses null numbers for specials inside regular seasons
        let episode = Episode {
            season: 1,
            number: None,
            name: "Recap".to_string(),
            airdate: None,
        };
        assert!(TvMazeClient::record_from_episode(episode).is_none());
    }
}
