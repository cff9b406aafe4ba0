//! Directory suggestion generator.
//!
//! Suggests the Plex-style library directory a renamed file belongs in.
//! Suggestions are relative paths; callers join them onto their library
//! root. A parse too sparse for a meaningful directory yields `None`.

use crate::models::config::NamingConfig;
use crate::models::media::{MediaType, ParsedName};
use crate::utils::text::sanitize_component;
use std::path::PathBuf;

/// Suggest the library-relative directory for a parse, if one can be
/// derived.
pub fn suggest_directory(parsed: &ParsedName, naming: &NamingConfig) -> Option<PathBuf> {
    match parsed.media_type {
        MediaType::TvShow | MediaType::Anime => {
            let show = sanitize_component(parsed.show_name.as_deref()?, naming.colon_style);
            let season = parsed.season.unwrap_or(1);
            Some(PathBuf::from(show).join(season_folder(season)))
        }
        MediaType::Special => {
            let show = sanitize_component(parsed.show_name.as_deref()?, naming.colon_style);
            Some(PathBuf::from(show).join("Specials"))
        }
        MediaType::Movie => {
            let title = sanitize_component(parsed.movie_name.as_deref()?, naming.colon_style);
            Some(PathBuf::from(match parsed.year {
                Some(year) => format!("{title} ({year})"),
                None => title,
            }))
        }
        MediaType::Music => {
            let artist = sanitize_component(parsed.artist.as_deref()?, naming.colon_style);
            let mut dir = PathBuf::from(artist);
            if let Some(album) = parsed.extra.get("album") {
                let album = sanitize_component(album, naming.colon_style);
                dir.push(match parsed.year {
                    Some(year) => format!("{album} ({year})"),
                    None => album,
                });
            }
            Some(dir)
        }
        MediaType::Unknown => None,
    }
}

/// Season folder name, `Specials` for season zero.
pub fn season_folder(season: u16) -> String {
    if season == 0 {
        "Specials".to_string()
    } else {
        format!("Season {season:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_tv_show_directory() {
        let parsed = ParsedName {
            media_type: MediaType::TvShow,
            show_name: Some("Show Name".to_string()),
            season: Some(2),
            ..Default::default()
        };
        assert_eq!(
            suggest_directory(&parsed, &NamingConfig::default()).as_deref(),
            Some(Path::new("Show Name/Season 02"))
        );
    }

    #[test]
    fn test_special_directory() {
        let parsed = ParsedName {
            media_type: MediaType::Special,
            show_name: Some("Show".to_string()),
            ..Default::default()
        };
        assert_eq!(
            suggest_directory(&parsed, &NamingConfig::default()).as_deref(),
            Some(Path::new("Show/Specials"))
        );
    }

    #[test]
    fn test_movie_directory() {
        let parsed = ParsedName {
            media_type: MediaType::Movie,
            movie_name: Some("The Matrix".to_string()),
            year: Some(1999),
            ..Default::default()
        };
        assert_eq!(
            suggest_directory(&parsed, &NamingConfig::default()).as_deref(),
            Some(Path::new("The Matrix (1999)"))
        );
    }

    #[test]
    fn test_music_directory_without_album() {
        let parsed = ParsedName {
            media_type: MediaType::Music,
            artist: Some("Artist".to_string()),
            ..Default::default()
        };
        assert_eq!(
            suggest_directory(&parsed, &NamingConfig::default()).as_deref(),
            Some(Path::new("Artist"))
        );
    }

    #[test]
    fn test_unknown_has_no_directory() {
        let parsed = ParsedName::unknown("x.bin");
        assert!(suggest_directory(&parsed, &NamingConfig::default()).is_none());
    }

    #[test]
    fn test_season_folder_names() {
        assert_eq!(season_folder(0), "Specials");
        assert_eq!(season_folder(3), "Season 03");
        assert_eq!(season_folder(12), "Season 12");
    }
}
