//! Directory scanner.
//!
//! Recursively finds media files to rename, skipping samples and extras
//! directories, and derives directory-context hints (`Season 02/` folders,
//! artist/show parent directories) the parser uses as corroboration.

use crate::models::media::PathHint;
use crate::utils::text::clean_name;
use crate::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "mov", "wmv", "m4v", "ts", "m2ts", "flv", "webm", "mpg", "mpeg", "vob",
    "ogv", "ogm", "divx", "3gp", "mts", "rm", "rmvb", "asf", "f4v",
];

/// Supported audio file extensions.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "m4a", "aac", "ogg", "opus", "wav", "wma"];

/// One media file found by the scanner.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Absolute or scan-relative path.
    pub path: PathBuf,
    /// File name component.
    pub filename: String,
    /// Directory the file lives in.
    pub parent_dir: PathBuf,
}

/// Result of scanning a directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Media files found, sorted by path. Samples and extras excluded.
    pub files: Vec<MediaFile>,
    /// Total files visited.
    pub total_files_scanned: usize,
    /// Total directories visited.
    pub total_dirs_scanned: usize,
}

fn is_media_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    VIDEO_EXTENSIONS.contains(&ext_lower.as_str()) || AUDIO_EXTENSIONS.contains(&ext_lower.as_str())
}

/// Whether a path sits inside an extras-style directory (featurettes,
/// deleted scenes, samples). Those files belong to the release, not the
/// episode listing, and are skipped.
fn is_in_extras_directory(path: &Path) -> bool {
    let extras_names = [
        "extras",
        "extra",
        "featurettes",
        "featurette",
        "behind the scenes",
        "deleted scenes",
        "bonus",
        "bonuses",
        "special features",
        "sample",
        "samples",
    ];

    for component in path.components() {
        if let std::path::Component::Normal(name) = component {
            let name_str = name.to_string_lossy().to_lowercase();
            if extras_names.iter().any(|&n| name_str == n) {
                return true;
            }
            if name_str.contains(".extras") || name_str.contains("-extras") {
                return true;
            }
        }
    }
    false
}

/// Whether a filename marks a sample clip.
fn is_sample_filename(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    lower.contains("sample") && !lower.contains("sampler")
}

/// Recursively scan a directory for media files.
///
/// Errors only on a missing or non-directory path; unreadable entries are
/// skipped with a warning.
pub fn scan_directory(path: &Path) -> Result<ScanResult> {
    if !path.exists() {
        return Err(Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.display().to_string()));
    }

    let mut result = ScanResult::default();

    for entry in WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let entry_path = entry.path();

        if entry.file_type().is_dir() {
            result.total_dirs_scanned += 1;
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }
        result.total_files_scanned += 1;

        if is_in_extras_directory(entry_path) {
            tracing::debug!("Skipping extras file: {}", entry_path.display());
            continue;
        }

        let Some(ext) = entry_path.extension() else {
            continue;
        };
        if !is_media_extension(&ext.to_string_lossy()) {
            continue;
        }

        let filename = entry_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if is_sample_filename(&filename) {
            tracing::debug!("Skipping sample file: {}", entry_path.display());
            continue;
        }

        let parent_dir = entry_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        result.files.push(MediaFile {
            path: entry_path.to_path_buf(),
            filename,
            parent_dir,
        });
    }

    result.files.sort_by(|a, b| a.path.cmp(&b.path));

    tracing::info!(
        "Scanned {} files in {} directories: {} media files",
        result.total_files_scanned,
        result.total_dirs_scanned,
        result.files.len()
    );

    Ok(result)
}

/// Derive a parsing hint from a file's directory context.
///
/// A `Season 02` or `Specials` parent supplies the season (with the show
/// taken from the grandparent); any other parent directory name is offered
/// as the show or artist name.
pub fn path_hint(path: &Path) -> PathHint {
    let mut hint = PathHint::default();

    let Some(parent) = path.parent() else {
        return hint;
    };
    let parent_name = parent
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if parent_name.is_empty() {
        return hint;
    }

    let season_re = Regex::new(r"(?i)^season[\s._-]*(\d{1,2})$");
    let season = match &season_re {
        Ok(re) => re
            .captures(&parent_name)
            .and_then(|caps| caps[1].parse::<u16>().ok()),
        Err(_) => None,
    };

    if let Some(season) = season {
        hint.season = Some(season);
        hint.show_name = parent
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| clean_name(&n.to_string_lossy()))
            .filter(|s| !s.is_empty());
    } else if parent_name.eq_ignore_ascii_case("specials") {
        hint.season = Some(0);
        hint.show_name = parent
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| clean_name(&n.to_string_lossy()))
            .filter(|s| !s.is_empty());
    } else {
        let cleaned = clean_name(&parent_name);
        if !cleaned.is_empty() {
            hint.show_name = Some(cleaned);
        }
    }

    hint
}
