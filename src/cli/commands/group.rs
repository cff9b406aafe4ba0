//! Group command implementation.

use crate::core::detector::group_season_pack;
use crate::core::scanner;
use crate::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Show how a season pack would be partitioned into folders.
pub fn group(path: &Path) -> Result<()> {
    let scan = scanner::scan_directory(path)?;
    if scan.files.is_empty() {
        println!("No media files found.");
        return Ok(());
    }

    let paths: Vec<PathBuf> = scan.files.iter().map(|f| f.path.clone()).collect();
    let groups = group_season_pack(&paths);

    for (label, files) in &groups {
        println!("{}", label.bold().cyan());
        for file in files {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file.display().to_string());
            println!("  {name}");
        }
        println!();
    }

    println!("{} files in {} groups", paths.len(), groups.len());
    Ok(())
}
