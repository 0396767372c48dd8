#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Finding assignment folders and the submission files inside them.
//!
//! Assignment folders are ordered alphabetically and that order *is* the
//! assignment order: the first folder fills mark column 1, the second column
//! 2, and so on. Naming folders so that they sort in the intended order (for
//! example by a zero-padded date or number prefix) is up to the caller.

use std::path::{Path, PathBuf};

use glob::{Pattern, glob};
use tracing::{debug, info, warn};

use crate::{constants::STUDENT_ID_LEN, parsers::parser};

/// Failures while reading the submissions tree.
#[derive(thiserror::Error, Debug)]
pub enum DiscoveryError {
    /// The submissions root is missing or not a directory.
    #[error("Submissions root directory not found or is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// The directory exists but could not be listed.
    #[error("Error accessing submissions directory `{}`", path.display())]
    Io {
        /// directory being listed
        path:   PathBuf,
        /// underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The folder path could not be turned into a search pattern.
    #[error("Could not build a search pattern for `{}`", .0.display())]
    Pattern(PathBuf),
}

/// Returns the leftmost run of exactly eight digits in `file_name` that is
/// not part of a longer digit run.
///
/// `report_12345678_final.py` yields `12345678`; `123456789.py` yields
/// nothing.
pub fn extract_student_id(file_name: &str) -> Option<String> {
    parser::digit_runs(file_name)
        .ok()?
        .into_iter()
        .find(|run| run.len() == STUDENT_ID_LEN)
        .map(str::to_owned)
}

/// Lists the immediate subdirectories of `root`, sorted alphabetically.
pub fn list_assignment_folders(root: &Path) -> Result<Vec<String>, DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let entries = std::fs::read_dir(root).map_err(|source| DiscoveryError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiscoveryError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.path().is_dir() {
            folders.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    folders.sort();

    if folders.is_empty() {
        warn!("No subfolders found in submissions directory: {}", root.display());
    }
    Ok(folders)
}

/// Recursively finds files under `folder` whose name ends with `extension`.
///
/// A missing folder is logged and treated as holding no submissions.
pub fn list_files(folder: &Path, extension: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !folder.is_dir() {
        warn!("Assignment folder path is not a valid directory: {}", folder.display());
        return Ok(Vec::new());
    }

    info!("Searching for '{extension}' files in and under '{}'...", folder.display());

    let root = folder
        .to_str()
        .ok_or_else(|| DiscoveryError::Pattern(folder.to_path_buf()))?;
    let mut pattern = PathBuf::from(Pattern::escape(root));
    pattern.push("**");
    pattern.push("*");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| DiscoveryError::Pattern(folder.to_path_buf()))?
        .to_owned();

    let mut files: Vec<PathBuf> = glob(&pattern)
        .map_err(|_| DiscoveryError::Pattern(folder.to_path_buf()))?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().ends_with(extension))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        info!("  No '{extension}' files found in or under '{}'.", folder.display());
    } else {
        info!(
            "  Found {} '{extension}' file(s) in/under '{}'.",
            files.len(),
            folder.display()
        );
    }
    for file in &files {
        debug!("  Found: {}", file.display());
    }

    Ok(files)
}
