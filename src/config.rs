#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::constants::{
    DEFAULT_FILE_EXTENSION, DEFAULT_NAMELIST_FILE, DEFAULT_SUBMISSIONS_DIR, EXTENSION_ENV,
    NAMELIST_ENV, SUBMISSIONS_DIR_ENV,
};

/// Prefixes `ext` with a dot unless it already has one, so `py` and `.py`
/// select the same files. An empty extension stays empty and matches every
/// file.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.is_empty() || ext.starts_with('.') {
        ext.to_owned()
    } else {
        format!(".{ext}")
    }
}

/// Default locations and filters used by the `process` action.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Serialize, Deserialize)]
pub struct Config {
    /// Path to the namelist file.
    #[builder(default = PathBuf::from(DEFAULT_NAMELIST_FILE), setter(into))]
    namelist:        PathBuf,
    /// Root directory containing the assignment folders.
    #[builder(default = PathBuf::from(DEFAULT_SUBMISSIONS_DIR), setter(into))]
    submissions_dir: PathBuf,
    /// Suffix a file name must end with to count as a submission.
    #[builder(
        default = DEFAULT_FILE_EXTENSION.to_owned(),
        setter(transform = |ext: &str| normalize_extension(ext))
    )]
    extension:       String,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Config {
    /// Reads overrides from the process environment (after `.env` has been
    /// loaded by the binary).
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup. Unset or
    /// blank variables fall back to the defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(namelist) = read(NAMELIST_ENV) {
            config.namelist = PathBuf::from(namelist);
        }
        if let Some(dir) = read(SUBMISSIONS_DIR_ENV) {
            config.submissions_dir = PathBuf::from(dir);
        }
        if let Some(ext) = read(EXTENSION_ENV) {
            config.extension = normalize_extension(&ext);
        }
        config
    }

    /// Path to the namelist file.
    pub fn namelist(&self) -> &Path {
        self.namelist.as_path()
    }

    /// Root directory containing the assignment folders.
    pub fn submissions_dir(&self) -> &Path {
        self.submissions_dir.as_path()
    }

    /// Submission file extension, always dot-prefixed unless empty.
    pub fn extension(&self) -> &str {
        &self.extension
    }
}
