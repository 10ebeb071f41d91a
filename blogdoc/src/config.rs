//! Explicit configuration for the document store.
//!
//! Paths are resolved once, at construction time, and handed to
//! [`DocumentStore::new`](crate::store::DocumentStore::new). Nothing in the
//! library reads global state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_FILE: &str = "blog_data.json";
pub const DEFAULT_IMAGES_DIR: &str = "blog_images";

pub const DATA_FILE_ENV: &str = "BLOGDOC_DATA_FILE";
pub const IMAGES_DIR_ENV: &str = "BLOGDOC_IMAGES_DIR";

/// Where the blog document and its image attachments live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            images_dir: default_images_dir(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_images_dir() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGES_DIR)
}

impl StoreConfig {
    /// Keeps both files side by side under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data_file: dir.join(DEFAULT_DATA_FILE),
            images_dir: dir.join(DEFAULT_IMAGES_DIR),
        }
    }

    /// Applies `BLOGDOC_DATA_FILE` / `BLOGDOC_IMAGES_DIR` when set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            self.data_file = PathBuf::from(value);
        }
        if let Some(value) = lookup(IMAGES_DIR_ENV).filter(|v| !v.is_empty()) {
            self.images_dir = PathBuf::from(value);
        }
        self
    }

    /// Resolves relative paths against `base` (usually the config file's directory).
    pub fn relative_to(mut self, base: &Path) -> Self {
        if self.data_file.is_relative() {
            self.data_file = base.join(&self.data_file);
        }
        if self.images_dir.is_relative() {
            self.images_dir = base.join(&self.images_dir);
        }
        self
    }
}
