//! File-backed persistence for the blog document.
//!
//! Every read goes to disk and every save replaces the whole file. The store
//! keeps no document cache between calls.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::StoreConfig;
use crate::errors::{StoreError, StoreResult};
use crate::model::Document;
use crate::seed::default_document;

/// Sole authority for reading and persisting the blog document.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    config: StoreConfig,
}

impl DocumentStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn data_file(&self) -> &Path {
        &self.config.data_file
    }

    pub fn images_dir(&self) -> &Path {
        &self.config.images_dir
    }

    pub fn exists(&self) -> bool {
        self.config.data_file.exists()
    }

    /// Loads the document, regenerating the default one when the file is
    /// corrupt. Only I/O failures reach the caller.
    pub fn load(&self) -> StoreResult<Document> {
        match self.try_load() {
            Err(StoreError::CorruptData { path, message }) => {
                warn!("{} is unreadable ({message}); regenerating default data", path.display());
                self.reset()
            }
            other => other,
        }
    }

    /// Loads the document, seeding and persisting defaults when no file
    /// exists yet. A file that does not parse as a blog document yields
    /// [`StoreError::CorruptData`].
    pub fn try_load(&self) -> StoreResult<Document> {
        let path = self.data_file();
        if !path.exists() {
            info!("no data file at {}; seeding sample content", path.display());
            return self.reset();
        }

        let raw = fs::read(path).map_err(|err| StoreError::io(path, err))?;
        let document = parse_document(path, &raw)?;
        debug!("loaded {} posts from {}", document.posts.len(), path.display());
        Ok(document)
    }

    /// Replaces the backing file with `document`.
    ///
    /// The document is written to a sibling temporary file first and then
    /// renamed over the target, so a failed save leaves the previous file in
    /// place.
    pub fn save(&self, document: &Document) -> StoreResult<()> {
        let path = self.data_file();
        let json = serde_json::to_string_pretty(document)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
        }

        let tmp_path = temp_path_for(path);
        let written = write_file(&tmp_path, json.as_bytes()).and_then(|()| fs::rename(&tmp_path, path));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(path, err));
        }

        debug!("saved {} posts to {}", document.posts.len(), path.display());
        Ok(())
    }

    /// Runs one load, mutate, save cycle.
    ///
    /// Nothing is written when `mutate` fails, so the file keeps its prior
    /// contents. Returns the saved document alongside the closure's result.
    pub fn update<T, F>(&self, mutate: F) -> StoreResult<(Document, T)>
    where
        F: FnOnce(&mut Document) -> StoreResult<T>,
    {
        let mut document = self.load()?;
        let value = mutate(&mut document)?;
        self.save(&document)?;
        Ok((document, value))
    }

    /// Overwrites the store with the default document and returns it.
    pub fn reset(&self) -> StoreResult<Document> {
        let document = default_document();
        self.save(&document)?;
        Ok(document)
    }
}

/// Encoding errors count as corrupt data, same as bad syntax or shape.
fn parse_document(path: &Path, raw: &[u8]) -> StoreResult<Document> {
    let corrupt = |message: String| StoreError::CorruptData {
        path: path.to_path_buf(),
        message,
    };
    let document: Document = serde_json::from_slice(raw).map_err(|err| corrupt(err.to_string()))?;
    document.check_integrity().map_err(corrupt)?;
    Ok(document)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
