use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{debug, warn};

use crate::errors::{StoreError, StoreResult};
use crate::model::now;

/// Copies `source` into `images_dir` under a timestamp-prefixed name and
/// returns the stored path. The directory is created on demand.
pub fn store_image(images_dir: &Path, source: &Path) -> StoreResult<PathBuf> {
    store_image_at(images_dir, source, now())
}

/// Stores `source`, when given, and passes the stored path to `attach`.
/// The copy is removed again if `attach` fails.
pub fn with_stored_image<T, F>(images_dir: &Path, source: Option<&Path>, attach: F) -> StoreResult<T>
where
    F: FnOnce(Option<String>) -> StoreResult<T>,
{
    let stored = source.map(|source| store_image(images_dir, source)).transpose()?;
    let result = attach(stored.as_ref().map(|path| path.to_string_lossy().into_owned()));
    if result.is_err()
        && let Some(path) = &stored
    {
        discard_image(path);
    }
    result
}

fn discard_image(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("removed unused image {}", path.display()),
        Err(err) => warn!("could not remove unused image {}: {err}", path.display()),
    }
}

pub(crate) fn store_image_at(images_dir: &Path, source: &Path, at: NaiveDateTime) -> StoreResult<PathBuf> {
    if !source.is_file() {
        return Err(StoreError::io(
            source,
            std::io::Error::new(std::io::ErrorKind::NotFound, "image file does not exist"),
        ));
    }
    let file_name = source.file_name().ok_or_else(|| {
        StoreError::io(
            source,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "image path has no file name"),
        )
    })?;

    fs::create_dir_all(images_dir).map_err(|err| StoreError::io(images_dir, err))?;

    let mut stored_name = OsString::from(at.format("%Y%m%d_%H%M%S_").to_string());
    stored_name.push(file_name);
    let target = images_dir.join(stored_name);

    fs::copy(source, &target).map_err(|err| StoreError::io(&target, err))?;
    debug!("copied {} to {}", source.display(), target.display());
    Ok(target)
}
