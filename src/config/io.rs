//! Reading and writing manifest files

use std::path::Path;

use super::merge::merge;
use super::{DependencySet, LOCK_FILE, MANIFEST_FILE};
use crate::error::{CartageError, Result};

/// Read a file, returning `None` when it does not exist
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CartageError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Load the manifest in `dir`, pinned to its lock manifest when present.
///
/// Fails with [`CartageError::ManifestNotFound`] if `dir` has no manifest.
pub fn load(dir: &Path) -> Result<DependencySet> {
    load_if_present(dir)?.ok_or_else(|| CartageError::ManifestNotFound {
        path: dir.join(MANIFEST_FILE).display().to_string(),
    })
}

/// Like [`load`], but a missing manifest yields `None`
pub fn load_if_present(dir: &Path) -> Result<Option<DependencySet>> {
    let Some(manifest) = read_optional(&dir.join(MANIFEST_FILE))? else {
        return Ok(None);
    };

    let requested = DependencySet::parse(&manifest)?;

    let locked = match read_optional(&dir.join(LOCK_FILE))? {
        Some(lock) => DependencySet::parse(&lock)?,
        None => DependencySet::default(),
    };

    Ok(Some(merge(&requested, &locked)))
}

/// Write `set` as the lock manifest in `dir`, replacing any previous one
pub fn save_lock(dir: &Path, set: &DependencySet) -> Result<()> {
    let path = dir.join(LOCK_FILE);

    std::fs::write(&path, set.serialize()).map_err(|e| CartageError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::info!(path = %path.display(), dependencies = set.len(), "wrote lock manifest");
    Ok(())
}
