//! Version control detection
//!
//! Each supported system is searched for independently, walking from the
//! target directory towards the filesystem root and counting the steps taken
//! until its marker directory appears. The system found closest wins; a tie
//! between two systems, or no system at all, is an error.

use std::path::Path;

use super::VcsKind;
use crate::error::{CartageError, Result};

/// Depth used for a marker that was never found
const NOT_FOUND: usize = usize::MAX;

/// Detect which version control system owns `path`
pub fn detect(path: &Path) -> Result<VcsKind> {
    let absolute = std::path::absolute(path)?;

    let depths: Vec<(VcsKind, usize)> = VcsKind::ALL
        .iter()
        .map(|&kind| (kind, marker_depth(&absolute, kind.marker())))
        .collect();

    let closest = depths.iter().map(|&(_, depth)| depth).min().unwrap_or(NOT_FOUND);
    let mut winners = depths.iter().filter(|&&(_, depth)| depth == closest);

    match (winners.next(), winners.next()) {
        (Some(&(kind, depth)), None) if depth != NOT_FOUND => {
            tracing::debug!(path = %path.display(), %kind, depth, "detected repository");
            Ok(kind)
        }
        _ => Err(CartageError::UnknownRepositoryType {
            path: path.display().to_string(),
        }),
    }
}

/// Number of parent steps from `start` to the first directory containing
/// `marker`. The filesystem root itself is never inspected.
fn marker_depth(start: &Path, marker: &str) -> usize {
    let mut depth = 0;
    let mut current = start;

    while let Some(parent) = current.parent() {
        if current.join(marker).exists() {
            return depth;
        }

        current = parent;
        depth += 1;
    }

    NOT_FOUND
}
