//! Reconciling the requested manifest with the lock manifest
//!
//! The requested manifest decides which dependencies exist and in what order.
//! The lock manifest only pins versions of paths that are still requested;
//! locked entries that are no longer requested are dropped.

use super::DependencySet;

/// Pin `requested` to the versions recorded in `locked`
pub fn merge(requested: &DependencySet, locked: &DependencySet) -> DependencySet {
    let mut merged = requested.clone();

    for dep in locked {
        merged.replace_version(dep);
    }

    merged
}
