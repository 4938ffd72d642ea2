//! A single manifest entry
//!
//! A dependency names an import path and the version control reference it
//! should be pinned to. Bleeding-edge dependencies carry no version and track
//! whatever the remote currently has.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// One line of a Cartridge manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependency {
    /// Import path, e.g. `github.com/author/project`
    pub path: String,

    /// Branch, tag or revision; empty only for bleeding-edge entries
    pub version: String,

    /// Labels used to exclude entries from recursive installs (e.g. `test`)
    pub tags: Vec<String>,

    /// Track the latest remote state instead of a pinned reference
    pub bleeding_edge: bool,
}

impl Dependency {
    /// Create a pinned dependency with no tags
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            tags: Vec::new(),
            bleeding_edge: false,
        }
    }

    /// Create a bleeding-edge dependency (the `*` version)
    pub fn bleeding_edge(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: String::new(),
            tags: Vec::new(),
            bleeding_edge: true,
        }
    }

    #[must_use]
    #[allow(dead_code)] // used in tests
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Location of the working copy under a workspace root: `<root>/src/<path>`
    ///
    /// Root, prefix and `..` components of the path are dropped, so the
    /// result never leaves `<root>/src`.
    pub fn full_path(&self, workspace_root: &Path) -> PathBuf {
        let mut full = workspace_root.join("src");
        full.extend(Path::new(&self.path).components().filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        }));
        full
    }

    /// Whether the path stays inside the workspace when joined under `src`
    pub fn is_relative_import_path(&self) -> bool {
        let path = Path::new(&self.path);
        !self.path.starts_with(['/', '\\'])
            && path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    }

    /// Whether any of this dependency's tags appears in `tags`
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|tag| tags.contains(tag))
    }

    /// Whether this path and `other` claim overlapping workspace subtrees.
    ///
    /// `a/b` overlaps `a/b` and `a/b/c`, but not `a/bee`.
    pub fn overlaps(&self, other: &Dependency) -> bool {
        let mine = format!("{}/", self.path);
        let theirs = format!("{}/", other.path);

        mine.starts_with(&theirs) || theirs.starts_with(&mine)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bleeding_edge && self.version.is_empty() {
            write!(f, "{}\t*", self.path)
        } else {
            write!(f, "{}\t{}", self.path, self.version)
        }
    }
}
