//! Parsing and serialization of the manifest format
//!
//! One dependency per line, fields separated by whitespace:
//!
//! ```text
//! # comment
//! example.com/org/project   v1.2.0
//! example.com/org/tool      *          test,dev   # trailing comment
//! ```
//!
//! The second field is a version reference, or `*` for a bleeding-edge
//! dependency. The optional third field is a comma-separated tag list.

use std::fmt;

use crate::dependency::Dependency;
use crate::error::{CartageError, Result};

/// Token that marks a dependency as bleeding-edge
const BLEEDING_EDGE_VERSION: &str = "*";

/// Ordered dependencies, in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    pub dependencies: Vec<Dependency>,
}

impl DependencySet {
    pub fn new(dependencies: Vec<Dependency>) -> Self {
        Self { dependencies }
    }

    /// Parse manifest text.
    ///
    /// Fails on the first line with no version, with an absolute path or a
    /// `..` component, or whose path overlaps an earlier entry's path.
    pub fn parse(text: &str) -> Result<Self> {
        let mut set = Self::default();

        for line in text.lines() {
            let Some(dep) = parse_line(line)? else {
                continue;
            };

            if let Some(existing) = set.dependencies.iter().find(|d| d.overlaps(&dep)) {
                return Err(CartageError::DuplicateDependency {
                    original: existing.clone(),
                    duplicate: dep,
                });
            }

            set.dependencies.push(dep);
        }

        Ok(set)
    }

    /// Render as lock manifest text: one `path\tversion` line per entry.
    ///
    /// Tags are not written. A bleeding-edge entry with no resolved version
    /// is written as `path\t*`.
    pub fn serialize(&self) -> String {
        self.dependencies
            .iter()
            .map(|dep| format!("{dep}\n"))
            .collect()
    }

    /// Drop every dependency carrying one of `tags`
    #[must_use]
    pub fn excluding(&self, tags: &[String]) -> Self {
        Self::new(
            self.dependencies
                .iter()
                .filter(|dep| !dep.has_any_tag(tags))
                .cloned()
                .collect(),
        )
    }

    /// Overwrite the version of the entry whose path equals `locked.path`
    pub fn replace_version(&mut self, locked: &Dependency) {
        for dep in &mut self.dependencies {
            if dep.path == locked.path {
                dep.version.clone_from(&locked.version);
            }
        }
    }

    #[allow(dead_code)] // used in tests
    pub fn find(&self, path: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|dep| dep.path == path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dependency> {
        self.dependencies.iter()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl fmt::Display for DependencySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromIterator<Dependency> for DependencySet {
    fn from_iter<I: IntoIterator<Item = Dependency>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a Dependency;
    type IntoIter = std::slice::Iter<'a, Dependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.dependencies.iter()
    }
}

/// Parse one line; `None` for blank and comment-only lines
fn parse_line(line: &str) -> Result<Option<Dependency>> {
    let mut fields = line
        .split_whitespace()
        .take_while(|field| !field.starts_with('#'));

    let Some(path) = fields.next() else {
        return Ok(None);
    };

    let mut dep = Dependency {
        path: path.to_string(),
        ..Dependency::default()
    };

    if !dep.is_relative_import_path() {
        return Err(CartageError::InvalidImportPath { path: dep.path });
    }

    match fields.next() {
        Some(BLEEDING_EDGE_VERSION) => dep.bleeding_edge = true,
        Some(version) => dep.version = version.to_string(),
        None => {
            return Err(CartageError::MissingVersion {
                path: dep.path,
            });
        }
    }

    if let Some(tags) = fields.next() {
        dep.tags = tags
            .split(',')
            .filter(|tag| !tag.is_empty())
            .map(ToString::to_string)
            .collect();
    }

    Ok(Some(dep))
}
