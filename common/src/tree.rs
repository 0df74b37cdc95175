use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// A node of an indexed directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathEntry {
    File,
    Dir(PathTree),
}

/// In-memory snapshot of a directory's contents.
///
/// Entries are kept sorted by name so enumeration order, and therefore
/// artifact tie-breaking, is the same on every platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTree {
    entries: BTreeMap<String, PathEntry>,
}

impl PathTree {
    /// Recursively index `root`. Anything that is not a directory is a leaf.
    pub fn index(root: &Path) -> Result<Self> {
        let mut entries = BTreeMap::new();
        let listing = fs::read_dir(root).map_err(|e| Error::io(root, e))?;
        for entry in listing {
            let entry = entry.map_err(|e| Error::io(root, e))?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let node = if path.is_dir() {
                PathEntry::Dir(Self::index(&path)?)
            } else {
                PathEntry::File
            };
            entries.insert(name, node);
        }
        Ok(Self { entries })
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&PathEntry> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn first(&self) -> Option<&str> {
        self.entries.keys().next().map(String::as_str)
    }

    /// Build a tree from in-memory file paths, e.g. `["a/b.json", "c.json"]`.
    #[cfg(test)]
    pub(crate) fn from_paths<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tree = Self::default();
        for path in paths {
            let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            tree.insert_file(&segments);
        }
        tree
    }

    #[cfg(test)]
    fn insert_file(&mut self, segments: &[&str]) {
        match segments {
            [] => {}
            [file] => {
                self.entries.entry((*file).to_owned()).or_insert(PathEntry::File);
            }
            [dir, rest @ ..] => {
                let entry = self
                    .entries
                    .entry((*dir).to_owned())
                    .or_insert_with(|| PathEntry::Dir(PathTree::default()));
                if let PathEntry::File = entry {
                    *entry = PathEntry::Dir(PathTree::default());
                }
                if let PathEntry::Dir(tree) = entry {
                    tree.insert_file(rest);
                }
            }
        }
    }
}
