use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::path_match::common_suffix_len;
use crate::tree::{PathEntry, PathTree};

/// Every path in `tree` whose final segment equals `file_name`, rooted at
/// `prefix`, in enumeration order. Matches are not descended into.
pub fn matching_paths<'a>(
    tree: &'a PathTree,
    file_name: &str,
    prefix: &Path,
) -> Vec<(PathBuf, &'a PathEntry)> {
    let mut found = Vec::new();
    collect_matches(tree, file_name, prefix, &mut found);
    found
}

fn collect_matches<'a>(
    tree: &'a PathTree,
    file_name: &str,
    prefix: &Path,
    found: &mut Vec<(PathBuf, &'a PathEntry)>,
) {
    for (segment, entry) in tree.iter() {
        let path = prefix.join(segment);
        if segment == file_name {
            found.push((path, entry));
        } else if let PathEntry::Dir(sub) = entry {
            collect_matches(sub, file_name, &path, found);
        }
    }
}

/// Index and score of the candidate sharing the longest suffix with
/// `target`. Ties keep the earliest candidate.
pub fn best_match<'a, I>(target: &str, candidates: I) -> Option<(usize, usize)>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut best: Option<(usize, usize)> = None;
    for (idx, path) in candidates.into_iter().enumerate() {
        let score = common_suffix_len(target, &path.to_string_lossy());
        debug!(path = %path.display(), score, "artifact candidate");
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((idx, score)),
        }
    }
    best
}

/// Resolves source files to compiled artifacts inside an output directory.
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    root: PathBuf,
    tree: PathTree,
}

impl ArtifactLocator {
    /// Index `root` from disk.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let tree = PathTree::index(&root)?;
        Ok(Self { root, tree })
    }

    pub fn from_tree(root: impl Into<PathBuf>, tree: PathTree) -> Self {
        Self {
            root: root.into(),
            tree,
        }
    }

    /// The artifact directory best matching `source`, e.g.
    /// `out/contracts/Order.sol` for `contracts/Order.sol`.
    pub fn locate_dir(&self, source: &str) -> Result<(PathBuf, &PathEntry)> {
        let not_found = || Error::NotFound {
            target: source.to_owned(),
            root: self.root.clone(),
        };
        let file_name = Path::new(source)
            .file_name()
            .map(|name| name.to_string_lossy())
            .ok_or_else(not_found)?;

        let mut matches = matching_paths(&self.tree, &file_name, &self.root);
        let (idx, score) = best_match(source, matches.iter().map(|(path, _)| path.as_path()))
            .ok_or_else(not_found)?;
        let (path, entry) = matches.swap_remove(idx);
        info!(path = %path.display(), score, "selected artifact directory");
        Ok((path, entry))
    }

    /// The artifact file for `source`: the first entry of its artifact
    /// directory.
    pub fn locate(&self, source: &str) -> Result<PathBuf> {
        let (dir, entry) = self.locate_dir(source)?;
        let PathEntry::Dir(listing) = entry else {
            return Err(Error::NotAnArtifactDirectory(dir));
        };
        match listing.first() {
            Some(first) => Ok(dir.join(first)),
            None => Err(Error::EmptyArtifactDirectory(dir)),
        }
    }
}
