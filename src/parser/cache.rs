//! Parsed-tree cache keyed by file path
//!
//! The cache belongs to an analysis session. An entry is replaced whenever the
//! text submitted for its path differs from the text it was parsed from, so a
//! stale tree is never handed back for edited content.

use super::{parse_code, Language};
use eyre::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tree_sitter::Tree;

/// A parsed tree together with the exact text it was parsed from
#[derive(Debug)]
pub struct CachedTree {
    pub source: String,
    pub language: Language,
    pub tree: Tree,
}

#[derive(Debug, Default)]
pub struct ParseCache {
    entries: HashMap<PathBuf, CachedTree>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&CachedTree> {
        self.entries.get(path)
    }

    pub fn put(&mut self, path: PathBuf, entry: CachedTree) {
        self.entries.insert(path, entry);
    }

    /// Drop the entry for `path`, returning whether one existed
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the tree for `path`, re-parsing when `source` changed since the
    /// last call for the same path.
    pub fn parse(&mut self, path: &Path, source: &str, language: Language) -> Result<&CachedTree> {
        let stale = self
            .entries
            .get(path)
            .map_or(true, |entry| entry.source != source || entry.language != language);

        if stale {
            log::debug!("Parse cache miss for {}", path.display());
            let tree = parse_code(source, language)?;
            self.put(
                path.to_path_buf(),
                CachedTree {
                    source: source.to_string(),
                    language,
                    tree,
                },
            );
        } else {
            log::debug!("Parse cache hit for {}", path.display());
        }

        self.entries
            .get(path)
            .ok_or_else(|| eyre::eyre!("Parse cache lost entry for {}", path.display()))
    }
}
