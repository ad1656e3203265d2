//! Deduplicated download link collection and its on-disk artifact.
//!
//! The collection grows monotonically during the crawl, is written once to a
//! newline-delimited text file, and is then moved by value into the download
//! phase as its worklist. The file is never read back in the same run.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Set of unique download URLs. Iteration order is sorted, which makes the
/// link file stable across runs over the same catalog contents.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkCollection {
    links: BTreeSet<String>,
}

impl LinkCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a URL, returning false if it was already present.
    pub fn insert(&mut self, url: String) -> bool {
        self.links.insert(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.links.contains(url)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }

    /// Writes the collection to `path`, one URL per line, replacing any
    /// previous file. The artifact is for external inspection only.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("create link list {}", path.display()))?;
        let mut out = BufWriter::new(file);
        for url in &self.links {
            writeln!(out, "{url}").with_context(|| format!("write {}", path.display()))?;
        }
        out.flush()
            .with_context(|| format!("flush {}", path.display()))?;
        Ok(())
    }
}

impl IntoIterator for LinkCollection {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

impl FromIterator<String> for LinkCollection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}
