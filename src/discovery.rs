// src/discovery.rs
//! Candidate file selection for the anti-pattern scan.

use crate::config::SelectionPolicy;
use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Walks a tree and yields the files the scanner should look at.
#[derive(Debug, Clone)]
pub struct FileSelector {
    root: PathBuf,
    policy: SelectionPolicy,
}

impl FileSelector {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, policy: SelectionPolicy) -> Self {
        Self {
            root: root.into(),
            policy,
        }
    }

    /// Lazily yields every eligible file in walk order, without the cap.
    ///
    /// The order is whatever the filesystem reports; stable for an unchanged
    /// tree but not sorted. The first walk error ends the sequence.
    pub fn candidates(&self) -> impl Iterator<Item = Result<PathBuf>> + '_ {
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |e| !self.is_pruned(e));

        walker
            .scan(false, move |failed, item| {
                if *failed {
                    return None;
                }
                Some(match item {
                    Ok(entry) => self.accept(&entry).map(Ok),
                    Err(e) => {
                        *failed = true;
                        Some(Err(e.into()))
                    }
                })
            })
            .flatten()
    }

    /// Collects at most `max_candidates` files.
    ///
    /// # Errors
    /// Returns the first walk error (e.g. an unreadable directory).
    pub fn select(&self) -> Result<Vec<PathBuf>> {
        let cap = self.policy.max_candidates;
        let mut files = Vec::new();
        for item in self.candidates() {
            if files.len() == cap {
                tracing::info!(cap, "candidate cap reached, remaining files not scanned");
                break;
            }
            files.push(item?);
        }
        Ok(files)
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self.policy.should_prune(&entry.file_name().to_string_lossy())
    }

    fn accept(&self, entry: &DirEntry) -> Option<PathBuf> {
        if !entry.file_type().is_file() {
            return None;
        }
        let path = entry.path();
        let ext = path.extension()?.to_str()?;
        if !self.policy.has_extension(ext) {
            return None;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        if !self.policy.has_prefix(&normalize_path(relative)) {
            return None;
        }
        Some(self.display_path(path, relative))
    }

    /// Keeps output short (`apps/x.ts`) when walking the working directory.
    fn display_path(&self, path: &Path, relative: &Path) -> PathBuf {
        if self.root == Path::new(".") {
            relative.to_path_buf()
        } else {
            path.to_path_buf()
        }
    }
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
