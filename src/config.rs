// src/config.rs
use crate::error::{Result, VerifyError};
use std::path::PathBuf;

/// Source file extensions the anti-pattern scan looks at.
pub const SCAN_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Top-level source areas; anything outside them is never a candidate.
pub const SCAN_PREFIXES: &[&str] = &["apps/", "packages/"];

/// Directory names pruned at any depth during the walk.
pub const PRUNE_DIRS: &[&str] = &["node_modules", ".next", "dist", "coverage", ".git"];

/// Upper bound on candidates handed to the scanner per run.
pub const MAX_CANDIDATES: usize = 500;

/// Base-name fragments that mark a file as a test artifact.
pub const TEST_MARKERS: &[&str] = &[".test.", ".spec.", "__tests__"];

/// Tooling directory whose files are never scanned.
pub const TOOLING_DIR: &str = "scripts";

/// Inclusion/exclusion rules for the file walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub extensions: Vec<String>,
    pub prefixes: Vec<String>,
    pub prune_dirs: Vec<String>,
    pub max_candidates: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            extensions: owned(SCAN_EXTENSIONS),
            prefixes: owned(SCAN_PREFIXES),
            prune_dirs: owned(PRUNE_DIRS),
            max_candidates: MAX_CANDIDATES,
        }
    }
}

impl SelectionPolicy {
    #[must_use]
    pub fn should_prune(&self, dir_name: &str) -> bool {
        self.prune_dirs.iter().any(|d| d == dir_name)
    }

    #[must_use]
    pub fn has_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    /// `relative` must already use forward slashes.
    #[must_use]
    pub fn has_prefix(&self, relative: &str) -> bool {
        self.prefixes.iter().any(|p| relative.starts_with(p.as_str()))
    }
}

/// Inputs for one gate run.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub selection: SelectionPolicy,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("."),
            selection: SelectionPolicy::default(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Config`] if the selection policy could never
    /// yield a candidate.
    pub fn validate(&self) -> Result<()> {
        if self.selection.extensions.is_empty() {
            return Err(VerifyError::Config("no scan extensions".into()));
        }
        if self.selection.prefixes.is_empty() {
            return Err(VerifyError::Config("no scan prefixes".into()));
        }
        if self.selection.max_candidates == 0 {
            return Err(VerifyError::Config("candidate cap must be positive".into()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
