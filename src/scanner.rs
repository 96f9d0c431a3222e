// src/scanner.rs
//! The anti-pattern scanner.
//!
//! Takes an explicit file list, applies the skip policy, matches every
//! remaining file against the rule set and prints violations as they are
//! found. Files that cannot be read count as clean: binaries and locked files
//! are normal in a working tree.

use crate::config::{TEST_MARKERS, TOOLING_DIR};
use crate::discovery::normalize_path;
use crate::error::Result;
use crate::patterns::RuleSet;
use crate::types::Violation;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Aggregate of one scanner invocation.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Files handed to the scanner, skipped ones included.
    pub candidate_count: usize,
    pub skipped_count: usize,
    pub violations: Vec<Violation>,
}

impl ScanResult {
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

pub struct Scanner {
    rules: RuleSet,
    /// Project root; the skip policy sees paths relative to it.
    root: Option<PathBuf>,
}

impl Scanner {
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self { rules, root: None }
    }

    /// Anchors the skip policy at `root`, so directories above the project
    /// never count as tooling or test areas.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Scanner over the built-in rule set.
    ///
    /// # Errors
    /// Only fails if the built-in rule table is broken.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(RuleSet::builtin()?))
    }

    /// Scans `files`, printing violations to stdout.
    ///
    /// # Errors
    /// Returns error if stdout cannot be written.
    pub fn scan<P: AsRef<Path>>(&self, files: &[P]) -> Result<ScanResult> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.scan_to(files, &mut lock)
    }

    /// Scans `files`, printing violations to `out` in discovery order.
    ///
    /// # Errors
    /// Returns error if `out` cannot be written.
    pub fn scan_to<P, W>(&self, files: &[P], out: &mut W) -> Result<ScanResult>
    where
        P: AsRef<Path>,
        W: Write + ?Sized,
    {
        let mut result = ScanResult {
            candidate_count: files.len(),
            ..ScanResult::default()
        };

        for file in files {
            let path = file.as_ref();
            if should_skip(self.policy_path(path)) {
                tracing::debug!(path = %path.display(), "skipped by policy");
                result.skipped_count += 1;
                continue;
            }
            let found = self.check_file(path);
            for v in &found {
                print_violation(out, v)?;
            }
            result.violations.extend(found);
        }

        if !result.passed() {
            print_blocked_footer(out, result.violation_count())?;
        }

        tracing::info!(
            candidates = result.candidate_count,
            skipped = result.skipped_count,
            violations = result.violation_count(),
            "anti-pattern scan finished"
        );
        Ok(result)
    }

    fn policy_path<'p>(&self, path: &'p Path) -> &'p Path {
        match &self.root {
            Some(root) => path.strip_prefix(root).unwrap_or(path),
            None => path,
        }
    }

    fn check_file(&self, path: &Path) -> Vec<Violation> {
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "unreadable, treated as clean");
                return Vec::new();
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        self.rules.match_text(path, &text)
    }
}

/// Test artifacts and tooling scripts are never scanned.
#[must_use]
pub fn should_skip(path: &Path) -> bool {
    let base = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    if TEST_MARKERS.iter().any(|m| base.contains(m)) {
        return true;
    }
    let normalized = normalize_path(path);
    normalized.contains(&format!("/{TOOLING_DIR}/"))
        || normalized.starts_with(&format!("{TOOLING_DIR}/"))
}

fn print_violation<W: Write + ?Sized>(out: &mut W, v: &Violation) -> io::Result<()> {
    if let Some(line) = v.line {
        writeln!(out, "{line}:{}", v.snippet)?;
    }
    writeln!(out, "  BLOCKED: {} in {}", v.pattern, v.path.display())
}

fn print_blocked_footer<W: Write + ?Sized>(out: &mut W, count: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "COMMIT BLOCKED: {count} anti-pattern violation(s) found.")?;
    writeln!(out, "See AGENTS.md for project constraints.")
}
