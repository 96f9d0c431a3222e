// src/types.rs
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// A single forbidden construct found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: PathBuf,
    /// 1-based; `None` for whole-file patterns.
    pub line: Option<usize>,
    pub pattern: &'static str,
    pub snippet: String,
}

impl Violation {
    #[must_use]
    pub fn at_line(path: &Path, line: usize, pattern: &'static str, text: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            line: Some(line),
            pattern,
            snippet: text.to_string(),
        }
    }

    #[must_use]
    pub fn whole_file(path: &Path, pattern: &'static str, matched: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            line: None,
            pattern,
            snippet: matched.to_string(),
        }
    }
}

/// Outcome of a single pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Passed,
    Failed,
    Skipped,
}

/// A completed step: written once when its action finishes.
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// 1-based position in the pipeline.
    pub ordinal: usize,
    pub id: &'static str,
    pub label: String,
    pub status: StepStatus,
    pub duration: Duration,
    /// Why the step failed or was skipped.
    pub detail: Option<String>,
}

impl StepRecord {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == StepStatus::Passed
    }
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: SystemTime,
    pub steps: Vec<StepRecord>,
    pub elapsed: Duration,
}

impl RunReport {
    #[must_use]
    pub fn new(started_at: SystemTime) -> Self {
        Self {
            started_at,
            steps: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.count(StepStatus::Passed)
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(StepStatus::Failed)
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(StepStatus::Skipped)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.steps.len()
    }

    /// Skips don't count against the verdict.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failed_count() == 0
    }

    fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }
}
