// src/reporting.rs
//! Console rendering for pipeline runs.
//!
//! All text goes through [`Reporter`], which owns a [`Style`] deciding whether
//! ANSI colour is applied. Tests render with colour off and compare plain text.

use crate::types::{RunReport, StepRecord, StepStatus};
use colored::{ColoredString, Colorize};
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Colour on/off switch for console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    #[must_use]
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Colour only when stdout is a terminal. `NO_COLOR` is honoured by
    /// `colored` itself.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            color: io::stdout().is_terminal(),
        }
    }

    fn paint(self, text: &str, f: impl FnOnce(&str) -> ColoredString) -> String {
        if self.color {
            f(text).to_string()
        } else {
            text.to_string()
        }
    }

    #[must_use]
    pub fn success(self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    #[must_use]
    pub fn failure(self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }

    #[must_use]
    pub fn warning(self, text: &str) -> String {
        self.paint(text, |t| t.yellow())
    }

    #[must_use]
    pub fn rule(self, text: &str) -> String {
        self.paint(text, |t| t.cyan())
    }

    #[must_use]
    pub fn heading(self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }
}

/// Writes pipeline progress and the final summary.
pub struct Reporter<'a, W: Write + ?Sized> {
    out: &'a mut W,
    style: Style,
}

impl<'a, W: Write + ?Sized> Reporter<'a, W> {
    pub fn new(out: &'a mut W, style: Style) -> Self {
        Self { out, style }
    }

    /// Underlying sink, for steps that print their own output.
    pub fn out(&mut self) -> &mut W {
        &mut *self.out
    }

    /// # Errors
    /// Returns error if the sink cannot be written.
    pub fn step_header(&mut self, ordinal: usize, total: usize, label: &str) -> io::Result<()> {
        let s = self.style;
        writeln!(self.out)?;
        writeln!(self.out, "{}", s.rule(RULE))?;
        writeln!(self.out, "{}", s.heading(&format!("[{ordinal}/{total}] {label}")))?;
        writeln!(self.out, "{}", s.rule(RULE))?;
        self.out.flush()
    }

    /// # Errors
    /// Returns error if the sink cannot be written.
    pub fn step_outcome(&mut self, record: &StepRecord) -> io::Result<()> {
        let s = self.style;
        let secs = whole_seconds(record.duration);
        let line = match record.status {
            StepStatus::Passed => s.success(&format!("✓ {} ({secs}s)", record.label)),
            StepStatus::Failed => s.failure(&format!("✗ {} FAILED ({secs}s)", record.label)),
            StepStatus::Skipped => {
                let reason = record.detail.as_deref().unwrap_or("skipped");
                s.warning(&format!("⊘ {reason}"))
            }
        };
        writeln!(self.out, "{line}")?;
        if record.status == StepStatus::Failed {
            if let Some(detail) = &record.detail {
                writeln!(self.out, "  {detail}")?;
            }
        }
        self.out.flush()
    }

    /// # Errors
    /// Returns error if the sink cannot be written.
    pub fn summary(&mut self, report: &RunReport) -> io::Result<()> {
        let s = self.style;
        writeln!(self.out)?;
        writeln!(self.out, "{}", s.rule(RULE))?;
        writeln!(self.out, "{}", s.heading("VERIFICATION SUMMARY"))?;
        writeln!(self.out, "{}", s.rule(RULE))?;
        writeln!(self.out, "  {}", s.success(&format!("✓ Passed:  {}", report.passed_count())))?;
        writeln!(self.out, "  {}", s.failure(&format!("✗ Failed:  {}", report.failed_count())))?;
        writeln!(self.out, "  {}", s.warning(&format!("⊘ Skipped: {}", report.skipped_count())))?;
        writeln!(
            self.out,
            "  Total:   {} checks in {}s",
            report.total(),
            whole_seconds(report.elapsed)
        )?;
        writeln!(self.out)?;
        self.verdict(report)
    }

    fn verdict(&mut self, report: &RunReport) -> io::Result<()> {
        let s = self.style;
        if report.passed() {
            writeln!(self.out, "{}", s.success(&s.heading("ALL CHECKS PASSED")))?;
        } else {
            let failed = report.failed_count();
            writeln!(
                self.out,
                "{} — {failed} check(s) did not pass.",
                s.failure(&s.heading("VERIFICATION FAILED"))
            )?;
        }
        self.out.flush()
    }
}

fn whole_seconds(d: Duration) -> u64 {
    d.as_secs()
}
