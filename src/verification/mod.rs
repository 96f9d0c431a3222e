//! The verification pipeline.
//!
//! Seven fixed steps run strictly in order. A failing step never stops the
//! run: every category is reported in one pass and the verdict is computed at
//! the end.
//!
//! ```text
//! typecheck → lint → test → anti-patterns → lint:naming → wrangler-sync → build
//! ```

mod runner;

use std::io::Write;
use std::time::{Instant, SystemTime};

use crate::config::Config;
use crate::discovery::FileSelector;
use crate::error::{Result, VerifyError};
use crate::reporting::{Reporter, Style};
use crate::scanner::Scanner;
use crate::types::{RunReport, StepRecord, StepStatus};

pub use runner::{CommandRunner, CommandSpec, SystemRunner};

/// What a step does when it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    Command(CommandSpec),
    AntiPatternScan,
}

/// Declarative step entry.
#[derive(Debug, Clone)]
pub struct StepSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub action: StepAction,
    /// Whether `--skip-build` bypasses this step.
    pub skippable: bool,
}

impl StepSpec {
    fn command(id: &'static str, label: &'static str, program: &str, args: &[&str]) -> Self {
        Self {
            id,
            label,
            action: StepAction::Command(CommandSpec::new(program, args)),
            skippable: false,
        }
    }
}

/// The fixed pipeline, in execution order.
#[must_use]
pub fn default_steps() -> Vec<StepSpec> {
    vec![
        StepSpec::command("typecheck", "TypeScript Type Check", "npx", &["turbo", "run", "typecheck"]),
        StepSpec::command("lint", "ESLint", "npx", &["turbo", "run", "lint"]),
        StepSpec::command("test", "Unit Tests (Vitest)", "npx", &["vitest", "run"]),
        StepSpec {
            id: "anti-patterns",
            label: "Anti-pattern Scan",
            action: StepAction::AntiPatternScan,
            skippable: false,
        },
        StepSpec::command("lint:naming", "Naming Convention Check", "node", &["scripts/lint-naming.js"]),
        StepSpec::command(
            "wrangler-sync",
            "Wrangler Binding Sync",
            "node",
            &["scripts/check-wrangler-sync.js"],
        ),
        StepSpec {
            skippable: true,
            ..StepSpec::command("build", "Production Build", "npx", &["turbo", "run", "build"])
        },
    ]
}

/// Operator switches for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub skip_build: bool,
}

/// Outcome of a step's action before it is recorded.
enum Outcome {
    Passed,
    Failed(String),
    Skipped(String),
}

/// Drives the pipeline and builds the [`RunReport`].
pub struct Orchestrator<R: CommandRunner> {
    config: Config,
    steps: Vec<StepSpec>,
    runner: R,
    scanner: Scanner,
    style: Style,
}

impl Orchestrator<SystemRunner> {
    /// Orchestrator running real commands in `config.root`.
    ///
    /// # Errors
    /// Returns error if the configuration or built-in rule set is invalid.
    pub fn system(config: Config) -> Result<Self> {
        let runner = SystemRunner::new(&config.root);
        Self::new(config, runner)
    }
}

impl<R: CommandRunner> Orchestrator<R> {
    /// # Errors
    /// Returns error if the configuration or built-in rule set is invalid.
    pub fn new(config: Config, runner: R) -> Result<Self> {
        config.validate()?;
        let scanner = Scanner::builtin()?.with_root(&config.root);
        Ok(Self {
            config,
            steps: default_steps(),
            runner,
            scanner,
            style: Style::detect(),
        })
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    #[must_use]
    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    /// Runs every step in order and prints the summary to `out`.
    ///
    /// External commands write straight to the inherited stdout/stderr; only
    /// the gate's own text goes through `out`.
    ///
    /// # Errors
    /// Returns error only if `out` cannot be written. Step failures are
    /// recorded in the report, never returned.
    pub fn run<W: Write + ?Sized>(&self, options: &RunOptions, out: &mut W) -> Result<RunReport> {
        let started = Instant::now();
        let mut report = RunReport::new(SystemTime::now());
        let mut reporter = Reporter::new(out, self.style);
        let total = self.steps.len();

        for (idx, spec) in self.steps.iter().enumerate() {
            let ordinal = idx + 1;
            let label = if spec.skippable && options.skip_build {
                format!("{} (SKIPPED)", short_label(spec.label))
            } else {
                spec.label.to_string()
            };
            reporter.step_header(ordinal, total, &label)?;
            tracing::debug!(step = spec.id, ordinal, "starting step");

            let step_start = Instant::now();
            let outcome = if spec.skippable && options.skip_build {
                Outcome::Skipped(format!("{} skipped via --skip-build", short_label(spec.label)))
            } else {
                self.execute(spec, reporter.out())?
            };

            let record = record_step(ordinal, spec.id, label, outcome, step_start);
            tracing::info!(step = record.id, status = ?record.status, "step finished");
            reporter.step_outcome(&record)?;
            report.steps.push(record);
        }

        report.elapsed = started.elapsed();
        reporter.summary(&report)?;
        Ok(report)
    }

    fn execute<W: Write + ?Sized>(&self, spec: &StepSpec, out: &mut W) -> Result<Outcome> {
        match &spec.action {
            StepAction::Command(cmd) => {
                out.flush()?;
                Ok(match self.runner.run(cmd) {
                    Ok(()) => Outcome::Passed,
                    Err(e) => Outcome::Failed(e.to_string()),
                })
            }
            StepAction::AntiPatternScan => self.scan_step(out),
        }
    }

    fn scan_step<W: Write + ?Sized>(&self, out: &mut W) -> Result<Outcome> {
        let selector = FileSelector::new(&self.config.root, self.config.selection.clone());
        let files = match selector.select() {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(error = %e, "candidate walk aborted");
                return Ok(Outcome::Failed(e.to_string()));
            }
        };
        if files.is_empty() {
            return Ok(Outcome::Skipped("No TS/TSX files found to scan".into()));
        }

        let result = self.scanner.scan_to(&files, out)?;
        if result.passed() {
            Ok(Outcome::Passed)
        } else {
            Ok(Outcome::Failed(
                VerifyError::Violations(result.violation_count()).to_string(),
            ))
        }
    }
}

/// "Production Build" → "Build".
fn short_label(label: &str) -> &str {
    label.rsplit(' ').next().unwrap_or(label)
}

fn record_step(
    ordinal: usize,
    id: &'static str,
    label: String,
    outcome: Outcome,
    started: Instant,
) -> StepRecord {
    let (status, detail) = match outcome {
        Outcome::Passed => (StepStatus::Passed, None),
        Outcome::Failed(why) => (StepStatus::Failed, Some(why)),
        Outcome::Skipped(why) => (StepStatus::Skipped, Some(why)),
    };
    StepRecord {
        ordinal,
        id,
        label,
        status,
        duration: started.elapsed(),
        detail,
    }
}
