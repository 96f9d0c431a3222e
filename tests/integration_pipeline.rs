// tests/integration_pipeline.rs - Orchestrator scenarios with a scripted runner
use gatekeeper_core::config::Config;
use gatekeeper_core::error::{Result, VerifyError};
use gatekeeper_core::reporting::Style;
use gatekeeper_core::types::StepStatus;
use gatekeeper_core::verification::{CommandRunner, CommandSpec, Orchestrator, RunOptions};
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Records every command and fails the ones whose rendering is listed.
#[derive(Default)]
struct ScriptedRunner {
    failing: Vec<&'static str>,
    missing: Vec<&'static str>,
    calls: RefCell<Vec<String>>,
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<()> {
        let rendered = cmd.to_string();
        self.calls.borrow_mut().push(rendered.clone());
        if self.missing.iter().any(|m| *m == rendered) {
            return Err(VerifyError::Spawn {
                program: cmd.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }
        if self.failing.iter().any(|m| *m == rendered) {
            return Err(VerifyError::CommandFailed {
                command: rendered,
                code: Some(1),
            });
        }
        Ok(())
    }
}

fn tree_with(file: &str, body: &str) -> TempDir {
    let d = tempfile::tempdir().unwrap();
    let p = d.path().join(file);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, body).unwrap();
    d
}

fn clean_tree() -> TempDir {
    tree_with("apps/web/page.tsx", "export const Page = () => null;\n")
}

fn config(root: &Path) -> Config {
    Config {
        root: root.to_path_buf(),
        ..Config::new()
    }
}

fn run(
    root: &Path,
    runner: ScriptedRunner,
    options: RunOptions,
) -> (gatekeeper_core::types::RunReport, String, Vec<String>) {
    let orchestrator = Orchestrator::new(config(root), runner)
        .unwrap()
        .with_style(Style::plain());
    let mut buf = Vec::new();
    let report = orchestrator.run(&options, &mut buf).unwrap();
    let calls = orchestrator_calls(&orchestrator);
    (report, String::from_utf8(buf).unwrap(), calls)
}

fn orchestrator_calls(o: &Orchestrator<ScriptedRunner>) -> Vec<String> {
    o.runner().calls.borrow().clone()
}

#[test]
fn skip_build_with_clean_steps_passes() {
    let d = clean_tree();
    let (report, out, calls) = run(
        d.path(),
        ScriptedRunner::default(),
        RunOptions { skip_build: true },
    );

    assert_eq!(report.passed_count(), 6);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.failed_count(), 0);
    assert!(report.passed());
    assert_eq!(report.steps[6].status, StepStatus::Skipped);
    assert!(!calls.iter().any(|c| c.contains("run build")));
    assert!(out.contains("[7/7] Build (SKIPPED)"));
    assert!(out.contains("⊘ Build skipped via --skip-build"));
    assert!(out.contains("ALL CHECKS PASSED"));
}

#[test]
fn failing_lint_does_not_stop_later_steps() {
    let d = clean_tree();
    let runner = ScriptedRunner {
        failing: vec!["npx turbo run lint"],
        ..ScriptedRunner::default()
    };
    let (report, out, calls) = run(d.path(), runner, RunOptions::default());

    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.passed_count(), 6);
    assert!(!report.passed());
    assert_eq!(report.steps[1].status, StepStatus::Failed);
    assert_eq!(
        calls,
        vec![
            "npx turbo run typecheck",
            "npx turbo run lint",
            "npx vitest run",
            "node scripts/lint-naming.js",
            "node scripts/check-wrangler-sync.js",
            "npx turbo run build",
        ]
    );
    assert!(out.contains("✗ ESLint FAILED"));
    assert!(out.contains("✓ Production Build"));
    assert!(out.contains("✗ Failed:  1"));
    assert!(out.contains("VERIFICATION FAILED — 1 check(s) did not pass."));
}

#[test]
fn missing_tool_is_a_failed_step() {
    let d = clean_tree();
    let runner = ScriptedRunner {
        missing: vec!["node scripts/lint-naming.js"],
        ..ScriptedRunner::default()
    };
    let (report, out, _) = run(d.path(), runner, RunOptions::default());

    assert_eq!(report.steps[4].status, StepStatus::Failed);
    assert_eq!(report.failed_count(), 1);
    assert!(out.contains("failed to start `node`"));
}

#[test]
fn violations_fail_only_the_scan_step() {
    let d = tree_with("packages/ui/button.tsx", "const x = value as any;\n");
    let (report, out, calls) = run(
        d.path(),
        ScriptedRunner::default(),
        RunOptions::default(),
    );

    assert_eq!(report.steps[3].id, "anti-patterns");
    assert_eq!(report.steps[3].status, StepStatus::Failed);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(calls.len(), 6);
    assert!(out.contains("1:const x = value as any;"));
    assert!(out.contains("BLOCKED: 'as any' in"));
}

#[test]
fn root_below_a_scripts_directory_is_scanned() {
    let d = tree_with("scripts/proj/apps/web/page.ts", "const x = value as any;\n");
    let root = d.path().join("scripts/proj");
    let (report, out, _) = run(&root, ScriptedRunner::default(), RunOptions::default());

    assert_eq!(report.steps[3].status, StepStatus::Failed);
    assert!(out.contains("1:const x = value as any;"));
}

#[test]
fn empty_tree_skips_scan() {
    let d = tempfile::tempdir().unwrap();
    let (report, out, _) = run(d.path(), ScriptedRunner::default(), RunOptions::default());

    assert_eq!(report.steps[3].status, StepStatus::Skipped);
    assert_eq!(report.passed_count(), 6);
    assert!(report.passed());
    assert!(out.contains("⊘ No TS/TSX files found to scan"));
}

#[test]
fn missing_root_fails_scan_step_but_run_completes() {
    let d = tempfile::tempdir().unwrap();
    let (report, _, calls) = run(
        &d.path().join("absent"),
        ScriptedRunner::default(),
        RunOptions::default(),
    );

    assert_eq!(report.steps[3].status, StepStatus::Failed);
    assert_eq!(report.total(), 7);
    assert_eq!(calls.len(), 6);
}

#[test]
fn every_step_gets_a_header_in_order() {
    let d = clean_tree();
    let (report, out, _) = run(d.path(), ScriptedRunner::default(), RunOptions::default());

    let mut last = 0;
    for (i, step) in report.steps.iter().enumerate() {
        assert_eq!(step.ordinal, i + 1);
        let header = format!("[{}/7] {}", i + 1, step.label);
        let pos = out.find(&header).unwrap();
        assert!(pos >= last);
        last = pos;
    }
    assert!(out.contains("Total:   7 checks in"));
}

#[test]
fn several_failures_are_all_counted() {
    let d = clean_tree();
    let runner = ScriptedRunner {
        failing: vec!["npx turbo run typecheck", "npx vitest run", "npx turbo run build"],
        ..ScriptedRunner::default()
    };
    let (report, out, _) = run(d.path(), runner, RunOptions::default());

    assert_eq!(report.failed_count(), 3);
    assert_eq!(report.passed_count(), 4);
    assert!(out.contains("3 check(s) did not pass."));
}
