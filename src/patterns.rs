// src/patterns.rs
//! Forbidden-construct patterns and the text matcher.
//!
//! Matching is purely textual. Line-scoped patterns run once per physical
//! line; the single whole-file pattern sees the full content so it can match
//! across line breaks.

use crate::error::{Result, VerifyError};
use crate::types::Violation;
use regex::Regex;
use std::path::Path;

/// What a pattern is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Line,
    WholeFile,
}

/// Declarative pattern entry.
#[derive(Debug, Clone, Copy)]
pub struct PatternSpec {
    pub name: &'static str,
    pub scope: Scope,
    pub regex: &'static str,
}

/// The active rule set, in reporting order.
pub const BUILTIN_PATTERNS: &[PatternSpec] = &[
    PatternSpec {
        name: "'as any'",
        scope: Scope::Line,
        regex: r"\bas\s+any\b",
    },
    PatternSpec {
        name: "'@ts-ignore' or '@ts-expect-error'",
        scope: Scope::Line,
        regex: r"@ts-ignore|@ts-expect-error",
    },
    PatternSpec {
        name: "'console.log'",
        scope: Scope::Line,
        regex: r"\bconsole\.log\b",
    },
    PatternSpec {
        name: "Native dialog (window.alert/confirm)",
        scope: Scope::Line,
        regex: r"\bwindow\.(alert|confirm)\b",
    },
    PatternSpec {
        name: "Empty catch block",
        scope: Scope::WholeFile,
        regex: r"(?s)catch\s*\([^)]*\)\s*\{\s*\}",
    },
];

/// A compiled pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    name: &'static str,
    scope: Scope,
    regex: Regex,
}

impl Pattern {
    /// # Errors
    /// Returns error if the regex does not compile.
    pub fn compile(spec: &PatternSpec) -> Result<Self> {
        Ok(Self {
            name: spec.name,
            scope: spec.scope,
            regex: Regex::new(spec.regex)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    fn match_lines(&self, path: &Path, text: &str, out: &mut Vec<Violation>) {
        for (idx, line) in text.lines().enumerate() {
            if self.regex.is_match(line) {
                out.push(Violation::at_line(path, idx + 1, self.name, line));
            }
        }
    }

    fn match_whole(&self, path: &Path, text: &str, out: &mut Vec<Violation>) {
        if let Some(m) = self.regex.find(text) {
            out.push(Violation::whole_file(path, self.name, m.as_str()));
        }
    }
}

/// Ordered, validated set of patterns.
#[derive(Debug, Clone)]
pub struct RuleSet {
    patterns: Vec<Pattern>,
}

impl RuleSet {
    /// Compiles `specs`, keeping their order.
    ///
    /// # Errors
    /// Returns [`VerifyError::Regex`] for a bad expression, or
    /// [`VerifyError::RuleSet`] unless exactly one pattern is whole-file scoped.
    pub fn new(specs: &[PatternSpec]) -> Result<Self> {
        let whole = specs.iter().filter(|s| s.scope == Scope::WholeFile).count();
        if whole != 1 {
            return Err(VerifyError::RuleSet(format!(
                "expected exactly one whole-file pattern, found {whole}"
            )));
        }
        let patterns = specs.iter().map(Pattern::compile).collect::<Result<_>>()?;
        Ok(Self { patterns })
    }

    /// The built-in anti-pattern rules.
    ///
    /// # Errors
    /// Only fails if the built-in table itself is broken.
    pub fn builtin() -> Result<Self> {
        Self::new(BUILTIN_PATTERNS)
    }

    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Returns every violation of every pattern in `text`.
    ///
    /// Order: pattern declaration order, then ascending line number.
    #[must_use]
    pub fn match_text(&self, path: &Path, text: &str) -> Vec<Violation> {
        let mut out = Vec::new();
        for p in &self.patterns {
            match p.scope {
                Scope::Line => p.match_lines(path, text, &mut out),
                Scope::WholeFile => p.match_whole(path, text, &mut out),
            }
        }
        out
    }
}
