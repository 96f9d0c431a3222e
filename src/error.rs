// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("invalid rule set: {0}")]
    RuleSet(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}", exit_label(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("{0} anti-pattern violation(s) found")]
    Violations(usize),
}

pub type Result<T> = std::result::Result<T, VerifyError>;

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "no exit code (signal)".to_string(), |c| format!("status {c}"))
}

// Allow `?` on std::io::Error by converting to VerifyError::Io with unknown path.
impl From<std::io::Error> for VerifyError {
    fn from(source: std::io::Error) -> Self {
        VerifyError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
