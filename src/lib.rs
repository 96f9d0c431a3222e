//! Pre-merge verification gate.
//!
//! [`verification::Orchestrator`] runs the fixed check battery;
//! [`scanner::Scanner`] is the embedded anti-pattern scan, also usable on an
//! explicit file list.

pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod logging;
pub mod patterns;
pub mod reporting;
pub mod scanner;
pub mod types;
pub mod verification;
