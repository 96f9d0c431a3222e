// src/exit.rs
//! Process exit codes for the gate binaries.
//!
//! Scripts and CI only distinguish zero from non-zero, so the contract is
//! kept to two codes.

use colored::Colorize;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum GateExit {
    /// Every step passed or was skipped; the scan found nothing.
    Success = 0,
    /// At least one step failed, a violation was found, or usage was wrong.
    Failed = 1,
}

impl GateExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Maps a pass/fail verdict onto an exit code.
    #[must_use]
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Self::Success
        } else {
            Self::Failed
        }
    }
}

impl Termination for GateExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let code = self.code() as u8;
        std::process::ExitCode::from(code)
    }
}

impl From<anyhow::Result<GateExit>> for GateExit {
    fn from(res: anyhow::Result<GateExit>) -> Self {
        match res {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{} {e:#}", "error:".red().bold());
                Self::Failed
            }
        }
    }
}
