//! External command execution.
//!
//! Discovery runs its tools through [`CommandRunner`] so tests can hand it
//! canned output instead of spawning processes.

use crate::error::{SetupError, SetupResult};
use std::io;
use std::process::Command;

/// Captured result of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Output of a process that exited with status 0.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self { status: Some(0), stdout: stdout.into(), stderr: String::new() }
    }

    pub const fn succeeded(&self) -> bool {
        matches!(self.status, Some(0))
    }
}

/// Runs an external program to completion and captures its output.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> SetupResult<CommandOutput>;
}

/// Runs programs with [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> SetupResult<CommandOutput> {
        log::debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(program).args(args).output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SetupError::ToolNotFound { tool: program.to_string() }
            } else {
                SetupError::Spawn { tool: program.to_string(), source: e }
            }
        })?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        // Not an error: the caller still parses whatever stdout holds.
        if !result.succeeded() {
            log::warn!(
                "{} exited with status {:?}: {}",
                program,
                result.status,
                result.stderr.trim()
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_not_found() {
        let err = SystemRunner
            .run("boardscan-definitely-missing-tool", &["-i"])
            .expect_err("missing tool should fail");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "boardscan-definitely-missing-tool not found");
    }

    #[test]
    fn test_success_constructor() {
        let out = CommandOutput::success("hello");
        assert!(out.succeeded());
        assert_eq!(out.stdout, "hello");
        assert!(out.stderr.is_empty());
    }

    #[test]
    fn test_nonzero_status_is_not_success() {
        let out = CommandOutput { status: Some(1), ..CommandOutput::default() };
        assert!(!out.succeeded());
        let killed = CommandOutput { status: None, ..CommandOutput::default() };
        assert!(!killed.succeeded());
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        let out = SystemRunner.run("sh", &["-c", "echo probe; exit 3"]).expect("sh should run");
        assert_eq!(out.stdout.trim(), "probe");
        assert_eq!(out.status, Some(3));
    }
}
