//! Action Execution
//!
//! The one place that spawns processes or invokes builtin operations.
//! Shell actions go to the platform shell as a single command line with
//! inherited stdio; the call blocks until the process exits. Failures come
//! back as errors, exit codes come back as data.

use crate::error::{Error, Result};
use crate::platform::OsId;
use crate::resolver::ResolvedAction;
use std::process::Command;

/// Exit code reported when a process dies without one (signal-terminated)
const SIGNALED_EXIT_CODE: i32 = -1;

/// Blocking executor for resolved actions
pub struct Executor {
    os: OsId,
    shell_override: Option<(String, String)>,
}

impl Executor {
    /// Create an executor for a platform
    pub fn new(os: OsId) -> Self {
        Self {
            os,
            shell_override: None,
        }
    }

    /// Use a specific shell program and command flag
    pub fn with_shell(mut self, shell: impl Into<String>, flag: impl Into<String>) -> Self {
        self.shell_override = Some((shell.into(), flag.into()));
        self
    }

    /// Carry out a resolved action
    ///
    /// Builtin success and a clean shell exit both return 0. A non-zero
    /// exit code is returned as-is for the caller to report. Errors are
    /// spawn failures, builtin failures, and actions with nothing to run.
    pub fn run(&self, action: &ResolvedAction) -> Result<i32> {
        match action {
            ResolvedAction::Builtin { op, args } => {
                debug!("Running builtin '{}'", op.name());
                op.run(args)?;
                Ok(0)
            }
            ResolvedAction::Shell { command_line } => self.run_shell(command_line),
            ResolvedAction::NoMatch => Err(Error::EmptyCommand),
        }
    }

    fn run_shell(&self, command_line: &str) -> Result<i32> {
        if command_line.trim().is_empty() {
            return Err(Error::EmptyCommand);
        }

        let (shell, flag) = self.shell_invocation();
        debug!("Spawning {} {} '{}'", shell, flag, command_line);

        let status = Command::new(shell)
            .arg(flag)
            .arg(command_line)
            .status()
            .map_err(|e| Error::SpawnFailed {
                command: command_line.to_string(),
                reason: e.to_string(),
            })?;

        let code = status.code().unwrap_or(SIGNALED_EXIT_CODE);
        if code != 0 {
            debug!("Command exited with status {}", code);
        }
        Ok(code)
    }

    fn shell_invocation(&self) -> (&str, &str) {
        if let Some((shell, flag)) = &self.shell_override {
            return (shell, flag);
        }
        if self.os.is_windows() {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        }
    }
}
