//! External command execution.
//!
//! All host interaction (losetup, mkfs, mount, umount) goes through the
//! [`CommandExecutor`] trait. [`HostExecutor`] runs the real tools.

#[cfg(test)]
pub(crate) mod scripted;

use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::Command;

use loopvol_shared::errors::{LoopvolError, LoopvolResult};

/// A program and its arguments.
///
/// Arguments are passed to the program as-is, never through a shell, so
/// caller-supplied paths cannot inject extra commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCommand {
    program: String,
    args: Vec<OsString>,
}

impl HostCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.as_os_str())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external commands on behalf of the volume components.
pub trait CommandExecutor: Send + Sync {
    /// Run `command` to completion and return its combined output.
    ///
    /// A non-zero exit status is reported as
    /// [`LoopvolError::ExternalCommand`] carrying the captured output.
    fn run(&self, command: &HostCommand) -> LoopvolResult<String>;
}

/// Executes commands on the host with [`std::process::Command`].
///
/// Blocks until the child exits. There is no timeout: the orchestrator owns
/// termination of the whole plugin process.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostExecutor;

impl CommandExecutor for HostExecutor {
    fn run(&self, command: &HostCommand) -> LoopvolResult<String> {
        tracing::debug!("Running: {}", command);

        let output = Command::new(command.program())
            .args(command.args())
            .output()
            .map_err(|e| {
                LoopvolError::Unexpected(format!("Failed to run {}: {}", command.program(), e))
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            tracing::debug!(
                "{} failed with exit code {:?}: {}",
                command.program(),
                output.status.code(),
                combined.trim()
            );
            return Err(LoopvolError::external_command(
                command.to_string(),
                output.status.code(),
                &combined,
            ));
        }

        Ok(combined)
    }
}
