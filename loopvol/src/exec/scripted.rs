//! Scripted [`CommandExecutor`] double for unit tests.

use std::collections::VecDeque;

use loopvol_shared::errors::{LoopvolError, LoopvolResult};
use parking_lot::Mutex;

use super::{CommandExecutor, HostCommand};

enum Reply {
    Output(String),
    Failure { code: i32, output: String },
}

/// Replays canned replies in order and records every command it receives.
///
/// Each reply is bound to the program it expects; a command for a different
/// program, or one arriving after the script ran out, fails as `Unexpected`.
#[derive(Default)]
pub(crate) struct ScriptedExecutor {
    replies: Mutex<VecDeque<(String, Reply)>>,
    calls: Mutex<Vec<HostCommand>>,
}

impl ScriptedExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Script a successful run of `program` printing `output`.
    pub(crate) fn succeed(self, program: &str, output: &str) -> Self {
        self.replies
            .lock()
            .push_back((program.to_string(), Reply::Output(output.to_string())));
        self
    }

    /// Script a failed run of `program` exiting with `code` and printing `output`.
    pub(crate) fn fail(self, program: &str, code: i32, output: &str) -> Self {
        self.replies.lock().push_back((
            program.to_string(),
            Reply::Failure {
                code,
                output: output.to_string(),
            },
        ));
        self
    }

    pub(crate) fn calls(&self) -> Vec<HostCommand> {
        self.calls.lock().clone()
    }

    /// Rendered command lines, in call order.
    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.to_string()).collect()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.replies.lock().len()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn run(&self, command: &HostCommand) -> LoopvolResult<String> {
        self.calls.lock().push(command.clone());

        let Some((program, reply)) = self.replies.lock().pop_front() else {
            return Err(LoopvolError::Unexpected(format!(
                "unscripted command: {}",
                command
            )));
        };

        if program != command.program() {
            return Err(LoopvolError::Unexpected(format!(
                "expected {} but ran: {}",
                program, command
            )));
        }

        match reply {
            Reply::Output(output) => Ok(output),
            Reply::Failure { code, output } => Err(LoopvolError::external_command(
                command.to_string(),
                Some(code),
                &output,
            )),
        }
    }
}
