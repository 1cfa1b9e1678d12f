//! Error types used across loopvol.

use thiserror::Error;

/// Result type for loopvol operations.
pub type LoopvolResult<T> = Result<T, LoopvolError>;

#[derive(Debug, Error)]
pub enum LoopvolError {
    /// A required field is missing, empty or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An external tool exited non-zero.
    ///
    /// `message` is the tool's captured output, verbatim. It is the whole
    /// Display text so the orchestrator sees exactly what the tool printed.
    #[error("{message}")]
    ExternalCommand {
        command: String,
        code: Option<i32>,
        message: String,
    },

    /// No free loop device slot is available.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Discriminant of [`LoopvolError`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    ExternalCommandFailure,
    ResourceExhausted,
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::ExternalCommandFailure => "ExternalCommandFailure",
            ErrorKind::ResourceExhausted => "ResourceExhausted",
            ErrorKind::Unexpected => "Unexpected",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LoopvolError {
    /// Build an [`LoopvolError::ExternalCommand`] from a failed tool run.
    ///
    /// When the tool printed nothing, the message names the command and its
    /// exit status instead so the failure is never reported as an empty string.
    pub fn external_command(command: impl Into<String>, code: Option<i32>, output: &str) -> Self {
        let command = command.into();
        let message = if output.trim().is_empty() {
            match code {
                Some(code) => format!("`{}` exited with status {}", command, code),
                None => format!("`{}` was terminated by a signal", command),
            }
        } else {
            output.to_string()
        };

        LoopvolError::ExternalCommand {
            command,
            code,
            message,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LoopvolError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            LoopvolError::ExternalCommand { .. } => ErrorKind::ExternalCommandFailure,
            LoopvolError::ResourceExhausted(_) => ErrorKind::ResourceExhausted,
            LoopvolError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

// Implement From for common error types to enable `?` operator
impl From<std::io::Error> for LoopvolError {
    fn from(err: std::io::Error) -> Self {
        LoopvolError::Unexpected(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for LoopvolError {
    fn from(err: serde_json::Error) -> Self {
        LoopvolError::InvalidArgument(format!("malformed JSON parameters: {}", err))
    }
}
