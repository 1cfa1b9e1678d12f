//! The single JSON response every invocation prints.

use loopvol_shared::errors::{LoopvolError, LoopvolResult};
use serde::Serialize;

/// Outcome reported to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DriverStatus {
    Success,
    Failure,
    /// The subcommand is an optional call this plugin does not implement.
    #[serde(rename = "Not supported")]
    NotSupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverResponse {
    pub status: DriverStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl DriverResponse {
    pub fn success() -> Self {
        Self {
            status: DriverStatus::Success,
            message: None,
            device: None,
        }
    }

    pub fn attached(device: String) -> Self {
        Self {
            device: Some(device),
            ..Self::success()
        }
    }

    pub fn failure(error: &LoopvolError) -> Self {
        Self {
            status: DriverStatus::Failure,
            message: Some(error.to_string()),
            device: None,
        }
    }

    pub fn not_supported(command: &str) -> Self {
        Self {
            status: DriverStatus::NotSupported,
            message: Some(format!("{} is not supported", command)),
            device: None,
        }
    }

    /// Collapse an operation result into a response.
    pub fn from_result(result: LoopvolResult<DriverResponse>) -> Self {
        match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Operation failed ({}): {}", e.kind(), e);
                Self::failure(&e)
            }
        }
    }

    /// Process exit code: 0 for success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self.status {
            DriverStatus::Success => 0,
            DriverStatus::Failure | DriverStatus::NotSupported => 1,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({
                "status": "Failure",
                "message": format!("failed to encode response: {}", e),
            })
            .to_string()
        })
    }
}
